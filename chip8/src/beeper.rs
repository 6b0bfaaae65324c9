use anyhow::{anyhow, Result};
use log::debug;
use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};

const FREQUENCY: f32 = 440.0;
const VOLUME: f32 = 0.2;
const SAMPLE_RATE: i32 = 44_100;

struct SquareWave {
    phase_inc: f32,
    phase: f32,
    volume: f32,
}

impl AudioCallback for SquareWave {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = if self.phase <= 0.5 {
                self.volume
            } else {
                -self.volume
            };
            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

/// # Beeper
/// A single 440Hz tone that plays while the machine's sound timer is running.
pub struct Beeper {
    device: AudioDevice<SquareWave>,
    active: bool,
}

impl Beeper {
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self> {
        let audio = sdl.audio().map_err(|e| anyhow!(e))?;
        let desired = AudioSpecDesired {
            freq: Some(SAMPLE_RATE),
            channels: Some(1),
            samples: None,
        };
        let device = audio
            .open_playback(None, &desired, |spec| SquareWave {
                phase_inc: FREQUENCY / spec.freq as f32,
                phase: 0.0,
                volume: VOLUME,
            })
            .map_err(|e| anyhow!(e))?;

        Ok(Beeper {
            device,
            active: false,
        })
    }

    /// Starts or stops the tone; repeated calls with the same value do nothing
    pub fn set_active(&mut self, active: bool) {
        if active == self.active {
            return;
        }
        if active {
            self.device.resume();
        } else {
            self.device.pause();
        }
        debug!("beeper {}", if active { "on" } else { "off" });
        self.active = active;
    }
}
