use std::thread;
use std::time::Instant;

use anyhow::{anyhow, Result};
use log::{info, warn};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use octet::Machine;
use octet_display::Display;

use crate::beeper::Beeper;
use crate::keymap::keymap;
use crate::settings::{Settings, TITLE};

pub fn run(settings: Settings) -> Result<()> {
    let mut machine = Machine::new();

    // Load ROM
    if let Err(e) = machine.load_rom_file(&settings.rom) {
        warn!(
            "encountered error while attempting to load {} but continuing execution: {}",
            settings.rom.display(),
            e
        );
    }

    // Get SDL2 context
    let sdl = sdl2::init().map_err(|e| anyhow!(e))?;
    let mut display = Display::new(&sdl, TITLE, settings.scale)?;
    let mut beeper = if settings.mute {
        None
    } else {
        Some(Beeper::new(&sdl)?)
    };
    let mut events = sdl.event_pump().map_err(|e| anyhow!(e))?;

    display.render(machine.frame())?;
    let mut last_cycle = Instant::now();

    'event: loop {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        machine.key_press(kc);
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        machine.key_release(kc);
                    }
                }
                _ => continue,
            };
        }

        // Update state
        machine.step();

        if let Some(beeper) = beeper.as_mut() {
            beeper.set_active(machine.sound_active());
        }

        // If the display changed, render the current frame
        if let Some(frame) = machine.take_frame() {
            display.render(frame)?;
        }

        // Handle timing
        let elapsed_cycle_time = last_cycle.elapsed();
        if settings.cycle_time > elapsed_cycle_time {
            thread::sleep(settings.cycle_time - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    info!("shutting down");
    Ok(())
}
