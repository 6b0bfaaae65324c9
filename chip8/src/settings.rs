use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SCALE: u32 = 10;

/// Milliseconds between two steps of the machine
pub const DEFAULT_DELAY: u64 = 3;

pub const TITLE: &str = "octet";

/// Everything `run` needs to know, already validated
#[derive(Debug, Clone)]
pub struct Settings {
    pub rom: PathBuf,
    pub scale: u32,
    pub cycle_time: Duration,
    pub mute: bool,
}

impl Settings {
    pub fn new(rom: PathBuf, scale: u32, delay_ms: u64, mute: bool) -> Self {
        Settings {
            rom,
            scale,
            cycle_time: Duration::from_millis(delay_ms),
            mute,
        }
    }
}
