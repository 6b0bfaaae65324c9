use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;

use settings::{Settings, DEFAULT_DELAY, DEFAULT_SCALE};

mod beeper;
mod keymap;
mod run;
mod settings;

#[derive(Parser, Debug)]
#[command(version, about = "Runs a ROM on the octet virtual machine", long_about = None)]
struct Args {
    /// Path to the ROM file to run
    rom: PathBuf,

    /// Size multiplier for each pixel
    #[arg(short, long, default_value_t = DEFAULT_SCALE, value_parser = clap::value_parser!(u32).range(1..))]
    scale: u32,

    /// Milliseconds between two instructions
    #[arg(short, long, default_value_t = DEFAULT_DELAY)]
    delay: u64,

    /// Don't open an audio device
    #[arg(short, long)]
    mute: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    run::run(Settings::new(args.rom, args.scale, args.delay, args.mute))
}
