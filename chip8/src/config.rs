use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use emu8_core::CLOCK_SPEED;

/// Command line configuration for the interpreter
#[derive(Debug, Parser)]
#[command(name = "chip8")]
#[command(about = "A CHIP-8 interpreter")]
pub struct Config {
    /// ROM file to load
    pub rom: PathBuf,

    /// Instructions executed per second
    #[arg(long, default_value_t = CLOCK_SPEED, value_parser = clap::value_parser!(u32).range(1..))]
    pub clock_speed: u32,

    /// Size multiplier for each pixel
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=64))]
    pub scale: u32,

    /// Log level for the interpreter; RUST_LOG takes precedence
    #[arg(long, default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,

    /// Run as fast as possible instead of at the clock speed
    #[arg(long)]
    pub fast_forward: bool,
}
