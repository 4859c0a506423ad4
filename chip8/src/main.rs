use std::error::Error;

use clap::Parser;

use config::Config;

mod config;
mod keymap;
mod run;

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::parse();

    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .filter_module("chip8", config.log_level)
        .filter_module("emu8_core", config.log_level)
        .parse_default_env()
        .init();

    run::run(&config)
}
