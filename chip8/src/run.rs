use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::time::{Duration, Instant};

use log::{debug, error, info};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use display::Display;
use emu8_core::{Chip8, Chip8Error, Keypad, Request};

use crate::config::Config;
use crate::keymap::keymap;

pub fn run(config: &Config) -> Result<(), Box<dyn Error>> {
    let mut chip8: Chip8 = Chip8::new();
    let mut keypad = Keypad::new();

    // Load ROM
    let file = File::open(&config.rom)?;
    let mut reader = BufReader::new(file);
    let size = chip8.load_rom(&mut reader)?;
    info!("loaded {} ({} bytes)", config.rom.display(), size);

    // Get SDL2 context
    let sdl: sdl2::Sdl = sdl2::init()?;
    let mut display: Display = Display::new(&sdl, config.scale)?;
    let mut events = sdl.event_pump()?;
    display.render(chip8.frame(), chip8.buzzer())?;

    // Set initial timing
    let cycle_time: Duration = Duration::from_secs(1) / config.clock_speed;
    let mut last_cycle: Instant = Instant::now();
    let mut last_tick: Instant = last_cycle;

    // Whether or not the default clock speed should be respected
    let mut fast_forward: bool = config.fast_forward;
    let mut buzzing = false;

    'event: loop {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => keypad.press(kc),
                    (Keycode::Space, _) => fast_forward = true,
                    (Keycode::Escape, _) => {
                        if escape(&mut chip8) {
                            break 'event;
                        }
                    }
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => keypad.release(kc),
                    (Keycode::Space, _) => fast_forward = config.fast_forward,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Timers keep running at 60Hz whatever the CPU is doing
        let now = Instant::now();
        chip8.advance_timers(now - last_tick);
        last_tick = now;

        // Update state
        let request = match chip8.step(&keypad) {
            Ok(request) => request,
            Err(Chip8Error::Halted) => break 'event,
            Err(err) => {
                error!("interpreter stopped: {}", err);
                return Err(err.into());
            }
        };

        let buzzer = chip8.buzzer();
        if buzzer != buzzing {
            debug!("buzzer {}", if buzzer { "on" } else { "off" });
        }
        if matches!(request, Request::Draw | Request::ClearScreen) || buzzer != buzzing {
            display.render(chip8.frame(), buzzer)?;
        }
        buzzing = buzzer;

        // Handle timing
        let current_time = Instant::now();
        let elapsed_cycle_time = current_time - last_cycle;
        if !fast_forward && cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    info!("exiting");
    Ok(())
}

/// Escape cancels a pending key wait, which halts the interpreter on the next
/// step; otherwise it quits straight away.
/// Returns whether the loop should stop now.
fn escape(chip8: &mut Chip8) -> bool {
    if chip8.is_awaiting_key() {
        chip8.abort_key_wait();
        false
    } else {
        true
    }
}
