pub use chip8::{Chip8, ExecState};
pub use constants::CLOCK_SPEED;
pub use error::Chip8Error;
pub use instruction::Request;
pub use keypad::{Input, Keypad};

mod chip8;
pub mod constants;
mod error;
pub mod frame;
mod instruction;
pub mod keypad;
pub mod loader;
mod opcode;
mod operations;
pub mod state;
pub mod timers;
