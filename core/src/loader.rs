use std::io::Read;

use log::debug;

use crate::constants::{FONT_ADDR, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::error::Chip8Error;

/// Largest ROM that fits between `PROGRAM_START` and the end of memory
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START;

/// Copies the sprite sheet into the reserved area at the bottom of memory
pub fn load_font(memory: &mut [u8; MEMORY_SIZE]) {
    memory[FONT_ADDR..FONT_ADDR + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
}

/// Reads a whole ROM from `reader` and copies it into memory at `PROGRAM_START`.
///
/// At most one byte past `MAX_ROM_SIZE` is read, so an endless source is
/// rejected as too large. Memory is left untouched if the ROM can't be read
/// or doesn't fit.
/// Returns the size of the ROM in bytes.
///
/// # Arguments
/// * `memory` the interpreter's memory
/// * `reader` a source that contains a ROM
pub fn load_program(
    memory: &mut [u8; MEMORY_SIZE],
    reader: &mut dyn Read,
) -> Result<usize, Chip8Error> {
    let mut rom = Vec::with_capacity(MAX_ROM_SIZE + 1);
    reader.take(MAX_ROM_SIZE as u64 + 1).read_to_end(&mut rom)?;

    if rom.len() > MAX_ROM_SIZE {
        return Err(Chip8Error::RomTooLarge {
            size: rom.len(),
            max_size: MAX_ROM_SIZE,
        });
    }

    memory[PROGRAM_START..PROGRAM_START + rom.len()].copy_from_slice(&rom);
    debug!("loaded {} byte ROM at {:#05X}", rom.len(), PROGRAM_START);
    Ok(rom.len())
}
