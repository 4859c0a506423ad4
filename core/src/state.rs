use crate::constants::{FLAG_REGISTER, MEMORY_SIZE, PROGRAM_START, REGISTER_COUNT, STACK_DEPTH};
use crate::error::Chip8Error;
use crate::frame::{self, FrameBuffer};
use crate::loader;
use crate::timers::Timers;

/// The complete machine state of the interpreter
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is also the carry/borrow/collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter, starting at 0x200
///
/// Pointer
/// - (sp) the number of return addresses on the stack
///
/// Timers
/// - 2 8-bit timers (delay & sound), counting down at 60Hz
///
/// ## Memory
/// - a stack of up to 16 return addresses
/// - 4096 bytes of addressable memory
///     - 0x000..0x200 is reserved for the sprite sheet
/// - 64x32 pixel frame buffer
#[derive(Clone)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub stack: [u16; STACK_DEPTH],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub timers: Timers,
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        loader::load_font(&mut memory);

        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START as u16,
            sp: 0,
            stack: [0; STACK_DEPTH],
            memory,
            frame_buffer: frame::blank(),
            timers: Timers::new(),
        }
    }

    /// Moves on to the next instruction
    pub fn advance(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }

    /// Moves past the next instruction if `condition` holds, otherwise to it
    pub fn skip_if(&mut self, condition: bool) {
        let step = if condition { 4 } else { 2 };
        self.pc = self.pc.wrapping_add(step);
    }

    /// Writes VF; callers do this after every other register write
    pub fn set_flag(&mut self, flag: bool) {
        self.v[FLAG_REGISTER] = u8::from(flag);
    }

    /// Borrows `len` bytes of memory starting at `addr`
    pub fn read(&self, addr: usize, len: usize) -> Result<&[u8], Chip8Error> {
        Self::check_bounds(addr, len)?;
        Ok(&self.memory[addr..addr + len])
    }

    /// Copies `bytes` into memory starting at `addr`
    pub fn write(&mut self, addr: usize, bytes: &[u8]) -> Result<(), Chip8Error> {
        Self::check_bounds(addr, bytes.len())?;
        self.memory[addr..addr + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    pub(crate) fn check_bounds(addr: usize, len: usize) -> Result<(), Chip8Error> {
        if addr + len > MEMORY_SIZE {
            Err(Chip8Error::MemoryOutOfBounds {
                address: addr.max(MEMORY_SIZE),
            })
        } else {
            Ok(())
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
