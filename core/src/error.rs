use thiserror::Error;

/// Everything that can stop the interpreter.
///
/// Unknown opcodes are deliberately absent: they are logged and skipped.
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("memory access out of bounds at address {address:#06X}")]
    MemoryOutOfBounds { address: usize },

    #[error("stack overflow: CALL at {pc:#06X} with a full call stack")]
    StackOverflow { pc: u16 },

    #[error("stack underflow: RET at {pc:#06X} with an empty call stack")]
    StackUnderflow { pc: u16 },

    #[error("ROM is too large ({size} bytes), max size is {max_size} bytes")]
    RomTooLarge { size: usize, max_size: usize },

    #[error("unable to read ROM: {0}")]
    Io(#[from] std::io::Error),

    #[error("interpreter is halted")]
    Halted,
}
