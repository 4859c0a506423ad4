use std::io::Read;
use std::time::Duration;

use log::{debug, trace, warn};

use crate::constants::MEMORY_SIZE;
use crate::error::Chip8Error;
use crate::frame::FrameBuffer;
use crate::instruction::{self, Request};
use crate::keypad::Input;
use crate::loader;
use crate::opcode::{self, Opcode};
use crate::state::State;

/// Whether the interpreter can make progress
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExecState {
    Running,
    /// Blocked on Fx0A until a key arrives for register Vx
    AwaitingKey(u8),
    /// Stopped by a fatal error or an aborted key wait
    Halted,
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - the machine `state`
///  - whether it is running, awaiting a key or halted
///
/// Supplies interfaces for:
/// - loading roms
/// - advancing the CPU one instruction at a time
/// - advancing its timers
/// - inspecting its frame buffer and buzzer for some display
pub struct Chip8 {
    state: State,
    exec: ExecState,
}

impl Chip8 {
    pub fn new() -> Self {
        Chip8 {
            state: State::new(),
            exec: ExecState::Running,
        }
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<usize, Chip8Error> {
        loader::load_program(&mut self.state.memory, reader)
    }

    /// The current frame, for rendering
    pub fn frame(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Whether the buzzer should currently be sounding
    pub fn buzzer(&self) -> bool {
        self.state.timers.buzzer()
    }

    pub fn exec_state(&self) -> ExecState {
        self.exec
    }

    pub fn is_awaiting_key(&self) -> bool {
        matches!(self.exec, ExecState::AwaitingKey(_))
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    /// Counts the timers down by a number of 60Hz ticks
    pub fn tick(&mut self, ticks: u32) {
        self.state.timers.tick(ticks);
    }

    /// Counts the timers down by however much wall-clock time has passed
    pub fn advance_timers(&mut self, elapsed: Duration) -> u32 {
        self.state.timers.advance(elapsed)
    }

    /// Advances the CPU by a single instruction
    /// - fails if halted
    /// - polls `input` instead if awaiting a keypress
    /// - otherwise fetches and executes the next opcode
    ///
    /// Any error halts the interpreter; it never leaves an instruction half done.
    pub fn step(&mut self, input: &dyn Input) -> Result<Request, Chip8Error> {
        match self.exec {
            ExecState::Halted => Err(Chip8Error::Halted),
            ExecState::AwaitingKey(register) => Ok(self.poll_key(register, input)),
            ExecState::Running => self.execute(input).map_err(|err| {
                self.exec = ExecState::Halted;
                err
            }),
        }
    }

    /// Gives up waiting for a key; the interpreter is halted afterwards
    pub fn abort_key_wait(&mut self) {
        if self.is_awaiting_key() {
            debug!("key wait aborted at {:#05X}", self.state.pc);
            self.exec = ExecState::Halted;
        }
    }

    fn execute(&mut self, input: &dyn Input) -> Result<Request, Chip8Error> {
        let op = self.get_op()?;
        trace!(
            "{:04X} v{:02X?} i{:04X} pc{:04X} sp{}",
            op,
            self.state.v,
            self.state.i,
            self.state.pc,
            self.state.sp
        );

        match instruction::from_op(&op) {
            Some(operation) => {
                let request = operation(&op, &mut self.state, input)?;
                if request == Request::AwaitKey {
                    debug!("awaiting key for V{:X}", op.x());
                    self.exec = ExecState::AwaitingKey(op.x());
                }
                Ok(request)
            }
            None => {
                warn!("unknown opcode {:04X} at {:#05X}, skipping", op, self.state.pc);
                self.state.advance();
                Ok(Request::None)
            }
        }
    }

    /// Completes a pending Fx0A once `input` reports a key
    fn poll_key(&mut self, register: u8, input: &dyn Input) -> Request {
        match input.current_key() {
            Some(key) => {
                debug!("key {:X} delivered to V{:X}", key, register);
                self.state.v[register as usize] = key & 0xF;
                self.state.advance();
                self.exec = ExecState::Running;
                Request::None
            }
            None => Request::AwaitKey,
        }
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn get_op(&self) -> Result<u16, Chip8Error> {
        let pc = self.state.pc as usize;
        if pc + 1 >= MEMORY_SIZE {
            return Err(Chip8Error::MemoryOutOfBounds { address: pc });
        }
        Ok(opcode::from_bytes(
            self.state.memory[pc],
            self.state.memory[pc + 1],
        ))
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
