use crate::constants::{FONT_ADDR, GLYPH_SIZE, STACK_DEPTH};
use crate::error::Chip8Error;
use crate::frame;
use crate::instruction::Request;
use crate::keypad::Input;
use crate::opcode::Opcode;
use crate::state::State;

type Outcome = Result<Request, Chip8Error>;

fn vx(op: &dyn Opcode, state: &State) -> u8 {
    state.v[op.x() as usize]
}

fn vy(op: &dyn Opcode, state: &State) -> u8 {
    state.v[op.y() as usize]
}

/// clear
pub fn cls(_op: &dyn Opcode, state: &mut State, _input: &dyn Input) -> Outcome {
    state.frame_buffer = frame::blank();
    state.advance();
    Ok(Request::ClearScreen)
}

/// PC = STACK.pop() + 2
pub fn ret(_op: &dyn Opcode, state: &mut State, _input: &dyn Input) -> Outcome {
    if state.sp == 0 {
        return Err(Chip8Error::StackUnderflow { pc: state.pc });
    }
    state.sp -= 1;
    state.pc = state.stack[state.sp as usize].wrapping_add(2);
    Ok(Request::None)
}

/// PC = nnn
pub fn jump(op: &dyn Opcode, state: &mut State, _input: &dyn Input) -> Outcome {
    state.pc = op.nnn();
    Ok(Request::None)
}

/// STACK.push(PC); PC = nnn
pub fn call(op: &dyn Opcode, state: &mut State, _input: &dyn Input) -> Outcome {
    if state.sp as usize >= STACK_DEPTH {
        return Err(Chip8Error::StackOverflow { pc: state.pc });
    }
    state.stack[state.sp as usize] = state.pc;
    state.sp += 1;
    state.pc = op.nnn();
    Ok(Request::None)
}

/// if Vx == kk then skip
pub fn ske(op: &dyn Opcode, state: &mut State, _input: &dyn Input) -> Outcome {
    state.skip_if(vx(op, state) == op.kk());
    Ok(Request::None)
}

/// if Vx != kk then skip
pub fn skne(op: &dyn Opcode, state: &mut State, _input: &dyn Input) -> Outcome {
    state.skip_if(vx(op, state) != op.kk());
    Ok(Request::None)
}

/// if Vx == Vy then skip
pub fn skre(op: &dyn Opcode, state: &mut State, _input: &dyn Input) -> Outcome {
    state.skip_if(vx(op, state) == vy(op, state));
    Ok(Request::None)
}

/// Vx = kk
pub fn load(op: &dyn Opcode, state: &mut State, _input: &dyn Input) -> Outcome {
    state.v[op.x() as usize] = op.kk();
    state.advance();
    Ok(Request::None)
}

/// Vx += kk
/// Overflow wraps and is not reported
pub fn add(op: &dyn Opcode, state: &mut State, _input: &dyn Input) -> Outcome {
    let x = vx(op, state);
    state.v[op.x() as usize] = x.wrapping_add(op.kk());
    state.advance();
    Ok(Request::None)
}

/// Vx = Vy
pub fn mv(op: &dyn Opcode, state: &mut State, _input: &dyn Input) -> Outcome {
    let y = vy(op, state);
    state.v[op.x() as usize] = y;
    state.advance();
    Ok(Request::None)
}

/// Vx |= Vy
pub fn or(op: &dyn Opcode, state: &mut State, _input: &dyn Input) -> Outcome {
    let y = vy(op, state);
    state.v[op.x() as usize] |= y;
    state.advance();
    Ok(Request::None)
}

/// Vx &= Vy
pub fn and(op: &dyn Opcode, state: &mut State, _input: &dyn Input) -> Outcome {
    let y = vy(op, state);
    state.v[op.x() as usize] &= y;
    state.advance();
    Ok(Request::None)
}

/// Vx ^= Vy
pub fn xor(op: &dyn Opcode, state: &mut State, _input: &dyn Input) -> Outcome {
    let y = vy(op, state);
    state.v[op.x() as usize] ^= y;
    state.advance();
    Ok(Request::None)
}

/// Vx += Vy; VF = carry
pub fn addr(op: &dyn Opcode, state: &mut State, _input: &dyn Input) -> Outcome {
    let (res, carry) = vx(op, state).overflowing_add(vy(op, state));
    state.v[op.x() as usize] = res;
    state.set_flag(carry);
    state.advance();
    Ok(Request::None)
}

/// Vx -= Vy; VF = Vx > Vy
pub fn sub(op: &dyn Opcode, state: &mut State, _input: &dyn Input) -> Outcome {
    let (x, y) = (vx(op, state), vy(op, state));
    state.v[op.x() as usize] = x.wrapping_sub(y);
    state.set_flag(x > y);
    state.advance();
    Ok(Request::None)
}

/// Vx >>= 1; VF = the bit shifted out
pub fn shr(op: &dyn Opcode, state: &mut State, _input: &dyn Input) -> Outcome {
    let x = vx(op, state);
    state.v[op.x() as usize] = x >> 1;
    state.set_flag(x & 0x01 == 0x01);
    state.advance();
    Ok(Request::None)
}

/// Vx = Vy - Vx; VF = Vy > Vx
pub fn subn(op: &dyn Opcode, state: &mut State, _input: &dyn Input) -> Outcome {
    let (x, y) = (vx(op, state), vy(op, state));
    state.v[op.x() as usize] = y.wrapping_sub(x);
    state.set_flag(y > x);
    state.advance();
    Ok(Request::None)
}

/// Vx <<= 1; VF = the bit shifted out
pub fn shl(op: &dyn Opcode, state: &mut State, _input: &dyn Input) -> Outcome {
    let x = vx(op, state);
    state.v[op.x() as usize] = x << 1;
    state.set_flag(x & 0x80 == 0x80);
    state.advance();
    Ok(Request::None)
}

/// if Vx != Vy then skip
pub fn skrne(op: &dyn Opcode, state: &mut State, _input: &dyn Input) -> Outcome {
    state.skip_if(vx(op, state) != vy(op, state));
    Ok(Request::None)
}

/// I = nnn
pub fn loadi(op: &dyn Opcode, state: &mut State, _input: &dyn Input) -> Outcome {
    state.i = op.nnn();
    state.advance();
    Ok(Request::None)
}

/// PC = V0 + nnn
pub fn jumpi(op: &dyn Opcode, state: &mut State, _input: &dyn Input) -> Outcome {
    state.pc = u16::from(state.v[0x0]) + op.nnn();
    Ok(Request::None)
}

/// Vx = random_byte & kk
pub fn rand(op: &dyn Opcode, state: &mut State, _input: &dyn Input) -> Outcome {
    let rand_byte: u8 = rand::random();
    state.v[op.x() as usize] = rand_byte & op.kk();
    state.advance();
    Ok(Request::None)
}

/// draw_sprite(x=Vx y=Vy rows=mem[I..I+n])
/// XORs the sprite onto the frame buffer with wrapping.
/// Sets VF if any lit pixel was erased
pub fn draw(op: &dyn Opcode, state: &mut State, _input: &dyn Input) -> Outcome {
    let (x, y) = (vx(op, state), vy(op, state));
    let start = usize::from(state.i);
    let end = start + op.n() as usize;
    State::check_bounds(start, op.n() as usize)?;
    let collision = frame::draw_sprite(&mut state.frame_buffer, x, y, &state.memory[start..end]);
    state.set_flag(collision);
    state.advance();
    Ok(Request::Draw)
}

/// if key Vx is held then skip
pub fn skpr(op: &dyn Opcode, state: &mut State, input: &dyn Input) -> Outcome {
    state.skip_if(input.is_pressed(vx(op, state) & 0xF));
    Ok(Request::None)
}

/// if key Vx is not held then skip
pub fn skup(op: &dyn Opcode, state: &mut State, input: &dyn Input) -> Outcome {
    state.skip_if(!input.is_pressed(vx(op, state) & 0xF));
    Ok(Request::None)
}

/// Vx = DT
pub fn moved(op: &dyn Opcode, state: &mut State, _input: &dyn Input) -> Outcome {
    state.v[op.x() as usize] = state.timers.delay;
    state.advance();
    Ok(Request::None)
}

/// await keypress for Vx
/// The PC stays put; the key is delivered and the PC moved on once a key arrives
pub fn keyd(_op: &dyn Opcode, _state: &mut State, _input: &dyn Input) -> Outcome {
    Ok(Request::AwaitKey)
}

/// DT = Vx
pub fn loads(op: &dyn Opcode, state: &mut State, _input: &dyn Input) -> Outcome {
    state.timers.delay = vx(op, state);
    state.advance();
    Ok(Request::None)
}

/// ST = Vx
pub fn ld(op: &dyn Opcode, state: &mut State, _input: &dyn Input) -> Outcome {
    state.timers.sound = vx(op, state);
    state.advance();
    Ok(Request::None)
}

/// I += Vx
pub fn addi(op: &dyn Opcode, state: &mut State, _input: &dyn Input) -> Outcome {
    state.i = state.i.wrapping_add(u16::from(vx(op, state)));
    state.advance();
    Ok(Request::None)
}

/// I = address of the glyph for hex digit Vx
/// See constants::SPRITE_SHEET
pub fn ldspr(op: &dyn Opcode, state: &mut State, _input: &dyn Input) -> Outcome {
    let digit = usize::from(vx(op, state) & 0xF);
    state.i = (FONT_ADDR + digit * GLYPH_SIZE) as u16;
    state.advance();
    Ok(Request::None)
}

/// mem[I..I+3] = bcd(Vx)
pub fn bcd(op: &dyn Opcode, state: &mut State, _input: &dyn Input) -> Outcome {
    let x = vx(op, state);
    state.write(usize::from(state.i), &[x / 100, x / 10 % 10, x % 10])?;
    state.advance();
    Ok(Request::None)
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(op: &dyn Opcode, state: &mut State, _input: &dyn Input) -> Outcome {
    let registers = state.v;
    state.write(usize::from(state.i), &registers[..=op.x() as usize])?;
    state.advance();
    Ok(Request::None)
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(op: &dyn Opcode, state: &mut State, _input: &dyn Input) -> Outcome {
    let count = op.x() as usize + 1;
    let mut registers = state.v;
    registers[..count].copy_from_slice(state.read(usize::from(state.i), count)?);
    state.v = registers;
    state.advance();
    Ok(Request::None)
}
