/// # Opcodes
///
/// Instructions are 16 bits, stored big-endian. Dispatch is cased on:
/// - `(n, _, _, _)` the instruction group
/// - `(_, _, _, n)` or `(_, _, n, n)` the operation within a group
///
/// The remaining nibbles carry operands:
/// - `(_, n, n, n)` a 12-bit address (`nnn`)
/// - `(_, _, n, n)` an immediate byte (`kk`)
/// - `(_, n, _, _)` the register Vx, or the range V0..=Vx
/// - `(_, _, n, _)` the register Vy
/// - `(_, _, _, n)` a 4-bit count (sprite height)
pub trait Opcode {
    /// All four nibbles, most significant first.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// `[g___]`
    fn group(&self) -> u8;

    /// `[_x__]`
    fn x(&self) -> u8;

    /// `[__y_]`
    fn y(&self) -> u8;

    /// `[___n]`
    fn n(&self) -> u8;

    /// `[__kk]`
    fn kk(&self) -> u8;

    /// `[_nnn]`
    fn nnn(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (self.group(), self.x(), self.y(), self.n())
    }

    fn group(&self) -> u8 {
        (self >> 12) as u8
    }

    fn x(&self) -> u8 {
        ((self >> 8) & 0xF) as u8
    }

    fn y(&self) -> u8 {
        ((self >> 4) & 0xF) as u8
    }

    fn n(&self) -> u8 {
        (self & 0xF) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0xFF) as u8
    }

    fn nnn(&self) -> u16 {
        self & 0x0FFF
    }
}

/// Joins the two bytes of an instruction word, high byte first.
pub fn from_bytes(high: u8, low: u8) -> u16 {
    u16::from(high) << 8 | u16::from(low)
}
