use crate::error::Chip8Error;
use crate::keypad::Input;
use crate::opcode::Opcode;
use crate::operations::*;
use crate::state::State;

/// What the driving loop needs to do after an instruction has run
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Request {
    None,
    /// The frame buffer was cleared
    ClearScreen,
    /// A sprite was drawn
    Draw,
    /// Nothing more happens until a key is pressed
    AwaitKey,
}

/// Executes one decoded instruction against the machine state
pub type Operation =
    fn(op: &dyn Opcode, state: &mut State, input: &dyn Input) -> Result<Request, Chip8Error>;

/// Selects the Operation for a given Opcode, or None if it isn't one
pub fn from_op(op: &dyn Opcode) -> Option<Operation> {
    let operation: Operation = match op.nibbles() {
        (0x0, 0x0, 0xE, 0x0) => cls,
        (0x0, 0x0, 0xE, 0xE) => ret,
        (0x1, ..) => jump,
        (0x2, ..) => call,
        (0x3, ..) => ske,
        (0x4, ..) => skne,
        (0x5, .., 0x0) => skre,
        (0x6, ..) => load,
        (0x7, ..) => add,
        (0x8, .., 0x0) => mv,
        (0x8, .., 0x1) => or,
        (0x8, .., 0x2) => and,
        (0x8, .., 0x3) => xor,
        (0x8, .., 0x4) => addr,
        (0x8, .., 0x5) => sub,
        (0x8, .., 0x6) => shr,
        (0x8, .., 0x7) => subn,
        (0x8, .., 0xE) => shl,
        (0x9, .., 0x0) => skrne,
        (0xA, ..) => loadi,
        (0xB, ..) => jumpi,
        (0xC, ..) => rand,
        (0xD, ..) => draw,
        (0xE, _, 0x9, 0xE) => skpr,
        (0xE, _, 0xA, 0x1) => skup,
        (0xF, _, 0x0, 0x7) => moved,
        (0xF, _, 0x0, 0xA) => keyd,
        (0xF, _, 0x1, 0x5) => loads,
        (0xF, _, 0x1, 0x8) => ld,
        (0xF, _, 0x1, 0xE) => addi,
        (0xF, _, 0x2, 0x9) => ldspr,
        (0xF, _, 0x3, 0x3) => bcd,
        (0xF, _, 0x5, 0x5) => stor,
        (0xF, _, 0x6, 0x5) => read,
        _ => return None,
    };
    Some(operation)
}

#[cfg(test)]
mod test_instruction {
    use super::*;
    use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
    use crate::keypad::Keypad;

    fn exec(op: u16, state: &mut State) -> Result<Request, Chip8Error> {
        exec_with_keys(op, state, &Keypad::new())
    }

    fn exec_with_keys(
        op: u16,
        state: &mut State,
        keypad: &Keypad,
    ) -> Result<Request, Chip8Error> {
        let operation = from_op(&op).expect("opcode should decode");
        operation(&op, state, keypad)
    }

    #[test]
    fn test_unknown_opcodes_dont_decode() {
        for op in [0x0000_u16, 0x0123, 0x00E1, 0x5121, 0x800F, 0x9121, 0xE100, 0xF1FF] {
            assert!(from_op(&op).is_none(), "{:04X} decoded", op);
        }
    }

    #[test]
    fn test_00e0_cls() {
        let mut state = State::new();
        state.frame_buffer[0][0] = true;
        state.frame_buffer[31][63] = true;
        assert_eq!(exec(0x00E0, &mut state).unwrap(), Request::ClearScreen);
        assert!(state.frame_buffer.iter().flatten().all(|&p| !p));
        assert_eq!(state.pc, 0x202);
    }

    #[test]
    fn test_00ee_ret() {
        let mut state = State::new();
        state.sp = 0x1;
        state.stack[0] = 0x0ABC;
        exec(0x00EE, &mut state).unwrap();
        assert_eq!(state.sp, 0x0);
        // the return address is the CALL itself, so step past it
        assert_eq!(state.pc, 0x0ABC + 0x2);
    }

    #[test]
    fn test_00ee_ret_underflow() {
        let mut state = State::new();
        let err = exec(0x00EE, &mut state).unwrap_err();
        assert!(matches!(err, Chip8Error::StackUnderflow { pc: 0x200 }));
        assert_eq!(state.sp, 0);
    }

    #[test]
    fn test_1nnn_jp() {
        let mut state = State::new();
        exec(0x1ABC, &mut state).unwrap();
        assert_eq!(state.pc, 0x0ABC);
    }

    #[test]
    fn test_2nnn_call() {
        let mut state = State::new();
        state.pc = 0x0246;
        exec(0x2123, &mut state).unwrap();
        assert_eq!(state.sp, 0x1);
        assert_eq!(state.stack[0], 0x0246);
        assert_eq!(state.pc, 0x0123);
    }

    #[test]
    fn test_2nnn_call_overflow() {
        let mut state = State::new();
        state.sp = 16;
        let err = exec(0x2300, &mut state).unwrap_err();
        assert!(matches!(err, Chip8Error::StackOverflow { pc: 0x200 }));
        assert_eq!(state.sp, 16);
        assert_eq!(state.pc, 0x200);
    }

    #[test]
    fn test_3xkk_se_skips() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        exec(0x3111, &mut state).unwrap();
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_3xkk_se_doesntskip() {
        let mut state = State::new();
        exec(0x3111, &mut state).unwrap();
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_4xkk_sne_skips() {
        let mut state = State::new();
        exec(0x4111, &mut state).unwrap();
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_4xkk_sne_doesntskip() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        exec(0x4111, &mut state).unwrap();
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_5xy0_se_skips() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        state.v[0x2] = 0x11;
        exec(0x5120, &mut state).unwrap();
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_5xy0_se_doesntskip() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        exec(0x5120, &mut state).unwrap();
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_6xkk_ld() {
        let mut state = State::new();
        exec(0x6122, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x22);
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_7xkk_add_wraps_without_flag() {
        let mut state = State::new();
        state.v[0x1] = 0xFF;
        exec(0x7102, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x01);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy0_ld() {
        let mut state = State::new();
        state.v[0x2] = 0x7;
        exec(0x8120, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x7);
    }

    #[test]
    fn test_8xy1_8xy2_8xy3_bitwise() {
        for (op, expected) in [(0x8121_u16, 0x7), (0x8122, 0x2), (0x8123, 0x5)] {
            let mut state = State::new();
            state.v[0x1] = 0x6;
            state.v[0x2] = 0x3;
            exec(op, &mut state).unwrap();
            assert_eq!(state.v[0x1], expected, "{:04X}", op);
        }
    }

    #[test]
    fn test_8xy4_add_nocarry() {
        let mut state = State::new();
        state.v[0x1] = 0xEE;
        state.v[0x2] = 0x11;
        exec(0x8124, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0xFF);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy4_add_carry() {
        let mut state = State::new();
        state.v[0x1] = 0xFF;
        state.v[0x2] = 0x01;
        exec(0x8124, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x00);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy4_flag_wins_over_vf_result() {
        let mut state = State::new();
        state.v[0xF] = 0xFF;
        state.v[0x1] = 0x02;
        exec(0x8F14, &mut state).unwrap();
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy5_sub_noborrow() {
        let mut state = State::new();
        state.v[0x1] = 0x33;
        state.v[0x2] = 0x11;
        exec(0x8125, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x22);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy5_sub_borrow() {
        let mut state = State::new();
        state.v[0x1] = 0x01;
        state.v[0x2] = 0x02;
        exec(0x8125, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0xFF);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy5_sub_equal_clears_flag() {
        let mut state = State::new();
        state.v[0x1] = 0x42;
        state.v[0x2] = 0x42;
        exec(0x8125, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x00);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy6_shr_lsb() {
        let mut state = State::new();
        state.v[0x1] = 0b1000_0001;
        exec(0x8106, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0b0100_0000);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy6_shr_nolsb() {
        let mut state = State::new();
        state.v[0x1] = 0x4;
        exec(0x8106, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x2);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy7_subn_noborrow() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        state.v[0x2] = 0x33;
        exec(0x8127, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x22);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy7_subn_borrow() {
        let mut state = State::new();
        state.v[0x1] = 0x12;
        state.v[0x2] = 0x11;
        exec(0x8127, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0xFF);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xye_shl_msb() {
        let mut state = State::new();
        state.v[0x1] = 0x81;
        exec(0x810E, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x02);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xye_shl_nomsb() {
        let mut state = State::new();
        state.v[0x1] = 0x41;
        exec(0x810E, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x82);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_9xy0_sne_skips() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        exec(0x9120, &mut state).unwrap();
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_9xy0_sne_doesntskip() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        state.v[0x2] = 0x11;
        exec(0x9120, &mut state).unwrap();
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_annn_ld() {
        let mut state = State::new();
        exec(0xAABC, &mut state).unwrap();
        assert_eq!(state.i, 0xABC);
    }

    #[test]
    fn test_bnnn_jp() {
        let mut state = State::new();
        state.v[0x0] = 0x2;
        exec(0xBABC, &mut state).unwrap();
        assert_eq!(state.pc, 0xABE);
    }

    #[test]
    fn test_cxkk_rnd_masks() {
        let mut state = State::new();
        for _ in 0..64 {
            exec(0xC10F, &mut state).unwrap();
            assert_eq!(state.v[0x1] & 0xF0, 0);
        }
        exec(0xC100, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0);
    }

    #[test]
    fn test_dxyn_drw_draws() {
        let mut state = State::new();
        state.v[0x0] = 0x1;
        // the 0 glyph with a 1x 1y offset
        assert_eq!(exec(0xD005, &mut state).unwrap(), Request::Draw);
        let mut expected = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        expected[1][1..5].copy_from_slice(&[true, true, true, true]);
        expected[2][1..5].copy_from_slice(&[true, false, false, true]);
        expected[3][1..5].copy_from_slice(&[true, false, false, true]);
        expected[4][1..5].copy_from_slice(&[true, false, false, true]);
        expected[5][1..5].copy_from_slice(&[true, true, true, true]);
        assert_eq!(state.frame_buffer, expected);
        assert_eq!(state.v[0xF], 0x0);
        assert_eq!(state.pc, 0x202);
    }

    #[test]
    fn test_dxyn_drw_collides() {
        let mut state = State::new();
        state.frame_buffer[0][0] = true;
        exec(0xD001, &mut state).unwrap();
        assert_eq!(state.v[0xF], 0x1);
        assert!(!state.frame_buffer[0][0]);
    }

    #[test]
    fn test_dxyn_drw_clears_stale_flag() {
        let mut state = State::new();
        state.v[0xF] = 0x1;
        exec(0xD001, &mut state).unwrap();
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_dxyn_drw_out_of_bounds() {
        let mut state = State::new();
        state.i = 0xFFE;
        let err = exec(0xD003, &mut state).unwrap_err();
        assert!(matches!(err, Chip8Error::MemoryOutOfBounds { address: 0x1000 }));
        assert!(state.frame_buffer.iter().flatten().all(|&p| !p));
    }

    #[test]
    fn test_ex9e_skp_skips() {
        let mut state = State::new();
        let mut keypad = Keypad::new();
        keypad.press(0xE);
        state.v[0x1] = 0xE;
        exec_with_keys(0xE19E, &mut state, &keypad).unwrap();
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_ex9e_skp_doesntskip() {
        let mut state = State::new();
        exec(0xE19E, &mut state).unwrap();
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_ex9e_skp_sees_keys_held_under_a_later_press() {
        let mut state = State::new();
        let mut keypad = Keypad::new();
        keypad.press(0xE);
        keypad.press(0x2);
        state.v[0x1] = 0xE;
        exec_with_keys(0xE19E, &mut state, &keypad).unwrap();
        assert_eq!(state.pc, 0x0204);
        exec_with_keys(0xE1A1, &mut state, &keypad).unwrap();
        assert_eq!(state.pc, 0x0206);
    }

    #[test]
    fn test_exa1_sknp_skips() {
        let mut state = State::new();
        exec(0xE1A1, &mut state).unwrap();
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_exa1_sknp_doesntskip() {
        let mut state = State::new();
        let mut keypad = Keypad::new();
        keypad.press(0xE);
        state.v[0x1] = 0xE;
        exec_with_keys(0xE1A1, &mut state, &keypad).unwrap();
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_fx07_ld() {
        let mut state = State::new();
        state.timers.delay = 0xF;
        exec(0xF107, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0xF);
    }

    #[test]
    fn test_fx0a_ld_requests_key_without_moving() {
        let mut state = State::new();
        assert_eq!(exec(0xF10A, &mut state).unwrap(), Request::AwaitKey);
        assert_eq!(state.pc, 0x200);
    }

    #[test]
    fn test_fx15_ld() {
        let mut state = State::new();
        state.v[0x1] = 0xF;
        exec(0xF115, &mut state).unwrap();
        assert_eq!(state.timers.delay, 0xF);
    }

    #[test]
    fn test_fx18_ld() {
        let mut state = State::new();
        state.v[0x1] = 0xF;
        exec(0xF118, &mut state).unwrap();
        assert_eq!(state.timers.sound, 0xF);
        assert!(state.timers.buzzer());
    }

    #[test]
    fn test_fx1e_add() {
        let mut state = State::new();
        state.i = 0x1;
        state.v[0x1] = 0x1;
        exec(0xF11E, &mut state).unwrap();
        assert_eq!(state.i, 0x2);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_fx29_ld() {
        let mut state = State::new();
        state.v[0x1] = 0x2;
        exec(0xF129, &mut state).unwrap();
        assert_eq!(state.i, 0xA);
    }

    #[test]
    fn test_fx29_ld_uses_low_nibble() {
        let mut state = State::new();
        state.v[0x1] = 0x1F;
        exec(0xF129, &mut state).unwrap();
        assert_eq!(state.i, 0x4B);
    }

    #[test]
    fn test_fx33_ld() {
        let mut state = State::new();
        state.v[0x1] = 0x7B;
        state.i = 0x300;
        exec(0xF133, &mut state).unwrap();
        assert_eq!(state.memory[0x300..0x303], [0x1, 0x2, 0x3]);
    }

    #[test]
    fn test_fx33_ld_out_of_bounds() {
        let mut state = State::new();
        state.v[0x1] = 0xFF;
        state.i = 0xFFE;
        let err = exec(0xF133, &mut state).unwrap_err();
        assert!(matches!(err, Chip8Error::MemoryOutOfBounds { .. }));
        assert_eq!(state.memory[0xFFE..], [0, 0]);
    }

    #[test]
    fn test_fx55_ld() {
        let mut state = State::new();
        state.i = 0x300;
        state.v[0x0..0x5].copy_from_slice(&[0x1, 0x2, 0x3, 0x4, 0x5]);
        state.v[0x5] = 0x6;
        exec(0xF455, &mut state).unwrap();
        assert_eq!(state.memory[0x300..0x306], [0x1, 0x2, 0x3, 0x4, 0x5, 0x0]);
        assert_eq!(state.i, 0x300);
    }

    #[test]
    fn test_fx55_ld_out_of_bounds() {
        let mut state = State::new();
        state.v[0x0..0x3].copy_from_slice(&[0x1, 0x2, 0x3]);
        state.i = 0xFFE;
        let err = exec(0xF255, &mut state).unwrap_err();
        assert!(matches!(err, Chip8Error::MemoryOutOfBounds { address: 0x1000 }));
        assert_eq!(state.memory[0xFFE..], [0, 0]);
        assert_eq!(state.pc, 0x200);
    }

    #[test]
    fn test_fx65_ld() {
        let mut state = State::new();
        state.i = 0x300;
        state.memory[0x300..0x306].copy_from_slice(&[0x1, 0x2, 0x3, 0x4, 0x5, 0x6]);
        exec(0xF465, &mut state).unwrap();
        assert_eq!(state.v[0x0..0x6], [0x1, 0x2, 0x3, 0x4, 0x5, 0x0]);
    }

    #[test]
    fn test_fx65_ld_out_of_bounds() {
        let mut state = State::new();
        state.i = 0xFFF;
        let err = exec(0xF165, &mut state).unwrap_err();
        assert!(matches!(err, Chip8Error::MemoryOutOfBounds { address: 0x1000 }));
        assert_eq!(state.v, [0; 16]);
    }
}
