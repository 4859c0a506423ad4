use sdl2::keyboard::Keycode;

/// # Keymap
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// This original layout is mapped to the left 4 alphanumeric columns.
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
pub fn keymap(key: Keycode) -> Option<u8> {
    KEYPAD_LAYOUT
        .iter()
        .position(|&k| k == key)
        .map(|index| KEYPAD_CODES[index])
}

/// Host keys in keypad reading order, left to right and top to bottom
#[rustfmt::skip]
const KEYPAD_LAYOUT: [Keycode; 16] = [
    Keycode::Num1, Keycode::Num2, Keycode::Num3, Keycode::Num4,
    Keycode::Q, Keycode::W, Keycode::E, Keycode::R,
    Keycode::A, Keycode::S, Keycode::D, Keycode::F,
    Keycode::Z, Keycode::X, Keycode::C, Keycode::V,
];

/// The keypad code printed on each key of `KEYPAD_LAYOUT`
#[rustfmt::skip]
const KEYPAD_CODES: [u8; 16] = [
    0x1, 0x2, 0x3, 0xC,
    0x4, 0x5, 0x6, 0xD,
    0x7, 0x8, 0x9, 0xE,
    0xA, 0x0, 0xB, 0xF,
];
