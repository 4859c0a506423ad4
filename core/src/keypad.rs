/// Anything that can tell the interpreter which key is held down.
///
/// Keys are the 4-bit codes 0x0..=0xF of the hexadecimal keypad.
pub trait Input {
    /// The most recently pressed key that is still held, if any
    fn current_key(&self) -> Option<u8>;

    /// Whether `key` is currently held, whether or not it was pressed last
    fn is_pressed(&self, key: u8) -> bool;
}

/// # Keypad
/// Tracks the held keys of the 16-key hexadecimal keypad in the order they
/// were pressed.
#[derive(Clone, Debug, Default)]
pub struct Keypad {
    held: Vec<u8>,
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `key` as held; codes above 0xF are ignored
    pub fn press(&mut self, key: u8) {
        if key > 0xF {
            return;
        }
        self.held.retain(|&k| k != key);
        self.held.push(key);
    }

    /// Marks `key` as released
    pub fn release(&mut self, key: u8) {
        self.held.retain(|&k| k != key);
    }
}

impl Input for Keypad {
    fn current_key(&self) -> Option<u8> {
        self.held.last().copied()
    }

    fn is_pressed(&self, key: u8) -> bool {
        self.held.contains(&key)
    }
}
