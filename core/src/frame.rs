use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// # Frame Buffer
/// 64x32 monochrome pixels, indexed as `[y][x]`.
///
/// The screen is a torus: anything drawn past an edge reappears on the
/// opposite one.
pub type FrameBuffer = [[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// A frame with every pixel unset
pub fn blank() -> FrameBuffer {
    [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT]
}

/// XORs `sprite` onto the frame with its top-left corner at (`origin_x`, `origin_y`).
///
/// Each byte is one row; bits are read most significant first, left to right.
/// Returns true if any lit pixel was switched off.
///
/// # Arguments
/// * `frame` the frame to draw on
/// * `origin_x` column of the sprite's left edge, wrapped to the display width
/// * `origin_y` row of the sprite's top edge, wrapped to the display height
/// * `sprite` up to 15 rows of 8 pixels
pub fn draw_sprite(frame: &mut FrameBuffer, origin_x: u8, origin_y: u8, sprite: &[u8]) -> bool {
    let mut collision = false;

    for (row, bits) in sprite.iter().enumerate() {
        let y = (usize::from(origin_y) + row) % DISPLAY_HEIGHT;
        for column in 0..8 {
            if (bits >> (7 - column)) & 1 == 0 {
                continue;
            }
            let x = (usize::from(origin_x) + column) % DISPLAY_WIDTH;
            // read the live pixel; wrapped rows may land on ones already drawn
            let pixel = &mut frame[y][x];
            collision |= *pixel;
            *pixel = !*pixel;
        }
    }

    collision
}
