use sdl2::pixels::PixelFormatEnum;

use emu8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use emu8_core::frame::FrameBuffer;

/// Colour of a lit pixel
const LIT: [u8; 3] = [255, 255, 255];

/// Colour of a lit pixel while the buzzer sounds
const LIT_BUZZING: [u8; 3] = [255, 176, 0];

/// # Display
/// The Chip-8 display is composed of 64x32 black/white pixels.
/// The display only gets a call to `render` when the Chip-8 FrameBuffer or buzzer changes.
/// Lit pixels turn amber while the buzzer is sounding, as there is no audio.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, String> {
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(
                "Emu-8",
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .opengl()
            .build()
            .map_err(|e| e.to_string())?;
        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;

        Ok(Display { canvas })
    }

    /// Formats a Chip-8 FrameBuffer for rendering as an SDL2 texture.
    ///
    /// An SDL2 RGB24 texture is a 1D array of bytes that represent concatenated rows of RGB pixels.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    /// * `lit` the RGB colour of set pixels; unset pixels are black
    fn frame_to_sdl_texture(frame: &FrameBuffer, lit: [u8; 3]) -> Vec<u8> {
        frame
            .iter()
            .flatten()
            .flat_map(|&pixel| if pixel { lit } else { [0; 3] })
            .collect()
    }

    /// Formats the Chip-8 FrameBuffer as an SDL2 RGB24 texture and renders it.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    /// * `buzzer` whether the sound timer is running
    pub fn render(&mut self, frame: &FrameBuffer, buzzer: bool) -> Result<(), String> {
        let lit = if buzzer { LIT_BUZZING } else { LIT };
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .map_err(|e| e.to_string())?;

        let pixels = Display::frame_to_sdl_texture(frame, lit);
        texture.with_lock(None, |buffer: &mut [u8], pitch: usize| {
            for (row, line) in pixels.chunks(DISPLAY_WIDTH * 3).enumerate() {
                buffer[row * pitch..row * pitch + line.len()].copy_from_slice(line);
            }
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}
