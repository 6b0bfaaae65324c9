use anyhow::{anyhow, Result};
use log::info;
use sdl2::pixels::PixelFormatEnum;

use octet::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, PIXEL_ON};
use octet::DisplayBuffer;

/// Bytes per texel in an RGB24 texture
const CHANNELS: usize = 3;

/// # Display
/// The screen is composed of 64x32 black/white pixels.
/// The machine hands over its DisplayBuffer, whose cells are either all bits set or all clear.
/// The display is only asked to `render` when that buffer has changed.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
    width: usize,
    height: usize,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `title` the window's title
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, title: &str, scale: u32) -> Result<Self> {
        let video_subsystem = sdl.video().map_err(|e| anyhow!(e))?;
        let window = video_subsystem
            .window(
                title,
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .build()?;
        let canvas = window.into_canvas().build()?;
        info!(
            "opened {}x{} window",
            DISPLAY_WIDTH as u32 * scale,
            DISPLAY_HEIGHT as u32 * scale
        );

        Ok(Display {
            canvas,
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
        })
    }

    /// Formats a DisplayBuffer for rendering as an SDL2 texture.
    ///
    /// An SDL2 RGB24 texture is a 1D array of bytes that represent concatenated rows of RGB
    /// pixels. Every lit cell becomes three 255s and every dark cell three 0s.
    ///
    /// # Arguments
    /// * `frame` the machine's display buffer
    fn frame_to_texture(frame: &DisplayBuffer) -> Vec<u8> {
        frame
            .cells()
            .iter()
            .map(|&cell| if cell == PIXEL_ON { 0xFF } else { 0x00 })
            .flat_map(|intensity| std::iter::repeat(intensity).take(CHANNELS))
            .collect()
    }

    /// Formats the DisplayBuffer as an SDL2 RGB24 texture and renders it.
    ///
    /// # Arguments
    /// * `frame` the machine's display buffer
    pub fn render(&mut self, frame: &DisplayBuffer) -> Result<()> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator.create_texture_streaming(
            PixelFormatEnum::RGB24,
            self.width as u32,
            self.height as u32,
        )?;

        texture.update(
            None,
            &Display::frame_to_texture(frame),
            self.width * CHANNELS,
        )?;

        self.canvas
            .copy(&texture, None, None)
            .map_err(|e| anyhow!(e))?;
        self.canvas.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_to_texture() {
        let mut frame = DisplayBuffer::new();
        // (1, 0) and (0, 1)
        frame.draw_sprite(0, 0, &[0b0100_0000, 0b1000_0000]);
        let texture = Display::frame_to_texture(&frame);

        let mut expected: Vec<u8> = vec![0; 6144];
        expected[0..6].copy_from_slice(&[0, 0, 0, 255, 255, 255]);
        expected[192..198].copy_from_slice(&[255, 255, 255, 0, 0, 0]);

        assert_eq!(texture, expected);
    }

    #[test]
    fn test_blank_frame_is_black() {
        let texture = Display::frame_to_texture(&DisplayBuffer::new());
        assert_eq!(texture.len(), DISPLAY_WIDTH * DISPLAY_HEIGHT * CHANNELS);
        assert!(texture.iter().all(|&b| b == 0));
    }
}
