use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, PIXEL_OFF, PIXEL_ON};

/// # Display Buffer
/// The screen is 64x32 monochrome cells stored row-major.
///
/// Each cell is either `PIXEL_ON` or `PIXEL_OFF` so that a renderer can treat the buffer as a
/// ready-made 32-bit pixel format. The only ways to change it are `clear` and `draw_sprite`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DisplayBuffer {
    cells: [u32; DISPLAY_WIDTH * DISPLAY_HEIGHT],
}

impl DisplayBuffer {
    pub fn new() -> Self {
        DisplayBuffer {
            cells: [PIXEL_OFF; DISPLAY_WIDTH * DISPLAY_HEIGHT],
        }
    }

    /// Turns every cell off.
    pub fn clear(&mut self) {
        self.cells.fill(PIXEL_OFF);
    }

    /// XORs a sprite onto the screen with its top-left corner at (x, y).
    ///
    /// Every row is one byte, most significant bit leftmost. Coordinates wrap independently on
    /// each axis so a sprite that runs off the right edge reappears on the left, and likewise
    /// vertically. Returns true if any cell that was on got turned off.
    ///
    /// # Arguments
    /// * `x` column of the sprite's left edge
    /// * `y` row of the sprite's top edge
    /// * `rows` the sprite, one byte per row
    pub fn draw_sprite(&mut self, x: u8, y: u8, rows: &[u8]) -> bool {
        let mut collided = false;

        for (row, byte) in rows.iter().enumerate() {
            let cy = (y as usize + row) % DISPLAY_HEIGHT;
            for col in 0..8 {
                if byte & (0x80 >> col) == 0 {
                    continue;
                }
                let cx = (x as usize + col) % DISPLAY_WIDTH;
                let cell = &mut self.cells[cy * DISPLAY_WIDTH + cx];
                collided |= *cell == PIXEL_ON;
                *cell ^= PIXEL_ON;
            }
        }

        collided
    }

    /// Whether the cell at (x, y) is on; coordinates wrap like `draw_sprite`.
    pub fn is_on(&self, x: usize, y: usize) -> bool {
        self.cells[(y % DISPLAY_HEIGHT) * DISPLAY_WIDTH + x % DISPLAY_WIDTH] == PIXEL_ON
    }

    /// The whole screen as a flat, row-major slice of pixels.
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// The screen one row at a time, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.cells.chunks_exact(DISPLAY_WIDTH)
    }
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        Self::new()
    }
}
