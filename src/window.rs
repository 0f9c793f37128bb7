//! Single-window pixel buffer
//!
//! The SSD1306 stores its raster as 8-row pages, one byte per column with
//! bit 0 at the top. [`PixelWindow`] holds exactly one such page. The full
//! raster never exists in memory; it is produced window by window and each
//! window is flushed before the next one is drawn.
//!
//! ## Example
//!
//! ```
//! use ssd1306_paged::PixelWindow;
//!
//! let mut window = PixelWindow::new(128);
//! window.set(3, 0);
//! window.set(3, 7);
//! assert_eq!(window.columns()[3], 0b1000_0001);
//! assert!(window.get(3, 7));
//! ```

use crate::config::{MAX_COLUMNS, WINDOW_HEIGHT};

/// One 8-row strip of the raster, one byte per column
#[derive(Clone, Debug, PartialEq)]
pub struct PixelWindow {
    columns: [u8; MAX_COLUMNS as usize],
    width: u8,
}

impl PixelWindow {
    /// Create an empty window `width` columns wide (clamped to 128)
    pub fn new(width: u8) -> Self {
        Self {
            columns: [0; MAX_COLUMNS as usize],
            width: width.min(MAX_COLUMNS),
        }
    }

    /// Window width in columns
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Clear every pixel
    pub fn clear(&mut self) {
        self.columns.fill(0);
    }

    /// Whether no pixel is set
    pub fn is_clear(&self) -> bool {
        self.columns().iter().all(|&column| column == 0)
    }

    /// Set the pixel at column `x`, window-relative row `row`
    ///
    /// Out-of-range positions are ignored.
    pub fn set(&mut self, x: usize, row: u8) {
        if row < WINDOW_HEIGHT {
            if let Some(column) = self.columns().get(x).copied() {
                self.columns[x] = column | (1 << row);
            }
        }
    }

    /// Clear the pixel at column `x`, window-relative row `row`
    pub fn unset(&mut self, x: usize, row: u8) {
        if row < WINDOW_HEIGHT && x < self.width as usize {
            self.columns[x] &= !(1 << row);
        }
    }

    /// Read the pixel at column `x`, window-relative row `row`
    pub fn get(&self, x: usize, row: u8) -> bool {
        row < WINDOW_HEIGHT
            && self
                .columns()
                .get(x)
                .is_some_and(|column| column & (1 << row) != 0)
    }

    /// Column bytes in transfer order
    pub fn columns(&self) -> &[u8] {
        &self.columns[..self.width as usize]
    }
}
