//! Windowed line rasterizer
//!
//! [`Rasterizer`] draws line segments into the resident [`PixelWindow`],
//! keeping only the part of each segment that falls inside the window's
//! rows. The caller replays the same segment list once per window, so
//! work per call is bounded by the window height rather than the length
//! of the segment.
//!
//! ## Algorithm
//!
//! Endpoints are first ordered so that `x1 <= x2`.
//!
//! - **Vertical** (`x1 == x2`): the rows shared by the segment and the
//!   window are filled in that single column.
//! - **Shallow** (`|a| <= 1`): slope `a` and intercept `b` are kept as
//!   floats. The x range whose `y = a·x + b` can land in the window is
//!   found by inverting the line equation at the window's top and bottom
//!   (widened by one row each side), intersected with `[x1, x2]`, and each
//!   x in it yields at most one pixel.
//! - **Steep** (`|a| > 1`): iterate the rows shared by segment and window
//!   and step x by the inverse slope.
//!
//! Pixel coordinates are rounded to nearest, so both endpoints are hit
//! exactly and consecutive windows split a segment without gaps or
//! duplicate pixels.
//!
//! ## Example
//!
//! ```
//! use ssd1306_paged::{Dimensions, Rasterizer};
//!
//! let dims = match Dimensions::new(64, 128) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let mut raster = Rasterizer::new(dims);
//! raster.begin_frame();
//! raster.draw_segment(10, 5, 10, 40);
//! assert_eq!(raster.window().columns()[10], 0b1110_0000);
//! ```

use libm::{ceilf, floorf, roundf};

use crate::config::{Dimensions, WINDOW_HEIGHT};
use crate::geometry::Segment;
use crate::window::PixelWindow;

/// Line rasterizer over one resident window of the raster
#[derive(Clone, Debug)]
pub struct Rasterizer {
    window: PixelWindow,
    index: u8,
    count: u8,
    rows: u8,
}

impl Rasterizer {
    /// Create a rasterizer positioned on window 0
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            window: PixelWindow::new(dimensions.cols),
            index: 0,
            count: dimensions.windows(),
            rows: dimensions.rows,
        }
    }

    /// Rewind to window 0 and clear it
    pub fn begin_frame(&mut self) {
        self.index = 0;
        self.window.clear();
    }

    /// Move to the next window
    ///
    /// The buffer is cleared only if another window remains; after the
    /// last window it keeps its content. Returns whether another window
    /// remains.
    pub fn advance(&mut self) -> bool {
        if self.index < self.count {
            self.index += 1;
        }
        let more = self.index < self.count;
        if more {
            self.window.clear();
        }
        more
    }

    /// Jump directly to window `index` and clear it
    ///
    /// Returns `false` and leaves the rasterizer untouched if `index` is
    /// not a window of this raster.
    pub fn seek(&mut self, index: u8) -> bool {
        if index >= self.count {
            return false;
        }
        self.index = index;
        self.window.clear();
        true
    }

    /// Index of the resident window
    pub fn window_index(&self) -> u8 {
        self.index
    }

    /// Number of windows in the raster
    pub fn window_count(&self) -> u8 {
        self.count
    }

    /// Raster height in rows
    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Whether every window of the frame has been passed
    pub fn is_done(&self) -> bool {
        self.index >= self.count
    }

    /// First and last raster row covered by the resident window
    pub fn bounds(&self) -> (i16, i16) {
        let low = i16::from(self.index) * i16::from(WINDOW_HEIGHT);
        (low, low + i16::from(WINDOW_HEIGHT) - 1)
    }

    /// The resident window
    pub fn window(&self) -> &PixelWindow {
        &self.window
    }

    pub(crate) fn window_mut(&mut self) -> &mut PixelWindow {
        &mut self.window
    }

    /// Draw a [`Segment`]
    pub fn draw(&mut self, segment: Segment) {
        self.draw_segment(segment.x1, segment.y1, segment.x2, segment.y2);
    }

    /// Draw the part of the segment `(x1, y1)-(x2, y2)` inside the resident window
    ///
    /// Segments that miss the window, or parts of them, are clipped
    /// silently. Pixels left or right of the raster are skipped.
    pub fn draw_segment(&mut self, x1: i16, y1: i16, x2: i16, y2: i16) {
        let (low, high) = self.bounds();
        if x1 <= x2 {
            self.draw_clipped(x1, y1, x2, y2, low, high);
        } else {
            self.draw_clipped(x2, y2, x1, y1, low, high);
        }
    }

    fn plot(&mut self, x: i32, y: i32, low: i16) {
        let row = y - i32::from(low);
        if x >= 0 && (0..i32::from(WINDOW_HEIGHT)).contains(&row) {
            self.window.set(x as usize, row as u8);
        }
    }

    /// Requires `x1 <= x2`
    fn draw_clipped(&mut self, x1: i16, y1: i16, x2: i16, y2: i16, low: i16, high: i16) {
        let top = y1.min(y2);
        let bottom = y1.max(y2);
        if bottom < low || top > high {
            return;
        }

        if x1 == x2 {
            for y in top.max(low)..=bottom.min(high) {
                self.plot(i32::from(x1), i32::from(y), low);
            }
            return;
        }

        // Widened: endpoints may be further apart than i16 can hold
        let dx = (i32::from(x2) - i32::from(x1)) as f32;
        let dy = (i32::from(y2) - i32::from(y1)) as f32;
        let a = dy / dx;
        let b = f32::from(y1) - a * f32::from(x1);

        if a.abs() <= 1.0 {
            let (first, last) = if a > 0.0 {
                (
                    floorf((f32::from(low) - 1.0 - b) / a) as i32,
                    ceilf((f32::from(high) + 1.0 - b) / a) as i32,
                )
            } else if a < 0.0 {
                (
                    floorf((f32::from(high) + 1.0 - b) / a) as i32,
                    ceilf((f32::from(low) - 1.0 - b) / a) as i32,
                )
            } else {
                (i32::from(x1), i32::from(x2))
            };
            let first = first.max(i32::from(x1));
            let last = last.min(i32::from(x2));
            for x in first..=last {
                let y = roundf(a * x as f32 + b) as i32;
                self.plot(x, y, low);
            }
        } else {
            let step = dx / dy;
            for y in top.max(low)..=bottom.min(high) {
                let offset = (i32::from(y) - i32::from(y1)) as f32;
                let x = roundf(f32::from(x1) + offset * step) as i32;
                self.plot(x, i32::from(y), low);
            }
        }
    }
}
