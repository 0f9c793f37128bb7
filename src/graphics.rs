//! Graphics support via embedded-graphics
//!
//! [`Rasterizer`] and [`PagedDisplay`] implement
//! [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget) over the
//! whole raster. Only pixels that fall in the resident window are kept, so
//! drawables must be replayed once per window just like segments.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     pixelcolor::BinaryColor,
//!     prelude::*,
//!     primitives::{Circle, PrimitiveStyle},
//! };
//! use ssd1306_paged::{Builder, Dimensions, PagedDisplay, SerialBus};
//! # use core::convert::Infallible;
//! # struct NullBus;
//! # impl SerialBus for NullBus {
//! #     type Error = Infallible;
//! #     fn start(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn stop(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transmit_byte(&mut self, _value: u8) -> Result<bool, Self::Error> { Ok(true) }
//! # }
//! # let dims = match Dimensions::new(64, 128) {
//! #     Ok(dims) => dims,
//! #     Err(_) => return,
//! # };
//! # let config = match Builder::new().dimensions(dims).build() {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! let mut display = PagedDisplay::new(NullBus, config);
//!
//! display.begin_frame();
//! loop {
//!     let _ = Circle::new(Point::new(40, 8), 48)
//!         .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
//!         .draw(&mut display);
//!     match display.end_window() {
//!         Ok(true) => continue,
//!         _ => break,
//!     }
//! }
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::BinaryColor,
    prelude::Pixel,
};

use crate::bus::SerialBus;
use crate::raster::Rasterizer;
use crate::session::PagedDisplay;

impl Rasterizer {
    /// Set or clear one pixel given in raster coordinates
    ///
    /// Pixels outside the resident window are ignored.
    fn put_pixel(&mut self, x: i32, y: i32, color: BinaryColor) {
        let (low, high) = self.bounds();
        if x < 0 || y < i32::from(low) || y > i32::from(high) {
            return;
        }
        let row = (y - i32::from(low)) as u8;
        let window = self.window_mut();
        match color {
            BinaryColor::On => window.set(x as usize, row),
            BinaryColor::Off => window.unset(x as usize, row),
        }
    }
}

impl DrawTarget for Rasterizer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            self.put_pixel(x, y, color);
        }

        Ok(())
    }
}

impl OriginDimensions for Rasterizer {
    fn size(&self) -> Size {
        Size::new(
            u32::from(self.window().width()),
            u32::from(self.rows()),
        )
    }
}

impl<B> DrawTarget for PagedDisplay<B>
where
    B: SerialBus,
{
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.drawing_raster().draw_iter(pixels)
    }
}

impl<B> OriginDimensions for PagedDisplay<B>
where
    B: SerialBus,
{
    fn size(&self) -> Size {
        self.raster().size()
    }
}
