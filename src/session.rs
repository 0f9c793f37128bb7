//! Paged frame rendering
//!
//! [`PagedDisplay`] ties a [`Rasterizer`] to a [`Display`] and runs the
//! per-frame window loop:
//!
//! ```text
//! Idle --begin_frame--> FirstWindow --draw_segment--> Drawing
//!                            |                          |
//!                            +-------end_window---------+
//!                                        |
//!                          NextWindow <--+--> Done
//! ```
//!
//! Each window is flushed to the controller as soon as it is finished,
//! so only one 8-row strip is ever held in memory. The segment list is
//! replayed for every window.
//!
//! ## Example
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use ssd1306_paged::{Builder, Dimensions, PagedDisplay, Segment, SerialBus};
//! # struct NullBus;
//! # impl SerialBus for NullBus {
//! #     type Error = Infallible;
//! #     fn start(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn stop(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transmit_byte(&mut self, _value: u8) -> Result<bool, Self::Error> { Ok(true) }
//! # }
//! let dims = match Dimensions::new(64, 128) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let config = match Builder::new().dimensions(dims).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//! let mut display = PagedDisplay::new(NullBus, config);
//! let _ = display.init();
//!
//! display.begin_frame();
//! loop {
//!     display.draw_segment(0, 0, 127, 63);
//!     display.draw_segment(0, 63, 127, 0);
//!     match display.end_window() {
//!         Ok(true) => continue,
//!         _ => break,
//!     }
//! }
//!
//! // Or let the display replay a segment source for you
//! let segments = [Segment::new(0, 0, 127, 63)];
//! let _ = display.render(&segments);
//! ```

use log::{debug, warn};

use crate::bus::SerialBus;
use crate::config::Config;
use crate::display::Display;
use crate::error::Error;
use crate::geometry::{Segment, SegmentSource};
use crate::raster::Rasterizer;

type SessionResult<E> = core::result::Result<bool, Error<E>>;

/// Where the session is within the current frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum SessionState {
    /// No frame started yet
    #[default]
    Idle,
    /// Window 0 resident and empty
    FirstWindow,
    /// At least one segment drawn into the resident window
    Drawing,
    /// A later window resident and empty
    NextWindow,
    /// Every window flushed; the last one is still in the buffer
    Done,
}

/// SSD1306 display rendered one window at a time
pub struct PagedDisplay<B>
where
    B: SerialBus,
{
    display: Display<B>,
    raster: Rasterizer,
    state: SessionState,
    /// Windows flushed without a complete acknowledge
    nacks: u32,
}

impl<B> PagedDisplay<B>
where
    B: SerialBus,
{
    /// Create a new paged display
    pub fn new(bus: B, config: Config) -> Self {
        let raster = Rasterizer::new(config.dimensions);
        Self {
            display: Display::new(bus, config),
            raster,
            state: SessionState::Idle,
            nacks: 0,
        }
    }

    /// Configure the controller; see [`Display::init`]
    pub fn init(&mut self) -> SessionResult<B::Error> {
        self.display.init()
    }

    /// Start a frame on window 0 with an empty buffer
    pub fn begin_frame(&mut self) {
        self.raster.begin_frame();
        self.state = SessionState::FirstWindow;
    }

    /// Draw the part of a segment that falls in the resident window
    pub fn draw_segment(&mut self, x1: i16, y1: i16, x2: i16, y2: i16) {
        self.raster.draw_segment(x1, y1, x2, y2);
        if self.state != SessionState::Done {
            self.state = SessionState::Drawing;
        }
    }

    /// Draw a [`Segment`]
    pub fn draw(&mut self, segment: Segment) {
        self.draw_segment(segment.x1, segment.y1, segment.x2, segment.y2);
    }

    /// Flush the resident window and move to the next one
    ///
    /// Returns `Ok(true)` while windows remain. Once the frame is done,
    /// further calls flush nothing and return `Ok(false)`. A missing
    /// acknowledge is counted and logged but does not stop the frame.
    pub fn end_window(&mut self) -> SessionResult<B::Error> {
        if self.raster.is_done() {
            self.state = SessionState::Done;
            return Ok(false);
        }

        let index = self.raster.window_index();
        let acked = self
            .display
            .write_window(index, self.raster.window().columns())?;
        if !acked {
            self.nacks = self.nacks.saturating_add(1);
            warn!("ssd1306: window {index} not acknowledged");
        }

        let more = self.raster.advance();
        self.state = if more {
            SessionState::NextWindow
        } else {
            SessionState::Done
        };
        Ok(more)
    }

    /// Render one complete frame from `source`
    ///
    /// The source is replayed once per window. Returns `Ok(true)` if every
    /// window was acknowledged.
    pub fn render<S>(&mut self, source: &S) -> SessionResult<B::Error>
    where
        S: SegmentSource + ?Sized,
    {
        let before = self.nacks;
        self.begin_frame();
        loop {
            source.for_each_segment(|segment| self.draw(segment));
            if !self.end_window()? {
                break;
            }
        }
        let clean = self.nacks == before;
        debug!(
            "ssd1306: frame rendered over {} windows (clean: {clean})",
            self.raster.window_count()
        );
        Ok(clean)
    }

    /// Current state within the frame
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Windows flushed without a full acknowledge since creation
    pub fn nack_count(&self) -> u32 {
        self.nacks
    }

    /// The rasterizer and its resident window
    pub fn raster(&self) -> &Rasterizer {
        &self.raster
    }

    /// Resident rasterizer for drawing outside of [`draw_segment`](Self::draw_segment)
    pub(crate) fn drawing_raster(&mut self) -> &mut Rasterizer {
        if self.state != SessionState::Done {
            self.state = SessionState::Drawing;
        }
        &mut self.raster
    }

    /// The underlying display driver
    pub fn display(&mut self) -> &mut Display<B> {
        &mut self.display
    }

    /// Give back the bus
    pub fn release(self) -> B {
        self.display.release()
    }
}
