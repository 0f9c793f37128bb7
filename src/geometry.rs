//! Segments and the producers that emit them
//!
//! A [`SegmentSource`] is replayed once per window, so it must yield the
//! same segments every time it is asked during one frame. Recomputing
//! geometry belongs between frames, not inside
//! [`for_each_segment`](SegmentSource::for_each_segment).

/// A line segment between two raster points
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Segment {
    /// First endpoint, column
    pub x1: i16,
    /// First endpoint, row
    pub y1: i16,
    /// Second endpoint, column
    pub x2: i16,
    /// Second endpoint, row
    pub y2: i16,
}

impl Segment {
    /// Create a segment from two endpoints
    pub const fn new(x1: i16, y1: i16, x2: i16, y2: i16) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Create a segment joining two points
    pub const fn between(a: [i16; 2], b: [i16; 2]) -> Self {
        Self::new(a[0], a[1], b[0], b[1])
    }
}

/// Producer of the segment list for the current animation frame
pub trait SegmentSource {
    /// Call `f` once for every segment of the frame, in a stable order
    fn for_each_segment<F: FnMut(Segment)>(&self, f: F);
}

impl SegmentSource for [Segment] {
    fn for_each_segment<F: FnMut(Segment)>(&self, f: F) {
        self.iter().copied().for_each(f);
    }
}

impl<const N: usize> SegmentSource for [Segment; N] {
    fn for_each_segment<F: FnMut(Segment)>(&self, f: F) {
        self.as_slice().for_each_segment(f);
    }
}
