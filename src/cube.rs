//! Rotating wireframe cube
//!
//! [`Cube`] recomputes its eight projected corners once per animation
//! frame in [`advance`](Cube::advance) and then serves the same twelve
//! edges for every window of that frame.
//!
//! ```
//! use ssd1306_paged::{Cube, Dimensions, SegmentSource};
//!
//! let mut cube = Cube::new(Dimensions::new(64, 128).unwrap());
//! cube.advance();
//!
//! let mut edges = 0;
//! cube.for_each_segment(|_| edges += 1);
//! assert_eq!(edges, 12);
//! ```

use libm::{cosf, roundf, sinf};

use crate::config::Dimensions;
use crate::geometry::{Segment, SegmentSource};

/// Corners of the unit cube: the front square, then the back square
const CORNERS: [[f32; 3]; 8] = [
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
];

/// Angle every axis starts at, in degrees
pub const START_ANGLE: u16 = 60;

/// Per-frame angle increments for the X, Y and Z rotations, in degrees
pub const ANGLE_STEPS: [u16; 3] = [3, 5, 7];

/// Camera distance added to every rotated z before the perspective divide
const Z_OFFSET: f32 = -4.0;

/// Base edge scale and the amplitude of its pulsing
const BASE_SIZE: f32 = 48.0;
const PULSE: f32 = 15.0;
const PULSE_RATE: f32 = 0.2;

/// Wireframe cube spinning about all three axes
#[derive(Clone, Debug)]
pub struct Cube {
    angles: [u16; 3],
    frame: u32,
    center: [f32; 2],
    points: [[i16; 2]; 8],
}

impl Cube {
    /// Create a cube centred on a raster of the given dimensions
    ///
    /// The projected corners are computed for the start angles.
    pub fn new(dimensions: Dimensions) -> Self {
        let mut cube = Self {
            angles: [START_ANGLE; 3],
            frame: 0,
            center: [
                f32::from(dimensions.cols) / 2.0,
                f32::from(dimensions.rows) / 2.0,
            ],
            points: [[0; 2]; 8],
        };
        cube.project();
        cube
    }

    /// Step the animation by one frame and recompute the corners
    pub fn advance(&mut self) {
        self.frame = self.frame.wrapping_add(1);
        for (angle, step) in self.angles.iter_mut().zip(ANGLE_STEPS) {
            *angle = (*angle + step) % 360;
        }
        self.project();
    }

    /// Rotation angles about X, Y and Z, in degrees
    pub fn angles(&self) -> [u16; 3] {
        self.angles
    }

    /// Frames advanced since creation
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Projected corners in raster coordinates
    pub fn points(&self) -> &[[i16; 2]; 8] {
        &self.points
    }

    /// Edge scale for the current frame
    fn size(&self) -> f32 {
        // Truncated to whole pixels
        let size = BASE_SIZE + sinf(self.frame as f32 * PULSE_RATE) * PULSE;
        size as u16 as f32
    }

    fn project(&mut self) {
        let size = self.size();
        let mut corners = CORNERS;
        for (axis, &angle) in self.angles.iter().enumerate() {
            rotate(&mut corners, axis, angle);
        }

        for (point, [x, y, z]) in self.points.iter_mut().zip(corners) {
            let depth = z + Z_OFFSET;
            point[0] = roundf(self.center[0] + x / depth * size) as i16;
            point[1] = roundf(self.center[1] + y / depth * size) as i16;
        }
    }
}

/// Rotate every corner by `degrees` in the plane spanned by `axis` and
/// its partner axis
///
/// The partner of X and Y is Z; the partner of Z is X.
fn rotate(corners: &mut [[f32; 3]; 8], axis: usize, degrees: u16) {
    let partner = if axis == 2 { 0 } else { 2 };
    let radians = f32::from(degrees).to_radians();
    let (sin, cos) = (sinf(radians), cosf(radians));

    for corner in corners.iter_mut() {
        let a = corner[axis];
        let b = corner[partner];
        corner[axis] = a * cos - b * sin;
        corner[partner] = a * sin + b * cos;
    }
}

impl SegmentSource for Cube {
    fn for_each_segment<F: FnMut(Segment)>(&self, mut f: F) {
        let p = &self.points;
        for i in 0..4 {
            let next = (i + 1) % 4;
            f(Segment::between(p[i], p[next]));
            f(Segment::between(p[4 + i], p[4 + next]));
            f(Segment::between(p[i], p[4 + i]));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn cube() -> Cube {
        Cube::new(Dimensions::new(64, 128).unwrap())
    }

    #[test]
    fn test_angles_start_and_step() {
        let mut cube = cube();
        assert_eq!(cube.angles(), [60, 60, 60]);
        cube.advance();
        assert_eq!(cube.angles(), [63, 65, 67]);
        assert_eq!(cube.frame(), 1);
    }

    #[test]
    fn test_angles_wrap_at_full_turn() {
        let mut cube = cube();
        for _ in 0..100 {
            cube.advance();
        }
        assert_eq!(cube.angles(), [(60 + 300) % 360, (60 + 500) % 360, (60 + 700) % 360]);
        assert!(cube.angles().iter().all(|&angle| angle < 360));
    }

    #[test]
    fn test_unrotated_projection_is_centred() {
        let mut cube = cube();
        cube.angles = [0, 0, 0];
        cube.project();
        // Front face at z = 1 sits at depth -3, back face at depth -5
        let xs: Vec<i16> = cube.points().iter().map(|p| p[0]).collect();
        let ys: Vec<i16> = cube.points().iter().map(|p| p[1]).collect();
        assert_eq!(xs, [80, 48, 48, 80, 74, 54, 54, 74]);
        assert_eq!(ys, [48, 48, 16, 16, 42, 42, 22, 22]);
    }

    #[test]
    fn test_points_stay_on_raster() {
        let mut cube = cube();
        for _ in 0..360 {
            cube.advance();
            for &[x, y] in cube.points() {
                assert!((0..128).contains(&x), "x = {x}");
                assert!((0..64).contains(&y), "y = {y}");
            }
        }
    }

    #[test]
    fn test_twelve_edges_over_eight_corners() {
        let mut cube = cube();
        cube.advance();
        let mut edges = Vec::new();
        cube.for_each_segment(|segment| edges.push(segment));
        assert_eq!(edges.len(), 12);

        let mut degree = [0u8; 8];
        for edge in &edges {
            for end in [[edge.x1, edge.y1], [edge.x2, edge.y2]] {
                let corner = cube.points().iter().position(|&p| p == end).unwrap();
                degree[corner] += 1;
            }
        }
        // Corners can coincide after projection, so only the total is exact
        assert_eq!(degree.iter().map(|&d| u32::from(d)).sum::<u32>(), 24);
    }

    #[test]
    fn test_replay_is_stable_within_frame() {
        let cube = cube();
        let mut first = Vec::new();
        let mut second = Vec::new();
        cube.for_each_segment(|segment| first.push(segment));
        cube.for_each_segment(|segment| second.push(segment));
        assert_eq!(first, second);
    }
}
