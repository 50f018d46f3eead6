pub mod circle;
pub mod polyline;
pub use circle::*;
pub use polyline::*;

use nalgebra::{convert, Point2};

use crate::misc::FloatingPoint;

/// A 2D cross section swept along a path.
///
/// Points live in profile space: x maps to a frame's reference,
/// y to its up axis.
pub trait Profile<T: FloatingPoint> {
    /// A closed profile ends where it starts and is swept without repeating that vertex
    fn is_closed(&self) -> bool;

    /// Evaluate the profile at `t` in `[0, 1]`, values outside are clamped
    fn point_at(&self, t: T) -> Point2<T>;

    /// Sample `resolution` evenly spaced points, plus the end point if the profile is open
    fn sample(&self, resolution: usize) -> Vec<Point2<T>> {
        let count = resolution + usize::from(!self.is_closed());
        if resolution == 0 {
            return (0..count).map(|_| self.point_at(T::zero())).collect();
        }
        let inv = T::one() / convert::<f64, T>(resolution as f64);
        (0..count)
            .map(|i| self.point_at(convert::<f64, T>(i as f64) * inv))
            .collect()
    }
}
