use nalgebra::Point2;

use crate::{misc::FloatingPoint, profile::Profile};

/// Circle centered on the profile origin, starting on the +x axis and turning counter-clockwise
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle<T> {
    radius: T,
}

impl<T: FloatingPoint> Circle<T> {
    pub fn new(radius: T) -> Self {
        Self { radius }
    }

    pub fn unit() -> Self {
        Self::new(T::one())
    }

    pub fn radius(&self) -> T {
        self.radius
    }
}

impl<T: FloatingPoint> Default for Circle<T> {
    fn default() -> Self {
        Self::unit()
    }
}

impl<T: FloatingPoint> Profile<T> for Circle<T> {
    fn is_closed(&self) -> bool {
        true
    }

    fn point_at(&self, t: T) -> Point2<T> {
        let angle = T::two_pi() * t.clamp(T::zero(), T::one());
        Point2::new(angle.cos(), angle.sin()) * self.radius
    }
}
