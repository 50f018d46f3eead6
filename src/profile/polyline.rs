use nalgebra::{convert, Point2};

use crate::{error::PathError, misc::FloatingPoint, profile::Profile};

/// Piecewise linear profile through a list of points.
/// Each edge covers an equal share of the parameter range, regardless of its length.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline<T: FloatingPoint> {
    points: Vec<Point2<T>>,
    closed: bool,
}

impl<T: FloatingPoint> Polyline<T> {
    /// Create a polyline profile
    /// # Failures
    /// - if fewer than 2 points are given
    pub fn try_new(points: Vec<Point2<T>>, closed: bool) -> anyhow::Result<Self> {
        anyhow::ensure!(
            points.len() >= 2,
            PathError::InsufficientProfilePoints {
                count: points.len()
            }
        );
        Ok(Self { points, closed })
    }

    pub fn points(&self) -> &[Point2<T>] {
        &self.points
    }

    fn edge_count(&self) -> usize {
        self.points.len() - usize::from(!self.closed)
    }
}

impl<T: FloatingPoint> Profile<T> for Polyline<T> {
    fn is_closed(&self) -> bool {
        self.closed
    }

    fn point_at(&self, t: T) -> Point2<T> {
        let edges = self.edge_count();
        let scaled = t.clamp(T::zero(), T::one()) * convert::<f64, T>(edges as f64);
        let start = scaled.floor().to_usize().unwrap_or(0).min(edges - 1);
        let end = (start + 1) % self.points.len();
        let local = scaled - convert::<f64, T>(start as f64);
        let (a, b) = (&self.points[start], &self.points[end]);
        a + (b - a) * local
    }
}
