use nalgebra::{convert, Point3, Vector3};
use simba::scalar::SupersetOf;

use crate::{curve::Continuity, misc::FloatingPoint};

/// Offset of the generated interpolants from a freshly added anchor
const DEFAULT_INTERPOLANT_OFFSET: f64 = 0.1;

/// A point the path passes through, with the Bezier handles on either side of it.
///
/// The left interpolant shapes the segment ending at this point,
/// the right interpolant shapes the segment starting from it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassPoint<T: FloatingPoint> {
    point: Point3<T>,
    left_interpolant: Point3<T>,
    right_interpolant: Point3<T>,
    continuity: Continuity,
}

impl<T: FloatingPoint> PassPoint<T> {
    /// Create a pass point with interpolants generated along the x axis
    /// # Example
    /// ```
    /// use tubular::prelude::*;
    /// use nalgebra::Point3;
    /// use approx::assert_relative_eq;
    ///
    /// let p = PassPoint::new(Point3::new(1.0, 0.0, 0.0), Continuity::C1);
    /// assert_relative_eq!(p.left_interpolant(), &Point3::new(0.9, 0.0, 0.0));
    /// assert_relative_eq!(p.right_interpolant(), &Point3::new(1.1, 0.0, 0.0));
    /// ```
    pub fn new(point: Point3<T>, continuity: Continuity) -> Self {
        let offset = Vector3::x() * convert::<f64, T>(DEFAULT_INTERPOLANT_OFFSET);
        let mut pass_point = Self {
            point,
            left_interpolant: point - offset,
            right_interpolant: point + offset,
            continuity,
        };
        pass_point.right_interpolant =
            pass_point.constrained(&pass_point.left_interpolant, &pass_point.right_interpolant);
        pass_point
    }

    /// Create an unconstrained (C0) pass point with explicit interpolants
    pub fn with_interpolants(
        point: Point3<T>,
        left_interpolant: Point3<T>,
        right_interpolant: Point3<T>,
    ) -> Self {
        Self {
            point,
            left_interpolant,
            right_interpolant,
            continuity: Continuity::C0,
        }
    }

    pub fn point(&self) -> &Point3<T> {
        &self.point
    }

    pub fn left_interpolant(&self) -> &Point3<T> {
        &self.left_interpolant
    }

    pub fn right_interpolant(&self) -> &Point3<T> {
        &self.right_interpolant
    }

    pub fn continuity(&self) -> Continuity {
        self.continuity
    }

    /// Move the anchor, carrying both interpolants rigidly with it
    pub fn set_point(&mut self, value: Point3<T>) {
        let offset = value - self.point;
        self.point = value;
        self.left_interpolant += offset;
        self.right_interpolant += offset;
    }

    /// Move the left interpolant and re-derive the right one from it
    pub fn set_left_interpolant(&mut self, value: Point3<T>) {
        self.left_interpolant = value;
        self.right_interpolant = self.constrained(&self.left_interpolant, &self.right_interpolant);
    }

    /// Move the right interpolant and re-derive the left one from it
    pub fn set_right_interpolant(&mut self, value: Point3<T>) {
        self.right_interpolant = value;
        self.left_interpolant = self.constrained(&self.right_interpolant, &self.left_interpolant);
    }

    /// Change the continuity and re-project the right interpolant from the left one.
    /// A left interpolant sitting on the anchor has no direction, so the left one is
    /// projected from the right instead.
    pub fn set_continuity(&mut self, continuity: Continuity) {
        self.continuity = continuity;
        let left_offset = self.left_interpolant - self.point;
        if left_offset.norm_squared() <= T::degenerate_tolerance() {
            self.left_interpolant =
                self.constrained(&self.right_interpolant, &self.left_interpolant);
        } else {
            self.right_interpolant =
                self.constrained(&self.left_interpolant, &self.right_interpolant);
        }
    }

    /// Returns where `sibling` has to be so that the pair satisfies the continuity,
    /// given that `reference` is the interpolant that was just edited.
    fn constrained(&self, reference: &Point3<T>, sibling: &Point3<T>) -> Point3<T> {
        let length_source = match self.continuity {
            Continuity::C0 => return *sibling,
            Continuity::C1 => sibling,
            Continuity::C2 => reference,
        };

        let direction = self.point - reference;
        let norm_squared = direction.norm_squared();
        // a reference sitting on the anchor has no direction to mirror
        if norm_squared <= T::degenerate_tolerance() {
            return *sibling;
        }

        let length = (self.point - length_source).norm();
        self.point + direction * (length / norm_squared.sqrt())
    }

    /// Cast the pass point to another floating point type
    pub fn cast<F: FloatingPoint + SupersetOf<T>>(&self) -> PassPoint<F> {
        PassPoint {
            point: self.point.cast(),
            left_interpolant: self.left_interpolant.cast(),
            right_interpolant: self.right_interpolant.cast(),
            continuity: self.continuity,
        }
    }
}
