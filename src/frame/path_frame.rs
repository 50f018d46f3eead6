use nalgebra::{Affine3, Matrix4, Point3, Vector3};

use crate::misc::FloatingPoint;

/// An orthonormal frame sampled on a path.
///
/// `reference` is propagated along the path rather than derived from curvature,
/// so it does not flip at inflections the way a Frenet normal does.
#[derive(Debug, Clone, PartialEq)]
pub struct PathFrame<T: FloatingPoint> {
    parameter: T,
    position: Point3<T>,
    tangent: Vector3<T>,
    reference: Vector3<T>,
    normal: Vector3<T>,
}

impl<T: FloatingPoint> PathFrame<T> {
    /// `tangent` and `reference` are expected to be orthonormal
    pub fn new(parameter: T, position: Point3<T>, tangent: Vector3<T>, reference: Vector3<T>) -> Self {
        Self {
            parameter,
            position,
            tangent,
            reference,
            normal: tangent.cross(&reference).normalize(),
        }
    }

    pub fn parameter(&self) -> T {
        self.parameter
    }

    pub fn position(&self) -> &Point3<T> {
        &self.position
    }

    pub fn tangent(&self) -> &Vector3<T> {
        &self.tangent
    }

    pub fn reference(&self) -> &Vector3<T> {
        &self.reference
    }

    /// `normalize(cross(tangent, reference))`
    pub fn normal(&self) -> &Vector3<T> {
        &self.normal
    }

    /// Up axis of the sweep basis, `cross(reference, tangent)`
    pub fn up(&self) -> Vector3<T> {
        self.reference.cross(&self.tangent)
    }

    /// The same orientation moved to another sample
    pub(crate) fn carried_to(&self, parameter: T, position: Point3<T>) -> Self {
        Self {
            parameter,
            position,
            ..self.clone()
        }
    }

    /// The frame rotated about its tangent by `angle` radians, toward its normal
    pub(crate) fn rolled(&self, angle: T) -> Self {
        let reference = self.reference * angle.cos() + self.normal * angle.sin();
        Self::new(self.parameter, self.position, self.tangent, reference)
    }

    /// Returns the transformation that maps profile space into the frame:
    /// x along `reference`, y along [`up`](Self::up), z along `tangent`,
    /// origin at the frame position.
    pub fn matrix(&self) -> Affine3<T> {
        let (r, u, f, p) = (self.reference, self.up(), self.tangent, self.position);
        let (zero, one) = (T::zero(), T::one());
        #[rustfmt::skip]
        let m = Matrix4::new(
            r.x, u.x, f.x, p.x,
            r.y, u.y, f.y, p.y,
            r.z, u.z, f.z, p.z,
            zero, zero, zero, one,
        );
        Affine3::from_matrix_unchecked(m)
    }
}
