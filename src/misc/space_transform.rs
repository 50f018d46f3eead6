use nalgebra::{Affine3, Isometry3, Point3, Similarity3, Vector3};

use crate::misc::FloatingPoint;

/// A local to world transform owned by the host scene.
///
/// Paths never store one of these. Every world space accessor takes the
/// transform as an argument and composes it with a purely local computation.
pub trait SpaceTransform<T: FloatingPoint> {
    fn transform_point(&self, point: &Point3<T>) -> Point3<T>;
    fn inverse_transform_point(&self, point: &Point3<T>) -> Point3<T>;
    fn transform_vector(&self, vector: &Vector3<T>) -> Vector3<T>;
    fn inverse_transform_vector(&self, vector: &Vector3<T>) -> Vector3<T>;
}

impl<T: FloatingPoint> SpaceTransform<T> for Isometry3<T> {
    fn transform_point(&self, point: &Point3<T>) -> Point3<T> {
        Isometry3::transform_point(self, point)
    }

    fn inverse_transform_point(&self, point: &Point3<T>) -> Point3<T> {
        Isometry3::inverse_transform_point(self, point)
    }

    fn transform_vector(&self, vector: &Vector3<T>) -> Vector3<T> {
        Isometry3::transform_vector(self, vector)
    }

    fn inverse_transform_vector(&self, vector: &Vector3<T>) -> Vector3<T> {
        Isometry3::inverse_transform_vector(self, vector)
    }
}

impl<T: FloatingPoint> SpaceTransform<T> for Similarity3<T> {
    fn transform_point(&self, point: &Point3<T>) -> Point3<T> {
        Similarity3::transform_point(self, point)
    }

    fn inverse_transform_point(&self, point: &Point3<T>) -> Point3<T> {
        Similarity3::inverse_transform_point(self, point)
    }

    fn transform_vector(&self, vector: &Vector3<T>) -> Vector3<T> {
        Similarity3::transform_vector(self, vector)
    }

    fn inverse_transform_vector(&self, vector: &Vector3<T>) -> Vector3<T> {
        Similarity3::inverse_transform_vector(self, vector)
    }
}

/// General affine transforms, including non-uniform scale and shear.
/// The transform must be invertible.
impl<T: FloatingPoint> SpaceTransform<T> for Affine3<T> {
    fn transform_point(&self, point: &Point3<T>) -> Point3<T> {
        Affine3::transform_point(self, point)
    }

    fn inverse_transform_point(&self, point: &Point3<T>) -> Point3<T> {
        Affine3::inverse_transform_point(self, point)
    }

    fn transform_vector(&self, vector: &Vector3<T>) -> Vector3<T> {
        Affine3::transform_vector(self, vector)
    }

    fn inverse_transform_vector(&self, vector: &Vector3<T>) -> Vector3<T> {
        Affine3::inverse_transform_vector(self, vector)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::{Matrix4, Translation3, UnitQuaternion};

    use super::*;

    #[test]
    fn affine_round_trip() {
        let m = Matrix4::new(
            2.0, 0.5, 0.0, 1.0, //
            0.0, 1.5, 0.0, -3.0, //
            0.0, 0.0, 0.25, 2.0, //
            0.0, 0.0, 0.0, 1.0,
        );
        let affine = Affine3::from_matrix_unchecked(m);
        let p = Point3::new(0.3, -1.2, 4.0);
        let world = SpaceTransform::transform_point(&affine, &p);
        let back = SpaceTransform::inverse_transform_point(&affine, &world);
        assert_relative_eq!(back, p, epsilon = 1e-10);

        let v = Vector3::new(1.0, 2.0, 3.0);
        let world = SpaceTransform::transform_vector(&affine, &v);
        assert_relative_eq!(
            SpaceTransform::inverse_transform_vector(&affine, &world),
            v,
            epsilon = 1e-10
        );
    }

    #[test]
    fn vectors_ignore_translation() {
        let iso = Isometry3::from_parts(
            Translation3::new(10.0, 0.0, 0.0),
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), std::f64::consts::FRAC_PI_2),
        );
        let v = SpaceTransform::transform_vector(&iso, &Vector3::x());
        assert_relative_eq!(v, Vector3::y(), epsilon = 1e-12);
    }
}
