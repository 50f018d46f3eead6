use nalgebra::Vector3;

use crate::misc::FloatingPoint;

/// How the reference vector of the first frame is chosen.
/// Every later frame is propagated from it, so this fixes the roll of the whole sweep.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ReferenceSeed<T> {
    /// Zero the smallest tangent component, swap the other two and negate the first of them
    #[default]
    MinorAxis,
    /// Project a fixed vector onto the plane orthogonal to the tangent,
    /// falling back to `MinorAxis` when it is parallel to the tangent
    Fixed(Vector3<T>),
}

impl<T: FloatingPoint> ReferenceSeed<T> {
    /// Unit vector orthogonal to the unit `tangent`
    pub fn reference_for(&self, tangent: &Vector3<T>, tolerance: T) -> Vector3<T> {
        match self {
            ReferenceSeed::MinorAxis => minor_axis_perpendicular(tangent),
            ReferenceSeed::Fixed(v) => {
                let projected = v - tangent * tangent.dot(v);
                let norm_squared = projected.norm_squared();
                if norm_squared <= tolerance {
                    minor_axis_perpendicular(tangent)
                } else {
                    projected / norm_squared.sqrt()
                }
            }
        }
    }
}

fn minor_axis_perpendicular<T: FloatingPoint>(t: &Vector3<T>) -> Vector3<T> {
    let (ax, ay, az) = (t.x.abs(), t.y.abs(), t.z.abs());
    let v = if ax <= ay && ax <= az {
        Vector3::new(T::zero(), -t.z, t.y)
    } else if ay <= az {
        Vector3::new(-t.z, T::zero(), t.x)
    } else {
        Vector3::new(-t.y, t.x, T::zero())
    };
    v.normalize()
}

/// Options for sampling a frame field
#[derive(Debug, Clone, PartialEq)]
pub struct FrameFieldOption<T> {
    /// Squared length below which a reflection denominator or a velocity counts as zero
    tolerance: T,
    seed: ReferenceSeed<T>,
    /// On looped paths, spread the roll mismatch between the last and first frames
    /// evenly along the field so the sweep closes without a seam
    close_loop: bool,
}

impl<T: FloatingPoint> Default for FrameFieldOption<T> {
    fn default() -> Self {
        Self {
            tolerance: T::degenerate_tolerance(),
            seed: Default::default(),
            close_loop: false,
        }
    }
}

impl<T: FloatingPoint> FrameFieldOption<T> {
    pub fn tolerance(&self) -> T {
        self.tolerance
    }

    pub fn seed(&self) -> &ReferenceSeed<T> {
        &self.seed
    }

    pub fn close_loop(&self) -> bool {
        self.close_loop
    }

    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_seed(mut self, seed: ReferenceSeed<T>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_close_loop(mut self, close_loop: bool) -> Self {
        self.close_loop = close_loop;
        self
    }
}
