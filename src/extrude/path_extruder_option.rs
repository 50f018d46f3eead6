use crate::misc::FloatingPoint;

/// Smallest number of samples around a profile
pub const MIN_RESOLUTION: usize = 3;

/// Smallest number of rings linked along a path
pub const MIN_SUBDIVISIONS: usize = 1;

/// Smallest number of rings swept around a looped path
pub const MIN_LOOP_SUBDIVISIONS: usize = 3;

/// Sweep option for [`PathExtruder`](crate::extrude::PathExtruder)
#[derive(Debug, Clone, PartialEq)]
pub struct PathExtruderOption<T> {
    /// Number of samples taken around the profile
    resolution: usize,
    /// Number of uniform parameter steps along the path
    subdivisions: usize,
    /// Scale applied to the profile before it is placed in a frame
    uniform_scale: T,
}

impl<T: FloatingPoint> Default for PathExtruderOption<T> {
    fn default() -> Self {
        Self {
            resolution: 4,
            subdivisions: 10,
            uniform_scale: T::one(),
        }
    }
}

impl<T: FloatingPoint> PathExtruderOption<T> {
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn subdivisions(&self) -> usize {
        self.subdivisions
    }

    pub fn uniform_scale(&self) -> T {
        self.uniform_scale
    }

    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_subdivisions(mut self, subdivisions: usize) -> Self {
        self.subdivisions = subdivisions;
        self
    }

    pub fn with_uniform_scale(mut self, scale: T) -> Self {
        self.uniform_scale = scale;
        self
    }

    /// Raise every value below its minimum to that minimum
    pub fn clamped(self) -> Self {
        let resolution = if self.resolution < MIN_RESOLUTION {
            log::warn!(
                "resolution {} is below {}, clamped",
                self.resolution,
                MIN_RESOLUTION
            );
            MIN_RESOLUTION
        } else {
            self.resolution
        };
        let subdivisions = if self.subdivisions < MIN_SUBDIVISIONS {
            log::warn!(
                "subdivisions {} is below {}, clamped",
                self.subdivisions,
                MIN_SUBDIVISIONS
            );
            MIN_SUBDIVISIONS
        } else {
            self.subdivisions
        };
        // NaN compares false and is clamped as well
        let uniform_scale = if self.uniform_scale >= T::zero() {
            self.uniform_scale
        } else {
            log::warn!("uniform scale {:?} is negative, clamped to 0", self.uniform_scale);
            T::zero()
        };
        Self {
            resolution,
            subdivisions,
            uniform_scale,
        }
    }
}
