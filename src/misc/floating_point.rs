use nalgebra::RealField;
use num_traits::ToPrimitive;

/// Trait for floating point types (f32, f64)
/// Mainly used to identify the type of the field in nalgebra
pub trait FloatingPoint: RealField + ToPrimitive + Copy + 'static {
    /// Squared length below which a vector is treated as zero
    fn degenerate_tolerance() -> Self;
}

impl FloatingPoint for f32 {
    fn degenerate_tolerance() -> Self {
        1e-10
    }
}

impl FloatingPoint for f64 {
    fn degenerate_tolerance() -> Self {
        1e-18
    }
}
