pub mod floating_point;
pub mod space_transform;

pub use floating_point::*;
pub use space_transform::*;
