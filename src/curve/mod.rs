pub mod continuity;
pub mod cubic_path;
mod observer;
pub mod pass_point;
pub use continuity::*;
pub use cubic_path::*;
pub use observer::ObserverId;
pub use pass_point::*;
