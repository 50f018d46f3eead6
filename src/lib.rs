mod curve;
mod error;
mod extrude;
mod frame;
mod misc;
mod polygon_mesh;
mod profile;

pub mod prelude {
    pub use crate::curve::*;
    pub use crate::error::*;
    pub use crate::extrude::*;
    pub use crate::frame::*;
    pub use crate::misc::*;
    pub use crate::polygon_mesh::*;
    pub use crate::profile::*;
}
