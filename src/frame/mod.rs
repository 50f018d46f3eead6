pub mod frame_field;
pub mod frame_field_option;
pub mod path_frame;
pub use frame_field::*;
pub use frame_field_option::*;
pub use path_frame::*;
