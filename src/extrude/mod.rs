pub mod path_extruder;
pub mod path_extruder_option;
pub use path_extruder::*;
pub use path_extruder_option::*;

#[cfg(test)]
mod tests;
