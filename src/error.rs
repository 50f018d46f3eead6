use thiserror::Error;

/// Contract violations raised by paths, frame fields and extruders.
///
/// Fallible operations return `anyhow::Result`; the underlying cause can be
/// recovered with `error.downcast_ref::<PathError>()`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("Expected index to be less than {count}, but was {index}")]
    IndexOutOfRange { index: usize, count: usize },
    #[error("Invalid continuity value {0}")]
    InvalidContinuity(u8),
    #[error("At least 2 pass points are required, but the path has {count}")]
    InsufficientPoints { count: usize },
    #[error("Velocity at t = {t} has zero length, the direction is undefined")]
    DegenerateVelocity { t: f64 },
    #[error("No sample of the path has a usable tangent")]
    DegenerateGeometry,
    #[error("A profile requires at least 2 points, but {count} were given")]
    InsufficientProfilePoints { count: usize },
    #[error("Path parameter must be finite, but was {t}")]
    NonFiniteParameter { t: f64 },
}
