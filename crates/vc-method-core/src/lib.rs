pub mod error;
pub mod format;
pub mod types;

#[cfg(feature = "venture")]
pub mod venture;

pub use error::VcMethodError;
pub use types::*;

/// Standard result type for the fallible edges of the crate
pub type VcMethodResult<T> = Result<T, VcMethodError>;
