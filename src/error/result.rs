//! Result type alias for superego operations.

use super::superego_error::SuperegoError;

/// Type alias for Results using SuperegoError.
pub type SuperegoResult<T> = Result<T, SuperegoError>;
