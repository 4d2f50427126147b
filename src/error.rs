use std::error::Error;
use std::fmt;

use crate::buffer::DType;

/// Failure kinds raised when mapping an array buffer into a matrix view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// Buffer elements are not 32-bit floats.
    TypeMismatch { found: DType },
    /// Buffer is neither one- nor two-dimensional.
    UnsupportedRank { rank: usize },
    /// Buffer elements are not consecutive in a recognized order.
    NonContiguousLayout,
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::TypeMismatch { found } => {
                write!(f, "can only handle buffers of f32 values, got {}", found)
            }
            BridgeError::UnsupportedRank { rank } => write!(
                f,
                "can only handle one- or two-dimensional buffers, got rank {}",
                rank
            ),
            BridgeError::NonContiguousLayout => {
                write!(f, "buffer data must be stored in contiguous memory")
            }
        }
    }
}

impl Error for BridgeError {}
