//! Array-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during array operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrayError {
    /// A positional access outside the live range of the array.
    ///
    /// Raised by checked accessors ([`Array::at`]) when `index >= len`,
    /// and by [`Array::insert`] when `index > len`. A rejected call
    /// leaves the array untouched.
    ///
    /// [`Array::at`]: crate::Array::at
    /// [`Array::insert`]: crate::Array::insert
    OutOfBounds {
        /// The offending index.
        index: usize,
        /// The array's length at the time of the call.
        len: usize,
    },
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { index, len } => {
                write!(f, "index {index} is out of bounds for an array of length {len}")
            }
        }
    }
}

impl Error for ArrayError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_index_and_length() {
        let err = ArrayError::OutOfBounds { index: 7, len: 3 };
        assert_eq!(
            err.to_string(),
            "index 7 is out of bounds for an array of length 3"
        );
    }
}
