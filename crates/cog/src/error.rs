//! Error type shared by every container in the crate.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CogError {
    /// An index fell outside the valid range for the operation.
    ///
    /// Item access accepts `[-len, len)`, insert positions accept `[-len, len]`.
    #[error("{container} out of bounds: index={index}, len={len}")]
    OutOfBounds {
        container: &'static str,
        index: isize,
        len: usize,
    },
    /// `remove()` was called on a cursor whose current element is already gone.
    #[error("{container} can't remove an unlinked item")]
    UnlinkedRemove { container: &'static str },
}

/// Normalizes an item index (`[-len, len)`) to `0..len`.
pub(crate) fn check_item_index(
    container: &'static str,
    index: isize,
    len: usize,
) -> Result<usize, CogError> {
    let n = len as isize;
    if index >= n || index < -n {
        return Err(CogError::OutOfBounds {
            container,
            index,
            len,
        });
    }
    let index = if index < 0 { index + n } else { index };
    Ok(index as usize)
}

/// Normalizes an insert position (`[-len, len]`) to `0..=len`.
pub(crate) fn check_size_index(
    container: &'static str,
    index: isize,
    len: usize,
) -> Result<usize, CogError> {
    let n = len as isize;
    if index > n || index < -n {
        return Err(CogError::OutOfBounds {
            container,
            index,
            len,
        });
    }
    let index = if index < 0 { index + n } else { index };
    Ok(index as usize)
}

/// Unwraps a bounds check, panicking with the error text.
#[track_caller]
pub(crate) fn or_panic<T>(result: Result<T, CogError>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("{e}"),
    }
}
