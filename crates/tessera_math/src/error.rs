/// Returned when a value is built from a scalar slice holding fewer scalars
/// than the target type has components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("expected at least {expected} scalars, got {actual}")]
pub struct SliceLengthError {
    pub expected: usize,
    pub actual: usize,
}

pub(crate) fn check_len<T>(slice: &[T], expected: usize) -> Result<(), SliceLengthError> {
    if slice.len() < expected {
        return Err(SliceLengthError {
            expected,
            actual: slice.len(),
        });
    }

    Ok(())
}
