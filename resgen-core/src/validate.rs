//! Validation trait implemented by generated types.

use crate::error::ValidationError;

/// Structural validation of a value against its schema constraints.
///
/// Generated implementations check fields in declaration order and stop at
/// the first violation.
pub trait Validate {
    /// Validates the value.
    ///
    /// # Errors
    /// Returns the first constraint violation found.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Returns true if the value passes validation.
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl<T: Validate + ?Sized> Validate for Box<T> {
    fn validate(&self) -> Result<(), ValidationError> {
        (**self).validate()
    }
}

impl<T: Validate + ?Sized> Validate for &T {
    fn validate(&self) -> Result<(), ValidationError> {
        (**self).validate()
    }
}

/// Validates every item of a sequence, wrapping the first failure with the
/// field name and index.
///
/// # Errors
/// Returns `ValidationError::Item` for the first failing item.
pub fn validate_items<T: Validate>(field: &'static str, items: &[T]) -> Result<(), ValidationError> {
    for (index, item) in items.iter().enumerate() {
        item.validate()
            .map_err(|err| ValidationError::item(field, index, err))?;
    }
    Ok(())
}
