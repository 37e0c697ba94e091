#![forbid(unsafe_code)]

//! Form validation framework.
//!
//! Validators are small pure values implementing [`Validator`]. They compose
//! with [`And`] / [`All`] or through [`ValidatorBuilder`], and report at most
//! one [`ValidationError`] per value. A [`FieldRule`] binds a validator
//! chain to a field key so message templates such as
//! `"{path} is a required field"` render with the field's name.
//!
//! # Example
//!
//! ```rust
//! use cform_widgets::validation::{FieldRule, ValidatorBuilder};
//!
//! let rule = FieldRule::new(
//!     "firstName",
//!     ValidatorBuilder::<str>::new().required().min_length(5).build(),
//! );
//!
//! let err = rule.check("abc").map(|e| e.format_message());
//! assert_eq!(err.as_deref(), Some("firstName must be at least 5 characters"));
//! assert!(rule.check("Ashish").is_none());
//! ```

mod validators;

pub use validators::{
    All, And, ERROR_CODE_EMAIL, ERROR_CODE_MIN_LENGTH, ERROR_CODE_REQUIRED, Email, ErrorKind,
    MESSAGE_EMAIL, MESSAGE_MIN_LENGTH, MESSAGE_REQUIRED, MinLength, PARAM_PATH, Required,
    ValidationError, ValidationResult, Validator, ValidatorBuilder,
};

/// A field key paired with the validator chain applied to its value.
#[derive(Debug)]
pub struct FieldRule {
    path: &'static str,
    validator: All<str>,
}

impl FieldRule {
    /// Bind `validator` to the field named `path`.
    #[must_use]
    pub fn new(path: &'static str, validator: All<str>) -> Self {
        Self { path, validator }
    }

    /// A rule for a field that is always valid.
    #[must_use]
    pub fn optional(path: &'static str) -> Self {
        Self::new(path, All::new(Vec::new()))
    }

    /// The field key used for `{path}` in messages.
    #[must_use]
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// Whether the rule can fail at all.
    #[must_use]
    pub fn is_constrained(&self) -> bool {
        !self.validator.is_empty()
    }

    /// Run the chain against `value`.
    #[must_use]
    pub fn validate(&self, value: &str) -> ValidationResult {
        match self.validator.validate(value) {
            ValidationResult::Valid => ValidationResult::Valid,
            ValidationResult::Invalid(err) => {
                ValidationResult::Invalid(err.with_param(PARAM_PATH, self.path))
            }
        }
    }

    /// The first failure for `value`, if any.
    #[must_use]
    pub fn check(&self, value: &str) -> Option<ValidationError> {
        self.validate(value).into_error()
    }
}
