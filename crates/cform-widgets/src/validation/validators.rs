#![forbid(unsafe_code)]

//! Core validation types and built-in validators.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

// ---------------------------------------------------------------------------
// Error Codes
// ---------------------------------------------------------------------------

/// Error code for required field validation.
pub const ERROR_CODE_REQUIRED: &str = "required";
/// Error code for minimum length validation.
pub const ERROR_CODE_MIN_LENGTH: &str = "too_short";
/// Error code for email validation.
pub const ERROR_CODE_EMAIL: &str = "email";

/// Message template for [`Required`].
pub const MESSAGE_REQUIRED: &str = "{path} is a required field";
/// Message template for [`MinLength`].
pub const MESSAGE_MIN_LENGTH: &str = "{path} must be at least {min} characters";
/// Message template for [`Email`].
pub const MESSAGE_EMAIL: &str = "{path} must be a valid email address";

/// Parameter substituted with the field key by [`FieldRule`](super::FieldRule).
pub const PARAM_PATH: &str = "path";

// ---------------------------------------------------------------------------
// ErrorKind
// ---------------------------------------------------------------------------

/// Classification of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required value is missing.
    MissingRequiredField,
    /// The value is shorter than allowed.
    TooShort,
    /// The value does not have the expected shape.
    InvalidFormat,
}

impl ErrorKind {
    /// Map a stable error code to its kind.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            ERROR_CODE_REQUIRED => Some(Self::MissingRequiredField),
            ERROR_CODE_MIN_LENGTH => Some(Self::TooShort),
            ERROR_CODE_EMAIL => Some(Self::InvalidFormat),
            _ => None,
        }
    }

    /// The stable code for this kind.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::MissingRequiredField => ERROR_CODE_REQUIRED,
            Self::TooShort => ERROR_CODE_MIN_LENGTH,
            Self::InvalidFormat => ERROR_CODE_EMAIL,
        }
    }
}

// ---------------------------------------------------------------------------
// ValidationError
// ---------------------------------------------------------------------------

/// A validation error with code, message, and interpolation parameters.
///
/// The `code` field is a stable identifier for programmatic handling.
/// The `message` field is a template rendered by [`format_message`](Self::format_message).
/// The `params` field contains key-value pairs for message interpolation.
///
/// # Example
///
/// ```rust
/// use cform_widgets::validation::ValidationError;
///
/// let error = ValidationError::new("too_short", "{path} must be at least {min} characters")
///     .with_param("path", "firstName")
///     .with_param("min", 5);
///
/// assert_eq!(error.format_message(), "firstName must be at least 5 characters");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Stable error code for programmatic handling.
    pub code: &'static str,
    /// Human-readable error message template.
    pub message: String,
    /// Parameters for message interpolation.
    pub params: HashMap<String, String>,
}

impl ValidationError {
    /// Create a new validation error with the given code and message.
    #[must_use]
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            params: HashMap::new(),
        }
    }

    /// Add a parameter for message interpolation.
    ///
    /// Parameters are substituted in the message using `{key}` syntax.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    /// Format the message with parameter substitution.
    ///
    /// Replaces `{key}` patterns in the message with corresponding parameter values.
    #[must_use]
    pub fn format_message(&self) -> String {
        let mut result = self.message.clone();
        for (key, value) in &self.params {
            result = result.replace(&format!("{{{key}}}"), value);
        }
        result
    }

    /// The taxonomy entry for this error's code, if it is a built-in one.
    #[must_use]
    pub fn kind(&self) -> Option<ErrorKind> {
        ErrorKind::from_code(self.code)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_message())
    }
}

impl std::error::Error for ValidationError {}

// ---------------------------------------------------------------------------
// ValidationResult
// ---------------------------------------------------------------------------

/// The result of a validation operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValidationResult {
    /// The value is valid.
    #[default]
    Valid,
    /// The value is invalid with an error.
    Invalid(ValidationError),
}

impl ValidationResult {
    /// Returns `true` if the result is `Valid`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns `true` if the result is `Invalid`.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    /// Returns the error if the result is `Invalid`, otherwise `None`.
    #[must_use]
    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            Self::Valid => None,
            Self::Invalid(e) => Some(e),
        }
    }

    /// Consume the result, returning the error if any.
    #[must_use]
    pub fn into_error(self) -> Option<ValidationError> {
        match self {
            Self::Valid => None,
            Self::Invalid(e) => Some(e),
        }
    }

    /// Returns the error message if the result is `Invalid`, otherwise `None`.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.error().map(ValidationError::format_message)
    }

    /// Combine two results, returning the first error if any.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match self {
            Self::Valid => other,
            Self::Invalid(_) => self,
        }
    }

    /// Combine two results, returning `Valid` if either is valid.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match self {
            Self::Valid => Self::Valid,
            Self::Invalid(_) => other,
        }
    }
}

// ---------------------------------------------------------------------------
// Validator Trait
// ---------------------------------------------------------------------------

/// A trait for validating values of type `T`.
///
/// Validators are pure and composable through [`And`] and [`All`].
pub trait Validator<T: ?Sized>: Send + Sync {
    /// Validate the given value.
    fn validate(&self, value: &T) -> ValidationResult;

    /// Return the default error message template for this validator.
    fn error_message(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Built-in Validators
// ---------------------------------------------------------------------------

/// Validates that a string is not empty.
///
/// Only the empty string is missing by default; whitespace counts as
/// content unless [`trimmed`](Self::trimmed) is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct Required {
    /// If `true`, whitespace-only strings are considered empty.
    pub trim: bool,
}

impl Required {
    /// Create a new `Required` validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat whitespace-only strings as missing.
    #[must_use]
    pub fn trimmed(mut self) -> Self {
        self.trim = true;
        self
    }
}

impl Validator<str> for Required {
    fn validate(&self, value: &str) -> ValidationResult {
        let is_empty = if self.trim {
            value.trim().is_empty()
        } else {
            value.is_empty()
        };

        if is_empty {
            ValidationResult::Invalid(ValidationError::new(ERROR_CODE_REQUIRED, MESSAGE_REQUIRED))
        } else {
            ValidationResult::Valid
        }
    }

    fn error_message(&self) -> &str {
        MESSAGE_REQUIRED
    }
}

/// Validates that a string has at least `min` characters.
#[derive(Debug, Clone, Copy)]
pub struct MinLength {
    /// Minimum number of characters required.
    pub min: usize,
}

impl MinLength {
    /// Create a new `MinLength` validator.
    #[must_use]
    pub fn new(min: usize) -> Self {
        Self { min }
    }
}

impl Validator<str> for MinLength {
    fn validate(&self, value: &str) -> ValidationResult {
        let len = value.chars().count();
        if len < self.min {
            ValidationResult::Invalid(
                ValidationError::new(ERROR_CODE_MIN_LENGTH, MESSAGE_MIN_LENGTH)
                    .with_param("min", self.min)
                    .with_param("actual", len),
            )
        } else {
            ValidationResult::Valid
        }
    }

    fn error_message(&self) -> &str {
        MESSAGE_MIN_LENGTH
    }
}

/// Validates that a string looks like `local@domain.tld`.
///
/// The value must contain no whitespace and exactly one `@` with a
/// non-empty local part. The domain must contain a `.` and every
/// dot-separated label must be non-empty. Empty input is valid; pair with
/// [`Required`] to demand a value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Email;

impl Email {
    /// Create a new `Email` validator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn is_well_formed(value: &str) -> bool {
        if value.chars().any(char::is_whitespace) {
            return false;
        }
        let Some((local, domain)) = value.split_once('@') else {
            return false;
        };
        if local.is_empty() || domain.contains('@') || !domain.contains('.') {
            return false;
        }
        domain.split('.').all(|label| !label.is_empty())
    }
}

impl Validator<str> for Email {
    fn validate(&self, value: &str) -> ValidationResult {
        if value.is_empty() || Self::is_well_formed(value) {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(ValidationError::new(ERROR_CODE_EMAIL, MESSAGE_EMAIL))
        }
    }

    fn error_message(&self) -> &str {
        MESSAGE_EMAIL
    }
}

// ---------------------------------------------------------------------------
// Composition Validators
// ---------------------------------------------------------------------------

/// Combines two validators with AND logic.
///
/// The second validator only runs when the first passes, so at most one
/// error is reported.
#[derive(Debug, Clone)]
pub struct And<A, B> {
    /// First validator.
    pub first: A,
    /// Second validator.
    pub second: B,
}

impl<A, B> And<A, B> {
    /// Create a new `And` validator.
    #[must_use]
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<T: ?Sized, A, B> Validator<T> for And<A, B>
where
    A: Validator<T>,
    B: Validator<T>,
{
    fn validate(&self, value: &T) -> ValidationResult {
        match self.first.validate(value) {
            ValidationResult::Valid => self.second.validate(value),
            err => err,
        }
    }

    fn error_message(&self) -> &str {
        self.first.error_message()
    }
}

/// Combines multiple validators with AND logic.
///
/// Validators run in order; the first failure wins.
pub struct All<T: ?Sized> {
    validators: Vec<Box<dyn Validator<T>>>,
}

impl<T: ?Sized> All<T> {
    /// Create a new `All` validator with the given validators.
    #[must_use]
    pub fn new(validators: Vec<Box<dyn Validator<T>>>) -> Self {
        Self { validators }
    }

    /// Number of chained validators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// True if no validators are chained (always valid).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl<T: ?Sized> Validator<T> for All<T> {
    fn validate(&self, value: &T) -> ValidationResult {
        for validator in &self.validators {
            let result = validator.validate(value);
            if result.is_invalid() {
                return result;
            }
        }
        ValidationResult::Valid
    }

    fn error_message(&self) -> &str {
        self.validators
            .first()
            .map_or("Validation failed", |v| v.error_message())
    }
}

impl<T: ?Sized> fmt::Debug for All<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("All")
            .field(
                "validators",
                &format!("[{} validators]", self.validators.len()),
            )
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// A builder for constructing validators fluently.
///
/// # Example
///
/// ```rust
/// use cform_widgets::validation::{ValidatorBuilder, Validator};
///
/// let validator = ValidatorBuilder::<str>::new()
///     .required()
///     .min_length(5)
///     .build();
///
/// assert!(validator.validate("Ashish").is_valid());
/// assert!(!validator.validate("abc").is_valid());
/// ```
pub struct ValidatorBuilder<T: ?Sized> {
    validators: Vec<Box<dyn Validator<T>>>,
    _phantom: PhantomData<T>,
}

impl<T: ?Sized> Default for ValidatorBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> ValidatorBuilder<T> {
    /// Create a new empty validator builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
            _phantom: PhantomData,
        }
    }

    /// Add a custom validator.
    #[must_use]
    pub fn custom(mut self, validator: impl Validator<T> + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Build the combined validator.
    #[must_use]
    pub fn build(self) -> All<T> {
        All::new(self.validators)
    }
}

impl ValidatorBuilder<str> {
    /// Add a `Required` validator.
    #[must_use]
    pub fn required(self) -> Self {
        self.custom(Required::new())
    }

    /// Add a `MinLength` validator.
    #[must_use]
    pub fn min_length(self, min: usize) -> Self {
        self.custom(MinLength::new(min))
    }

    /// Add an `Email` validator.
    #[must_use]
    pub fn email(self) -> Self {
        self.custom(Email::new())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
