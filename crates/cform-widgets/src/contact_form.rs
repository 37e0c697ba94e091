#![forbid(unsafe_code)]

//! The contact form component.
//!
//! Four text inputs (first name, last name, email, message), a submit
//! button, per-field error text, and a "You Submitted:" region showing the
//! values of the most recent successful submission.
//!
//! State lives in [`ContactForm`], which implements [`Model`]. Rendering is
//! a pure function of the state ([`project`]), re-run on every observation.
//!
//! # Example
//!
//! ```
//! use cform_widgets::contact_form::{ContactForm, Field, FormPhase, SubmitOutcome};
//!
//! let mut form = ContactForm::new();
//! form.set_value(Field::FirstName, "Ashish");
//! form.set_value(Field::LastName, "Desai");
//! form.set_value(Field::Email, "desai@email.com");
//!
//! assert_eq!(form.submit(), SubmitOutcome::Accepted);
//! assert_eq!(form.phase(), FormPhase::Submitted);
//! assert_eq!(form.snapshot().map(|s| s.get(Field::FirstName)), Some("Ashish"));
//! assert_eq!(form.values().get(Field::FirstName), "");
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use cform_core::event::{Event, KeyCode, KeyEvent};
use cform_render::{Frame, Node, Role};
use cform_runtime::program::{Cmd, Model};
use unicode_segmentation::UnicodeSegmentation;

use crate::validation::{FieldRule, ValidationError, ValidatorBuilder};

/// Element id of the submit button.
pub const SUBMIT_ID: &str = "submit";
/// Test id carried by every inline error element.
pub const ERROR_TEST_ID: &str = "error";
/// Heading text.
pub const TITLE: &str = "Contact Form";
/// Label of the submitted-values region.
pub const SUBMITTED_LABEL: &str = "You Submitted:";
/// Default minimum character count for the first name.
pub const DEFAULT_FIRST_NAME_MIN_LEN: usize = 5;

/// Environment variable selecting the [`ValidationMode`].
pub const ENV_VALIDATION_MODE: &str = "CFORM_VALIDATION_MODE";
/// Environment variable overriding the first-name minimum length.
pub const ENV_FIRST_NAME_MIN: &str = "CFORM_FIRST_NAME_MIN";

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// One of the four form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Message,
}

impl Field {
    /// All fields in display and focus order.
    pub const ALL: [Field; 4] = [Self::FirstName, Self::LastName, Self::Email, Self::Message];

    /// Fields that must pass validation before a submit succeeds.
    pub const REQUIRED: [Field; 3] = [Self::FirstName, Self::LastName, Self::Email];

    /// Field key, used as `{path}` in error messages and as the element id.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Message => "message",
        }
    }

    /// Input label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name*",
            Self::LastName => "Last Name*",
            Self::Email => "Email*",
            Self::Message => "Message",
        }
    }

    /// Label shown next to the submitted value.
    #[must_use]
    pub const fn display_label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name:",
            Self::LastName => "Last Name:",
            Self::Email => "Email:",
            Self::Message => "Message:",
        }
    }

    /// Test id of the submitted-value element.
    #[must_use]
    pub const fn display_test_id(self) -> &'static str {
        match self {
            Self::FirstName => "firstnameDisplay",
            Self::LastName => "lastnameDisplay",
            Self::Email => "emailDisplay",
            Self::Message => "messageDisplay",
        }
    }

    /// Whether the field takes part in submit gating.
    #[must_use]
    pub const fn is_required(self) -> bool {
        !matches!(self, Self::Message)
    }

    /// Resolve an element id back to its field.
    #[must_use]
    pub fn from_element_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == id)
    }

    const fn index(self) -> usize {
        match self {
            Self::FirstName => 0,
            Self::LastName => 1,
            Self::Email => 2,
            Self::Message => 3,
        }
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// FormValues / ValidationErrors / SubmittedSnapshot
// ---------------------------------------------------------------------------

/// Current value of every input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub message: String,
}

impl FormValues {
    /// Empty values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `field`.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    /// Mutable value of `field`.
    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        }
    }

    /// Replace the value of `field`.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.get_mut(field) = value.into();
    }

    /// Reset every value to the empty string.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when every value is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| self.get(*f).is_empty())
    }
}

/// Current error per validated field. At most one entry per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    entries: BTreeMap<Field, ValidationError>,
}

impl ValidationErrors {
    /// Error for `field`, if it is currently failing.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&ValidationError> {
        self.entries.get(&field)
    }

    /// Rendered message for `field`.
    #[must_use]
    pub fn message(&self, field: Field) -> Option<String> {
        self.get(field).map(ValidationError::format_message)
    }

    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.entries.contains_key(&field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Errors in field order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &ValidationError)> {
        self.entries.iter().map(|(f, e)| (*f, e))
    }

    fn set(&mut self, field: Field, error: Option<ValidationError>) {
        match error {
            Some(err) => {
                self.entries.insert(field, err);
            }
            None => {
                self.entries.remove(&field);
            }
        }
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Values captured by the most recent successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedSnapshot {
    values: FormValues,
}

impl SubmittedSnapshot {
    fn capture(values: &FormValues) -> Self {
        Self {
            values: values.clone(),
        }
    }

    /// Captured value of `field`.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        self.values.get(field)
    }

    /// All captured values.
    #[must_use]
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Fields shown in the submitted region. An empty message is omitted.
    pub fn displayed_fields(&self) -> impl Iterator<Item = Field> + '_ {
        Field::ALL
            .into_iter()
            .filter(|f| f.is_required() || !self.get(*f).is_empty())
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Validator chain per field.
#[derive(Debug)]
pub struct FormRules {
    first_name: FieldRule,
    last_name: FieldRule,
    email: FieldRule,
    message: FieldRule,
}

impl Default for FormRules {
    fn default() -> Self {
        Self::new(DEFAULT_FIRST_NAME_MIN_LEN)
    }
}

impl FormRules {
    /// Build the rules with the given first-name minimum length.
    #[must_use]
    pub fn new(first_name_min_len: usize) -> Self {
        Self {
            first_name: FieldRule::new(
                Field::FirstName.key(),
                ValidatorBuilder::<str>::new()
                    .required()
                    .min_length(first_name_min_len)
                    .build(),
            ),
            last_name: FieldRule::new(
                Field::LastName.key(),
                ValidatorBuilder::<str>::new().required().build(),
            ),
            email: FieldRule::new(
                Field::Email.key(),
                ValidatorBuilder::<str>::new().required().email().build(),
            ),
            message: FieldRule::optional(Field::Message.key()),
        }
    }

    /// Rule bound to `field`.
    #[must_use]
    pub fn rule(&self, field: Field) -> &FieldRule {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    /// First failure of `value` against `field`'s rule.
    #[must_use]
    pub fn check(&self, field: Field, value: &str) -> Option<ValidationError> {
        self.rule(field).check(value)
    }
}

/// Validate `value` for `field` with the default rules.
///
/// ```
/// use cform_widgets::contact_form::{validate, Field};
///
/// let err = validate(Field::FirstName, "abc").map(|e| e.to_string());
/// assert_eq!(err.as_deref(), Some("firstName must be at least 5 characters"));
/// assert!(validate(Field::Message, "").is_none());
/// ```
#[must_use]
pub fn validate(field: Field, value: &str) -> Option<ValidationError> {
    FormRules::default().check(field, value)
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// When field errors are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Validate a field on every change to it.
    #[default]
    RealTime,
    /// Validate only on submit; later edits refresh fields already validated.
    OnSubmit,
}

impl ValidationMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RealTime => "realtime",
            Self::OnSubmit => "onsubmit",
        }
    }
}

impl FromStr for ValidationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "realtime" | "real-time" => Ok(Self::RealTime),
            "onsubmit" | "on-submit" => Ok(Self::OnSubmit),
            _ => Err(ConfigError::InvalidValidationMode(s.to_string())),
        }
    }
}

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Unknown validation mode name.
    InvalidValidationMode(String),
    /// Minimum length is not a positive integer.
    InvalidMinLength(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValidationMode(value) => write!(
                f,
                "invalid validation mode {value:?} (expected \"realtime\" or \"onsubmit\")"
            ),
            Self::InvalidMinLength(value) => {
                write!(f, "invalid minimum length {value:?} (expected an integer >= 1)")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Contact form configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactFormConfig {
    /// When errors are computed.
    pub validation_mode: ValidationMode,
    /// Minimum character count for the first name.
    pub first_name_min_len: usize,
}

impl Default for ContactFormConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactFormConfig {
    /// Real-time validation, first name of at least 5 characters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            validation_mode: ValidationMode::RealTime,
            first_name_min_len: DEFAULT_FIRST_NAME_MIN_LEN,
        }
    }

    /// Set the validation mode.
    #[must_use]
    pub const fn validation_mode(mut self, mode: ValidationMode) -> Self {
        self.validation_mode = mode;
        self
    }

    /// Set the first-name minimum length (minimum 1).
    #[must_use]
    pub const fn first_name_min_len(mut self, min: usize) -> Self {
        self.first_name_min_len = if min == 0 { 1 } else { min };
        self
    }

    /// Defaults overridden by `CFORM_VALIDATION_MODE` and `CFORM_FIRST_NAME_MIN`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by values from `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::new();
        if let Some(mode) = lookup(ENV_VALIDATION_MODE) {
            config.validation_mode = mode.parse()?;
        }
        if let Some(raw) = lookup(ENV_FIRST_NAME_MIN) {
            let min = raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n >= 1)
                .ok_or_else(|| ConfigError::InvalidMinLength(raw.clone()))?;
            config.first_name_min_len = min;
        }
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// Messages handled by [`ContactForm`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Keyboard input for the focused input.
    Key(KeyEvent),
    /// Pointer activation of an element id.
    Click(String),
    /// Text pasted into the focused input.
    Paste(String),
    /// Host window focus change.
    HostFocus(bool),
    /// Move focus to a field.
    Focus(Field),
    /// Replace a field's value.
    Input { field: Field, value: String },
    /// Attempt submission.
    Submit,
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(key) => Self::Key(key),
            Event::Click(click) => Self::Click(click.target),
            Event::Paste(paste) => Self::Paste(paste.text),
            Event::Focus(gained) => Self::HostFocus(gained),
        }
    }
}

/// Submission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Editing,
    Submitted,
}

/// Result of a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Values were captured into the snapshot.
    Accepted,
    /// One or more required fields failed.
    Rejected { errors: usize },
}

// ---------------------------------------------------------------------------
// ContactForm
// ---------------------------------------------------------------------------

/// Contact form state.
#[derive(Debug)]
pub struct ContactForm {
    config: ContactFormConfig,
    rules: FormRules,
    values: FormValues,
    errors: ValidationErrors,
    /// Fields whose errors are kept current.
    validated: BTreeSet<Field>,
    snapshot: Option<SubmittedSnapshot>,
    phase: FormPhase,
    focused: Option<Field>,
    /// Cursor within the focused input (grapheme index).
    cursor: usize,
    submissions: u64,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    /// A form with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ContactFormConfig::default())
    }

    /// A form with an explicit configuration.
    #[must_use]
    pub fn with_config(config: ContactFormConfig) -> Self {
        Self {
            rules: FormRules::new(config.first_name_min_len),
            config,
            values: FormValues::new(),
            errors: ValidationErrors::default(),
            validated: BTreeSet::new(),
            snapshot: None,
            phase: FormPhase::Editing,
            focused: None,
            cursor: 0,
            submissions: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ContactFormConfig {
        &self.config
    }

    #[must_use]
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    #[must_use]
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<&SubmittedSnapshot> {
        self.snapshot.as_ref()
    }

    #[must_use]
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    #[must_use]
    pub fn focused(&self) -> Option<Field> {
        self.focused
    }

    /// Cursor position in the focused input, in graphemes.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of accepted submissions.
    #[must_use]
    pub fn submissions(&self) -> u64 {
        self.submissions
    }

    /// Focus `field` with the cursor at the end of its value.
    pub fn focus(&mut self, field: Field) {
        self.focused = Some(field);
        self.cursor = grapheme_count(self.values.get(field));
    }

    /// Drop input focus.
    pub fn blur(&mut self) {
        self.focused = None;
        self.cursor = 0;
    }

    /// Replace the value of `field`, as a host input change would.
    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        self.values.set(field, value);
        if self.focused == Some(field) {
            self.cursor = grapheme_count(self.values.get(field));
        }
        self.value_changed(field);
    }

    /// Validate every field and, if none fails, capture the snapshot.
    pub fn submit(&mut self) -> SubmitOutcome {
        for field in Field::ALL {
            self.validated.insert(field);
            self.revalidate(field);
        }

        if !self.errors.is_empty() {
            let errors = self.errors.len();
            cform_core::debug!(errors, "contact form submission rejected");
            return SubmitOutcome::Rejected { errors };
        }

        self.snapshot = Some(SubmittedSnapshot::capture(&self.values));
        self.values.clear();
        self.errors.clear();
        self.validated.clear();
        self.blur();
        self.phase = FormPhase::Submitted;
        self.submissions += 1;
        cform_core::info!(
            submissions = self.submissions,
            "contact form submission accepted"
        );
        SubmitOutcome::Accepted
    }

    fn value_changed(&mut self, field: Field) {
        if self.phase == FormPhase::Submitted {
            self.phase = FormPhase::Editing;
        }
        if self.config.validation_mode == ValidationMode::RealTime {
            self.validated.insert(field);
        }
        if self.validated.contains(&field) {
            self.revalidate(field);
        }
    }

    fn revalidate(&mut self, field: Field) {
        let error = self.rules.check(field, self.values.get(field));
        if let Some(err) = &error {
            cform_core::debug!(
                field = field.key(),
                code = err.code,
                "field failed validation"
            );
        } else {
            cform_core::trace!(field = field.key(), "field valid");
        }
        self.errors.set(field, error);
    }

    fn submit_cmd(&mut self) -> Cmd<Msg> {
        match self.submit() {
            SubmitOutcome::Accepted => Cmd::log("submission accepted"),
            SubmitOutcome::Rejected { errors } => {
                Cmd::log(format!("submission rejected: {errors} invalid field(s)"))
            }
        }
    }

    fn handle_click(&mut self, target: &str) -> Cmd<Msg> {
        if target == SUBMIT_ID {
            return self.submit_cmd();
        }
        if let Some(field) = Field::from_element_id(target) {
            self.focus(field);
        } else {
            cform_core::debug!(element = target, "click on unknown element ignored");
        }
        Cmd::none()
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Cmd<Msg> {
        if !key.is_press() {
            return Cmd::none();
        }
        match key.code {
            KeyCode::Tab => {
                let next = self.focused.map_or(Field::FirstName, Field::next);
                self.focus(next);
            }
            KeyCode::BackTab => {
                let prev = self.focused.map_or(Field::Message, Field::prev);
                self.focus(prev);
            }
            KeyCode::Enter => return self.submit_cmd(),
            KeyCode::Escape => self.blur(),
            KeyCode::Char(c) if !key.ctrl() => self.insert_text(&c.to_string()),
            KeyCode::Backspace => self.delete_before_cursor(),
            KeyCode::Delete => self.delete_at_cursor(),
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => {
                if let Some(field) = self.focused {
                    self.cursor = (self.cursor + 1).min(grapheme_count(self.values.get(field)));
                }
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => {
                if let Some(field) = self.focused {
                    self.cursor = grapheme_count(self.values.get(field));
                }
            }
            _ => {}
        }
        Cmd::none()
    }

    fn insert_text(&mut self, text: &str) {
        let Some(field) = self.focused else {
            return;
        };
        if text.is_empty() {
            return;
        }
        let value = self.values.get_mut(field);
        let byte_offset = grapheme_byte_offset(value, self.cursor);
        let tail = grapheme_count(&value[byte_offset..]);
        value.insert_str(byte_offset, text);
        // Inserted text may merge with clusters on either side of the cursor.
        let after = grapheme_count(value);
        self.cursor = after.saturating_sub(tail).min(after);
        self.value_changed(field);
    }

    fn delete_before_cursor(&mut self) {
        let Some(field) = self.focused else {
            return;
        };
        if self.cursor == 0 {
            return;
        }
        let value = self.values.get_mut(field);
        let start = grapheme_byte_offset(value, self.cursor - 1);
        let end = grapheme_byte_offset(value, self.cursor);
        value.drain(start..end);
        self.cursor = (self.cursor - 1).min(grapheme_count(value));
        self.value_changed(field);
    }

    fn delete_at_cursor(&mut self) {
        let Some(field) = self.focused else {
            return;
        };
        let value = self.values.get_mut(field);
        if self.cursor >= grapheme_count(value) {
            return;
        }
        let start = grapheme_byte_offset(value, self.cursor);
        let end = grapheme_byte_offset(value, self.cursor + 1);
        value.drain(start..end);
        self.cursor = self.cursor.min(grapheme_count(value));
        self.value_changed(field);
    }
}

impl Model for ContactForm {
    type Message = Msg;

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::Key(key) => self.handle_key(&key),
            Msg::Click(target) => self.handle_click(&target),
            Msg::Paste(text) => {
                self.insert_text(&text);
                Cmd::none()
            }
            Msg::HostFocus(_) => Cmd::none(),
            Msg::Focus(field) => {
                self.focus(field);
                Cmd::none()
            }
            Msg::Input { field, value } => {
                self.set_value(field, value);
                Cmd::none()
            }
            Msg::Submit => self.submit_cmd(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        for node in project(
            &self.values,
            &self.errors,
            self.snapshot.as_ref(),
            self.focused,
        ) {
            frame.render(node);
        }
    }
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Build the view tree for the given state.
///
/// Returns the form and, when a snapshot exists, the submitted region.
#[must_use]
pub fn project(
    values: &FormValues,
    errors: &ValidationErrors,
    snapshot: Option<&SubmittedSnapshot>,
    focused: Option<Field>,
) -> Vec<Node> {
    let mut form = Node::new(Role::Form)
        .with_id("contact-form")
        .child(Node::heading(TITLE));

    for field in Field::ALL {
        form = form
            .child(
                Node::text_input(field.key(), field.label(), values.get(field))
                    .focused(focused == Some(field)),
            )
            .child_opt(
                errors
                    .message(field)
                    .map(|msg| Node::alert(msg).with_test_id(ERROR_TEST_ID)),
            );
    }
    form = form.child(Node::button(SUBMIT_ID, "Submit"));

    let mut nodes = vec![form];
    if let Some(snapshot) = snapshot {
        nodes.push(Node::region(SUBMITTED_LABEL).children(
            snapshot.displayed_fields().map(|field| {
                Node::text(snapshot.get(field))
                    .with_label(field.display_label())
                    .with_test_id(field.display_test_id())
            }),
        ));
    }
    nodes
}

/// Count grapheme clusters in a string.
fn grapheme_count(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Get byte offset of the nth grapheme cluster.
fn grapheme_byte_offset(s: &str, grapheme_idx: usize) -> usize {
    s.grapheme_indices(true)
        .nth(grapheme_idx)
        .map_or(s.len(), |(i, _)| i)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
