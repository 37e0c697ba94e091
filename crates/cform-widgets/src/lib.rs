#![forbid(unsafe_code)]

//! Form components built on the cform runtime.
//!
//! - [`validation`]: composable validators and field rules.
//! - [`contact_form`]: the contact form model, its messages, and its view
//!   projection.

pub mod contact_form;
pub mod validation;

pub use contact_form::{
    ConfigError, ContactForm, ContactFormConfig, Field, FormPhase, FormValues, Msg,
    SubmitOutcome, SubmittedSnapshot, ValidationErrors, ValidationMode,
};
