#![forbid(unsafe_code)]

//! Tracing integration tests.
//!
//! Verify that the contact form reports validation outcomes at `debug`,
//! accepted submissions at `info`, and that simulator flushes open a span.
//!
//!   cargo test -p cform-widgets --test tracing_tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use cform_runtime::{Model, ProgramSimulator};
use cform_widgets::contact_form::{ContactForm, Field, Msg};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Test Infrastructure
// ============================================================================

/// A captured event with its level, message, and fields.
#[derive(Debug, Clone)]
struct CapturedEvent {
    level: Level,
    message: String,
    fields: HashMap<String, String>,
}

/// A tracing Layer that captures events and span names.
struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
    spans: Arc<Mutex<Vec<String>>>,
}

/// Handle to read captured data after the closure ran.
struct CaptureHandle {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
    spans: Arc<Mutex<Vec<String>>>,
}

impl CaptureHandle {
    fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }

    fn spans(&self) -> Vec<String> {
        self.spans.lock().unwrap().clone()
    }

    fn find(&self, message: &str) -> Option<CapturedEvent> {
        self.events().into_iter().find(|e| e.message == message)
    }
}

/// Visitor that extracts event fields.
struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for EventCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        self.spans
            .lock()
            .unwrap()
            .push(attrs.metadata().name().to_string());
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let mut fields: HashMap<String, String> = visitor.0.into_iter().collect();
        let message = fields.remove("message").unwrap_or_default();
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message,
            fields,
        });
    }
}

/// Set up a tracing subscriber with event capture and run a closure.
fn with_captured<F>(f: F) -> CaptureHandle
where
    F: FnOnce(),
{
    let events = Arc::new(Mutex::new(Vec::new()));
    let spans = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        events: events.clone(),
        spans: spans.clone(),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    CaptureHandle { events, spans }
}

fn fill_valid(form: &mut ContactForm) {
    form.set_value(Field::FirstName, "Ashish");
    form.set_value(Field::LastName, "Desai");
    form.set_value(Field::Email, "desai@email.com");
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn failed_field_is_logged_at_debug() {
    let handle = with_captured(|| {
        let mut form = ContactForm::new();
        form.set_value(Field::FirstName, "abc");
    });

    let event = handle
        .find("field failed validation")
        .expect("validation failure event");
    assert_eq!(event.level, Level::DEBUG);
    assert_eq!(event.fields.get("field").map(String::as_str), Some("firstName"));
    assert_eq!(event.fields.get("code").map(String::as_str), Some("too_short"));
}

#[test]
fn rejected_submission_reports_error_count() {
    let handle = with_captured(|| {
        let mut form = ContactForm::new();
        form.submit();
    });

    let event = handle
        .find("contact form submission rejected")
        .expect("rejection event");
    assert_eq!(event.level, Level::DEBUG);
    assert_eq!(event.fields.get("errors").map(String::as_str), Some("3"));
    assert!(handle.find("contact form submission accepted").is_none());
}

#[test]
fn accepted_submission_is_logged_at_info() {
    let handle = with_captured(|| {
        let mut form = ContactForm::new();
        fill_valid(&mut form);
        form.submit();
        fill_valid(&mut form);
        form.submit();
    });

    let accepted: Vec<_> = handle
        .events()
        .into_iter()
        .filter(|e| e.message == "contact form submission accepted")
        .collect();
    assert_eq!(accepted.len(), 2);
    assert!(accepted.iter().all(|e| e.level == Level::INFO));
    assert_eq!(
        accepted[1].fields.get("submissions").map(String::as_str),
        Some("2")
    );
}

#[test]
fn valid_fields_only_trace() {
    let handle = with_captured(|| {
        let mut form = ContactForm::new();
        fill_valid(&mut form);
    });

    let events = handle.events();
    assert!(!events.is_empty());
    assert!(events.iter().all(|e| e.level == Level::TRACE));
}

#[test]
fn simulator_flush_opens_span() {
    let handle = with_captured(|| {
        let mut sim = ProgramSimulator::new(ContactForm::new());
        sim.init();
        sim.send(Msg::Submit);
        assert_eq!(sim.model().errors().len(), 3);
        assert_eq!(
            sim.logs(),
            &["submission rejected: 3 invalid field(s)".to_string()]
        );
    });

    let flushes = handle
        .spans()
        .iter()
        .filter(|name| *name == "simulator.flush")
        .count();
    assert_eq!(flushes, 2);
}

#[test]
fn unknown_click_target_is_logged() {
    let handle = with_captured(|| {
        let mut form = ContactForm::new();
        form.update(Msg::Click("nowhere".to_string()));
    });

    let event = handle
        .find("click on unknown element ignored")
        .expect("ignored click event");
    assert_eq!(event.fields.get("element").map(String::as_str), Some("nowhere"));
}
