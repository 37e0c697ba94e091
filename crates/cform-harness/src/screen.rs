#![forbid(unsafe_code)]

//! Element queries over a mounted model.
//!
//! Queries come in three flavours:
//!
//! | Prefix | No match | One match | Several matches |
//! |--------|----------|-----------|-----------------|
//! | `get_by_*` | `Err(NotFound)` | `Ok(node)` | `Err(Multiple)` |
//! | `query_by_*` | `None` | `Some(node)` | `Some(first)` |
//! | `find_by_*` | flush, then as `get_by_*` | | |
//!
//! The `*_all_by_*` forms return every match in document order; `get_all`
//! and `find_all` fail only when nothing matches.
//!
//! Queries run against a fresh [`Node`] tree rendered from the current model
//! state. Events queued by [`UserEvent`](crate::UserEvent) are not visible
//! until something flushes: [`Screen::flush`], a `find_*` query, or
//! [`Screen::wait_for`].

use std::fmt;

use cform_core::event::Event;
use cform_render::{Node, Role, tree_to_text};
use cform_runtime::{FlushReport, Model, ProgramSimulator, SimulatorConfig};

use crate::step_log::log_step;

/// Upper bound on flushes performed by [`Screen::wait_for`].
const MAX_WAIT_FLUSHES: usize = 64;

// ============================================================================
// TextMatch
// ============================================================================

/// How query text is compared against element text or labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextMatch {
    /// Whole string, case-sensitive, after collapsing whitespace runs.
    Exact(String),
    /// Case-insensitive prefix.
    Prefix(String),
    /// Case-insensitive substring.
    Contains(String),
}

impl TextMatch {
    #[must_use]
    pub fn exact(text: impl Into<String>) -> Self {
        Self::Exact(text.into())
    }

    #[must_use]
    pub fn prefix(text: impl Into<String>) -> Self {
        Self::Prefix(text.into())
    }

    #[must_use]
    pub fn contains(text: impl Into<String>) -> Self {
        Self::Contains(text.into())
    }

    /// Whether `text` satisfies this matcher.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Self::Exact(want) => collapse_whitespace(text) == collapse_whitespace(want),
            Self::Prefix(want) => text.to_lowercase().starts_with(&want.to_lowercase()),
            Self::Contains(want) => text.to_lowercase().contains(&want.to_lowercase()),
        }
    }
}

impl From<&str> for TextMatch {
    fn from(text: &str) -> Self {
        Self::exact(text)
    }
}

impl From<String> for TextMatch {
    fn from(text: String) -> Self {
        Self::Exact(text)
    }
}

impl fmt::Display for TextMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(t) => write!(f, "{t:?}"),
            Self::Prefix(t) => write!(f, "prefix {t:?} (any case)"),
            Self::Contains(t) => write!(f, "substring {t:?} (any case)"),
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ============================================================================
// QueryError
// ============================================================================

/// Failure of a `get_*` / `find_*` query or a user event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Nothing matched. `tree` is the text projection at the time.
    NotFound { query: String, tree: String },
    /// More than one element matched a single-element query.
    Multiple { query: String, count: usize },
    /// The element has no id, so events cannot target it.
    NotInteractive { role: Role },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { query, tree } => {
                write!(f, "unable to find an element by {query}\n\n{tree}")
            }
            Self::Multiple { query, count } => {
                write!(f, "found {count} elements by {query}, expected one")
            }
            Self::NotInteractive { role } => {
                write!(f, "{} element has no id and cannot receive events", role.as_str())
            }
        }
    }
}

impl std::error::Error for QueryError {}

// ============================================================================
// Query selectors
// ============================================================================

enum By<'a> {
    LabelText(&'a TextMatch),
    Role(Role),
    Text(&'a TextMatch),
    TestId(&'a str),
}

impl By<'_> {
    fn matches(&self, node: &Node) -> bool {
        match self {
            Self::LabelText(m) => {
                node.role == Role::TextInput && node.label.as_deref().is_some_and(|l| m.matches(l))
            }
            Self::Role(role) => node.role == *role,
            Self::Text(m) => node.has_text_content() && m.matches(&node.text),
            Self::TestId(id) => node.test_id.as_deref() == Some(*id),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::LabelText(m) => format!("label text {m}"),
            Self::Role(role) => format!("role {:?}", role.as_str()),
            Self::Text(m) => format!("text {m}"),
            Self::TestId(id) => format!("test id {id:?}"),
        }
    }
}

// ============================================================================
// Screen
// ============================================================================

/// A mounted model plus queries over its rendered tree.
pub struct Screen<M: Model> {
    sim: ProgramSimulator<M>,
}

impl<M: Model> Screen<M> {
    /// Mount `model`: run `init` and flush.
    pub fn render(model: M) -> Self {
        Self::render_with_config(model, SimulatorConfig::default())
    }

    /// Mount `model` with an explicit simulator configuration.
    pub fn render_with_config(model: M, config: SimulatorConfig) -> Self {
        let mut sim = ProgramSimulator::with_config(model, config);
        let report = sim.init();
        let processed = report.processed.to_string();
        log_step("render", &[("processed", processed.as_str())]);
        Self { sim }
    }

    /// Render the current state.
    pub fn tree(&self) -> Node {
        self.sim.view()
    }

    /// Text projection of the current state.
    pub fn text(&self) -> String {
        tree_to_text(&self.tree())
    }

    /// Queue a host event without dispatching it.
    pub fn dispatch(&mut self, event: Event) {
        self.sim.enqueue_event(event);
    }

    /// Drain queued events through the model.
    pub fn flush(&mut self) -> FlushReport {
        let report = self.sim.flush();
        let processed = report.processed.to_string();
        let remaining = report.remaining.to_string();
        log_step(
            "flush",
            &[
                ("processed", processed.as_str()),
                ("remaining", remaining.as_str()),
            ],
        );
        report
    }

    /// Number of queued events.
    pub fn pending(&self) -> usize {
        self.sim.pending()
    }

    pub fn model(&self) -> &M {
        self.sim.model()
    }

    pub fn simulator(&self) -> &ProgramSimulator<M> {
        &self.sim
    }

    pub fn simulator_mut(&mut self) -> &mut ProgramSimulator<M> {
        &mut self.sim
    }

    /// Flush, then run `check` until it passes or the queue stays empty.
    ///
    /// Each retry flushes again, so work left behind by an exhausted flush
    /// budget is picked up. Returns the last error when the queue is drained
    /// and `check` still fails.
    pub fn wait_for<T>(
        &mut self,
        mut check: impl FnMut(&Self) -> Result<T, QueryError>,
    ) -> Result<T, QueryError> {
        let mut attempts = 0;
        loop {
            self.flush();
            attempts += 1;
            match check(self) {
                Ok(value) => return Ok(value),
                Err(err) if self.pending() == 0 || attempts >= MAX_WAIT_FLUSHES => {
                    return Err(err);
                }
                Err(_) => {}
            }
        }
    }

    // -- generic machinery --

    fn query_all(&self, by: &By<'_>) -> Vec<Node> {
        let tree = self.tree();
        tree.descendants().filter(|n| by.matches(n)).cloned().collect()
    }

    fn get_all(&self, by: &By<'_>) -> Result<Vec<Node>, QueryError> {
        let found = self.query_all(by);
        if found.is_empty() {
            Err(QueryError::NotFound {
                query: by.describe(),
                tree: self.text(),
            })
        } else {
            Ok(found)
        }
    }

    fn get_one(&self, by: &By<'_>) -> Result<Node, QueryError> {
        let mut found = self.get_all(by)?;
        if found.len() > 1 {
            return Err(QueryError::Multiple {
                query: by.describe(),
                count: found.len(),
            });
        }
        Ok(found.remove(0))
    }

    fn query_one(&self, by: &By<'_>) -> Option<Node> {
        self.query_all(by).into_iter().next()
    }

    // -- by label text --

    /// The text input whose label matches.
    pub fn get_by_label_text(&self, m: impl Into<TextMatch>) -> Result<Node, QueryError> {
        self.get_one(&By::LabelText(&m.into()))
    }

    pub fn get_all_by_label_text(&self, m: impl Into<TextMatch>) -> Result<Vec<Node>, QueryError> {
        self.get_all(&By::LabelText(&m.into()))
    }

    pub fn query_by_label_text(&self, m: impl Into<TextMatch>) -> Option<Node> {
        self.query_one(&By::LabelText(&m.into()))
    }

    pub fn find_by_label_text(&mut self, m: impl Into<TextMatch>) -> Result<Node, QueryError> {
        let m = m.into();
        self.wait_for(|s| s.get_one(&By::LabelText(&m)))
    }

    // -- by role --

    pub fn get_by_role(&self, role: Role) -> Result<Node, QueryError> {
        self.get_one(&By::Role(role))
    }

    pub fn get_all_by_role(&self, role: Role) -> Result<Vec<Node>, QueryError> {
        self.get_all(&By::Role(role))
    }

    pub fn query_by_role(&self, role: Role) -> Option<Node> {
        self.query_one(&By::Role(role))
    }

    pub fn query_all_by_role(&self, role: Role) -> Vec<Node> {
        self.query_all(&By::Role(role))
    }

    // -- by text --

    /// The element whose own text content matches. Input values never match.
    pub fn get_by_text(&self, m: impl Into<TextMatch>) -> Result<Node, QueryError> {
        self.get_one(&By::Text(&m.into()))
    }

    pub fn get_all_by_text(&self, m: impl Into<TextMatch>) -> Result<Vec<Node>, QueryError> {
        self.get_all(&By::Text(&m.into()))
    }

    pub fn query_by_text(&self, m: impl Into<TextMatch>) -> Option<Node> {
        self.query_one(&By::Text(&m.into()))
    }

    pub fn query_all_by_text(&self, m: impl Into<TextMatch>) -> Vec<Node> {
        self.query_all(&By::Text(&m.into()))
    }

    pub fn find_by_text(&mut self, m: impl Into<TextMatch>) -> Result<Node, QueryError> {
        let m = m.into();
        self.wait_for(|s| s.get_one(&By::Text(&m)))
    }

    pub fn find_all_by_text(&mut self, m: impl Into<TextMatch>) -> Result<Vec<Node>, QueryError> {
        let m = m.into();
        self.wait_for(|s| s.get_all(&By::Text(&m)))
    }

    // -- by test id --

    pub fn get_by_test_id(&self, id: &str) -> Result<Node, QueryError> {
        self.get_one(&By::TestId(id))
    }

    pub fn get_all_by_test_id(&self, id: &str) -> Result<Vec<Node>, QueryError> {
        self.get_all(&By::TestId(id))
    }

    pub fn query_by_test_id(&self, id: &str) -> Option<Node> {
        self.query_one(&By::TestId(id))
    }

    pub fn query_all_by_test_id(&self, id: &str) -> Vec<Node> {
        self.query_all(&By::TestId(id))
    }

    pub fn find_by_test_id(&mut self, id: &str) -> Result<Node, QueryError> {
        self.wait_for(|s| s.get_one(&By::TestId(id)))
    }

    pub fn find_all_by_test_id(&mut self, id: &str) -> Result<Vec<Node>, QueryError> {
        self.wait_for(|s| s.get_all(&By::TestId(id)))
    }
}
