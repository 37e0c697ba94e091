#![forbid(unsafe_code)]

//! Elm-style program contract for form components.
//!
//! A program separates state (the [`Model`]) from rendering (`view`) and
//! expresses follow-up work as [`Cmd`] values returned from `update`.
//!
//! # Example
//!
//! ```
//! use cform_core::event::Event;
//! use cform_render::{Frame, Node};
//! use cform_runtime::program::{Cmd, Model};
//!
//! struct Counter {
//!     count: i32,
//! }
//!
//! enum Msg {
//!     Increment,
//!     Quit,
//! }
//!
//! impl From<Event> for Msg {
//!     fn from(event: Event) -> Self {
//!         match event {
//!             Event::Key(k) if k.is_char('q') => Msg::Quit,
//!             _ => Msg::Increment,
//!         }
//!     }
//! }
//!
//! impl Model for Counter {
//!     type Message = Msg;
//!
//!     fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message> {
//!         match msg {
//!             Msg::Increment => {
//!                 self.count += 1;
//!                 Cmd::none()
//!             }
//!             Msg::Quit => Cmd::quit(),
//!         }
//!     }
//!
//!     fn view(&self, frame: &mut Frame) {
//!         frame.render(Node::text(self.count.to_string()));
//!     }
//! }
//! ```

use cform_core::event::Event;
use cform_render::Frame;

/// The Model trait defines component state and behavior.
///
/// Implementations define how the component responds to events
/// and renders its current state.
pub trait Model: Sized {
    /// The message type for this model.
    ///
    /// Messages represent actions that update the model state.
    /// Must be convertible from host events.
    type Message: From<Event> + Send + 'static;

    /// Initialize the model with startup commands.
    ///
    /// Called once when the component is mounted.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    /// Update the model in response to a message.
    ///
    /// This is the core state transition function. Returns commands
    /// for any follow-up work.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    /// Project the current state into a frame.
    ///
    /// Must be pure: the same state always yields the same tree.
    fn view(&self, frame: &mut Frame);
}

/// Commands represent follow-up work returned from `update`.
#[derive(Default)]
pub enum Cmd<M> {
    /// No operation.
    #[default]
    None,
    /// Stop processing further messages.
    Quit,
    /// Execute multiple commands as a batch (currently sequential).
    Batch(Vec<Cmd<M>>),
    /// Execute commands sequentially.
    Sequence(Vec<Cmd<M>>),
    /// Send a message to the model.
    Msg(M),
    /// Record a log line with the host.
    Log(String),
}

impl<M: std::fmt::Debug> std::fmt::Debug for Cmd<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Quit => write!(f, "Quit"),
            Self::Batch(cmds) => f.debug_tuple("Batch").field(cmds).finish(),
            Self::Sequence(cmds) => f.debug_tuple("Sequence").field(cmds).finish(),
            Self::Msg(m) => f.debug_tuple("Msg").field(m).finish(),
            Self::Log(s) => f.debug_tuple("Log").field(s).finish(),
        }
    }
}

impl<M> Cmd<M> {
    /// Create a no-op command.
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    /// Create a quit command.
    #[inline]
    pub fn quit() -> Self {
        Self::Quit
    }

    /// Create a message command.
    #[inline]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    /// Create a log command.
    #[inline]
    pub fn log(msg: impl Into<String>) -> Self {
        Self::Log(msg.into())
    }

    /// Create a batch of commands.
    ///
    /// Empty batches collapse to `None` and single-element batches to the
    /// element itself.
    pub fn batch(cmds: Vec<Self>) -> Self {
        if cmds.len() <= 1 {
            return cmds.into_iter().next().unwrap_or(Self::None);
        }
        Self::Batch(cmds)
    }

    /// Create a sequence of commands.
    pub fn sequence(cmds: Vec<Self>) -> Self {
        if cmds.len() <= 1 {
            return cmds.into_iter().next().unwrap_or(Self::None);
        }
        Self::Sequence(cmds)
    }

    /// Return a stable name for tracing.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Quit => "Quit",
            Self::Batch(_) => "Batch",
            Self::Sequence(_) => "Sequence",
            Self::Msg(_) => "Msg",
            Self::Log(_) => "Log",
        }
    }

    /// True for [`Cmd::None`].
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_collapses_small_inputs() {
        assert!(Cmd::<()>::batch(vec![]).is_none());
        assert!(matches!(Cmd::batch(vec![Cmd::msg(1)]), Cmd::Msg(1)));
        assert!(matches!(
            Cmd::batch(vec![Cmd::msg(1), Cmd::msg(2)]),
            Cmd::Batch(ref v) if v.len() == 2
        ));
    }

    #[test]
    fn sequence_collapses_small_inputs() {
        assert!(Cmd::<()>::sequence(vec![]).is_none());
        assert!(matches!(Cmd::<()>::sequence(vec![Cmd::quit()]), Cmd::Quit));
    }

    #[test]
    fn type_names_are_stable() {
        assert_eq!(Cmd::<()>::none().type_name(), "None");
        assert_eq!(Cmd::<()>::log("x").type_name(), "Log");
        assert_eq!(Cmd::msg(()).type_name(), "Msg");
    }

    #[test]
    fn debug_shows_payload() {
        assert_eq!(format!("{:?}", Cmd::msg(7)), "Msg(7)");
        assert_eq!(format!("{:?}", Cmd::<u8>::log("hi")), "Log(\"hi\")");
    }
}
