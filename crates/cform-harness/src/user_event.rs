#![forbid(unsafe_code)]

//! Simulated user input.
//!
//! Each helper queues the host events a person would produce and returns
//! without flushing, so assertions made right away still see the previous
//! state. Use a `find_*` query or [`Screen::wait_for`] to observe the result.

use cform_core::event::{Event, KeyCode, PasteEvent};
use cform_render::Node;
use cform_runtime::Model;

use crate::screen::{QueryError, Screen};
use crate::step_log::log_step;

/// Event driver in the style of a browser testing library.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserEvent;

impl UserEvent {
    /// Click `element`.
    pub fn click<M: Model>(screen: &mut Screen<M>, element: &Node) -> Result<(), QueryError> {
        let target = target_id(element)?;
        log_step("click", &[("target", target)]);
        screen.dispatch(Event::click(target));
        Ok(())
    }

    /// Click `element`, then press one key per character of `text`.
    ///
    /// `'\n'` presses Enter and `'\t'` presses Tab.
    pub fn type_text<M: Model>(
        screen: &mut Screen<M>,
        element: &Node,
        text: &str,
    ) -> Result<(), QueryError> {
        Self::click(screen, element)?;
        log_step(
            "type",
            &[("target", target_id(element)?), ("text", text)],
        );
        for c in text.chars() {
            let code = match c {
                '\n' => KeyCode::Enter,
                '\t' => KeyCode::Tab,
                other => KeyCode::Char(other),
            };
            screen.dispatch(Event::key(code));
        }
        Ok(())
    }

    /// Click `element`, then paste `text` as one bracketed paste.
    pub fn paste<M: Model>(
        screen: &mut Screen<M>,
        element: &Node,
        text: &str,
    ) -> Result<(), QueryError> {
        Self::click(screen, element)?;
        log_step("paste", &[("text", text)]);
        screen.dispatch(Event::Paste(PasteEvent::bracketed(text)));
        Ok(())
    }

    /// Press each key in order against whatever has focus.
    pub fn keyboard<M: Model>(screen: &mut Screen<M>, keys: &[KeyCode]) {
        for key in keys {
            screen.dispatch(Event::key(*key));
        }
    }

    /// Press Tab.
    pub fn tab<M: Model>(screen: &mut Screen<M>) {
        Self::keyboard(screen, &[KeyCode::Tab]);
    }
}

fn target_id(element: &Node) -> Result<&str, QueryError> {
    element
        .id
        .as_deref()
        .ok_or(QueryError::NotInteractive { role: element.role })
}
