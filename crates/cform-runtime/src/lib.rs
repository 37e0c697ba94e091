#![forbid(unsafe_code)]

//! Elm-style runtime for form components.
//!
//! [`program`] defines the `Model` / `Cmd` contract; [`simulator`] drives a
//! model from a synchronous, explicitly flushed message queue.

pub mod program;
pub mod simulator;

pub use program::{Cmd, Model};
pub use simulator::{CmdRecord, FlushReport, ProgramSimulator, SimulatorConfig};
