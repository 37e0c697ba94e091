#![forbid(unsafe_code)]

//! Deterministic program simulator with an explicit message queue.
//!
//! `ProgramSimulator` runs a [`Model`] without any host UI. Host events are
//! converted to messages and pushed onto a FIFO queue; nothing reaches the
//! model until [`flush`](ProgramSimulator::flush) drains the queue. Messages
//! produced by commands during a flush are appended to the same queue and
//! drained in the same flush, so a single flush is always enough to observe
//! the effect of everything enqueued before it.
//!
//! # Example
//!
//! ```ignore
//! use cform_runtime::simulator::ProgramSimulator;
//!
//! let mut sim = ProgramSimulator::new(Counter { value: 0 });
//! sim.init();
//! sim.enqueue(Msg::Increment);
//! assert_eq!(sim.model().value, 0);
//! sim.flush();
//! assert_eq!(sim.model().value, 1);
//! ```

use std::collections::VecDeque;

use cform_core::event::Event;
use cform_render::{Frame, Node};
use tracing::{trace_span, warn};

use crate::program::{Cmd, Model};

/// Default bound on messages processed by a single flush.
pub const DEFAULT_MAX_MESSAGES_PER_FLUSH: usize = 4096;

/// Simulator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatorConfig {
    /// Upper bound on messages processed by one flush.
    ///
    /// Guards against update loops that keep re-queueing messages. Messages
    /// left over stay queued for the next flush.
    pub max_messages_per_flush: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatorConfig {
    /// Create the default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_messages_per_flush: DEFAULT_MAX_MESSAGES_PER_FLUSH,
        }
    }

    /// Set the per-flush message budget (minimum 1).
    #[must_use]
    pub const fn max_messages_per_flush(mut self, max: usize) -> Self {
        self.max_messages_per_flush = if max == 0 { 1 } else { max };
        self
    }
}

/// Record of a command that was executed during simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CmdRecord {
    /// No-op command.
    None,
    /// Quit command.
    Quit,
    /// Message queued by a command.
    Msg,
    /// Batch of commands.
    Batch(usize),
    /// Sequence of commands.
    Sequence(usize),
    /// Log message emitted.
    Log(String),
}

/// Result of one [`ProgramSimulator::flush`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlushReport {
    /// Messages dispatched through `update`.
    pub processed: usize,
    /// Messages still queued (budget exhausted, or discarded after quit).
    pub remaining: usize,
}

/// Deterministic simulator for [`Model`] testing.
pub struct ProgramSimulator<M: Model> {
    /// The component model.
    model: M,
    config: SimulatorConfig,
    /// Pending messages, oldest first.
    queue: VecDeque<M::Message>,
    /// Captured trees.
    frames: Vec<Node>,
    /// Record of all executed commands.
    command_log: Vec<CmdRecord>,
    /// Whether the simulated program is still running.
    running: bool,
    /// Log messages emitted via Cmd::Log.
    logs: Vec<String>,
    /// Number of completed flushes.
    flush_count: u64,
}

impl<M: Model> ProgramSimulator<M> {
    /// Create a new simulator with the given model.
    ///
    /// The model is not initialized until [`init`](Self::init) is called.
    pub fn new(model: M) -> Self {
        Self::with_config(model, SimulatorConfig::default())
    }

    /// Create a simulator with an explicit configuration.
    pub fn with_config(model: M, config: SimulatorConfig) -> Self {
        Self {
            model,
            config,
            queue: VecDeque::new(),
            frames: Vec::new(),
            command_log: Vec::new(),
            running: true,
            logs: Vec::new(),
            flush_count: 0,
        }
    }

    /// Call `Model::init()`, execute its commands, and flush.
    pub fn init(&mut self) -> FlushReport {
        let cmd = self.model.init();
        self.execute_cmd(cmd);
        self.flush()
    }

    /// Queue a host event without dispatching it.
    pub fn enqueue_event(&mut self, event: Event) {
        self.enqueue(M::Message::from(event));
    }

    /// Queue a message without dispatching it.
    ///
    /// Ignored once the program has quit.
    pub fn enqueue(&mut self, msg: M::Message) {
        if self.running {
            self.queue.push_back(msg);
        }
    }

    /// Number of queued messages.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Drain the queue through `Model::update()`.
    ///
    /// Stops early when the program quits (the rest of the queue is
    /// discarded) or when the per-flush budget is spent.
    pub fn flush(&mut self) -> FlushReport {
        let span = trace_span!("simulator.flush", queued = self.queue.len());
        let _guard = span.enter();

        let mut processed = 0;
        while self.running && processed < self.config.max_messages_per_flush {
            let Some(msg) = self.queue.pop_front() else {
                break;
            };
            let cmd = self.model.update(msg);
            processed += 1;
            self.execute_cmd(cmd);
        }

        if !self.running {
            self.queue.clear();
        } else if !self.queue.is_empty() {
            warn!(
                remaining = self.queue.len(),
                budget = self.config.max_messages_per_flush,
                "flush budget exhausted"
            );
        }
        self.flush_count += 1;
        FlushReport {
            processed,
            remaining: self.queue.len(),
        }
    }

    /// Queue host events and flush once.
    pub fn inject_events(&mut self, events: &[Event]) -> FlushReport {
        for event in events {
            self.enqueue_event(event.clone());
        }
        self.flush()
    }

    /// Queue a single host event and flush.
    pub fn inject_event(&mut self, event: Event) -> FlushReport {
        self.inject_events(&[event])
    }

    /// Queue a message and flush.
    pub fn send(&mut self, msg: M::Message) -> FlushReport {
        self.enqueue(msg);
        self.flush()
    }

    /// Render the current state without recording it.
    pub fn view(&self) -> Node {
        let mut frame = Frame::new();
        self.model.view(&mut frame);
        frame.into_root()
    }

    /// Render the current state and keep the tree.
    pub fn capture_frame(&mut self) -> &Node {
        let tree = self.view();
        self.frames.push(tree);
        &self.frames[self.frames.len() - 1]
    }

    /// Get all captured trees.
    pub fn frames(&self) -> &[Node] {
        &self.frames
    }

    /// Get the most recently captured tree, if any.
    pub fn last_frame(&self) -> Option<&Node> {
        self.frames.last()
    }

    /// Get a reference to the model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Check if the simulated program is still running.
    ///
    /// Returns `false` after a `Cmd::Quit` has been executed.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Number of flushes performed so far.
    pub fn flush_count(&self) -> u64 {
        self.flush_count
    }

    /// Get all log messages emitted via `Cmd::Log`.
    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    /// Get the command execution log.
    pub fn command_log(&self) -> &[CmdRecord] {
        &self.command_log
    }

    /// Clear all captured frames.
    pub fn clear_frames(&mut self) {
        self.frames.clear();
    }

    /// Clear all logs.
    pub fn clear_logs(&mut self) {
        self.logs.clear();
    }

    fn execute_cmd(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {
                self.command_log.push(CmdRecord::None);
            }
            Cmd::Quit => {
                self.running = false;
                self.command_log.push(CmdRecord::Quit);
            }
            Cmd::Msg(m) => {
                self.command_log.push(CmdRecord::Msg);
                self.enqueue(m);
            }
            Cmd::Batch(cmds) => {
                self.command_log.push(CmdRecord::Batch(cmds.len()));
                for c in cmds {
                    self.execute_cmd(c);
                    if !self.running {
                        break;
                    }
                }
            }
            Cmd::Sequence(cmds) => {
                self.command_log.push(CmdRecord::Sequence(cmds.len()));
                for c in cmds {
                    self.execute_cmd(c);
                    if !self.running {
                        break;
                    }
                }
            }
            Cmd::Log(text) => {
                self.command_log.push(CmdRecord::Log(text.clone()));
                self.logs.push(text);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cform_core::event::KeyCode;

    // ---------- Test model ----------

    #[derive(Default)]
    struct Counter {
        value: i32,
        initialized: bool,
    }

    #[derive(Debug)]
    enum CounterMsg {
        Increment,
        Decrement,
        Quit,
        LogValue,
        BatchIncrement(usize),
        Chain(u32),
    }

    impl From<Event> for CounterMsg {
        fn from(event: Event) -> Self {
            match event {
                Event::Key(k) if k.code == KeyCode::Char('-') => CounterMsg::Decrement,
                Event::Key(k) if k.code == KeyCode::Char('q') => CounterMsg::Quit,
                Event::Key(k) if k.code == KeyCode::Char('l') => CounterMsg::LogValue,
                _ => CounterMsg::Increment,
            }
        }
    }

    impl Model for Counter {
        type Message = CounterMsg;

        fn init(&mut self) -> Cmd<Self::Message> {
            self.initialized = true;
            Cmd::none()
        }

        fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message> {
            match msg {
                CounterMsg::Increment => {
                    self.value += 1;
                    Cmd::none()
                }
                CounterMsg::Decrement => {
                    self.value -= 1;
                    Cmd::none()
                }
                CounterMsg::Quit => Cmd::quit(),
                CounterMsg::LogValue => Cmd::log(format!("value={}", self.value)),
                CounterMsg::BatchIncrement(n) => {
                    let cmds: Vec<_> = (0..n).map(|_| Cmd::msg(CounterMsg::Increment)).collect();
                    Cmd::batch(cmds)
                }
                CounterMsg::Chain(0) => Cmd::none(),
                CounterMsg::Chain(n) => {
                    self.value += 1;
                    Cmd::msg(CounterMsg::Chain(n - 1))
                }
            }
        }

        fn view(&self, frame: &mut Frame) {
            frame.render(Node::text(format!("Count: {}", self.value)));
        }
    }

    fn key(c: char) -> Event {
        Event::key(KeyCode::Char(c))
    }

    #[test]
    fn init_calls_model_init() {
        let mut sim = ProgramSimulator::new(Counter::default());
        assert!(!sim.model().initialized);
        sim.init();
        assert!(sim.model().initialized);
    }

    #[test]
    fn enqueue_defers_until_flush() {
        let mut sim = ProgramSimulator::new(Counter::default());
        sim.enqueue_event(key('+'));
        sim.enqueue_event(key('+'));
        assert_eq!(sim.model().value, 0);
        assert_eq!(sim.pending(), 2);

        let report = sim.flush();
        assert_eq!(report, FlushReport { processed: 2, remaining: 0 });
        assert_eq!(sim.model().value, 2);
    }

    #[test]
    fn inject_events_processes_in_order() {
        let mut sim = ProgramSimulator::new(Counter::default());
        sim.inject_events(&[key('+'), key('+'), key('-'), key('l')]);
        assert_eq!(sim.model().value, 1);
        assert_eq!(sim.logs(), &["value=1".to_string()]);
    }

    #[test]
    fn quit_discards_rest_of_queue() {
        let mut sim = ProgramSimulator::new(Counter::default());
        let report = sim.inject_events(&[key('+'), key('q'), key('+'), key('+')]);
        assert_eq!(sim.model().value, 1);
        assert!(!sim.is_running());
        assert_eq!(report.remaining, 0);

        sim.inject_event(key('+'));
        assert_eq!(sim.model().value, 1);
    }

    #[test]
    fn batch_messages_drain_in_same_flush() {
        let mut sim = ProgramSimulator::new(Counter::default());
        let report = sim.send(CounterMsg::BatchIncrement(3));
        assert_eq!(sim.model().value, 3);
        assert_eq!(report.processed, 4);
        assert_eq!(sim.flush_count(), 1);
        assert!(sim.command_log().contains(&CmdRecord::Batch(3)));
    }

    #[test]
    fn budget_leaves_remainder_queued() {
        let config = SimulatorConfig::new().max_messages_per_flush(3);
        let mut sim = ProgramSimulator::with_config(Counter::default(), config);
        let report = sim.send(CounterMsg::Chain(10));
        assert_eq!(report.processed, 3);
        assert_eq!(report.remaining, 1);
        assert_eq!(sim.model().value, 3);

        while sim.pending() > 0 {
            sim.flush();
        }
        assert_eq!(sim.model().value, 10);
    }

    #[test]
    fn zero_budget_is_clamped() {
        let config = SimulatorConfig::new().max_messages_per_flush(0);
        assert_eq!(config.max_messages_per_flush, 1);
    }

    #[test]
    fn capture_frame_records_tree() {
        let mut sim = ProgramSimulator::new(Counter::default());
        sim.inject_event(key('+'));
        let tree = sim.capture_frame().clone();
        assert_eq!(tree.children[0].text, "Count: 1");
        assert_eq!(sim.frames().len(), 1);
        assert_eq!(sim.last_frame(), Some(&tree));

        sim.clear_frames();
        assert!(sim.last_frame().is_none());
    }

    #[test]
    fn view_is_not_recorded() {
        let sim = ProgramSimulator::new(Counter::default());
        let _ = sim.view();
        assert!(sim.frames().is_empty());
    }

    #[test]
    fn identical_inputs_yield_identical_trees() {
        fn run() -> Node {
            let mut sim = ProgramSimulator::new(Counter::default());
            sim.init();
            sim.inject_events(&[key('+'), key('+'), key('-')]);
            sim.view()
        }
        assert_eq!(run(), run());
    }
}
