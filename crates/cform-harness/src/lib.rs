#![forbid(unsafe_code)]

//! Test harness for cform components.
//!
//! - **Screen queries**: [`Screen`] mounts a [`Model`](cform_runtime::Model)
//!   in a [`ProgramSimulator`](cform_runtime::ProgramSimulator) and looks up
//!   elements by label, role, text, or test id.
//! - **User events**: [`UserEvent`] turns clicks and typing into queued host
//!   events.
//! - **Snapshot testing**: renders the view tree as text, compares against
//!   stored `.snap` files, and shows diffs on mismatch.
//!
//! # Quick Start
//!
//! ```ignore
//! use cform_harness::{assert_snapshot, Screen, TextMatch, UserEvent};
//!
//! #[test]
//! fn typing_shows_error() {
//!     let mut screen = Screen::render(ContactForm::new());
//!     let first = screen.get_by_label_text(TextMatch::prefix("first name"))?;
//!     UserEvent::type_text(&mut screen, &first, "abc")?;
//!     assert_eq!(screen.find_all_by_test_id("error")?.len(), 1);
//!     assert_snapshot!("first_name_too_short", &screen.tree());
//! }
//! ```
//!
//! # Updating Snapshots
//!
//! Run tests with `BLESS=1` to create or update snapshot files:
//!
//! ```sh
//! BLESS=1 cargo test
//! ```
//!
//! Snapshot files are stored under `tests/snapshots/` relative to the
//! crate's `CARGO_MANIFEST_DIR`.

pub mod screen;
pub mod step_log;
pub mod user_event;

use std::fmt::Write as FmtWrite;
use std::path::{Path, PathBuf};

use cform_render::{Node, tree_to_text};

pub use screen::{QueryError, Screen, TextMatch};
pub use step_log::log_step;
pub use user_event::UserEvent;

// ============================================================================
// Match Modes & Normalization
// ============================================================================

/// Comparison mode for snapshot testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Byte-exact string comparison.
    Exact,
    /// Trim trailing whitespace on each line before comparing.
    TrimTrailing,
    /// Collapse all whitespace runs to single spaces and trim each line.
    Fuzzy,
}

/// Normalize text according to the requested match mode.
fn normalize(text: &str, mode: MatchMode) -> String {
    match mode {
        MatchMode::Exact => text.to_string(),
        MatchMode::TrimTrailing => text
            .lines()
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n"),
        MatchMode::Fuzzy => text
            .lines()
            .map(|l| l.split_whitespace().collect::<Vec<_>>().join(" "))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

// ============================================================================
// Diff
// ============================================================================

/// Compute a simple line-by-line diff between two text strings.
///
/// Lines prefixed with ` ` are identical in both, `-` appear only in
/// `expected`, `+` only in `actual`. Returns an empty string when the inputs
/// are identical.
pub fn diff_text(expected: &str, actual: &str) -> String {
    let expected_lines: Vec<&str> = expected.lines().collect();
    let actual_lines: Vec<&str> = actual.lines().collect();

    let max_lines = expected_lines.len().max(actual_lines.len());
    let mut out = String::new();
    let mut has_diff = false;

    for i in 0..max_lines {
        let exp = expected_lines.get(i).copied();
        let act = actual_lines.get(i).copied();

        match (exp, act) {
            (Some(e), Some(a)) if e == a => {
                let _ = writeln!(out, " {e}");
            }
            (Some(e), Some(a)) => {
                let _ = writeln!(out, "-{e}");
                let _ = writeln!(out, "+{a}");
                has_diff = true;
            }
            (Some(e), None) => {
                let _ = writeln!(out, "-{e}");
                has_diff = true;
            }
            (None, Some(a)) => {
                let _ = writeln!(out, "+{a}");
                has_diff = true;
            }
            (None, None) => {}
        }
    }

    if has_diff { out } else { String::new() }
}

// ============================================================================
// Snapshot Assertion
// ============================================================================

/// Resolve the snapshot file path.
fn snapshot_path(base_dir: &Path, name: &str) -> PathBuf {
    base_dir
        .join("tests")
        .join("snapshots")
        .join(format!("{name}.snap"))
}

/// Check if the `BLESS` environment variable is set.
fn is_bless() -> bool {
    std::env::var("BLESS").is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

/// Assert that a tree's text projection matches a stored snapshot.
///
/// * `name`     – Snapshot identifier (used as the `.snap` filename).
/// * `tree`     – The view tree to compare.
/// * `base_dir` – Root directory for snapshot storage (use `env!("CARGO_MANIFEST_DIR")`).
/// * `mode`     – How to compare the text.
///
/// # Panics
///
/// * If the snapshot file does not exist and `BLESS=1` is **not** set.
/// * If the projection does not match the stored snapshot.
pub fn assert_tree_snapshot(name: &str, tree: &Node, base_dir: &str, mode: MatchMode) {
    let path = snapshot_path(Path::new(base_dir), name);
    let actual = tree_to_text(tree);

    if is_bless() {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create snapshot directory");
        }
        std::fs::write(&path, format!("{actual}\n")).expect("failed to write snapshot");
        log_step("snapshot_blessed", &[("name", name)]);
        return;
    }

    match std::fs::read_to_string(&path) {
        Ok(expected) => {
            let norm_expected = normalize(&expected, mode);
            let norm_actual = normalize(&actual, mode);

            if norm_expected != norm_actual {
                let diff = diff_text(&norm_expected, &norm_actual);
                log_step("snapshot_mismatch", &[("name", name)]);
                panic!(
                    "\n\
                     === Snapshot mismatch: '{name}' ===\n\
                     File: {}\n\
                     Mode: {mode:?}\n\
                     Set BLESS=1 to update.\n\n\
                     Diff (- expected, + actual):\n{diff}",
                    path.display()
                );
            }
            log_step("snapshot_match", &[("name", name)]);
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            panic!(
                "\n\
                 === No snapshot found: '{name}' ===\n\
                 Expected at: {}\n\
                 Run with BLESS=1 to create it.\n\n\
                 Actual output:\n{actual}",
                path.display(),
            );
        }
        Err(e) => {
            panic!("Failed to read snapshot '{}': {e}", path.display());
        }
    }
}

// ============================================================================
// Convenience Macros
// ============================================================================

/// Assert that a view tree matches a stored snapshot.
///
/// Uses `CARGO_MANIFEST_DIR` to locate the snapshot directory automatically.
///
/// ```ignore
/// // Default mode: TrimTrailing
/// assert_snapshot!("form_initial", &screen.tree());
///
/// // Explicit mode
/// assert_snapshot!("form_exact", &screen.tree(), MatchMode::Exact);
/// ```
#[macro_export]
macro_rules! assert_snapshot {
    ($name:expr, $tree:expr) => {
        $crate::assert_tree_snapshot(
            $name,
            $tree,
            env!("CARGO_MANIFEST_DIR"),
            $crate::MatchMode::TrimTrailing,
        )
    };
    ($name:expr, $tree:expr, $mode:expr) => {
        $crate::assert_tree_snapshot($name, $tree, env!("CARGO_MANIFEST_DIR"), $mode)
    };
}
