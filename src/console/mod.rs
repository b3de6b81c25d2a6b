//! Console ports used by interactive categorization
//!
//! Categorization never touches stdin or the screen directly. It asks questions
//! through a [`Prompt`] and announces each row through a [`CategorizeUi`], so the
//! terminal can be swapped for a script in tests and batch runs.

pub mod prompt;
pub mod ui;

pub use prompt::{Prompt, ScriptedPrompt, TerminalPrompt};
pub use ui::{CategorizeUi, RowReady, SilentUi, TerminalUi};
