//! `TerminalReporter` — Presentation-layer implementation of `ProgressReporter`.
//!
//! Emits the step log, one line per attempted step:
//!
//! ```text
//! [INFO] Refreshing package index... [done]
//! [INFO] Adding multimedia repository to the source list... [already satisfied]
//! [ERRO] Installing native audio and XML libraries... [failed: apt-get exited with code 100: ...]
//! ```
//!
//! While a step runs on a TTY, a spinner shows the in-flight description;
//! it is cleared before the final line prints so the log stays clean.

use std::cell::RefCell;

use indicatif::ProgressBar;
use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::domain::report::{StepOutcome, StepResult};
use crate::output::{OutputContext, progress};

/// Terminal step reporter that wraps an `OutputContext`.
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
    active: RefCell<Option<ProgressBar>>,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self {
            ctx,
            active: RefCell::new(None),
        }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn begin(&self, description: &str) {
        if self.ctx.show_progress() {
            let pb = progress::spinner(&format!("{description}..."));
            *self.active.borrow_mut() = Some(pb);
        }
    }

    fn complete(&self, description: &str, result: &StepResult) {
        if let Some(pb) = self.active.borrow_mut().take() {
            pb.finish_and_clear();
        }
        match result.outcome {
            StepOutcome::Succeeded => {
                if !self.ctx.quiet {
                    println!(
                        "{} {description}... {}",
                        "[INFO]".style(self.ctx.styles.info),
                        "[done]".style(self.ctx.styles.success),
                    );
                }
            }
            StepOutcome::SkippedAlreadySatisfied => {
                if !self.ctx.quiet {
                    println!(
                        "{} {description}... {}",
                        "[INFO]".style(self.ctx.styles.info),
                        "[already satisfied]".style(self.ctx.styles.dim),
                    );
                }
            }
            StepOutcome::Failed => {
                let message = result.message.as_deref().unwrap_or("unknown error");
                eprintln!(
                    "{} {description}... {}",
                    "[ERRO]".style(self.ctx.styles.error),
                    format!("[failed: {message}]").style(self.ctx.styles.error),
                );
            }
        }
    }
}
