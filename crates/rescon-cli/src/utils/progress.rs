use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use rescon::engine::progress::{Progress, ProgressCallback, StructureProgress, StructureStatus};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

/// Running totals over the structures of the current phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchTally {
    pub structures: usize,
    pub contacts: usize,
    pub skipped: Vec<String>,
}

impl BatchTally {
    fn record(&mut self, done: &StructureProgress) {
        self.structures += 1;
        match &done.status {
            StructureStatus::Extracted { contacts, .. } => self.contacts += contacts,
            StructureStatus::Skipped(_) => self.skipped.push(done.id.clone()),
            StructureStatus::ChainSelected(_) => {}
        }
    }

    fn summary(&self) -> String {
        let mut parts = vec![format!("{} structures", self.structures)];
        if self.contacts > 0 {
            parts.push(format!("{} contacts", self.contacts));
        }
        if !self.skipped.is_empty() {
            parts.push(format!("{} skipped", self.skipped.len()));
        }
        parts.join(", ")
    }
}

struct BatchBar {
    bar: ProgressBar,
    phase: &'static str,
    tally: BatchTally,
}

/// Draws workflow progress on stderr: a spinner while a phase starts, a bar
/// over its structures, and a one-line tally when the phase ends. Skipped
/// structures are printed above the bar as they happen.
#[derive(Clone)]
pub struct CliProgressHandler {
    state: Arc<Mutex<BatchBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    /// Tracks progress without drawing.
    pub fn hidden() -> Self {
        Self::with_target(ProgressDrawTarget::hidden())
    }

    /// `--quiet` runs draw nothing.
    pub fn for_quiet(quiet: bool) -> Self {
        if quiet { Self::hidden() } else { Self::new() }
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), target).with_style(spinner_style());
        bar.finish_and_clear();
        Self {
            state: Arc::new(Mutex::new(BatchBar {
                bar,
                phase: "",
                tally: BatchTally::default(),
            })),
        }
    }

    /// Totals of the most recent phase.
    pub fn tally(&self) -> BatchTally {
        self.state
            .lock()
            .map(|state| state.tally.clone())
            .unwrap_or_default()
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let state = self.state.clone();
        Box::new(move |progress: Progress| {
            let Ok(mut state) = state.lock() else {
                warn!("Progress state mutex was poisoned. Cannot update progress.");
                return;
            };
            state.apply(progress);
        })
    }
}

impl BatchBar {
    fn apply(&mut self, progress: Progress) {
        match progress {
            Progress::PhaseStart { name } => {
                self.phase = name;
                self.tally = BatchTally::default();
                self.bar.reset();
                self.bar.set_length(0);
                self.bar.set_style(spinner_style());
                self.bar.set_message(name);
                self.bar
                    .enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
            }
            Progress::TaskStart { total_steps } => {
                self.bar.disable_steady_tick();
                self.bar.reset();
                self.bar.set_length(total_steps);
                self.bar.set_style(bar_style());
                self.bar.set_prefix(self.phase);
            }
            Progress::TaskIncrement => self.bar.inc(1),
            Progress::TaskFinish => {
                if let Some(length) = self.bar.length() {
                    self.bar.set_position(length);
                }
            }
            Progress::Structure(done) => {
                if let StructureStatus::Skipped(reason) = &done.status {
                    self.bar.println(format!("  ⚠ {} skipped: {}", done.id, reason));
                }
                self.bar.set_message(format!("{} · {}", done, done.status));
                self.tally.record(&done);
            }
            Progress::PhaseFinish => {
                self.bar.disable_steady_tick();
                let summary = if self.tally.structures == 0 {
                    format!("✓ {}", self.phase)
                } else {
                    format!("✓ {}: {}", self.phase, self.tally.summary())
                };
                self.bar.set_style(spinner_style());
                self.bar.finish_with_message(summary);
            }
        }
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{prefix:<20} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-")
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn done(position: usize, id: &str, status: StructureStatus) -> Progress {
        Progress::Structure(StructureProgress {
            position,
            total: 3,
            id: id.to_string(),
            status,
        })
    }

    fn message(handler: &CliProgressHandler) -> String {
        handler.state.lock().unwrap().bar.message()
    }

    #[test]
    fn handler_starts_finished_and_empty() {
        let handler = CliProgressHandler::hidden();
        let state = handler.state.lock().unwrap();
        assert!(state.bar.is_finished());
        assert_eq!(state.tally, BatchTally::default());
    }

    #[test]
    fn quiet_runs_draw_nothing() {
        let quiet = CliProgressHandler::for_quiet(true);
        assert!(quiet.state.lock().unwrap().bar.is_hidden());
    }

    #[test]
    fn structure_events_update_bar_and_tally() {
        let handler = CliProgressHandler::hidden();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart {
            name: "Contact extraction",
        });
        assert_eq!(message(&handler), "Contact extraction");

        callback(Progress::TaskStart { total_steps: 3 });
        callback(done(
            1,
            "1g16",
            StructureStatus::Extracted {
                contacts: 40,
                excluded: 0,
            },
        ));
        callback(Progress::TaskIncrement);
        assert_eq!(message(&handler), "(1/3) 1g16 · 40 contacts");
        assert_eq!(handler.state.lock().unwrap().bar.position(), 1);

        callback(done(
            2,
            "1gwn",
            StructureStatus::Extracted {
                contacts: 2,
                excluded: 1,
            },
        ));
        callback(Progress::TaskIncrement);
        callback(Progress::TaskFinish);
        callback(Progress::PhaseFinish);

        assert_eq!(
            message(&handler),
            "✓ Contact extraction: 2 structures, 42 contacts"
        );
        let tally = handler.tally();
        assert_eq!(tally.structures, 2);
        assert_eq!(tally.contacts, 42);
        assert!(handler.state.lock().unwrap().bar.is_finished());
    }

    #[test]
    fn skipped_structures_are_counted() {
        let handler = CliProgressHandler::hidden();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart {
            name: "Chain preparation",
        });
        callback(Progress::TaskStart { total_steps: 2 });
        callback(done(1, "1g16", StructureStatus::ChainSelected('A')));
        callback(done(
            2,
            "4mit",
            StructureStatus::Skipped("no chain with the domain of interest".into()),
        ));
        callback(Progress::PhaseFinish);

        assert_eq!(handler.tally().skipped, vec!["4mit".to_string()]);
        assert_eq!(
            message(&handler),
            "✓ Chain preparation: 2 structures, 1 skipped"
        );
    }

    #[test]
    fn new_phase_resets_tally() {
        let handler = CliProgressHandler::hidden();
        let callback = handler.get_callback();
        callback(Progress::PhaseStart { name: "First" });
        callback(done(1, "1g16", StructureStatus::ChainSelected('A')));
        callback(Progress::PhaseStart { name: "Second" });
        callback(Progress::PhaseFinish);

        assert_eq!(handler.tally(), BatchTally::default());
        assert_eq!(message(&handler), "✓ Second");
    }

    #[test]
    fn callback_is_thread_safe() {
        let handler = CliProgressHandler::hidden();
        let callback = handler.get_callback();

        thread::spawn(move || {
            callback(Progress::PhaseStart { name: "Mapping" });
            callback(Progress::TaskIncrement);
            callback(Progress::PhaseFinish);
        })
        .join()
        .unwrap();

        assert_eq!(message(&handler), "✓ Mapping");
    }
}
