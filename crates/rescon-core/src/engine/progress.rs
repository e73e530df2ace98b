use std::fmt;

/// Progress events emitted by long-running workflows.
///
/// A phase groups one or more tasks; a task has a known number of steps.
/// Events may arrive from several worker threads during a parallel batch.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    /// One structure of a batch is done. `position` counts completions, so
    /// it is the `k` of `(k/n)` even when structures finish out of order.
    Structure(StructureProgress),
}

/// What happened to one structure of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureStatus {
    Extracted { contacts: usize, excluded: usize },
    ChainSelected(char),
    Skipped(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureProgress {
    pub position: usize,
    pub total: usize,
    pub id: String,
    pub status: StructureStatus,
}

impl StructureProgress {
    pub fn is_skipped(&self) -> bool {
        matches!(self.status, StructureStatus::Skipped(_))
    }
}

/// Renders as `(k/n) id`.
impl fmt::Display for StructureProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}/{}) {}", self.position, self.total, self.id)
    }
}

impl fmt::Display for StructureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureStatus::Extracted { contacts, excluded: 0 } => {
                write!(f, "{} contacts", contacts)
            }
            StructureStatus::Extracted { contacts, excluded } => {
                write!(f, "{} contacts, {} residues excluded", contacts, excluded)
            }
            StructureStatus::ChainSelected(chain) => write!(f, "chain {}", chain),
            StructureStatus::Skipped(reason) => write!(f, "skipped: {}", reason),
        }
    }
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    /// Reports a phase holding one task of `total_steps` around `f`.
    pub fn phase<T>(&self, name: &'static str, total_steps: usize, f: impl FnOnce() -> T) -> T {
        self.report(Progress::PhaseStart { name });
        self.report(Progress::TaskStart {
            total_steps: total_steps as u64,
        });
        let result = f();
        self.report(Progress::TaskFinish);
        self.report(Progress::PhaseFinish);
        result
    }
}
