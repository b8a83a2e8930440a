#[derive(Debug, Clone)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    /// Emitted exactly once per accepted atom.
    AtomPlaced { placed: usize, total: usize },
    TaskFinish,

    Message(String),
}

impl Progress {
    /// Completed fraction in `[0, 1]` for [`Progress::AtomPlaced`] events.
    pub fn fraction(&self) -> Option<f64> {
        match *self {
            Progress::AtomPlaced { placed, total } if total > 0 => {
                Some(placed as f64 / total as f64)
            }
            Progress::AtomPlaced { .. } => Some(1.0),
            _ => None,
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
}
