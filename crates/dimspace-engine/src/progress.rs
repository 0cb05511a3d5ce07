//! Progress side channel for function runs.

/// Observes a function run.
///
/// Receives the title and the number of steps once, then one
/// [`increment`](Self::increment) per surviving combination. Reporters are
/// purely observational and cannot influence the run.
pub trait ProgressReporter {
    fn start(&mut self, title: &str, total: usize);

    fn increment(&mut self);

    fn finish(&mut self) {}
}

/// Reporter that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn start(&mut self, _title: &str, _total: usize) {}

    fn increment(&mut self) {}
}

/// Reporter that records what it was told. Handy in tests and for callers
/// that only need the final count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountingProgress {
    pub title: Option<String>,
    pub total: usize,
    pub steps: usize,
    pub finished: bool,
}

impl ProgressReporter for CountingProgress {
    fn start(&mut self, title: &str, total: usize) {
        self.title = Some(title.to_string());
        self.total = total;
        self.steps = 0;
        self.finished = false;
    }

    fn increment(&mut self) {
        self.steps += 1;
    }

    fn finish(&mut self) {
        self.finished = true;
    }
}
