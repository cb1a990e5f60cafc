//! Export progress snapshots and the sinks that receive them.

use std::sync::mpsc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;

/// One progress report. `remaining` is absent until a sheet has completed.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportProgress {
    pub done: usize,
    pub total: usize,
    pub percent: f64,
    pub elapsed: Duration,
    pub remaining: Option<Duration>,
    pub title: String,
}

impl ExportProgress {
    /// Snapshot with a linear remaining-time projection:
    /// `elapsed / done * (total - done)`.
    pub fn snapshot(done: usize, total: usize, elapsed: Duration, title: impl Into<String>) -> Self {
        let percent = if total == 0 {
            100.0
        } else {
            done as f64 * 100.0 / total as f64
        };
        let remaining = (done > 0).then(|| {
            let per_item = elapsed.as_secs_f64() / done as f64;
            Duration::from_secs_f64(per_item * total.saturating_sub(done) as f64)
        });
        Self {
            done,
            total,
            percent,
            elapsed,
            remaining,
            title: title.into(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.done >= self.total
    }

    /// `42%  (5/12)  elapsed: 00:10  remaining: 00:14`
    pub fn status_line(&self) -> String {
        format!(
            "{:.0}%  ({}/{})  elapsed: {}  remaining: {}",
            self.percent,
            self.done,
            self.total,
            format_duration(Some(self.elapsed)),
            format_duration(self.remaining)
        )
    }
}

/// `mm:ss`, `hh:mm:ss` from one hour up, `-` when absent.
pub fn format_duration(duration: Option<Duration>) -> String {
    let Some(duration) = duration else {
        return "-".to_string();
    };
    let secs = duration.as_secs();
    let (h, m, s) = (secs / 3600, secs / 60 % 60, secs % 60);
    if h > 0 {
        format!("{h:02}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}

/// Consumer of progress reports, invoked synchronously by the orchestrator.
pub trait ProgressSink {
    fn report(&mut self, progress: ExportProgress);
}

/// Discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _progress: ExportProgress) {}
}

impl ProgressSink for Vec<ExportProgress> {
    fn report(&mut self, progress: ExportProgress) {
        self.push(progress);
    }
}

impl ProgressSink for mpsc::Sender<ExportProgress> {
    fn report(&mut self, progress: ExportProgress) {
        if self.send(progress).is_err() {
            log::debug!("progress receiver dropped");
        }
    }
}

impl ProgressSink for UnboundedSender<ExportProgress> {
    fn report(&mut self, progress: ExportProgress) {
        if self.send(progress).is_err() {
            log::debug!("progress receiver dropped");
        }
    }
}

impl<T: ProgressSink + ?Sized> ProgressSink for &mut T {
    fn report(&mut self, progress: ExportProgress) {
        (**self).report(progress);
    }
}
