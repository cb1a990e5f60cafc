//! Sheet-by-sheet export driver.
//!
//! Sheets are rendered strictly in queue order. Each rendered page goes
//! either into one growing combined document (saved after the last sheet) or
//! into its own single-page document saved immediately. Any render or sink
//! failure, or cancellation, aborts the batch; documents already saved stay
//! on disk. An empty batch writes nothing.

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tokio::task::JoinHandle;

use crate::cancel::CancelToken;
use crate::error::{BoxError, ExportError};
use crate::progress::{ExportProgress, ProgressSink};
use crate::settings::{ExportMode, ExportSettings};
use crate::sink::{DocumentSink, PageFormat};
use crate::unique_path::UniquePaths;

pub const PREPARING_TITLE: &str = "Preparing...";
pub const DONE_TITLE: &str = "Done";

/// Documents written by a finished export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Combined(PathBuf),
    Separate(Vec<PathBuf>),
}

impl ExportOutcome {
    pub fn paths(&self) -> &[PathBuf] {
        match self {
            ExportOutcome::Combined(path) => std::slice::from_ref(path),
            ExportOutcome::Separate(paths) => paths,
        }
    }

    pub fn summary(&self, output_folder: &Path) -> String {
        match self {
            ExportOutcome::Combined(path) => format!("created document: {}", path.display()),
            ExportOutcome::Separate(paths) => format!(
                "created {} document(s) in {}",
                paths.len(),
                output_folder.display()
            ),
        }
    }
}

struct Reporter<'a, P> {
    sink: &'a mut P,
    started: Instant,
    total: usize,
}

impl<P: ProgressSink> Reporter<'_, P> {
    fn report(&mut self, done: usize, title: impl Into<String>) {
        let snapshot = ExportProgress::snapshot(done, self.total, self.started.elapsed(), title);
        self.sink.report(snapshot);
    }
}

/// Runs one sink call on the blocking pool and hands the sink back.
async fn on_blocking_pool<S, R>(
    mut sink: S,
    call: impl FnOnce(&mut S) -> R + Send + 'static,
) -> Result<(S, R), ExportError>
where
    S: Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let out = call(&mut sink);
        (sink, out)
    })
    .await
    .map_err(ExportError::Worker)
}

/// Renders and saves every item.
///
/// `render(item, sheet, dpi)` produces the page image; `file_name(item, sheet)`
/// names per-sheet documents. Progress is reported once before the first
/// sheet, once per completed sheet and once after the last document is
/// saved. Directory creation and every sink call run on the blocking pool.
pub async fn run_export<T, R, Fut, N, S, P>(
    items: &[T],
    settings: &ExportSettings,
    render: R,
    file_name: N,
    mut sink: S,
    progress: &mut P,
    cancel: &CancelToken,
) -> Result<ExportOutcome, ExportError>
where
    R: Fn(&T, u32, u32) -> Fut,
    Fut: Future<Output = Result<Vec<u8>, BoxError>>,
    N: Fn(&T, u32) -> String,
    S: DocumentSink + Send + 'static,
    S::Document: Send + 'static,
    P: ProgressSink,
{
    if settings.mode == ExportMode::Vector {
        return Err(ExportError::Unsupported(ExportMode::Vector.as_str()));
    }

    let settings = settings.normalized();
    let folder = settings.output_folder.as_path();
    tokio::fs::create_dir_all(folder)
        .await
        .map_err(|err| ExportError::io(folder, err))?;

    let total = items.len();
    let first_sheet = settings.first_sheet();
    let last_sheet = first_sheet + total.saturating_sub(1) as u32;
    let mut reporter = Reporter {
        sink: progress,
        started: Instant::now(),
        total,
    };
    let mut paths = UniquePaths::new();

    log::info!(
        "exporting {total} sheet(s) to {} at {} dpi",
        folder.display(),
        settings.dpi
    );
    reporter.report(0, PREPARING_TITLE);

    // an empty batch never produces a document
    let mut combined = (settings.combined && total > 0)
        .then(|| (sink.create(), paths.reserve(settings.combined_path())));
    let mut written = Vec::new();

    for (i, item) in items.iter().enumerate() {
        if cancel.is_cancelled() {
            log::warn!("export cancelled after {i} of {total} sheet(s)");
            return Err(ExportError::Cancelled);
        }

        let sheet = first_sheet + i as u32;
        let pending = render(item, sheet, settings.dpi);
        let image = pending
            .await
            .map_err(|source| ExportError::Render { sheet, source })?;

        match combined.take() {
            Some((mut doc, path)) => {
                let (back, added) = on_blocking_pool(sink, move |s: &mut S| {
                    let added = s.add_page(&mut doc, &image, PageFormat::A4);
                    (doc, added)
                })
                .await?;
                sink = back;
                let (doc, added) = added;
                added.map_err(|err| ExportError::sink(&path, err))?;
                combined = Some((doc, path));
            }
            None => {
                let path = paths.reserve(folder.join(file_name(item, sheet)));
                let target = path.clone();
                let (back, saved) = on_blocking_pool(sink, move |s: &mut S| -> io::Result<()> {
                    let mut doc = s.create();
                    s.add_page(&mut doc, &image, PageFormat::A4)?;
                    s.save(doc, &target)
                })
                .await?;
                sink = back;
                saved.map_err(|err| ExportError::sink(&path, err))?;
                log::debug!("sheet {sheet} saved to {}", path.display());
                written.push(path);
            }
        }

        reporter.report(i + 1, format!("Sheet {sheet} / {last_sheet}"));
    }

    let outcome = match combined {
        Some((doc, path)) => {
            let target = path.clone();
            let (_, saved) = on_blocking_pool(sink, move |s: &mut S| s.save(doc, &target)).await?;
            saved.map_err(|err| ExportError::sink(&path, err))?;
            ExportOutcome::Combined(path)
        }
        None => ExportOutcome::Separate(written),
    };

    reporter.report(total, DONE_TITLE);
    log::info!("{}", outcome.summary(folder));
    Ok(outcome)
}

/// Runs [`run_export`] on a tokio task, taking ownership of everything it needs.
pub fn spawn_export<T, R, Fut, N, S, P>(
    items: Vec<T>,
    settings: ExportSettings,
    render: R,
    file_name: N,
    sink: S,
    mut progress: P,
    cancel: CancelToken,
) -> JoinHandle<Result<ExportOutcome, ExportError>>
where
    T: Send + Sync + 'static,
    R: Fn(&T, u32, u32) -> Fut + Send + 'static,
    Fut: Future<Output = Result<Vec<u8>, BoxError>> + Send + 'static,
    N: Fn(&T, u32) -> String + Send + 'static,
    S: DocumentSink + Send + 'static,
    S::Document: Send + 'static,
    P: ProgressSink + Send + 'static,
{
    tokio::spawn(async move {
        run_export(
            &items,
            &settings,
            render,
            file_name,
            sink,
            &mut progress,
            &cancel,
        )
        .await
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Counts pages per saved document.
    #[derive(Default, Clone)]
    struct PageCounter {
        saved: Arc<Mutex<Vec<(PathBuf, usize)>>>,
    }

    impl PageCounter {
        fn saved(&self) -> Vec<(PathBuf, usize)> {
            self.saved.lock().expect("saved list").clone()
        }
    }

    impl DocumentSink for PageCounter {
        type Document = usize;

        fn create(&mut self) -> usize {
            0
        }

        fn add_page(&mut self, doc: &mut usize, _image: &[u8], _format: PageFormat) -> io::Result<()> {
            *doc += 1;
            Ok(())
        }

        fn save(&mut self, doc: usize, path: &Path) -> io::Result<()> {
            self.saved.lock().expect("saved list").push((path.to_path_buf(), doc));
            Ok(())
        }
    }

    fn render_ok(_item: &u32, _sheet: u32, _dpi: u32) -> std::future::Ready<Result<Vec<u8>, BoxError>> {
        std::future::ready(Ok(vec![1, 2, 3]))
    }

    #[tokio::test]
    async fn vector_mode_is_refused_before_any_work() {
        let dir = tempfile::tempdir().expect("temp dir");
        let settings = ExportSettings {
            output_folder: dir.path().join("never"),
            mode: ExportMode::Vector,
            ..ExportSettings::default()
        };
        let sink = PageCounter::default();
        let mut reports: Vec<ExportProgress> = Vec::new();

        let err = run_export(
            &[1u32],
            &settings,
            |_: &u32, _, _| async { Ok::<_, BoxError>(Vec::new()) },
            |_: &u32, _| String::new(),
            sink.clone(),
            &mut reports,
            &CancelToken::new(),
        )
        .await
        .expect_err("vector mode must fail");

        assert!(matches!(err, ExportError::Unsupported("vector")));
        assert!(reports.is_empty());
        assert!(sink.saved().is_empty());
        assert!(!dir.path().join("never").exists());
    }

    #[tokio::test]
    async fn empty_batch_still_reports_boundaries() {
        let dir = tempfile::tempdir().expect("temp dir");
        let settings = ExportSettings {
            output_folder: dir.path().to_path_buf(),
            combined: false,
            ..ExportSettings::default()
        };
        let mut reports: Vec<ExportProgress> = Vec::new();

        let outcome = run_export(
            &[] as &[u32],
            &settings,
            render_ok,
            |_: &u32, sheet| format!("{sheet}.pdf"),
            PageCounter::default(),
            &mut reports,
            &CancelToken::new(),
        )
        .await
        .expect("empty export succeeds");

        assert_eq!(outcome, ExportOutcome::Separate(Vec::new()));
        let titles: Vec<&str> = reports.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec![PREPARING_TITLE, DONE_TITLE]);
        assert_eq!(reports[1].percent, 100.0);
    }

    #[tokio::test]
    async fn empty_combined_batch_saves_no_document() {
        let dir = tempfile::tempdir().expect("temp dir");
        let settings = ExportSettings {
            output_folder: dir.path().to_path_buf(),
            ..ExportSettings::default()
        };
        let sink = PageCounter::default();
        let mut reports: Vec<ExportProgress> = Vec::new();

        let outcome = run_export(
            &[] as &[u32],
            &settings,
            render_ok,
            |_: &u32, sheet| format!("{sheet}.pdf"),
            sink.clone(),
            &mut reports,
            &CancelToken::new(),
        )
        .await
        .expect("empty export succeeds");

        assert_eq!(outcome, ExportOutcome::Separate(Vec::new()));
        assert!(sink.saved().is_empty());
        assert_eq!(reports.len(), 2);
    }

    #[tokio::test]
    async fn combined_document_gets_every_page() {
        let dir = tempfile::tempdir().expect("temp dir");
        let settings = ExportSettings {
            output_folder: dir.path().to_path_buf(),
            start_sheet: 4,
            ..ExportSettings::default()
        };
        let sink = PageCounter::default();
        let mut reports: Vec<ExportProgress> = Vec::new();

        let outcome = run_export(
            &[10u32, 20, 30],
            &settings,
            render_ok,
            |_: &u32, sheet| format!("{sheet}.pdf"),
            sink.clone(),
            &mut reports,
            &CancelToken::new(),
        )
        .await
        .expect("export succeeds");

        let expected = dir.path().join("Report.pdf");
        assert_eq!(outcome, ExportOutcome::Combined(expected.clone()));
        assert_eq!(sink.saved(), vec![(expected, 3)]);
        assert_eq!(reports.len(), 5);
        assert_eq!(reports[1].title, "Sheet 4 / 6");
        assert_eq!(reports[3].title, "Sheet 6 / 6");
    }
}
