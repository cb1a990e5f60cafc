//! Export side of the mosaic viewer.
//!
//! This crate provides:
//! - **Export runner**: renders queued sheets in order into one combined or
//!   many per-sheet documents, with progress, ETA and cancellation
//! - **Session caches**: read-through caches of parsed geometry and result
//!   tables, and sheet preparation on top of them
//! - **Export queue** and **export settings**
//!
//! Page pixels and document encoding stay with the caller, behind the
//! render function and [`DocumentSink`].

pub mod cancel;
pub mod error;
pub mod progress;
pub mod queue;
pub mod runner;
pub mod session;
pub mod settings;
pub mod sink;
pub mod unique_path;

pub use cancel::CancelToken;
pub use error::{BoxError, ExportError};
pub use progress::{ExportProgress, NoProgress, ProgressSink, format_duration};
pub use queue::ExportQueue;
pub use runner::{ExportOutcome, run_export, spawn_export};
pub use session::{KeyedCache, SessionCaches, SheetContent, SheetPreparer};
pub use settings::{ExportMode, ExportSettings, load_settings, save_settings};
pub use sink::{DocumentSink, PageFormat};
pub use unique_path::{UniquePaths, ensure_unique_path};
