// Report layout and PDF export.
// Implements: glyph-aware measurement, greedy wrapping, fixed-line pagination, printpdf output.
// Export is CPU-bound and must run inside tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod handlers;
pub mod paginate;
pub mod pdf;
pub mod wrap;

pub use font_metrics::{default_page_config, PageConfig, ReportFont};
pub use pdf::ExportError;
