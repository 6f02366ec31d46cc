//! Report Previewer and Export Builder
//!
//! Both read the form tree through one traversal (`traversal`) and differ
//! only in presentation: the preview shows placeholders for unreported
//! disclosures, the export paginates and says "Not reported".

pub mod export;
pub mod formatters;
pub mod preview;
pub mod traversal;

pub use export::{build_export, prepare_export, ExportDocument, PageBody, EXPORT_FILE_NAME};
pub use formatters::{HtmlFormatter, JsonFormatter, MarkdownFormatter};
pub use preview::{build_preview, ReportPreview};
pub use traversal::{build_outline, ContentIndexEntry, ReportOutline};
