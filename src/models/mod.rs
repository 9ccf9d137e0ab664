pub mod document;
pub mod error_report;
pub mod extraction;
pub mod layout;

pub use document::{Document, DocumentState};
pub use error_report::ErrorReport;
pub use extraction::{Extraction, ExtractionMap};
pub use layout::{Layout, PageLayout, PreviewSize};
