pub mod batch;
pub mod output_manager;
pub mod run_report;

pub use batch::{BatchExtractor, ProcessedStyles};
pub use output_manager::{encode_jpeg, sanitize_filename, OutputManager};
pub use run_report::RunReport;
