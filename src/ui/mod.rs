pub mod output;
pub mod progress;
pub mod reporter;

pub use output::{OutputFormatter, OutputMode, ProgressAwareOutput};
pub use progress::ProgressManager;
pub use reporter::{MemoryReporter, ReportLevel, Reporter};
