pub mod report;
pub mod result;
pub mod run;
pub mod validator;
pub mod writer;

pub use report::{DryRunPlan, ExtractionReport};
pub use result::{ExtractionProgress, ExtractionResult, ExtractionSummary, FailedEntry, FailureKind};
pub use run::{resolve_output_root, ExtractionRun, RunEvent, RunState};
pub use validator::{ProjectValidator, DEFAULT_EXPECTED_FILES};
pub use writer::{ensure_directory, FileWriter, WrittenEntry};
