pub mod logging;
pub mod output;
pub mod progress;

pub use logging::init_logging;
pub use output::{OutputFormatter, OutputMode};
pub use progress::ProgressManager;
