pub mod batch;
pub mod cli;
pub mod constants;
pub mod error;
pub mod job;
pub mod logger;
pub mod palette;
pub mod processing;
pub mod report;
pub mod utils;
pub mod validation;

pub use batch::{destination_for, discover_images, print_summary, run, BatchReport};
pub use error::{CompressionError, Result};
pub use job::{CompressionStats, FileResult, Job, Outcome};
pub use palette::{quantize, IndexedImage};
pub use processing::compress_one;
pub use report::{ConsoleSink, MemorySink, StatusLevel, StatusSink};
pub use validation::{ensure_output_directory, validate_input};
