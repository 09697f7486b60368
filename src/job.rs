use crate::constants::{MAX_QUALITY, MIN_QUALITY};
use crate::error::{CompressionError, Result};
use crate::utils::{calculate_compression_ratio, format_file_size};
use std::path::{Path, PathBuf};

/// One invocation of the batch compressor.
///
/// Built once by the presentation layer and passed by value into
/// [`crate::batch::run`]; it does not change while the run is in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    input_dir: PathBuf,
    output_dir: PathBuf,
    quality: u8,
    threads: usize,
}

impl Job {
    /// Creates a sequential job.
    ///
    /// # Errors
    /// * `CompressionError::InvalidQuality` if `quality` is outside `1..=100`
    pub fn new(
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        quality: u8,
    ) -> Result<Self> {
        validate_quality(quality)?;

        Ok(Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            quality,
            threads: 1,
        })
    }

    /// Number of files converted concurrently. `0` means one worker per CPU.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = if threads == 0 { num_cpus::get() } else { threads };
        self
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    pub fn threads(&self) -> usize {
        self.threads
    }
}

pub fn validate_quality(quality: u8) -> Result<()> {
    if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
        return Err(CompressionError::InvalidQuality(quality));
    }
    Ok(())
}

/// Sizes measured for one successful conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionStats {
    pub original_size: u64,
    pub compressed_size: u64,
    pub palette_len: usize,
}

impl CompressionStats {
    pub fn ratio(&self) -> f64 {
        calculate_compression_ratio(self.original_size, self.compressed_size)
    }
}

#[derive(Debug)]
pub enum Outcome {
    Success(CompressionStats),
    Failed(CompressionError),
}

/// The outcome of converting one discovered file.
#[derive(Debug)]
pub struct FileResult {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub outcome: Outcome,
}

impl FileResult {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success(_))
    }

    pub fn stats(&self) -> Option<&CompressionStats> {
        match &self.outcome {
            Outcome::Success(stats) => Some(stats),
            Outcome::Failed(_) => None,
        }
    }

    /// Renders the result as a single status line.
    pub fn status_line(&self) -> String {
        match &self.outcome {
            Outcome::Success(stats) => format!(
                "Compressed {} to {} ({} -> {}, {:.1}% saved)",
                self.source.display(),
                self.destination.display(),
                format_file_size(stats.original_size),
                format_file_size(stats.compressed_size),
                stats.ratio()
            ),
            Outcome::Failed(err @ CompressionError::Codec { .. }) => err.to_string(),
            Outcome::Failed(err) => {
                format!("Error compressing {}: {}", self.source.display(), err)
            }
        }
    }
}
