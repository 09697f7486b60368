use crate::error::{CompressionError, Result};
use crate::job::{FileResult, Job, Outcome};
use crate::processing::compress_one;
use crate::report::{StatusLevel, StatusSink};
use crate::utils::{calculate_compression_ratio, format_file_size, has_png_name};
use crate::validation::{ensure_output_directory, validate_input};
use crate::{info, verbose, warn};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Duration;
use walkdir::WalkDir;

/// Every result of one batch run, in discovery order.
#[derive(Debug, Default)]
pub struct BatchReport {
    results: Vec<FileResult>,
}

impl BatchReport {
    pub fn results(&self) -> &[FileResult] {
        &self.results
    }

    pub fn into_results(self) -> Vec<FileResult> {
        self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.len() - self.succeeded()
    }

    /// True when no file failed. An empty report counts as success.
    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }

    pub fn total_original_size(&self) -> u64 {
        self.results
            .iter()
            .filter_map(|r| r.stats())
            .map(|s| s.original_size)
            .sum()
    }

    pub fn total_compressed_size(&self) -> u64 {
        self.results
            .iter()
            .filter_map(|r| r.stats())
            .map(|s| s.compressed_size)
            .sum()
    }

    pub fn compression_ratio(&self) -> f64 {
        calculate_compression_ratio(self.total_original_size(), self.total_compressed_size())
    }
}

/// Runs a whole batch: validate, prepare output, discover, convert.
///
/// Directory-level failures are reported once to `sink` and returned as
/// `Err`. Finding no PNG files is reported as an informational line and
/// yields an empty report. Per-file failures never stop the batch; each file
/// gets exactly one line and one [`FileResult`].
pub fn run(job: &Job, sink: &mut dyn StatusSink) -> Result<BatchReport> {
    verbose!(
        "Input: {}, output: {}, quality: {}, threads: {}",
        job.input_dir().display(),
        job.output_dir().display(),
        job.quality(),
        job.threads()
    );

    validate_input(job.input_dir()).or_else(|e| abort(sink, e))?;
    ensure_output_directory(job.output_dir()).or_else(|e| abort(sink, e))?;
    let images = discover_images(job.input_dir()).or_else(|e| abort(sink, e))?;

    if images.is_empty() {
        let notice = CompressionError::NoImagesFound(job.input_dir().to_path_buf());
        sink.status(StatusLevel::Info, &notice.status_message());
        return Ok(BatchReport::default());
    }

    verbose!("Found {} PNG files", images.len());

    let results = if job.threads() > 1 {
        convert_parallel(&images, job, sink)?
    } else {
        images
            .iter()
            .map(|source| {
                let result = process_file(source, job.output_dir(), job.quality());
                report_result(sink, &result);
                result
            })
            .collect()
    };

    Ok(BatchReport { results })
}

fn abort<T>(sink: &mut dyn StatusSink, err: CompressionError) -> Result<T> {
    sink.status(StatusLevel::Error, &err.status_message());
    Err(err)
}

fn convert_parallel(
    images: &[PathBuf],
    job: &Job,
    sink: &mut dyn StatusSink,
) -> Result<Vec<FileResult>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(job.threads())
        .build()
        .map_err(|e| CompressionError::ThreadPool(e.to_string()))
        .or_else(|e| abort(sink, e))?;

    let results: Vec<FileResult> = pool.install(|| {
        images
            .par_iter()
            .map(|source| process_file(source, job.output_dir(), job.quality()))
            .collect()
    });

    // collected in discovery order
    for result in &results {
        report_result(sink, result);
    }

    Ok(results)
}

fn report_result(sink: &mut dyn StatusSink, result: &FileResult) {
    let level = if result.is_success() {
        StatusLevel::Success
    } else {
        StatusLevel::Error
    };
    sink.status(level, &result.status_line());
}

fn process_file(source: &Path, output_dir: &Path, quality: u8) -> FileResult {
    let (destination, outcome) = match destination_for(source, output_dir) {
        Some(destination) => {
            let outcome = match compress_one(source, &destination, quality) {
                Ok(stats) => Outcome::Success(stats),
                Err(e) => Outcome::Failed(e),
            };
            (destination, outcome)
        }
        None => (
            output_dir.to_path_buf(),
            Outcome::Failed(CompressionError::codec(source, "path has no file name")),
        ),
    };

    FileResult {
        source: source.to_path_buf(),
        destination,
        outcome,
    }
}

/// Lists the PNG files directly inside `input_dir`.
///
/// Matching is on the file name, case-insensitively. Subdirectories are not
/// entered and are never returned, even when named like `x.png`. The result
/// is sorted by file name so runs are reproducible.
pub fn discover_images(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut images = Vec::new();

    let walker = WalkDir::new(input_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry?;
        let path = entry.path();

        if path.is_file() && has_png_name(path) {
            images.push(path.to_path_buf());
        }
    }

    Ok(images)
}

/// Output file for `source`: same file name, inside `output_dir`.
pub fn destination_for(source: &Path, output_dir: &Path) -> Option<PathBuf> {
    source.file_name().map(|name| output_dir.join(name))
}

pub fn print_summary(report: &BatchReport, elapsed: Duration) {
    info!("\n📊 Batch Compression Summary:");
    info!("  📁 Total files processed: {}", report.len());
    info!(
        "  📊 Total original size: {}",
        format_file_size(report.total_original_size())
    );
    info!(
        "  📊 Total compressed size: {}",
        format_file_size(report.total_compressed_size())
    );
    info!(
        "  🎯 Overall compression ratio: {:.1}%",
        report.compression_ratio()
    );
    info!("  ⏱️  Total time: {:?}", elapsed);

    if report.failed() > 0 {
        warn!("Failed files: {}", report.failed());
    }
}
