use clap::Parser;
use png_squeeze::cli::{Args, Commands};
use png_squeeze::utils::{calculate_compression_ratio, format_file_size};
use png_squeeze::{compress_one, error, info, logger, print_summary, run, ConsoleSink, Job};
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    logger::set_quiet_mode(args.quiet);
    logger::set_verbose_mode(args.verbose);

    match args.command {
        Commands::Batch {
            input,
            output,
            quality,
            jobs,
        } => {
            let job = Job::new(input, output, quality)?.with_threads(jobs);
            Ok(run_batch(&job))
        }
        Commands::Compress {
            input,
            output,
            quality,
        } => Ok(compress_single(&input, &output, quality)),
    }
}

fn run_batch(job: &Job) -> ExitCode {
    info!("🚀 Starting batch compression...");
    info!("📁 Input: {}", job.input_dir().display());
    info!("📁 Output: {}", job.output_dir().display());

    let start_time = Instant::now();
    let mut sink = ConsoleSink;

    // directory-level failures were already reported by the sink
    let Ok(report) = run(job, &mut sink) else {
        return ExitCode::FAILURE;
    };

    if !report.is_empty() {
        print_summary(&report, start_time.elapsed());
    }

    if report.all_succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn compress_single(input: &Path, output: &Path, quality: u8) -> ExitCode {
    info!("🗜️  Compressing image: {}", input.display());
    info!("📁 Output: {}", output.display());

    match compress_one(input, output, quality) {
        Ok(stats) => {
            info!(
                "📊 Original size: {} bytes ({})",
                stats.original_size,
                format_file_size(stats.original_size)
            );
            info!(
                "📈 Compressed size: {} bytes ({}), {} palette colors",
                stats.compressed_size,
                format_file_size(stats.compressed_size),
                stats.palette_len
            );

            let ratio = calculate_compression_ratio(stats.original_size, stats.compressed_size);
            if ratio > 0.0 {
                info!("✅ Successfully reduced file size by {:.1}%", ratio);
            } else {
                info!("⚠️  File size increased by {:.1}%", ratio.abs());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
