use crate::constants::{DEFAULT_QUALITY, MAX_QUALITY, MIN_QUALITY};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "png-squeeze",
    about = "Batch palette quantization for directories of PNG images",
    long_about = "png-squeeze reduces PNG file sizes by converting each image to an adaptive \
                  palette of at most 256 colors and re-encoding it with an oxipng optimization pass. \
                  Every file in the input directory is converted independently; one broken file \
                  never stops the batch.",
    version,
    after_help = "EXAMPLES:\n  \
    png-squeeze batch --input ./screenshots --output ./compressed -q 85\n  \
    png-squeeze batch -i ./art -o ./art-small -j 0\n  \
    png-squeeze compress logo.png logo-small.png"
)]
pub struct Args {
    #[arg(short = 'Q', long, global = true, help = "Only print errors")]
    pub quiet: bool,

    #[arg(short = 'v', long, global = true, help = "Print per-file details")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        about = "Compress every PNG in a directory",
        long_about = "Convert every *.png file directly inside the input directory (not recursive) \
                      and write the results, with the same file names, to the output directory. \
                      The output directory is created if it does not exist."
    )]
    Batch {
        #[arg(short = 'i', long, help = "Directory containing the PNG files")]
        input: PathBuf,

        #[arg(short = 'o', long, help = "Directory to write compressed copies to")]
        output: PathBuf,

        #[arg(
            short = 'q',
            long,
            default_value_t = DEFAULT_QUALITY,
            value_parser = clap::value_parser!(u8).range(MIN_QUALITY as i64..=MAX_QUALITY as i64),
            help = "Compression quality (1-100)",
            long_help = "Quality hint from 1 to 100. PNG is lossless, so this never changes pixels; \
                         it selects the optimization effort: >=90 uses Zopfli, >=70 uses high \
                         compression, <70 uses standard compression."
        )]
        quality: u8,

        #[arg(
            short = 'j',
            long,
            default_value_t = 1,
            help = "Number of files converted in parallel (0 = one per CPU)"
        )]
        jobs: usize,
    },

    #[command(
        about = "Compress a single PNG file",
        long_about = "Convert one PNG file to a palette-quantized, optimized PNG."
    )]
    Compress {
        #[arg(help = "Input PNG file path")]
        input: PathBuf,

        #[arg(help = "Output PNG file path")]
        output: PathBuf,

        #[arg(
            short = 'q',
            long,
            default_value_t = DEFAULT_QUALITY,
            value_parser = clap::value_parser!(u8).range(MIN_QUALITY as i64..=MAX_QUALITY as i64),
            help = "Compression quality (1-100)"
        )]
        quality: u8,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_defaults() {
        let args = Args::try_parse_from(["png-squeeze", "batch", "-i", "in", "-o", "out"]).unwrap();
        match args.command {
            Commands::Batch {
                input,
                output,
                quality,
                jobs,
            } => {
                assert_eq!(input, PathBuf::from("in"));
                assert_eq!(output, PathBuf::from("out"));
                assert_eq!(quality, 85);
                assert_eq!(jobs, 1);
            }
            _ => panic!("expected batch command"),
        }
        assert!(!args.quiet);
    }

    #[test]
    fn test_quality_out_of_range_rejected() {
        let result =
            Args::try_parse_from(["png-squeeze", "batch", "-i", "in", "-o", "out", "-q", "0"]);
        assert!(result.is_err());

        let result =
            Args::try_parse_from(["png-squeeze", "compress", "a.png", "b.png", "-q", "101"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args =
            Args::try_parse_from(["png-squeeze", "compress", "a.png", "b.png", "--verbose"]).unwrap();
        assert!(args.verbose);
    }
}
