/// Starting value of the quality slider in the desktop tool this replaces.
pub const DEFAULT_QUALITY: u8 = 85;
pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 100;

/// Upper bound on palette entries in an 8-bit indexed PNG.
pub const MAX_PALETTE_COLORS: usize = 256;

/// NeuQuant sampling factor: 1 samples every pixel, 30 is the fastest.
pub const NEUQUANT_SAMPLE_FACTOR: i32 = 10;

pub const PNG_EXTENSION: &str = ".png";

pub const OXIPNG_PRESET: u8 = 4;
pub const ZOPFLI_QUALITY_THRESHOLD: u8 = 90;
pub const HIGH_QUALITY_THRESHOLD: u8 = 70;
pub const ZOPFLI_ITERATIONS: u8 = 15;
pub const LIBDEFLATER_HIGH_LEVEL: u8 = 12;
pub const LIBDEFLATER_LOW_LEVEL: u8 = 8;

// Status line texts shown to the user
pub const MSG_INPUT_NOT_FOUND: &str = "Error: Input directory does not exist.";
pub const MSG_INPUT_EMPTY: &str = "Directory is empty!";
pub const MSG_NO_PNG_FILES: &str = "No PNG files found in the input directory.";

// Common output message prefixes
pub const SUCCESS_PREFIX: &str = "✅";
pub const WARNING_PREFIX: &str = "⚠️";
pub const ERROR_PREFIX: &str = "❌";
pub const INFO_PREFIX: &str = "📋";
pub const VERBOSE_PREFIX: &str = "🔍";
