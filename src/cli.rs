use std::path::PathBuf;

use clap::Parser;
use statusline::config::ColorLevel;

/// Render configured status lines from a JSON context read on stdin.
#[derive(Parser, Debug)]
#[command(name = "statusline", version, about, long_about = None)]
pub struct Cli {
    /// Settings file (default: STATUSLINE_CONFIG_PATH, then the platform config dir)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Terminal width in columns, skipping detection
    #[arg(long, value_name = "COLS")]
    pub width: Option<usize>,

    /// Color depth for this run: none, basic, 256 or truecolor
    #[arg(long, value_name = "LEVEL")]
    pub color_level: Option<ColorLevel>,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
