mod cli;

use std::io::Write;

use anstream::{AutoStream, ColorChoice};
use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use statusline::config::{ColorLevel, Settings, get_config_path, set_config_path};
use statusline::render::{detect_terminal_width, render_lines};
use statusline::{RenderContext, WidgetRegistry};

use crate::cli::Cli;

fn init_logging(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .init();
}

fn load_settings(cli: &Cli) -> Settings {
    let mut settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            let path = get_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "settings".to_string());
            eprintln!("statusline: ignoring {path}: {e}");
            Settings::default()
        }
    };
    if let Some(level) = cli.color_level {
        settings.color_level = level;
    }
    settings
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Some(path) = &cli.config {
        set_config_path(path.clone());
    }
    let settings = load_settings(&cli);
    let ctx = RenderContext::from_stdin();
    let terminal_width = cli.width.unwrap_or_else(detect_terminal_width);

    let lines = render_lines(&settings, &WidgetRegistry::builtin(), &ctx, terminal_width);

    let choice = if settings.color_level == ColorLevel::None {
        ColorChoice::Never
    } else {
        ColorChoice::Always
    };
    let mut out = AutoStream::new(std::io::stdout().lock(), choice);
    for line in &lines {
        writeln!(out, "{line}").context("Failed to write status line")?;
    }
    out.flush().context("Failed to flush stdout")?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("statusline: {e:#}");
        std::process::exit(1);
    }
}
