//! CLI argument definitions for the ifcat tools.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "ifcat",
    version,
    about = "Interactive-fiction catalog tools - identify story files, export skeins",
    long_about = "Identify interactive-fiction story files by content fingerprint and\n\
                  work with skein transcript documents.\n\n\
                  Supported story formats: ADRIFT (.taf) and AGT (.agx)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Identify story files by content fingerprint.
    Ident(IdentArgs),

    /// List the supported story-file formats.
    Formats,

    /// Record a small example session and emit its skein document.
    SkeinDemo(SkeinDemoArgs),
}

#[derive(Parser)]
pub struct IdentArgs {
    /// Story files (or, with --recursive, directories) to identify.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Descend into directories.
    #[arg(long = "recursive", short = 'r')]
    pub recursive: bool,
}

#[derive(Parser)]
pub struct SkeinDemoArgs {
    /// Write the document to a file instead of stdout.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
