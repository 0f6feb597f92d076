//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "mms",
    version,
    about = "Marketplace Mapping Studio - map scraped product data to marketplace upload formats",
    long_about = "Map scraped product records onto marketplace upload schemas.\n\n\
                  Built-in profiles cover Shopify, Naver Smart Store, Coupang Wing and 11st.\n\
                  Extra profiles are loaded from --profiles-dir or MMS_PROFILES_DIR."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory of extra profile (*.json) and vocabulary (*.csv) files.
    /// Overrides MMS_PROFILES_DIR.
    #[arg(long = "profiles-dir", value_name = "DIR", global = true)]
    pub profiles_dir: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
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

    /// Include record values in log output (may expose seller contact details).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List registered profiles.
    Profiles {
        /// Only list profiles of this marketplace.
        #[arg(long, value_name = "NAME")]
        marketplace: Option<String>,
    },

    /// Show the field mappings of one profile.
    Show {
        #[arg(value_name = "PROFILE_ID")]
        id: String,
    },

    /// Print a vocabulary table and whether it is bijective.
    Vocab {
        #[arg(value_name = "TABLE")]
        table: String,
    },

    /// Transform scraped records with one or more profiles.
    Transform(TransformArgs),
}

#[derive(Args)]
pub struct TransformArgs {
    /// JSON file holding one record object or an array of records.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    #[command(flatten)]
    pub target: TargetArgs,

    /// Write successful records to this delimited file. With several
    /// profiles the profile id is added to the file name.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write a JSON report of failed records to this file.
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct TargetArgs {
    /// Apply the profile with this id.
    #[arg(long, short = 'p', value_name = "ID")]
    pub profile: Option<String>,

    /// Apply every profile of this marketplace.
    #[arg(long, short = 'm', value_name = "NAME")]
    pub marketplace: Option<String>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
