//! CLI module for the comment sentiment CLI.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

use crate::models::OutputFormat;

/// Sentiment analysis for free-text comments.
#[derive(Debug, Parser)]
#[command(name = "csent")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[arg(
        long,
        short = 'f',
        global = true,
        help = "Output format: text, json, or markdown"
    )]
    pub format: Option<OutputFormat>,

    #[arg(long, short = 'v', global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Analyze a file of comments and write the CSV and chart report
    Analyze(commands::AnalyzeArgs),

    /// Classify comments given on the command line
    Classify(commands::ClassifyArgs),

    /// Check model files and ONNX Runtime availability
    Status(commands::StatusArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::ConfigCommand),
}
