//! CLI argument parsing for pdf-toolkit.
//!
//! This module defines the command-line interface using `clap` derive.
//! Each subcommand's arguments convert into the matching configuration
//! from [`crate::config`] with `to_config`, which is where argument values
//! are validated.
//!
//! # Examples
//!
//! ```no_run
//! use clap::Parser;
//! use pdf_toolkit::cli::Cli;
//!
//! let cli = Cli::parse();
//! println!("{:?}", cli.command);
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::{
    DEFAULT_PAGES_PATTERN, DEFAULT_SPLIT_PATTERN, DisplayOptions, ExtractConfig, MergeConfig,
    OutputPattern, OverwriteMode, SplitConfig, SplitMode,
};
use crate::error::Result;
use crate::ranges::PageRange;
use crate::utils::{collect_pdfs_in_dir, expand_input_patterns};

/// Merge, split and extract pages from PDF files.
#[derive(Parser, Debug)]
#[command(name = "pdf-toolkit")]
#[command(version)]
#[command(about = "Merge, split and extract pages from PDF files", long_about = None)]
#[command(arg_required_else_help = true)]
#[command(after_help = "Set PDF_TOOLKIT_LOG_LEVEL (e.g. debug) to control log output.")]
pub struct Cli {
    /// Show detailed output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Display settings for a command.
    pub fn display(&self, no_progress: bool) -> DisplayOptions {
        DisplayOptions {
            quiet: self.quiet,
            verbose: self.verbose,
            progress: !no_progress,
        }
    }

    /// Default log filter when `PDF_TOOLKIT_LOG_LEVEL` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Merge several PDF files into one
    ///
    /// Files are merged in the order given. Glob patterns such as
    /// 'chapter*.pdf' are expanded when the shell did not do it.
    ///
    /// Example:
    ///   pdf-toolkit merge intro.pdf body.pdf -o book.pdf --bookmarks
    Merge(MergeArgs),

    /// Merge every PDF in a directory, in file name order
    ///
    /// Example:
    ///   pdf-toolkit merge-dir ./scans -o scans.pdf --recursive
    MergeDir(MergeDirArgs),

    /// Split a PDF into files of N pages each
    ///
    /// Example:
    ///   pdf-toolkit split book.pdf --pages 10 --output-dir parts
    Split(SplitArgs),

    /// Split a PDF before specific pages
    ///
    /// Each listed page starts a new file.
    ///
    /// Example:
    ///   pdf-toolkit split-at book.pdf --at 25 --at 50
    SplitAt(SplitAtArgs),

    /// Split a PDF into single-page files
    ///
    /// Example:
    ///   pdf-toolkit split-pages deck.pdf --output-dir slides
    SplitPages(SplitPagesArgs),

    /// Extract selected pages into a new PDF
    ///
    /// Example:
    ///   pdf-toolkit extract report.pdf --pages "1,5,10-15" -o summary.pdf
    Extract(ExtractArgs),

    /// Show page count, size and metadata of a PDF
    Info(InfoArgs),

    /// Print the number of pages in a PDF
    Count(CountArgs),

    /// Show version information
    Version,
}

/// Flags shared by every command that writes files.
#[derive(Args, Debug, Clone, Copy)]
pub struct WriteArgs {
    /// Replace existing output files
    #[arg(long)]
    pub overwrite: bool,

    /// Do not show a progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl WriteArgs {
    fn overwrite_mode(&self) -> OverwriteMode {
        OverwriteMode::from_flag(self.overwrite)
    }
}

/// Arguments for `merge`.
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Input PDF files or glob patterns, in merge order
    #[arg(required = true, value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    /// Output PDF file path
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Add a bookmark at the start of each input file
    #[arg(short, long)]
    pub bookmarks: bool,

    #[command(flatten)]
    write: WriteArgs,
}

impl MergeArgs {
    /// Expand the inputs and build the merge configuration.
    ///
    /// # Errors
    ///
    /// Fails on glob patterns that are malformed or match nothing, and when
    /// the resulting configuration is invalid.
    pub fn to_config(&self, cli: &Cli) -> Result<MergeConfig> {
        let config = MergeConfig {
            inputs: expand_input_patterns(&self.inputs)?,
            output: self.output.clone(),
            bookmarks: self.bookmarks,
            overwrite_mode: self.write.overwrite_mode(),
            display: cli.display(self.write.no_progress),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Arguments for `merge-dir`.
#[derive(Args, Debug)]
pub struct MergeDirArgs {
    /// Directory containing the PDF files
    #[arg(value_name = "DIR")]
    pub directory: PathBuf,

    /// Output PDF file path
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Include PDFs in subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Add a bookmark at the start of each input file
    #[arg(short, long)]
    pub bookmarks: bool,

    #[command(flatten)]
    write: WriteArgs,
}

impl MergeDirArgs {
    /// Collect the directory's PDFs and build the merge configuration.
    ///
    /// # Errors
    ///
    /// Fails when the directory is missing or holds fewer than two PDFs.
    pub fn to_config(&self, cli: &Cli) -> Result<MergeConfig> {
        let inputs = collect_pdfs_in_dir(&self.directory, self.recursive, Some(&self.output))?;
        let config = MergeConfig {
            inputs,
            output: self.output.clone(),
            bookmarks: self.bookmarks,
            overwrite_mode: self.write.overwrite_mode(),
            display: cli.display(self.write.no_progress),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Output location options for split commands.
#[derive(Args, Debug, Clone)]
pub struct SplitOutputArgs {
    /// Output file name pattern ({base} = input name, {num} = part number)
    #[arg(long, value_name = "PATTERN")]
    pub pattern: Option<String>,

    /// Directory for the output files [default: the input's directory]
    #[arg(short = 'd', long, visible_alias = "o-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

impl SplitOutputArgs {
    fn pattern_or(&self, default: &str) -> Result<OutputPattern> {
        OutputPattern::parse(self.pattern.as_deref().unwrap_or(default))
    }
}

/// Arguments for `split`.
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Number of pages per output file
    #[arg(short, long, value_name = "N")]
    pub pages: u32,

    #[command(flatten)]
    output: SplitOutputArgs,

    #[command(flatten)]
    write: WriteArgs,
}

impl SplitArgs {
    /// Build the split configuration.
    ///
    /// # Errors
    ///
    /// Fails on a malformed output pattern.
    pub fn to_config(&self, cli: &Cli) -> Result<SplitConfig> {
        split_config(
            cli,
            &self.input,
            SplitMode::EveryNPages(self.pages),
            &self.output,
            DEFAULT_SPLIT_PATTERN,
            self.write,
        )
    }
}

/// Arguments for `split-at`.
#[derive(Args, Debug)]
pub struct SplitAtArgs {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Page that starts a new file (repeat or separate with commas)
    #[arg(long = "at", required = true, value_name = "PAGE", value_delimiter = ',')]
    pub at: Vec<u32>,

    #[command(flatten)]
    output: SplitOutputArgs,

    #[command(flatten)]
    write: WriteArgs,
}

impl SplitAtArgs {
    /// Build the split configuration.
    ///
    /// # Errors
    ///
    /// Fails on a malformed output pattern.
    pub fn to_config(&self, cli: &Cli) -> Result<SplitConfig> {
        split_config(
            cli,
            &self.input,
            SplitMode::AtPages(self.at.clone()),
            &self.output,
            DEFAULT_SPLIT_PATTERN,
            self.write,
        )
    }
}

/// Arguments for `split-pages`.
#[derive(Args, Debug)]
pub struct SplitPagesArgs {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    #[command(flatten)]
    output: SplitOutputArgs,

    #[command(flatten)]
    write: WriteArgs,
}

impl SplitPagesArgs {
    /// Build the split configuration.
    ///
    /// # Errors
    ///
    /// Fails on a malformed output pattern.
    pub fn to_config(&self, cli: &Cli) -> Result<SplitConfig> {
        split_config(
            cli,
            &self.input,
            SplitMode::SinglePages,
            &self.output,
            DEFAULT_PAGES_PATTERN,
            self.write,
        )
    }
}

fn split_config(
    cli: &Cli,
    input: &Path,
    mode: SplitMode,
    output: &SplitOutputArgs,
    default_pattern: &str,
    write: WriteArgs,
) -> Result<SplitConfig> {
    Ok(SplitConfig {
        input: input.to_path_buf(),
        mode,
        pattern: output.pattern_or(default_pattern)?,
        output_dir: output.output_dir.clone(),
        overwrite_mode: write.overwrite_mode(),
        display: cli.display(write.no_progress),
    })
}

/// Arguments for `extract`.
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Pages to extract, e.g. "1,5,10-15"
    #[arg(short, long, value_name = "RANGE")]
    pub pages: String,

    /// Output PDF file path
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    #[command(flatten)]
    write: WriteArgs,
}

impl ExtractArgs {
    /// Parse the page range and build the extract configuration.
    ///
    /// # Errors
    ///
    /// Fails on a malformed page range or when the output is the input.
    pub fn to_config(&self, cli: &Cli) -> Result<ExtractConfig> {
        let config = ExtractConfig {
            input: self.input.clone(),
            pages: PageRange::parse(&self.pages)?,
            output: self.output.clone(),
            overwrite_mode: self.write.overwrite_mode(),
            display: cli.display(self.write.no_progress),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Arguments for `info`.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// PDF file to inspect
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Print the information as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `count`.
#[derive(Args, Debug)]
pub struct CountArgs {
    /// PDF file to count
    #[arg(value_name = "FILE")]
    pub input: PathBuf,
}
