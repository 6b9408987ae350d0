//! Configuration for pdf-toolkit commands.
//!
//! CLI arguments are turned into one of the validated configurations below
//! before any file is touched. The configurations are also the library
//! API: every operation can be driven without the CLI.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Result, ToolkitError};
use crate::ranges::PageRange;

/// Environment variable holding the log filter.
pub const LOG_ENV_VAR: &str = "PDF_TOOLKIT_LOG_LEVEL";

/// Default output pattern for `split` and `split-at`.
pub const DEFAULT_SPLIT_PATTERN: &str = "{base}_part{num}.pdf";

/// Default output pattern for `split-pages`.
pub const DEFAULT_PAGES_PATTERN: &str = "{base}_page{num}.pdf";

/// Widest zero padding accepted in `{num:N}`.
pub const MAX_COUNTER_WIDTH: usize = 10;

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Fail if an output file exists (default).
    #[default]
    Refuse,
    /// Replace existing output files.
    Overwrite,
}

impl OverwriteMode {
    /// Map the `--overwrite` flag to a mode.
    pub fn from_flag(overwrite: bool) -> Self {
        if overwrite {
            Self::Overwrite
        } else {
            Self::Refuse
        }
    }

    /// Check whether existing files may be replaced.
    pub fn allows_overwrite(&self) -> bool {
        matches!(self, Self::Overwrite)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Base,
    Num { width: usize },
}

/// Filename template for split outputs.
///
/// `{base}` expands to the input file stem and `{num}` to the 1-based
/// output counter. `{num:03}` zero-pads the counter to three digits.
/// Literal braces are written as `{{` and `}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl OutputPattern {
    /// Parse a pattern.
    ///
    /// # Errors
    ///
    /// Returns [`ToolkitError::InvalidArgument`] for unknown placeholders,
    /// unbalanced braces, empty patterns and counter widths above
    /// [`MAX_COUNTER_WIDTH`].
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_toolkit::config::OutputPattern;
    ///
    /// let pattern = OutputPattern::parse("section_{num:02}.pdf").unwrap();
    /// assert_eq!(pattern.render("report", 3), "section_03.pdf");
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = |reason: &str| {
            ToolkitError::invalid_argument(format!("invalid output pattern '{raw}': {reason}"))
        };

        if raw.trim().is_empty() {
            return Err(invalid("pattern cannot be empty"));
        }

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = raw.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        name.push(c);
                    }
                    if !closed {
                        return Err(invalid("unclosed '{'"));
                    }

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    let segment = Self::placeholder(&name).ok_or_else(|| {
                        invalid(&format!(
                            "unknown placeholder '{{{name}}}' (use {{base}} or {{num}})"
                        ))
                    })?;
                    if let Segment::Num { width } = segment
                        && width > MAX_COUNTER_WIDTH
                    {
                        return Err(invalid(&format!(
                            "counter width {width} is above the maximum of {MAX_COUNTER_WIDTH}"
                        )));
                    }
                    segments.push(segment);
                }
                '}' => return Err(invalid("unmatched '}'")),
                c => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    fn placeholder(name: &str) -> Option<Segment> {
        match name.split_once(':') {
            None if name == "base" => Some(Segment::Base),
            None if name == "num" => Some(Segment::Num { width: 0 }),
            Some(("num", spec)) => {
                let digits = spec.strip_prefix('0').unwrap_or(spec);
                digits.parse().ok().map(|width| Segment::Num { width })
            }
            _ => None,
        }
    }

    /// Whether the pattern contains a `{num}` placeholder.
    pub fn has_counter(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Num { .. }))
    }

    /// Expand the pattern for one output.
    pub fn render(&self, base: &str, num: usize) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Base => out.push_str(base),
                Segment::Num { width } => out.push_str(&format!("{num:0width$}")),
            }
        }
        out
    }
}

impl FromStr for OutputPattern {
    type Err = ToolkitError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for OutputPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Shared output settings for status display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayOptions {
    /// Suppress non-error output.
    pub quiet: bool,
    /// Show extra details.
    pub verbose: bool,
    /// Render a progress bar on terminals.
    pub progress: bool,
}

impl DisplayOptions {
    /// Whether a progress bar may be drawn.
    pub fn show_progress(&self) -> bool {
        self.progress && !self.quiet
    }
}

/// Configuration for `merge` and `merge-dir`.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Input PDF file paths, in merge order.
    pub inputs: Vec<PathBuf>,
    /// Output PDF file path.
    pub output: PathBuf,
    /// Add one bookmark per input file.
    pub bookmarks: bool,
    /// Output collision policy.
    pub overwrite_mode: OverwriteMode,
    /// Status display settings.
    pub display: DisplayOptions,
}

impl MergeConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ToolkitError::InvalidArgument`] if fewer than two inputs are
    /// given or the output path is one of the inputs.
    pub fn validate(&self) -> Result<()> {
        if self.inputs.len() < 2 {
            return Err(ToolkitError::invalid_argument(format!(
                "at least 2 PDF files are required for merging (got {})",
                self.inputs.len()
            )));
        }

        for input in &self.inputs {
            if same_file(input, &self.output) {
                return Err(ToolkitError::invalid_argument(format!(
                    "output file cannot be the same as an input file: {}",
                    self.output.display()
                )));
            }
        }

        Ok(())
    }
}

/// How a split partitions the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitMode {
    /// Fixed number of pages per output.
    EveryNPages(u32),
    /// New output starting at each listed page.
    AtPages(Vec<u32>),
    /// One output per page.
    SinglePages,
}

/// Configuration for `split`, `split-at` and `split-pages`.
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// Input PDF file.
    pub input: PathBuf,
    /// How to partition the pages.
    pub mode: SplitMode,
    /// Output filename pattern.
    pub pattern: OutputPattern,
    /// Output directory; defaults to the input's directory.
    pub output_dir: Option<PathBuf>,
    /// Output collision policy.
    pub overwrite_mode: OverwriteMode,
    /// Status display settings.
    pub display: DisplayOptions,
}

impl SplitConfig {
    /// Directory the outputs are written to.
    pub fn effective_output_dir(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.clone(),
            None => self
                .input
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        }
    }

    /// File stem used for `{base}`.
    pub fn base_name(&self) -> String {
        self.input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string())
    }
}

/// Configuration for `extract`.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Input PDF file.
    pub input: PathBuf,
    /// Pages to keep.
    pub pages: PageRange,
    /// Output PDF file path.
    pub output: PathBuf,
    /// Output collision policy.
    pub overwrite_mode: OverwriteMode,
    /// Status display settings.
    pub display: DisplayOptions,
}

impl ExtractConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ToolkitError::InvalidArgument`] if the output path is the
    /// input path.
    pub fn validate(&self) -> Result<()> {
        if same_file(&self.input, &self.output) {
            return Err(ToolkitError::invalid_argument(format!(
                "output file cannot be the same as the input file: {}",
                self.output.display()
            )));
        }
        Ok(())
    }
}

/// Compare two paths, resolving them when both exist.
pub(crate) fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
