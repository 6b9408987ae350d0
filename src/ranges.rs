//! Page selection and chunk planning.
//!
//! Page numbers are 1-based everywhere in this module, matching what users
//! type on the command line and the keys of `lopdf::Document::get_pages`.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ToolkitError};

/// Page selection such as `1,5,10-15`.
///
/// Supports individual pages and ranges:
/// - "1" - single page
/// - "1-5" - range of pages (inclusive)
/// - "1,3,5" - multiple individual pages
/// - "1-5,10-15" - combination of ranges
///
/// Resolving a range against a document always yields pages sorted
/// ascending with duplicates removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRange {
    spec: String,
    items: Vec<PageRangeItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageRangeItem {
    Single(u32),
    Range(u32, u32),
}

impl PageRange {
    /// Parse a page range string without knowing the page count.
    ///
    /// # Errors
    ///
    /// Returns [`ToolkitError::InvalidRange`] for empty specs or tokens,
    /// non-numeric tokens, page `0`, and ranges whose start is past their end.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_toolkit::ranges::PageRange;
    ///
    /// let range = PageRange::parse("1,5,10-15").unwrap();
    /// assert_eq!(range.resolve(20).unwrap(), vec![1, 5, 10, 11, 12, 13, 14, 15]);
    /// ```
    pub fn parse(spec: &str) -> Result<Self> {
        let invalid = |reason: String| ToolkitError::invalid_range(spec, reason);

        if spec.trim().is_empty() {
            return Err(invalid("page range cannot be empty".to_string()));
        }

        let mut items = Vec::new();
        for token in spec.split(',') {
            let token = token.trim();
            if token.is_empty() {
                return Err(invalid("empty entry between commas".to_string()));
            }

            let item = match token.split_once('-') {
                Some((start, end)) => {
                    let start = parse_page_number(start).map_err(&invalid)?;
                    let end = parse_page_number(end).map_err(&invalid)?;
                    if start > end {
                        return Err(invalid(format!(
                            "range {start}-{end} starts after it ends"
                        )));
                    }
                    PageRangeItem::Range(start, end)
                }
                None => PageRangeItem::Single(parse_page_number(token).map_err(&invalid)?),
            };
            items.push(item);
        }

        Ok(Self {
            spec: spec.to_string(),
            items,
        })
    }

    /// Resolve the range against a document with `page_count` pages.
    ///
    /// # Errors
    ///
    /// Returns [`ToolkitError::InvalidRange`] if any named page is past the
    /// end of the document.
    pub fn resolve(&self, page_count: u32) -> Result<Vec<u32>> {
        let mut pages = Vec::new();
        for item in &self.items {
            let (start, end) = match *item {
                PageRangeItem::Single(page) => (page, page),
                PageRangeItem::Range(start, end) => (start, end),
            };
            if end > page_count {
                return Err(ToolkitError::invalid_range(
                    &self.spec,
                    format!(
                        "page {end} is past the end of the document ({page_count} page(s)); \
                         pages must be between 1 and {page_count}"
                    ),
                ));
            }
            pages.extend(start..=end);
        }

        pages.sort_unstable();
        pages.dedup();
        Ok(pages)
    }
}

impl FromStr for PageRange {
    type Err = ToolkitError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spec)
    }
}

fn parse_page_number(raw: &str) -> std::result::Result<u32, String> {
    let raw = raw.trim();
    let page: u32 = raw
        .parse()
        .map_err(|_| format!("'{raw}' is not a page number"))?;
    if page == 0 {
        return Err("page numbers start at 1".to_string());
    }
    Ok(page)
}

/// A contiguous inclusive span of pages written as one output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    /// First page, 1-based.
    pub start: u32,
    /// Last page, 1-based, inclusive.
    pub end: u32,
}

impl Chunk {
    /// Create a chunk covering `start..=end`.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Number of pages in the chunk.
    pub fn page_count(&self) -> u32 {
        self.end - self.start + 1
    }

    /// Page numbers in the chunk.
    pub fn pages(&self) -> Vec<u32> {
        (self.start..=self.end).collect()
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "page {}", self.start)
        } else {
            write!(f, "pages {}-{}", self.start, self.end)
        }
    }
}

fn require_pages(total: u32) -> Result<()> {
    if total == 0 {
        return Err(ToolkitError::invalid_argument("document has no pages"));
    }
    Ok(())
}

/// Split `1..=total` into chunks of at most `size` pages.
///
/// # Errors
///
/// Returns [`ToolkitError::InvalidArgument`] when `size` is zero or the
/// document has no pages.
pub fn fixed_size_chunks(total: u32, size: u32) -> Result<Vec<Chunk>> {
    if size == 0 {
        return Err(ToolkitError::invalid_argument(
            "pages per file must be at least 1",
        ));
    }
    require_pages(total)?;

    let chunks = (1..=total)
        .step_by(size as usize)
        .map(|start| Chunk::new(start, start.saturating_add(size - 1).min(total)))
        .collect();
    Ok(chunks)
}

/// Split `1..=total` so that each breakpoint starts a new chunk.
///
/// Breakpoints `[25, 50]` on 100 pages give `1-24, 25-49, 50-100`.
///
/// # Errors
///
/// Returns [`ToolkitError::InvalidArgument`] when no breakpoints are given,
/// a breakpoint is outside `2..=total`, or the list is not strictly
/// increasing.
pub fn breakpoint_chunks(total: u32, breakpoints: &[u32]) -> Result<Vec<Chunk>> {
    require_pages(total)?;
    if breakpoints.is_empty() {
        return Err(ToolkitError::invalid_argument("no split points given"));
    }

    let mut chunks = Vec::with_capacity(breakpoints.len() + 1);
    let mut start = 1;
    for &point in breakpoints {
        if point <= 1 || point > total {
            return Err(ToolkitError::invalid_argument(format!(
                "invalid split point {point}: must be between 2 and {total}"
            )));
        }
        if point <= start {
            return Err(ToolkitError::invalid_argument(format!(
                "split points must be strictly increasing (got {point} after {start})"
            )));
        }
        chunks.push(Chunk::new(start, point - 1));
        start = point;
    }
    chunks.push(Chunk::new(start, total));

    Ok(chunks)
}

/// One chunk per page.
///
/// # Errors
///
/// Returns [`ToolkitError::InvalidArgument`] if the document has no pages.
pub fn single_page_chunks(total: u32) -> Result<Vec<Chunk>> {
    require_pages(total)?;
    Ok((1..=total).map(|page| Chunk::new(page, page)).collect())
}
