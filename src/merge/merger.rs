//! Core PDF merging implementation.
//!
//! The first document is kept as the base. Every further document is
//! renumbered above the running maximum object id and its objects appended.
//! A new page tree root is then created whose kids are the page tree roots
//! of all sources, so attributes a source's pages inherit stay intact.

use lopdf::{Dictionary, Document, Object, ObjectId};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::error::{Result, ToolkitError};
use crate::io::LoadedPdf;
use crate::merge::bookmarks::{Bookmark, BookmarkManager};
use crate::pages::root_pages_id;
use crate::utils::format_file_size;

/// Statistics about a merge operation.
#[derive(Debug, Clone)]
pub struct MergeStatistics {
    /// Number of PDFs merged.
    pub files_merged: usize,

    /// Total number of pages in the merged document.
    pub total_pages: u32,

    /// Total size of input files.
    pub input_size: u64,

    /// Number of bookmarks added.
    pub bookmarks_added: usize,

    /// Time spent combining documents.
    pub merge_time: Duration,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }
}

/// Result of a merge operation.
#[derive(Debug)]
pub struct MergeResult {
    /// The merged PDF document.
    pub document: Document,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,

    /// Paths of files that were merged, in order.
    pub merged_files: Vec<PathBuf>,
}

/// Where one source landed in the merged document.
#[derive(Debug)]
struct SourceTree {
    root_id: ObjectId,
    first_page: Option<ObjectId>,
    title: String,
}

/// PDF merger that combines documents in order.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    bookmark_manager: BookmarkManager,
    bookmarks: bool,
}

impl Merger {
    /// Create a merger that does not add bookmarks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one bookmark per source file.
    pub fn with_bookmarks(mut self, bookmarks: bool) -> Self {
        self.bookmarks = bookmarks;
        self
    }

    /// Combine `sources` into one document, pages in source order.
    ///
    /// # Errors
    ///
    /// Returns [`ToolkitError::InvalidArgument`] when fewer than two sources
    /// are given and [`ToolkitError::ParseFailure`] when a source has no
    /// usable page tree.
    pub fn merge(&self, sources: Vec<LoadedPdf>) -> Result<MergeResult> {
        if sources.len() < 2 {
            return Err(ToolkitError::invalid_argument(format!(
                "at least 2 PDF files are required for merging (got {})",
                sources.len()
            )));
        }

        let start = Instant::now();
        let files_merged = sources.len();
        let input_size = sources.iter().map(|s| s.file_size).sum();
        let total_pages: u32 = sources.iter().map(|s| s.page_count).sum();
        let merged_files: Vec<PathBuf> = sources.iter().map(|s| s.path.clone()).collect();

        let mut sources = sources.into_iter();
        let Some(base) = sources.next() else {
            return Err(ToolkitError::invalid_argument("no PDF files to merge"));
        };

        let mut trees = vec![source_tree(&base)?];
        let mut merged = base.document;
        let mut max_id = merged.max_id;

        for (index, source) in sources.enumerate() {
            let mut doc = source.document;
            doc.renumber_objects_with(max_id + 1);
            max_id = doc.max_id;

            let renumbered = LoadedPdf {
                document: doc,
                ..source
            };
            trees.push(source_tree(&renumbered)?);

            log::debug!(
                "appending {} ({} pages) as source {}",
                renumbered.path.display(),
                renumbered.page_count,
                index + 2
            );
            merged.objects.extend(renumbered.document.objects);
        }
        merged.max_id = max_id;

        self.join_page_trees(&mut merged, &trees, total_pages)?;

        let bookmarks_added = if self.bookmarks {
            let bookmarks: Vec<Bookmark> = trees
                .iter()
                .filter_map(|t| t.first_page.map(|page| Bookmark::new(t.title.clone(), page)))
                .collect();
            self.bookmark_manager.set_outline(&mut merged, &bookmarks)?
        } else {
            0
        };

        merged.prune_objects();
        merged.renumber_objects();

        let statistics = MergeStatistics {
            files_merged,
            total_pages,
            input_size,
            bookmarks_added,
            merge_time: start.elapsed(),
        };

        log::info!(
            "merged {} files into {} pages",
            statistics.files_merged,
            statistics.total_pages
        );

        Ok(MergeResult {
            document: merged,
            statistics,
            merged_files,
        })
    }

    /// Hang every source's page tree under a new root node.
    fn join_page_trees(
        &self,
        merged: &mut Document,
        trees: &[SourceTree],
        total_pages: u32,
    ) -> Result<()> {
        let root_id = merged.new_object_id();
        let malformed =
            |reason: String| ToolkitError::parse_failure("merged document", reason);

        for tree in trees {
            let node = merged
                .get_dictionary_mut(tree.root_id)
                .map_err(|e| malformed(format!("failed to get page tree {:?}: {e}", tree.root_id)))?;
            node.set("Parent", Object::Reference(root_id));
        }

        let kids: Vec<Object> = trees.iter().map(|t| Object::Reference(t.root_id)).collect();
        let mut root = Dictionary::new();
        root.set("Type", Object::Name(b"Pages".to_vec()));
        root.set("Kids", Object::Array(kids));
        root.set("Count", Object::Integer(i64::from(total_pages)));
        merged.objects.insert(root_id, Object::Dictionary(root));

        let catalog = merged
            .catalog_mut()
            .map_err(|e| malformed(format!("failed to get catalog: {e}")))?;
        catalog.set("Pages", Object::Reference(root_id));
        // Labels of the first source would spill over onto the appended pages.
        catalog.remove(b"PageLabels");
        if self.bookmarks {
            catalog.remove(b"Outlines");
        }

        Ok(())
    }
}

fn source_tree(source: &LoadedPdf) -> Result<SourceTree> {
    let root_id = root_pages_id(&source.document)
        .map_err(|reason| ToolkitError::parse_failure(&source.path, reason))?;
    let first_page = source.document.get_pages().values().next().copied();

    Ok(SourceTree {
        root_id,
        first_page,
        title: source.stem(),
    })
}
