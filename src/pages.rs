//! Page selection: building a new document from a subset of pages.
//!
//! `extract` and every split variant go through [`PageExtractor`]. The
//! source is cloned, attributes the selected pages inherit from the page
//! tree are copied onto the pages themselves, and the tree is replaced by a
//! single flat node listing only the selected pages. Objects no longer
//! reachable from the trailer are pruned before the document is returned.

use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::HashSet;

use crate::error::{Result, ToolkitError};
use crate::io::LoadedPdf;
use crate::ranges::Chunk;

/// Page attributes a page may inherit from its ancestors.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Catalog entries that refer to the source's page numbering.
const PAGE_NUMBERED_ENTRIES: [&[u8]; 2] = [b"Outlines", b"PageLabels"];

/// Builds sub-documents from a loaded PDF.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageExtractor;

impl PageExtractor {
    /// Create a new page extractor.
    pub fn new() -> Self {
        Self
    }

    /// Create a document holding `pages` (1-based, in the given order).
    ///
    /// # Errors
    ///
    /// Returns [`ToolkitError::InvalidArgument`] if `pages` is empty or names
    /// a page the document does not have, and [`ToolkitError::ParseFailure`]
    /// if the page tree is malformed.
    pub fn extract_pages(&self, source: &LoadedPdf, pages: &[u32]) -> Result<Document> {
        if pages.is_empty() {
            return Err(ToolkitError::invalid_argument("no pages selected"));
        }

        let all_pages = source.document.get_pages();
        let page_ids = pages
            .iter()
            .map(|n| {
                all_pages.get(n).copied().ok_or_else(|| {
                    ToolkitError::invalid_argument(format!(
                        "page {n} does not exist in {} ({} pages)",
                        source.path.display(),
                        all_pages.len()
                    ))
                })
            })
            .collect::<Result<Vec<ObjectId>>>()?;

        let malformed = |reason: String| ToolkitError::parse_failure(&source.path, reason);

        let mut doc = source.document.clone();

        for &page_id in &page_ids {
            flatten_inherited(&mut doc, page_id).map_err(&malformed)?;
        }

        let pages_id = root_pages_id(&doc).map_err(&malformed)?;
        rebuild_page_tree(&mut doc, pages_id, &page_ids).map_err(&malformed)?;

        let catalog = doc
            .catalog_mut()
            .map_err(|e| malformed(format!("failed to get catalog: {e}")))?;
        for key in PAGE_NUMBERED_ENTRIES {
            catalog.remove(key);
        }

        doc.prune_objects();
        doc.renumber_objects();

        log::debug!(
            "built {}-page document from {}",
            page_ids.len(),
            source.path.display()
        );

        Ok(doc)
    }

    /// Create a document holding one contiguous chunk.
    pub fn extract_chunk(&self, source: &LoadedPdf, chunk: Chunk) -> Result<Document> {
        self.extract_pages(source, &chunk.pages())
    }
}

/// Reference to the root of the page tree.
pub(crate) fn root_pages_id(doc: &Document) -> std::result::Result<ObjectId, String> {
    doc.catalog()
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|e| format!("failed to get pages reference: {e}"))
}

/// Copy inheritable attributes from the page's ancestors onto the page.
fn flatten_inherited(doc: &mut Document, page_id: ObjectId) -> std::result::Result<(), String> {
    let page = doc
        .get_dictionary(page_id)
        .map_err(|e| format!("failed to get page {page_id:?}: {e}"))?;

    let mut inherited = Vec::new();
    for key in INHERITABLE {
        if page.has(key) {
            continue;
        }
        if let Some(value) = find_in_ancestors(doc, page, key) {
            inherited.push((key, value));
        }
    }

    if inherited.is_empty() {
        return Ok(());
    }

    let page = doc
        .get_dictionary_mut(page_id)
        .map_err(|e| format!("failed to get page {page_id:?}: {e}"))?;
    for (key, value) in inherited {
        page.set(key, value);
    }
    Ok(())
}

/// Look up `key` on a page, falling back to its ancestors.
pub(crate) fn page_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let page = doc.get_dictionary(page_id).ok()?;
    match page.get(key) {
        Ok(value) => Some(value.clone()),
        Err(_) => find_in_ancestors(doc, page, key),
    }
}

fn find_in_ancestors(doc: &Document, page: &Dictionary, key: &[u8]) -> Option<Object> {
    let mut visited = HashSet::new();
    let mut parent_id = page.get(b"Parent").and_then(Object::as_reference).ok();

    while let Some(id) = parent_id {
        if !visited.insert(id) {
            log::warn!("cycle in page tree at object {id:?}");
            return None;
        }
        let node = doc.get_dictionary(id).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
        parent_id = node.get(b"Parent").and_then(Object::as_reference).ok();
    }
    None
}

/// Replace the page tree root with a flat node listing `page_ids`.
fn rebuild_page_tree(
    doc: &mut Document,
    pages_id: ObjectId,
    page_ids: &[ObjectId],
) -> std::result::Result<(), String> {
    for &page_id in page_ids {
        let page = doc
            .get_dictionary_mut(page_id)
            .map_err(|e| format!("failed to get page {page_id:?}: {e}"))?;
        page.set("Parent", pages_id);
    }

    let kids: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();
    let mut root = Dictionary::new();
    root.set("Type", Object::Name(b"Pages".to_vec()));
    root.set("Count", Object::Integer(page_ids.len() as i64));
    root.set("Kids", Object::Array(kids));
    doc.objects.insert(pages_id, Object::Dictionary(root));

    Ok(())
}
