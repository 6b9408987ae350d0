//! Bookmark (outline) creation for merged documents.
//!
//! Each source file gets one top-level outline item, titled with the
//! file stem and pointing at the first page that came from that file.

use lopdf::{Dictionary, Document, Object, ObjectId, decode_text_string, text_string};
use std::collections::HashSet;

use crate::error::{Result, ToolkitError};

/// One outline item to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    /// Text shown in the viewer's outline panel.
    pub title: String,
    /// Page the item jumps to.
    pub page_id: ObjectId,
}

impl Bookmark {
    /// Create a bookmark.
    pub fn new(title: impl Into<String>, page_id: ObjectId) -> Self {
        Self {
            title: title.into(),
            page_id,
        }
    }
}

/// Manager for PDF bookmarks (outlines).
#[derive(Debug, Clone, Copy, Default)]
pub struct BookmarkManager;

impl BookmarkManager {
    /// Create a new bookmark manager.
    pub fn new() -> Self {
        Self
    }

    /// Replace the document outline with a flat list of `bookmarks`.
    ///
    /// Returns the number of items created.
    ///
    /// # Errors
    ///
    /// Returns [`ToolkitError::ParseFailure`] if the document has no catalog.
    pub fn set_outline(&self, doc: &mut Document, bookmarks: &[Bookmark]) -> Result<usize> {
        if bookmarks.is_empty() {
            return Ok(0);
        }

        let outline_id = doc.new_object_id();
        let item_ids: Vec<ObjectId> = bookmarks.iter().map(|_| doc.new_object_id()).collect();

        for (i, (bookmark, &item_id)) in bookmarks.iter().zip(&item_ids).enumerate() {
            let dest = vec![
                Object::Reference(bookmark.page_id),
                Object::Name(b"XYZ".to_vec()),
                Object::Null,
                Object::Null,
                Object::Null,
            ];

            let mut item = Dictionary::new();
            item.set("Title", text_string(&bookmark.title));
            item.set("Parent", Object::Reference(outline_id));
            item.set("Dest", Object::Array(dest));
            if i > 0 {
                item.set("Prev", Object::Reference(item_ids[i - 1]));
            }
            if let Some(&next) = item_ids.get(i + 1) {
                item.set("Next", Object::Reference(next));
            }

            doc.objects.insert(item_id, Object::Dictionary(item));
        }

        let mut outline = Dictionary::new();
        outline.set("Type", Object::Name(b"Outlines".to_vec()));
        outline.set("Count", Object::Integer(item_ids.len() as i64));
        if let (Some(&first), Some(&last)) = (item_ids.first(), item_ids.last()) {
            outline.set("First", Object::Reference(first));
            outline.set("Last", Object::Reference(last));
        }
        doc.objects.insert(outline_id, Object::Dictionary(outline));

        let catalog = doc.catalog_mut().map_err(|e| {
            ToolkitError::parse_failure("merged document", format!("failed to get catalog: {e}"))
        })?;
        catalog.set("Outlines", Object::Reference(outline_id));
        catalog.set("PageMode", Object::Name(b"UseOutlines".to_vec()));

        log::debug!("added {} bookmarks", item_ids.len());

        Ok(item_ids.len())
    }

    /// Titles and targets of the top-level outline items, in order.
    pub fn read_outline(&self, doc: &Document) -> Vec<Bookmark> {
        let mut items = Vec::new();

        let Ok(outline) = doc
            .catalog()
            .and_then(|c| c.get(b"Outlines"))
            .and_then(Object::as_reference)
            .and_then(|id| doc.get_dictionary(id))
        else {
            return items;
        };

        let mut visited = HashSet::new();
        let mut next = outline.get(b"First").and_then(Object::as_reference).ok();
        while let Some(id) = next {
            let Ok(item) = doc.get_dictionary(id) else {
                break;
            };
            let title = item
                .get(b"Title")
                .ok()
                .and_then(|title| decode_text_string(title).ok())
                .unwrap_or_default();
            let page_id = item
                .get(b"Dest")
                .and_then(Object::as_array)
                .ok()
                .and_then(|dest| dest.first())
                .and_then(|target| target.as_reference().ok());
            if let Some(page_id) = page_id {
                items.push(Bookmark::new(title, page_id));
            }
            next = item
                .get(b"Next")
                .and_then(Object::as_reference)
                .ok()
                .filter(|id| visited.insert(*id));
        }

        items
    }
}
