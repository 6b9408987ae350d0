//! Fixture documents for unit tests.

use lopdf::{
    Document, EncryptionState, EncryptionVersion, Object, ObjectId, Permissions, Stream,
    dictionary,
};
use std::path::{Path, PathBuf};

/// Build a document whose pages are tagged `page-1`, `page-2`, ...
pub fn create_multi_page_pdf(pages: usize) -> Document {
    create_labeled_pdf("page", pages)
}

/// Build a flat document whose page `n` draws the text `{label}-{n}`.
///
/// `MediaBox` and `Resources` live on the page tree root, so every page
/// inherits them.
pub fn create_labeled_pdf(label: &str, pages: usize) -> Document {
    let mut doc = Document::with_version("1.5");

    let catalog_id = doc.new_object_id();
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut page_ids = Vec::new();
    for n in 1..=pages {
        let content = format!("BT /F1 24 Tf 72 720 Td ({label}-{n}) Tj ET");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        page_ids.push(page_id);
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => page_ids.into_iter().map(Object::from).collect::<Vec<Object>>(),
        "Count" => pages as i64,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        "Resources" => dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        },
    };
    doc.objects.insert(pages_id, pages_dict.into());
    doc.objects.insert(
        catalog_id,
        dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        }
        .into(),
    );
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Encrypt `doc` with RC4 (V2), owner password `owner`.
///
/// With an empty `user_password` lopdf can still open the result.
pub fn encrypt_pdf(mut doc: Document, user_password: &str) -> Document {
    doc.trailer.set(
        "ID",
        Object::Array(vec![
            Object::string_literal(vec![0x11u8; 16]),
            Object::string_literal(vec![0x22u8; 16]),
        ]),
    );
    let version = EncryptionVersion::V2 {
        document: &doc,
        owner_password: "owner",
        user_password,
        key_length: 128,
        permissions: Permissions::all(),
    };
    let state = EncryptionState::try_from(version).unwrap();
    doc.encrypt(&state).unwrap();
    doc
}

/// Save `doc` as `dir/name` and return the path.
pub fn write_pdf(dir: &Path, name: &str, mut doc: Document) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    doc.save(&path).unwrap();
    path
}

/// Text drawn on the page, e.g. `page-3`.
pub fn page_label(doc: &Document, page_id: ObjectId) -> String {
    let content = doc.get_page_content(page_id).unwrap();
    let text = String::from_utf8_lossy(&content);
    let start = text.find('(').unwrap() + 1;
    let end = text[start..].find(')').unwrap() + start;
    text[start..end].to_string()
}

/// Labels of every page, in page order.
pub fn page_labels(doc: &Document) -> Vec<String> {
    doc.get_pages()
        .values()
        .map(|&id| page_label(doc, id))
        .collect()
}
