#![allow(dead_code)]

use lopdf::{Dictionary, Document, Object, Stream};
use std::path::Path;

/// A4 portrait in points: 209.9 × 297.04 mm
pub const A4: (i64, i64) = (595, 842);
/// A4 landscape in points
pub const A4_LANDSCAPE: (i64, i64) = (842, 595);
/// A3 portrait in points: 297.04 × 420.16 mm
pub const A3: (i64, i64) = (842, 1191);
/// US Letter in points: 215.9 × 279.4 mm
pub const LETTER: (i64, i64) = (612, 792);

pub fn media_box(width: i64, height: i64) -> Object {
    Object::Array(vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(width),
        Object::Integer(height),
    ])
}

/// Build a document whose pages carry the given MediaBox sizes (points)
pub fn create_test_document(page_sizes: &[(i64, i64)]) -> Document {
    let pages = page_sizes
        .iter()
        .map(|&(w, h)| Dictionary::from_iter(vec![("MediaBox", media_box(w, h))]))
        .collect();
    create_document_with(pages, Dictionary::new())
}

/// Build a document from per-page entries plus entries on the page tree root
///
/// `Type`, `Parent`, `Resources` and `Contents` are filled in for every page.
pub fn create_document_with(pages: Vec<Dictionary>, tree_entries: Dictionary) -> Document {
    let mut doc = Document::with_version("1.7");

    // Create page tree root ID
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for entries in pages {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));

        let mut page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]);
        for (key, value) in entries.iter() {
            page.set(key.clone(), value.clone());
        }
        let page_id = doc.add_object(page);
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    let mut pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(count)),
    ]);
    for (key, value) in tree_entries.iter() {
        pages_dict.set(key.clone(), value.clone());
    }
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));

    doc.trailer.set("Root", catalog_id);

    doc
}

/// Save a document to `path`
pub fn write_pdf(doc: &mut Document, path: &Path) {
    let mut writer = Vec::new();
    doc.save_to(&mut writer).unwrap();
    std::fs::write(path, writer).unwrap();
}

/// Save a test document with the given page sizes to `path`
pub fn write_test_pdf(path: &Path, page_sizes: &[(i64, i64)]) {
    let mut doc = create_test_document(page_sizes);
    write_pdf(&mut doc, path);
}
