//! Shared helpers for integration tests.
//!
//! Fixtures are generated programmatically so the tests carry no binary
//! files and can shape page counts, outlines, and page sizes per case.

use lopdf::{Document, Object, ObjectId, Stream, StringFormat, dictionary};
use std::path::PathBuf;
use tempfile::TempDir;

/// Build a document with `count` empty pages.
pub fn pdf_with_pages(count: usize) -> Document {
    pdf_with_content_pages(count, 0)
}

/// Build a document whose pages each carry roughly `payload` bytes of
/// incompressible content, so serialized sizes scale with page count.
pub fn pdf_with_content_pages(count: usize, payload: usize) -> Document {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();

    let mut kids: Vec<Object> = Vec::new();
    for page_number in 0..count {
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        };

        if payload > 0 {
            let content_id = doc.add_object(Stream::new(
                dictionary! {},
                incompressible_bytes(payload, page_number as u64 + 1),
            ));
            page.set("Contents", content_id);
        }

        let page_id = doc.add_object(page);
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count as i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Build a document with a top-level outline whose entries point at the
/// given zero-based page indices.
pub fn pdf_with_outline(page_count: usize, entries: &[(&str, usize)]) -> Document {
    let mut doc = pdf_with_pages(page_count);

    if entries.is_empty() {
        return doc;
    }

    let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
    let outline_id = doc.new_object_id();

    let item_ids: Vec<ObjectId> = entries
        .iter()
        .map(|(title, page_index)| {
            let dest = vec![
                Object::Reference(page_ids[*page_index]),
                Object::Name(b"XYZ".to_vec()),
                Object::Null,
                Object::Null,
                Object::Null,
            ];
            doc.add_object(dictionary! {
                "Title" => Object::String(title.as_bytes().to_vec(), StringFormat::Literal),
                "Parent" => outline_id,
                "Dest" => dest,
            })
        })
        .collect();

    for (i, &item_id) in item_ids.iter().enumerate() {
        if let Ok(Object::Dictionary(dict)) = doc.get_object_mut(item_id) {
            if i > 0 {
                dict.set("Prev", Object::Reference(item_ids[i - 1]));
            }
            if i < item_ids.len() - 1 {
                dict.set("Next", Object::Reference(item_ids[i + 1]));
            }
        }
    }

    doc.objects.insert(
        outline_id,
        Object::Dictionary(dictionary! {
            "Type" => "Outlines",
            "Count" => item_ids.len() as i64,
            "First" => item_ids[0],
            "Last" => *item_ids.last().unwrap(),
        }),
    );

    if let Ok(catalog) = doc.catalog_mut() {
        catalog.set("Outlines", Object::Reference(outline_id));
    }

    doc
}

/// Save a document under `name` in the temp directory.
pub fn write_pdf(dir: &TempDir, name: &str, mut doc: Document) -> PathBuf {
    let path = dir.path().join(name);
    doc.save(&path).expect("failed to save fixture");
    path
}

/// Bytes that flate cannot shrink much, from a small xorshift generator.
fn incompressible_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut state = seed | 1;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state & 0xFF) as u8
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_page_counts() {
        assert_eq!(pdf_with_pages(4).get_pages().len(), 4);
        assert_eq!(pdf_with_content_pages(3, 256).get_pages().len(), 3);
    }

    #[test]
    fn test_outline_fixture_has_outline() {
        let doc = pdf_with_outline(5, &[("A", 0), ("B", 2)]);
        assert!(doc.catalog().unwrap().has(b"Outlines"));
    }

    #[test]
    fn test_incompressible_bytes_vary() {
        let bytes = incompressible_bytes(64, 1);
        assert!(bytes.iter().any(|&b| b != bytes[0]));
    }
}
