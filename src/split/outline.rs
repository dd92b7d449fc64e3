//! Outline-boundary splitting.
//!
//! Reads the top-level entries of the document outline (the catalog's
//! `/Outlines` chain) and cuts the page sequence at each entry's
//! destination. Only depth-0 entries are consulted; nested children are
//! ignored, not flattened — recursive splitting would break the partition
//! invariant, since a page could fall in both a parent's and a child's
//! range.

use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::HashMap;
use std::time::Instant;

use crate::error::{PdfPartError, Result};
use crate::io::LoadedPdf;
use crate::split::{OutputArtifact, PageAssembly, PageGroup, SplitNote, SplitOutcome};
use crate::utils::outline_part_file_name;

/// One top-level outline entry, resolved to its destination page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    /// Display title, as found in the outline.
    pub title: String,

    /// Zero-based index of the destination page.
    pub page_index: usize,
}

/// Splitter that cuts at top-level bookmark boundaries.
pub struct OutlineSplitter;

impl OutlineSplitter {
    /// Create a new outline splitter.
    pub fn new() -> Self {
        Self
    }

    /// Split `source` at its top-level outline boundaries.
    ///
    /// Entry *i* spans `[p_i, p_{i+1})`; the last entry runs to the end of
    /// the document. A document without an outline yields an empty outcome
    /// with a [`SplitNote::NoOutlineAvailable`] note, not an error. An
    /// entry whose range is empty is skipped with a
    /// [`SplitNote::DegenerateRange`] note. Artifacts are named
    /// `<stem>_part_<N>_<sanitizedTitle>.<ext>` with `N` the 1-based entry
    /// number.
    ///
    /// # Errors
    ///
    /// Returns [`PdfPartError::OutlineUnreadable`] when an outline exists
    /// but an entry cannot be traversed or resolved to a page.
    pub fn split(&self, source: &LoadedPdf) -> Result<SplitOutcome> {
        let start_time = Instant::now();
        let page_count = source.page_count;

        let entries = match self.top_level_entries(source)? {
            Some(entries) => entries,
            None => {
                return Ok(SplitOutcome::new(
                    Vec::new(),
                    vec![SplitNote::NoOutlineAvailable],
                    page_count,
                    start_time.elapsed(),
                ));
            }
        };

        let mut artifacts = Vec::new();
        let mut notes = Vec::new();

        for (i, entry) in entries.iter().enumerate() {
            let entry_number = i + 1;
            let range_start = entry.page_index;
            let range_end = entries
                .get(i + 1)
                .map(|next| next.page_index)
                .unwrap_or(page_count);

            if range_start >= range_end {
                notes.push(SplitNote::DegenerateRange {
                    entry: entry_number,
                    title: entry.title.clone(),
                    page: range_start,
                });
                continue;
            }

            let group = PageGroup::new(range_start, range_end);
            let assembly = PageAssembly::from_group(&source.document, group);
            let bytes = assembly.to_bytes()?;

            artifacts.push(OutputArtifact {
                bytes,
                file_name: outline_part_file_name(&source.path, entry_number, &entry.title),
                group,
            });
        }

        Ok(SplitOutcome::new(
            artifacts,
            notes,
            page_count,
            start_time.elapsed(),
        ))
    }

    /// Resolve the top-level outline entries of `source`, in document
    /// order.
    ///
    /// Returns `None` when the document carries no outline (or an outline
    /// with no entries).
    pub fn top_level_entries(&self, source: &LoadedPdf) -> Result<Option<Vec<OutlineEntry>>> {
        let doc = &source.document;

        let catalog = doc.catalog().map_err(|e| {
            PdfPartError::unreadable_container(source.path.clone(), format!("no catalog: {e}"))
        })?;

        let outline_root = match catalog.get(b"Outlines") {
            Ok(obj) => match deref(doc, obj).and_then(|o| o.as_dict().ok()) {
                Some(dict) => dict,
                None => {
                    return Err(PdfPartError::outline_unreadable(
                        source.path.clone(),
                        "Outlines entry is not a dictionary",
                    ));
                }
            },
            Err(_) => return Ok(None),
        };

        let page_index_by_id: HashMap<ObjectId, usize> = doc
            .get_pages()
            .into_iter()
            .map(|(number, id)| (id, number as usize - 1))
            .collect();

        let mut entries = Vec::new();
        let mut next_id = outline_root
            .get(b"First")
            .and_then(|o| o.as_reference())
            .ok();

        while let Some(item_id) = next_id {
            let entry_number = entries.len() + 1;

            let item = doc
                .get_object(item_id)
                .ok()
                .and_then(|o| o.as_dict().ok())
                .ok_or_else(|| {
                    PdfPartError::outline_unreadable(
                        source.path.clone(),
                        format!("entry {entry_number} is not a dictionary"),
                    )
                })?;

            let title = item
                .get(b"Title")
                .ok()
                .and_then(|o| deref(doc, o))
                .map(decode_text)
                .unwrap_or_default();

            let page_id = destination_page(doc, item).ok_or_else(|| {
                PdfPartError::outline_unreadable(
                    source.path.clone(),
                    format!("entry {entry_number} ({title:?}) has no resolvable destination"),
                )
            })?;

            let page_index = *page_index_by_id.get(&page_id).ok_or_else(|| {
                PdfPartError::outline_unreadable(
                    source.path.clone(),
                    format!("entry {entry_number} ({title:?}) points outside the page tree"),
                )
            })?;

            entries.push(OutlineEntry { title, page_index });

            // A malformed Next chain could loop; there can never be more
            // top-level entries than objects in the document.
            if entries.len() > doc.objects.len() {
                return Err(PdfPartError::outline_unreadable(
                    source.path.clone(),
                    "outline entry chain does not terminate",
                ));
            }

            next_id = item.get(b"Next").and_then(|o| o.as_reference()).ok();
        }

        if entries.is_empty() {
            Ok(None)
        } else {
            Ok(Some(entries))
        }
    }
}

impl Default for OutlineSplitter {
    fn default() -> Self {
        Self::new()
    }
}

fn deref<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        _ => Some(obj),
    }
}

/// Resolve an outline item's destination to the page object it names.
///
/// Handles the two shapes found in practice: a direct `/Dest` array and a
/// `/A` GoTo action carrying a `/D` array. Named destinations are not
/// resolved and surface as an unreadable-outline error at the caller.
fn destination_page(doc: &Document, item: &Dictionary) -> Option<ObjectId> {
    if let Ok(dest) = item.get(b"Dest") {
        return destination_array_page(doc, dest);
    }

    if let Ok(action) = item.get(b"A") {
        let action = deref(doc, action)?.as_dict().ok()?;
        if let Ok(dest) = action.get(b"D") {
            return destination_array_page(doc, dest);
        }
    }

    None
}

fn destination_array_page(doc: &Document, obj: &Object) -> Option<ObjectId> {
    let array = deref(doc, obj)?.as_array().ok()?;
    array.first()?.as_reference().ok()
}

/// Decode a PDF text string: UTF-16BE with BOM, otherwise treated as
/// (lossy) UTF-8/PDFDocEncoding.
fn decode_text(obj: &Object) -> String {
    let Object::String(bytes, _) = obj else {
        return String::new();
    };

    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    }
}
