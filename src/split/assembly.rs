//! Page assembly: building an output document from a subset of a source's
//! pages.
//!
//! Pages are referenced into the assembly, never copied across documents;
//! the assembly materializes a standalone document only when finalized (or
//! measured). Size measurement goes through the [`SizeOracle`] seam: the
//! default oracle serializes the assembly into an in-memory scratch buffer,
//! because the PDF format exposes no cheaper incremental size function. A
//! codec with a real size oracle can supply a faster implementation without
//! touching splitter logic.

use lopdf::{Document, Object, ObjectId};

use crate::error::{PdfPartError, Result};
use crate::split::PageGroup;

/// Capability to measure the serialized size of an assembly.
pub trait SizeOracle {
    /// Serialized byte size the assembly would have if finalized now.
    fn measure(&self, assembly: &PageAssembly<'_>) -> Result<u64>;
}

/// Size oracle that fully serializes the assembly into a transient
/// in-memory buffer and reports its length.
///
/// The scratch buffer is local to each call, so concurrent splits never
/// share measurement state, and it is released on every path including
/// errors.
#[derive(Debug, Default)]
pub struct SerializedSizeOracle;

impl SizeOracle for SerializedSizeOracle {
    fn measure(&self, assembly: &PageAssembly<'_>) -> Result<u64> {
        let bytes = assembly.to_bytes()?;
        Ok(bytes.len() as u64)
    }
}

/// An ordered set of pages from one source document, accumulating toward
/// one output artifact.
#[derive(Debug)]
pub struct PageAssembly<'a> {
    source: &'a Document,
    /// 1-based page numbers (the codec's page numbering), ascending.
    page_numbers: Vec<u32>,
}

impl<'a> PageAssembly<'a> {
    /// Create an empty assembly over `source`.
    pub fn new(source: &'a Document) -> Self {
        Self {
            source,
            page_numbers: Vec::new(),
        }
    }

    /// Create an assembly holding all pages of `group`.
    pub fn from_group(source: &'a Document, group: PageGroup) -> Self {
        let mut assembly = Self::new(source);
        for index in group.start..group.end {
            assembly.push_page(index);
        }
        assembly
    }

    /// Append the page at zero-based `index` to the assembly.
    pub fn push_page(&mut self, index: usize) {
        self.page_numbers.push(index as u32 + 1);
    }

    /// Number of pages currently in the assembly.
    pub fn len(&self) -> usize {
        self.page_numbers.len()
    }

    /// Whether the assembly holds no pages.
    pub fn is_empty(&self) -> bool {
        self.page_numbers.is_empty()
    }

    /// Materialize a standalone document holding exactly the assembled
    /// pages, in order.
    ///
    /// The source's outline is dropped from the output: its destinations
    /// would dangle once pages outside the assembly are removed.
    pub fn to_document(&self) -> Result<Document> {
        let all_pages = self.source.get_pages();

        let page_ids: Vec<ObjectId> = self
            .page_numbers
            .iter()
            .map(|number| {
                all_pages.get(number).copied().ok_or_else(|| {
                    PdfPartError::other(format!("page {number} does not exist in source"))
                })
            })
            .collect::<Result<_>>()?;

        let mut doc = self.source.clone();

        let catalog = doc
            .catalog_mut()
            .map_err(|e| PdfPartError::other(format!("Failed to get catalog: {e}")))?;
        catalog.remove(b"Outlines");

        let pages_id = catalog
            .get(b"Pages")
            .and_then(|p| p.as_reference())
            .map_err(|e| PdfPartError::other(format!("Failed to get pages reference: {e}")))?;

        let pages_obj = doc
            .get_object_mut(pages_id)
            .map_err(|e| PdfPartError::other(format!("Failed to get pages object: {e}")))?;

        if let Object::Dictionary(dict) = pages_obj {
            let kids: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();
            dict.set("Kids", Object::Array(kids));
            dict.set("Count", Object::Integer(page_ids.len() as i64));
        } else {
            return Err(PdfPartError::other("Pages object is not a dictionary"));
        }

        doc.prune_objects();
        doc.renumber_objects();

        Ok(doc)
    }

    /// Serialize the assembled pages into a byte buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut doc = self.to_document()?;
        doc.compress();

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)?;
        Ok(buffer)
    }
}
