use super::segment_id::SegmentId;
use std::collections::BTreeMap;

/// Per-segment metadata already loaded by the registry: identity, doc counts
/// and the string attributes stamped by the codec at creation time.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentCommitInfo {
    pub id: SegmentId,
    /// Documents written to the segment, deleted ones included
    pub max_doc: u32,
    /// Documents tombstoned since the segment was written
    pub del_count: u32,
    pub size_bytes: u64,
    attributes: BTreeMap<String, String>,
}

impl SegmentCommitInfo {
    pub fn new(id: impl Into<SegmentId>, max_doc: u32) -> Self {
        Self {
            id: id.into(),
            max_doc,
            del_count: 0,
            size_bytes: 0,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_del_count(mut self, del_count: u32) -> Self {
        self.del_count = del_count.min(self.max_doc);
        self
    }

    pub fn with_size_bytes(mut self, size_bytes: u64) -> Self {
        self.size_bytes = size_bytes;
        self
    }

    #[inline]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    #[inline]
    pub fn live_docs(&self) -> u32 {
        self.max_doc.saturating_sub(self.del_count)
    }

    /// Deleted documents as a percentage of `max_doc`; 0 for empty segments.
    pub fn deleted_pct(&self) -> f64 {
        if self.max_doc == 0 {
            return 0.0;
        }
        self.del_count as f64 * 100.0 / self.max_doc as f64
    }
}
