use super::segment_id::SegmentId;
use super::segment_info::SegmentCommitInfo;

/// Owned snapshot of the live segments of one index, in commit order.
#[derive(Debug, Clone, Default)]
pub struct SegmentInfos {
    created_version_major: u32,
    segments: Vec<SegmentCommitInfo>,
}

impl SegmentInfos {
    pub fn new(created_version_major: u32) -> Self {
        Self {
            created_version_major,
            segments: Vec::new(),
        }
    }

    pub fn from_segments(created_version_major: u32, segments: Vec<SegmentCommitInfo>) -> Self {
        Self {
            created_version_major,
            segments,
        }
    }

    pub fn add(&mut self, segment: SegmentCommitInfo) {
        self.segments.push(segment);
    }

    pub fn created_version_major(&self) -> u32 {
        self.created_version_major
    }

    pub fn segments(&self) -> &[SegmentCommitInfo] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn get(&self, id: SegmentId) -> Option<&SegmentCommitInfo> {
        self.segments.iter().find(|s| s.id == id)
    }

    /// Borrowed view over every segment, the input shape merge policies take.
    pub fn view(&self) -> SegmentView<'_> {
        SegmentView {
            created_version_major: self.created_version_major,
            segments: self.segments.iter().collect(),
        }
    }
}

/// Lightweight candidate set: references into a `SegmentInfos` plus the index
/// metadata a policy needs. Building one never copies segment data.
#[derive(Debug, Clone)]
pub struct SegmentView<'a> {
    created_version_major: u32,
    segments: Vec<&'a SegmentCommitInfo>,
}

impl<'a> SegmentView<'a> {
    pub fn new(created_version_major: u32) -> Self {
        Self {
            created_version_major,
            segments: Vec::new(),
        }
    }

    pub fn with_segments(created_version_major: u32, segments: Vec<&'a SegmentCommitInfo>) -> Self {
        Self {
            created_version_major,
            segments,
        }
    }

    pub fn add(&mut self, segment: &'a SegmentCommitInfo) {
        self.segments.push(segment);
    }

    pub fn created_version_major(&self) -> u32 {
        self.created_version_major
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a SegmentCommitInfo> + '_ {
        self.segments.iter().copied()
    }

    pub fn ids(&self) -> impl Iterator<Item = SegmentId> + '_ {
        self.segments.iter().map(|s| s.id)
    }

    pub fn contains(&self, id: SegmentId) -> bool {
        self.segments.iter().any(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
