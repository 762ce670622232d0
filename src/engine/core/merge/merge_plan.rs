use crate::engine::core::segment::segment_id::SegmentId;

/// Segments to be rewritten into one new segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeGroup {
    /// Input segments, in the order the policy chose them
    pub segments: Vec<SegmentId>,
}

impl MergeGroup {
    pub fn new(segments: Vec<SegmentId>) -> Self {
        Self { segments }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn contains(&self, id: SegmentId) -> bool {
        self.segments.contains(&id)
    }
}

/// Unordered set of merge groups handed to the executor. Groups never share a
/// segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePlan {
    pub groups: Vec<MergeGroup>,
}

impl MergePlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, group: MergeGroup) {
        self.groups.push(group);
    }

    /// Appends every group of `other`.
    pub fn extend(&mut self, other: MergePlan) {
        self.groups.extend(other.groups);
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn segment_ids(&self) -> impl Iterator<Item = SegmentId> + '_ {
        self.groups.iter().flat_map(|g| g.segments.iter().copied())
    }

    pub fn segment_count(&self) -> usize {
        self.groups.iter().map(MergeGroup::len).sum()
    }

    /// `None` for a plan without groups, so "nothing to do" has one spelling.
    pub fn non_empty(self) -> Option<Self> {
        if self.groups.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

impl FromIterator<MergeGroup> for MergePlan {
    fn from_iter<I: IntoIterator<Item = MergeGroup>>(iter: I) -> Self {
        Self {
            groups: iter.into_iter().collect(),
        }
    }
}
