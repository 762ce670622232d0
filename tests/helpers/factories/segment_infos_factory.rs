use super::segment_factory::SegmentFactory;
use crate::engine::core::segment::segment_info::SegmentCommitInfo;
use crate::engine::core::segment::segment_infos::SegmentInfos;

pub struct SegmentInfosFactory {
    created_version_major: u32,
    segments: Vec<SegmentCommitInfo>,
}

impl SegmentInfosFactory {
    pub fn new() -> Self {
        Self {
            created_version_major: 1,
            segments: Vec::new(),
        }
    }

    pub fn with_version(mut self, created_version_major: u32) -> Self {
        self.created_version_major = created_version_major;
        self
    }

    pub fn with_segment(mut self, segment: SegmentCommitInfo) -> Self {
        self.segments.push(segment);
        self
    }

    /// Adds one default segment per `(id, bucket)` pair; `None` leaves the
    /// bucket attribute unset.
    pub fn with_bucketed(mut self, entries: &[(u32, Option<&str>)]) -> Self {
        for (id, bucket) in entries {
            let mut factory = SegmentFactory::new().with("id", *id);
            if let Some(bucket) = bucket {
                factory = factory.with("bucket", *bucket);
            }
            self.segments.push(factory.create());
        }
        self
    }

    pub fn create(self) -> SegmentInfos {
        SegmentInfos::from_segments(self.created_version_major, self.segments)
    }
}
