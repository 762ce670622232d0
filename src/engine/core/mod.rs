pub mod merge;
pub mod segment;

pub use merge::bucket::{BucketKey, BucketOptions, UnkeyedSegments};
pub use merge::bucketed::BucketedMergePolicy;
pub use merge::kway::KWayCountPolicy;
pub use merge::merge_plan::{MergeGroup, MergePlan};
pub use merge::policy::{MergeContext, MergePolicy, NoMergePolicy};
pub use merge::request::{MergeRequest, MergeRequestKind};
pub use merge::trigger::MergeTrigger;
pub use segment::merging::{MergeGuard, MergingSegments};
pub use segment::segment_id::SegmentId;
pub use segment::segment_info::SegmentCommitInfo;
pub use segment::segment_infos::{SegmentInfos, SegmentView};
