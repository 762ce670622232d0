use std::collections::{HashMap, HashSet};
use std::fmt::Debug;

use super::merge_plan::MergePlan;
use super::request::MergeRequest;
use super::trigger::MergeTrigger;
use crate::engine::core::segment::segment_id::SegmentId;
use crate::engine::core::segment::segment_infos::SegmentView;
use crate::engine::errors::MergeError;

/// Execution-side state a policy may consult while planning.
pub trait MergeContext {
    /// Segments currently claimed by an in-flight merge, as of this call.
    fn merging_segments(&self) -> HashSet<SegmentId>;
}

impl MergeContext for HashSet<SegmentId> {
    fn merging_segments(&self) -> HashSet<SegmentId> {
        self.clone()
    }
}

/// Decides which segments of a candidate set should be merged together.
///
/// Every method returns `Ok(None)` when nothing needs merging. A returned plan
/// must only name segments of `infos`, each in at most one group.
pub trait MergePolicy: Send + Sync + Debug {
    /// Merges wanted after `trigger` changed the segment set.
    fn find_merges(
        &self,
        trigger: MergeTrigger,
        infos: &SegmentView<'_>,
        ctx: &dyn MergeContext,
    ) -> Result<Option<MergePlan>, MergeError>;

    /// Merges needed to get down to `max_segment_count` segments. Segments in
    /// `segments_to_merge` must be merged away; an empty map selects all.
    fn find_forced_merges(
        &self,
        infos: &SegmentView<'_>,
        max_segment_count: usize,
        segments_to_merge: &HashMap<SegmentId, bool>,
        ctx: &dyn MergeContext,
    ) -> Result<Option<MergePlan>, MergeError>;

    /// Merges that expunge deleted documents.
    fn find_forced_deletes_merges(
        &self,
        infos: &SegmentView<'_>,
        ctx: &dyn MergeContext,
    ) -> Result<Option<MergePlan>, MergeError>;

    /// Merges to run synchronously at commit or reader open.
    fn find_full_flush_merges(
        &self,
        _trigger: MergeTrigger,
        _infos: &SegmentView<'_>,
        _ctx: &dyn MergeContext,
    ) -> Result<Option<MergePlan>, MergeError> {
        Ok(None)
    }

    /// Routes a bundled request to the matching `find_*` method.
    fn find_for(
        &self,
        request: &MergeRequest<'_>,
        infos: &SegmentView<'_>,
        ctx: &dyn MergeContext,
    ) -> Result<Option<MergePlan>, MergeError> {
        match *request {
            MergeRequest::Regular { trigger } => self.find_merges(trigger, infos, ctx),
            MergeRequest::Forced {
                max_segment_count,
                segments_to_merge,
            } => self.find_forced_merges(infos, max_segment_count, segments_to_merge, ctx),
            MergeRequest::ForcedDeletes => self.find_forced_deletes_merges(infos, ctx),
            MergeRequest::FullFlush { trigger } => {
                self.find_full_flush_merges(trigger, infos, ctx)
            }
        }
    }
}

/// Never merges.
#[derive(Debug, Clone, Default)]
pub struct NoMergePolicy;

impl MergePolicy for NoMergePolicy {
    fn find_merges(
        &self,
        _trigger: MergeTrigger,
        _infos: &SegmentView<'_>,
        _ctx: &dyn MergeContext,
    ) -> Result<Option<MergePlan>, MergeError> {
        Ok(None)
    }

    fn find_forced_merges(
        &self,
        _infos: &SegmentView<'_>,
        _max_segment_count: usize,
        _segments_to_merge: &HashMap<SegmentId, bool>,
        _ctx: &dyn MergeContext,
    ) -> Result<Option<MergePlan>, MergeError> {
        Ok(None)
    }

    fn find_forced_deletes_merges(
        &self,
        _infos: &SegmentView<'_>,
        _ctx: &dyn MergeContext,
    ) -> Result<Option<MergePlan>, MergeError> {
        Ok(None)
    }
}

impl<P: MergePolicy + ?Sized> MergePolicy for Box<P> {
    fn find_merges(
        &self,
        trigger: MergeTrigger,
        infos: &SegmentView<'_>,
        ctx: &dyn MergeContext,
    ) -> Result<Option<MergePlan>, MergeError> {
        (**self).find_merges(trigger, infos, ctx)
    }

    fn find_forced_merges(
        &self,
        infos: &SegmentView<'_>,
        max_segment_count: usize,
        segments_to_merge: &HashMap<SegmentId, bool>,
        ctx: &dyn MergeContext,
    ) -> Result<Option<MergePlan>, MergeError> {
        (**self).find_forced_merges(infos, max_segment_count, segments_to_merge, ctx)
    }

    fn find_forced_deletes_merges(
        &self,
        infos: &SegmentView<'_>,
        ctx: &dyn MergeContext,
    ) -> Result<Option<MergePlan>, MergeError> {
        (**self).find_forced_deletes_merges(infos, ctx)
    }

    fn find_full_flush_merges(
        &self,
        trigger: MergeTrigger,
        infos: &SegmentView<'_>,
        ctx: &dyn MergeContext,
    ) -> Result<Option<MergePlan>, MergeError> {
        (**self).find_full_flush_merges(trigger, infos, ctx)
    }
}
