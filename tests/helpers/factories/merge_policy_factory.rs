use crate::engine::core::merge::bucket::BUCKET_ATTRIBUTE;
use crate::engine::core::merge::merge_plan::{MergeGroup, MergePlan};
use crate::engine::core::merge::policy::{MergeContext, MergePolicy};
use crate::engine::core::merge::request::MergeRequestKind;
use crate::engine::core::merge::trigger::MergeTrigger;
use crate::engine::core::segment::segment_id::SegmentId;
use crate::engine::core::segment::segment_infos::SegmentView;
use crate::engine::errors::MergeError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io;
use std::sync::Arc;

/// What the recording delegate answers with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DelegateBehavior {
    /// One group holding every candidate.
    MergeAll,
    /// Consecutive pairs by ascending id; an odd one out is left alone.
    MergePairs,
    /// `Ok(None)`.
    Nothing,
    /// `Ok(Some(plan))` with no groups.
    EmptyPlan,
    /// A group that also names a segment outside the candidate set.
    Foreign(u32),
    /// A group with a single segment.
    Singleton,
}

/// One invocation seen by the recording delegate.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub kind: MergeRequestKind,
    pub segments: Vec<SegmentId>,
    pub buckets: Vec<Option<String>>,
    pub created_version_major: u32,
    pub trigger: Option<MergeTrigger>,
    pub max_segment_count: Option<usize>,
    pub segments_to_merge: Option<HashMap<SegmentId, bool>>,
}

/// Delegate that records every candidate set it is handed and answers with a
/// canned behavior. Clones share the recorded calls.
#[derive(Debug, Clone)]
pub struct RecordingPolicy {
    behavior: DelegateBehavior,
    failing_bucket: Option<String>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl RecordingPolicy {
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn respond(
        &self,
        kind: MergeRequestKind,
        infos: &SegmentView<'_>,
        trigger: Option<MergeTrigger>,
        forced: Option<(usize, &HashMap<SegmentId, bool>)>,
    ) -> Result<Option<MergePlan>, MergeError> {
        let buckets: Vec<Option<String>> = infos
            .iter()
            .map(|s| s.attribute(BUCKET_ATTRIBUTE).map(str::to_string))
            .collect();
        self.calls.lock().push(RecordedCall {
            kind,
            segments: infos.ids().collect(),
            buckets: buckets.clone(),
            created_version_major: infos.created_version_major(),
            trigger,
            max_segment_count: forced.map(|(max, _)| max),
            segments_to_merge: forced.map(|(_, map)| map.clone()),
        });

        if let Some(failing) = &self.failing_bucket {
            if buckets.iter().any(|b| b.as_deref() == Some(failing.as_str())) {
                return Err(MergeError::Io(io::Error::new(
                    io::ErrorKind::Other,
                    format!("simulated read failure in bucket {}", failing),
                )));
            }
        }

        let mut ids: Vec<SegmentId> = infos.ids().collect();
        ids.sort();
        let plan = match self.behavior {
            DelegateBehavior::MergeAll => Some(MergePlan {
                groups: vec![MergeGroup::new(ids)],
            }),
            DelegateBehavior::MergePairs => Some(
                ids.chunks_exact(2)
                    .map(|pair| MergeGroup::new(pair.to_vec()))
                    .collect(),
            ),
            DelegateBehavior::Nothing => None,
            DelegateBehavior::EmptyPlan => Some(MergePlan::new()),
            DelegateBehavior::Foreign(foreign) => {
                ids.push(SegmentId::new(foreign));
                Some(MergePlan {
                    groups: vec![MergeGroup::new(ids)],
                })
            }
            DelegateBehavior::Singleton => Some(MergePlan {
                groups: vec![MergeGroup::new(vec![ids[0]])],
            }),
        };
        Ok(plan)
    }
}

impl MergePolicy for RecordingPolicy {
    fn find_merges(
        &self,
        trigger: MergeTrigger,
        infos: &SegmentView<'_>,
        _ctx: &dyn MergeContext,
    ) -> Result<Option<MergePlan>, MergeError> {
        self.respond(MergeRequestKind::Regular, infos, Some(trigger), None)
    }

    fn find_forced_merges(
        &self,
        infos: &SegmentView<'_>,
        max_segment_count: usize,
        segments_to_merge: &HashMap<SegmentId, bool>,
        _ctx: &dyn MergeContext,
    ) -> Result<Option<MergePlan>, MergeError> {
        self.respond(
            MergeRequestKind::Forced,
            infos,
            None,
            Some((max_segment_count, segments_to_merge)),
        )
    }

    fn find_forced_deletes_merges(
        &self,
        infos: &SegmentView<'_>,
        _ctx: &dyn MergeContext,
    ) -> Result<Option<MergePlan>, MergeError> {
        self.respond(MergeRequestKind::ForcedDeletes, infos, None, None)
    }

    fn find_full_flush_merges(
        &self,
        trigger: MergeTrigger,
        infos: &SegmentView<'_>,
        _ctx: &dyn MergeContext,
    ) -> Result<Option<MergePlan>, MergeError> {
        self.respond(MergeRequestKind::FullFlush, infos, Some(trigger), None)
    }
}

pub struct MergePolicyFactory {
    behavior: DelegateBehavior,
    failing_bucket: Option<String>,
}

impl MergePolicyFactory {
    pub fn new() -> Self {
        Self {
            behavior: DelegateBehavior::MergeAll,
            failing_bucket: None,
        }
    }

    pub fn with_behavior(mut self, behavior: DelegateBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Fail with an I/O error whenever the candidate set belongs to `bucket`.
    pub fn failing_on(mut self, bucket: &str) -> Self {
        self.failing_bucket = Some(bucket.to_string());
        self
    }

    pub fn create(self) -> RecordingPolicy {
        RecordingPolicy {
            behavior: self.behavior,
            failing_bucket: self.failing_bucket,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}
