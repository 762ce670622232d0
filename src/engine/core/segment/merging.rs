use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use super::segment_id::SegmentId;
use crate::engine::core::merge::merge_plan::MergePlan;
use crate::engine::core::merge::policy::MergeContext;
use crate::engine::errors::MergeError;

/// Tracks segments claimed by an accepted merge plan so that the next planning
/// call excludes them. Executors register a plan before running it.
#[derive(Debug, Clone, Default)]
pub struct MergingSegments {
    inner: Arc<RwLock<HashSet<SegmentId>>>,
}

impl MergingSegments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims every segment of `plan` in one step. Fails without claiming
    /// anything if one of them is already merging.
    pub fn register(&self, plan: &MergePlan) -> Result<MergeGuard, MergeError> {
        let segments: Vec<SegmentId> = plan.segment_ids().collect();
        {
            let mut guard = self.inner.write();
            if let Some(taken) = segments.iter().find(|id| guard.contains(*id)) {
                return Err(MergeError::AlreadyMerging(*taken));
            }
            guard.extend(segments.iter().copied());
        }
        debug!(
            target: "merging_segments::register",
            segments = segments.len(),
            groups = plan.len(),
            "Registered merge plan"
        );
        Ok(MergeGuard {
            tracker: self.clone(),
            segments,
            active: true,
        })
    }

    pub fn insert(&self, segment_id: SegmentId) -> bool {
        self.inner.write().insert(segment_id)
    }

    pub fn remove(&self, segment_id: SegmentId) -> bool {
        self.inner.write().remove(&segment_id)
    }

    pub fn contains(&self, segment_id: SegmentId) -> bool {
        self.inner.read().contains(&segment_id)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Point-in-time copy of the claimed set.
    pub fn snapshot(&self) -> HashSet<SegmentId> {
        self.inner.read().clone()
    }
}

impl MergeContext for MergingSegments {
    fn merging_segments(&self) -> HashSet<SegmentId> {
        self.snapshot()
    }
}

/// Releases the claimed segments when dropped, once the merge finished or failed.
pub struct MergeGuard {
    tracker: MergingSegments,
    segments: Vec<SegmentId>,
    active: bool,
}

impl MergeGuard {
    pub fn segments(&self) -> &[SegmentId] {
        &self.segments
    }

    /// Keeps the segments claimed after the guard goes away; the caller then
    /// owns removing them.
    pub fn disarm(mut self) {
        self.active = false;
    }
}

impl Drop for MergeGuard {
    fn drop(&mut self) {
        if self.active {
            let mut guard = self.tracker.inner.write();
            for id in &self.segments {
                guard.remove(id);
            }
        }
    }
}
