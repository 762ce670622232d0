use std::collections::HashMap;

use super::merge_plan::{MergeGroup, MergePlan};
use super::policy::{MergeContext, MergePolicy};
use super::trigger::MergeTrigger;
use crate::engine::core::segment::segment_id::SegmentId;
use crate::engine::core::segment::segment_info::SegmentCommitInfo;
use crate::engine::core::segment::segment_infos::SegmentView;
use crate::engine::errors::MergeError;
use crate::shared::config::CONFIG;

/// K-way count policy: chunk the candidate segments, smallest first, into
/// groups of `k`. A short run of leftovers is merged on its own once it
/// reaches ~67% of `k`, otherwise it waits for more segments.
#[derive(Debug, Clone)]
pub struct KWayCountPolicy {
    pub k: usize,
    /// Minimum segments required to merge a run shorter than `k`
    min_leftover_threshold: usize,
    /// Deleted-document percentage that makes a segment a forced-deletes candidate
    pub forced_deletes_pct: f64,
}

impl KWayCountPolicy {
    pub fn new(k: usize) -> Self {
        // A group always needs two inputs, so k and the leftover threshold
        // bottom out at 2.
        let k = k.max(2);
        Self {
            k,
            min_leftover_threshold: ((k * 2) / 3).max(2),
            forced_deletes_pct: 10.0,
        }
    }

    pub fn with_forced_deletes_pct(mut self, pct: f64) -> Self {
        self.forced_deletes_pct = pct;
        self
    }

    pub fn min_leftover_threshold(&self) -> usize {
        self.min_leftover_threshold
    }

    fn chunk(&self, ordered: &[&SegmentCommitInfo]) -> Vec<MergeGroup> {
        let ids: Vec<SegmentId> = ordered.iter().map(|s| s.id).collect();

        if ids.len() < self.min_leftover_threshold {
            return Vec::new();
        }
        if ids.len() < self.k {
            tracing::debug!(
                target: "kway_policy::find_merges",
                segment_count = ids.len(),
                min_threshold = self.min_leftover_threshold,
                k = self.k,
                "Merging short run of leftover segments"
            );
            return vec![MergeGroup::new(ids)];
        }

        ids.chunks(self.k)
            .take_while(|chunk| chunk.len() == self.k)
            .map(|chunk| MergeGroup::new(chunk.to_vec()))
            .collect()
    }
}

impl Default for KWayCountPolicy {
    fn default() -> Self {
        let cfg = &CONFIG.merge;
        Self::new(cfg.segments_per_merge).with_forced_deletes_pct(cfg.forced_deletes_pct)
    }
}

/// Smallest first; id breaks ties so plans are deterministic.
fn by_size<'a>(infos: &SegmentView<'a>) -> Vec<&'a SegmentCommitInfo> {
    let mut ordered: Vec<&SegmentCommitInfo> = infos.iter().collect();
    ordered.sort_by_key(|s| (s.size_bytes, s.id));
    ordered
}

impl MergePolicy for KWayCountPolicy {
    fn find_merges(
        &self,
        trigger: MergeTrigger,
        infos: &SegmentView<'_>,
        _ctx: &dyn MergeContext,
    ) -> Result<Option<MergePlan>, MergeError> {
        let groups = self.chunk(&by_size(infos));
        tracing::debug!(
            target: "kway_policy::find_merges",
            trigger = %trigger,
            candidates = infos.len(),
            groups = groups.len(),
            "Generated k-way merge groups"
        );
        Ok(groups.into_iter().collect::<MergePlan>().non_empty())
    }

    /// Merges the smallest eligible segments into one group, enough of them to
    /// bring the candidate set down to `max_segment_count`.
    fn find_forced_merges(
        &self,
        infos: &SegmentView<'_>,
        max_segment_count: usize,
        segments_to_merge: &HashMap<SegmentId, bool>,
        _ctx: &dyn MergeContext,
    ) -> Result<Option<MergePlan>, MergeError> {
        let target = max_segment_count.max(1);
        let excess = infos.len().saturating_sub(target);
        if excess == 0 {
            return Ok(None);
        }

        let eligible: Vec<SegmentId> = by_size(infos)
            .into_iter()
            .filter(|s| segments_to_merge.is_empty() || segments_to_merge.contains_key(&s.id))
            .map(|s| s.id)
            .collect();

        // Merging n segments into one removes n - 1 of them.
        let take = (excess + 1).min(eligible.len());
        if take < 2 {
            return Ok(None);
        }

        tracing::debug!(
            target: "kway_policy::find_forced_merges",
            candidates = infos.len(),
            eligible = eligible.len(),
            max_segment_count = target,
            take,
            "Forcing merge"
        );
        Ok(Some(MergePlan {
            groups: vec![MergeGroup::new(eligible[..take].to_vec())],
        }))
    }

    fn find_forced_deletes_merges(
        &self,
        infos: &SegmentView<'_>,
        _ctx: &dyn MergeContext,
    ) -> Result<Option<MergePlan>, MergeError> {
        let with_deletes: Vec<&SegmentCommitInfo> = by_size(infos)
            .into_iter()
            .filter(|s| s.del_count > 0 && s.deleted_pct() > self.forced_deletes_pct)
            .collect();
        if with_deletes.len() < 2 {
            return Ok(None);
        }

        let mut plan = MergePlan::new();
        for chunk in with_deletes.chunks(self.k) {
            if chunk.len() >= 2 {
                plan.push(MergeGroup::new(chunk.iter().map(|s| s.id).collect()));
            }
        }
        tracing::debug!(
            target: "kway_policy::find_forced_deletes_merges",
            candidates = infos.len(),
            with_deletes = with_deletes.len(),
            groups = plan.len(),
            "Planned deletes expunge"
        );
        Ok(plan.non_empty())
    }
}
