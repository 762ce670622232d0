use std::collections::HashMap;
use tracing::{debug, info, trace, warn};

use super::bucket::{BucketOptions, Partitions, check_delegate_plan};
use super::merge_plan::MergePlan;
use super::policy::{MergeContext, MergePolicy};
use super::request::MergeRequest;
use super::trigger::MergeTrigger;
use crate::engine::core::segment::segment_id::SegmentId;
use crate::engine::core::segment::segment_infos::SegmentView;
use crate::engine::errors::MergeError;
use crate::shared::config::CONFIG;

/// Wraps another policy so that only segments of the same bucket are ever
/// merged together.
///
/// Each call drops segments that are already merging, groups the rest by their
/// bucket attribute and asks the wrapped policy for a plan once per bucket with
/// two or more segments, handing it a candidate set holding only that bucket.
/// The per-bucket plans are concatenated. Any error from the wrapped policy
/// fails the whole call.
#[derive(Debug, Clone)]
pub struct BucketedMergePolicy<P> {
    inner: P,
    options: BucketOptions,
}

impl<P: MergePolicy> BucketedMergePolicy<P> {
    /// Wraps `inner` using the bucket settings from the global configuration.
    pub fn new(inner: P) -> Self {
        Self::with_options(inner, BucketOptions::from(&CONFIG.merge))
    }

    pub fn with_options(inner: P, options: BucketOptions) -> Self {
        Self { inner, options }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn options(&self) -> &BucketOptions {
        &self.options
    }

    /// Single entry point taking the request kind as data.
    pub fn plan(
        &self,
        request: &MergeRequest<'_>,
        infos: &SegmentView<'_>,
        ctx: &dyn MergeContext,
    ) -> Result<Option<MergePlan>, MergeError> {
        let kind = request.kind();
        let merging = ctx.merging_segments();
        let partitions = Partitions::build(infos, &merging, &self.options);

        debug!(
            target: "bucketed_merge::plan",
            kind = %kind,
            live = infos.len(),
            buckets = partitions.len(),
            excluded_merging = partitions.excluded_merging,
            excluded_unkeyed = partitions.excluded_unkeyed,
            "Partitioned live segments"
        );

        for bucket in partitions.singletons() {
            trace!(
                target: "bucketed_merge::plan",
                kind = %kind,
                bucket = %bucket,
                "Skipping bucket with a single eligible segment"
            );
        }

        let mut merged: Option<MergePlan> = None;
        for (bucket, candidates) in partitions.candidate_sets() {
            let delegate_plan = match self.inner.find_for(request, &candidates, ctx) {
                Ok(delegate_plan) => delegate_plan,
                Err(e) => {
                    warn!(
                        target: "bucketed_merge::plan",
                        kind = %kind,
                        bucket = %bucket,
                        candidates = candidates.len(),
                        error = %e,
                        "Delegate policy failed, aborting planning call"
                    );
                    return Err(e);
                }
            };

            let Some(delegate_plan) = delegate_plan.and_then(MergePlan::non_empty) else {
                debug!(
                    target: "bucketed_merge::plan",
                    kind = %kind,
                    bucket = %bucket,
                    candidates = candidates.len(),
                    "Delegate found nothing to merge"
                );
                continue;
            };

            if let Err(e) = check_delegate_plan(bucket, &candidates, &delegate_plan) {
                e.log_error();
                return Err(e);
            }
            debug!(
                target: "bucketed_merge::plan",
                kind = %kind,
                bucket = %bucket,
                candidates = candidates.len(),
                groups = delegate_plan.len(),
                "Delegate planned merges"
            );

            merged.get_or_insert_with(MergePlan::new).extend(delegate_plan);
        }

        match &merged {
            Some(plan) => info!(
                target: "bucketed_merge::plan",
                kind = %kind,
                groups = plan.len(),
                segments = plan.segment_count(),
                "Planned bucketed merges"
            ),
            None => debug!(
                target: "bucketed_merge::plan",
                kind = %kind,
                "No merges needed"
            ),
        }

        Ok(merged)
    }
}

impl<P: MergePolicy> MergePolicy for BucketedMergePolicy<P> {
    fn find_merges(
        &self,
        trigger: MergeTrigger,
        infos: &SegmentView<'_>,
        ctx: &dyn MergeContext,
    ) -> Result<Option<MergePlan>, MergeError> {
        self.plan(&MergeRequest::Regular { trigger }, infos, ctx)
    }

    fn find_forced_merges(
        &self,
        infos: &SegmentView<'_>,
        max_segment_count: usize,
        segments_to_merge: &HashMap<SegmentId, bool>,
        ctx: &dyn MergeContext,
    ) -> Result<Option<MergePlan>, MergeError> {
        let request = MergeRequest::Forced {
            max_segment_count,
            segments_to_merge,
        };
        self.plan(&request, infos, ctx)
    }

    fn find_forced_deletes_merges(
        &self,
        infos: &SegmentView<'_>,
        ctx: &dyn MergeContext,
    ) -> Result<Option<MergePlan>, MergeError> {
        self.plan(&MergeRequest::ForcedDeletes, infos, ctx)
    }

    fn find_full_flush_merges(
        &self,
        trigger: MergeTrigger,
        infos: &SegmentView<'_>,
        ctx: &dyn MergeContext,
    ) -> Result<Option<MergePlan>, MergeError> {
        self.plan(&MergeRequest::FullFlush { trigger }, infos, ctx)
    }
}
