use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fmt::{Display, Formatter};

use super::merge_plan::MergePlan;
use crate::engine::core::segment::segment_id::SegmentId;
use crate::engine::core::segment::segment_info::SegmentCommitInfo;
use crate::engine::core::segment::segment_infos::SegmentView;
use crate::engine::errors::MergeError;
use crate::shared::config::MergeConfig;

/// Default segment attribute carrying the partition key.
pub const BUCKET_ATTRIBUTE: &str = "bucket";

/// Partition a segment belongs to. Segments without the bucket attribute
/// share the `Unkeyed` bucket and never mix with keyed ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BucketKey<'a> {
    Unkeyed,
    Keyed(&'a str),
}

impl<'a> BucketKey<'a> {
    pub fn of(segment: &'a SegmentCommitInfo, attribute: &str) -> Self {
        match segment.attribute(attribute) {
            Some(key) => BucketKey::Keyed(key),
            None => BucketKey::Unkeyed,
        }
    }
}

impl Display for BucketKey<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BucketKey::Unkeyed => f.write_str("<unkeyed>"),
            BucketKey::Keyed(key) => f.write_str(key),
        }
    }
}

/// What to do with segments that carry no partition key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnkeyedSegments {
    /// They form their own bucket and merge with each other.
    #[default]
    Merge,
    /// They are left out of every plan.
    Skip,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BucketOptions {
    pub bucket_attribute: String,
    pub unkeyed: UnkeyedSegments,
}

impl Default for BucketOptions {
    fn default() -> Self {
        Self {
            bucket_attribute: BUCKET_ATTRIBUTE.to_string(),
            unkeyed: UnkeyedSegments::Merge,
        }
    }
}

impl From<&MergeConfig> for BucketOptions {
    fn from(cfg: &MergeConfig) -> Self {
        Self {
            bucket_attribute: cfg.bucket_attribute.clone(),
            unkeyed: cfg.unkeyed_segments,
        }
    }
}

/// Eligible segments of one planning call grouped by bucket. Built fresh per
/// call and dropped with it.
#[derive(Debug)]
pub struct Partitions<'a> {
    created_version_major: u32,
    buckets: HashMap<BucketKey<'a>, Vec<&'a SegmentCommitInfo>>,
    pub excluded_merging: usize,
    pub excluded_unkeyed: usize,
}

impl<'a> Partitions<'a> {
    /// One pass over `infos`: drop merging segments first, then key the rest.
    pub fn build(
        infos: &SegmentView<'a>,
        merging: &HashSet<SegmentId>,
        options: &BucketOptions,
    ) -> Self {
        let mut buckets: HashMap<BucketKey<'a>, Vec<&'a SegmentCommitInfo>> = HashMap::new();
        let mut excluded_merging = 0;
        let mut excluded_unkeyed = 0;

        for segment in infos.iter() {
            if merging.contains(&segment.id) {
                excluded_merging += 1;
                continue;
            }
            let key = BucketKey::of(segment, &options.bucket_attribute);
            if key == BucketKey::Unkeyed && options.unkeyed == UnkeyedSegments::Skip {
                excluded_unkeyed += 1;
                continue;
            }
            buckets.entry(key).or_default().push(segment);
        }

        Self {
            created_version_major: infos.created_version_major(),
            buckets,
            excluded_merging,
            excluded_unkeyed,
        }
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn bucket(&self, key: &BucketKey<'a>) -> Option<&[&'a SegmentCommitInfo]> {
        self.buckets.get(key).map(Vec::as_slice)
    }

    /// Buckets holding a single eligible segment; nothing to merge there.
    pub fn singletons(&self) -> impl Iterator<Item = BucketKey<'a>> + '_ {
        self.buckets
            .iter()
            .filter(|(_, segments)| segments.len() < 2)
            .map(|(key, _)| *key)
    }

    /// A self-contained candidate set per bucket with at least two segments.
    pub fn candidate_sets(&self) -> impl Iterator<Item = (BucketKey<'a>, SegmentView<'a>)> + '_ {
        self.buckets
            .iter()
            .filter(|(_, segments)| segments.len() > 1)
            .map(|(key, segments)| {
                (
                    *key,
                    SegmentView::with_segments(self.created_version_major, segments.clone()),
                )
            })
    }
}

/// Rejects a delegate plan that could break partition isolation or claim a
/// segment twice: every group needs two or more segments, all drawn from
/// `candidates`, none repeated.
pub fn check_delegate_plan(
    bucket: BucketKey<'_>,
    candidates: &SegmentView<'_>,
    plan: &MergePlan,
) -> Result<(), MergeError> {
    let violation = |reason: String| MergeError::DelegateContract {
        bucket: bucket.to_string(),
        reason,
    };

    let allowed: HashSet<SegmentId> = candidates.ids().collect();
    let mut seen: HashSet<SegmentId> = HashSet::new();
    for group in &plan.groups {
        if group.len() < 2 {
            return Err(violation(format!(
                "group {:?} names fewer than two segments",
                group.segments
            )));
        }
        for id in &group.segments {
            if !allowed.contains(id) {
                return Err(violation(format!("segment {} is outside the bucket", id)));
            }
            if !seen.insert(*id) {
                return Err(violation(format!("segment {} appears twice", id)));
            }
        }
    }
    Ok(())
}
