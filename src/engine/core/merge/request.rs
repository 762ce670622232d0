use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use super::trigger::MergeTrigger;
use crate::engine::core::segment::segment_id::SegmentId;

/// Which of the four planning entry points a call goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeRequestKind {
    Regular,
    Forced,
    ForcedDeletes,
    FullFlush,
}

impl MergeRequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MergeRequestKind::Regular => "regular",
            MergeRequestKind::Forced => "forced",
            MergeRequestKind::ForcedDeletes => "forced_deletes",
            MergeRequestKind::FullFlush => "full_flush",
        }
    }
}

impl Display for MergeRequestKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A planning request together with its kind-specific parameters. The
/// parameters are handed to the policy as they are.
#[derive(Debug, Clone, Copy)]
pub enum MergeRequest<'a> {
    Regular {
        trigger: MergeTrigger,
    },
    Forced {
        max_segment_count: usize,
        /// Segments that must be merged away; an empty map means all of them
        segments_to_merge: &'a HashMap<SegmentId, bool>,
    },
    ForcedDeletes,
    FullFlush {
        trigger: MergeTrigger,
    },
}

impl MergeRequest<'_> {
    pub fn kind(&self) -> MergeRequestKind {
        match self {
            MergeRequest::Regular { .. } => MergeRequestKind::Regular,
            MergeRequest::Forced { .. } => MergeRequestKind::Forced,
            MergeRequest::ForcedDeletes => MergeRequestKind::ForcedDeletes,
            MergeRequest::FullFlush { .. } => MergeRequestKind::FullFlush,
        }
    }
}
