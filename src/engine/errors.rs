use thiserror::Error;
use tracing::{debug, error};

use crate::engine::core::segment::segment_id::SegmentId;

/// Errors that can occur while planning merges.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Delegate broke the merge contract for bucket {bucket}: {reason}")]
    DelegateContract { bucket: String, reason: String },

    #[error("Segment {0} is already merging")]
    AlreadyMerging(SegmentId),
}

impl MergeError {
    pub fn log_error(&self) {
        match self {
            MergeError::Io(e) => {
                error!("Merge planning I/O failure: {}", e);
                debug!("I/O error details: {:?}", e);
            }
            MergeError::DelegateContract { bucket, reason } => {
                error!("Delegate returned an invalid plan for bucket {}", bucket);
                debug!("Contract violation details: {}", reason);
            }
            MergeError::AlreadyMerging(id) => {
                error!("Segment {} is already claimed by another merge", id);
            }
        }
    }

    /// True when the failure came from the delegate's storage layer and
    /// re-planning later with a fresh snapshot may succeed.
    pub fn is_io(&self) -> bool {
        matches!(self, MergeError::Io(_))
    }
}
