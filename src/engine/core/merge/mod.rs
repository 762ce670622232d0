//! Merge planning: the policy seam, the plan types, and the bucketed wrapper
//! that keeps merges inside one partition key.

pub mod bucket;
pub mod bucketed;
pub mod kway;
pub mod merge_plan;
pub mod policy;
pub mod request;
pub mod trigger;
