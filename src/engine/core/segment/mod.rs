pub mod merging;
pub mod segment_id;
pub mod segment_info;
pub mod segment_infos;
