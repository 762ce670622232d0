use crate::engine::core::merge::bucket::BUCKET_ATTRIBUTE;
use crate::engine::core::segment::segment_info::SegmentCommitInfo;
use serde_json::{Value, json};
use std::collections::HashMap;

pub struct SegmentFactory {
    params: HashMap<String, Value>,
    attributes: Vec<(String, String)>,
}

impl SegmentFactory {
    pub fn new() -> Self {
        let mut params = HashMap::new();
        params.insert("id".into(), json!(0));
        params.insert("bucket".into(), Value::Null);
        params.insert("max_doc".into(), json!(100));
        params.insert("del_count".into(), json!(0));
        params.insert("size_bytes".into(), json!(1024));
        Self {
            params,
            attributes: Vec::new(),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    pub fn with_attribute(mut self, key: &str, value: &str) -> Self {
        self.attributes.push((key.to_string(), value.to_string()));
        self
    }

    pub fn create(self) -> SegmentCommitInfo {
        let id = self.params["id"].as_u64().expect("id is missing or not a u64") as u32;
        let max_doc = self.params["max_doc"].as_u64().unwrap() as u32;
        let del_count = self.params["del_count"].as_u64().unwrap() as u32;
        let size_bytes = self.params["size_bytes"].as_u64().unwrap();

        let mut segment = SegmentCommitInfo::new(id, max_doc)
            .with_del_count(del_count)
            .with_size_bytes(size_bytes);
        if let Some(bucket) = self.params["bucket"].as_str() {
            segment = segment.with_attribute(BUCKET_ATTRIBUTE, bucket);
        }
        for (key, value) in self.attributes {
            segment = segment.with_attribute(key, value);
        }
        segment
    }
}
