use crate::engine::core::merge::bucket::BUCKET_ATTRIBUTE;
use crate::engine::core::segment::segment_id::SegmentId;
use crate::test_helpers::factory::Factory;

#[test]
fn test_segment_factory() {
    let segment = Factory::segment()
        .with("id", 12)
        .with("bucket", "tenant-a")
        .with("max_doc", 500)
        .with("del_count", 20)
        .with_attribute("codec", "v2")
        .create();

    assert_eq!(segment.id, SegmentId::new(12));
    assert_eq!(segment.attribute(BUCKET_ATTRIBUTE), Some("tenant-a"));
    assert_eq!(segment.attribute("codec"), Some("v2"));
    assert_eq!(segment.max_doc, 500);
    assert_eq!(segment.del_count, 20);
}

#[test]
fn test_segment_factory_defaults_to_unkeyed() {
    let segment = Factory::segment().create();
    assert_eq!(segment.attribute(BUCKET_ATTRIBUTE), None);
}

#[test]
fn test_segment_infos_factory_bucketed() {
    let infos = Factory::segment_infos()
        .with_version(8)
        .with_bucketed(&[(1, Some("A")), (2, None)])
        .create();

    assert_eq!(infos.created_version_major(), 8);
    assert_eq!(infos.len(), 2);
    assert_eq!(
        infos.get(SegmentId::new(1)).unwrap().attribute(BUCKET_ATTRIBUTE),
        Some("A")
    );
    assert_eq!(
        infos.get(SegmentId::new(2)).unwrap().attribute(BUCKET_ATTRIBUTE),
        None
    );
}
