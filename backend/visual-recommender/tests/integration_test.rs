// Integration tests for the visual recommender: real files on disk, full load

use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use visual_recommender::readers::{FeatureFileReader, TextLogReader};
use visual_recommender::report::{pick_sample_user, SummaryReport};
use visual_recommender::{AppError, Catalog, Config, FeatureStore, FEATURE_DIM};

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("tempdir"),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write_gz(&self, name: &str, text: &str) -> PathBuf {
        let path = self.path(name);
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(text.as_bytes()).unwrap();
        encoder.finish().unwrap();
        path
    }

    /// Each record: 8-byte id, then a vector with `hot` set at index `axis`.
    fn write_features(&self, name: &str, records: &[(&str, usize, f32)]) -> PathBuf {
        let path = self.path(name);
        let mut file = File::create(&path).unwrap();
        for (id, axis, hot) in records {
            file.write_all(&feature_record(id, *axis, *hot)).unwrap();
        }
        path
    }

    fn config(&self, features: &Path, owners: &Path, interactions: &Path) -> Config {
        Config {
            image_features_path: features.to_path_buf(),
            items_to_owners_path: owners.to_path_buf(),
            appreciate_path: interactions.to_path_buf(),
            image_feature_limit: 0,
            ..Config::default()
        }
    }
}

fn feature_record(id: &str, axis: usize, hot: f32) -> Vec<u8> {
    assert_eq!(id.len(), 8, "item ids occupy exactly 8 bytes");
    let mut bytes = id.as_bytes().to_vec();
    for i in 0..FEATURE_DIM {
        let value = if i == axis { hot } else { 0.01 };
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

#[test]
fn test_end_to_end_recommendation() {
    let fx = Fixture::new();
    let owners = fx.write_gz(
        "owners.gz",
        "10000001 ownerA\n10000002 ownerA\n10000003 ownerB\n10000001 ownerC\n",
    );
    let interactions = fx.write_gz(
        "appreciate.gz",
        "alice 10000001 300\nalice 10000002 100\nbob 10000003 50\nalice 10000009 abc\n",
    );
    let features = fx.write_features(
        "features.b",
        &[
            ("10000001", 0, 1.0),
            ("10000002", 1, 1.0),
            ("10000003", 0, 0.9),
            ("10000004", 1, 0.9),
            ("10000005", 2, 1.0),
        ],
    );

    let config = fx.config(&features, &owners, &interactions);
    let catalog = Catalog::load(&config).unwrap();

    let summary = SummaryReport::from_catalog(&catalog);
    assert_eq!(summary.items_with_owners, 3);
    assert_eq!(summary.owners_with_items, 3);
    assert_eq!(summary.users_with_interactions, 2);
    assert_eq!(summary.items_with_interactions, 4);
    assert_eq!(summary.loaded_item_features, 5);

    assert_eq!(
        catalog.ownership.owner_of("10000001").map(String::as_str),
        Some("ownerC")
    );

    let user = pick_sample_user(&catalog, None).unwrap();
    assert_eq!(user, "alice");

    // Window of 1 -> profile is item 10000001 (axis 0).
    let recs = catalog.recommender().recommend(&user, 10, 1);
    let ids: Vec<&str> = recs.iter().map(|r| r.item_id.as_str()).collect();
    assert_eq!(ids[0], "10000003");
    assert_eq!(ids.len(), 3);
    assert!(!ids.contains(&"10000001"));
    assert!(!ids.contains(&"10000002"));
    assert!(recs.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn test_missing_logs_degrade_to_empty_indices() {
    let fx = Fixture::new();
    let features = fx.write_features("features.b", &[("10000001", 0, 1.0)]);

    let config = fx.config(&features, &fx.path("nope.gz"), &fx.path("nope2.gz"));
    let catalog = Catalog::load(&config).unwrap();

    assert_eq!(catalog.ownership.item_count(), 0);
    assert!(catalog.interactions.is_empty());
    assert_eq!(catalog.features.len(), 1);
    assert!(pick_sample_user(&catalog, None).is_none());
    assert_eq!(pick_sample_user(&catalog, Some("carol")).as_deref(), Some("carol"));
    assert!(catalog.recommender().recommend("carol", 5, 10).is_empty());
}

#[test]
fn test_truncated_feature_file_aborts_load() {
    let fx = Fixture::new();
    let owners = fx.write_gz("owners.gz", "");
    let interactions = fx.write_gz("appreciate.gz", "");

    let path = fx.path("features.b");
    let mut bytes = feature_record("10000001", 0, 1.0);
    bytes.extend_from_slice(b"10000002");
    bytes.extend_from_slice(&[0u8; 100]);
    std::fs::write(&path, bytes).unwrap();

    let config = fx.config(&path, &owners, &interactions);
    let err = Catalog::load(&config).unwrap_err();
    assert!(matches!(err, AppError::TruncatedRecord { actual: 100, .. }));
    assert!(err.is_corrupt_input());
}

#[test]
fn test_limit_stops_before_truncated_tail() {
    let fx = Fixture::new();
    let path = fx.path("features.b");
    let mut bytes = feature_record("10000001", 0, 1.0);
    bytes.extend(feature_record("10000002", 1, 1.0));
    bytes.extend_from_slice(b"10000003");
    std::fs::write(&path, bytes).unwrap();

    let store = FeatureStore::load(&path, Some(2)).unwrap();
    assert_eq!(store.len(), 2);
    assert!(FeatureStore::load(&path, None).is_err());
}

#[test]
fn test_limit_takes_first_k_in_file_order() {
    let fx = Fixture::new();
    let features = fx.write_features(
        "features.b",
        &[
            ("10000004", 0, 1.0),
            ("10000002", 1, 1.0),
            ("10000003", 2, 1.0),
            ("10000001", 3, 1.0),
        ],
    );

    let store = FeatureStore::load(&features, Some(3)).unwrap();
    let ids: Vec<&str> = store.iter().map(|(id, _, _)| id.as_str()).collect();
    assert_eq!(ids, vec!["10000004", "10000002", "10000003"]);
}

#[test]
fn test_feature_reader_yields_every_full_record() {
    let fx = Fixture::new();
    let mut bytes = Vec::new();
    for i in 0..3 {
        bytes.extend(feature_record(&format!("1000000{}", i), i, 1.0));
    }
    bytes.extend_from_slice(b"1000");
    let path = fx.path("features.b");
    std::fs::write(&path, bytes).unwrap();

    let records: Vec<_> = FeatureFileReader::open(&path)
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.features.len() == FEATURE_DIM));
    assert_eq!(records[2].features[2], 1.0);
}

#[test]
fn test_text_log_row_counts_match_non_empty_lines() {
    let fx = Fixture::new();
    let path = fx.write_gz("log.gz", "a b c\n\nd e\n  \nf\n");

    let rows: Vec<_> = TextLogReader::open(&path).collect();
    let lens: Vec<usize> = rows.iter().map(Vec::len).collect();
    assert_eq!(lens, vec![3, 2, 1]);
}
