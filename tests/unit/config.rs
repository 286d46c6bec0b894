use super::*;
use crate::record::fields::Field;
use crate::record::letter::LetterRecord;
use crate::store::draft::Slot;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("target")
        .join("kelsa_config")
        .join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn defaults_match_the_export_pipeline() {
    let cfg = KelsaConfig::default();
    assert_eq!(cfg.snapshot_scale, 2.0);
    assert_eq!(cfg.jpeg_quality, 92);
    assert_eq!(cfg.page, PageGeometry::A4);
    assert_eq!(cfg.char_limits(), CharLimits::default());
    cfg.validate().unwrap();
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = scratch("partial");
    let path = dir.join("kelsa.json");
    std::fs::write(&path, r#"{ "jpeg_quality": 75, "char_limit": 2500 }"#).unwrap();

    let cfg = KelsaConfig::from_path(&path).unwrap();
    assert_eq!(cfg.jpeg_quality, 75);
    assert_eq!(cfg.char_limit, 2500);
    assert_eq!(cfg.snapshot_scale, 2.0);
}

#[test]
fn unknown_keys_are_rejected() {
    let dir = scratch("unknown");
    let path = dir.join("kelsa.json");
    std::fs::write(&path, r#"{ "snapshot_scael": 3.0 }"#).unwrap();
    let err = KelsaConfig::from_path(&path).unwrap_err();
    assert!(matches!(err, KelsaError::Serde(_)));
}

#[test]
fn out_of_range_values_fail_validation() {
    let cases = [
        KelsaConfig {
            snapshot_scale: 0.0,
            ..KelsaConfig::default()
        },
        KelsaConfig {
            snapshot_scale: 8.5,
            ..KelsaConfig::default()
        },
        KelsaConfig {
            jpeg_quality: 0,
            ..KelsaConfig::default()
        },
        KelsaConfig {
            char_warning: 3000,
            ..KelsaConfig::default()
        },
    ];
    for cfg in cases {
        assert!(
            matches!(cfg.validate(), Err(KelsaError::Validation(_))),
            "{cfg:?}"
        );
    }
}

#[test]
fn session_dir_selects_file_store() {
    let dir = scratch("session");
    let cfg = KelsaConfig {
        session_dir: Some(dir.clone()),
        ..KelsaConfig::default()
    };

    let mut store = cfg.open_store();
    store
        .save_final(&LetterRecord::new().with(Field::Subject, "Persisted"))
        .unwrap();
    assert!(dir.join("kelsa_letter_data.json").is_file());

    let reopened = cfg.open_store();
    let record = reopened.load(Slot::Final).unwrap();
    assert_eq!(record.value(Field::Subject), "Persisted");
}
