use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        KelsaError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        KelsaError::persistence_parse("x")
            .to_string()
            .contains("persistence parse error:")
    );
    assert!(KelsaError::export("x").to_string().contains("export error:"));
    assert!(
        KelsaError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(KelsaError::DataAbsent.to_string().contains("data absent"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = KelsaError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn only_validation_and_export_are_recoverable() {
    assert!(KelsaError::validation("x").is_recoverable());
    assert!(KelsaError::export("x").is_recoverable());
    assert!(!KelsaError::DataAbsent.is_recoverable());
    assert!(!KelsaError::persistence_parse("x").is_recoverable());
}
