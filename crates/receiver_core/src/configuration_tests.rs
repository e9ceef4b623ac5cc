use super::*;

fn secrets() -> SecretSet {
    SecretSet::new(["secret"]).unwrap()
}

#[test]
fn test_new_uses_safe_defaults() {
    let config = ReceiverConfig::new(secrets());

    assert!(!config.verify_timestamp);
    assert!(!config.debug_signature);
    assert_eq!(config.tolerance_seconds, 300);
    assert!(!config.replay_guard().is_enabled());
}

#[test]
fn test_with_timestamp_verification_enables_guard() {
    let config = ReceiverConfig::new(secrets()).with_timestamp_verification(60);

    let guard = config.replay_guard();
    assert!(guard.is_enabled());
    assert_eq!(guard.tolerance_seconds(), 60);
}

#[test]
fn test_with_debug_signature() {
    let config = ReceiverConfig::new(secrets()).with_debug_signature(true);
    assert!(config.debug_signature);
}
