use super::*;

#[test]
fn should_load_requires_visibility_and_readiness() {
    assert!(should_load(true, true));
    assert!(!should_load(true, false));
    assert!(!should_load(false, true));
    assert!(!should_load(false, false));
}
