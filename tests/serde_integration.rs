//! Serialization of guard outcomes

#![cfg(feature = "serde")]

use tripwire::GuardOutcome;

#[test]
fn test_outcome_round_trip() {
    let outcomes = vec![GuardOutcome::Success, GuardOutcome::Failure];

    let json = serde_json::to_string(&outcomes).unwrap();
    assert_eq!(json, r#"["Success","Failure"]"#);

    let back: Vec<GuardOutcome> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, outcomes);
}

#[test]
fn test_unknown_outcome_rejected() {
    assert!(serde_json::from_str::<GuardOutcome>(r#""Skipped""#).is_err());
}
