// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::test_start;
use crate::{ApiError, Clock, MAX_UNDO_WINDOW_MS, ManualClock, SessionConfig};
use time::Duration;

#[test]
fn test_default_undo_window() {
    let config: SessionConfig = SessionConfig::from_json(r#"{ "operator_id": "op-1" }"#).unwrap();

    assert_eq!(config.undo_window_ms, 5000);
    assert_eq!(config.undo_window(), Duration::seconds(5));
}

#[test]
fn test_custom_undo_window() {
    let config: SessionConfig =
        SessionConfig::from_json(r#"{ "operator_id": "op-1", "undo_window_ms": 1500 }"#).unwrap();

    assert_eq!(config.undo_window(), Duration::milliseconds(1500));
}

#[test]
fn test_empty_operator_is_rejected() {
    let result = SessionConfig::from_json(r#"{ "operator_id": "  " }"#);

    assert!(matches!(result, Err(ApiError::InvalidConfig(_))));
}

#[test]
fn test_zero_window_is_rejected() {
    let config: SessionConfig = SessionConfig::new("op-1").with_undo_window_ms(0);

    assert!(config.validate().is_err());
}

#[test]
fn test_window_above_one_hour_is_rejected() {
    let result = SessionConfig::from_json(
        r#"{ "operator_id": "op-1", "undo_window_ms": 9000000000000000000 }"#,
    );
    assert!(matches!(result, Err(ApiError::InvalidConfig(_))));

    let longest: SessionConfig =
        SessionConfig::new("op-1").with_undo_window_ms(MAX_UNDO_WINDOW_MS);
    assert!(longest.validate().is_ok());
    assert!(
        longest
            .with_undo_window_ms(MAX_UNDO_WINDOW_MS + 1)
            .validate()
            .is_err()
    );
}

#[test]
fn test_malformed_config_is_rejected() {
    let result = SessionConfig::from_json("{ operator_id: 1 }");

    assert!(matches!(result, Err(ApiError::InvalidConfig(_))));
}

#[test]
fn test_manual_clock_clones_share_time() {
    let clock: ManualClock = ManualClock::new(test_start());
    let handle: ManualClock = clock.clone();

    handle.advance(Duration::milliseconds(250));

    assert_eq!(clock.now(), test_start() + Duration::milliseconds(250));
}
