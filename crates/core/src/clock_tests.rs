// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn fake_clock_advances() {
    let clock = FakeClock::new();
    let t0 = clock.now();
    clock.advance(Duration::from_secs(5));
    assert_eq!(clock.now() - t0, Duration::from_secs(5));
}

#[test]
fn epoch_ms_advances_too() {
    let clock = FakeClock::new();
    let e0 = clock.epoch_ms();
    clock.advance(Duration::from_millis(250));
    assert_eq!(clock.epoch_ms() - e0, 250);
}

#[test]
fn rfc3339_is_parseable() {
    let clock = FakeClock::new();
    let s = clock.now_rfc3339();
    assert!(chrono::DateTime::parse_from_rfc3339(&s).is_ok());
}
