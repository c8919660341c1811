// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn request_round_trips_as_one_line() {
    let req = SidecarRequest { id: "r1".into(), model_id: "m1".into(), texts: vec!["hi".into()] };
    let line = encode_request(&req).expect("encode");
    assert!(!line.contains('\n'));
    let back: SidecarRequest = serde_json::from_str(&line).expect("decode");
    assert_eq!(back.id, "r1");
}

#[test]
fn response_with_error_has_no_vectors() {
    let line = r#"{"id":"r1","error":"boom"}"#;
    let resp = decode_response(line).expect("decode");
    assert_eq!(resp.error.as_deref(), Some("boom"));
    assert!(resp.vectors.is_none());
}
