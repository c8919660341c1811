// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn response_serializes_without_the_absent_field() {
    let msg = ServerMessage::ok("req-1", serde_json::json!({"valid": true}));
    let json = serde_json::to_value(&msg).expect("serialize");
    assert!(json.get("error").is_none());
    assert_eq!(json["data"]["valid"], true);
}

#[test]
fn error_response_carries_kind_and_message() {
    let msg = ServerMessage::err("req-2", WireError::new(ErrorKind::FolderConflict, "already monitored"));
    let json = serde_json::to_value(&msg).expect("serialize");
    assert_eq!(json["error"]["kind"], "folder_conflict");
}

#[test]
fn fmdm_update_round_trips() {
    let msg = ServerMessage::FmdmUpdate { fmdm: Fmdm::default() };
    let json = serde_json::to_string(&msg).expect("serialize");
    let back: ServerMessage = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(msg, back);
}
