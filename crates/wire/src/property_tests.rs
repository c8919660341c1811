// SPDX-License-Identifier: MIT

//! Round-trip property: every `ClientMessage` we can construct survives an
//! encode/decode cycle unchanged.

use crate::client::ClientMessage;
use crate::codec::{decode_client, encode};
use proptest::prelude::*;
use std::path::PathBuf;

fn arb_client_message() -> impl Strategy<Value = ClientMessage> {
    let id = "[a-z0-9]{1,8}";
    let path = "/[a-z]{1,6}(/[a-z]{1,6}){0,3}";
    prop_oneof![
        "[a-z]{1,8}".prop_map(|client_type| ClientMessage::ConnectionInit { client_type }),
        (id, path).prop_map(|(id, p)| ClientMessage::FolderValidate { id, path: PathBuf::from(p) }),
        (id, path, "[a-zA-Z0-9_.-]{1,16}")
            .prop_map(|(id, p, model)| ClientMessage::FolderAdd { id, path: PathBuf::from(p), model }),
        (id, path).prop_map(|(id, p)| ClientMessage::FolderRemove { id, path: PathBuf::from(p) }),
        (id, path).prop_map(|(id, p)| ClientMessage::FolderRetry { id, path: PathBuf::from(p) }),
        id.prop_map(|id| ClientMessage::ModelsList { id }),
        id.prop_map(|id| ClientMessage::Ping { id }),
    ]
}

proptest! {
    #[test]
    fn client_message_round_trips(msg in arb_client_message()) {
        let frame = encode(&msg).expect("encode");
        let back = decode_client(&frame).expect("decode");
        prop_assert_eq!(msg, back);
    }
}
