// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn unknown_model_id_is_rejected() {
    let backends = BackendSet::new();
    let err = backends.get_or_build("does-not-exist").unwrap_err();
    assert!(matches!(err, BackendError::UnknownModel(_)));
}

#[test]
fn remote_model_is_built_without_a_network_call() {
    let backends = BackendSet::new();
    let backend = backends.get_or_build("nomic-embed-text").expect("remote backend");
    // Building a RemoteBackend only stores config; no request is made
    // until `initialize`/`embed` is called.
    let again = backends.get_or_build("nomic-embed-text").expect("cached backend");
    assert!(Arc::ptr_eq(&backend, &again));
}
