// SPDX-License-Identifier: MIT

//! Newline-delimited JSON framing for the sidecar's stdin/stdout (§4.2.1):
//! one JSON object per line in, one per line out, correlated by `id`. This
//! is deliberately simpler than the daemon bus's WebSocket framing — a
//! minimal codec for a process pipe, not a wire-protocol crate concern.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SidecarRequest {
    pub id: String,
    pub model_id: String,
    pub texts: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SidecarResponse {
    pub id: String,
    #[serde(default)]
    pub vectors: Option<Vec<Vec<f32>>>,
    #[serde(default)]
    pub error: Option<String>,
}

pub fn encode_request(req: &SidecarRequest) -> serde_json::Result<String> {
    serde_json::to_string(req)
}

pub fn decode_response(line: &str) -> serde_json::Result<SidecarResponse> {
    serde_json::from_str(line)
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
