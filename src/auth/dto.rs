use serde::{Deserialize, Serialize};

/// Body of `POST /jwt`. Clients send their whole profile object; only the
/// email goes into the token, the rest is ignored.
#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    pub email: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub success: bool,
}
