use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Body of the liveness endpoint at `/`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RootMessage {
    pub message: String,
}

/// Acknowledgement returned by write endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StatusOk {
    pub status: String,
}

impl StatusOk {
    pub fn ok() -> Self {
        Self { status: "ok".to_string() }
    }
}
