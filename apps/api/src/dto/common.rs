use serde::Serialize;
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Identifier of a newly created resource.
#[derive(Debug, Serialize, TS)]
pub struct CreatedResponse {
    pub id: String,
}

/// Generic acknowledgement payload.
#[derive(Debug, Serialize, TS)]
pub struct GenericMessageResponse {
    pub message: String,
}

impl GenericMessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
