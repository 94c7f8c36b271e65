use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    pub is_okay: bool,
    pub message: String,
}

impl VerificationReport {
    pub fn ok() -> Self {
        Self {
            is_okay: true,
            message: String::new(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            is_okay: false,
            message: message.into(),
        }
    }
}
