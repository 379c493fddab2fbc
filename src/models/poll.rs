use serde::{Deserialize, Serialize};

/// A poll message as the WAHA send endpoint expects it. Request-scoped; built
/// right before sending and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poll {
    pub name: String,
    pub options: Vec<String>,
    #[serde(rename = "multipleAnswers")]
    pub multiple_answers: bool,
}

impl Poll {
    pub fn new(name: impl Into<String>, options: Vec<String>, multiple_answers: bool) -> Self {
        Self {
            name: name.into(),
            options,
            multiple_answers,
        }
    }
}
