//! Interfaces to the external collaborators.
//!
//! Wire formats belong to the third parties; implementations live in
//! `dxvar-clients` and only have to map their responses onto these types.

use serde::{Deserialize, Serialize};

use crate::errors::UpstreamError;
use crate::models::{Classification, VariantRecord};

pub use crate::disambiguate::RsidLookup;

/// A variant classification service (ACMG classifier).
pub trait VariantClassifier {
    /// Service name shown next to its results.
    fn name(&self) -> &str;

    fn classify(&self, variant: &VariantRecord) -> Result<Classification, UpstreamError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role-tagged turn of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        ChatMessage {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        ChatMessage {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A conversational language model.
pub trait Assistant {
    /// Complete the conversation; `messages` starts with the system instruction.
    fn complete(&self, messages: &[ChatMessage]) -> Result<String, UpstreamError>;
}
