//! Fixed conversation scaffolding for review requests.

use serde::{Deserialize, Serialize};

/// System message identifying the assistant's role.
pub const REVIEWER_ROLE: &str = "You are a code reviewer.";

/// Assistant message demanding a terse answer style.
pub const STYLE_INSTRUCTION: &str =
    "You are code reviewer for a project. please answer without introductory phrases.";

/// A participant role in the chat conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Conversation-level instructions and context.
    System,
    /// Messages attributed to the model.
    Assistant,
    /// The caller's prompt.
    User,
}

/// One message of the outbound conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who the message is attributed to.
    pub role: Role,
    /// The message text.
    pub content: String,
}

impl ChatMessage {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Builds the fixed four-message conversation: role description, serialized
/// context, style instruction, then the caller's prompt.
pub fn build_messages(serialized_context: &str, prompt: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::new(Role::System, REVIEWER_ROLE),
        ChatMessage::new(Role::System, serialized_context),
        ChatMessage::new(Role::Assistant, STYLE_INSTRUCTION),
        ChatMessage::new(Role::User, prompt),
    ]
}
