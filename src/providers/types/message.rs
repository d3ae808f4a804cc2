use serde::{Deserialize, Serialize};

pub const WEB_SEARCH_CONNECTOR: &str = "web-search";

/// Speaker labels understood by the chat API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    System,
    User,
    Chatbot,
}

/// One prior turn of a conversation, sent as `chat_history`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub message: String,
}

impl ChatMessage {
    pub fn new(role: Role, message: &str) -> Self {
        Self {
            role,
            message: message.to_string(),
        }
    }

    pub fn system(message: &str) -> Self {
        Self::new(Role::System, message)
    }

    pub fn user(message: &str) -> Self {
        Self::new(Role::User, message)
    }

    pub fn chatbot(message: &str) -> Self {
        Self::new(Role::Chatbot, message)
    }
}

/// An augmentation source attached to a request, e.g. web search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connector {
    pub id: String,
}

impl Connector {
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }

    pub fn web_search() -> Self {
        Self::new(WEB_SEARCH_CONNECTOR)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chat_history: Vec<ChatMessage>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connectors: Vec<Connector>,
}

impl ChatRequest {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            chat_history: Vec::new(),
            connectors: Vec::new(),
        }
    }

    pub fn with_history(mut self, history: Vec<ChatMessage>) -> Self {
        self.chat_history = history;
        self
    }

    pub fn with_connector(mut self, connector: Connector) -> Self {
        self.connectors.push(connector);
        self
    }

    /// The full prompt as the model sees it: history followed by the new user turn.
    pub fn prompt(&self) -> Vec<ChatMessage> {
        let mut prompt = self.chat_history.clone();
        prompt.push(ChatMessage::user(&self.message));
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::{json, Value};

    #[test]
    fn test_role_labels() -> Result<()> {
        assert_eq!(serde_json::to_value(Role::System)?, json!("SYSTEM"));
        assert_eq!(serde_json::to_value(Role::User)?, json!("USER"));
        assert_eq!(serde_json::to_value(Role::Chatbot)?, json!("CHATBOT"));
        Ok(())
    }

    #[test]
    fn test_request_skips_empty_fields() -> Result<()> {
        let request = ChatRequest::new("Hello");
        let value: Value = serde_json::to_value(&request)?;

        assert_eq!(value, json!({"message": "Hello"}));
        Ok(())
    }

    #[test]
    fn test_request_with_history_and_connector() -> Result<()> {
        let request = ChatRequest::new("And now?")
            .with_history(vec![
                ChatMessage::system("Be brief."),
                ChatMessage::chatbot("Hi there."),
            ])
            .with_connector(Connector::web_search());

        let value: Value = serde_json::to_value(&request)?;
        assert_eq!(value["chat_history"][0]["role"], "SYSTEM");
        assert_eq!(value["chat_history"][1]["message"], "Hi there.");
        assert_eq!(value["connectors"], json!([{"id": "web-search"}]));
        Ok(())
    }

    #[test]
    fn test_prompt_appends_user_turn() {
        let request = ChatRequest::new("Question")
            .with_history(vec![ChatMessage::system("Persona")]);

        let prompt = request.prompt();
        assert_eq!(prompt.len(), 2);
        assert_eq!(prompt[0], ChatMessage::system("Persona"));
        assert_eq!(prompt[1], ChatMessage::user("Question"));
        // history itself is untouched
        assert_eq!(request.chat_history.len(), 1);
    }
}
