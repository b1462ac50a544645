// Assistant conversation domain model - append-only message log
use crate::domain::widget::WidgetView;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How many prior turns are replayed to the remote planner as context.
pub const HISTORY_WINDOW: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Operator,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantMessage {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub widgets: Vec<WidgetView>,
}

impl AssistantMessage {
    pub fn operator(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::Operator,
            content: content.into(),
            widgets: Vec::new(),
        }
    }

    pub fn assistant(content: impl Into<String>, widgets: Vec<WidgetView>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::Assistant,
            content: content.into(),
            widgets,
        }
    }
}

/// One prior turn as sent to the remote planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryTurn {
    pub role: Role,
    pub text: String,
}

/// Append-only conversation log. Messages are never edited or removed
/// within a session.
#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<AssistantMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: AssistantMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[AssistantMessage] {
        &self.messages
    }

    /// The last `HISTORY_WINDOW` turns, oldest first.
    pub fn history_tail(&self) -> Vec<HistoryTurn> {
        let skip = self.messages.len().saturating_sub(HISTORY_WINDOW);
        self.messages[skip..]
            .iter()
            .map(|m| HistoryTurn {
                role: m.role,
                text: m.content.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_tail_is_capped() {
        let mut conversation = Conversation::new();
        for i in 0..10 {
            conversation.push(AssistantMessage::operator(format!("запрос {i}")));
        }

        let tail = conversation.history_tail();
        assert_eq!(tail.len(), HISTORY_WINDOW);
        assert_eq!(tail.first().unwrap().text, "запрос 4");
        assert_eq!(tail.last().unwrap().text, "запрос 9");
    }

    #[test]
    fn test_messages_keep_append_order() {
        let mut conversation = Conversation::new();
        conversation.push(AssistantMessage::operator("вопрос"));
        conversation.push(AssistantMessage::assistant("ответ", Vec::new()));

        let roles: Vec<Role> = conversation.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::Operator, Role::Assistant]);
    }
}
