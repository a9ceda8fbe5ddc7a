//! services/portal/src/chat.rs
//!
//! Conversation state for the assistant widget. The assistant itself is
//! stateless; the full history is resent on every exchange, so this helper
//! is the only place the conversation accumulates.

use vetportal_core::domain::ChatTurn;
use vetportal_core::ports::{AssistantResult, AssistantService};

/// Accumulated turns of one assistant conversation.
#[derive(Debug, Default)]
pub struct ChatHistory {
    turns: Vec<ChatTurn>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// Send `message` with the whole prior history attached.
    ///
    /// The user turn is recorded regardless of the outcome; an assistant
    /// turn is added only on success. A failed exchange leaves the history
    /// ready for a retry, and the error tells the shell which retry prompt
    /// to show.
    pub async fn send(
        &mut self,
        assistant: &dyn AssistantService,
        message: &str,
    ) -> AssistantResult<String> {
        let message = message.trim();
        let outcome = assistant.reply(&self.turns, message).await;
        self.turns.push(ChatTurn::user(message));
        match outcome {
            Ok(reply) => {
                self.turns.push(ChatTurn::assistant(reply.clone()));
                Ok(reply)
            }
            Err(err) => {
                tracing::warn!(%err, "assistant exchange failed");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use vetportal_core::domain::ChatRole;
    use vetportal_core::ports::AssistantError;

    /// Test double that records how much history each call carried.
    struct ScriptedAssistant {
        replies: Mutex<Vec<AssistantResult<String>>>,
        seen_history_lens: Mutex<Vec<usize>>,
    }

    impl ScriptedAssistant {
        fn new(replies: Vec<AssistantResult<String>>) -> Self {
            Self {
                replies: Mutex::new(replies),
                seen_history_lens: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl AssistantService for ScriptedAssistant {
        async fn reply(&self, history: &[ChatTurn], _message: &str) -> AssistantResult<String> {
            self.seen_history_lens.lock().unwrap().push(history.len());
            self.replies.lock().unwrap().remove(0)
        }
    }

    #[tokio::test]
    async fn successful_exchanges_accumulate_and_resend_history() {
        let assistant = ScriptedAssistant::new(vec![
            Ok("Rabbits are hindgut fermenters.".to_string()),
            Ok("Yes, cecotrophy is normal.".to_string()),
        ]);
        let mut chat = ChatHistory::new();

        let first = chat.send(&assistant, "Tell me about rabbit digestion").await;
        assert_eq!(first.unwrap(), "Rabbits are hindgut fermenters.");
        let second = chat.send(&assistant, "  Is eating cecotropes normal?  ").await;
        assert!(second.is_ok());

        assert_eq!(chat.turns().len(), 4);
        assert_eq!(chat.turns()[0].role, ChatRole::User);
        assert_eq!(chat.turns()[1].role, ChatRole::Assistant);
        assert_eq!(chat.turns()[2].text, "Is eating cecotropes normal?");

        // First call saw no history, second saw the two recorded turns.
        assert_eq!(*assistant.seen_history_lens.lock().unwrap(), vec![0, 2]);
    }

    #[tokio::test]
    async fn a_failed_exchange_keeps_the_user_turn_only() {
        let assistant = ScriptedAssistant::new(vec![
            Err(AssistantError::Unauthorized),
            Ok("Recovered.".to_string()),
        ]);
        let mut chat = ChatHistory::new();

        let err = chat.send(&assistant, "Hello?").await.unwrap_err();
        assert!(matches!(err, AssistantError::Unauthorized));
        assert_eq!(chat.turns().len(), 1);
        assert_eq!(chat.turns()[0].role, ChatRole::User);

        // A retry proceeds with the history as it stands.
        chat.send(&assistant, "Hello again").await.unwrap();
        assert_eq!(chat.turns().len(), 3);
    }
}
