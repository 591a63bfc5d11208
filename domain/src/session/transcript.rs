//! Append-only conversation transcript

use super::entities::Message;

/// Ordered list of every message shown in the conversation.
///
/// Messages can only be appended; nothing is edited or removed.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::entities::Sender;

    #[test]
    fn test_push_preserves_order() {
        let mut transcript = Transcript::new();
        assert!(transcript.is_empty());

        transcript.push(Message::bot("Hi!"));
        transcript.push(Message::user("hello"));
        transcript.push(Message::bot("Hello back"));

        let senders: Vec<_> = transcript.iter().map(|m| m.sender()).collect();
        assert_eq!(senders, vec![Sender::Bot, Sender::User, Sender::Bot]);
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.last().unwrap().text(), "Hello back");
    }
}
