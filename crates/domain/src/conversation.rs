use serde::{Deserialize, Serialize};

/// Who produced a turn. Generation backends only distinguish the caller
/// from the model, so there is no system or tool role here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// A single immutable turn in a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

// ── Convenience constructors ───────────────────────────────────────

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: Role::User, content: text.into() }
    }
    pub fn model(text: impl Into<String>) -> Self {
        Self { role: Role::Model, content: text.into() }
    }
}

/// Ordered transcript threaded through sequential generation calls.
///
/// Appending never touches the receiver: every `append_*` returns a new
/// conversation, so a caller holding an earlier state keeps seeing exactly
/// the turns it sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// A one-turn conversation holding `text` from the user.
    pub fn from_user(text: impl Into<String>) -> Self {
        Self { turns: vec![Turn::user(text)] }
    }

    pub fn append_user(&self, text: impl Into<String>) -> Self {
        self.appended(Turn::user(text))
    }

    pub fn append_model(&self, text: impl Into<String>) -> Self {
        self.appended(Turn::model(text))
    }

    fn appended(&self, turn: Turn) -> Self {
        let mut turns = Vec::with_capacity(self.turns.len() + 1);
        turns.extend_from_slice(&self.turns);
        turns.push(turn);
        Self { turns }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Total characters across all turns (used for request logging).
    pub fn char_count(&self) -> usize {
        self.turns.iter().map(|t| t.content.chars().count()).sum()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_leaves_original_untouched() {
        let base = Conversation::from_user("hello");
        let next = base.append_model("hi there");

        assert_eq!(base.len(), 1);
        assert_eq!(next.len(), 2);
        assert_eq!(next.turns()[0], Turn::user("hello"));
        assert_eq!(next.last(), Some(&Turn::model("hi there")));
    }

    #[test]
    fn order_is_insertion_order() {
        let convo = Conversation::new()
            .append_user("a")
            .append_model("b")
            .append_user("c");
        let roles: Vec<Role> = convo.turns().iter().map(|t| t.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Model, Role::User]);
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&Turn::model("x")).unwrap();
        assert_eq!(json, r#"{"role":"model","content":"x"}"#);
    }

    #[test]
    fn char_count_sums_turns() {
        let convo = Conversation::from_user("abc").append_model("de");
        assert_eq!(convo.char_count(), 5);
    }
}
