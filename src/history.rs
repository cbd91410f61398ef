use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One exchange in the conversation, owned by the calling surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub text: String,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

/// Append-only log of conversation turns.
///
/// The full log lives with the caller; the pipeline only ever reads the
/// most recent bounded window.
#[derive(Debug, Clone, Default)]
pub struct TurnLog {
    turns: Vec<ConversationTurn>,
}

impl TurnLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_turns(turns: Vec<ConversationTurn>) -> Self {
        Self { turns }
    }

    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Render the most recent `window` turns as `role: text` lines,
    /// oldest first.
    pub fn render_window(&self, window: usize) -> String {
        let skip = self.turns.len().saturating_sub(window);
        self.turns[skip..]
            .iter()
            .map(|turn| format!("{}: {}", turn.role.as_str(), turn.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_with(n: usize) -> TurnLog {
        let mut log = TurnLog::new();
        for i in 0..n {
            if i % 2 == 0 {
                log.push(ConversationTurn::user(format!("question {}", i)));
            } else {
                log.push(ConversationTurn::assistant(format!("answer {}", i)));
            }
        }
        log
    }

    #[test]
    fn window_keeps_only_most_recent_turns() {
        let log = log_with(10);
        let rendered = log.render_window(4);

        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "user: question 6");
        assert_eq!(lines[3], "assistant: answer 9");
        assert!(!rendered.contains("question 4"));
    }

    #[test]
    fn window_larger_than_log_renders_everything() {
        let log = log_with(2);
        let rendered = log.render_window(4);
        assert_eq!(rendered.lines().count(), 2);
        assert!(rendered.starts_with("user: question 0"));
    }

    #[test]
    fn empty_log_renders_empty_string() {
        assert_eq!(TurnLog::new().render_window(4), "");
    }

    #[test]
    fn roles_render_lowercase() {
        let mut log = TurnLog::new();
        log.push(ConversationTurn::assistant("สวัสดีครับ"));
        assert_eq!(log.render_window(1), "assistant: สวัสดีครับ");
    }
}
