//! Token accounting and prediction results

use serde::{Deserialize, Serialize};

use super::message::DialogueMessage;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

/// What the prediction cost against the account balance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceUsage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub knowledge_usage: u64,
    #[serde(default)]
    pub function_usage: u64,
    #[serde(default)]
    pub total_tokens: u64,
    #[serde(default = "default_multiplier")]
    pub token_multiplier: f64,
}

fn default_multiplier() -> f64 {
    1.0
}

impl Default for BalanceUsage {
    fn default() -> Self {
        Self {
            prompt_tokens: 0,
            completion_tokens: 0,
            knowledge_usage: 0,
            function_usage: 0,
            total_tokens: 0,
            token_multiplier: default_multiplier(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub token_usage: TokenUsage,
    #[serde(default)]
    pub balance_usage: BalanceUsage,
}

impl Usage {
    /// No tokens were spent.
    ///
    /// `token_multiplier` is not looked at: it is a billing rate, not a count,
    /// and stays at its 1.0 default even on an empty prediction.
    pub fn is_zero(&self) -> bool {
        self.token_usage == TokenUsage::default()
            && self.balance_usage.prompt_tokens == 0
            && self.balance_usage.completion_tokens == 0
            && self.balance_usage.knowledge_usage == 0
            && self.balance_usage.function_usage == 0
            && self.balance_usage.total_tokens == 0
    }
}

/// Messages produced by one prediction.
///
/// An empty `new_messages` means the service declined to answer (e.g. the
/// dialogue is stopped). That is a normal outcome, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(flatten)]
    pub usage: Usage,
    #[serde(default)]
    pub new_messages: Vec<DialogueMessage>,
}

impl Prediction {
    /// The most recent message, `None` when nothing was produced.
    pub fn latest_response(&self) -> Option<&DialogueMessage> {
        self.new_messages.last()
    }

    pub fn latest_text(&self) -> Option<&str> {
        self.latest_response().and_then(|m| m.text())
    }

    pub fn is_empty(&self) -> bool {
        self.new_messages.is_empty()
    }

    pub fn into_parts(self) -> (Vec<DialogueMessage>, Usage) {
        (self.new_messages, self.usage)
    }
}

/// Result of adding messages to a dialogue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddedMessages {
    #[serde(default)]
    pub added_messages: Vec<DialogueMessage>,
    #[serde(default)]
    pub used_tokens: u64,
}

impl AddedMessages {
    pub fn into_parts(self) -> (Vec<DialogueMessage>, u64) {
        (self.added_messages, self.used_tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_zero_ignores_multiplier() {
        let mut usage = Usage::default();
        assert_eq!(usage.balance_usage.token_multiplier, 1.0);
        assert!(usage.is_zero());

        usage.balance_usage.token_multiplier = 2.5;
        assert!(usage.is_zero());

        usage.balance_usage.knowledge_usage = 1;
        assert!(!usage.is_zero());

        let spent = Usage {
            token_usage: TokenUsage {
                prompt_tokens: 1,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(!spent.is_zero());
    }
}
