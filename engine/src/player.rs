//! Player and Action: the seat-level data model.

use cards::Card;
use serde::{Deserialize, Serialize};

/// A player's move. `Raise`'s `amount` is a raise-TO value: the absolute
/// chip total the raiser wants committed this street, not a delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "move", rename_all = "lowercase")]
pub enum Action {
    Fold,
    Check,
    Call,
    Raise { amount: i64 },
}

/// A seat at the table. Persists across hands; `hand`, `curr_bet`,
/// `last_action`, `ready`, and `in_hand` are reset at the start of each hand.
#[derive(Clone, Debug)]
pub struct Player {
    pub name: String,
    pub host: String,
    pub port: u16,
    pub chips: i64,
    pub hand: Vec<Card>,
    pub in_hand: bool,
    pub curr_bet: i64,
    pub ready: bool,
    pub last_action: Option<Action>,
}

impl Player {
    pub fn new(name: impl Into<String>, host: impl Into<String>, port: u16, chips: i64) -> Self {
        Player {
            name: name.into(),
            host: host.into(),
            port,
            chips,
            hand: Vec::new(),
            in_hand: true,
            curr_bet: 0,
            ready: false,
            last_action: None,
        }
    }

    /// An all-in seat (`chips == 0` but still `in_hand`) is always treated as
    /// having acted for the remainder of the hand.
    pub fn is_all_in(&self) -> bool {
        self.in_hand && self.chips == 0
    }

    /// Reset per-hand state. Called by the round driver before dealing.
    pub fn reset_for_hand(&mut self) {
        self.hand.clear();
        self.in_hand = true;
        self.curr_bet = 0;
        self.ready = false;
        self.last_action = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raise_action_serializes_with_amount() {
        let action = Action::Raise { amount: 30 };
        let value = serde_json::to_value(action).unwrap();
        assert_eq!(value["move"], "raise");
        assert_eq!(value["amount"], 30);
    }

    #[test]
    fn all_in_requires_zero_chips_and_in_hand() {
        let mut p = Player::new("p1", "127.0.0.1", 5001, 0);
        assert!(p.is_all_in());
        p.in_hand = false;
        assert!(!p.is_all_in());
    }
}
