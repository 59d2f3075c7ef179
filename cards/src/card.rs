use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A playing-card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub fn short_char(&self) -> char {
        match self {
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
            Suit::Spades => 'S',
        }
    }

    pub fn from_short_char(c: char) -> Result<Self, CardError> {
        match c.to_ascii_uppercase() {
            'H' => Ok(Suit::Hearts),
            'D' => Ok(Suit::Diamonds),
            'C' => Ok(Suit::Clubs),
            'S' => Ok(Suit::Spades),
            _ => Err(CardError::InvalidSuit(c.to_string())),
        }
    }

    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];
}

/// A card rank. Declaration order doubles as rank order (2 < 3 < ... < King < Ace),
/// so `#[derive(Ord)]` gives us the invariant from the data model for free.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// Ace-high numeric value used by the evaluator's tiebreakers.
    pub fn value(&self) -> u8 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
            Rank::Ace => 14,
        }
    }

    pub fn short_char(&self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }

    pub fn from_short_char(c: char) -> Result<Self, CardError> {
        match c.to_ascii_uppercase() {
            '2' => Ok(Rank::Two),
            '3' => Ok(Rank::Three),
            '4' => Ok(Rank::Four),
            '5' => Ok(Rank::Five),
            '6' => Ok(Rank::Six),
            '7' => Ok(Rank::Seven),
            '8' => Ok(Rank::Eight),
            '9' => Ok(Rank::Nine),
            'T' => Ok(Rank::Ten),
            'J' => Ok(Rank::Jack),
            'Q' => Ok(Rank::Queen),
            'K' => Ok(Rank::King),
            'A' => Ok(Rank::Ace),
            _ => Err(CardError::InvalidRank(c.to_string())),
        }
    }

    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];
}

#[derive(Debug, Error)]
pub enum CardError {
    #[error("invalid card string: {0}")]
    InvalidShort(String),
    #[error("invalid suit name: {0}")]
    InvalidSuit(String),
    #[error("invalid rank name: {0}")]
    InvalidRank(String),
}

/// A single playing card. Serializes as `{"suit": "Hearts", "rank": "2"}` to match
/// the wire contract the bots speak.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Card { suit, rank }
    }

    /// Canonical two-character short form: rank char then suit char (`T` for 10).
    pub fn short_str(&self) -> String {
        format!("{}{}", self.rank.short_char(), self.suit.short_char())
    }

    pub fn from_short(s: &str) -> Result<Self, CardError> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 2 {
            return Err(CardError::InvalidShort(s.to_string()));
        }
        let rank = Rank::from_short_char(chars[0]).map_err(|_| CardError::InvalidShort(s.to_string()))?;
        let suit = Suit::from_short_char(chars[1]).map_err(|_| CardError::InvalidShort(s.to_string()))?;
        Ok(Card { suit, rank })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_round_trips_for_every_card() {
        for &suit in &Suit::ALL {
            for &rank in &Rank::ALL {
                let card = Card::new(suit, rank);
                let short = card.short_str();
                assert_eq!(Card::from_short(&short).unwrap(), card);
            }
        }
    }

    #[test]
    fn ten_short_form_is_t() {
        let card = Card::new(Suit::Spades, Rank::Ten);
        assert_eq!(card.short_str(), "TS");
    }

    #[test]
    fn rank_order_matches_invariant() {
        assert!(Rank::Two < Rank::Three);
        assert!(Rank::King < Rank::Ace);
        assert!(Rank::Ace > Rank::Two);
    }

    #[test]
    fn invalid_short_form_is_rejected() {
        assert!(Card::from_short("ZZ").is_err());
        assert!(Card::from_short("2").is_err());
        assert!(Card::from_short("2H3").is_err());
    }

    #[test]
    fn serializes_with_long_names() {
        let card = Card::new(Suit::Hearts, Rank::Two);
        let value = serde_json::to_value(card).unwrap();
        assert_eq!(value["suit"], "Hearts");
        assert_eq!(value["rank"], "2");
    }
}
