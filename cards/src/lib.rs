//! Card primitives, a multi-deck shoe, and a 7-card hand evaluator.

pub mod card;
pub mod deck;
pub mod eval;

pub use card::{Card, CardError, Rank, Suit};
pub use deck::Deck;
pub use eval::{evaluate, HandCategory, HandScore};
