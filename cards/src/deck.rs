//! A multi-deck shoe: draw pile, discard pile, and community cards.
//!
//! The three piles always partition `52 * num_decks` cards. `deal` and `burn`
//! move cards from the draw pile to the discard pile (the discard pile is a
//! bookkeeping record of "cards no longer drawable", not a display list);
//! `deal_to_table` moves cards straight from the draw pile into the
//! community list.

use crate::card::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::Rng;

pub const SINGLE_DECK_SIZE: usize = 52;

fn fresh_cards(num_decks: usize) -> Vec<Card> {
    let mut cards = Vec::with_capacity(SINGLE_DECK_SIZE * num_decks);
    for _ in 0..num_decks {
        for &suit in &Suit::ALL {
            for &rank in &Rank::ALL {
                cards.push(Card::new(suit, rank));
            }
        }
    }
    cards
}

#[derive(Clone, Debug)]
pub struct Deck {
    draw: Vec<Card>,
    discard: Vec<Card>,
    community: Vec<Card>,
    num_decks: usize,
}

impl Deck {
    /// Build a fresh shoe and shuffle it once.
    pub fn new<R: Rng + ?Sized>(num_decks: usize, rng: &mut R) -> Self {
        assert!(num_decks >= 1, "num_decks must be >= 1");
        let mut deck = Deck {
            draw: fresh_cards(num_decks),
            discard: Vec::new(),
            community: Vec::new(),
            num_decks,
        };
        deck.shuffle(rng);
        deck
    }

    pub fn num_decks(&self) -> usize {
        self.num_decks
    }

    pub fn community(&self) -> &[Card] {
        &self.community
    }

    pub fn total_cards(&self) -> usize {
        SINGLE_DECK_SIZE * self.num_decks
    }

    fn invariant_holds(&self) -> bool {
        self.draw.len() + self.discard.len() + self.community.len() == self.total_cards()
    }

    /// Move the discard pile back into the draw pile and shuffle uniformly.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.draw.append(&mut self.discard);
        self.draw.shuffle(rng);
    }

    /// Deal `n` cards to a player's hand: pops from the draw pile into the
    /// discard pile and returns the dealt cards.
    pub fn deal(&mut self, n: usize) -> Vec<Card> {
        let mut dealt = Vec::with_capacity(n);
        for _ in 0..n {
            match self.draw.pop() {
                Some(card) => {
                    self.discard.push(card);
                    dealt.push(card);
                }
                None => break,
            }
        }
        dealt
    }

    /// Burn `n` cards: pops from the draw pile into the discard pile, returns nothing.
    pub fn burn(&mut self, n: usize) {
        for _ in 0..n {
            match self.draw.pop() {
                Some(card) => self.discard.push(card),
                None => break,
            }
        }
    }

    /// Deal `n` cards straight onto the board.
    pub fn deal_to_table(&mut self, n: usize) -> &[Card] {
        for _ in 0..n {
            match self.draw.pop() {
                Some(card) => self.community.push(card),
                None => break,
            }
        }
        &self.community
    }

    /// Regenerate a fresh shoe: all cards back in the draw pile, unshuffled.
    pub fn reset(&mut self) {
        self.draw = fresh_cards(self.num_decks);
        self.discard.clear();
        self.community.clear();
    }

    /// Check the partition invariant and the minimum draw-pile size needed to
    /// start a hand for `num_players` seats. If either is violated, reset and
    /// reshuffle the shoe and report that a reset happened.
    pub fn verify<R: Rng + ?Sized>(&mut self, num_players: usize, rng: &mut R) -> bool {
        let min_draw = 2 * num_players + 5 + 3;
        if !self.invariant_holds() || self.draw.len() < min_draw {
            self.reset();
            self.shuffle(rng);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    #[test]
    fn invariant_holds_after_every_operation() {
        let mut rng = rng();
        let mut deck = Deck::new(2, &mut rng);
        assert_eq!(deck.draw.len() + deck.discard.len() + deck.community.len(), 104);
        deck.deal(2);
        deck.burn(1);
        deck.deal_to_table(3);
        deck.burn(1);
        deck.deal_to_table(1);
        assert_eq!(deck.draw.len() + deck.discard.len() + deck.community.len(), 104);
        deck.shuffle(&mut rng);
        assert_eq!(deck.draw.len() + deck.discard.len() + deck.community.len(), 104);
    }

    #[test]
    fn deal_and_burn_move_cards_to_discard_not_community() {
        let mut rng = rng();
        let mut deck = Deck::new(1, &mut rng);
        let dealt = deck.deal(2);
        assert_eq!(dealt.len(), 2);
        assert_eq!(deck.discard.len(), 2);
        assert!(deck.community.is_empty());
        deck.burn(1);
        assert_eq!(deck.discard.len(), 3);
        assert!(deck.community.is_empty());
    }

    #[test]
    fn deal_to_table_grows_community_only() {
        let mut rng = rng();
        let mut deck = Deck::new(1, &mut rng);
        deck.deal_to_table(3);
        assert_eq!(deck.community().len(), 3);
        assert!(deck.discard.is_empty());
    }

    #[test]
    fn verify_resets_when_draw_pile_too_small() {
        let mut rng = rng();
        let mut deck = Deck::new(1, &mut rng);
        deck.deal(50);
        assert!(deck.draw.len() < 2 * 9 + 5 + 3);
        let reset_happened = deck.verify(9, &mut rng);
        assert!(reset_happened);
        assert_eq!(deck.draw.len(), 52);
        assert!(deck.discard.is_empty());
    }

    #[test]
    fn verify_resets_when_invariant_broken() {
        let mut rng = rng();
        let mut deck = Deck::new(1, &mut rng);
        deck.draw.pop(); // corrupt the invariant directly
        let reset_happened = deck.verify(2, &mut rng);
        assert!(reset_happened);
        assert_eq!(deck.draw.len() + deck.discard.len() + deck.community.len(), 52);
    }

    #[test]
    fn verify_is_a_no_op_on_a_healthy_shoe() {
        let mut rng = rng();
        let mut deck = Deck::new(1, &mut rng);
        assert!(!deck.verify(4, &mut rng));
    }

    #[test]
    fn invariant_survives_200_random_hands_with_two_decks() {
        let mut rng = rng();
        let num_players = 6;
        let mut deck = Deck::new(2, &mut rng);
        let mut reset_count = 0;

        for _ in 0..200 {
            if deck.verify(num_players, &mut rng) {
                reset_count += 1;
            }
            for _ in 0..num_players {
                deck.deal(2);
            }
            deck.burn(1);
            deck.deal_to_table(3);
            deck.burn(1);
            deck.deal_to_table(1);
            deck.burn(1);
            deck.deal_to_table(1);
            assert!(deck.invariant_holds());
            deck.discard.append(&mut deck.community);
            deck.shuffle(&mut rng);
        }

        assert!(reset_count >= 1);
    }
}
