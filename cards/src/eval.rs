//! Seven-card hand evaluation.
//!
//! Enumerates every 5-card subset of the 5–7 input cards and keeps the
//! maximum under `(category, tiebreakers)` lexicographic order.

use crate::card::Card;
use serde::{Deserialize, Serialize};

/// `0` (High Card) through `8` (Straight Flush), ranked in ascending order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum HandCategory {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

/// A totally ordered hand score. Field declaration order (category, then
/// tiebreakers) makes the derived `Ord` compare category first and only
/// falls back to tiebreakers within the same category.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HandScore {
    pub category: HandCategory,
    pub tiebreakers: Vec<u8>,
}

/// Evaluate the best 5-card hand out of 5–7 cards. Returns the score and the
/// winning 5-card subset (for display only).
pub fn evaluate(cards: &[Card]) -> (HandScore, [Card; 5]) {
    assert!(
        (5..=7).contains(&cards.len()),
        "evaluator expects 5 to 7 cards, got {}",
        cards.len()
    );

    let mut best_score: Option<HandScore> = None;
    let mut best_hand = [cards[0]; 5];

    for combo in combinations(cards.len(), 5) {
        let hand: [Card; 5] = [
            cards[combo[0]],
            cards[combo[1]],
            cards[combo[2]],
            cards[combo[3]],
            cards[combo[4]],
        ];
        let score = score_five(&hand);
        if best_score.as_ref().map_or(true, |b| score > *b) {
            best_score = Some(score);
            best_hand = hand;
        }
    }

    (best_score.expect("at least one 5-card combination exists"), best_hand)
}

fn score_five(hand: &[Card; 5]) -> HandScore {
    let mut ranks: [u8; 5] = [
        hand[0].rank.value(),
        hand[1].rank.value(),
        hand[2].rank.value(),
        hand[3].rank.value(),
        hand[4].rank.value(),
    ];
    ranks.sort_unstable_by(|a, b| b.cmp(a));

    let is_flush = hand[1..].iter().all(|c| c.suit == hand[0].suit);
    let (is_straight, straight_high) = straight_high(&ranks);

    let mut counts: Vec<(u8, u8)> = Vec::new(); // (rank, count)
    for &r in &ranks {
        if let Some(entry) = counts.iter_mut().find(|(rank, _)| *rank == r) {
            entry.1 += 1;
        } else {
            counts.push((r, 1));
        }
    }
    let mut count_sizes: Vec<u8> = counts.iter().map(|(_, c)| *c).collect();
    count_sizes.sort_unstable_by(|a, b| b.cmp(a));

    let grouped_tiebreakers = || -> Vec<u8> {
        let mut sorted = counts.clone();
        sorted.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));
        sorted.into_iter().map(|(rank, _)| rank).collect()
    };

    if is_flush && is_straight {
        return HandScore {
            category: HandCategory::StraightFlush,
            tiebreakers: vec![straight_high],
        };
    }
    if count_sizes == [4, 1] {
        return HandScore {
            category: HandCategory::FourOfAKind,
            tiebreakers: grouped_tiebreakers(),
        };
    }
    if count_sizes == [3, 2] {
        return HandScore {
            category: HandCategory::FullHouse,
            tiebreakers: grouped_tiebreakers(),
        };
    }
    if is_flush {
        return HandScore {
            category: HandCategory::Flush,
            tiebreakers: ranks.to_vec(),
        };
    }
    if is_straight {
        return HandScore {
            category: HandCategory::Straight,
            tiebreakers: vec![straight_high],
        };
    }
    if count_sizes == [3, 1, 1] {
        return HandScore {
            category: HandCategory::ThreeOfAKind,
            tiebreakers: grouped_tiebreakers(),
        };
    }
    if count_sizes == [2, 2, 1] {
        return HandScore {
            category: HandCategory::TwoPair,
            tiebreakers: grouped_tiebreakers(),
        };
    }
    if count_sizes == [2, 1, 1, 1] {
        return HandScore {
            category: HandCategory::Pair,
            tiebreakers: grouped_tiebreakers(),
        };
    }
    HandScore {
        category: HandCategory::HighCard,
        tiebreakers: ranks.to_vec(),
    }
}

/// `ranks` must be sorted descending. Returns whether the five ranks form a
/// straight (including the A-2-3-4-5 wheel) and, if so, the straight's high
/// card value (5 for the wheel).
fn straight_high(ranks: &[u8; 5]) -> (bool, u8) {
    let is_wheel = *ranks == [14, 5, 4, 3, 2];
    if is_wheel {
        return (true, 5);
    }
    let consecutive = ranks.windows(2).all(|w| w[0] == w[1] + 1);
    let distinct = {
        let mut sorted = *ranks;
        sorted.sort_unstable();
        sorted.windows(2).all(|w| w[0] != w[1])
    };
    if consecutive && distinct {
        (true, ranks[0])
    } else {
        (false, 0)
    }
}

/// All length-`k` index combinations out of `0..n`, smallest-first.
fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    let mut results = Vec::new();
    let mut current = Vec::with_capacity(k);
    combinations_helper(n, k, 0, &mut current, &mut results);
    results
}

fn combinations_helper(
    n: usize,
    k: usize,
    start: usize,
    current: &mut Vec<usize>,
    results: &mut Vec<Vec<usize>>,
) {
    if current.len() == k {
        results.push(current.clone());
        return;
    }
    for i in start..n {
        current.push(i);
        combinations_helper(n, k, i + 1, current, results);
        current.pop();
    }
}
