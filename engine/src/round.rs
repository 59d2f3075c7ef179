//! Round driver. Orchestrates a single hand from blinds through showdown
//! and end-of-hand notification.

use std::time::Duration;

use cards::{evaluate, Deck};
use rand::Rng;

use crate::betting::{self, GameState};
use crate::player::Player;
use crate::state::{end_state_for, GameContext};
use crate::transport;

#[derive(Clone, Copy, Debug)]
pub struct BlindLevel {
    pub small: u32,
    pub big: u32,
    pub ante: u32,
}

pub struct RoundConfig {
    pub num_decks: usize,
    pub action_timeout: Duration,
    pub end_timeout: Duration,
}

impl Default for RoundConfig {
    fn default() -> Self {
        RoundConfig {
            num_decks: 1,
            action_timeout: betting::DEFAULT_ACTION_TIMEOUT,
            end_timeout: Duration::from_secs(2),
        }
    }
}

/// Collect antes then blinds from seats `0` (SB) and `1` (BB). Returns
/// `None` if fewer than two seats can cover the big blind, in which case the
/// hand is skipped entirely and no chips are touched.
fn post_blinds_and_antes(players: &mut [Player], blind: &BlindLevel) -> Option<GameState> {
    if players.len() < 2 {
        return None;
    }

    let eligible = players.iter().filter(|p| p.chips >= blind.big as i64).count();
    if eligible < 2 {
        return None;
    }

    let mut pot: i64 = 0;
    if blind.ante > 0 {
        for p in players.iter_mut() {
            if p.chips <= 0 {
                continue;
            }
            let amount = (blind.ante as i64).min(p.chips);
            p.chips -= amount;
            pot += amount;
        }
    }

    let sb_amount = (blind.small as i64).min(players[0].chips);
    players[0].chips -= sb_amount;
    players[0].curr_bet = sb_amount;
    pot += sb_amount;

    let bb_amount = (blind.big as i64).min(players[1].chips);
    players[1].chips -= bb_amount;
    players[1].curr_bet = bb_amount;
    pot += bb_amount;

    // A short stack pushed to 0 by a partial ante/blind is all-in before the
    // first action has even been solicited; pin it ready so pre-flop
    // treats it the same way `start_new_street` treats all-in seats on
    // later streets.
    for p in players.iter_mut() {
        if p.in_hand && p.chips == 0 {
            p.ready = true;
        }
    }

    Some(GameState {
        pot,
        curr_bet: blind.big as i64,
        small_blind: blind.small as i64,
        big_blind: blind.big as i64,
    })
}

/// Split the pot among `winners` (seat indices, ascending seat order). The
/// remainder of an uneven split goes to the first winner in the list.
fn award_pot(players: &mut [Player], game: &mut GameState, winners: &[usize]) {
    if winners.is_empty() {
        // Defensive fallback: should be unreachable given the invariants,
        // but never leave a pot unawarded.
        let fallback = players
            .iter()
            .position(|p| p.in_hand)
            .unwrap_or_else(|| {
                players
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, p)| p.chips)
                    .map(|(i, _)| i)
                    .unwrap_or(0)
            });
        players[fallback].chips += game.pot;
        game.pot = 0;
        return;
    }

    let share = game.pot / winners.len() as i64;
    let remainder = game.pot % winners.len() as i64;
    for (i, &seat) in winners.iter().enumerate() {
        players[seat].chips += share + if i == 0 { remainder } else { 0 };
    }
    game.pot = 0;
}

/// Evaluate every in-hand seat's best 7-card hand and return the winning
/// seat indices in ascending seat order.
fn showdown_winners(players: &[Player], community: &[cards::Card]) -> Vec<usize> {
    let mut scored: Vec<(usize, cards::HandScore)> = players
        .iter()
        .enumerate()
        .filter(|(_, p)| p.in_hand)
        .map(|(i, p)| {
            let mut cards7 = p.hand.clone();
            cards7.extend_from_slice(community);
            let (score, _) = evaluate(&cards7);
            (i, score)
        })
        .collect();

    let Some(best) = scored.iter().map(|(_, s)| s.clone()).max() else {
        return Vec::new();
    };
    scored.retain(|(_, s)| *s == best);
    scored.into_iter().map(|(i, _)| i).collect()
}

/// Send the end-of-hand notification to every seat, sequentially. Failures
/// are logged and ignored.
async fn notify_all(
    players: &[Player],
    ctx: &GameContext<'_>,
    winners: &[String],
    reset_deck: bool,
    end_timeout: Duration,
) {
    for (i, p) in players.iter().enumerate() {
        let snapshot = end_state_for(ctx, players, i, winners, reset_deck);
        transport::notify_end(&p.host, p.port, &snapshot, end_timeout).await;
    }
}

/// Play one hand. Returns `None` if the hand was skipped because fewer than
/// two seats could cover the big blind.
pub async fn play_hand<R: Rng + ?Sized>(
    players: &mut [Player],
    blind: &BlindLevel,
    config: &RoundConfig,
    rng: &mut R,
) -> Option<Vec<String>> {
    for p in players.iter_mut() {
        p.reset_for_hand();
    }

    let mut game = post_blinds_and_antes(players, blind)?;

    let mut deck = Deck::new(config.num_decks, rng);
    deck.verify(players.len(), rng);

    for p in players.iter_mut() {
        if p.in_hand {
            p.hand = deck.deal(2);
        }
    }

    let mut sole_winner = betting::play_street(
        players,
        &mut game,
        deck.community(),
        config.num_decks,
        config.action_timeout,
    )
    .await;

    if sole_winner.is_none() {
        deck.burn(1);
        deck.deal_to_table(3);
        betting::start_new_street(players, &mut game);
        sole_winner = betting::play_street(
            players,
            &mut game,
            deck.community(),
            config.num_decks,
            config.action_timeout,
        )
        .await;
    }

    if sole_winner.is_none() {
        deck.burn(1);
        deck.deal_to_table(1);
        betting::start_new_street(players, &mut game);
        sole_winner = betting::play_street(
            players,
            &mut game,
            deck.community(),
            config.num_decks,
            config.action_timeout,
        )
        .await;
    }

    if sole_winner.is_none() {
        deck.burn(1);
        deck.deal_to_table(1);
        betting::start_new_street(players, &mut game);
        sole_winner = betting::play_street(
            players,
            &mut game,
            deck.community(),
            config.num_decks,
            config.action_timeout,
        )
        .await;
    }

    let winner_seats = match sole_winner {
        Some(seat) => vec![seat],
        None => showdown_winners(players, deck.community()),
    };

    let pot_awarded = game.pot;
    award_pot(players, &mut game, &winner_seats);

    let winner_names: Vec<String> = winner_seats.iter().map(|&i| players[i].name.clone()).collect();
    tracing::info!(winners = ?winner_names, pot_awarded, "hand complete");

    let reset_deck = deck.verify(players.len(), rng);

    let ctx = GameContext {
        board: deck.community(),
        num_decks: config.num_decks,
        pot: game.pot,
        curr_bet: game.curr_bet,
        small_blind: game.small_blind,
        big_blind: game.big_blind,
    };
    notify_all(players, &ctx, &winner_names, reset_deck, config.end_timeout).await;

    players.rotate_left(1);

    Some(winner_names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(7)
    }

    #[test]
    fn blinds_are_posted_and_pot_reflects_them() {
        let mut players = vec![
            Player::new("sb", "h", 1, 100),
            Player::new("bb", "h", 2, 100),
        ];
        let blind = BlindLevel { small: 1, big: 2, ante: 0 };
        let game = post_blinds_and_antes(&mut players, &blind).unwrap();
        assert_eq!(game.pot, 3);
        assert_eq!(players[0].chips, 99);
        assert_eq!(players[1].chips, 98);
    }

    #[test]
    fn hand_is_skipped_when_fewer_than_two_can_afford_big_blind() {
        let mut players = vec![
            Player::new("sb", "h", 1, 1),
            Player::new("bb", "h", 2, 1),
        ];
        let blind = BlindLevel { small: 1, big: 2, ante: 0 };
        assert!(post_blinds_and_antes(&mut players, &blind).is_none());
    }

    #[test]
    fn ante_is_collected_from_every_seat_before_blinds() {
        let mut players = vec![
            Player::new("sb", "h", 1, 100),
            Player::new("bb", "h", 2, 100),
            Player::new("c", "h", 3, 100),
        ];
        let blind = BlindLevel { small: 1, big: 2, ante: 5 };
        let game = post_blinds_and_antes(&mut players, &blind).unwrap();
        assert_eq!(game.pot, 15 + 3); // 3 antes of 5, plus 1 + 2 blinds
        assert_eq!(players[2].chips, 95);
    }

    #[test]
    fn skipped_hand_with_a_nonzero_ante_touches_no_chips() {
        let mut players = vec![
            Player::new("sb", "h", 1, 1),
            Player::new("bb", "h", 2, 1),
        ];
        let blind = BlindLevel { small: 1, big: 2, ante: 5 };
        assert!(post_blinds_and_antes(&mut players, &blind).is_none());
        assert_eq!(players[0].chips, 1);
        assert_eq!(players[1].chips, 1);
    }

    #[test]
    fn short_stack_driven_to_zero_by_a_partial_blind_is_pinned_ready() {
        let mut players = vec![
            Player::new("sb", "h", 1, 1),
            Player::new("bb", "h", 2, 100),
            Player::new("c", "h", 3, 100),
        ];
        let blind = BlindLevel { small: 1, big: 2, ante: 0 };
        post_blinds_and_antes(&mut players, &blind).unwrap();
        assert_eq!(players[0].chips, 0);
        assert!(players[0].ready);
        assert!(!players[1].ready);
    }

    #[test]
    fn pot_split_gives_remainder_to_first_winner_in_seat_order() {
        let mut players = vec![
            Player::new("a", "h", 1, 0),
            Player::new("b", "h", 2, 0),
            Player::new("c", "h", 3, 0),
        ];
        let mut game = GameState { pot: 10, curr_bet: 0, small_blind: 1, big_blind: 2 };
        award_pot(&mut players, &mut game, &[0, 2]);
        assert_eq!(players[0].chips, 6);
        assert_eq!(players[2].chips, 4);
        assert_eq!(game.pot, 0);
    }

    #[tokio::test]
    async fn heads_up_hand_with_unreachable_bots_completes_by_folding() {
        let mut players = vec![
            Player::new("sb", "127.0.0.1", 1, 100),
            Player::new("bb", "127.0.0.1", 2, 100),
        ];
        let blind = BlindLevel { small: 1, big: 2, ante: 0 };
        let config = RoundConfig {
            num_decks: 1,
            action_timeout: Duration::from_millis(100),
            end_timeout: Duration::from_millis(100),
        };
        let mut rng = rng();
        let result = play_hand(&mut players, &blind, &config, &mut rng).await;
        assert!(result.is_some());
        // Chip conservation: 200 total before, 200 total after (no burns).
        let total: i64 = players.iter().map(|p| p.chips).sum();
        assert_eq!(total, 200);
    }
}
