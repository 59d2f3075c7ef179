//! Per-street betting state machine.
//!
//! Seat iteration order is `players[2:] + players[:2]` — UTG-first pre-flop,
//! and the same order reused on every later street. Conventional poker
//! rotates to SB-first post-flop; this implementation keeps the same order
//! on every street rather than silently "fixing" it.

use std::time::Duration;

use cards::Card;

use crate::player::{Action, Player};
use crate::state::{state_for, GameContext};
use crate::transport;

#[derive(Clone, Copy, Debug)]
pub struct GameState {
    pub pot: i64,
    pub curr_bet: i64,
    pub small_blind: i64,
    pub big_blind: i64,
}

pub const DEFAULT_ACTION_TIMEOUT: Duration = Duration::from_secs(5);

/// The order seats act in on any street: everyone after the big blind, then
/// the small blind and big blind themselves.
pub fn action_order(num_players: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (2..num_players).collect();
    if num_players > 0 {
        order.push(0);
    }
    if num_players > 1 {
        order.push(1);
    }
    order
}

/// Clear `ready`/`curr_bet` for a new post-flop street. All-in seats stay
/// pinned `ready = true` for the rest of the hand.
pub fn start_new_street(players: &mut [Player], game: &mut GameState) {
    game.curr_bet = 0;
    for p in players.iter_mut() {
        if !p.in_hand {
            continue;
        }
        if p.is_all_in() {
            p.ready = true;
        } else {
            p.ready = false;
            p.curr_bet = 0;
        }
    }
}

fn count_in_hand(players: &[Player]) -> usize {
    players.iter().filter(|p| p.in_hand).count()
}

fn sole_in_hand(players: &[Player]) -> Option<usize> {
    let mut found = None;
    for (i, p) in players.iter().enumerate() {
        if p.in_hand {
            if found.is_some() {
                return None;
            }
            found = Some(i);
        }
    }
    found
}

fn fold(player: &mut Player) {
    player.in_hand = false;
    player.last_action = Some(Action::Fold);
    player.ready = true;
}

fn apply_action(players: &mut [Player], game: &mut GameState, idx: usize, action: Action) {
    match action {
        Action::Check => {
            if players[idx].curr_bet == game.curr_bet {
                players[idx].last_action = Some(Action::Check);
                players[idx].ready = true;
            } else {
                fold(&mut players[idx]);
            }
        }
        Action::Call => {
            let need = game.curr_bet - players[idx].curr_bet;
            let committed = need.min(players[idx].chips);
            players[idx].chips -= committed;
            players[idx].curr_bet += committed;
            game.pot += committed;
            players[idx].last_action = Some(Action::Call);
            players[idx].ready = true;
        }
        Action::Raise { amount } => {
            let need = amount - players[idx].curr_bet;
            if need <= 0 {
                fold(&mut players[idx]);
                return;
            }
            let committed = need.min(players[idx].chips);
            players[idx].chips -= committed;
            players[idx].curr_bet += committed;
            game.pot += committed;
            if players[idx].curr_bet > game.curr_bet {
                game.curr_bet = players[idx].curr_bet;
            }
            players[idx].last_action = Some(Action::Raise { amount });
            for (i, p) in players.iter_mut().enumerate() {
                if i != idx && p.in_hand {
                    p.ready = false;
                }
            }
            players[idx].ready = true;
        }
        Action::Fold => fold(&mut players[idx]),
    }
}

/// Plays one street to completion. Returns `Some(seat)` if the street ended
/// early because only one in-hand seat remained — the driver should award
/// the pot to that seat without playing further streets.
pub async fn play_street(
    players: &mut [Player],
    game: &mut GameState,
    board: &[Card],
    num_decks: usize,
    timeout: Duration,
) -> Option<usize> {
    let order = action_order(players.len());

    loop {
        if let Some(winner) = sole_in_hand(players) {
            return Some(winner);
        }
        if players
            .iter()
            .all(|p| !p.in_hand || p.ready)
        {
            return None;
        }

        for &idx in &order {
            if !players[idx].in_hand {
                tracing::debug!(seat = players[idx].name.as_str(), "not in hand, skipping");
                continue;
            }
            if players[idx].ready {
                continue;
            }
            if count_in_hand(players) == 1 {
                return sole_in_hand(players);
            }

            let ctx = GameContext {
                board,
                num_decks,
                pot: game.pot,
                curr_bet: game.curr_bet,
                small_blind: game.small_blind,
                big_blind: game.big_blind,
            };
            let snapshot = state_for(&ctx, players, idx);
            let host = players[idx].host.clone();
            let port = players[idx].port;
            let action = transport::act(&host, port, &snapshot, timeout).await;
            apply_action(players, game, idx, action);
        }
    }
}
