//! Builds the STATE and END_STATE wire objects sent to bots.

use std::collections::HashMap;

use cards::Card;
use serde::Serialize;

use crate::player::{Action, Player};

#[derive(Serialize)]
pub struct PlayerView {
    pub chips: i64,
    pub last_action: Option<Action>,
    pub position: usize,
}

#[derive(Serialize)]
pub struct EndPlayerView {
    pub chips: i64,
    pub last_action: Option<Action>,
    pub position: usize,
    pub winner: bool,
    pub hand: Vec<String>,
}

/// The `act`-time STATE object, built for whichever seat is about to move.
#[derive(Serialize)]
pub struct StateSnapshot {
    pub board: Vec<Card>,
    pub num_decks: usize,
    pub pot: i64,
    pub curr_bet: i64,
    pub small_blind: i64,
    pub big_blind: i64,
    pub hand: Vec<Card>,
    pub player_curr_bet: i64,
    pub players: HashMap<String, PlayerView>,
}

#[derive(Serialize)]
pub struct EndStateSnapshot {
    pub board: Vec<Card>,
    pub num_decks: usize,
    pub pot: i64,
    pub curr_bet: i64,
    pub small_blind: i64,
    pub big_blind: i64,
    pub hand: Vec<Card>,
    pub player_curr_bet: i64,
    pub is_end_state: bool,
    pub reset_deck: bool,
    pub players: HashMap<String, EndPlayerView>,
}

fn players_common(players: &[Player]) -> HashMap<String, PlayerView> {
    players
        .iter()
        .enumerate()
        .map(|(i, p)| {
            (
                p.name.clone(),
                PlayerView {
                    chips: p.chips,
                    last_action: p.last_action,
                    position: i,
                },
            )
        })
        .collect()
}

pub struct GameContext<'a> {
    pub board: &'a [Card],
    pub num_decks: usize,
    pub pot: i64,
    pub curr_bet: i64,
    pub small_blind: i64,
    pub big_blind: i64,
}

/// Build the STATE object for `seat`.
pub fn state_for(ctx: &GameContext, players: &[Player], seat: usize) -> StateSnapshot {
    let seat_player = &players[seat];
    StateSnapshot {
        board: ctx.board.to_vec(),
        num_decks: ctx.num_decks,
        pot: ctx.pot,
        curr_bet: ctx.curr_bet,
        small_blind: ctx.small_blind,
        big_blind: ctx.big_blind,
        hand: seat_player.hand.clone(),
        player_curr_bet: seat_player.curr_bet,
        players: players_common(players),
    }
}

/// Build the END_STATE object for `seat`, given the set of winning seat names.
pub fn end_state_for(
    ctx: &GameContext,
    players: &[Player],
    seat: usize,
    winners: &[String],
    reset_deck: bool,
) -> EndStateSnapshot {
    let seat_player = &players[seat];
    let players_view = players
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let show_hand = p.in_hand || i == seat;
            let hand = if show_hand {
                p.hand.iter().map(|c| c.short_str()).collect()
            } else {
                Vec::new()
            };
            (
                p.name.clone(),
                EndPlayerView {
                    chips: p.chips,
                    last_action: p.last_action,
                    position: i,
                    winner: winners.iter().any(|w| w == &p.name),
                    hand,
                },
            )
        })
        .collect();

    EndStateSnapshot {
        board: ctx.board.to_vec(),
        num_decks: ctx.num_decks,
        pot: ctx.pot,
        curr_bet: ctx.curr_bet,
        small_blind: ctx.small_blind,
        big_blind: ctx.big_blind,
        hand: seat_player.hand.clone(),
        player_curr_bet: seat_player.curr_bet,
        is_end_state: true,
        reset_deck,
        players: players_view,
    }
}
