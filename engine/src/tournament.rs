//! Tournament driver. Re-seats survivors into bounded tables each tier,
//! plays a fixed number of hands per table, advances the top stacks, and
//! escalates blinds on a per-hand/per-tier counter (never wall clock).

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::player::Player;
use crate::round::{self, BlindLevel, RoundConfig};

pub struct TournamentConfig {
    pub max_table_size: usize,
    pub advance_per_table: usize,
    pub hands_per_match: usize,
    pub blind_step_per_round: usize,
    pub blind_step_per_tier: usize,
    pub blinds_schedule: Vec<BlindLevel>,
    pub round: RoundConfig,
}

fn blind_at(schedule: &[BlindLevel], index: usize) -> BlindLevel {
    let clamped = index.min(schedule.len().saturating_sub(1));
    schedule[clamped]
}

/// Play a single table's match: up to `hands_per_match` hands, dropping
/// busted players between hands, ending early if fewer than two remain.
async fn play_table<R: Rng + ?Sized>(
    mut table: Vec<Player>,
    config: &TournamentConfig,
    blind_index: &mut usize,
    rng: &mut R,
) -> Vec<Player> {
    for _ in 0..config.hands_per_match {
        let active = table.iter().filter(|p| p.chips > 0).count();
        if active < 2 {
            break;
        }
        let blind = blind_at(&config.blinds_schedule, *blind_index);
        round::play_hand(&mut table, &blind, &config.round, rng).await;
        *blind_index += config.blind_step_per_round;

        let mut i = 0;
        while i < table.len() {
            if table[i].chips <= 0 {
                tracing::info!(player = table[i].name.as_str(), "eliminated player");
                table.remove(i);
            } else {
                i += 1;
            }
        }
    }
    table
}

/// Run the bracket to completion and return the final standings, sorted by
/// chips descending.
pub async fn run<R: Rng + ?Sized>(
    mut survivors: Vec<Player>,
    config: &TournamentConfig,
    rng: &mut R,
) -> Vec<Player> {
    let mut blind_index: usize = 0;
    let mut tier: usize = 1;

    loop {
        survivors.retain(|p| p.chips > 0);
        if survivors.len() <= config.max_table_size {
            break;
        }

        survivors.shuffle(rng);

        let tables: Vec<Vec<Player>> = survivors
            .chunks(config.max_table_size)
            .map(|chunk| chunk.to_vec())
            .collect();

        let mut advancers: Vec<Player> = Vec::new();
        for (table_idx, table) in tables.into_iter().enumerate() {
            tracing::info!(tier, table = table_idx, size = table.len(), "table starting");
            let mut table = play_table(table, config, &mut blind_index, rng).await;

            table.sort_by(|a, b| b.chips.cmp(&a.chips));
            let take = config.advance_per_table.min(table.len());
            advancers.extend(table.into_iter().take(take));
        }

        let mut seen = HashSet::new();
        advancers.retain(|p| seen.insert(p.name.clone()));

        blind_index += config.blind_step_per_tier;
        survivors = advancers;
        tier += 1;
    }

    survivors.sort_by(|a, b| b.chips.cmp(&a.chips));
    tracing::info!(finalists = survivors.len(), "tournament complete");
    for p in &survivors {
        tracing::info!(player = p.name.as_str(), chips = p.chips, "final standing");
    }
    survivors
}
