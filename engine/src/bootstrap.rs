//! Pre-flight liveness check.
//!
//! `wait_for_bots` is a bounded-retry connect-only probe — the same
//! connect-as-liveness-check the bot launcher used to ping bots before
//! handing them to the tournament.

use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::config::BotConfig;

pub const DEFAULT_AGGREGATE_DEADLINE: Duration = Duration::from_secs(5);
const RETRY_INTERVAL: Duration = Duration::from_millis(200);
const CONNECT_TIMEOUT: Duration = Duration::from_millis(500);

#[derive(Debug, Error)]
#[error("bot(s) unreachable after pre-flight wait:\n{}", .unreachable.join("\n"))]
pub struct BootstrapError {
    pub unreachable: Vec<String>,
}

async fn probe_once(host: &str, port: u16) -> bool {
    matches!(
        timeout(CONNECT_TIMEOUT, TcpStream::connect((host, port))).await,
        Ok(Ok(_))
    )
}

/// Poll every bot until it accepts a TCP connection or the aggregate
/// deadline expires. Returns a multi-line error naming every endpoint still
/// unreachable at that point.
pub async fn wait_for_bots(bots: &[BotConfig], aggregate_deadline: Duration) -> Result<(), BootstrapError> {
    let deadline = Instant::now() + aggregate_deadline;
    let mut pending: Vec<&BotConfig> = bots.iter().collect();

    loop {
        let mut still_pending = Vec::new();
        for bot in pending {
            if !probe_once(&bot.host, bot.port).await {
                still_pending.push(bot);
            }
        }
        pending = still_pending;

        if pending.is_empty() || Instant::now() >= deadline {
            break;
        }
        tokio::time::sleep(RETRY_INTERVAL).await;
    }

    if pending.is_empty() {
        Ok(())
    } else {
        let unreachable = pending
            .iter()
            .map(|bot| format!("{} ({}:{})", bot.name, bot.host, bot.port))
            .collect();
        Err(BootstrapError { unreachable })
    }
}
