//! One-shot TCP request/response to a bot endpoint, fail-closed.
//!
//! Every transport anomaly — connect failure, timeout, framing error,
//! malformed JSON, unknown move, non-integer raise — converts to
//! `Action::Fold`. A misbehaving bot forfeits its hand; it can never stall
//! or crash the engine.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::player::Action;
use crate::wire::{read_frame, write_frame, DEFAULT_MAX_FRAME};

#[derive(Debug, Error)]
enum TransportError {
    #[error("connect timed out")]
    ConnectTimeout,
    #[error("connect failed: {0}")]
    Connect(#[from] std::io::Error),
    #[error("request timed out")]
    RequestTimeout,
    #[error(transparent)]
    Wire(#[from] crate::wire::WireError),
    #[error("reply had no usable move field")]
    MalformedReply,
}

/// Solicit one action from a bot. Always returns an `Action` — any failure
/// mode becomes `Action::Fold` with a logged warning.
pub async fn act<S: Serialize>(
    host: &str,
    port: u16,
    state: &S,
    deadline: Duration,
) -> Action {
    match act_inner(host, port, state, deadline).await {
        Ok(action) => action,
        Err(e) => {
            tracing::warn!(host, port, error = %e, "bot transport failure, folding");
            Action::Fold
        }
    }
}

async fn act_inner<S: Serialize>(
    host: &str,
    port: u16,
    state: &S,
    deadline: Duration,
) -> Result<Action, TransportError> {
    let mut stream = timeout(deadline, TcpStream::connect((host, port)))
        .await
        .map_err(|_| TransportError::ConnectTimeout)??;

    let request = serde_json::json!({ "op": "act", "state": state });
    timeout(deadline, write_frame(&mut stream, &request))
        .await
        .map_err(|_| TransportError::RequestTimeout)??;

    let reply: Value = timeout(deadline, read_frame(&mut stream, DEFAULT_MAX_FRAME))
        .await
        .map_err(|_| TransportError::RequestTimeout)??;

    parse_reply(&reply)
}

fn parse_reply(reply: &Value) -> Result<Action, TransportError> {
    let mv = reply
        .get("move")
        .and_then(Value::as_str)
        .map(|s| s.trim().to_ascii_lowercase())
        .ok_or(TransportError::MalformedReply)?;

    match mv.as_str() {
        "fold" => Ok(Action::Fold),
        "check" => Ok(Action::Check),
        "call" => Ok(Action::Call),
        "raise" => {
            let amount = ["amount", "raise_to", "value", "amt"]
                .iter()
                .find_map(|key| reply.get(*key))
                .and_then(coerce_integer)
                .ok_or(TransportError::MalformedReply)?;
            Ok(Action::Raise { amount })
        }
        _ => Err(TransportError::MalformedReply),
    }
}

/// Accepts a JSON number or a numeric string (bots may send `"30"`).
fn coerce_integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    value.as_str().and_then(|s| s.trim().parse::<i64>().ok())
}

/// Send `{"op":"end","state": ...}`. No reply is expected; failures are
/// logged and ignored so hand teardown never blocks on a dead bot.
pub async fn notify_end<S: Serialize>(host: &str, port: u16, end_state: &S, deadline: Duration) {
    let send = async {
        let mut stream = TcpStream::connect((host, port)).await?;
        let request = serde_json::json!({ "op": "end", "state": end_state });
        write_frame(&mut stream, &request).await?;
        Ok::<(), crate::wire::WireError>(())
    };
    if let Err(e) = timeout(deadline, send).await.unwrap_or(Err(
        std::io::Error::new(std::io::ErrorKind::TimedOut, "end notification timed out").into(),
    )) {
        tracing::warn!(host, port, error = %e, "end notification failed");
    }
}

/// Send `{"op":"terminate"}`. Reply optional; failures are logged and ignored.
pub async fn terminate(host: &str, port: u16, deadline: Duration) {
    let send = async {
        let mut stream = TcpStream::connect((host, port)).await?;
        let request = serde_json::json!({ "op": "terminate" });
        write_frame(&mut stream, &request).await?;
        Ok::<(), crate::wire::WireError>(())
    };
    if let Err(e) = timeout(deadline, send).await.unwrap_or(Err(
        std::io::Error::new(std::io::ErrorKind::TimedOut, "terminate timed out").into(),
    )) {
        tracing::warn!(host, port, error = %e, "terminate failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_plain_moves() {
        assert_eq!(parse_reply(&json!({"move": "fold"})).unwrap(), Action::Fold);
        assert_eq!(parse_reply(&json!({"move": "Check"})).unwrap(), Action::Check);
        assert_eq!(parse_reply(&json!({"move": "CALL"})).unwrap(), Action::Call);
    }

    #[test]
    fn parses_raise_with_amount_aliases() {
        assert_eq!(
            parse_reply(&json!({"move": "raise", "amount": 30})).unwrap(),
            Action::Raise { amount: 30 }
        );
        assert_eq!(
            parse_reply(&json!({"move": "raise", "raise_to": 30})).unwrap(),
            Action::Raise { amount: 30 }
        );
        assert_eq!(
            parse_reply(&json!({"move": "raise", "value": 30})).unwrap(),
            Action::Raise { amount: 30 }
        );
        assert_eq!(
            parse_reply(&json!({"move": "raise", "amt": 30})).unwrap(),
            Action::Raise { amount: 30 }
        );
    }

    #[test]
    fn parses_raise_with_whitespace_and_case_and_string_amount() {
        assert_eq!(
            parse_reply(&json!({"move": "RAISE ", "raise_to": "30"})).unwrap(),
            Action::Raise { amount: 30 }
        );
    }

    #[test]
    fn raise_without_integer_amount_is_malformed() {
        assert!(parse_reply(&json!({"move": "raise"})).is_err());
        assert!(parse_reply(&json!({"move": "raise", "amount": "not-a-number"})).is_err());
    }

    #[test]
    fn unknown_move_is_malformed() {
        assert!(parse_reply(&json!({"move": "allin"})).is_err());
        assert!(parse_reply(&json!({})).is_err());
    }

    #[tokio::test]
    async fn connection_refused_folds() {
        // Port 0 never accepts connections; this exercises the fail-closed path.
        let action = act("127.0.0.1", 1, &json!({}), Duration::from_millis(200)).await;
        assert_eq!(action, Action::Fold);
    }
}
