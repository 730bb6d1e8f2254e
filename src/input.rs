use anyhow::{Context, Result};
use axum::body::Bytes;
use serde_json::{Map, Value as JsonValue};
use std::io::{IsTerminal, Read};
use std::time::Duration;

/// Raw JSON served on `/` instead of the route index
///
/// The payload is kept as bytes and only decoded when a request asks for it,
/// so malformed input is reported per request rather than at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectInput(Bytes);

impl DirectInput {
    /// Wrap a payload, returning `None` when it is empty
    pub fn new(payload: impl Into<Bytes>) -> Option<Self> {
        let payload = payload.into();
        if payload.is_empty() {
            None
        } else {
            Some(Self(payload))
        }
    }

    /// Decode the payload as a JSON object
    pub fn parse(&self) -> Result<Map<String, JsonValue>, serde_json::Error> {
        serde_json::from_slice(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Read direct input from stdin, falling back to the inline JSON string
///
/// Stdin is only read when it is not an interactive terminal, and only for as
/// long as `wait` allows.
pub async fn read_direct_input(
    json_string: Option<&str>,
    wait: Duration,
) -> Result<Option<DirectInput>> {
    let mut piped = Vec::new();
    if !std::io::stdin().is_terminal() {
        piped = read_with_deadline(std::io::stdin(), wait)
            .await
            .context("cannot read direct input")?;
        tracing::debug!("Read {} bytes of direct input from stdin", piped.len());
    }

    Ok(choose_direct_input(piped, json_string))
}

/// Read `reader` to the end on its own thread, giving up after `wait`
///
/// A source that is still open at the deadline counts as empty. The reading
/// thread is detached so a pipe that never closes cannot hold up startup or
/// shutdown.
pub async fn read_with_deadline<R>(mut reader: R, wait: Duration) -> std::io::Result<Vec<u8>>
where
    R: Read + Send + 'static,
{
    let (tx, rx) = tokio::sync::oneshot::channel();
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        let result = reader.read_to_end(&mut buf).map(|_| buf);
        let _ = tx.send(result);
    });

    match tokio::time::timeout(wait, rx).await {
        Ok(Ok(result)) => result,
        Ok(Err(_)) => Ok(Vec::new()),
        Err(_) => {
            tracing::warn!("stdin still open after {:?}, ignoring it", wait);
            Ok(Vec::new())
        }
    }
}

/// Non-empty stdin wins over the inline string
pub fn choose_direct_input(piped: Vec<u8>, json_string: Option<&str>) -> Option<DirectInput> {
    DirectInput::new(piped).or_else(|| {
        json_string.and_then(|s| DirectInput::new(Bytes::copy_from_slice(s.as_bytes())))
    })
}
