//! Socket channel with an explicit connect/emit/disconnect lifecycle.
//!
//! Named events ride a JSON envelope over one websocket connection to the
//! configured origin. Outbound emits are fire-and-forget: when the channel is
//! down the payload is dropped, never queued, never retried.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use gallery_logging::{gallery_debug, gallery_warn};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;

use crate::types::{EngineEvent, EventSink, FailureKind, TransportError};

/// Event name the echo control emits on.
pub const OUTBOUND_EVENT: &str = "main_socket";

/// Named-event envelope carried in each text frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub event: String,
    pub data: serde_json::Value,
}

pub struct ChannelHandle {
    outbound_tx: mpsc::UnboundedSender<Envelope>,
    task: tokio::task::JoinHandle<()>,
}

impl ChannelHandle {
    /// Connects to `url` and spawns the read/write loop on the current
    /// runtime. Inbound envelopes are surfaced through `sink`.
    pub async fn connect(url: &str, sink: Arc<dyn EventSink>) -> Result<Self, TransportError> {
        let (socket, _response) = tokio_tungstenite::connect_async(url)
            .await
            .map_err(|err| TransportError::new(FailureKind::Network, err.to_string()))?;
        let (mut write, mut read) = socket.split();
        let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<Envelope>();

        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    outbound = outbound_rx.recv() => {
                        // Sender dropped: the handle is gone, stop quietly.
                        let Some(envelope) = outbound else { break };
                        match serde_json::to_string(&envelope) {
                            Ok(text) => {
                                if let Err(err) = write.send(Message::Text(text)).await {
                                    gallery_warn!("channel send failed: {err}");
                                    sink.emit(EngineEvent::ChannelClosed);
                                    break;
                                }
                            }
                            Err(err) => gallery_warn!("channel encode failed: {err}"),
                        }
                    }
                    inbound = read.next() => {
                        match inbound {
                            Some(Ok(Message::Text(text))) => {
                                match serde_json::from_str::<Envelope>(&text) {
                                    Ok(envelope) => sink.emit(EngineEvent::ChannelInbound {
                                        event: envelope.event,
                                        payload: payload_text(envelope.data),
                                    }),
                                    Err(err) => {
                                        gallery_warn!("channel frame is not an envelope: {err}")
                                    }
                                }
                            }
                            Some(Ok(Message::Ping(_) | Message::Pong(_))) => {}
                            Some(Ok(Message::Close(_))) | None => {
                                sink.emit(EngineEvent::ChannelClosed);
                                break;
                            }
                            Some(Ok(_)) => gallery_debug!("ignoring non-text channel frame"),
                            Some(Err(err)) => {
                                gallery_warn!("channel error: {err}");
                                sink.emit(EngineEvent::ChannelClosed);
                                break;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self { outbound_tx, task })
    }

    /// Queues one named event. Fire-and-forget: a closed channel swallows the
    /// payload with a debug line.
    pub fn emit(&self, event: &str, payload: impl Into<serde_json::Value>) {
        let envelope = Envelope {
            event: event.to_string(),
            data: payload.into(),
        };
        if self.outbound_tx.send(envelope).is_err() {
            gallery_debug!("channel down; dropping outbound event");
        }
    }

    /// Tears the connection down. Dropping the handle has the same effect.
    pub fn disconnect(&self) {
        self.task.abort();
    }
}

/// String payloads come through verbatim; anything else keeps its JSON form.
fn payload_text(data: serde_json::Value) -> String {
    match data {
        serde_json::Value::String(text) => text,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_text_unwraps_strings_only() {
        assert_eq!(payload_text(serde_json::json!("ola")), "ola");
        assert_eq!(payload_text(serde_json::json!({"n": 1})), r#"{"n":1}"#);
        assert_eq!(payload_text(serde_json::Value::Null), "null");
    }
}
