use std::fmt;
use std::sync::mpsc;

use thiserror::Error;

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    UploadCompleted {
        request_id: RequestId,
        result: Result<Vec<String>, TransportError>,
    },
    StatusCompleted {
        result: Result<String, TransportError>,
    },
    ClassifyCompleted {
        request_id: RequestId,
        result: Result<String, TransportError>,
    },
    /// Server-initiated named event from the socket channel.
    ChannelInbound { event: String, payload: String },
    /// The socket channel went away. There is no reconnect policy.
    ChannelClosed,
}

/// Receiver side for events pushed from background engine tasks.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

/// Sink that forwards events onto an mpsc channel, dropping them once the
/// receiving side has hung up.
pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: FailureKind,
    pub message: String,
}

impl TransportError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    /// The response arrived but its body did not match the expected schema.
    InvalidBody,
    /// A selected file could not be read from disk.
    Io,
    UnsupportedMediaType { media_type: String },
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::InvalidBody => write!(f, "invalid response body"),
            FailureKind::Io => write!(f, "io error"),
            FailureKind::UnsupportedMediaType { media_type } => {
                write!(f, "unsupported media type {media_type}")
            }
        }
    }
}
