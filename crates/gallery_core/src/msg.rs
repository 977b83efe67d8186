use crate::state::{FileSelection, FlowError, RequestId};

/// Inbound channel event sent by the server right after the connection opens.
pub const EVENT_INITIALISE: &str = "initialise";
/// Inbound channel event carrying an echoed payload.
pub const EVENT_EXCHANGE: &str = "exchange";
/// Fixed payload the echo control sends.
pub const ECHO_PAYLOAD: &str = "ola";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Page-load equivalent: fired once before the first user action.
    Started,
    /// User picked a new set of files in the upload form.
    FilesChosen(Vec<FileSelection>),
    /// User submitted the upload form.
    UploadSubmitted,
    /// Engine completion for an upload request.
    UploadFinished {
        request_id: RequestId,
        result: Result<Vec<String>, FlowError>,
    },
    /// Engine completion for the one-shot health probe.
    StatusFinished { result: Result<String, FlowError> },
    /// User clicked the classify trigger.
    ClassifyClicked,
    /// Engine completion for a classification request.
    ClassifyFinished {
        request_id: RequestId,
        result: Result<String, FlowError>,
    },
    /// User clicked the echo control.
    EchoClicked,
    /// Server-initiated channel event.
    ChannelInbound { event: String, payload: String },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
