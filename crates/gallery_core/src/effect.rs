use crate::state::{FileSelection, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue the one-shot GET against the health endpoint.
    PollStatus,
    /// Post every selected file as one multipart request.
    PostUpload {
        request_id: RequestId,
        files: Vec<FileSelection>,
    },
    /// Re-fetch the image at `source_url` and post it for classification.
    ClassifyImage {
        request_id: RequestId,
        source_url: String,
    },
    /// Open the channel to the configured origin.
    ConnectChannel,
    /// Emit the named outbound event with `payload`, fire-and-forget.
    EmitChannel { payload: String },
    /// Write a diagnostic to the log. Failures never reach the rendered UI.
    LogDiagnostic { message: String },
}
