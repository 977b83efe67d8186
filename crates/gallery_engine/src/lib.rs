//! Gallery engine: effect execution and network transports.
mod channel;
mod classify;
mod engine;
mod http;
mod schema;
mod status;
mod types;
mod upload;

pub use channel::{ChannelHandle, Envelope, OUTBOUND_EVENT};
pub use classify::{Classifier, ReqwestClassifier, CLASSIFY_FIELD, CLASSIFY_FILENAME};
pub use engine::EngineHandle;
pub use http::{ClientSettings, CLASSIFY_PATH, HEALTH_PATH, UPLOAD_PATH};
pub use schema::{ClassifyResponse, HealthResponse, UploadResponse};
pub use status::{ReqwestStatusProbe, StatusProbe};
pub use types::{
    ChannelEventSink, EngineEvent, EventSink, FailureKind, RequestId, TransportError,
};
pub use upload::{ReqwestUploader, UploadFile, Uploader, UPLOAD_FIELD};
