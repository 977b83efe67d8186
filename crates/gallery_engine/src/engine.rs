use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use gallery_logging::{gallery_debug, gallery_warn};

use crate::channel::{ChannelHandle, OUTBOUND_EVENT};
use crate::classify::{Classifier, ReqwestClassifier};
use crate::http::ClientSettings;
use crate::status::{ReqwestStatusProbe, StatusProbe};
use crate::types::{ChannelEventSink, EngineEvent, EventSink, RequestId};
use crate::upload::{ReqwestUploader, UploadFile, Uploader};

enum EngineCommand {
    Upload {
        request_id: RequestId,
        files: Vec<UploadFile>,
    },
    PollStatus,
    Classify {
        request_id: RequestId,
        source_url: String,
    },
    ChannelConnect,
    ChannelEmit {
        payload: String,
    },
}

/// Cloneable command side of the engine. Events arrive on the receiver
/// returned by [`EngineHandle::start`].
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn start(settings: ClientSettings) -> (Self, mpsc::Receiver<EngineEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || run_engine(settings, cmd_rx, event_tx));

        (Self { cmd_tx }, event_rx)
    }

    pub fn upload(&self, request_id: RequestId, files: Vec<UploadFile>) {
        let _ = self.cmd_tx.send(EngineCommand::Upload { request_id, files });
    }

    pub fn poll_status(&self) {
        let _ = self.cmd_tx.send(EngineCommand::PollStatus);
    }

    pub fn classify(&self, request_id: RequestId, source_url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Classify {
            request_id,
            source_url: source_url.into(),
        });
    }

    pub fn connect_channel(&self) {
        let _ = self.cmd_tx.send(EngineCommand::ChannelConnect);
    }

    pub fn emit_channel(&self, payload: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::ChannelEmit {
            payload: payload.into(),
        });
    }
}

fn run_engine(
    settings: ClientSettings,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let uploader = Arc::new(ReqwestUploader::new(settings.clone()));
    let probe = Arc::new(ReqwestStatusProbe::new(settings.clone()));
    let classifier = Arc::new(ReqwestClassifier::new(settings.clone()));
    let sink: Arc<dyn EventSink> = Arc::new(ChannelEventSink::new(event_tx.clone()));
    let channel: Arc<Mutex<Option<ChannelHandle>>> = Arc::new(Mutex::new(None));

    while let Ok(command) = cmd_rx.recv() {
        match command {
            EngineCommand::Upload { request_id, files } => {
                let uploader = uploader.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let result = uploader.upload(request_id, &files).await;
                    let _ = event_tx.send(EngineEvent::UploadCompleted { request_id, result });
                });
            }
            EngineCommand::PollStatus => {
                let probe = probe.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let result = probe.check().await;
                    let _ = event_tx.send(EngineEvent::StatusCompleted { result });
                });
            }
            EngineCommand::Classify {
                request_id,
                source_url,
            } => {
                let classifier = classifier.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let result = classifier.classify(request_id, &source_url).await;
                    let _ = event_tx.send(EngineEvent::ClassifyCompleted { request_id, result });
                });
            }
            EngineCommand::ChannelConnect => {
                let settings = settings.clone();
                let sink = sink.clone();
                let channel = channel.clone();
                runtime.spawn(async move {
                    let url = match settings.channel_url() {
                        Ok(url) => url,
                        Err(err) => {
                            gallery_warn!("channel url invalid: {err}");
                            return;
                        }
                    };
                    match ChannelHandle::connect(&url, sink).await {
                        Ok(handle) => {
                            *channel.lock().expect("channel slot") = Some(handle);
                        }
                        Err(err) => gallery_warn!("channel connect failed: {err}"),
                    }
                });
            }
            EngineCommand::ChannelEmit { payload } => {
                match channel.lock().expect("channel slot").as_ref() {
                    Some(handle) => handle.emit(OUTBOUND_EVENT, payload),
                    None => gallery_debug!("channel not connected; dropping outbound event"),
                }
            }
        }
    }

    // Command side closed: take the channel down with us.
    let final_handle = channel.lock().expect("channel slot").take();
    if let Some(handle) = final_handle {
        handle.disconnect();
    }
}
