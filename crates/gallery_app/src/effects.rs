use std::sync::mpsc;
use std::thread;

use gallery_core::{Effect, FileSelection, FlowError, Msg};
use gallery_engine::{ClientSettings, EngineEvent, EngineHandle, TransportError, UploadFile};
use gallery_logging::{gallery_info, gallery_warn};

use crate::app::AppMsg;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: ClientSettings, msg_tx: mpsc::Sender<AppMsg>) -> Self {
        let (engine, events) = EngineHandle::start(settings);
        spawn_event_pump(events, msg_tx);
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::PollStatus => self.engine.poll_status(),
                Effect::PostUpload { request_id, files } => {
                    // The original logs every file name and type before posting.
                    for file in &files {
                        gallery_info!("uploading {} ({})", file.name, file.media_type);
                    }
                    self.engine.upload(
                        request_id,
                        files.into_iter().map(to_upload_file).collect(),
                    );
                }
                Effect::ClassifyImage {
                    request_id,
                    source_url,
                } => {
                    gallery_info!("classifying last image {source_url}");
                    self.engine.classify(request_id, source_url);
                }
                Effect::ConnectChannel => self.engine.connect_channel(),
                Effect::EmitChannel { payload } => self.engine.emit_channel(payload),
                Effect::LogDiagnostic { message } => gallery_warn!("{message}"),
            }
        }
    }
}

fn spawn_event_pump(events: mpsc::Receiver<EngineEvent>, msg_tx: mpsc::Sender<AppMsg>) {
    thread::spawn(move || {
        for event in events {
            if msg_tx.send(AppMsg::Core(map_event(event))).is_err() {
                break;
            }
        }
    });
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::UploadCompleted { request_id, result } => Msg::UploadFinished {
            request_id,
            result: result.map_err(to_flow_error),
        },
        EngineEvent::StatusCompleted { result } => Msg::StatusFinished {
            result: result.map_err(to_flow_error),
        },
        EngineEvent::ClassifyCompleted { request_id, result } => Msg::ClassifyFinished {
            request_id,
            result: result.map_err(to_flow_error),
        },
        EngineEvent::ChannelInbound { event, payload } => {
            gallery_info!("received -> {payload}");
            Msg::ChannelInbound { event, payload }
        }
        EngineEvent::ChannelClosed => {
            gallery_warn!("channel closed");
            Msg::NoOp
        }
    }
}

fn to_flow_error(err: TransportError) -> FlowError {
    FlowError::new(err.to_string())
}

fn to_upload_file(file: FileSelection) -> UploadFile {
    UploadFile {
        path: file.path,
        name: file.name,
        media_type: file.media_type,
    }
}
