use crate::{AppState, Effect, Msg, ECHO_PAYLOAD, EVENT_EXCHANGE, EVENT_INITIALISE};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            // Page-load: connect the channel and run the one-shot health probe.
            if state.mark_started() {
                vec![Effect::ConnectChannel, Effect::PollStatus]
            } else {
                Vec::new()
            }
        }
        Msg::FilesChosen(files) => {
            state.choose_files(files);
            Vec::new()
        }
        Msg::UploadSubmitted => {
            if state.upload_in_flight() {
                vec![diagnostic("upload already in flight, ignoring submit")]
            } else if state.selections_empty() {
                vec![diagnostic("no files selected, nothing to upload")]
            } else {
                let (request_id, files) = state.begin_upload();
                vec![Effect::PostUpload { request_id, files }]
            }
        }
        Msg::UploadFinished { request_id, result } => {
            if !state.finish_upload(request_id) {
                vec![diagnostic(format!(
                    "dropping stale upload completion for request {request_id}"
                ))]
            } else {
                match result {
                    // The placeholder is cleared (and its background set) on
                    // every 2xx response, even when the list is empty. A
                    // failed request leaves it untouched.
                    Ok(urls) => {
                        let empty = urls.is_empty();
                        state.render_gallery(urls);
                        if empty {
                            vec![diagnostic("no images returned")]
                        } else {
                            Vec::new()
                        }
                    }
                    Err(err) => vec![diagnostic(format!("upload failed: {err}"))],
                }
            }
        }
        Msg::StatusFinished { result } => match result {
            Ok(status) => {
                state.render_status(status);
                Vec::new()
            }
            Err(err) => vec![diagnostic(format!("failed to check server status: {err}"))],
        },
        Msg::ClassifyClicked => {
            if state.classify_in_flight() {
                vec![diagnostic("classification already in flight, ignoring click")]
            } else {
                match state.last_image() {
                    Some(source_url) => {
                        let request_id = state.begin_classify();
                        vec![Effect::ClassifyImage {
                            request_id,
                            source_url,
                        }]
                    }
                    None => vec![diagnostic("no image to process")],
                }
            }
        }
        Msg::ClassifyFinished { request_id, result } => {
            if !state.finish_classify(request_id) {
                vec![diagnostic(format!(
                    "dropping stale classification completion for request {request_id}"
                ))]
            } else {
                match result {
                    Ok(label) => {
                        state.render_classification(label);
                        Vec::new()
                    }
                    Err(err) => vec![diagnostic(format!("failed to process the image: {err}"))],
                }
            }
        }
        // Fire-and-forget regardless of connection state.
        Msg::EchoClicked => vec![Effect::EmitChannel {
            payload: ECHO_PAYLOAD.to_string(),
        }],
        Msg::ChannelInbound { event, payload } => match event.as_str() {
            EVENT_INITIALISE => Vec::new(),
            EVENT_EXCHANGE => {
                state.push_echo(payload);
                Vec::new()
            }
            _ => vec![diagnostic(format!("unhandled channel event: {event}"))],
        },
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn diagnostic(message: impl Into<String>) -> Effect {
    Effect::LogDiagnostic {
        message: message.into(),
    }
}
