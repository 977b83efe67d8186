use std::fmt;
use std::path::PathBuf;

use crate::view_model::{AppViewModel, GalleryPanelView, ImageCellView};

pub type RequestId = u64;

/// One file chosen in the upload form: the handle the browser's file input
/// would hand over, reduced to what the transport needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSelection {
    pub path: PathBuf,
    pub name: String,
    pub media_type: String,
}

/// Background/text colors the flows set. The page only ever uses these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelColor {
    Black,
    White,
}

/// Opaque failure description carried back into the state machine.
///
/// The core never branches on the failure kind; it only needs something
/// displayable for the diagnostic log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowError {
    message: String,
}

impl FlowError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for FlowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    started: bool,
    selections: Vec<FileSelection>,
    next_request_id: RequestId,
    upload_in_flight: Option<RequestId>,
    classify_in_flight: Option<RequestId>,
    gallery_background: Option<PanelColor>,
    gallery_images: Vec<String>,
    status_line: Option<String>,
    classification: Option<String>,
    echo_log: Vec<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            selections: self
                .selections
                .iter()
                .map(|file| file.name.clone())
                .collect(),
            upload_in_flight: self.upload_in_flight.is_some(),
            classify_in_flight: self.classify_in_flight.is_some(),
            gallery: GalleryPanelView {
                background: self.gallery_background,
                images: self
                    .gallery_images
                    .iter()
                    .map(|url| ImageCellView {
                        source: url.clone(),
                    })
                    .collect(),
            },
            status_line: self
                .status_line
                .as_ref()
                .map(|status| format!("Server Status: {status}")),
            classification: self.classification.clone(),
            echo_log: self.echo_log.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether the renderer needs a pass, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_started(&mut self) -> bool {
        !std::mem::replace(&mut self.started, true)
    }

    pub(crate) fn choose_files(&mut self, files: Vec<FileSelection>) {
        self.selections = files;
        self.dirty = true;
    }

    pub(crate) fn selections_empty(&self) -> bool {
        self.selections.is_empty()
    }

    pub(crate) fn upload_in_flight(&self) -> bool {
        self.upload_in_flight.is_some()
    }

    pub(crate) fn classify_in_flight(&self) -> bool {
        self.classify_in_flight.is_some()
    }

    /// Assigns a request id to the pending upload and hands back the batch.
    pub(crate) fn begin_upload(&mut self) -> (RequestId, Vec<FileSelection>) {
        let request_id = self.allocate_request_id();
        self.upload_in_flight = Some(request_id);
        (request_id, self.selections.clone())
    }

    /// True when `request_id` is the in-flight upload; clears it.
    pub(crate) fn finish_upload(&mut self, request_id: RequestId) -> bool {
        if self.upload_in_flight == Some(request_id) {
            self.upload_in_flight = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn begin_classify(&mut self) -> RequestId {
        let request_id = self.allocate_request_id();
        self.classify_in_flight = Some(request_id);
        request_id
    }

    pub(crate) fn finish_classify(&mut self, request_id: RequestId) -> bool {
        if self.classify_in_flight == Some(request_id) {
            self.classify_in_flight = None;
            true
        } else {
            false
        }
    }

    /// Source URL of the last image cell, the one classification operates on.
    pub(crate) fn last_image(&self) -> Option<String> {
        self.gallery_images.last().cloned()
    }

    /// Replaces the gallery placeholder's contents. Clear-then-append: the
    /// placeholder never accumulates across requests.
    pub(crate) fn render_gallery(&mut self, urls: Vec<String>) {
        self.gallery_images = urls;
        self.gallery_background = Some(PanelColor::Black);
        self.dirty = true;
    }

    pub(crate) fn render_status(&mut self, status: String) {
        self.status_line = Some(status);
        self.dirty = true;
    }

    pub(crate) fn render_classification(&mut self, label: String) {
        self.classification = Some(label);
        self.dirty = true;
    }

    pub(crate) fn push_echo(&mut self, payload: String) {
        self.echo_log.push(payload);
        self.dirty = true;
    }

    fn allocate_request_id(&mut self) -> RequestId {
        self.next_request_id += 1;
        self.next_request_id
    }
}
