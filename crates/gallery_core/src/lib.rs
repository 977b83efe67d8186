//! Gallery core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{Msg, ECHO_PAYLOAD, EVENT_EXCHANGE, EVENT_INITIALISE};
pub use state::{AppState, FileSelection, FlowError, PanelColor, RequestId};
pub use update::update;
pub use view_model::{AppViewModel, GalleryPanelView, ImageCellView};
