use crate::state::PanelColor;

/// Render-ready projection of the page. The renderer owns layout; the view
/// model owns content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    /// Names of the currently chosen files, in selection order.
    pub selections: Vec<String>,
    pub upload_in_flight: bool,
    pub classify_in_flight: bool,
    pub gallery: GalleryPanelView,
    /// Already formatted, e.g. `Server Status: ok`. `None` until the probe
    /// succeeds; failures never surface here.
    pub status_line: Option<String>,
    pub classification: Option<String>,
    /// Inbound `exchange` payloads in arrival order.
    pub echo_log: Vec<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GalleryPanelView {
    /// Set to black by the first successful render; unset before that.
    pub background: Option<PanelColor>,
    pub images: Vec<ImageCellView>,
}

/// One rendered image, sized to the placeholder by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCellView {
    pub source: String,
}
