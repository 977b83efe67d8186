use gallery_core::{AppViewModel, PanelColor};

use super::constants::{
    CLASSIFICATION_TEXT_COLOR, IMAGE_CELL_HEIGHT, PANEL_WIDTH, STATUS_TEXT_COLOR,
};

/// Renders the whole page as lines of text. Pure so tests can assert on it;
/// [`draw`] is the thin printing wrapper the main loop calls.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(section("upload form"));
    if view.selections.is_empty() {
        lines.push("  (no files chosen)".to_string());
    } else {
        for name in &view.selections {
            lines.push(format!("  [file] {name}"));
        }
    }

    lines.push(section("imageplaceholder1"));
    if let Some(background) = view.gallery.background {
        lines.push(format!("  background: {}", color_name(background)));
    }
    for cell in &view.gallery.images {
        lines.push(format!(
            "  [img fit {PANEL_WIDTH}x{IMAGE_CELL_HEIGHT}] {}",
            cell.source
        ));
    }

    lines.push(section("imageplaceholder2"));
    if let Some(status_line) = &view.status_line {
        lines.push(format!("  {status_line} ({STATUS_TEXT_COLOR})"));
    }
    if let Some(classification) = &view.classification {
        lines.push(format!(
            "  {classification} ({CLASSIFICATION_TEXT_COLOR})"
        ));
    }

    if !view.echo_log.is_empty() {
        lines.push(section("echo log"));
        for payload in &view.echo_log {
            lines.push(format!("  << {payload}"));
        }
    }

    lines
}

pub fn draw(view: &AppViewModel) {
    for line in render(view) {
        println!("{line}");
    }
}

fn section(title: &str) -> String {
    let mut line = format!("── {title} ");
    while line.chars().count() < PANEL_WIDTH {
        line.push('─');
    }
    line
}

fn color_name(color: PanelColor) -> &'static str {
    match color {
        PanelColor::Black => "black",
        PanelColor::White => "white",
    }
}

#[cfg(test)]
mod tests {
    use gallery_core::{GalleryPanelView, ImageCellView};

    use super::*;

    #[test]
    fn gallery_cells_render_in_order() {
        let view = AppViewModel {
            gallery: GalleryPanelView {
                background: Some(PanelColor::Black),
                images: vec![
                    ImageCellView {
                        source: "/images/a.png".to_string(),
                    },
                    ImageCellView {
                        source: "/images/b.png".to_string(),
                    },
                ],
            },
            ..AppViewModel::default()
        };

        let lines = render(&view);
        let a = lines
            .iter()
            .position(|line| line.ends_with("/images/a.png"))
            .expect("cell a");
        let b = lines
            .iter()
            .position(|line| line.ends_with("/images/b.png"))
            .expect("cell b");
        assert!(a < b);
        assert!(lines.iter().any(|line| line.contains("background: black")));
    }

    #[test]
    fn status_and_classification_share_the_second_placeholder() {
        let view = AppViewModel {
            status_line: Some("Server Status: ok".to_string()),
            classification: Some("cat".to_string()),
            ..AppViewModel::default()
        };

        let lines = render(&view);
        assert!(lines
            .iter()
            .any(|line| line.contains("Server Status: ok") && line.contains("white")));
        assert!(lines
            .iter()
            .any(|line| line.contains("cat") && line.contains("black")));
    }

    #[test]
    fn empty_view_renders_no_cells_and_no_echo_section() {
        let lines = render(&AppViewModel::default());
        assert!(lines.iter().all(|line| !line.contains("[img")));
        assert!(lines.iter().all(|line| !line.contains("echo log")));
    }
}
