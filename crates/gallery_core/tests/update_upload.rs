use std::path::PathBuf;
use std::sync::Once;

use gallery_core::{update, AppState, Effect, FileSelection, FlowError, Msg, PanelColor};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(gallery_logging::initialize_for_tests);
}

fn selection(name: &str) -> FileSelection {
    FileSelection {
        path: PathBuf::from(format!("/tmp/{name}")),
        name: name.to_string(),
        media_type: "image/png".to_string(),
    }
}

fn submit(state: AppState, files: Vec<FileSelection>) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::FilesChosen(files));
    update(state, Msg::UploadSubmitted)
}

fn is_diagnostic(effect: &Effect) -> bool {
    matches!(effect, Effect::LogDiagnostic { .. })
}

#[test]
fn submit_posts_every_selected_file() {
    init_logging();
    let state = AppState::new();
    let files = vec![selection("a.png"), selection("b.png"), selection("c.png")];

    let (state, effects) = submit(state, files.clone());

    assert_eq!(
        effects,
        vec![Effect::PostUpload {
            request_id: 1,
            files
        }]
    );
    assert!(state.view().upload_in_flight);
}

#[test]
fn submit_with_empty_selection_logs_and_sends_nothing() {
    init_logging();
    let state = AppState::new();

    let (state, effects) = update(state, Msg::UploadSubmitted);

    assert_eq!(effects.len(), 1);
    assert!(is_diagnostic(&effects[0]));
    assert!(!state.view().upload_in_flight);
}

#[test]
fn second_submit_while_in_flight_is_ignored() {
    init_logging();
    let state = AppState::new();
    let (state, _) = submit(state, vec![selection("a.png")]);

    let (state, effects) = update(state, Msg::UploadSubmitted);

    assert_eq!(effects.len(), 1);
    assert!(is_diagnostic(&effects[0]));
    assert!(state.view().upload_in_flight);
}

#[test]
fn successful_upload_replaces_gallery_contents() {
    init_logging();
    let state = AppState::new();
    let (state, _) = submit(state, vec![selection("a.png")]);
    let (state, _) = update(
        state,
        Msg::UploadFinished {
            request_id: 1,
            result: Ok(vec!["/images/a.png".to_string()]),
        },
    );

    // Second round: the placeholder must end with exactly the new cells.
    let (state, _) = submit(state, vec![selection("b.png"), selection("c.png")]);
    let (mut state, effects) = update(
        state,
        Msg::UploadFinished {
            request_id: 2,
            result: Ok(vec!["/images/b.png".to_string(), "/images/c.png".to_string()]),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.gallery.background, Some(PanelColor::Black));
    let sources: Vec<&str> = view
        .gallery
        .images
        .iter()
        .map(|cell| cell.source.as_str())
        .collect();
    assert_eq!(sources, vec!["/images/b.png", "/images/c.png"]);
    assert!(!view.upload_in_flight);
    assert!(state.consume_dirty());
}

#[test]
fn empty_url_list_clears_gallery_and_logs() {
    init_logging();
    let state = AppState::new();
    let (state, _) = submit(state, vec![selection("a.png")]);
    let (state, _) = update(
        state,
        Msg::UploadFinished {
            request_id: 1,
            result: Ok(vec!["/images/a.png".to_string()]),
        },
    );

    let (state, _) = submit(state, vec![selection("b.png")]);
    let (state, effects) = update(
        state,
        Msg::UploadFinished {
            request_id: 2,
            result: Ok(Vec::new()),
        },
    );

    assert_eq!(effects.len(), 1);
    assert!(is_diagnostic(&effects[0]));
    let view = state.view();
    assert!(view.gallery.images.is_empty());
    assert_eq!(view.gallery.background, Some(PanelColor::Black));
}

#[test]
fn failed_upload_leaves_gallery_untouched() {
    init_logging();
    let state = AppState::new();
    let (state, _) = submit(state, vec![selection("a.png")]);
    let (state, _) = update(
        state,
        Msg::UploadFinished {
            request_id: 1,
            result: Ok(vec!["/images/a.png".to_string()]),
        },
    );
    let gallery_before = state.view().gallery;

    let (state, _) = submit(state, vec![selection("b.png")]);
    let (state, effects) = update(
        state,
        Msg::UploadFinished {
            request_id: 2,
            result: Err(FlowError::new("http status 500")),
        },
    );

    assert_eq!(effects.len(), 1);
    assert!(is_diagnostic(&effects[0]));
    let view = state.view();
    assert_eq!(view.gallery, gallery_before);
    assert!(!view.upload_in_flight);
}

#[test]
fn stale_completion_is_dropped() {
    init_logging();
    let state = AppState::new();
    let (state, _) = submit(state, vec![selection("a.png")]);
    let (state, _) = update(
        state,
        Msg::UploadFinished {
            request_id: 1,
            result: Ok(vec!["/images/a.png".to_string()]),
        },
    );

    // A completion for a request that is no longer in flight must not render.
    let (state, effects) = update(
        state,
        Msg::UploadFinished {
            request_id: 1,
            result: Ok(vec!["/images/stale.png".to_string()]),
        },
    );

    assert_eq!(effects.len(), 1);
    assert!(is_diagnostic(&effects[0]));
    let sources: Vec<String> = state
        .view()
        .gallery
        .images
        .iter()
        .map(|cell| cell.source.clone())
        .collect();
    assert_eq!(sources, vec!["/images/a.png".to_string()]);
}
