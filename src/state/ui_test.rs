use super::*;

#[test]
fn ui_state_default_has_no_dialog() {
    assert!(UiState::default().share_message.is_none());
}

#[test]
fn open_and_close_share_dialog() {
    let mut ui = UiState::default();
    ui.open_share("https://example.com/articles/1");
    assert_eq!(ui.share_message.as_deref(), Some("https://example.com/articles/1"));
    ui.close_share();
    assert!(ui.share_message.is_none());
}
