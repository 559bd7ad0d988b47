//! Event handler

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

use super::keymap::{text_input, DefaultKeymap};
use crate::message::{AppMessage, ContentMessage, FormMessage, ModalMessage, NavigationMessage};
use crate::model::{App, Modal, Page, RoleFormRow};

/// Wait up to `timeout` for a terminal event
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Translate a terminal event into a message
pub fn handle_event(event: Event, app: &App) -> AppMessage {
    match event {
        Event::Key(key_event) => handle_key_event(key_event, app),
        // Resize redraws on the next loop iteration
        _ => AppMessage::Noop,
    }
}

fn handle_key_event(key: KeyEvent, app: &App) -> AppMessage {
    // Only presses; Windows terminals also report releases
    if key.kind != KeyEventKind::Press {
        return AppMessage::Noop;
    }

    if app.modal.is_open() {
        return handle_modal_keys(key, app);
    }

    if DefaultKeymap::FORCE_QUIT.matches(&key) {
        return AppMessage::Quit;
    }

    if app.current_page.is_detail_page() {
        return handle_form_keys(key, app);
    }

    if app.focus.is_content() && is_filtering(app) {
        return handle_filter_keys(key);
    }

    if DefaultKeymap::QUIT.matches(&key) {
        return AppMessage::Quit;
    }
    if DefaultKeymap::HELP.matches(&key) || text_input(&key) == Some('?') {
        return AppMessage::ShowHelp;
    }
    if DefaultKeymap::REFRESH.matches(&key) {
        return AppMessage::Refresh;
    }
    if DefaultKeymap::BACK.matches(&key) {
        return AppMessage::GoBack;
    }
    if DefaultKeymap::TOGGLE_FOCUS.matches(&key) {
        return AppMessage::ToggleFocus;
    }

    if app.focus.is_navigation() {
        handle_navigation_keys(key)
    } else {
        handle_content_keys(key, app)
    }
}

fn is_filtering(app: &App) -> bool {
    match app.current_page {
        Page::CleanupPolicies => app.cleanup_policies.list.filtering,
        Page::Roles => app.roles.list.filtering,
        Page::LdapServers => app.ldap_servers.filtering,
        _ => false,
    }
}

// ========== Navigation panel ==========

fn handle_navigation_keys(key: KeyEvent) -> AppMessage {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => AppMessage::Navigation(NavigationMessage::SelectPrevious),
        KeyCode::Down | KeyCode::Char('j') => AppMessage::Navigation(NavigationMessage::SelectNext),
        KeyCode::Enter => AppMessage::Navigation(NavigationMessage::Confirm),
        KeyCode::Home => AppMessage::Navigation(NavigationMessage::SelectFirst),
        KeyCode::End => AppMessage::Navigation(NavigationMessage::SelectLast),
        _ => AppMessage::Noop,
    }
}

// ========== List pages ==========

fn handle_content_keys(key: KeyEvent, app: &App) -> AppMessage {
    if app.current_page == Page::Home {
        return AppMessage::Noop;
    }

    if DefaultKeymap::ACTION_ADD.matches(&key) {
        return AppMessage::Content(ContentMessage::Add);
    }
    if DefaultKeymap::ACTION_DELETE.matches(&key) {
        return AppMessage::Content(ContentMessage::Delete);
    }
    if DefaultKeymap::FILTER.matches(&key) {
        return AppMessage::Content(ContentMessage::StartFilter);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => AppMessage::Content(ContentMessage::SelectPrevious),
        KeyCode::Down | KeyCode::Char('j') => AppMessage::Content(ContentMessage::SelectNext),
        KeyCode::PageDown | KeyCode::Right => AppMessage::Content(ContentMessage::NextPage),
        KeyCode::PageUp | KeyCode::Left => AppMessage::Content(ContentMessage::PreviousPage),
        KeyCode::Enter => AppMessage::Content(ContentMessage::Edit),
        _ => AppMessage::Noop,
    }
}

fn handle_filter_keys(key: KeyEvent) -> AppMessage {
    match key.code {
        KeyCode::Enter => AppMessage::Content(ContentMessage::FinishFilter),
        KeyCode::Esc => AppMessage::Content(ContentMessage::ClearFilter),
        KeyCode::Backspace => AppMessage::Content(ContentMessage::FilterBackspace),
        _ => match text_input(&key) {
            Some(ch) => AppMessage::Content(ContentMessage::FilterInput(ch)),
            None => AppMessage::Noop,
        },
    }
}

// ========== Form pages ==========

fn handle_form_keys(key: KeyEvent, app: &App) -> AppMessage {
    if DefaultKeymap::BACK.matches(&key) {
        return AppMessage::GoBack;
    }
    if DefaultKeymap::QUIT.matches(&key) {
        return AppMessage::Quit;
    }
    if DefaultKeymap::HELP.matches(&key) {
        return AppMessage::ShowHelp;
    }
    if DefaultKeymap::REFRESH.matches(&key) {
        return AppMessage::Refresh;
    }
    if DefaultKeymap::FORM_SAVE.matches(&key) {
        return AppMessage::Form(FormMessage::Save);
    }
    if DefaultKeymap::ACTION_DELETE.matches(&key) {
        return AppMessage::Form(FormMessage::Delete);
    }
    if DefaultKeymap::FORM_RESET.matches(&key) {
        return AppMessage::Form(FormMessage::Reset);
    }
    if app.current_page == Page::RoleForm && DefaultKeymap::FORM_SELECT_ROLES.matches(&key) {
        return AppMessage::Form(FormMessage::SelectRoles);
    }

    let on_roles_row = app.current_page == Page::RoleForm
        && app
            .roles
            .form
            .as_ref()
            .is_some_and(|form| form.focus == RoleFormRow::Roles);
    let on_checkbox = app.current_page == Page::CleanupPolicyForm
        && app
            .cleanup_policies
            .form
            .as_ref()
            .is_some_and(|form| form.focus.has_checkbox());

    match key.code {
        KeyCode::Tab | KeyCode::Down => AppMessage::Form(FormMessage::NextField),
        KeyCode::BackTab | KeyCode::Up => AppMessage::Form(FormMessage::PrevField),
        KeyCode::Left => AppMessage::Form(FormMessage::PrevOption),
        KeyCode::Right => AppMessage::Form(FormMessage::NextOption),
        KeyCode::Backspace => AppMessage::Form(FormMessage::Backspace),
        KeyCode::Enter if on_roles_row => AppMessage::Form(FormMessage::SelectRoles),
        KeyCode::Enter => AppMessage::Form(FormMessage::NextField),
        KeyCode::Char(' ') if on_roles_row => AppMessage::Form(FormMessage::SelectRoles),
        KeyCode::Char(' ') if on_checkbox => AppMessage::Form(FormMessage::Toggle),
        _ => match text_input(&key) {
            Some(ch) => AppMessage::Form(FormMessage::Input(ch)),
            None => AppMessage::Noop,
        },
    }
}

// ========== Modals ==========

fn handle_modal_keys(key: KeyEvent, app: &App) -> AppMessage {
    if DefaultKeymap::FORCE_QUIT.matches(&key) || DefaultKeymap::BACK.matches(&key) {
        return AppMessage::Modal(ModalMessage::Close);
    }

    let Some(ref modal) = app.modal.active else {
        return AppMessage::Noop;
    };
    match modal {
        Modal::ConfirmDelete { .. } => handle_confirm_delete_keys(key),
        Modal::RoleSelection { filter_focused, .. } => handle_role_selection_keys(key, *filter_focused),
        Modal::Help | Modal::Error { .. } => match key.code {
            KeyCode::Enter => AppMessage::Modal(ModalMessage::Close),
            _ => AppMessage::Noop,
        },
    }
}

fn handle_confirm_delete_keys(key: KeyEvent) -> AppMessage {
    match key.code {
        KeyCode::Tab | KeyCode::Left | KeyCode::Right => AppMessage::Modal(ModalMessage::ToggleDeleteFocus),
        KeyCode::Enter => AppMessage::Modal(ModalMessage::Confirm),
        _ => AppMessage::Noop,
    }
}

fn handle_role_selection_keys(key: KeyEvent, filter_focused: bool) -> AppMessage {
    match key.code {
        KeyCode::Tab | KeyCode::BackTab => AppMessage::Modal(ModalMessage::ToggleFilterFocus),
        KeyCode::Enter => AppMessage::Modal(ModalMessage::Confirm),
        KeyCode::Up => AppMessage::Modal(ModalMessage::CursorUp),
        KeyCode::Down => AppMessage::Modal(ModalMessage::CursorDown),
        KeyCode::PageDown => AppMessage::Modal(ModalMessage::NextPage),
        KeyCode::PageUp => AppMessage::Modal(ModalMessage::PreviousPage),
        KeyCode::Backspace if filter_focused => AppMessage::Modal(ModalMessage::Backspace),
        _ if filter_focused => match text_input(&key) {
            Some(ch) => AppMessage::Modal(ModalMessage::Input(ch)),
            None => AppMessage::Noop,
        },
        KeyCode::Char(' ') => AppMessage::Modal(ModalMessage::ToggleRow),
        KeyCode::Char('k') => AppMessage::Modal(ModalMessage::CursorUp),
        KeyCode::Char('j') => AppMessage::Modal(ModalMessage::CursorDown),
        KeyCode::Right => AppMessage::Modal(ModalMessage::NextPage),
        KeyCode::Left => AppMessage::Modal(ModalMessage::PreviousPage),
        _ => AppMessage::Noop,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use nxrm_admin_core::FeatureFlags;
    use tokio::sync::mpsc;

    use super::*;
    use crate::backend::Backend;
    use crate::model::FocusPanel;

    fn app() -> App {
        let (tx, _rx) = mpsc::unbounded_channel();
        App::new(Backend::demo(FeatureFlags::default()), tx)
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn press_with(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn global_keys() {
        let app = app();
        assert!(matches!(
            handle_event(press_with(KeyCode::Char('c'), KeyModifiers::CONTROL), &app),
            AppMessage::Quit
        ));
        assert!(matches!(handle_event(press(KeyCode::Char('?')), &app), AppMessage::ShowHelp));
        assert!(matches!(handle_event(press(KeyCode::Tab), &app), AppMessage::ToggleFocus));
        assert!(matches!(
            handle_event(press_with(KeyCode::Char('r'), KeyModifiers::CONTROL), &app),
            AppMessage::Refresh
        ));
    }

    #[test]
    fn release_events_are_ignored() {
        let app = app();
        let mut key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        key.kind = KeyEventKind::Release;
        assert!(matches!(handle_event(Event::Key(key), &app), AppMessage::Noop));
    }

    #[test]
    fn navigation_panel_keys() {
        let app = app();
        assert!(matches!(
            handle_event(press(KeyCode::Char('j')), &app),
            AppMessage::Navigation(NavigationMessage::SelectNext)
        ));
        assert!(matches!(
            handle_event(press(KeyCode::Enter), &app),
            AppMessage::Navigation(NavigationMessage::Confirm)
        ));
    }

    #[test]
    fn list_keys_and_filter_typing() {
        let mut app = app();
        app.current_page = Page::LdapServers;
        app.focus = FocusPanel::Content;

        assert!(matches!(
            handle_event(press(KeyCode::Char('/')), &app),
            AppMessage::Content(ContentMessage::StartFilter)
        ));
        assert!(matches!(
            handle_event(press_with(KeyCode::Char('d'), KeyModifiers::ALT), &app),
            AppMessage::Content(ContentMessage::Delete)
        ));
        assert!(matches!(
            handle_event(press(KeyCode::PageDown), &app),
            AppMessage::Content(ContentMessage::NextPage)
        ));

        app.ldap_servers.filtering = true;
        assert!(matches!(
            handle_event(press(KeyCode::Char('?')), &app),
            AppMessage::Content(ContentMessage::FilterInput('?'))
        ));
        assert!(matches!(
            handle_event(press_with(KeyCode::Char('W'), KeyModifiers::SHIFT), &app),
            AppMessage::Content(ContentMessage::FilterInput('W'))
        ));
        assert!(matches!(
            handle_event(press(KeyCode::Esc), &app),
            AppMessage::Content(ContentMessage::ClearFilter)
        ));
    }

    #[test]
    fn help_modal_takes_all_keys() {
        let mut app = app();
        app.modal.show_help();
        assert!(matches!(handle_event(press(KeyCode::Char('q')), &app), AppMessage::Noop));
        assert!(matches!(
            handle_event(press(KeyCode::Esc), &app),
            AppMessage::Modal(ModalMessage::Close)
        ));
    }

    #[test]
    fn role_selection_keys_follow_filter_focus() {
        assert!(matches!(
            handle_role_selection_keys(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE), true),
            AppMessage::Modal(ModalMessage::Input(' '))
        ));
        assert!(matches!(
            handle_role_selection_keys(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE), false),
            AppMessage::Modal(ModalMessage::ToggleRow)
        ));
        assert!(matches!(
            handle_role_selection_keys(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE), false),
            AppMessage::Noop
        ));
    }
}
