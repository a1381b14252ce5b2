//! Modal and sidebar visibility as explicit state.
//!
//! The open/closed state of each overlay panel lives here; markup classes
//! are a pure projection of it via [`UiState::classes`], never the state
//! itself. At most one panel is open at a time, and the shared overlay and
//! body scroll-lock follow whichever panel that is.

use crate::catalog::{CategoryFilter, SortKey};

/// An overlay UI panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    CartSidebar,
    AuthModal,
}

/// Which form the auth modal shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthTab {
    #[default]
    Login,
    Register,
}

/// Transient UI visibility state, plus the grid's browse preferences.
#[derive(Debug, Default)]
pub struct UiState {
    open: Option<ModalKind>,
    auth_tab: AuthTab,
    auth_error: Option<String>,
    filter: CategoryFilter,
    sort: SortKey,
}

/// Markup class flags derived from [`UiState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiClasses {
    pub cart_sidebar_open: bool,
    pub auth_modal_active: bool,
    pub overlay_active: bool,
    pub body_no_scroll: bool,
}

impl UiState {
    /// Create the initial state: everything closed, login tab active.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently open panel, if any.
    #[must_use]
    pub const fn open(&self) -> Option<ModalKind> {
        self.open
    }

    /// Whether `kind` is the open panel.
    #[must_use]
    pub fn is_open(&self, kind: ModalKind) -> bool {
        self.open == Some(kind)
    }

    /// Toggle `kind`: close it if it is open, otherwise close whatever else
    /// is open and open it.
    pub fn toggle(&mut self, kind: ModalKind) {
        if self.is_open(kind) {
            self.close_all();
        } else {
            self.close_all();
            self.open = Some(kind);
        }
    }

    /// Force every panel closed and clear transient form errors.
    pub fn close_all(&mut self) {
        self.open = None;
        self.auth_error = None;
    }

    /// The auth modal's active tab.
    #[must_use]
    pub const fn auth_tab(&self) -> AuthTab {
        self.auth_tab
    }

    /// Switch the auth modal to `tab`. Switching clears any displayed form
    /// error; re-selecting the active tab is a no-op.
    pub fn switch_auth_tab(&mut self, tab: AuthTab) {
        if self.auth_tab == tab {
            return;
        }
        self.auth_tab = tab;
        self.auth_error = None;
    }

    /// The error message the active auth form displays, if any.
    #[must_use]
    pub fn auth_error(&self) -> Option<&str> {
        self.auth_error.as_deref()
    }

    /// Display `message` in the active auth form.
    pub fn set_auth_error(&mut self, message: impl Into<String>) {
        self.auth_error = Some(message.into());
    }

    /// The grid's active category filter.
    #[must_use]
    pub const fn filter(&self) -> CategoryFilter {
        self.filter
    }

    /// Set the grid's category filter.
    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    /// The grid's active sort order.
    #[must_use]
    pub const fn sort(&self) -> SortKey {
        self.sort
    }

    /// Set the grid's sort order.
    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    /// Project visibility state into markup class flags.
    #[must_use]
    pub fn classes(&self) -> UiClasses {
        let any_open = self.open.is_some();
        UiClasses {
            cart_sidebar_open: self.is_open(ModalKind::CartSidebar),
            auth_modal_active: self.is_open(ModalKind::AuthModal),
            overlay_active: any_open,
            body_no_scroll: any_open,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_state() {
        let mut ui = UiState::new();
        assert_eq!(ui.open(), None);

        ui.toggle(ModalKind::CartSidebar);
        assert!(ui.is_open(ModalKind::CartSidebar));

        ui.toggle(ModalKind::CartSidebar);
        assert_eq!(ui.open(), None);
    }

    #[test]
    fn test_toggle_closes_other_panel_first() {
        let mut ui = UiState::new();
        ui.toggle(ModalKind::CartSidebar);
        ui.toggle(ModalKind::AuthModal);

        assert!(ui.is_open(ModalKind::AuthModal));
        assert!(!ui.is_open(ModalKind::CartSidebar));
    }

    #[test]
    fn test_close_all_from_any_state() {
        let mut ui = UiState::new();
        ui.close_all();
        assert_eq!(ui.open(), None);

        ui.toggle(ModalKind::AuthModal);
        ui.set_auth_error("nope");
        ui.close_all();
        assert_eq!(ui.open(), None);
        assert_eq!(ui.auth_error(), None);
    }

    #[test]
    fn test_switch_tab_clears_error() {
        let mut ui = UiState::new();
        ui.set_auth_error("bad password");

        // Re-selecting the active tab keeps the error.
        ui.switch_auth_tab(AuthTab::Login);
        assert_eq!(ui.auth_error(), Some("bad password"));

        ui.switch_auth_tab(AuthTab::Register);
        assert_eq!(ui.auth_tab(), AuthTab::Register);
        assert_eq!(ui.auth_error(), None);
    }

    #[test]
    fn test_classes_projection() {
        let mut ui = UiState::new();
        let closed = ui.classes();
        assert!(!closed.overlay_active);
        assert!(!closed.body_no_scroll);
        assert!(!closed.cart_sidebar_open);
        assert!(!closed.auth_modal_active);

        ui.toggle(ModalKind::CartSidebar);
        let open = ui.classes();
        assert!(open.cart_sidebar_open);
        assert!(!open.auth_modal_active);
        assert!(open.overlay_active);
        assert!(open.body_no_scroll);
    }
}
