//! Capability interfaces the workflows drive.
//!
//! A workspace controller never owns widgets. The hosting UI implements the
//! capabilities a controller needs and forwards its lifecycle hooks to the
//! controller through [`WorkspaceLifecycle`].

/// Lifecycle hooks a hosting workspace forwards to its controller.
pub trait WorkspaceLifecycle {
    /// Data has been bound to the form (fires after every successful bind).
    fn on_data_bound(&mut self);

    /// The workspace is closing, by commit or by cancellation.
    fn on_teardown(&mut self);
}

/// The primary quantity input of a form ("amount to issue", "quantity to post").
pub trait PrimaryQuantityField {
    /// Focus the input and select its whole contents.
    fn focus_and_select_primary(&mut self);
}

/// The list of detail rows beside the main form.
pub trait DetailListSurface {
    fn refresh_detail_list(&mut self);

    fn set_detail_visible(&mut self, visible: bool);
}

/// Modal numeric-entry popup.
pub trait QuantityDialogSurface {
    fn show_dialog(&mut self);

    fn hide_dialog(&mut self);

    fn set_dialog_text(&mut self, text: &str);

    fn dialog_text(&self) -> String;

    fn focus_and_select_dialog_input(&mut self);
}

/// The menu/panel host containing the workspace.
pub trait HostMenu {
    /// Re-layout after a panel changed visibility.
    fn refresh_menu_layout(&mut self);
}

/// Everything the issue-material workspace needs from its host.
pub trait IssueMaterialSurface:
    PrimaryQuantityField + DetailListSurface + QuantityDialogSurface + HostMenu
{
}

impl<T> IssueMaterialSurface for T where
    T: PrimaryQuantityField + DetailListSurface + QuantityDialogSurface + HostMenu
{
}
