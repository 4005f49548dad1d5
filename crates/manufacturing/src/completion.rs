/// Outcome reported to whoever opened a workspace.
pub enum Completion<'a, W> {
    /// The record validated; the caller continues with the workspace's state.
    Committed(&'a W),
    /// The workspace closed with uncommitted changes.
    Cancelled,
}

impl<W> Completion<'_, W> {
    pub fn is_committed(&self) -> bool {
        matches!(self, Completion::Committed(_))
    }
}

impl<W> core::fmt::Debug for Completion<'_, W> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Completion::Committed(_) => f.write_str("Committed"),
            Completion::Cancelled => f.write_str("Cancelled"),
        }
    }
}

/// Callback registered by the opener of a workspace.
pub type CompletionCallback<W> = Box<dyn FnMut(Completion<'_, W>)>;

