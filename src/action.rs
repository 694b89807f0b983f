/// A process-table row as it was rendered; the kill button carries it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRef {
    pub row_index: usize,
    pub pid: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    TogglePopup,
    HidePopup,
    Kill(RowRef),
    ConfirmKill,
    CancelKill,
    DismissWarning,
    Refresh,
    Quit,
}
