#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PanelViewModel {
    pub visible: bool,
    pub rows: Vec<EntryRowView>,
    /// Panel is open with nothing to list; render "no messages yet"
    /// instead of an empty, ambiguous panel.
    pub placeholder: bool,
    pub conversation: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRowView {
    pub display_text: String,
    pub full_text: String,
    pub signature: String,
}
