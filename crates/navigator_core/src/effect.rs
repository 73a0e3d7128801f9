#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the engine for an immediate scan of the page.
    RequestScan,
    /// Scroll the source message into view and highlight it.
    FocusMessage { anchor_id: String, dom_index: usize },
}
