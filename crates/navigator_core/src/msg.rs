/// One user message observed in the page, already normalized and signed
/// by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedMessage {
    pub signature: String,
    pub display_text: String,
    pub full_text: String,
    pub anchor_id: String,
    /// Position of the source node in the scanned batch, used as the
    /// focus fallback when the anchor id no longer resolves.
    pub dom_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User activated the sidebar toggle control.
    ToggleActivated,
    /// Escape pressed while the panel is open.
    EscapePressed,
    /// Click landed outside the panel and the toggle control.
    OutsideClicked,
    /// User activated a rendered entry (0-based row index).
    EntryActivated { index: usize },
    /// Debounced watcher batch from the engine, with the page address
    /// observed at scan time.
    ScanCompleted {
        address: String,
        items: Vec<ScannedMessage>,
    },
    /// Low-frequency address poll result.
    AddressObserved { address: String },
    /// The chat container was found; the feature is live.
    PageReady { address: String },
    /// The readiness probe exhausted its attempt budget.
    PageUnavailable,
    /// Fallback for placeholder wiring.
    NoOp,
}
