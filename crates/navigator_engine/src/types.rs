/// One user message surfaced by a scan, in page order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageItem {
    /// Stable identifier derived from the normalized text, never from a
    /// host-supplied id (the page may re-render nodes and lose those).
    pub signature: String,
    /// Truncated preview for the panel row.
    pub display_text: String,
    pub full_text: String,
    /// Attribute value used to relocate the source element.
    pub anchor_id: String,
    /// Position of the node within the scanned batch; focus fallback
    /// when the anchor no longer resolves.
    pub dom_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The chat container appeared; watching has started.
    PageReady { address: String },
    /// The readiness probe gave up; the feature stays inert.
    PageUnavailable,
    /// Debounced scan result, with the address observed at scan time.
    ScanBatch {
        address: String,
        items: Vec<MessageItem>,
    },
    /// The low-frequency address poll saw a different address.
    AddressChanged { address: String },
}
