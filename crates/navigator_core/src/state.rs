use crate::msg::ScannedMessage;
use crate::registry::{ConversationKey, SeenRegistry};
use crate::view_model::{EntryRowView, PanelViewModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PanelEntry {
    signature: String,
    display_text: String,
    full_text: String,
    anchor_id: String,
    dom_index: usize,
}

impl From<ScannedMessage> for PanelEntry {
    fn from(item: ScannedMessage) -> Self {
        Self {
            signature: item.signature,
            display_text: item.display_text,
            full_text: item.full_text,
            anchor_id: item.anchor_id,
            dom_index: item.dom_index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    panel: PanelState,
    active_key: Option<ConversationKey>,
    entries: Vec<PanelEntry>,
    registry: SeenRegistry,
    /// The next scan batch replaces the rendered list instead of
    /// appending to it. Set when the panel opens.
    pending_rebuild: bool,
    /// The chat container never appeared; ignore all further input.
    inert: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> PanelViewModel {
        let visible = self.panel == PanelState::Open;
        let rows: Vec<EntryRowView> = self
            .entries
            .iter()
            .map(|entry| EntryRowView {
                display_text: entry.display_text.clone(),
                full_text: entry.full_text.clone(),
                signature: entry.signature.clone(),
            })
            .collect();
        PanelViewModel {
            placeholder: visible && rows.is_empty(),
            visible,
            rows,
            conversation: self.active_key.as_ref().map(|k| k.as_str().to_string()),
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is due, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn is_inert(&self) -> bool {
        self.inert
    }

    pub(crate) fn set_inert(&mut self) {
        self.inert = true;
    }

    pub(crate) fn panel_open(&self) -> bool {
        self.panel == PanelState::Open
    }

    pub(crate) fn active_key(&self) -> Option<&ConversationKey> {
        self.active_key.as_ref()
    }

    pub(crate) fn set_active_key(&mut self, key: ConversationKey) {
        self.active_key = Some(key);
    }

    pub(crate) fn open_panel(&mut self) {
        self.panel = PanelState::Open;
        self.entries.clear();
        self.pending_rebuild = true;
        self.dirty = true;
    }

    /// Hides the panel and clears the rendered list so the next open is a
    /// clean rebuild.
    pub(crate) fn close_panel(&mut self) {
        self.panel = PanelState::Closed;
        self.entries.clear();
        self.pending_rebuild = false;
        self.dirty = true;
    }

    pub(crate) fn take_pending_rebuild(&mut self) -> bool {
        std::mem::take(&mut self.pending_rebuild)
    }

    pub(crate) fn entry_target(&self, index: usize) -> Option<(String, usize)> {
        self.entries
            .get(index)
            .map(|entry| (entry.anchor_id.clone(), entry.dom_index))
    }

    /// Replaces the rendered list with the batch, one entry per unique
    /// signature in first-seen order, and marks every signature seen.
    pub(crate) fn rebuild_entries(&mut self, key: &ConversationKey, items: Vec<ScannedMessage>) {
        self.entries.clear();
        for item in items {
            if self.entries.iter().any(|e| e.signature == item.signature) {
                continue;
            }
            self.registry.mark_seen(key, [item.signature.clone()]);
            self.entries.push(item.into());
        }
        self.dirty = true;
    }

    /// Appends batch items whose signature has not been surfaced for this
    /// conversation yet, marking them seen.
    pub(crate) fn append_unseen(&mut self, key: &ConversationKey, items: Vec<ScannedMessage>) {
        for item in items {
            if self.registry.contains(key, &item.signature) {
                continue;
            }
            self.registry.mark_seen(key, [item.signature.clone()]);
            self.entries.push(item.into());
            self.dirty = true;
        }
    }

    /// Records batch signatures without touching the rendered list, so a
    /// later open does not replay already-observed history as "new".
    pub(crate) fn mark_seen_silently(&mut self, key: &ConversationKey, items: &[ScannedMessage]) {
        self.registry
            .mark_seen(key, items.iter().map(|item| item.signature.clone()));
    }

    /// Switches the active conversation: the old seen set is retained,
    /// the rendered list is dropped and the panel closes so the next open
    /// rebuilds cleanly under the new key.
    pub(crate) fn switch_conversation(&mut self, key: ConversationKey) {
        self.registry.ensure(&key);
        self.active_key = Some(key);
        self.entries.clear();
        self.pending_rebuild = false;
        if self.panel == PanelState::Open {
            self.panel = PanelState::Closed;
        }
        self.dirty = true;
    }
}
