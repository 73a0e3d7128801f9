use crate::registry::conversation_key_from_address;
use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    if state.is_inert() {
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::PageReady { address } => {
            state.set_active_key(conversation_key_from_address(&address));
            Vec::new()
        }
        Msg::PageUnavailable => {
            state.set_inert();
            Vec::new()
        }
        Msg::ToggleActivated => {
            if state.panel_open() {
                state.close_panel();
                Vec::new()
            } else {
                state.open_panel();
                vec![Effect::RequestScan]
            }
        }
        Msg::EscapePressed | Msg::OutsideClicked => {
            if state.panel_open() {
                state.close_panel();
            }
            Vec::new()
        }
        Msg::EntryActivated { index } => match state.entry_target(index) {
            Some((anchor_id, dom_index)) => vec![Effect::FocusMessage {
                anchor_id,
                dom_index,
            }],
            None => Vec::new(),
        },
        Msg::ScanCompleted { address, items } => {
            let key = conversation_key_from_address(&address);
            // Batches observed under a retired address are stale; the
            // next scan re-derives everything under the new key.
            if state.active_key() != Some(&key) {
                return (state, Vec::new());
            }
            if !state.panel_open() {
                state.mark_seen_silently(&key, &items);
            } else if state.take_pending_rebuild() {
                state.rebuild_entries(&key, items);
            } else {
                state.append_unseen(&key, items);
            }
            Vec::new()
        }
        Msg::AddressObserved { address } => {
            let key = conversation_key_from_address(&address);
            if state.active_key() != Some(&key) {
                state.switch_conversation(key);
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
