//! Navigator core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod registry;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{Msg, ScannedMessage};
pub use registry::{conversation_key_from_address, ConversationKey, SeenRegistry};
pub use state::{AppState, PanelState};
pub use update::update;
pub use view_model::{EntryRowView, PanelViewModel};
