//! Navigator engine: page observation and effect execution.
mod engine;
mod debounce;
mod normalize;
mod page;
mod probe;
mod scan;
mod types;

pub use engine::{EngineHandle, SharedPage, WatchSettings};
pub use debounce::Debouncer;
pub use normalize::{
    display_preview, normalize_message_text, signature, signature_prefix, DISPLAY_PREVIEW_CHARS,
    SIGNATURE_PREFIX_CHARS,
};
pub use page::{
    HostPage, MessageNode, PageError, SnapshotPage, CHAT_CONTAINER_SELECTOR, USER_MESSAGE_SELECTOR,
};
pub use probe::{wait_until, ProbeExhausted, ProbeSettings};
pub use scan::MessageScanner;
pub use types::{EngineEvent, MessageItem};
