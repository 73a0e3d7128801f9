use navigator_logging::nav_debug;

use crate::normalize::{
    display_preview, normalize_message_text, signature as compute_signature, signature_prefix,
};
use crate::page::HostPage;
use crate::types::MessageItem;

/// Derives the ordered, deduplicated message list from the page's
/// user-message nodes.
#[derive(Debug, Default)]
pub struct MessageScanner;

impl MessageScanner {
    pub fn new() -> Self {
        Self
    }

    pub fn scan(&self, page: &mut dyn HostPage) -> Vec<MessageItem> {
        let mut accepted_prefixes: Vec<String> = Vec::new();
        let mut items: Vec<MessageItem> = Vec::new();

        for node in page.user_messages() {
            let trimmed = node.text.trim();
            if trimmed.is_empty() {
                continue;
            }

            let normalized = normalize_message_text(trimmed);
            let prefix = signature_prefix(&normalized).to_string();

            // Near-duplicate merge: a partially streamed re-render of an
            // accepted message (either side being the shorter) collapses
            // into the first-seen entry.
            if accepted_prefixes
                .iter()
                .any(|kept| kept.starts_with(&prefix) || prefix.starts_with(kept.as_str()))
            {
                continue;
            }

            let signature = node
                .attached_signature
                .clone()
                .unwrap_or_else(|| compute_signature(&normalized));
            let anchor_id = node
                .attached_anchor
                .clone()
                .unwrap_or_else(|| format!("nav-msg-{signature}"));

            if let Err(err) = page.tag_message(node.dom_index, &anchor_id, &signature) {
                nav_debug!("skipping tag for message node {}: {}", node.dom_index, err);
            }

            accepted_prefixes.push(prefix);
            items.push(MessageItem {
                signature,
                display_text: display_preview(trimmed),
                full_text: trimmed.to_string(),
                anchor_id,
                dom_index: node.dom_index,
            });
        }

        items
    }
}
