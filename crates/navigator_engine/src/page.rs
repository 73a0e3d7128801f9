use std::collections::HashMap;

use scraper::{Html, Selector};
use thiserror::Error;

/// Selector for the host page's designated user-message nodes. No generic
/// fallback heuristics: anything else risks false positives.
pub const USER_MESSAGE_SELECTOR: &str = r#"[data-message-author-role="user"]"#;

/// Selector for the chat container the readiness probe waits for.
pub const CHAT_CONTAINER_SELECTOR: &str = "main";

const ANCHOR_ATTR: &str = "data-nav-anchor";
const SIGNATURE_ATTR: &str = "data-nav-signature";

/// One candidate message node as the page reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageNode {
    pub dom_index: usize,
    pub text: String,
    /// Signature attribute from an earlier scan, if the node still has it.
    pub attached_signature: Option<String>,
    pub attached_anchor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("message node {dom_index} is gone")]
    MissingNode { dom_index: usize },
    #[error("no message matches anchor {anchor_id:?}")]
    AnchorNotFound { anchor_id: String },
}

/// The navigator's view of the host page.
///
/// The live-DOM details stay behind this seam so the watcher and scanner
/// can be driven by snapshot-backed or fake pages in tests.
pub trait HostPage: Send {
    /// Current page address.
    fn address(&self) -> String;

    /// Monotonic counter bumped by every content change; the watcher's
    /// mutation signal.
    fn revision(&self) -> u64;

    /// Whether the chat container exists yet.
    fn container_ready(&self) -> bool;

    /// The user-message nodes currently in the page, in document order.
    fn user_messages(&self) -> Vec<MessageNode>;

    /// Attaches anchor and signature attributes to a message node.
    /// Best-effort for callers: a failure must not abort a scan.
    fn tag_message(
        &mut self,
        dom_index: usize,
        anchor_id: &str,
        signature: &str,
    ) -> Result<(), PageError>;

    /// Scrolls the message into view and applies the highlight. Resolves
    /// the anchor id first and falls back to the retained position.
    fn focus_message(&mut self, anchor_id: &str, dom_index: usize) -> Result<(), PageError>;

    /// Reverts the focus highlight.
    fn clear_highlight(&mut self);
}

/// `HostPage` backed by HTML snapshots parsed with `scraper`.
///
/// Tags live in a side table that a snapshot replacement clears, the way
/// a host re-render drops attributes set on live nodes.
#[derive(Debug)]
pub struct SnapshotPage {
    address: String,
    html: String,
    revision: u64,
    tags: HashMap<usize, (String, String)>,
    highlighted: Option<usize>,
}

impl SnapshotPage {
    pub fn new(address: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            html: html.into(),
            revision: 0,
            tags: HashMap::new(),
            highlighted: None,
        }
    }

    /// Replaces the page content, as a host re-render would: the revision
    /// bumps and previously attached tags are lost.
    pub fn set_snapshot(&mut self, html: impl Into<String>) {
        self.html = html.into();
        self.revision += 1;
        self.tags.clear();
        self.highlighted = None;
    }

    /// In-page navigation: new address, new content, no reload.
    pub fn navigate(&mut self, address: impl Into<String>, html: impl Into<String>) {
        self.address = address.into();
        self.set_snapshot(html);
    }

    /// Index of the currently highlighted message, if any.
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    fn message_texts(&self) -> Vec<(String, Option<String>, Option<String>)> {
        let document = Html::parse_document(&self.html);
        let Some(selector) = Selector::parse(USER_MESSAGE_SELECTOR).ok() else {
            return Vec::new();
        };
        document
            .select(&selector)
            .map(|element| {
                let text = element.text().collect::<String>();
                let signature = element.value().attr(SIGNATURE_ATTR).map(str::to_string);
                let anchor = element.value().attr(ANCHOR_ATTR).map(str::to_string);
                (text, signature, anchor)
            })
            .collect()
    }
}

impl HostPage for SnapshotPage {
    fn address(&self) -> String {
        self.address.clone()
    }

    fn revision(&self) -> u64 {
        self.revision
    }

    fn container_ready(&self) -> bool {
        let document = Html::parse_document(&self.html);
        Selector::parse(CHAT_CONTAINER_SELECTOR)
            .ok()
            .is_some_and(|selector| document.select(&selector).next().is_some())
    }

    fn user_messages(&self) -> Vec<MessageNode> {
        self.message_texts()
            .into_iter()
            .enumerate()
            .map(|(dom_index, (text, signature, anchor))| {
                let tagged = self.tags.get(&dom_index);
                MessageNode {
                    dom_index,
                    text,
                    attached_signature: tagged
                        .map(|(_, sig)| sig.clone())
                        .or(signature),
                    attached_anchor: tagged.map(|(anchor, _)| anchor.clone()).or(anchor),
                }
            })
            .collect()
    }

    fn tag_message(
        &mut self,
        dom_index: usize,
        anchor_id: &str,
        signature: &str,
    ) -> Result<(), PageError> {
        if dom_index >= self.message_texts().len() {
            return Err(PageError::MissingNode { dom_index });
        }
        self.tags
            .insert(dom_index, (anchor_id.to_string(), signature.to_string()));
        Ok(())
    }

    fn focus_message(&mut self, anchor_id: &str, dom_index: usize) -> Result<(), PageError> {
        let nodes = self.user_messages();
        let by_anchor = nodes
            .iter()
            .find(|node| node.attached_anchor.as_deref() == Some(anchor_id))
            .map(|node| node.dom_index);

        let target = by_anchor.or_else(|| (dom_index < nodes.len()).then_some(dom_index));
        match target {
            Some(index) => {
                self.highlighted = Some(index);
                Ok(())
            }
            None => Err(PageError::AnchorNotFound {
                anchor_id: anchor_id.to_string(),
            }),
        }
    }

    fn clear_highlight(&mut self) {
        self.highlighted = None;
    }
}
