use std::collections::{HashMap, HashSet};

use url::Url;

/// Identifies one chat thread, derived from the page address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConversationKey(String);

impl ConversationKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Derives the conversation key for a page address.
///
/// Thread pages use `/c/<id>` paths; the id alone is the key there, so
/// host or query changes do not look like a thread switch. Any other
/// address keys on host + path with the trailing slash trimmed, and an
/// unparseable address falls back to the raw string.
pub fn conversation_key_from_address(address: &str) -> ConversationKey {
    let raw = address.trim();
    let Ok(parsed) = Url::parse(raw) else {
        return ConversationKey(raw.to_string());
    };

    if let Some(mut segments) = parsed.path_segments() {
        if let (Some("c"), Some(id)) = (segments.next(), segments.next()) {
            if !id.is_empty() {
                return ConversationKey(id.to_string());
            }
        }
    }

    let host = parsed.host_str().unwrap_or("");
    let path = parsed.path().trim_end_matches('/');
    ConversationKey(format!("{host}{path}"))
}

/// Per-conversation record of message signatures already surfaced.
///
/// Old sets are retained on conversation switch; the registry lives only
/// as long as the page session, which bounds its size.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SeenRegistry {
    sets: HashMap<ConversationKey, HashSet<String>>,
}

impl SeenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the seen set for a conversation, creating it if absent.
    pub fn ensure(&mut self, key: &ConversationKey) -> &mut HashSet<String> {
        self.sets.entry(key.clone()).or_default()
    }

    pub fn contains(&self, key: &ConversationKey, signature: &str) -> bool {
        self.sets
            .get(key)
            .is_some_and(|set| set.contains(signature))
    }

    pub fn mark_seen<I>(&mut self, key: &ConversationKey, signatures: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let set = self.ensure(key);
        for signature in signatures {
            set.insert(signature.into());
        }
    }

    pub fn seen_count(&self, key: &ConversationKey) -> usize {
        self.sets.get(key).map_or(0, HashSet::len)
    }
}

#[cfg(test)]
mod tests {
    use super::{conversation_key_from_address, SeenRegistry};

    #[test]
    fn thread_path_keys_on_id_segment() {
        let a = conversation_key_from_address("https://chat.example.com/c/abc123");
        let b = conversation_key_from_address("https://chat.example.com/c/abc123?ref=nav");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "abc123");
    }

    #[test]
    fn plain_path_keys_on_host_and_path() {
        let key = conversation_key_from_address("https://chat.example.com/inbox/");
        assert_eq!(key.as_str(), "chat.example.com/inbox");
    }

    #[test]
    fn unparseable_address_falls_back_to_raw() {
        let key = conversation_key_from_address("  not a url  ");
        assert_eq!(key.as_str(), "not a url");
    }

    #[test]
    fn seen_sets_are_scoped_per_conversation() {
        let a = conversation_key_from_address("https://chat.example.com/c/a");
        let b = conversation_key_from_address("https://chat.example.com/c/b");
        let mut registry = SeenRegistry::new();

        registry.mark_seen(&a, ["sig-1"]);
        assert!(registry.contains(&a, "sig-1"));
        assert!(!registry.contains(&b, "sig-1"));

        registry.mark_seen(&b, ["sig-1", "sig-2"]);
        assert_eq!(registry.seen_count(&a), 1);
        assert_eq!(registry.seen_count(&b), 2);
    }
}
