use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// A scripted page session for the driver: the page the navigator
/// attaches to and the host/user activity to replay against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionScript {
    /// Initial page address.
    pub address: String,
    /// Initial page content; may lack the chat container so the
    /// readiness probe has something to wait for.
    pub html: String,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Step {
    /// Let the watcher's timers run.
    Wait { millis: u64 },
    /// Host re-render: replace the page content.
    Mutate { html: String },
    /// In-page navigation to another thread (no reload).
    Navigate { address: String, html: String },
    /// User activates the sidebar toggle.
    Toggle,
    /// User presses Escape.
    Escape,
    /// User clicks outside the panel.
    ClickOutside,
    /// User activates a panel entry (0-based).
    ActivateEntry { index: usize },
}

pub fn load_script(path: &Path) -> anyhow::Result<SessionScript> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read session script {}", path.display()))?;
    ron::from_str(&content)
        .with_context(|| format!("failed to parse session script {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::load_script;

    #[test]
    fn loads_a_well_formed_script() {
        let script = r#"(
            address: "https://chat.example.com/c/alpha",
            html: "<html><body></body></html>",
            steps: [
                Wait(millis: 500),
                Toggle,
                ActivateEntry(index: 0),
            ],
        )"#;
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.ron");
        std::fs::write(&path, script).expect("write script");

        let script = load_script(&path).expect("load script");
        assert_eq!(script.steps.len(), 3);
    }

    #[test]
    fn missing_script_is_reported_with_context() {
        let err = load_script(std::path::Path::new("no-such-session.ron")).unwrap_err();
        assert!(err.to_string().contains("no-such-session.ron"));
    }
}
