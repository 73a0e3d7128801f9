use navigator_core::PanelViewModel;

/// Renders the panel view as terminal text, the stand-in for the injected
/// sidebar element.
pub fn render(view: &PanelViewModel, highlighted: Option<usize>) -> String {
    let mut lines = Vec::new();

    match view.conversation.as_deref() {
        Some(key) => lines.push(format!("── navigator · {key} ──")),
        None => lines.push("── navigator ──".to_string()),
    }

    if !view.visible {
        lines.push("(panel closed)".to_string());
    } else if view.placeholder {
        lines.push("no messages yet".to_string());
    } else {
        for (index, row) in view.rows.iter().enumerate() {
            lines.push(format!("{:>3}. {}", index + 1, row.display_text));
        }
    }

    if let Some(dom_index) = highlighted {
        lines.push(format!("▶ highlighting message #{}", dom_index + 1));
    }

    lines.join("\n")
}
