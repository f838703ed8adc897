use clipboard_rs::{Clipboard, ClipboardContext};

/// Put `text` on the system clipboard.
pub fn copy_text(text: &str) -> anyhow::Result<()> {
    let context = ClipboardContext::new()
        .map_err(|e| anyhow::anyhow!("Failed to create clipboard context: {}", e))?;
    context
        .set_text(text.to_string())
        .map_err(|e| anyhow::anyhow!("Failed to write clipboard: {}", e))
}
