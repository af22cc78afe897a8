use crate::app::{KioskError, Result};

/// Place `text` verbatim on the system clipboard.
///
/// Failures (no clipboard in this environment, permission denied) are
/// mapped to [`KioskError::Clipboard`]; callers surface them as a
/// toast and nothing else.
pub fn copy(text: &str) -> Result<()> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| KioskError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| KioskError::Clipboard(e.to_string()))
}
