//! Clipboard integration.

use crate::error::Result;
use crate::pipeline::PlotResult;
use arboard::Clipboard;

/// Copy text to clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}

/// Copy a plot table, tab-separated so it pastes into a spreadsheet.
pub fn copy_plot(plot: &PlotResult) -> Result<()> {
    let text = plot.to_tsv();
    tracing::debug!("Copying {} bytes of plot data", text.len());
    copy_to_clipboard(&text)
}
