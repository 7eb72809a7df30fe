//! Terminal setup and restoration
//!
//! Prompts take over the terminal only while they are open. A
//! [`TerminalSession`] enters raw mode and the alternate screen, and restores
//! both when dropped, including on early returns through `?`.

use std::time::Duration;

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::DefaultTerminal;

use applaunch_core::prelude::*;

/// How long prompts wait for a key before redrawing
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Raw-mode terminal owned by one prompt
pub struct TerminalSession {
    terminal: DefaultTerminal,
}

impl TerminalSession {
    pub fn start() -> Result<Self> {
        let terminal = ratatui::try_init().map_err(|e| Error::terminal(e.to_string()))?;
        Ok(Self { terminal })
    }

    pub fn terminal(&mut self) -> &mut DefaultTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = ratatui::try_restore() {
            warn!("Failed to restore terminal: {}", e);
        }
    }
}

/// Install a panic hook that restores the terminal
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::try_restore();
        original_hook(panic_info);
    }));
}

/// Center a rectangle within another rectangle
pub fn center_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center);

    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

/// Modal width for `content` columns
///
/// At least 60% of the screen, kept within 40..=80 columns and the screen.
pub fn modal_width(content: usize, area: Rect) -> u16 {
    let wanted = u16::try_from(content).unwrap_or(u16::MAX);
    let share = u16::try_from(u32::from(area.width) * 60 / 100).unwrap_or(area.width);
    wanted.max(share).clamp(40, 80).min(area.width)
}

/// Modal height for `rows` lines, leaving a two-line margin
pub fn modal_height(rows: usize, area: Rect) -> u16 {
    u16::try_from(rows)
        .unwrap_or(u16::MAX)
        .min(area.height.saturating_sub(2))
}
