//! Single-choice picker
//!
//! A Ratatui modal listing the candidate devices. Runs its own short-lived
//! terminal session and restores the terminal before returning.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout},
    text::{Line, Span},
    widgets::{Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use applaunch_core::prelude::*;

use crate::terminal::{center_rect, modal_height, modal_width, TerminalSession, POLL_INTERVAL};
use crate::theme::styles;

/// Items reachable through the 1-9 shortcuts
const QUICK_SELECT_LIMIT: usize = 9;

/// What a key press did to the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerAction {
    Selected(usize),
    Cancelled,
}

/// State for the picker UI
pub struct PickerState {
    /// Index of currently highlighted item
    selected: usize,
    /// List widget state
    list_state: ListState,
}

impl Default for PickerState {
    fn default() -> Self {
        Self::new()
    }
}

impl PickerState {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            selected: 0,
            list_state,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    fn select_next(&mut self, max: usize) {
        if self.selected < max.saturating_sub(1) {
            self.selected += 1;
            self.list_state.select(Some(self.selected));
        }
    }

    fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.list_state.select(Some(self.selected));
        }
    }

    /// Apply a key press to a list of `len` items
    pub fn handle_key(
        &mut self,
        code: KeyCode,
        modifiers: KeyModifiers,
        len: usize,
    ) -> Option<PickerAction> {
        if is_cancel_key(code, modifiers) {
            return Some(PickerAction::Cancelled);
        }

        match code {
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(len),
            KeyCode::Enter => return Some(PickerAction::Selected(self.selected)),
            KeyCode::Char(c) => {
                if let Some(index) = validate_selection(c, len) {
                    self.selected = index;
                    self.list_state.select(Some(index));
                    return Some(PickerAction::Selected(index));
                }
            }
            _ => {}
        }
        None
    }
}

/// Show the picker and wait for a choice
///
/// Returns `Ok(None)` when `items` is empty or the picker is dismissed.
pub fn pick(title: &str, items: &[String]) -> Result<Option<String>> {
    if items.is_empty() {
        return Ok(None);
    }

    let mut session = TerminalSession::start()?;
    let mut state = PickerState::new();

    let action = loop {
        session
            .terminal()
            .draw(|frame| render_picker(frame, title, items, &mut state))
            .map_err(|e| Error::terminal(e.to_string()))?;

        if !event::poll(POLL_INTERVAL).map_err(|e| Error::terminal(e.to_string()))? {
            continue;
        }

        if let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event::read().map_err(|e| Error::terminal(e.to_string()))?
        {
            if let Some(action) = state.handle_key(code, modifiers, items.len()) {
                break action;
            }
        }
    };

    drop(session);

    Ok(match action {
        PickerAction::Selected(index) => items.get(index).cloned(),
        PickerAction::Cancelled => None,
    })
}

/// Render the picker UI
pub fn render_picker(frame: &mut Frame, title: &str, items: &[String], state: &mut PickerState) {
    let area = frame.area();

    let longest = items.iter().map(|i| i.chars().count()).max().unwrap_or(0);
    let modal_width = modal_width(longest.saturating_add(12), area);
    let modal_height = modal_height(items.len().saturating_add(6), area); // items + borders + footer

    let modal_area = center_rect(modal_width, modal_height, area);
    frame.render_widget(Clear, modal_area);

    let outer_block = styles::prompt_block(title);
    let inner_area = outer_block.inner(modal_area);
    frame.render_widget(outer_block, modal_area);

    let chunks = Layout::vertical([
        Constraint::Min(3),    // Item list
        Constraint::Length(1), // Footer/help
    ])
    .split(inner_area);

    let list_items: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let shortcut = if i < QUICK_SELECT_LIMIT {
                format!("[{}] ", i + 1)
            } else {
                "    ".to_string()
            };
            ListItem::new(Line::from(vec![
                Span::styled(shortcut, styles::keybinding()),
                Span::styled(item.clone(), styles::text_primary()),
            ]))
        })
        .collect();

    let list = List::new(list_items)
        .block(styles::field_block())
        .highlight_style(styles::focused_selected())
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, chunks[0], &mut state.list_state);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("↑/↓", styles::keybinding()),
        Span::styled(" Navigate  ", styles::text_muted()),
        Span::styled("Enter", styles::keybinding()),
        Span::styled(" Select  ", styles::text_muted()),
        Span::styled("1-9", styles::keybinding()),
        Span::styled(" Quick select  ", styles::text_muted()),
        Span::styled("Esc", styles::keybinding()),
        Span::styled(" Cancel", styles::text_muted()),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[1]);
}

/// Validate and convert a key press to an item index
pub fn validate_selection(key: char, len: usize) -> Option<usize> {
    // Only accept digits 1-9
    if !key.is_ascii_digit() || key == '0' {
        return None;
    }

    let index = (key as usize) - ('1' as usize);
    (index < len.min(QUICK_SELECT_LIMIT)).then_some(index)
}

/// Check if a key press dismisses the picker
pub fn is_cancel_key(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Esc => true,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => true,
        _ => false,
    }
}
