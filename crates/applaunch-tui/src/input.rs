//! Free-text input box

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Position},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use applaunch_core::prelude::*;

use crate::terminal::{center_rect, modal_width, TerminalSession, POLL_INTERVAL};
use crate::theme::styles;

const INPUT_TITLE: &str = "Application id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Submitted(String),
    Cancelled,
}

/// Text being edited and the cursor position (in chars)
#[derive(Debug, Default)]
pub struct InputState {
    text: String,
    cursor: usize,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_index(&self) -> usize {
        self.text
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Option<InputAction> {
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);

        match code {
            KeyCode::Esc => return Some(InputAction::Cancelled),
            KeyCode::Char('c') if ctrl => return Some(InputAction::Cancelled),
            KeyCode::Char('u') if ctrl => {
                self.text.clear();
                self.cursor = 0;
            }
            KeyCode::Enter => return Some(InputAction::Submitted(self.text.clone())),
            KeyCode::Char(c) if !ctrl => {
                let at = self.byte_index();
                self.text.insert(at, c);
                self.cursor += 1;
            }
            KeyCode::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                let at = self.byte_index();
                self.text.remove(at);
            }
            KeyCode::Delete if self.cursor < self.char_count() => {
                let at = self.byte_index();
                self.text.remove(at);
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.char_count()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.char_count(),
            _ => {}
        }
        None
    }
}

/// Show the input box and wait for Enter or Esc
pub fn prompt_input(placeholder: &str) -> Result<Option<String>> {
    let mut session = TerminalSession::start()?;
    let mut state = InputState::new();

    let action = loop {
        session
            .terminal()
            .draw(|frame| render_input(frame, placeholder, &state))
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
            if let Some(action) = state.handle_key(code, modifiers) {
                break action;
            }
        }
    };

    drop(session);

    Ok(match action {
        InputAction::Submitted(text) => Some(text),
        InputAction::Cancelled => None,
    })
}

pub fn render_input(frame: &mut Frame, placeholder: &str, state: &InputState) {
    let area = frame.area();

    let modal_width = modal_width(placeholder.chars().count().saturating_add(8), area);
    let modal_area = center_rect(modal_width, 6, area);
    frame.render_widget(Clear, modal_area);

    let outer_block = styles::prompt_block(INPUT_TITLE);
    let inner_area = outer_block.inner(modal_area);
    frame.render_widget(outer_block, modal_area);

    let chunks = Layout::vertical([
        Constraint::Length(3), // Text field
        Constraint::Length(1), // Footer/help
    ])
    .split(inner_area);

    let field_block = styles::field_block();
    let field_inner = field_block.inner(chunks[0]);

    let content = if state.text().is_empty() {
        Line::from(Span::styled(placeholder.to_string(), styles::text_muted()))
    } else {
        Line::from(Span::styled(state.text().to_string(), styles::text_primary()))
    };
    frame.render_widget(Paragraph::new(content).block(field_block), chunks[0]);

    let cursor_x = field_inner.x + u16::try_from(state.cursor()).unwrap_or(u16::MAX).min(field_inner.width.saturating_sub(1));
    frame.set_cursor_position(Position::new(cursor_x, field_inner.y));

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("Enter", styles::keybinding()),
        Span::styled(" Confirm  ", styles::text_muted()),
        Span::styled("Esc", styles::keybinding()),
        Span::styled(" Cancel", styles::text_muted()),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[1]);
}
