use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};

use crate::app::Tab;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Tick,
    Quit,
    NextTab,
    PrevTab,
    SelectTab(Tab),
    MoveUp,
    MoveDown,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    InputChar(char),
    Backspace,
    Submit,
    StartSelected,
    CompleteSelected,
    DeleteSelected,
    MouseScrollUp,
    MouseScrollDown,
    MouseLeftClick(u16, u16),
}

fn map_key_event(key_event: KeyEvent) -> AppEvent {
    if key_event.kind != KeyEventKind::Press {
        return AppEvent::Tick;
    }

    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key_event.modifiers.contains(KeyModifiers::SHIFT);
    if ctrl {
        match key_event.code {
            KeyCode::Char('c') => return AppEvent::Quit,
            KeyCode::Char('s') => return AppEvent::StartSelected,
            KeyCode::Char('f') => return AppEvent::CompleteSelected,
            _ => {}
        }
    }

    match key_event.code {
        KeyCode::Tab => AppEvent::NextTab,
        KeyCode::BackTab => AppEvent::PrevTab,
        KeyCode::F(1) => AppEvent::SelectTab(Tab::Tutorial),
        KeyCode::F(2) => AppEvent::SelectTab(Tab::Chat),
        KeyCode::F(3) => AppEvent::SelectTab(Tab::Planner),
        KeyCode::Up if shift || ctrl => AppEvent::ScrollUp,
        KeyCode::Down if shift || ctrl => AppEvent::ScrollDown,
        KeyCode::PageUp => AppEvent::PageUp,
        KeyCode::PageDown => AppEvent::PageDown,
        KeyCode::Up => AppEvent::MoveUp,
        KeyCode::Down => AppEvent::MoveDown,
        KeyCode::Left => AppEvent::CursorLeft,
        KeyCode::Right => AppEvent::CursorRight,
        KeyCode::Home => AppEvent::CursorHome,
        KeyCode::End => AppEvent::CursorEnd,
        KeyCode::Backspace => AppEvent::Backspace,
        KeyCode::Delete => AppEvent::DeleteSelected,
        KeyCode::Enter => AppEvent::Submit,
        KeyCode::Char(c) if !ctrl => AppEvent::InputChar(c),
        _ => AppEvent::Tick,
    }
}

fn map_mouse_event_kind(kind: MouseEventKind) -> AppEvent {
    match kind {
        MouseEventKind::ScrollUp => AppEvent::MouseScrollUp,
        MouseEventKind::ScrollDown => AppEvent::MouseScrollDown,
        MouseEventKind::Down(MouseButton::Left) => AppEvent::MouseLeftClick(0, 0),
        _ => AppEvent::Tick,
    }
}

pub fn next_event() -> io::Result<AppEvent> {
    if event::poll(Duration::from_millis(16))? {
        match event::read()? {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                return Ok(map_key_event(key_event));
            }
            Event::Mouse(mouse_event) => {
                if let MouseEventKind::Down(MouseButton::Left) = mouse_event.kind {
                    return Ok(AppEvent::MouseLeftClick(
                        mouse_event.column,
                        mouse_event.row,
                    ));
                }
                return Ok(map_mouse_event_kind(mouse_event.kind));
            }
            _ => {}
        }
    }

    Ok(AppEvent::Tick)
}
