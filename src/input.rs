//! Input handling: terminal events and the key bindings of the portrait.

use crossterm::event::{self, KeyEventKind};
use std::time::Duration;

/// Trait for input sources
pub trait InputSource {
    /// Poll for an input event, waiting at most `timeout`
    fn poll(&mut self, timeout: Duration) -> anyhow::Result<Option<InputEvent>>;
}

/// Console input source implementation
#[derive(Default)]
pub struct ConsoleInput;

impl ConsoleInput {
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for ConsoleInput {
    fn poll(&mut self, timeout: Duration) -> anyhow::Result<Option<InputEvent>> {
        if event::poll(timeout)? {
            return Ok(Some(InputEvent::from(event::read()?)));
        }
        Ok(None)
    }
}

/// Terminal input events
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    /// 鼠标、焦点、粘贴以及按键释放
    Ignored,
}

/// Key events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::default(),
        }
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers {
                ctrl: true,
                ..KeyModifiers::default()
            },
        }
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Null,
}

/// Key modifiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

/// 肖像可以响应的动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortraitAction {
    NextRoom,
    PreviousRoom,
    FirstRoom,
    LastRoom,
    Quit,
}

/// Convert crossterm events to our internal events
impl From<crossterm::event::Event> for InputEvent {
    fn from(event: crossterm::event::Event) -> Self {
        match event {
            crossterm::event::Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
                InputEvent::Key(KeyEvent::from(key_event))
            }
            crossterm::event::Event::Resize(width, height) => InputEvent::Resize(width, height),
            _ => InputEvent::Ignored,
        }
    }
}

impl From<crossterm::event::KeyEvent> for KeyEvent {
    fn from(key_event: crossterm::event::KeyEvent) -> Self {
        Self {
            code: KeyCode::from(key_event.code),
            modifiers: KeyModifiers::from(key_event.modifiers),
        }
    }
}

impl From<crossterm::event::KeyCode> for KeyCode {
    fn from(code: crossterm::event::KeyCode) -> Self {
        match code {
            crossterm::event::KeyCode::Char(c) => KeyCode::Char(c),
            crossterm::event::KeyCode::Enter => KeyCode::Enter,
            crossterm::event::KeyCode::Esc => KeyCode::Esc,
            crossterm::event::KeyCode::Left => KeyCode::Left,
            crossterm::event::KeyCode::Right => KeyCode::Right,
            crossterm::event::KeyCode::Up => KeyCode::Up,
            crossterm::event::KeyCode::Down => KeyCode::Down,
            crossterm::event::KeyCode::Home => KeyCode::Home,
            crossterm::event::KeyCode::End => KeyCode::End,
            _ => KeyCode::Null,
        }
    }
}

impl From<crossterm::event::KeyModifiers> for KeyModifiers {
    fn from(modifiers: crossterm::event::KeyModifiers) -> Self {
        Self {
            shift: modifiers.contains(crossterm::event::KeyModifiers::SHIFT),
            ctrl: modifiers.contains(crossterm::event::KeyModifiers::CONTROL),
            alt: modifiers.contains(crossterm::event::KeyModifiers::ALT),
        }
    }
}

/// 按键到动作的映射（方向键、vi-keys、WASD）
pub fn key_to_action(key: &KeyEvent) -> Option<PortraitAction> {
    if key.modifiers.ctrl {
        return match key.code {
            KeyCode::Char('c') => Some(PortraitAction::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => Some(PortraitAction::NextRoom),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => {
            Some(PortraitAction::PreviousRoom)
        }
        KeyCode::Home => Some(PortraitAction::FirstRoom),
        KeyCode::End => Some(PortraitAction::LastRoom),
        KeyCode::Char('q') | KeyCode::Esc => Some(PortraitAction::Quit),
        _ => None,
    }
}


#[cfg(test)]
mod tests {
    use super::test_helpers::ScriptedInput;
    use super::*;
    use crossterm::event::{
        Event as CEvent, KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventState,
        KeyModifiers as CKeyModifiers,
    };

    fn press(code: KeyCode) -> Option<PortraitAction> {
        key_to_action(&KeyEvent::new(code))
    }

    #[test]
    fn test_arrow_and_alias_bindings() {
        assert_eq!(press(KeyCode::Right), Some(PortraitAction::NextRoom));
        assert_eq!(press(KeyCode::Char('l')), Some(PortraitAction::NextRoom));
        assert_eq!(press(KeyCode::Char('d')), Some(PortraitAction::NextRoom));
        assert_eq!(press(KeyCode::Left), Some(PortraitAction::PreviousRoom));
        assert_eq!(press(KeyCode::Char('h')), Some(PortraitAction::PreviousRoom));
        assert_eq!(press(KeyCode::Char('a')), Some(PortraitAction::PreviousRoom));
        assert_eq!(press(KeyCode::Home), Some(PortraitAction::FirstRoom));
        assert_eq!(press(KeyCode::End), Some(PortraitAction::LastRoom));
    }

    #[test]
    fn test_quit_bindings() {
        assert_eq!(press(KeyCode::Char('q')), Some(PortraitAction::Quit));
        assert_eq!(press(KeyCode::Esc), Some(PortraitAction::Quit));
        assert_eq!(
            key_to_action(&KeyEvent::ctrl(KeyCode::Char('c'))),
            Some(PortraitAction::Quit)
        );
        // Ctrl+d 不是导航
        assert_eq!(key_to_action(&KeyEvent::ctrl(KeyCode::Char('d'))), None);
    }

    #[test]
    fn test_unbound_keys() {
        assert_eq!(press(KeyCode::Up), None);
        assert_eq!(press(KeyCode::Enter), None);
        assert_eq!(press(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_crossterm_conversion() {
        let event = CEvent::Key(CKeyEvent::new(CKeyCode::Right, CKeyModifiers::NONE));
        assert_eq!(
            InputEvent::from(event),
            InputEvent::Key(KeyEvent::new(KeyCode::Right))
        );

        let release = CEvent::Key(CKeyEvent {
            code: CKeyCode::Right,
            modifiers: CKeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(InputEvent::from(release), InputEvent::Ignored);

        assert_eq!(InputEvent::from(CEvent::Resize(80, 24)), InputEvent::Resize(80, 24));
        assert_eq!(InputEvent::from(CEvent::FocusGained), InputEvent::Ignored);
    }

    #[test]
    fn test_scripted_input_ends_with_quit() {
        let mut input = ScriptedInput::keys([KeyCode::Right]);
        assert_eq!(
            input.poll(Duration::ZERO).unwrap(),
            Some(InputEvent::Key(KeyEvent::new(KeyCode::Right)))
        );
        assert_eq!(input.remaining(), 0);
        assert_eq!(
            input.poll(Duration::ZERO).unwrap(),
            Some(InputEvent::Key(KeyEvent::new(KeyCode::Char('q'))))
        );
    }
}
