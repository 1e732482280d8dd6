use std::collections::HashMap;
use std::time::{Duration, Instant};

use alien_invaders::input::{Action, Input};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

/// Without release events, a key counts as held this long after its last
/// press or repeat. Shorter than the OS repeat interval, so a held key
/// stays live once repeats start.
const HOLD_WINDOW: Duration = Duration::from_millis(150);

/// Tracks which keys are down from the terminal's press/repeat/release stream.
pub struct Keyboard {
    last_seen: HashMap<KeyCode, Instant>,
    reports_release: bool,
}

impl Keyboard {
    pub fn new(reports_release: bool) -> Self {
        Self {
            last_seen: HashMap::new(),
            reports_release,
        }
    }

    pub fn record(&mut self, key: KeyEvent, at: Instant) {
        let code = normalize(key.code);
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.last_seen.insert(code, at);
            }
            KeyEventKind::Release => {
                self.last_seen.remove(&code);
            }
        }
    }

    /// Forgets keys that have gone quiet on terminals that never report releases.
    pub fn expire(&mut self, now: Instant) {
        if !self.reports_release {
            self.last_seen
                .retain(|_, seen| now.saturating_duration_since(*seen) <= HOLD_WINDOW);
        }
    }
}

impl Input for Keyboard {
    fn is_action_held(&self, action: Action) -> bool {
        bindings(action)
            .iter()
            .any(|code| self.last_seen.contains_key(code))
    }
}

fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

fn bindings(action: Action) -> &'static [KeyCode] {
    match action {
        Action::MoveLeft => &[KeyCode::Left, KeyCode::Char('a')],
        Action::MoveRight => &[KeyCode::Right, KeyCode::Char('d')],
        Action::Fire => &[KeyCode::Char(' '), KeyCode::Up],
        Action::Confirm => &[KeyCode::Char('s'), KeyCode::Enter],
        Action::Pause => &[KeyCode::Esc, KeyCode::Char('p')],
        Action::Mute => &[KeyCode::Char('m')],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind)
    }

    #[test]
    fn quiet_keys_expire_without_release_events() {
        let start = Instant::now();
        let mut keyboard = Keyboard::new(false);
        keyboard.record(key(KeyCode::Char('S'), KeyEventKind::Press), start);
        assert!(keyboard.is_action_held(Action::Confirm));

        keyboard.expire(start + Duration::from_millis(100));
        assert!(keyboard.is_action_held(Action::Confirm));

        keyboard.expire(start + Duration::from_millis(400));
        assert!(!keyboard.is_action_held(Action::Confirm));
    }

    #[test]
    fn release_events_end_the_hold() {
        let start = Instant::now();
        let mut keyboard = Keyboard::new(true);
        keyboard.record(key(KeyCode::Left, KeyEventKind::Press), start);
        keyboard.expire(start + Duration::from_secs(5));
        assert!(keyboard.is_action_held(Action::MoveLeft));

        keyboard.record(key(KeyCode::Left, KeyEventKind::Release), start);
        assert!(!keyboard.is_action_held(Action::MoveLeft));
    }
}
