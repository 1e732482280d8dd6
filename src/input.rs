//! Logical input actions and edge detection.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Fire,
    Confirm,
    Pause,
    Mute,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::Fire,
        Action::Confirm,
        Action::Pause,
        Action::Mute,
    ];

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Anything that can answer "is this action held right now".
pub trait Input {
    fn is_action_held(&self, action: Action) -> bool;
}

/// Actions that are held this tick, and the subset that went from released
/// to held since the previous tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputFrame {
    held: u8,
    pressed: u8,
}

impl InputFrame {
    /// A frame with the given actions held and none freshly pressed.
    pub fn holding(actions: &[Action]) -> Self {
        let held = actions.iter().fold(0, |bits, a| bits | a.bit());
        Self { held, pressed: 0 }
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held & action.bit() != 0
    }

    pub fn was_pressed(&self, action: Action) -> bool {
        self.pressed & action.bit() != 0
    }
}

impl Input for InputFrame {
    fn is_action_held(&self, action: Action) -> bool {
        self.is_held(action)
    }
}

/// Remembers last tick's held set so presses fire once per hold.
#[derive(Clone, Debug, Default)]
pub struct EdgeDetector {
    previous: u8,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Polls every action once and returns this tick's frame.
    pub fn sample(&mut self, input: &dyn Input) -> InputFrame {
        let held = Action::ALL
            .iter()
            .filter(|a| input.is_action_held(**a))
            .fold(0, |bits, a| bits | a.bit());
        let pressed = held & !self.previous;
        self.previous = held;
        InputFrame { held, pressed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_fires_once_per_hold() {
        let mut edges = EdgeDetector::new();
        let confirm = InputFrame::holding(&[Action::Confirm]);
        let idle = InputFrame::default();

        assert!(edges.sample(&confirm).was_pressed(Action::Confirm));
        assert!(!edges.sample(&confirm).was_pressed(Action::Confirm));
        assert!(!edges.sample(&confirm).was_pressed(Action::Confirm));
        assert!(!edges.sample(&idle).was_pressed(Action::Confirm));
        assert!(edges.sample(&confirm).was_pressed(Action::Confirm));
    }

    #[test]
    fn actions_track_edges_independently() {
        let mut edges = EdgeDetector::new();
        let _ = edges.sample(&InputFrame::holding(&[Action::Pause]));

        let frame = edges.sample(&InputFrame::holding(&[Action::Pause, Action::Confirm]));
        assert!(frame.was_pressed(Action::Confirm));
        assert!(!frame.was_pressed(Action::Pause));
        assert!(frame.is_held(Action::Pause));
    }

    #[test]
    fn held_frame_reports_through_input_trait() {
        let frame = InputFrame::holding(&[Action::Fire, Action::MoveLeft]);
        assert!(frame.is_action_held(Action::Fire));
        assert!(frame.is_action_held(Action::MoveLeft));
        assert!(!frame.is_action_held(Action::MoveRight));
    }
}
