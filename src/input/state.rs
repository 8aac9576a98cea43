use super::Key;
use crate::command::Command;

/// Modifier keys as seen by the editor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierState {
    /// Shift held: shapes become squares and circles
    pub constrain: bool,
    /// Control or Command held: Z and Y trigger undo and redo
    pub combo: bool,
}

impl ModifierState {
    /// Tracks a key press, returning the shortcut command it triggers
    pub fn key_down(&mut self, key: Key) -> Option<Command> {
        match key {
            Key::Shift => {
                self.constrain = true;
                None
            }
            Key::Combo => {
                self.combo = true;
                None
            }
            Key::Z if self.combo => Some(Command::Undo),
            Key::Y if self.combo => Some(Command::Redo),
            _ => None,
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Shift => self.constrain = false,
            Key::Combo => self.combo = false,
            _ => {}
        }
    }
}

/// Input-derived state the editor keeps between events
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    pub modifiers: ModifierState,
    /// Last pointer position over the canvas, cleared when the pointer leaves
    pub readout: Option<[u32; 2]>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_sets_constrain_until_released() {
        let mut modifiers = ModifierState::default();
        assert_eq!(modifiers.key_down(Key::Shift), None);
        assert!(modifiers.constrain);

        modifiers.key_up(Key::Shift);
        assert!(!modifiers.constrain);
    }

    #[test]
    fn test_shortcuts_need_combo_held() {
        let mut modifiers = ModifierState::default();
        assert_eq!(modifiers.key_down(Key::Z), None);

        modifiers.key_down(Key::Combo);
        assert_eq!(modifiers.key_down(Key::Z), Some(Command::Undo));
        assert_eq!(modifiers.key_down(Key::Y), Some(Command::Redo));

        modifiers.key_up(Key::Combo);
        assert_eq!(modifiers.key_down(Key::Y), None);
    }
}
