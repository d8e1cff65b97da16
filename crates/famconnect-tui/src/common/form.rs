//! Single-line text field used by the sign-up and login screens.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Single-line input. Secret fields render as bullets.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TextField {
    pub label: &'static str,
    pub secret: bool,
    value: String,
}

impl std::fmt::Debug for TextField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = if self.secret { "***" } else { &self.value };
        f.debug_struct("TextField")
            .field("label", &self.label)
            .field("value", &value)
            .finish()
    }
}

impl TextField {
    pub fn plain(label: &'static str) -> Self {
        Self {
            label,
            secret: false,
            value: String::new(),
        }
    }

    pub fn secret(label: &'static str) -> Self {
        Self {
            label,
            secret: true,
            value: String::new(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Text shown on screen.
    pub fn display(&self) -> String {
        if self.secret {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    /// Inserts pasted text, dropping line breaks.
    pub fn paste(&mut self, text: &str) {
        self.value
            .extend(text.chars().filter(|c| *c != '\n' && *c != '\r'));
    }

    /// Applies an editing key. Returns true if the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear();
                true
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.value.push(c);
                true
            }
            KeyCode::Backspace => {
                self.value.pop();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut field = TextField::plain("Username");
        assert!(field.handle_key(key(KeyCode::Char('a'))));
        assert!(field.handle_key(key(KeyCode::Char('b'))));
        assert!(field.handle_key(key(KeyCode::Backspace)));
        assert_eq!(field.value(), "a");
        assert!(!field.handle_key(key(KeyCode::Enter)));
    }

    #[test]
    fn test_secret_field_is_masked() {
        let mut field = TextField::secret("Password");
        field.set("secret1");
        assert_eq!(field.display(), "•••••••");
        assert!(!format!("{field:?}").contains("secret1"));
    }

    #[test]
    fn test_ctrl_u_clears_and_ctrl_chars_are_ignored() {
        let mut field = TextField::plain("Username");
        field.set("alice");
        assert!(!field.handle_key(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL)));
        assert_eq!(field.value(), "alice");
        assert!(field.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)));
        assert!(field.is_empty());
    }

    #[test]
    fn test_paste_drops_newlines() {
        let mut field = TextField::plain("Username");
        field.paste("ali\nce\r\n");
        assert_eq!(field.value(), "alice");
    }
}
