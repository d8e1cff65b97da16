//! Sign-up and login form state.

use famconnect_core::auth::SignUpForm;

use crate::common::TextField;

/// Focusable elements on the sign-up screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignUpFocus {
    #[default]
    Username,
    Email,
    Password,
    Confirmation,
}

impl SignUpFocus {
    const ORDER: [SignUpFocus; 4] = [
        SignUpFocus::Username,
        SignUpFocus::Email,
        SignUpFocus::Password,
        SignUpFocus::Confirmation,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Clone)]
pub struct SignUpState {
    pub username: TextField,
    pub email: TextField,
    pub password: TextField,
    pub confirmation: TextField,
    pub focus: SignUpFocus,
    pub error: Option<String>,
}

impl Default for SignUpState {
    fn default() -> Self {
        Self {
            username: TextField::plain("Username"),
            email: TextField::plain("Email"),
            password: TextField::secret("Password"),
            confirmation: TextField::secret("Confirm Password"),
            focus: SignUpFocus::default(),
            error: None,
        }
    }
}

impl SignUpState {
    pub fn focused_mut(&mut self) -> &mut TextField {
        match self.focus {
            SignUpFocus::Username => &mut self.username,
            SignUpFocus::Email => &mut self.email,
            SignUpFocus::Password => &mut self.password,
            SignUpFocus::Confirmation => &mut self.confirmation,
        }
    }

    /// Fields in display order with their focus marker.
    pub fn fields(&self) -> [(&TextField, bool); 4] {
        [
            (&self.username, self.focus == SignUpFocus::Username),
            (&self.email, self.focus == SignUpFocus::Email),
            (&self.password, self.focus == SignUpFocus::Password),
            (&self.confirmation, self.focus == SignUpFocus::Confirmation),
        ]
    }

    pub fn to_form(&self) -> SignUpForm {
        SignUpForm {
            username: self.username.value().to_string(),
            email: self.email.value().to_string(),
            password: self.password.value().to_string(),
            confirmation: self.confirmation.value().to_string(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Focusable elements on the login screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginFocus {
    #[default]
    Username,
    Password,
    StayLoggedIn,
}

impl LoginFocus {
    pub fn next(self) -> Self {
        match self {
            LoginFocus::Username => LoginFocus::Password,
            LoginFocus::Password => LoginFocus::StayLoggedIn,
            LoginFocus::StayLoggedIn => LoginFocus::Username,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            LoginFocus::Username => LoginFocus::StayLoggedIn,
            LoginFocus::Password => LoginFocus::Username,
            LoginFocus::StayLoggedIn => LoginFocus::Password,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoginState {
    pub username: TextField,
    pub password: TextField,
    pub focus: LoginFocus,
    /// Set after a mismatched attempt, cleared on the next success.
    pub authentication_failed: bool,
}

impl Default for LoginState {
    fn default() -> Self {
        Self {
            username: TextField::plain("Username"),
            password: TextField::secret("Password"),
            focus: LoginFocus::default(),
            authentication_failed: false,
        }
    }
}

impl LoginState {
    /// The focused text field, if focus is on one.
    pub fn focused_mut(&mut self) -> Option<&mut TextField> {
        match self.focus {
            LoginFocus::Username => Some(&mut self.username),
            LoginFocus::Password => Some(&mut self.password),
            LoginFocus::StayLoggedIn => None,
        }
    }

    /// Prefills the username after sign-up and moves focus to the password.
    pub fn prefill(&mut self, username: &str) {
        self.username.set(username);
        self.password.clear();
        self.focus = LoginFocus::Password;
        self.authentication_failed = false;
    }
}
