//! Session lifecycle and the authentication callback.

use std::fmt;

use tdlayer_types as tl;

// ─── SessionState ─────────────────────────────────────────────────────────────

/// Lifecycle of one client session. Only ever moves forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionState {
    /// Created, [`crate::Client::start`] not called yet.
    Uninitialized,
    /// The session worker is being brought up.
    Starting,
    /// Waiting for the login flow to finish.
    Authenticating,
    /// Logged in; every request is accepted.
    Ready,
    /// Terminal.
    Stopped,
}

impl SessionState {
    /// Whether a session in this state hands `function` to the backend.
    pub fn accepts(self, function: &tl::enums::Function) -> bool {
        match self {
            Self::Ready => true,
            Self::Authenticating => function.is_authentication(),
            Self::Uninitialized | Self::Starting | Self::Stopped => false,
        }
    }

    pub(crate) fn can_advance_to(self, next: SessionState) -> bool {
        self != Self::Stopped && next > self
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Uninitialized => "uninitialized",
            Self::Starting => "starting",
            Self::Authenticating => "authenticating",
            Self::Ready => "ready",
            Self::Stopped => "stopped",
        })
    }
}

// ─── AuthenticationSupplier ───────────────────────────────────────────────────

/// Supplies the code-delivery settings for a session's phone login.
///
/// Invoked once per [`crate::Client::start`], from the session worker, with
/// the client identifier.
pub trait AuthenticationSupplier: Send + 'static {
    fn supply(&self, client_id: i64) -> tl::types::PhoneNumberAuthenticationSettings;
}

impl<F> AuthenticationSupplier for F
where
    F: Fn(i64) -> tl::types::PhoneNumberAuthenticationSettings + Send + 'static,
{
    fn supply(&self, client_id: i64) -> tl::types::PhoneNumberAuthenticationSettings {
        self(client_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticating_accepts_only_login_requests() {
        let state = SessionState::Authenticating;
        assert!(state.accepts(&tl::functions::CheckAuthenticationCode { code: "1".into() }.into()));
        assert!(state.accepts(&tl::functions::LogOut {}.into()));
        assert!(!state.accepts(&tl::functions::GetMe {}.into()));
        assert!(!state.accepts(&tl::functions::GetChat { chat_id: 1 }.into()));
    }

    #[test]
    fn only_ready_accepts_everything() {
        let get_me: tl::enums::Function = tl::functions::GetMe {}.into();
        assert!(SessionState::Ready.accepts(&get_me));
        for state in [SessionState::Uninitialized, SessionState::Starting, SessionState::Stopped] {
            assert!(!state.accepts(&get_me), "{state} accepted getMe");
            assert!(!state.accepts(&tl::functions::LogOut {}.into()));
        }
    }

    #[test]
    fn states_only_advance() {
        assert!(SessionState::Uninitialized.can_advance_to(SessionState::Starting));
        assert!(SessionState::Authenticating.can_advance_to(SessionState::Stopped));
        assert!(!SessionState::Ready.can_advance_to(SessionState::Authenticating));
        assert!(!SessionState::Ready.can_advance_to(SessionState::Ready));
        assert!(!SessionState::Stopped.can_advance_to(SessionState::Stopped));
    }

    #[test]
    fn closures_are_suppliers() {
        let closure = move |id: i64| tl::types::PhoneNumberAuthenticationSettings {
            allow_flash_call: id == 3,
            ..Default::default()
        };
        assert!(closure.supply(3).allow_flash_call);
    }
}
