//! Error types for tdlayer-client.
//!
//! Request- and session-level failures travel as [`tl::types::Error`]
//! objects through the completion channel; the types here are what the typed
//! helpers ([`crate::Client::invoke`] and friends) turn them into, plus the
//! contract errors returned by [`crate::Client::start`] and [`crate::Config`].

use std::fmt;

use tdlayer_types as tl;

// ─── Codes ────────────────────────────────────────────────────────────────────

/// Numeric error codes produced by the dispatcher itself.
///
/// Codes coming from a backend are passed through untouched.
pub mod codes {
    /// Answer of the built-in stub backend to every request.
    pub const STUB: i32 = 400;
    /// The backend no longer recognises the session; fatal for the session.
    pub const UNAUTHORIZED: i32 = 401;
    /// The session is not in a state that accepts the request.
    pub const NOT_READY: i32 = 406;
    /// Rate limit; the message carries the wait in seconds (`FLOOD_WAIT_30`).
    pub const FLOOD_WAIT: i32 = 420;
    /// The session stopped while the request was outstanding.
    pub const SESSION_CLOSED: i32 = 500;
}

pub(crate) const NOT_READY_MESSAGE: &str = "SESSION_NOT_READY";
pub(crate) const SESSION_CLOSED_MESSAGE: &str = "SESSION_CLOSED";
pub(crate) const BACKEND_FAILED_MESSAGE: &str = "BACKEND_FAILED";
pub(crate) const UNKNOWN_ERROR_MESSAGE: &str = "UNKNOWN_ERROR";

pub(crate) fn not_ready() -> tl::enums::Object {
    tl::enums::Object::error(codes::NOT_READY, NOT_READY_MESSAGE)
}

pub(crate) fn session_closed() -> tl::enums::Object {
    tl::enums::Object::error(codes::SESSION_CLOSED, SESSION_CLOSED_MESSAGE)
}

/// The backend panicked while executing a call.
pub(crate) fn backend_failed() -> tl::enums::Object {
    tl::enums::Object::error(codes::SESSION_CLOSED, BACKEND_FAILED_MESSAGE)
}

/// Give a backend error with a blank message a stable one; every error
/// reaching a callback carries a message.
pub(crate) fn with_message(object: tl::enums::Object) -> tl::enums::Object {
    match object {
        tl::enums::Object::Error(mut e) if e.message.trim().is_empty() => {
            e.message = UNKNOWN_ERROR_MESSAGE.to_string();
            tl::enums::Object::Error(e)
        }
        object => object,
    }
}

// ─── RpcError ─────────────────────────────────────────────────────────────────

/// An error object received in response to a request.
///
/// Numeric suffixes are stripped from the name and placed in [`RpcError::value`].
///
/// # Example
/// `FLOOD_WAIT_30` → `RpcError { code: 420, name: "FLOOD_WAIT", value: Some(30) }`
#[derive(Clone, Debug, PartialEq)]
pub struct RpcError {
    /// Stable numeric code.
    pub code: i32,
    /// Error name with any numeric suffix removed.
    pub name: String,
    /// Numeric suffix extracted from the name, if any.
    pub value: Option<u32>,
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error {}: {}", self.code, self.name)?;
        if let Some(v) = self.value {
            write!(f, " (value: {v})")?;
        }
        Ok(())
    }
}

impl std::error::Error for RpcError {}

impl RpcError {
    /// Parse an error message like `"FLOOD_WAIT_30"`.
    pub fn new(code: i32, message: &str) -> Self {
        if let Some((name, suffix)) = message.rsplit_once('_') {
            if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) {
                if let Ok(v) = suffix.parse::<u32>() {
                    return Self { code, name: name.to_string(), value: Some(v) };
                }
            }
        }
        Self { code, name: message.to_string(), value: None }
    }

    /// Match on the error name, with optional wildcard prefix/suffix `'*'`.
    ///
    /// # Examples
    /// - `err.is("SESSION_CLOSED")`: exact match
    /// - `err.is("PHONE_CODE_*")`: starts-with match
    /// - `err.is("*_INVALID")`: ends-with match
    pub fn is(&self, pattern: &str) -> bool {
        if let Some(prefix) = pattern.strip_suffix('*') {
            self.name.starts_with(prefix)
        } else if let Some(suffix) = pattern.strip_prefix('*') {
            self.name.ends_with(suffix)
        } else {
            self.name == pattern
        }
    }

    /// Returns the flood-wait duration in seconds, if this is a FLOOD_WAIT error.
    pub fn flood_wait_seconds(&self) -> Option<u64> {
        if self.code == codes::FLOOD_WAIT && self.name == "FLOOD_WAIT" {
            self.value.map(u64::from)
        } else {
            None
        }
    }
}

impl From<tl::types::Error> for RpcError {
    fn from(e: tl::types::Error) -> Self { Self::new(e.code, &e.message) }
}

impl From<&tl::types::Error> for RpcError {
    fn from(e: &tl::types::Error) -> Self { Self::new(e.code, &e.message) }
}

// ─── InvocationError ──────────────────────────────────────────────────────────

/// The error type returned from every typed [`crate::Client`] call.
#[derive(Debug)]
pub enum InvocationError {
    /// The backend or the dispatcher answered with an error object.
    Rpc(RpcError),
    /// The call succeeded but resolved to a different object than its
    /// function declares.
    UnexpectedResult {
        function: &'static str,
        got:      &'static str,
    },
}

impl fmt::Display for InvocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rpc(e) => write!(f, "{e}"),
            Self::UnexpectedResult { function, got } => {
                write!(f, "{function} resolved to unexpected {got}")
            }
        }
    }
}

impl std::error::Error for InvocationError {}

impl From<RpcError> for InvocationError {
    fn from(e: RpcError) -> Self { Self::Rpc(e) }
}

impl InvocationError {
    /// Returns `true` if this is the named error (supports `'*'` wildcards).
    pub fn is(&self, pattern: &str) -> bool {
        match self {
            Self::Rpc(e) => e.is(pattern),
            _ => false,
        }
    }

    /// The numeric code of an [`InvocationError::Rpc`].
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Rpc(e) => Some(e.code),
            _ => None,
        }
    }

    /// `true` when the call was refused because the session was not ready.
    pub fn is_not_ready(&self) -> bool {
        self.code() == Some(codes::NOT_READY)
    }

    /// If this is a FLOOD_WAIT error, returns how many seconds to wait.
    pub fn flood_wait_seconds(&self) -> Option<u64> {
        match self {
            Self::Rpc(e) => e.flood_wait_seconds(),
            _ => None,
        }
    }
}

// ─── SignInError ──────────────────────────────────────────────────────────────

/// Errors returned by [`crate::Client::check_code`].
#[derive(Debug)]
pub enum SignInError {
    /// The code entered was wrong or has expired.
    InvalidCode,
    /// Any other error.
    Other(InvocationError),
}

impl fmt::Display for SignInError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCode => write!(f, "invalid or expired code"),
            Self::Other(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SignInError {}

impl From<InvocationError> for SignInError {
    fn from(e: InvocationError) -> Self {
        if e.is("PHONE_CODE_*") { Self::InvalidCode } else { Self::Other(e) }
    }
}

// ─── StartError ───────────────────────────────────────────────────────────────

/// Misuse of [`crate::Client::start`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartError {
    /// `start` was already called on this client.
    AlreadyStarted,
    /// `start` was called outside a tokio runtime.
    NoRuntime,
    /// The session was closed before it was started.
    Stopped,
}

impl fmt::Display for StartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyStarted => write!(f, "client already started"),
            Self::NoRuntime => write!(f, "start must be called from within a tokio runtime"),
            Self::Stopped => write!(f, "session already stopped"),
        }
    }
}

impl std::error::Error for StartError {}

// ─── ConfigError ──────────────────────────────────────────────────────────────

/// Invalid credentials or environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API IDs are positive.
    InvalidApiId(i32),
    /// The API hash is empty.
    EmptyApiHash,
    /// A required environment variable is not set.
    MissingVar(&'static str),
    /// An environment variable could not be parsed.
    InvalidVar { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidApiId(id) => write!(f, "invalid api id {id}: must be positive"),
            Self::EmptyApiHash => write!(f, "api hash must not be empty"),
            Self::MissingVar(name) => write!(f, "environment variable {name} is not set"),
            Self::InvalidVar { name, value } => write!(f, "invalid value for {name}: {value:?}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_suffix_is_split() {
        let e = RpcError::new(420, "FLOOD_WAIT_30");
        assert_eq!(e.name, "FLOOD_WAIT");
        assert_eq!(e.value, Some(30));
        assert_eq!(e.flood_wait_seconds(), Some(30));
    }

    #[test]
    fn plain_message_is_kept() {
        let e = RpcError::new(400, "CHAT_NOT_FOUND");
        assert_eq!(e.name, "CHAT_NOT_FOUND");
        assert_eq!(e.value, None);
        assert_eq!(e.flood_wait_seconds(), None);
    }

    #[test]
    fn human_readable_message_is_kept() {
        let e = RpcError::new(400, "Chat not found");
        assert_eq!(e.name, "Chat not found");
    }

    #[test]
    fn wildcards() {
        let e = RpcError::new(400, "PHONE_CODE_INVALID");
        assert!(e.is("PHONE_CODE_*"));
        assert!(e.is("*_INVALID"));
        assert!(!e.is("PHONE_CODE"));
    }

    #[test]
    fn phone_code_errors_map_to_invalid_code() {
        let e: SignInError = InvocationError::Rpc(RpcError::new(400, "PHONE_CODE_EXPIRED")).into();
        assert!(matches!(e, SignInError::InvalidCode));
        let e: SignInError = InvocationError::Rpc(RpcError::new(406, NOT_READY_MESSAGE)).into();
        assert!(matches!(e, SignInError::Other(ref inner) if inner.is_not_ready()));
    }

    #[test]
    fn dispatcher_errors_carry_messages() {
        for object in [not_ready(), session_closed(), backend_failed()] {
            match object {
                tl::enums::Object::Error(e) => assert!(!e.message.is_empty()),
                other => panic!("expected error, got {}", other.name()),
            }
        }
    }

    #[test]
    fn blank_backend_errors_get_a_message() {
        let blank = tl::enums::Object::Error(tl::types::Error { code: 400, message: String::new() });
        assert_eq!(with_message(blank), tl::enums::Object::error(400, UNKNOWN_ERROR_MESSAGE));

        let spaces = tl::enums::Object::Error(tl::types::Error { code: 420, message: "  ".into() });
        assert_eq!(with_message(spaces), tl::enums::Object::error(420, UNKNOWN_ERROR_MESSAGE));

        let named = tl::enums::Object::error(400, "CHAT_NOT_FOUND");
        assert_eq!(with_message(named.clone()), named);
        let ok: tl::enums::Object = tl::types::Ok {}.into();
        assert_eq!(with_message(ok.clone()), ok);
    }
}
