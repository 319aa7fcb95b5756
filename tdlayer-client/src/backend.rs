//! Pluggable request backend.
//!
//! The [`Backend`] trait is the seam between the dispatcher and whatever
//! actually executes requests: a native TDLib binding, a remote service, or a
//! scripted double in tests.
//!
//! Two ways of providing one come built in:
//! * [`StubBackend`]: answers every request with `Error{400, "TDLIB_STUB_IN_USE"}` (default).
//! * any `Fn(i64, &Function) -> Object`, for scripted answers.

use tdlayer_types as tl;

use crate::errors::codes;

// ─── Trait ────────────────────────────────────────────────────────────────────

/// Executes one request on behalf of a session.
///
/// Called from a blocking thread, so implementations may block freely. Every
/// call must return exactly one object; failures are reported as
/// [`tl::enums::Object::Error`].
pub trait Backend: Send + Sync + 'static {
    /// Execute `function` for the session identified by `client_id`.
    fn execute(&self, client_id: i64, function: &tl::enums::Function) -> tl::enums::Object;

    /// Human-readable name of this backend (for log messages).
    fn name(&self) -> &str { "custom" }
}

impl<F> Backend for F
where
    F: Fn(i64, &tl::enums::Function) -> tl::enums::Object + Send + Sync + 'static,
{
    fn execute(&self, client_id: i64, function: &tl::enums::Function) -> tl::enums::Object {
        self(client_id, function)
    }

    fn name(&self) -> &str { "closure" }
}

// ─── StubBackend ──────────────────────────────────────────────────────────────

/// Message carried by every [`StubBackend`] answer.
pub const STUB_MESSAGE: &str = "TDLIB_STUB_IN_USE";

/// The default backend, used when no real one is linked.
///
/// Never fails to answer, never panics.
#[derive(Clone, Copy, Debug, Default)]
pub struct StubBackend;

impl Backend for StubBackend {
    fn execute(&self, client_id: i64, function: &tl::enums::Function) -> tl::enums::Object {
        tracing::debug!("[tdlayer] stub backend answering {} for client {client_id}", function.name());
        tl::enums::Object::error(codes::STUB, STUB_MESSAGE)
    }

    fn name(&self) -> &str { "stub" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_answers_every_request_with_an_error() {
        let requests: [tl::enums::Function; 3] = [
            tl::functions::GetMe {}.into(),
            tl::functions::GetChat { chat_id: 1 }.into(),
            tl::functions::LogOut {}.into(),
        ];
        for req in &requests {
            match StubBackend.execute(1, req) {
                tl::enums::Object::Error(e) => {
                    assert_eq!(e.code, codes::STUB);
                    assert_eq!(e.message, STUB_MESSAGE);
                }
                other => panic!("expected error, got {}", other.name()),
            }
        }
    }

    #[test]
    fn closures_are_backends() {
        let backend = |id: i64, _: &tl::enums::Function| {
            tl::enums::Object::from(tl::types::Chats { chat_ids: vec![id] })
        };
        let out = backend.execute(9, &tl::functions::GetMe {}.into());
        assert_eq!(out, tl::types::Chats { chat_ids: vec![9] }.into());
        assert_eq!(Backend::name(&backend), "closure");
    }
}
