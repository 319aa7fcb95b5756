//! # tdlayer-client
//!
//! Async session dispatcher for TDLib-style backends.
//!
//! ## Features
//! - Login state machine: `Uninitialized → Starting → Authenticating → Ready → Stopped`
//! - Non-blocking [`Client::send`] with an exactly-once completion callback
//! - Future-returning [`Client::execute`] and typed [`Client::invoke`]
//! - `FLOOD_WAIT` auto-retry with configurable policy
//! - Pluggable [`Backend`]; the default [`StubBackend`] answers every request
//!   with `TDLIB_STUB_IN_USE`
//!
//! ```rust,no_run
//! use tdlayer_client::{ApiToken, Client, Config};
//! use tdlayer_types::types::PhoneNumberAuthenticationSettings;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new(Config::new(ApiToken::new(12345, "0123abcd")?));
//! client.start(|_client_id: i64| PhoneNumberAuthenticationSettings::default())?;
//! client.set_phone_number("+1 555 0101").await?;
//! client.check_code("12345").await?;
//! let me = client.get_me().await?;
//! println!("signed in as {}", me.full_name());
//! # Ok(()) }
//! ```

#![deny(unsafe_code)]

mod auth;
mod backend;
mod completion;
mod config;
mod dispatcher;
mod errors;
mod methods;
mod retry;

pub use auth::{AuthenticationSupplier, SessionState};
pub use backend::{Backend, STUB_MESSAGE, StubBackend};
pub use config::{ApiToken, Config};
pub use errors::{ConfigError, InvocationError, RpcError, SignInError, StartError, codes};
pub use retry::{AutoSleep, NoRetries, RetryContext, RetryPolicy};
pub use tdlayer_types as tl;

use std::num::NonZeroU32;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tdlayer_types::RemoteCall;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::sleep;

use completion::Completion;
use dispatcher::{Job, Session};

// ─── Client ───────────────────────────────────────────────────────────────────

static NEXT_CLIENT_ID: AtomicI64 = AtomicI64::new(1);

struct ClientInner {
    config:  Config,
    session: Arc<Session>,
    /// Set once by [`Client::start`]. Dropping the last client drops the
    /// sender, which stops the worker.
    jobs:    OnceLock<mpsc::UnboundedSender<Job>>,
}

/// A session handle. Cheap to clone, internally Arc-wrapped.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

impl Client {
    // ── Lifecycle ──────────────────────────────────────────────────────────

    /// Create a client in [`SessionState::Uninitialized`] with a
    /// process-unique identifier. Does not need a runtime.
    pub fn new(config: Config) -> Self {
        let client_id = NEXT_CLIENT_ID.fetch_add(1, Ordering::Relaxed);
        let session = Arc::new(Session::new(client_id, Arc::clone(&config.backend)));
        Self {
            inner: Arc::new(ClientInner { config, session, jobs: OnceLock::new() }),
        }
    }

    /// Spawn the session worker on the current tokio runtime.
    ///
    /// The worker calls `supplier` once with [`Client::client_id`] and then
    /// moves the session to [`SessionState::Authenticating`]; watch
    /// [`Client::state_changes`] to observe it. A supplier that panics stops
    /// the session instead. A client closed before `start` stays stopped.
    pub fn start(&self, supplier: impl AuthenticationSupplier) -> Result<(), StartError> {
        let handle = tokio::runtime::Handle::try_current().map_err(|_| StartError::NoRuntime)?;
        if self.inner.session.current() == SessionState::Stopped {
            return Err(StartError::Stopped);
        }
        let (tx, rx) = mpsc::unbounded_channel();
        self.inner.jobs.set(tx).map_err(|_| StartError::AlreadyStarted)?;

        self.inner.session.advance(SessionState::Starting);
        handle.spawn(dispatcher::run_session(
            Arc::clone(&self.inner.session),
            Box::new(supplier),
            rx,
        ));
        Ok(())
    }

    /// Stop the session. Outstanding calls complete with `SESSION_CLOSED`,
    /// later ones with `SESSION_NOT_READY`.
    pub fn close(&self) {
        self.inner.session.advance(SessionState::Stopped);
    }

    // ── Accessors ──────────────────────────────────────────────────────────

    pub fn client_id(&self) -> i64 { self.inner.session.client_id }

    pub fn config(&self) -> &Config { &self.inner.config }

    pub fn state(&self) -> SessionState { self.inner.session.current() }

    /// A receiver that observes every state transition.
    pub fn state_changes(&self) -> watch::Receiver<SessionState> {
        self.inner.session.state.subscribe()
    }

    pub fn is_authenticated(&self) -> bool { self.state() == SessionState::Ready }

    // ── Dispatch ───────────────────────────────────────────────────────────

    /// Submit `function` without waiting. `on_complete` runs exactly once,
    /// with the result or an error object.
    ///
    /// A request the current state does not accept completes immediately,
    /// on the calling thread, with `SESSION_NOT_READY`.
    pub fn send(
        &self,
        function:    impl Into<tl::enums::Function>,
        on_complete: impl FnOnce(tl::enums::Object) + Send + 'static,
    ) {
        let function = function.into();
        let completion = Completion::new(on_complete);

        let state = self.state();
        if !state.accepts(&function) {
            tracing::debug!(
                "[tdlayer] client {}: {} rejected while {state}",
                self.client_id(),
                function.name()
            );
            completion.complete(errors::not_ready());
            return;
        }

        match self.inner.jobs.get() {
            // A failed send drops the job, whose completion then reports SESSION_CLOSED.
            Some(jobs) => { let _ = jobs.send(Job { function, completion }); }
            None => completion.complete(errors::not_ready()),
        }
    }

    /// Submit `function` and wait for its result object.
    pub async fn execute(&self, function: impl Into<tl::enums::Function>) -> tl::enums::Object {
        let (tx, rx) = oneshot::channel();
        self.send(function, move |object| {
            let _ = tx.send(object);
        });
        rx.await.unwrap_or_else(|_| errors::session_closed())
    }

    /// Invoke a request and narrow the result to its declared return type.
    ///
    /// Error objects become [`InvocationError::Rpc`] after the configured
    /// [`RetryPolicy`] has had its say.
    pub async fn invoke<R: RemoteCall>(&self, req: &R) -> Result<R::Return, InvocationError> {
        let function: tl::enums::Function = req.clone().into();
        let name = function.name();
        let mut fail_count   = NonZeroU32::MIN;
        let mut slept_so_far = Duration::default();
        loop {
            match self.execute(function.clone()).await {
                tl::enums::Object::Error(e) => {
                    let ctx = RetryContext { fail_count, slept_so_far, error: e.into() };
                    match self.inner.config.retry_policy.should_retry(&ctx) {
                        ControlFlow::Continue(delay) => {
                            sleep(delay).await;
                            slept_so_far += delay;
                            fail_count = fail_count.saturating_add(1);
                        }
                        ControlFlow::Break(()) => return Err(ctx.error.into()),
                    }
                }
                object => {
                    let got = object.name();
                    return R::Return::try_from(object)
                        .map_err(|_| InvocationError::UnexpectedResult { function: name, got });
                }
            }
        }
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("client_id", &self.client_id())
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
