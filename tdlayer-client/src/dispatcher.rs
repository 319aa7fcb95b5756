//! The per-session worker.
//!
//! One task per started client pulls [`Job`]s off an unbounded queue, checks
//! them against the session state and runs each accepted call on its own
//! task, with the backend itself on the blocking pool. Results flow back
//! through [`Completion`]s, so every call is answered exactly once even when
//! the session is torn down underneath it.

use std::sync::{Arc, OnceLock};

use tdlayer_types as tl;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::auth::{AuthenticationSupplier, SessionState};
use crate::backend::Backend;
use crate::completion::Completion;
use crate::errors::{backend_failed, codes, not_ready, session_closed, with_message};

/// One queued call.
pub(crate) struct Job {
    pub(crate) function:   tl::enums::Function,
    pub(crate) completion: Completion,
}

/// State shared between a client, its worker and its in-flight calls.
pub(crate) struct Session {
    pub(crate) client_id: i64,
    pub(crate) state:     watch::Sender<SessionState>,
    backend:              Arc<dyn Backend>,
    settings:             OnceLock<tl::types::PhoneNumberAuthenticationSettings>,
    shutdown:             CancellationToken,
}

/// What a finished call means for the session.
#[derive(Clone, Copy)]
enum CallKind {
    CheckCode,
    LogOut,
    Other,
}

impl CallKind {
    fn of(function: &tl::enums::Function) -> Self {
        match function {
            tl::enums::Function::CheckAuthenticationCode(_) => Self::CheckCode,
            tl::enums::Function::LogOut(_) => Self::LogOut,
            _ => Self::Other,
        }
    }
}

impl Session {
    pub(crate) fn new(client_id: i64, backend: Arc<dyn Backend>) -> Self {
        let (state, _) = watch::channel(SessionState::Uninitialized);
        Self {
            client_id,
            state,
            backend,
            settings: OnceLock::new(),
            shutdown: CancellationToken::new(),
        }
    }

    pub(crate) fn current(&self) -> SessionState {
        *self.state.borrow()
    }

    /// Move forward to `next`. Returns `false` if the session is already
    /// there, past it, or stopped.
    pub(crate) fn advance(&self, next: SessionState) -> bool {
        let mut from = next;
        let changed = self.state.send_if_modified(|state| {
            if state.can_advance_to(next) {
                from = *state;
                *state = next;
                true
            } else {
                false
            }
        });
        if changed {
            tracing::info!("[tdlayer] client {}: {from} → {next}", self.client_id);
            if next == SessionState::Stopped {
                self.shutdown.cancel();
            }
        }
        changed
    }

    /// Apply the state change implied by a finished call. Runs before the
    /// call's completion fires.
    fn settle(&self, kind: CallKind, object: &tl::enums::Object) {
        if let tl::enums::Object::Error(e) = object {
            if e.code == codes::UNAUTHORIZED {
                tracing::warn!(
                    "[tdlayer] client {}: backend rejected the session ({})",
                    self.client_id,
                    e.message
                );
                self.advance(SessionState::Stopped);
                return;
            }
        }
        match kind {
            CallKind::CheckCode if matches!(object, tl::enums::Object::Ok(_)) => {
                if self.current() == SessionState::Authenticating {
                    self.advance(SessionState::Ready);
                }
            }
            CallKind::LogOut => {
                self.advance(SessionState::Stopped);
            }
            _ => {}
        }
    }

    /// Check a job against the current state and, if accepted, spawn it.
    fn dispatch(self: &Arc<Self>, job: Job, calls: &mut JoinSet<()>) {
        let Job { mut function, completion } = job;
        let state = self.current();
        if !state.accepts(&function) {
            tracing::debug!(
                "[tdlayer] client {}: {} rejected while {state}",
                self.client_id,
                function.name()
            );
            completion.complete(not_ready());
            return;
        }

        if let tl::enums::Function::SetAuthenticationPhoneNumber(req) = &mut function {
            if req.settings.is_none() {
                req.settings = self.settings.get().copied();
            }
        }

        let session = Arc::clone(self);
        calls.spawn(async move {
            let kind = CallKind::of(&function);
            let name = function.name();
            let backend = Arc::clone(&session.backend);
            let client_id = session.client_id;
            tracing::debug!("[tdlayer] client {client_id} → {name}");

            let object =
                match tokio::task::spawn_blocking(move || backend.execute(client_id, &function)).await {
                    Ok(object) => object,
                    Err(e) => {
                        tracing::warn!("[tdlayer] client {client_id}: backend failed on {name}: {e}");
                        backend_failed()
                    }
                };

            let object = with_message(object);
            session.settle(kind, &object);
            completion.complete(object);
        });
    }
}

/// Drive one session until it stops or every client handle is gone.
pub(crate) async fn run_session(
    session:  Arc<Session>,
    supplier: Box<dyn AuthenticationSupplier>,
    mut jobs: mpsc::UnboundedReceiver<Job>,
) {
    tracing::info!(
        "[tdlayer] client {}: starting on {} backend",
        session.client_id,
        session.backend.name()
    );
    let client_id = session.client_id;
    match tokio::task::spawn_blocking(move || supplier.supply(client_id)).await {
        Ok(settings) => {
            let _ = session.settings.set(settings);
            session.advance(SessionState::Authenticating);
        }
        Err(e) => {
            tracing::warn!("[tdlayer] client {client_id}: authentication supplier failed: {e}");
            session.advance(SessionState::Stopped);
        }
    }

    let mut calls = JoinSet::new();
    loop {
        tokio::select! {
            biased;
            _ = session.shutdown.cancelled() => break,
            job = jobs.recv() => match job {
                Some(job) => session.dispatch(job, &mut calls),
                None => break,
            },
            Some(_) = calls.join_next(), if !calls.is_empty() => {}
        }
    }

    session.advance(SessionState::Stopped);

    // Aborted calls answer SESSION_CLOSED from their Completion's Drop.
    calls.shutdown().await;
    jobs.close();
    let mut drained = 0usize;
    while let Ok(job) = jobs.try_recv() {
        job.completion.complete(session_closed());
        drained += 1;
    }
    tracing::info!(
        "[tdlayer] client {}: session closed ({drained} queued call(s) drained)",
        session.client_id
    );
}
