//! Exactly-once delivery of call results.

use tdlayer_types as tl;

use crate::errors::session_closed;

type Callback = Box<dyn FnOnce(tl::enums::Object) + Send + 'static>;

/// Owns the completion callback of one call.
///
/// [`Completion::complete`] consumes it; if it is dropped first (the call was
/// aborted, the queue was torn down, the runtime shut down) the callback
/// receives `SESSION_CLOSED` instead.
pub(crate) struct Completion {
    callback: Option<Callback>,
}

impl Completion {
    pub(crate) fn new(callback: impl FnOnce(tl::enums::Object) + Send + 'static) -> Self {
        Self { callback: Some(Box::new(callback)) }
    }

    pub(crate) fn complete(mut self, object: tl::enums::Object) {
        if let Some(callback) = self.callback.take() {
            callback(object);
        }
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        if let Some(callback) = self.callback.take() {
            callback(session_closed());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<tl::enums::Object>>>, Completion) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let completion = Completion::new(move |object| sink.lock().unwrap().push(object));
        (seen, completion)
    }

    #[test]
    fn complete_runs_once() {
        let (seen, completion) = recorder();
        completion.complete(tl::types::Ok {}.into());
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].name(), "ok");
    }

    #[test]
    fn dropping_reports_session_closed() {
        let (seen, completion) = recorder();
        drop(completion);
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        match &seen[0] {
            tl::enums::Object::Error(e) => assert_eq!(e.message, "SESSION_CLOSED"),
            other => panic!("expected error, got {}", other.name()),
        }
    }
}
