// Shared fakes for unit tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::clock::Clock;
use crate::drag::{ListenerRegistry, SessionId};
use crate::export::{ExportScene, RenderError, RenderOptions, SnapshotRenderer, PNG_SIGNATURE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListenerCall {
    Attach(SessionId),
    Detach(SessionId),
}

#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingListeners {
    calls: Rc<RefCell<Vec<ListenerCall>>>,
}

impl RecordingListeners {
    pub(crate) fn calls(&self) -> Vec<ListenerCall> {
        self.calls.borrow().clone()
    }

    /// Sessions currently holding listeners.
    /// Attaches minus detaches; negative when a session was detached twice.
    pub(crate) fn attached(&self) -> isize {
        self.calls.borrow().iter().fold(0, |open, call| match call {
            ListenerCall::Attach(_) => open + 1,
            ListenerCall::Detach(_) => open - 1,
        })
    }
}

impl ListenerRegistry for RecordingListeners {
    fn attach(&mut self, session: SessionId) {
        self.calls.borrow_mut().push(ListenerCall::Attach(session));
    }

    fn detach(&mut self, session: SessionId) {
        self.calls.borrow_mut().push(ListenerCall::Detach(session));
    }
}

/// Clock that advances one millisecond per reading.
#[derive(Debug, Clone)]
pub(crate) struct SteppingClock {
    next: Rc<Cell<DateTime<Utc>>>,
}

impl SteppingClock {
    pub(crate) fn starting_at_millis(millis: i64) -> Self {
        let start = Utc.timestamp_millis_opt(millis).single().unwrap_or_default();
        Self { next: Rc::new(Cell::new(start)) }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let now = self.next.get();
        self.next.set(now + Duration::milliseconds(1));
        now
    }
}

/// Renderer returning a fixed PNG header, or failing on demand.
pub(crate) struct StubRenderer {
    pub fail_with: Option<String>,
    pub bytes: Vec<u8>,
}

impl StubRenderer {
    pub(crate) fn png() -> Self {
        let mut bytes = PNG_SIGNATURE.to_vec();
        bytes.extend_from_slice(&[0, 0, 0, 13]);
        Self { fail_with: None, bytes }
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self { fail_with: Some(message.to_string()), bytes: Vec::new() }
    }
}

#[async_trait]
impl SnapshotRenderer for StubRenderer {
    async fn render_snapshot(
        &self,
        _scene: &ExportScene,
        _options: &RenderOptions,
    ) -> Result<Vec<u8>, RenderError> {
        match &self.fail_with {
            Some(message) => Err(RenderError::new(message.clone())),
            None => Ok(self.bytes.clone()),
        }
    }
}

mod tests {
    use super::*;

    #[test]
    fn test_attached_goes_negative_on_extra_detach() {
        let mut listeners = RecordingListeners::default();
        listeners.attach(SessionId(1));
        listeners.detach(SessionId(1));
        listeners.detach(SessionId(1));

        assert_eq!(listeners.attached(), -1);
    }
}
