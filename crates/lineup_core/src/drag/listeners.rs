use super::SessionId;

/// Global move/up listeners owned by a drag session.
///
/// The UI layer implements this to hook real pointer and touch listeners.
/// The drag controller is the only caller: every `attach` is matched by
/// exactly one `detach` for the same session.
pub trait ListenerRegistry {
    fn attach(&mut self, session: SessionId);
    fn detach(&mut self, session: SessionId);
}

/// Registry for hosts that route events to the controller themselves.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListeners;

impl ListenerRegistry for NoopListeners {
    fn attach(&mut self, _session: SessionId) {}

    fn detach(&mut self, _session: SessionId) {}
}

impl<L: ListenerRegistry + ?Sized> ListenerRegistry for Box<L> {
    fn attach(&mut self, session: SessionId) {
        (**self).attach(session)
    }

    fn detach(&mut self, session: SessionId) {
        (**self).detach(session)
    }
}
