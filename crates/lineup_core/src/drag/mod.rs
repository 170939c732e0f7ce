//! # Drag Controller
//!
//! Turns pointer and touch events into pitch coordinates for one player.
//!
//! ## States
//! - `Idle`: no session; move and up events are ignored.
//! - `Dragging`: one session owns the move/up listeners and the pitch rect
//!   captured at pointer-down.
//!
//! A pointer-down while dragging cancels the running session (listeners
//! detached, no history) before the new one attaches.

mod listeners;
mod pointer;

pub use listeners::{ListenerRegistry, NoopListeners};
pub use pointer::{ClientPoint, PitchRect, PointerEvent};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "drag#{}", self.0)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DragError {
    #[error("Pitch has no drawable area: {rect:?}")]
    DegeneratePitch { rect: PitchRect },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub id: SessionId,
    pub player_id: String,
    pub rect: PitchRect,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging(_))
    }
}

/// Result of a pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragStart {
    pub session: SessionId,
    /// Session that was running and got cancelled by this pointer-down.
    pub preempted: Option<SessionId>,
}

/// New coordinates for the dragged player.
#[derive(Debug, Clone, PartialEq)]
pub struct DragUpdate {
    pub player_id: String,
    pub x: f64,
    pub y: f64,
}

/// A session that ended with pointer-up.
#[derive(Debug, Clone, PartialEq)]
pub struct FinishedDrag {
    pub session: SessionId,
    pub player_id: String,
}

pub struct DragController<L = NoopListeners> {
    state: DragState,
    selected: Option<String>,
    listeners: L,
    next_session: u64,
}

impl Default for DragController<NoopListeners> {
    fn default() -> Self {
        Self::new(NoopListeners)
    }
}

impl<L: ListenerRegistry> DragController<L> {
    pub fn new(listeners: L) -> Self {
        Self { state: DragState::Idle, selected: None, listeners, next_session: 1 }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    /// Player being dragged, if any.
    pub fn active_player(&self) -> Option<&str> {
        match &self.state {
            DragState::Dragging(session) => Some(session.player_id.as_str()),
            DragState::Idle => None,
        }
    }

    /// Player drawn on top of the others.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn select(&mut self, player_id: impl Into<String>) {
        self.selected = Some(player_id.into());
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn listeners(&self) -> &L {
        &self.listeners
    }

    /// Pointer-down on a player token.
    pub fn begin(&mut self, player_id: &str, rect: PitchRect) -> Result<DragStart, DragError> {
        if rect.is_degenerate() {
            return Err(DragError::DegeneratePitch { rect });
        }

        let preempted = self.cancel();
        if let Some(previous) = preempted {
            log::warn!("{} preempted by pointer-down on '{}'", previous, player_id);
        }

        let id = SessionId(self.next_session);
        self.next_session += 1;

        self.listeners.attach(id);
        self.selected = Some(player_id.to_string());
        self.state = DragState::Dragging(DragSession { id, player_id: player_id.to_string(), rect });

        log::debug!("{} started for '{}'", id, player_id);
        Ok(DragStart { session: id, preempted })
    }

    /// Map a move event to coordinates for the dragged player.
    pub fn track(&self, event: &PointerEvent) -> Option<DragUpdate> {
        let DragState::Dragging(session) = &self.state else {
            return None;
        };
        let point = event.client_point()?;
        let (x, y) = session.rect.to_percent(point);

        Some(DragUpdate { player_id: session.player_id.clone(), x, y })
    }

    /// Pointer-up or touch-end.
    pub fn end(&mut self) -> Option<FinishedDrag> {
        let session = self.take_session()?;
        self.selected = None;

        log::debug!("{} finished for '{}'", session.id, session.player_id);
        Some(FinishedDrag { session: session.id, player_id: session.player_id })
    }

    /// Abort the running session without finishing it.
    pub fn cancel(&mut self) -> Option<SessionId> {
        let session = self.take_session()?;
        if self.selected.as_deref() == Some(session.player_id.as_str()) {
            self.selected = None;
        }

        log::debug!("{} cancelled", session.id);
        Some(session.id)
    }

    fn take_session(&mut self) -> Option<DragSession> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(session) => {
                self.listeners.detach(session.id);
                Some(session)
            }
            DragState::Idle => None,
        }
    }
}
