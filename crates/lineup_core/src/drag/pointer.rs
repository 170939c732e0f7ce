//! Pointer geometry
//!
//! Raw pointer coordinates arrive in client (viewport) pixels. The pitch
//! rectangle captured at drag start converts them into pitch percentages.

use crate::models::clamp_percent;
use serde::{Deserialize, Serialize};

/// Bounding rectangle of the pitch surface in client pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PitchRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// A rect with no area cannot map pointer positions.
    pub fn is_degenerate(&self) -> bool {
        let finite = [self.left, self.top, self.width, self.height].iter().all(|v| v.is_finite());
        !finite || self.width <= 0.0 || self.height <= 0.0
    }

    /// Map a client point to pitch percentages, clamped to [0, 100].
    pub fn to_percent(&self, point: ClientPoint) -> (f64, f64) {
        let x = (point.x - self.left) / self.width * 100.0;
        let y = (point.y - self.top) / self.height * 100.0;
        (clamp_percent(x), clamp_percent(y))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClientPoint {
    pub x: f64,
    pub y: f64,
}

impl ClientPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Move event from either input family.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    /// Mouse or pen pointer event.
    Pointer(ClientPoint),
    /// Touch event; the first touch point drives the drag.
    Touch(Vec<ClientPoint>),
}

impl PointerEvent {
    pub fn pointer(x: f64, y: f64) -> Self {
        PointerEvent::Pointer(ClientPoint::new(x, y))
    }

    pub fn touch(x: f64, y: f64) -> Self {
        PointerEvent::Touch(vec![ClientPoint::new(x, y)])
    }

    pub fn client_point(&self) -> Option<ClientPoint> {
        match self {
            PointerEvent::Pointer(point) => Some(*point),
            PointerEvent::Touch(touches) => touches.first().copied(),
        }
    }
}
