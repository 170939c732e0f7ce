use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Shirt number as typed by the user.
///
/// The number field is permissive: it accepts integers and arbitrary text
/// ("10", "C", "") and stores whatever was entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlayerNumber {
    Numeric(i64),
    Text(String),
}

impl From<i64> for PlayerNumber {
    fn from(value: i64) -> Self {
        PlayerNumber::Numeric(value)
    }
}

impl From<usize> for PlayerNumber {
    fn from(value: usize) -> Self {
        PlayerNumber::Numeric(value as i64)
    }
}

impl From<&str> for PlayerNumber {
    fn from(value: &str) -> Self {
        PlayerNumber::Text(value.to_string())
    }
}

impl From<String> for PlayerNumber {
    fn from(value: String) -> Self {
        PlayerNumber::Text(value)
    }
}

impl fmt::Display for PlayerNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PlayerNumber::Numeric(n) => write!(f, "{}", n),
            PlayerNumber::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhotoError {
    #[error("Unsupported photo type: {mime}")]
    UnsupportedMime { mime: String },

    #[error("Empty photo data")]
    Empty,
}

/// Opaque reference to a player photo.
///
/// The built-in representation is an inline `data:` URL, stored directly on
/// the player record. There is no size cap, so large photos grow the
/// persisted formations and history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoRef(String);

impl PhotoRef {
    /// Wrap an already-encoded reference (data URL or external key).
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Encode raw image bytes as an inline base64 data URL.
    pub fn from_image_bytes(mime: &str, bytes: &[u8]) -> Result<Self, PhotoError> {
        let mime = mime.trim().to_ascii_lowercase();
        if !mime.starts_with("image/") || mime.len() == "image/".len() {
            return Err(PhotoError::UnsupportedMime { mime });
        }
        if bytes.is_empty() {
            return Err(PhotoError::Empty);
        }

        Ok(Self(format!("data:{};base64,{}", mime, STANDARD.encode(bytes))))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_inline(&self) -> bool {
        self.0.starts_with("data:")
    }
}

/// A token on the pitch.
///
/// `slot_id` set means the player is bound to a formation slot; `None` marks
/// a free player with arbitrary coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
    pub number: PlayerNumber,
    #[serde(default)]
    pub photo: Option<PhotoRef>,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub slot_id: Option<String>,
}

impl Player {
    pub fn is_free(&self) -> bool {
        self.slot_id.is_none()
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Move the token, keeping it on the pitch.
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = clamp_percent(x);
        self.y = clamp_percent(y);
    }
}

/// Partial update for a single player, as produced by the edit form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerPatch {
    pub name: Option<String>,
    pub number: Option<PlayerNumber>,
    pub photo: Option<Option<PhotoRef>>,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl PlayerPatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn number(mut self, number: impl Into<PlayerNumber>) -> Self {
        self.number = Some(number.into());
        self
    }

    pub fn photo(mut self, photo: Option<PhotoRef>) -> Self {
        self.photo = Some(photo);
        self
    }

    pub fn position(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn apply(self, player: &mut Player) {
        if let Some(name) = self.name {
            player.name = name;
        }
        if let Some(number) = self.number {
            player.number = number;
        }
        if let Some(photo) = self.photo {
            player.photo = photo;
        }
        let x = self.x.unwrap_or(player.x);
        let y = self.y.unwrap_or(player.y);
        player.set_position(x, y);
    }
}

/// Clamp a percentage coordinate to the pitch. NaN collapses to 0.
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}
