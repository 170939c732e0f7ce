//! Board export
//!
//! Rasterization lives outside this crate behind [`SnapshotRenderer`]. An
//! [`ExportJob`] owns a copy of everything it needs, so the board stays free
//! for dragging while the render is awaited.

use crate::config::ExportConfig;
use crate::models::Player;
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
pub const PNG_MIME: &str = "image/png";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RenderError {
    pub message: String,
}

impl RenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    #[error("Renderer failed: {0}")]
    Render(#[from] RenderError),

    #[error("Renderer returned an empty image")]
    EmptyImage,

    #[error("Renderer output is not a PNG image")]
    NotPng,
}

impl ExportError {
    /// Whether retrying the export can succeed.
    pub fn is_recoverable(&self) -> bool {
        match self {
            ExportError::Render(_) => true,
            ExportError::EmptyImage => true,
            ExportError::NotPng => false,
        }
    }
}

/// Everything the renderer draws.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportScene {
    pub team_name: String,
    pub game_type: String,
    pub summary: String,
    pub players: Vec<Player>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    pub scale: f64,
    pub use_cors: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { scale: 2.0, use_cors: true }
    }
}

impl From<&ExportConfig> for RenderOptions {
    fn from(config: &ExportConfig) -> Self {
        Self { scale: config.scale, use_cors: config.use_cors }
    }
}

/// External rasterizer producing PNG bytes for a scene.
#[async_trait]
pub trait SnapshotRenderer: Send + Sync {
    async fn render_snapshot(
        &self,
        scene: &ExportScene,
        options: &RenderOptions,
    ) -> Result<Vec<u8>, RenderError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportJob {
    pub scene: ExportScene,
    pub options: RenderOptions,
    pub file_name: String,
}

impl ExportJob {
    pub async fn run<R>(self, renderer: &R) -> Result<ExportArtifact, ExportError>
    where
        R: SnapshotRenderer + ?Sized,
    {
        let bytes = renderer.render_snapshot(&self.scene, &self.options).await.map_err(|err| {
            log::warn!("Export of '{}' failed: {}", self.file_name, err);
            ExportError::from(err)
        })?;

        if bytes.is_empty() {
            return Err(ExportError::EmptyImage);
        }
        if !bytes.starts_with(&PNG_SIGNATURE) {
            return Err(ExportError::NotPng);
        }

        log::info!("Exported {} ({} bytes)", self.file_name, bytes.len());
        Ok(ExportArtifact { file_name: self.file_name, mime: PNG_MIME, bytes })
    }
}

/// `<team name, whitespace runs as "_">_<suffix>.png`
pub fn export_file_name(team_name: &str, suffix: &str) -> String {
    let mut name = String::with_capacity(team_name.len() + suffix.len() + 5);
    let mut in_whitespace = false;
    for c in team_name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                name.push('_');
            }
            in_whitespace = true;
        } else {
            name.push(c);
            in_whitespace = false;
        }
    }
    format!("{}_{}.png", name, suffix)
}
