//! Per-request render orchestration.
//!
//! An ordered sequence of backends is tried per request; the first success
//! short-circuits the chain, and exactly one backend's output becomes the
//! deliverable. The sequence is [browser/standard, browser/reduced,
//! capture]: the reduced browser profile is the single documented relaunch,
//! and the capture rasterizer only applies when the request shipped a preview
//! bitmap.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::{info, warn};

use crate::browser::resolver::BrowserEnv;
use crate::browser::{pdf, LaunchProfile};
use crate::raster::{self, RasterError};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to launch browser process {executable}: {source}")]
    Launch {
        executable: String,
        #[source]
        source: std::io::Error,
    },

    #[error("browser process failed ({status}): {stderr}")]
    BrowserExit { status: String, stderr: String },

    #[error("browser produced no output document")]
    EmptyOutput,

    #[error("render scratch I/O failed: {0}")]
    Scratch(#[from] std::io::Error),

    #[error("capture fallback failed: {0}")]
    Raster(#[from] RasterError),

    #[error("no capture bitmap available for fallback rasterization")]
    CaptureUnavailable,
}

/// Everything a backend needs to produce the PDF for one request.
#[derive(Debug, Clone)]
pub struct RenderJob {
    /// The fully synthesized HTML document.
    pub html: String,
    /// Decoded preview bitmap, when the request shipped one.
    pub capture: Option<Vec<u8>>,
    pub filename: String,
}

/// The deliverable: PDF bytes plus the suggested download filename. Held in
/// memory only; streamed to the caller and discarded.
#[derive(Debug, Clone)]
pub struct RenderedArtifact {
    pub bytes: Bytes,
    pub filename: String,
}

#[async_trait]
trait RenderBackend: Send + Sync {
    fn label(&self) -> &'static str;
    async fn render(&self, env: &BrowserEnv, job: &RenderJob) -> Result<Vec<u8>, RenderError>;
}

struct ChromiumBackend {
    profile: LaunchProfile,
}

#[async_trait]
impl RenderBackend for ChromiumBackend {
    fn label(&self) -> &'static str {
        match self.profile {
            LaunchProfile::Standard => "chromium",
            LaunchProfile::Reduced => "chromium-reduced",
        }
    }

    async fn render(&self, env: &BrowserEnv, job: &RenderJob) -> Result<Vec<u8>, RenderError> {
        pdf::print_to_pdf(env, self.profile, &job.html).await
    }
}

struct CaptureBackend;

#[async_trait]
impl RenderBackend for CaptureBackend {
    fn label(&self) -> &'static str {
        "capture-raster"
    }

    async fn render(&self, _env: &BrowserEnv, job: &RenderJob) -> Result<Vec<u8>, RenderError> {
        let bitmap = job
            .capture
            .as_deref()
            .ok_or(RenderError::CaptureUnavailable)?;
        Ok(raster::assemble_capture_pdf(bitmap)?)
    }
}

/// Renders one request, walking the backend chain until a backend succeeds.
///
/// Failures are logged and accumulated; if the whole chain is exhausted the
/// last failure propagates and no partial artifact is returned.
pub async fn render_pdf(env: &BrowserEnv, job: RenderJob) -> Result<RenderedArtifact, RenderError> {
    let backends: [&dyn RenderBackend; 3] = [
        &ChromiumBackend {
            profile: LaunchProfile::Standard,
        },
        &ChromiumBackend {
            profile: LaunchProfile::Reduced,
        },
        &CaptureBackend,
    ];

    let mut last_error: Option<RenderError> = None;
    for backend in backends {
        match backend.render(env, &job).await {
            Ok(bytes) => {
                info!(
                    backend = backend.label(),
                    size = bytes.len(),
                    filename = %job.filename,
                    "render complete"
                );
                return Ok(RenderedArtifact {
                    bytes: Bytes::from(bytes),
                    filename: job.filename,
                });
            }
            Err(err) => {
                warn!(backend = backend.label(), error = %err, "render backend failed");
                last_error = Some(err);
            }
        }
    }

    Err(last_error.expect("render backend chain is never empty"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use std::io::Cursor;
    use std::path::PathBuf;

    fn failing_browser_env() -> (tempfile::TempDir, BrowserEnv) {
        let dir = tempfile::TempDir::new().unwrap();
        let fake = dir.path().join("chrome");
        std::fs::write(&fake, "#!/bin/sh\nexit 1\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&fake, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
        let env = BrowserEnv {
            constrained: false,
            executable_override: Some(fake),
            cache_dir: Some(PathBuf::from("/nonexistent")),
        };
        (dir, env)
    }

    fn sample_capture() -> Vec<u8> {
        let img = RgbImage::new(80, 120);
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_chain_falls_back_to_capture_when_browser_fails() {
        let (_guard, env) = failing_browser_env();
        let job = RenderJob {
            html: "<html></html>".to_string(),
            capture: Some(sample_capture()),
            filename: "resume.pdf".to_string(),
        };

        let artifact = render_pdf(&env, job).await.unwrap();
        assert!(artifact.bytes.starts_with(b"%PDF"));
        assert_eq!(artifact.filename, "resume.pdf");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exhausted_chain_propagates_last_failure() {
        let (_guard, env) = failing_browser_env();
        let job = RenderJob {
            html: "<html></html>".to_string(),
            capture: None,
            filename: "resume.pdf".to_string(),
        };

        let err = render_pdf(&env, job).await.unwrap_err();
        assert!(matches!(err, RenderError::CaptureUnavailable));
    }
}
