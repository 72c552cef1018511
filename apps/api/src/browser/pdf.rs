//! Headless browser print driver.
//!
//! One browser process per render request, exclusively owned by that request:
//! no pooling, no reuse, no shared page state. The synthesized document is
//! staged in a request-scoped scratch directory whose lifetime brackets the
//! whole attempt, so staging files and the output document are released on
//! every exit path.

use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use super::resolver::{self, BrowserEnv};
use super::{
    launch_args, LaunchProfile, DEVICE_SCALE_FACTOR, PAGE_HEIGHT_PX, PAGE_WIDTH_PX,
    VIRTUAL_TIME_BUDGET_MS,
};
use crate::render::RenderError;

/// How much trailing stderr to carry into a render error.
const STDERR_TAIL_BYTES: usize = 600;

/// Prints an HTML document to PDF with a freshly launched browser process.
///
/// The page prints as A4 with backgrounds, zero margins and no header/footer
/// furniture; CSS `@page` size directives in the document take precedence
/// over the fixed format. The process is always reaped before returning —
/// `output()` waits for exit on the success and failure paths, and
/// `kill_on_drop` covers a dropped request future.
pub async fn print_to_pdf(
    env: &BrowserEnv,
    profile: LaunchProfile,
    html: &str,
) -> Result<Vec<u8>, RenderError> {
    let browser = resolver::resolve(env);
    let scratch = tempfile::tempdir()?;
    let html_path = scratch.path().join("document.html");
    let pdf_path = scratch.path().join("document.pdf");

    tokio::fs::write(&html_path, html).await?;

    let mut cmd = Command::new(&browser.executable);
    cmd.arg("--headless=new");
    cmd.args(launch_args(profile, env.constrained));
    cmd.arg("--hide-scrollbars")
        .arg(format!("--window-size={PAGE_WIDTH_PX},{PAGE_HEIGHT_PX}"))
        .arg(format!("--force-device-scale-factor={DEVICE_SCALE_FACTOR}"))
        .arg(format!("--virtual-time-budget={VIRTUAL_TIME_BUDGET_MS}"))
        .arg("--no-pdf-header-footer")
        .arg(format!("--print-to-pdf={}", pdf_path.display()))
        .arg(format!("file://{}", html_path.display()))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    debug!(
        executable = %browser.executable.display(),
        verified = browser.verified,
        profile = ?profile,
        constrained = env.constrained,
        "launching headless browser"
    );

    let output = cmd.output().await.map_err(|source| RenderError::Launch {
        executable: browser.executable.display().to_string(),
        source,
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(RenderError::BrowserExit {
            status: output.status.to_string(),
            stderr: tail(&stderr, STDERR_TAIL_BYTES),
        });
    }

    let bytes = tokio::fs::read(&pdf_path)
        .await
        .map_err(|_| RenderError::EmptyOutput)?;
    if bytes.is_empty() {
        return Err(RenderError::EmptyOutput);
    }

    debug!(size = bytes.len(), "browser print complete");
    Ok(bytes)
}

fn tail(s: &str, max_bytes: usize) -> String {
    let trimmed = s.trim_end();
    if trimmed.len() <= max_bytes {
        return trimmed.to_string();
    }
    let mut start = trimmed.len() - max_bytes;
    while !trimmed.is_char_boundary(start) {
        start += 1;
    }
    trimmed[start..].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tail_keeps_short_strings_whole() {
        assert_eq!(tail("short error", 600), "short error");
        assert_eq!(tail("trailing\n\n", 600), "trailing");
    }

    #[test]
    fn test_tail_truncates_on_char_boundary() {
        let long = format!("{}é fin", "x".repeat(700));
        let tailed = tail(&long, 10);
        assert!(tailed.len() <= 10);
        assert!(tailed.ends_with("fin"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_browser_process_surfaces_exit_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::TempDir::new().unwrap();
        let fake = dir.path().join("chrome");
        std::fs::write(&fake, "#!/bin/sh\necho 'boom' >&2\nexit 7\n").unwrap();
        std::fs::set_permissions(&fake, std::fs::Permissions::from_mode(0o755)).unwrap();

        let env = BrowserEnv {
            constrained: false,
            executable_override: Some(fake),
            cache_dir: None,
        };
        let err = print_to_pdf(&env, LaunchProfile::Standard, "<html></html>")
            .await
            .unwrap_err();
        match err {
            RenderError::BrowserExit { status: _, stderr } => {
                assert!(stderr.contains("boom"));
            }
            other => panic!("expected BrowserExit, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_missing_output_document_is_empty_output() {
        use std::os::unix::fs::PermissionsExt;

        // Exits cleanly but never writes the PDF.
        let dir = tempfile::TempDir::new().unwrap();
        let fake = dir.path().join("chrome");
        std::fs::write(&fake, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&fake, std::fs::Permissions::from_mode(0o755)).unwrap();

        let env = BrowserEnv {
            constrained: false,
            executable_override: Some(fake),
            cache_dir: None,
        };
        let err = print_to_pdf(&env, LaunchProfile::Standard, "<html></html>")
            .await
            .unwrap_err();
        assert!(matches!(err, RenderError::EmptyOutput));
    }
}
