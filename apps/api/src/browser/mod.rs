//! Headless browser backend: launch profiles, executable discovery, and the
//! print driver.

pub mod pdf;
pub mod resolver;

// ────────────────────────────────────────────────────────────────────────────
// Page geometry
// ────────────────────────────────────────────────────────────────────────────

/// Viewport width in CSS pixels: A4 width at 96 dpi.
pub const PAGE_WIDTH_PX: u32 = 794;
/// Viewport height in CSS pixels: A4 height at 96 dpi.
pub const PAGE_HEIGHT_PX: u32 = 1123;
/// Layout pre-measurement density. The PDF itself stays vector/paginated.
pub const DEVICE_SCALE_FACTOR: u32 = 2;
/// Virtual-time budget granted before capture: pending sub-resource and font
/// loads must settle within it, which stands in for the network-idle +
/// DOM-ready + fonts-ready composite wait.
pub const VIRTUAL_TIME_BUDGET_MS: u32 = 10_000;

// ────────────────────────────────────────────────────────────────────────────
// Launch profiles
// ────────────────────────────────────────────────────────────────────────────

/// Process argument configuration for a launch attempt.
///
/// `Standard` is tried first; `Reduced` is the single documented retry with a
/// more-compatible set when the primary launch or render fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchProfile {
    Standard,
    Reduced,
}

const STANDARD_ARGS: &[&str] = &[
    "--no-sandbox",
    "--disable-setuid-sandbox",
    "--disable-dev-shm-usage",
    "--disable-accelerated-2d-canvas",
    "--no-first-run",
    "--no-zygote",
    "--single-process",
    "--disable-gpu",
];

/// Extras appended on constrained/serverless hosts.
const CONSTRAINED_EXTRA_ARGS: &[&str] = &[
    "--disable-extensions",
    "--disable-background-networking",
    "--disable-component-update",
    "--no-default-browser-check",
    "--mute-audio",
    "--font-render-hinting=none",
];

const REDUCED_ARGS: &[&str] = &[
    "--no-sandbox",
    "--disable-setuid-sandbox",
    "--disable-dev-shm-usage",
];

/// Returns the process argument set for a launch profile.
pub fn launch_args(profile: LaunchProfile, constrained: bool) -> Vec<&'static str> {
    match profile {
        LaunchProfile::Standard => {
            let mut args = STANDARD_ARGS.to_vec();
            if constrained {
                args.extend_from_slice(CONSTRAINED_EXTRA_ARGS);
            }
            args
        }
        LaunchProfile::Reduced => REDUCED_ARGS.to_vec(),
    }
}
