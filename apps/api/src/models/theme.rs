//! Process-wide immutable theme table.
//!
//! A document stores only the selector key; colors are resolved at render
//! time so the same document renders consistently under any theme. The table
//! is `'static` and read-only, safe to share across concurrent requests.

/// The four color roles a theme resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub text: &'static str,
    pub border: &'static str,
}

const fn theme(primary: &'static str, secondary: &'static str) -> Theme {
    Theme {
        primary,
        secondary,
        text: primary,
        border: primary,
    }
}

/// Selector used when the requested key is unrecognized.
pub const DEFAULT_THEME_KEY: &str = "blue";

pub const THEMES: &[(&str, Theme)] = &[
    ("blue", theme("#2563eb", "#dbeafe")),
    ("green", theme("#16a34a", "#dcfce7")),
    ("purple", theme("#9333ea", "#f3e8ff")),
    ("red", theme("#dc2626", "#fee2e2")),
    ("gray", theme("#374151", "#e5e7eb")),
    ("indigo", theme("#4f46e5", "#e0e7ff")),
    ("teal", theme("#0d9488", "#ccfbf1")),
    ("orange", theme("#ea580c", "#fed7aa")),
    ("pink", theme("#db2777", "#fce7f3")),
    ("cyan", theme("#0891b2", "#cffafe")),
    ("emerald", theme("#059669", "#d1fae5")),
    ("slate", theme("#334155", "#e2e8f0")),
    ("amber", theme("#d97706", "#fef3c7")),
    ("lime", theme("#65a30d", "#ecfccb")),
    ("rose", theme("#e11d48", "#ffe4e6")),
];

/// Resolves a selector key to its theme, falling back to the default theme
/// for unrecognized keys.
pub fn resolve(key: &str) -> &'static Theme {
    THEMES
        .iter()
        .find(|(name, _)| *name == key)
        .or_else(|| THEMES.iter().find(|(name, _)| *name == DEFAULT_THEME_KEY))
        .map(|(_, theme)| theme)
        .expect("default theme present in table")
}
