//! HTML document synthesis.
//!
//! Two entry points, one shell. `synthesize` derives a full document from a
//! structured [`ResumeDocument`]; `wrap_document` wraps a pre-rendered
//! HTML+CSS snapshot of the live preview in the same outer shell without
//! reinterpreting it. Both are pure string functions: identical inputs
//! always produce byte-identical output.

pub mod resume;

use crate::models::{locale, theme};

/// Print-critical base styling injected into every rendered document.
///
/// The snapshot path ships raw preview markup whose ambient stylesheet
/// cascade is gone, so bullet rendering, flex/grid display and spacing are
/// re-asserted here with enough specificity to survive whatever CSS the
/// caller appends.
const PRINT_BASE_CSS: &str = r#"
          * {
            -webkit-font-smoothing: antialiased;
            -moz-osx-font-smoothing: grayscale;
            text-rendering: optimizeLegibility;
            font-feature-settings: "liga", "kern";
          }

          body {
            font-family: 'Inter', -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
            margin: 0;
            padding: 0;
            background: white;
            color: #000;
            font-size: 14px;
            line-height: 1.5;
          }

          .border.rounded-lg {
            border: none !important;
            border-radius: 0 !important;
            margin: 0 !important;
            max-width: none !important;
            width: 100% !important;
            padding: 0 !important;
          }

          #resume-preview {
            margin: 0 !important;
            padding: 20px !important;
            width: 100% !important;
            max-width: none !important;
            box-sizing: border-box !important;
          }

          .max-w-4xl {
            max-width: none !important;
            margin: 0 !important;
            padding: 0 !important;
          }

          .mx-auto {
            margin-left: 0 !important;
            margin-right: 0 !important;
          }

          ul.list-disc {
            list-style-type: disc !important;
            list-style-position: outside !important;
            padding-left: 1.2rem !important;
            margin-left: 0.5rem !important;
            margin-top: 0.25rem !important;
            margin-bottom: 0.25rem !important;
          }

          ul.list-disc li {
            line-height: 1.4 !important;
            margin-bottom: 0.125rem !important;
            display: list-item !important;
            padding-left: 0 !important;
            list-style-type: disc !important;
          }

          .mt-1 { margin-top: 0.25rem !important; }
          .pl-4 { padding-left: 1rem !important; }
          .ml-2 { margin-left: 0.5rem !important; }
          .leading-relaxed { line-height: 1.625 !important; }
          .text-xs { font-size: 0.75rem !important; line-height: 1rem !important; }
          .font-medium { font-weight: 500 !important; }
          .flex { display: flex !important; }
          .grid { display: grid !important; }
          .md\:grid-cols-2 { grid-template-columns: repeat(2, minmax(0, 1fr)) !important; }
          .items-center { align-items: center !important; }
          .justify-between { justify-content: space-between !important; }
          .flex-wrap { flex-wrap: wrap !important; }
          .gap-4 { gap: 1rem !important; }
          .gap-2 { gap: 0.5rem !important; }

          * {
            visibility: visible !important;
            opacity: 1 !important;
          }
"#;

/// Escapes HTML special characters in user-supplied text.
///
/// Applied to every user-controlled string before interpolation; this is the
/// sole injection defense in the pipeline, so there is no code path that
/// inserts unescaped user text into the output markup.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wraps a body fragment and optional extra CSS in the outer document shell:
/// UTF-8 metadata, the Inter web font, the Tailwind runtime, and the
/// print-critical base styles. The fragment and CSS are inserted verbatim.
pub fn wrap_document(body: &str, extra_css: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
      <html lang="en">
      <head>
        <meta charset="UTF-8">
        <meta name="viewport" content="width=device-width, initial-scale=1.0">
        <title>Resume</title>
        <link href="https://fonts.googleapis.com/css2?family=Inter:wght@300;400;500;600;700&display=swap" rel="stylesheet">
        <script src="https://cdn.tailwindcss.com"></script>
        <style>
{PRINT_BASE_CSS}
          {extra_css}
        </style>
      </head>
      <body>
        {body}
      </body>
      </html>
    "#
    )
}

/// Synthesizes a complete HTML document from a structured resume.
///
/// The theme selector and language code are resolved against the process-wide
/// tables, falling back to the defaults for unrecognized values.
pub fn synthesize(doc: &crate::models::resume::ResumeDocument, theme_key: &str, language: &str) -> String {
    let theme = theme::resolve(theme_key);
    let strings = locale::resolve(language);
    wrap_document(&resume::body(doc, theme, strings), "")
}
