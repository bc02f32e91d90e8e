//! Landing page served at `/`.
//!
//! A single self-contained HTML file with inline CSS and JavaScript that
//! talks to the JSON endpoints. Embedded at compile time via `include_str!`.

/// The complete landing page HTML.
pub const LANDING_HTML: &str = include_str!("../assets/index.html");
