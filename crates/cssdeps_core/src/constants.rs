//! File extensions treated as stylesheets.
//!
//! Plain `.css` plus the PostCSS extensions, which share CSS syntax for everything the
//! dependency walk looks at (`@import` rules and `url(...)` values).

/// Extensions of files collected for dependency extraction
pub const STYLESHEET_EXTENSIONS: &[&str] = &[
    "css",     // Plain CSS
    "pcss",    // PostCSS
    "postcss", // PostCSS (long form)
];
