//! Shell assets: the minimal resources needed to render offline.
//!
//! The enumeration here is shared with the offline cache worker's install
//! step; keep the two in sync by using [`SHELL_PATHS`] on both sides.

/// Paths pre-populated into the offline cache at install.
pub const SHELL_PATHS: &[&str] = &["/", "/manifest.webmanifest", "/icon.svg"];

/// The application icon.
pub const ICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64">
<rect width="64" height="64" rx="12" fill="#1f2430"/>
<path d="M14 16h22a8 8 0 0 1 8 8v24h-22a8 8 0 0 1-8-8z" fill="#e8c266"/>
<path d="M20 24h16M20 32h16M20 40h10" stroke="#1f2430" stroke-width="3" stroke-linecap="round"/>
</svg>
"##;

/// Build the web app manifest for a book.
pub fn manifest_json(book_title: &str) -> String {
    serde_json::json!({
        "name": book_title,
        "short_name": book_title,
        "start_url": "/",
        "display": "standalone",
        "background_color": "#1f2430",
        "theme_color": "#1f2430",
        "icons": [
            { "src": "/icon.svg", "sizes": "any", "type": "image/svg+xml" }
        ]
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_carries_title_and_icon() {
        let manifest = manifest_json("Test Book");
        assert!(manifest.contains(r#""name":"Test Book""#));
        assert!(manifest.contains("/icon.svg"));
    }

    #[test]
    fn test_shell_paths_include_root() {
        assert!(SHELL_PATHS.contains(&"/"));
    }
}
