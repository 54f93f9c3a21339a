// Pure navigation logic - no Tauri imports allowed.
// Address normalization and the commands issued to the active tab's view.

use log::{debug, info};
use url::Url;

use crate::error::Result;
use crate::modules::content_view::{ContentView, ContentViewFactory};
use crate::modules::tabs::TabManager;

/// Schemes that never carry a `//` authority part.
const OPAQUE_SCHEMES: &[&str] = &["about", "data", "mailto", "javascript", "blob", "file"];

/// Turns typed address-bar text into a dispatchable address.
///
/// Text that already carries a scheme is passed through untouched; anything
/// else gets `https://` prepended. No resolution or reachability checks are
/// done here: a bad host is the content view's problem.
pub fn normalize_address(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return "about:blank".to_string();
    }
    if has_scheme(trimmed) {
        return trimmed.to_string();
    }
    format!("https://{}", trimmed)
}

fn has_scheme(input: &str) -> bool {
    let Some((scheme, rest)) = input.split_once(':') else {
        return false;
    };
    if !is_scheme_name(scheme) {
        return false;
    }
    // "localhost:3000" would parse with scheme "localhost", so without "//"
    // only the schemes that are written that way count.
    rest.starts_with("//") || OPAQUE_SCHEMES.contains(&scheme.to_ascii_lowercase().as_str())
}

/// `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
fn is_scheme_name(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}

/// Icon location for a loaded page, derived from its origin.
pub fn favicon_for(location: &str) -> Option<String> {
    let url = Url::parse(location).ok()?;
    match url.scheme() {
        "http" | "https" => {
            let origin = url.origin().ascii_serialization();
            Some(format!("{}/favicon.ico", origin))
        }
        _ => None,
    }
}

/// Issues navigation commands to whichever tab is active.
pub struct Navigator {
    home: String,
}

impl Navigator {
    pub fn new(home: impl Into<String>) -> Self {
        Self { home: home.into() }
    }

    pub fn back<F: ContentViewFactory>(&self, tabs: &TabManager<F>) -> Result<()> {
        match tabs.active_tab() {
            Some(tab) => tab.view.back(),
            None => Ok(()),
        }
    }

    pub fn forward<F: ContentViewFactory>(&self, tabs: &TabManager<F>) -> Result<()> {
        match tabs.active_tab() {
            Some(tab) => tab.view.forward(),
            None => Ok(()),
        }
    }

    pub fn reload<F: ContentViewFactory>(&self, tabs: &TabManager<F>) -> Result<()> {
        match tabs.active_tab() {
            Some(tab) => tab.view.reload(),
            None => Ok(()),
        }
    }

    pub fn go_home<F: ContentViewFactory>(&self, tabs: &TabManager<F>) -> Result<()> {
        self.dispatch(tabs, self.home.clone()).map(|_| ())
    }

    /// Normalizes `text` and loads it in the active view. Returns the
    /// address that was dispatched.
    pub fn navigate<F: ContentViewFactory>(
        &self,
        tabs: &TabManager<F>,
        text: &str,
    ) -> Result<String> {
        let address = normalize_address(text);
        debug!("[Nav] '{}' -> '{}'", text, address);
        self.dispatch(tabs, address)
    }

    fn dispatch<F: ContentViewFactory>(
        &self,
        tabs: &TabManager<F>,
        address: String,
    ) -> Result<String> {
        if let Some(tab) = tabs.active_tab() {
            info!("[Nav] Tab {} loading {}", tab.id, address);
            tab.view.load(&address)?;
        }
        Ok(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingFactory, ViewCall};
    use rstest::rstest;

    // --- normalize_address tests ---

    #[rstest]
    // Explicit schemes are dispatched unchanged
    #[case("http://example.com", "http://example.com")]
    #[case("https://example.com/path?query=1", "https://example.com/path?query=1")]
    #[case("http://localhost:3000/cwanda.html", "http://localhost:3000/cwanda.html")]
    #[case("ftp://files.example.com", "ftp://files.example.com")]
    #[case("about:blank", "about:blank")]
    #[case("file:///home/user/doc.html", "file:///home/user/doc.html")]
    #[case("data:text/html,<h1>Hello</h1>", "data:text/html,<h1>Hello</h1>")]
    // Missing scheme gets https
    #[case("example.com", "https://example.com")]
    #[case("docs.rs/my-crate", "https://docs.rs/my-crate")]
    #[case("localhost:3000", "https://localhost:3000")]
    #[case("127.0.0.1:8080", "https://127.0.0.1:8080")]
    // "://" later in the text is not a scheme
    #[case("example.com/?next=https://a.test", "https://example.com/?next=https://a.test")]
    #[case("localhost:3000/go?u=http://x", "https://localhost:3000/go?u=http://x")]
    #[case("search?q=a://b", "https://search?q=a://b")]
    // Whitespace and empty input
    #[case("  example.com  ", "https://example.com")]
    #[case("", "about:blank")]
    #[case("   ", "about:blank")]
    fn test_normalize_address(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_address(input), expected);
    }

    #[rstest]
    #[case("example.com/?next=https://a.test")]
    #[case("localhost:3000/go?u=http://x")]
    #[case("docs.rs")]
    #[case("HTTPS://Example.com")]
    #[case("about:blank")]
    #[case("")]
    fn test_normalized_address_is_absolute(#[case] input: &str) {
        let address = normalize_address(input);
        assert!(Url::parse(&address).is_ok(), "{} -> {}", input, address);
    }

    #[rstest]
    #[case("https://example.com/page", Some("https://example.com/favicon.ico"))]
    #[case("http://localhost:3000/cwanda.html", Some("http://localhost:3000/favicon.ico"))]
    #[case("about:blank", None)]
    #[case("not a url", None)]
    fn test_favicon_for(#[case] location: &str, #[case] expected: Option<&str>) {
        assert_eq!(favicon_for(location).as_deref(), expected);
    }

    // --- Navigator tests ---

    fn two_tabs() -> TabManager<RecordingFactory> {
        let mut tabs = TabManager::new(RecordingFactory::default());
        tabs.add_tab("https://first.test/", "First").unwrap();
        tabs.add_tab("https://second.test/", "Second").unwrap();
        tabs
    }

    #[test]
    fn test_navigate_targets_active_view() {
        let tabs = two_tabs();
        let nav = Navigator::new("http://localhost:3000/cwanda.html");

        let sent = nav.navigate(&tabs, "example.com").unwrap();
        assert_eq!(sent, "https://example.com");

        let views: Vec<_> = tabs.iter().map(|t| t.view.clone()).collect();
        assert!(views[0].loads().is_empty());
        assert_eq!(views[1].loads(), vec!["https://example.com".to_string()]);
    }

    #[test]
    fn test_navigate_keeps_explicit_scheme() {
        let tabs = two_tabs();
        let nav = Navigator::new("http://localhost:3000/cwanda.html");
        assert_eq!(nav.navigate(&tabs, "http://example.com").unwrap(), "http://example.com");
    }

    #[test]
    fn test_history_commands() {
        let tabs = two_tabs();
        let nav = Navigator::new("http://localhost:3000/cwanda.html");
        nav.back(&tabs).unwrap();
        nav.forward(&tabs).unwrap();
        nav.reload(&tabs).unwrap();
        nav.go_home(&tabs).unwrap();

        let active = tabs.active_tab().unwrap();
        assert_eq!(
            active.view.calls(),
            vec![
                ViewCall::Back,
                ViewCall::Forward,
                ViewCall::Reload,
                ViewCall::Load("http://localhost:3000/cwanda.html".to_string()),
            ]
        );
    }

    #[test]
    fn test_commands_without_tabs_are_noops() {
        let tabs: TabManager<RecordingFactory> = TabManager::new(RecordingFactory::default());
        let nav = Navigator::new("about:blank");
        nav.back(&tabs).unwrap();
        assert_eq!(nav.navigate(&tabs, "example.com").unwrap(), "https://example.com");
    }
}
