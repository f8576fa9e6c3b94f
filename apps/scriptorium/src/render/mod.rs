//! # Page Renderer
//!
//! HTML assembly for the static site. Plain string building against the
//! engine's read-only views. Content and ordering decisions all live in
//! the engine; this layer only formats what it is handed.
//!
//! Any id lookup miss renders as an empty or placeholder section, never
//! as a fault: the engine's lookups are total and so is the renderer.

pub mod pages;

pub use pages::SiteBuilder;

/// Breadcrumb separator, a rightwards arrow entity.
const CRUMB_SEPARATOR: &str = " &#8594; ";

/// Prefix a site-relative path with the configured base path.
#[must_use]
pub fn href(base_path: &str, path: &str) -> String {
    format!("{base_path}{path}")
}

/// Assemble a breadcrumb trail. Items are (label, target) pairs; a
/// `None` target renders as plain text (the current page).
#[must_use]
pub fn breadcrumbs(base_path: &str, items: &[(String, Option<String>)]) -> String {
    let parts: Vec<String> = items
        .iter()
        .map(|(label, target)| match target {
            Some(path) => format!("<a href=\"{}\">{label}</a>", href(base_path, path)),
            None => label.clone(),
        })
        .collect();
    format!(
        "<nav class=\"breadcrumbs\">{}</nav>",
        parts.join(CRUMB_SEPARATOR)
    )
}

/// Wrap a page body in the shared document shell.
#[must_use]
pub fn layout(base_path: &str, title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <link rel=\"stylesheet\" href=\"{}\">\n\
         </head>\n\
         <body>\n{body}\n</body>\n\
         </html>\n",
        href(base_path, "/style.css")
    )
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn href_prefixes_base_path() {
        assert_eq!(href("", "/index.html"), "/index.html");
        assert_eq!(href("/corpus", "/index.html"), "/corpus/index.html");
    }

    #[test]
    fn breadcrumbs_link_all_but_plain_items() {
        let trail = breadcrumbs(
            "/corpus",
            &[
                ("Home".to_string(), Some("/index.html".to_string())),
                ("Current".to_string(), None),
            ],
        );
        assert_eq!(
            trail,
            "<nav class=\"breadcrumbs\">\
             <a href=\"/corpus/index.html\">Home</a> &#8594; Current\
             </nav>"
        );
    }

    #[test]
    fn layout_carries_title_and_stylesheet() {
        let page = layout("", "Test Page", "<p>hello</p>");
        assert!(page.contains("<title>Test Page</title>"));
        assert!(page.contains("href=\"/style.css\""));
        assert!(page.contains("<p>hello</p>"));
    }
}
