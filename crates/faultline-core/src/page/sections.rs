//! Section renderers for the diagnostic page.
//!
//! Each function is a pure fragment renderer; [`super::render_page_with`]
//! concatenates them in fixed order. Escaping policy: snippet source lines
//! are always entity-escaped, the error-chain text never is, and the
//! title/summary pair follows [`RenderOptions::escape_header_text`].

use std::borrow::Cow;

use crate::model::{RequestSnapshot, ResultSnapshot};

use super::assets::{DEV_BADGE_PNG_BASE64, LOGO_PNG_BASE64, PAGE_STYLE};
use super::escape::escape_html;
use super::trace::format_error_chain;
use super::{RenderOptions, SourceSnippet};

/// Document shell, `<h1>` header with the inline images, and the one-line
/// request summary. A non-200 status prefixes the summary with
/// `Status code N`.
#[must_use]
pub fn render_header(
    request: &RequestSnapshot,
    result: &ResultSnapshot,
    title: &str,
    options: RenderOptions,
) -> String {
    let title: Cow<'_, str> = if options.escape_header_text {
        Cow::Owned(escape_html(title))
    } else {
        Cow::Borrowed(title)
    };
    let request_line = format!("{} {}", request.method, request.path);
    let request_line = if options.escape_header_text {
        escape_html(&request_line)
    } else {
        request_line
    };

    let mut s = String::new();
    s.push_str("<!DOCTYPE html>\n");
    s.push_str("<!-- faultline diagnostic page -->");
    s.push_str("<html>\n");
    s.push_str("  <head>\n");
    s.push_str(&format!("    <title>{}</title>\n", title));
    s.push_str("    ");
    s.push_str(PAGE_STYLE);
    s.push_str("  </head>\n");
    s.push_str("  <body>\n");
    s.push_str("    <h1>");
    s.push_str(&format!(
        "      <img id=\"logo\" src=\"data:image/png;base64,{}\"/>",
        LOGO_PNG_BASE64
    ));
    s.push_str("      ");
    s.push_str(&title);
    s.push_str(&format!(
        "      <img id=\"mode\" style=\"float:right; height:40px;\" title=\"Dev Mode!\" src=\"data:image/png;base64,{}\"/>",
        DEV_BADGE_PNG_BASE64
    ));
    s.push_str("    </h1>\n");
    s.push_str("    <p id=\"detail\">\n");
    if result.status_code != 200 {
        s.push_str(&format!("Status code {}", result.status_code));
    }
    s.push_str(&format!(" for request '{}'\n", request_line));
    s.push_str("    </p>\n");
    s
}

/// Source-location heading and the line-by-line snippet block.
///
/// The two inputs toggle independently: a location without an excerpt still
/// gets its heading, an excerpt without a location still gets its block. The
/// entry whose absolute number equals `error_line_number` is labelled
/// `line error`, every other one `line info`.
#[must_use]
pub fn render_source_snippet(
    location: Option<&str>,
    snippet: Option<&SourceSnippet>,
) -> String {
    let mut s = String::new();

    if let Some(location) = location {
        s.push_str(&format!("    <h2>{}</h2>\n", location));
    }

    if let Some(snippet) = snippet.filter(|sn| !sn.lines.is_empty()) {
        s.push_str("    <div>\n");
        for (i, line) in snippet.lines.iter().enumerate() {
            let line_number = snippet.first_line_number + i;
            let css_class = if line_number == snippet.error_line_number {
                "line error"
            } else {
                "line info"
            };
            s.push_str("<pre>");
            s.push_str(&format!(
                "<span class=\"{}\">{}</span>",
                css_class, line_number
            ));
            s.push_str(&format!(
                "<span class=\"route\">{}</span>",
                escape_html(line)
            ));
            s.push_str("</pre>");
        }
        s.push_str("    </div>\n");
    }

    s
}

/// Error-chain block. The chain text is trusted runtime output and embeds
/// unescaped.
#[must_use]
pub fn render_throwable(throwable: Option<&anyhow::Error>) -> String {
    let mut s = String::new();
    if let Some(throwable) = throwable {
        s.push_str("    <div>\n");
        s.push_str("      <pre><span class=\"stacktrace\">\n");
        s.push_str(&format_error_chain(throwable));
        s.push_str("      </span></pre>\n");
        s.push_str("    </div>");
    }
    s
}

#[must_use]
pub fn render_footer() -> &'static str {
    "  </body>\n</html>\n"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet(lines: &[&str], first: usize, error: usize) -> SourceSnippet {
        SourceSnippet::new(lines.iter().map(|l| l.to_string()).collect(), first, error)
    }

    #[test]
    fn header_summary_skips_status_prefix_for_200() {
        let out = render_header(
            &RequestSnapshot::new("GET", "/"),
            &ResultSnapshot::new(200),
            "Boom",
            RenderOptions::default(),
        );
        assert!(!out.contains("Status code"));
        assert!(out.contains(" for request 'GET /'\n"));
    }

    #[test]
    fn header_summary_carries_status_prefix_otherwise() {
        let out = render_header(
            &RequestSnapshot::new("POST", "/orders"),
            &ResultSnapshot::new(503),
            "Boom",
            RenderOptions::default(),
        );
        assert!(out.contains("Status code 503 for request 'POST /orders'\n"));
    }

    #[test]
    fn header_title_is_raw_by_default_and_escaped_on_request() {
        let raw = render_header(
            &RequestSnapshot::new("GET", "/"),
            &ResultSnapshot::new(500),
            "<b>Boom</b>",
            RenderOptions::default(),
        );
        assert!(raw.contains("<title><b>Boom</b></title>"));

        let escaped = render_header(
            &RequestSnapshot::new("GET", "/<svg>"),
            &ResultSnapshot::new(500),
            "<b>Boom</b>",
            RenderOptions {
                escape_header_text: true,
            },
        );
        assert!(escaped.contains("<title>&lt;b&gt;Boom&lt;/b&gt;</title>"));
        assert!(escaped.contains(" for request 'GET /&lt;svg&gt;'\n"));
    }

    #[test]
    fn snippet_numbers_lines_from_the_excerpt_start() {
        let out = render_source_snippet(None, Some(&snippet(&["a", "b", "c"], 10, 11)));
        assert!(out.contains("<span class=\"line info\">10</span>"));
        assert!(out.contains("<span class=\"line error\">11</span>"));
        assert!(out.contains("<span class=\"line info\">12</span>"));
    }

    #[test]
    fn snippet_out_of_window_error_line_highlights_nothing() {
        let out = render_source_snippet(None, Some(&snippet(&["a", "b"], 10, 99)));
        assert!(!out.contains("line error"));
        assert_eq!(out.matches("line info").count(), 2);
    }

    #[test]
    fn snippet_escapes_source_text() {
        let out = render_source_snippet(None, Some(&snippet(&["<script>alert(1)</script>"], 1, 1)));
        assert!(out.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!out.contains("<script>"));
    }

    #[test]
    fn snippet_block_is_omitted_for_empty_excerpt() {
        assert_eq!(render_source_snippet(None, Some(&snippet(&[], 1, 1))), "");
    }

    #[test]
    fn location_and_excerpt_toggle_independently() {
        let only_location = render_source_snippet(Some("routes/orders.rs"), None);
        assert!(only_location.contains("<h2>routes/orders.rs</h2>"));
        assert!(!only_location.contains("<div>"));

        let only_excerpt = render_source_snippet(None, Some(&snippet(&["x"], 1, 1)));
        assert!(!only_excerpt.contains("<h2>"));
        assert!(only_excerpt.contains("<div>"));
    }

    #[test]
    fn throwable_block_embeds_chain_text_unescaped() {
        let err = anyhow::anyhow!("<oops>");
        let out = render_throwable(Some(&err));
        assert!(out.contains("<span class=\"stacktrace\">\n<oops>\n"));
    }

    #[test]
    fn absent_throwable_renders_nothing() {
        assert_eq!(render_throwable(None), "");
    }
}
