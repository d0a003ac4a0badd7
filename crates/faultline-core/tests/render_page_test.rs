//! End-to-end render scenarios for the diagnostic page.

use faultline_core::{
    render_page, render_page_with, DiagnosticError, RenderOptions, RequestSnapshot,
    ResultSnapshot, SourceSnippet,
};

fn lines(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|t| t.to_string()).collect()
}

#[test]
fn minimal_descriptor_renders_header_and_nothing_else() {
    // Title only: no location, no excerpt, no throwable.
    let error = DiagnosticError::new("NullPointerException");
    let page = render_page(
        &RequestSnapshot::new("GET", "/users/5"),
        &ResultSnapshot::new(500),
        &error,
    );

    assert!(page.starts_with("<!DOCTYPE html>\n"));
    assert!(page.contains("<title>NullPointerException</title>"));
    assert!(page.contains("Status code 500 for request 'GET /users/5'"));
    assert!(!page.contains("<h2>"));
    assert!(!page.contains("class=\"line"));
    assert!(!page.contains("class=\"stacktrace\""));
    assert!(page.ends_with("  </body>\n</html>\n"));
}

#[test]
fn status_200_omits_the_status_prefix() {
    let page = render_page(
        &RequestSnapshot::new("GET", "/healthz"),
        &ResultSnapshot::new(200),
        &DiagnosticError::new("Oops"),
    );
    assert!(!page.contains("Status code"));
    assert!(page.contains(" for request 'GET /healthz'"));
}

#[test]
fn three_line_excerpt_numbers_and_flags_the_error_line() {
    let error = DiagnosticError::new("Boom")
        .with_snippet(SourceSnippet::new(lines(&["a", "b", "c"]), 10, 11));
    let page = render_page(
        &RequestSnapshot::new("GET", "/"),
        &ResultSnapshot::new(500),
        &error,
    );

    assert!(page.contains("<span class=\"line info\">10</span>"));
    assert!(page.contains("<span class=\"line error\">11</span>"));
    assert!(page.contains("<span class=\"line info\">12</span>"));
    assert_eq!(page.matches("<pre>").count(), 3);
    assert_eq!(page.matches("line error").count(), 1);
}

#[test]
fn error_line_outside_the_window_flags_no_entry() {
    let error = DiagnosticError::new("Boom")
        .with_snippet(SourceSnippet::new(lines(&["a", "b", "c"]), 10, 42));
    let page = render_page(
        &RequestSnapshot::new("GET", "/"),
        &ResultSnapshot::new(500),
        &error,
    );

    assert_eq!(page.matches("line info").count(), 3);
    assert!(!page.contains("line error"));
}

#[test]
fn source_lines_are_entity_escaped() {
    let error = DiagnosticError::new("Boom")
        .with_snippet(SourceSnippet::new(lines(&["<script>alert(1)</script>"]), 1, 1));
    let page = render_page(
        &RequestSnapshot::new("GET", "/"),
        &ResultSnapshot::new(500),
        &error,
    );

    assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(!page.contains("<script>alert(1)</script>"));
}

#[test]
fn location_heading_renders_without_an_excerpt() {
    let error = DiagnosticError::new("Boom").with_source_location("src/routes/orders.rs");
    let page = render_page(
        &RequestSnapshot::new("GET", "/"),
        &ResultSnapshot::new(500),
        &error,
    );

    assert!(page.contains("<h2>src/routes/orders.rs</h2>"));
    assert!(!page.contains("class=\"line"));
}

#[test]
fn throwable_chain_is_embedded_verbatim() {
    use anyhow::Context;

    let err = anyhow::Error::new(std::io::Error::other("socket closed"))
        .context("handler panicked");
    let error = DiagnosticError::new("Boom").with_throwable(err);
    let page = render_page(
        &RequestSnapshot::new("GET", "/"),
        &ResultSnapshot::new(500),
        &error,
    );

    assert!(page.contains("<pre><span class=\"stacktrace\">\n"));
    assert!(page.contains("handler panicked\n"));
    assert!(page.contains("Caused by: socket closed\n"));
}

#[test]
fn header_text_escaping_is_opt_in() {
    let request = RequestSnapshot::new("GET", "/q?x=<img>");
    let result = ResultSnapshot::new(500);
    let error = DiagnosticError::new("<script>alert(1)</script>");

    let raw = render_page(&request, &result, &error);
    assert!(raw.contains("<title><script>alert(1)</script></title>"));
    assert!(raw.contains("for request 'GET /q?x=<img>'"));

    let escaped = render_page_with(
        &request,
        &result,
        &error,
        RenderOptions {
            escape_header_text: true,
        },
    );
    assert!(escaped.contains("<title>&lt;script&gt;alert(1)&lt;/script&gt;</title>"));
    assert!(escaped.contains("for request 'GET /q?x=&lt;img&gt;'"));
    assert!(!escaped.contains("<title><script>"));
}

#[test]
fn rendering_is_idempotent() {
    let request = RequestSnapshot::new("PUT", "/things/9");
    let result = ResultSnapshot::new(422);
    let error = DiagnosticError::new("Unprocessable")
        .with_source_location("src/things.rs")
        .with_snippet(SourceSnippet::new(lines(&["fn put()", "  todo!()"]), 7, 8));

    let first = render_page(&request, &result, &error);
    let second = render_page(&request, &result, &error);
    assert_eq!(first, second);
}

#[test]
fn every_section_present_appears_in_document_order() {
    use anyhow::anyhow;

    let error = DiagnosticError::new("Boom")
        .with_source_location("src/lib.rs")
        .with_snippet(SourceSnippet::new(lines(&["x"]), 3, 3))
        .with_throwable(anyhow!("broken"));
    let page = render_page(
        &RequestSnapshot::new("GET", "/"),
        &ResultSnapshot::new(500),
        &error,
    );

    let detail = page.find("<p id=\"detail\">").unwrap();
    let heading = page.find("<h2>src/lib.rs</h2>").unwrap();
    let snippet = page.find("<span class=\"line error\">3</span>").unwrap();
    let stacktrace = page.find("<span class=\"stacktrace\">").unwrap();
    let footer = page.find("</body>").unwrap();
    assert!(detail < heading && heading < snippet && snippet < stacktrace && stacktrace < footer);
}
