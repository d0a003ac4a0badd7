//! Diagnostic page construction.
//!
//! The pure phase: a [`DiagnosticError`] descriptor plus request/result
//! snapshots go in, a complete HTML document comes out. Every optional field
//! of the descriptor toggles exactly one block of the page; the section
//! fragments are assembled in fixed order and nothing here can fail.

use crate::model::{RequestSnapshot, ResultSnapshot};

mod assets;
mod escape;
pub mod sections;
pub mod trace;

/// Contiguous excerpt of the offending source artifact.
///
/// Line numbers live in the caller's numbering space (1-based for most
/// frameworks). Nothing validates `error_line_number` against the excerpt
/// window; an out-of-window value simply highlights no entry.
#[derive(Debug, Clone)]
pub struct SourceSnippet {
    /// Raw source lines, in order.
    pub lines: Vec<String>,
    /// Line number of `lines[0]`.
    pub first_line_number: usize,
    /// The fault line, used only to pick the highlighted entry.
    pub error_line_number: usize,
}

impl SourceSnippet {
    pub fn new(
        lines: Vec<String>,
        first_line_number: usize,
        error_line_number: usize,
    ) -> Self {
        Self {
            lines,
            first_line_number,
            error_line_number,
        }
    }
}

/// Descriptor of a failure worth a developer-mode page.
///
/// Built by the caller before invoking the renderer; the renderer only
/// borrows it.
#[derive(Debug)]
pub struct DiagnosticError {
    /// Display title, raw. Escaping is governed by [`RenderOptions`].
    pub title: String,
    /// Identifier (URI or path) of the offending source artifact.
    pub source_location: Option<String>,
    /// Source excerpt around the fault.
    pub snippet: Option<SourceSnippet>,
    /// The failure itself, with its cause chain.
    pub throwable: Option<anyhow::Error>,
}

impl DiagnosticError {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            source_location: None,
            snippet: None,
            throwable: None,
        }
    }

    pub fn with_source_location(mut self, location: impl Into<String>) -> Self {
        self.source_location = Some(location.into());
        self
    }

    pub fn with_snippet(mut self, snippet: SourceSnippet) -> Self {
        self.snippet = Some(snippet);
        self
    }

    pub fn with_throwable(mut self, throwable: anyhow::Error) -> Self {
        self.throwable = Some(throwable);
        self
    }
}

/// Render-phase options.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Escape the title and the request summary line before embedding them.
    /// The default keeps the inherited behavior: both pass through raw.
    pub escape_header_text: bool,
}

/// Build the complete diagnostic page with default options.
#[must_use]
pub fn render_page(
    request: &RequestSnapshot,
    result: &ResultSnapshot,
    error: &DiagnosticError,
) -> String {
    render_page_with(request, result, error, RenderOptions::default())
}

/// Build the complete diagnostic page.
///
/// Pure string assembly; identical inputs yield byte-identical output.
#[must_use]
pub fn render_page_with(
    request: &RequestSnapshot,
    result: &ResultSnapshot,
    error: &DiagnosticError,
    options: RenderOptions,
) -> String {
    let mut page = String::new();
    page.push_str(&sections::render_header(
        request,
        result,
        &error.title,
        options,
    ));
    page.push_str(&sections::render_source_snippet(
        error.source_location.as_deref(),
        error.snippet.as_ref(),
    ));
    page.push_str(&sections::render_throwable(error.throwable.as_ref()));
    page.push_str(sections::render_footer());
    page
}
