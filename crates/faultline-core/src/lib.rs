//! Developer-mode diagnostic error pages for web services.
//!
//! Two phases, composed sequentially: a pure render phase turning a
//! [`page::DiagnosticError`] descriptor plus request/result snapshots into a
//! complete HTML document, and a one-shot delivery phase writing that
//! document into a framework-provided response body.

pub mod deliver;
pub mod model;
pub mod page;

pub use deliver::{
    Delivery, DeliveryFault, FailurePolicy, FaultSink, InternalServerError, ResponseChannel,
};
pub use model::{RequestSnapshot, ResultSnapshot};
pub use page::{render_page, render_page_with, DiagnosticError, RenderOptions, SourceSnippet};
