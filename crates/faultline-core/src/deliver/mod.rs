//! Delivery of a rendered page into the framework's response body.
//!
//! Exactly one attempt: finalize headers, write the page, flush, release.
//! The body is scoped to the call and dropped on every exit path, failed
//! writes included. What happens on an I/O fault is the caller's policy:
//! strict escalates a typed [`InternalServerError`], lenient hands a
//! [`DeliveryFault`] to the injected sink and returns normally.

use crate::model::ResultSnapshot;
use serde::Serialize;
use std::io::{self, Write};
use std::sync::Arc;

/// Framework capability handing out the response body for one request.
pub trait ResponseChannel {
    /// Write-capable body, released by dropping.
    type Body: Write;

    /// Commit status and headers for `result` and yield the body. Called at
    /// most once per delivery.
    fn finalize_headers(&mut self, result: &ResultSnapshot) -> io::Result<Self::Body>;
}

/// What to do when the response channel faults mid-delivery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Escalate as [`InternalServerError`]; the framework then serves its
    /// standard error response instead of the page.
    Strict,
    /// Record the fault and return normally. The client may be left with a
    /// partial or empty body; that is accepted, not remediated.
    #[default]
    Lenient,
}

/// Fault record handed to the sink when a lenient delivery fails.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryFault {
    /// Status code the response was finalized with.
    pub status_code: u16,
    /// Text of the underlying I/O fault.
    pub error: String,
}

/// Sink receiving lenient-mode faults. Injected by the host; the default
/// reports through `tracing`.
pub type FaultSink = Arc<dyn Fn(&DeliveryFault) + Send + Sync>;

/// Fatal strict-mode signal, carrying the original I/O fault as its source.
#[derive(Debug, thiserror::Error)]
#[error("internal server error: unable to deliver diagnostic page")]
pub struct InternalServerError(#[from] pub io::Error);

/// One-shot deliverer for a rendered page.
pub struct Delivery {
    policy: FailurePolicy,
    faults: FaultSink,
}

impl Delivery {
    pub fn new(policy: FailurePolicy) -> Self {
        Self {
            policy,
            faults: default_fault_sink(),
        }
    }

    /// Deliverer that escalates channel faults.
    pub fn strict() -> Self {
        Self::new(FailurePolicy::Strict)
    }

    /// Deliverer that records channel faults and carries on.
    pub fn lenient() -> Self {
        Self::new(FailurePolicy::Lenient)
    }

    /// Replace the fault sink. Only lenient deliveries consult it.
    #[must_use]
    pub fn with_fault_sink(mut self, sink: FaultSink) -> Self {
        self.faults = sink;
        self
    }

    /// Write `page` into the channel's body for `result`: one attempt, no
    /// retries, no fallback rendering.
    pub fn send<C: ResponseChannel>(
        &self,
        page: &str,
        channel: &mut C,
        result: &ResultSnapshot,
    ) -> Result<(), InternalServerError> {
        match write_page(page, channel, result) {
            Ok(()) => Ok(()),
            Err(e) => match self.policy {
                FailurePolicy::Strict => Err(InternalServerError(e)),
                FailurePolicy::Lenient => {
                    let fault = DeliveryFault {
                        status_code: result.status_code,
                        error: e.to_string(),
                    };
                    (self.faults)(&fault);
                    Ok(())
                }
            },
        }
    }
}

/// The body exists only inside this call; drop releases it on every path.
fn write_page<C: ResponseChannel>(
    page: &str,
    channel: &mut C,
    result: &ResultSnapshot,
) -> io::Result<()> {
    let mut body = channel.finalize_headers(result)?;
    body.write_all(page.as_bytes())?;
    body.flush()?;
    Ok(())
}

fn default_fault_sink() -> FaultSink {
    Arc::new(|fault: &DeliveryFault| {
        tracing::error!(
            status = fault.status_code,
            error = %fault.error,
            "unable to deliver diagnostic page"
        );
    })
}
