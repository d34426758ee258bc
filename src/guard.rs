//! Size budget for the payloads embedded in the remote command.

use crate::encoding::{EncodedBundle, PayloadKind};
use crate::error::{Error, Result};
use std::fmt;
use tracing::info;

/// Measured payload sizes, in encoded characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeReport {
    pub primary: usize,
    pub auxiliary: usize,
    pub bootstrap: usize,
    pub limit: usize,
}

impl SizeReport {
    /// Measure every payload in `bundle` against `limit`.
    pub fn measure(bundle: &EncodedBundle, limit: usize) -> Self {
        let mut report = Self {
            primary: 0,
            auxiliary: 0,
            bootstrap: 0,
            limit,
        };
        for payload in bundle.payloads() {
            let slot = match payload.kind {
                PayloadKind::Primary => &mut report.primary,
                PayloadKind::Auxiliary => &mut report.auxiliary,
                PayloadKind::Bootstrap => &mut report.bootstrap,
            };
            *slot += payload.len();
        }
        report
    }

    /// Combined size of all payloads.
    pub fn total(&self) -> usize {
        self.primary + self.auxiliary + self.bootstrap
    }

    /// Whether the payloads fit in the budget. Reaching the limit exactly is allowed.
    pub fn fits(&self) -> bool {
        self.total() <= self.limit
    }
}

impl fmt::Display for SizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Combined size of {} ({:.2} KiB), {} ({:.2} KiB) and {} ({:.2} KiB) \
             is {:.2} KiB, exceeding the maximum allowed size of {:.0} KiB",
            PayloadKind::Primary,
            kib(self.primary),
            PayloadKind::Auxiliary,
            kib(self.auxiliary),
            PayloadKind::Bootstrap,
            kib(self.bootstrap),
            kib(self.total()),
            kib(self.limit)
        )
    }
}

fn kib(size: usize) -> f64 {
    size as f64 / 1024.0
}

/// Reject `bundle` if its encoded payloads exceed `limit` characters.
pub fn check_size(bundle: &EncodedBundle, limit: usize) -> Result<SizeReport> {
    let report = SizeReport::measure(bundle, limit);

    info!(
        primary = report.primary,
        auxiliary = report.auxiliary,
        bootstrap = report.bootstrap,
        total = report.total(),
        limit = report.limit,
        "payload sizes"
    );

    if report.fits() {
        Ok(report)
    } else {
        Err(Error::PayloadTooLarge(report))
    }
}
