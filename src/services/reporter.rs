// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reporting for failures that never reach an HTTP response.

use crate::error::AppError;

/// Sink for errors raised by background work.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, task: &'static str, error: &AppError);
}

/// Default reporter: emits a structured error event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, task: &'static str, error: &AppError) {
        tracing::error!(task, error = %error, "Background task failed");
    }
}
