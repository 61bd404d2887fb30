//! A small, allocation-light diagnostic channel.
//!
//! The upstream project reports runtime conditions (step size critically
//! small, proximity caps engaging) via Bevy's `warn!`/`info!` macros. This
//! crate has no logging facade or global state (spec section 5 forbids
//! process-wide singletons), so callers that need to observe non-fatal
//! conditions — most notably adaptive-step exhaustion — pass a
//! `&mut DiagnosticSink` and drain it themselves.

/// Severity of a diagnostic event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
}

/// A single diagnostic event.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub subsystem: &'static str,
    pub message: String,
}

/// Collects diagnostics emitted during a solver or propagation call.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticSink {
    events: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, subsystem: &'static str, message: impl Into<String>) {
        self.events.push(Diagnostic {
            severity: Severity::Warning,
            subsystem,
            message: message.into(),
        });
    }

    pub fn info(&mut self, subsystem: &'static str, message: impl Into<String>) {
        self.events.push(Diagnostic {
            severity: Severity::Info,
            subsystem,
            message: message.into(),
        });
    }

    pub fn events(&self) -> &[Diagnostic] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_collects_in_order() {
        let mut sink = DiagnosticSink::new();
        sink.warn("adaptive_step", "min_step reached with err > tol");
        sink.info("sgp4", "mean motion extrapolated past table bound");
        assert_eq!(sink.events().len(), 2);
        assert_eq!(sink.events()[0].severity, Severity::Warning);
        assert_eq!(sink.events()[1].severity, Severity::Info);
    }

    #[test]
    fn drain_empties_sink() {
        let mut sink = DiagnosticSink::new();
        sink.warn("x", "y");
        let drained = sink.drain();
        assert_eq!(drained.len(), 1);
        assert!(sink.is_empty());
    }
}
