//! Reporting sink for generation progress
//!
//! The generator never writes to the console directly; it reports through an
//! injected sink so hosts can redirect or silence the output.

use std::sync::Mutex;

pub trait Reporter {
    fn report(&self, message: &str);
}

/// Writes reports to stdout.
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, message: &str) {
        println!("{}", message);
    }
}

/// Discards all reports. Used for quiet mode.
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&self, _message: &str) {}
}

/// Collects reports in memory for assertions in tests.
#[derive(Default)]
pub struct CollectingReporter {
    lines: Mutex<Vec<String>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("reporter lock poisoned").clone()
    }
}

impl Reporter for CollectingReporter {
    fn report(&self, message: &str) {
        self.lines
            .lock()
            .expect("reporter lock poisoned")
            .push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_reporter_keeps_order() {
        let reporter = CollectingReporter::new();
        reporter.report("first");
        reporter.report("second");
        assert_eq!(reporter.lines(), vec!["first", "second"]);
    }
}
