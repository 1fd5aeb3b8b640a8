//! # Progress Reporting
//!
//! Long bakes report `(stage, done, total)` counters to an external sink.
//! There is no cancellation.

use std::fmt;

/// Pipeline stage reported to a [`Progress`] sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BakeStage {
    /// Fine subdivision of plain liquid cells.
    FinePass,
    /// Coarse infill of the remaining wet cells.
    Infill,
    /// Circular boundary closure.
    Closure,
    /// Cutout subtraction, one step per cutout.
    Subtract,
    /// Final weld and cleanup.
    Cleanup,
}

impl fmt::Display for BakeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BakeStage::FinePass => "fine pass",
            BakeStage::Infill => "infill",
            BakeStage::Closure => "closure",
            BakeStage::Subtract => "subtract",
            BakeStage::Cleanup => "cleanup",
        };
        f.write_str(name)
    }
}

/// Receiver of progress counters.
pub trait Progress {
    fn report(&mut self, stage: BakeStage, done: usize, total: usize);
}

impl<F> Progress for F
where
    F: FnMut(BakeStage, usize, usize),
{
    fn report(&mut self, stage: BakeStage, done: usize, total: usize) {
        self(stage, done, total)
    }
}

/// Sink that discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn report(&mut self, _stage: BakeStage, _done: usize, _total: usize) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_sink_records_reports() {
        let mut seen = Vec::new();
        {
            let mut sink =
                |stage: BakeStage, done: usize, total: usize| seen.push((stage, done, total));
            sink.report(BakeStage::Infill, 1, 2);
        }
        assert_eq!(seen, vec![(BakeStage::Infill, 1, 2)]);
        assert_eq!(BakeStage::Subtract.to_string(), "subtract");
    }
}
