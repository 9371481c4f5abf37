use std::cell::RefCell;

/// Sink for everything a run has to say. The batch extractor only talks to
/// this trait, so it can run without a console.
pub trait Reporter {
    fn success(&self, message: &str);
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
    fn debug(&self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLevel {
    Success,
    Info,
    Warning,
    Error,
    Debug,
}

/// Collects messages in memory.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    entries: RefCell<Vec<(ReportLevel, String)>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(ReportLevel, String)> {
        self.entries.borrow().clone()
    }

    pub fn messages(&self, level: ReportLevel) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn contains(&self, level: ReportLevel, needle: &str) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|(l, m)| *l == level && m.contains(needle))
    }

    fn push(&self, level: ReportLevel, message: &str) {
        self.entries.borrow_mut().push((level, message.to_string()));
    }
}

impl Reporter for MemoryReporter {
    fn success(&self, message: &str) {
        self.push(ReportLevel::Success, message);
    }

    fn info(&self, message: &str) {
        self.push(ReportLevel::Info, message);
    }

    fn warning(&self, message: &str) {
        self.push(ReportLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.push(ReportLevel::Error, message);
    }

    fn debug(&self, message: &str) {
        self.push(ReportLevel::Debug, message);
    }
}
