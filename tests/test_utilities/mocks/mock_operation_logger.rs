use solution_pruner::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock OperationLogger for testing that captures messages per level
#[derive(Default, Clone)]
pub struct MockOperationLogger {
    pub messages: Arc<Mutex<Vec<(&'static str, String)>>>,
}

impl MockOperationLogger {
    pub fn new() -> Self {
        Self::default()
    }

    fn at(&self, level: &str) -> Vec<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message.clone())
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.at("warning")
    }

    pub fn information(&self) -> Vec<String> {
        self.at("information")
    }

    pub fn errors(&self) -> Vec<String> {
        self.at("error")
    }

    fn push(&self, level: &'static str, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push((level, message.to_string()));
    }
}

impl OperationLogger for MockOperationLogger {
    fn verbose(&self, message: &str) {
        self.push("verbose", message);
    }

    fn information(&self, message: &str) {
        self.push("information", message);
    }

    fn warning(&self, message: &str) {
        self.push("warning", message);
    }

    fn error(&self, message: &str) {
        self.push("error", message);
    }
}
