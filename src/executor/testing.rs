use super::{ExecutionRequest, Runner};
use crate::error::WineResult;
use std::process::Child;
use std::sync::Mutex;

/// Records every request instead of running it, and answers captures with a
/// canned output.
#[derive(Default)]
pub struct RecordingRunner {
    output: Option<String>,
    requests: Mutex<Vec<ExecutionRequest>>,
}

impl RecordingRunner {
    pub fn with_output<S: Into<String>>(output: S) -> Self {
        Self {
            output: Some(output.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ExecutionRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Command lines of the recorded requests, in order.
    pub fn command_lines(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|request| request.command.as_command_line())
            .collect()
    }
}

impl Runner for RecordingRunner {
    fn spawn(&self, request: ExecutionRequest) -> WineResult<Option<Child>> {
        self.requests.lock().unwrap().push(request);
        Ok(None)
    }

    fn capture(&self, request: ExecutionRequest) -> WineResult<Option<String>> {
        self.requests.lock().unwrap().push(request);
        Ok(self.output.clone())
    }
}
