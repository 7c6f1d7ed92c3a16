//! Recording model handle for unit tests

use async_trait::async_trait;
use finsummary_common::{FinSummaryError, Result};
use std::sync::Mutex;

use crate::llm_trait::LlmClient;

type Responder = Box<dyn Fn(usize, &str) -> Result<String> + Send + Sync>;

/// Records every prompt it receives and answers through a responder closure
pub struct RecordingClient {
    calls: Mutex<Vec<String>>,
    responder: Responder,
}

impl RecordingClient {
    pub fn new(responder: impl Fn(usize, &str) -> Result<String> + Send + Sync + 'static) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        }
    }

    /// Returns the prompt unchanged
    pub fn echo() -> Self {
        Self::new(|_, prompt| Ok(prompt.to_string()))
    }

    /// Returns "response-<call index>"
    pub fn numbered() -> Self {
        Self::new(|index, _| Ok(format!("response-{}", index)))
    }

    /// Fails on the call with the given index, numbered otherwise
    pub fn failing_at(fail_index: usize) -> Self {
        Self::new(move |index, _| {
            if index == fail_index {
                Err(FinSummaryError::network("connection reset"))
            } else {
                Ok(format!("response-{}", index))
            }
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmClient for RecordingClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(prompt.to_string());
            calls.len() - 1
        };
        (self.responder)(index, prompt)
    }

    fn model_name(&self) -> &str {
        "recording-mock"
    }
}
