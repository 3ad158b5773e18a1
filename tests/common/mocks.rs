use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use videogen::{
    Error, Result,
    provider::{GenerationInput, ProviderOutput, VideoProvider},
};

/// Mock video provider for testing
pub struct MockVideoProvider {
    pub outputs: Arc<Mutex<Vec<ProviderOutput>>>,
    pub inputs: Arc<Mutex<Vec<GenerationInput>>>,
    pub error: Option<String>,
}

impl MockVideoProvider {
    pub fn new() -> Self {
        Self {
            outputs: Arc::new(Mutex::new(Vec::new())),
            inputs: Arc::new(Mutex::new(Vec::new())),
            error: None,
        }
    }

    pub fn with_outputs(self, outputs: Vec<ProviderOutput>) -> Self {
        *self.outputs.lock().unwrap() = outputs;
        self
    }

    pub fn with_error(mut self, error: String) -> Self {
        self.error = Some(error);
        self
    }

    /// Handle to the recorded generation inputs; stays valid after the
    /// provider moves into the app state.
    pub fn inputs_handle(&self) -> Arc<Mutex<Vec<GenerationInput>>> {
        Arc::clone(&self.inputs)
    }
}

#[async_trait]
impl VideoProvider for MockVideoProvider {
    async fn generate(&self, input: &GenerationInput) -> Result<ProviderOutput> {
        self.inputs.lock().unwrap().push(input.clone());

        if let Some(ref error) = self.error {
            return Err(Error::provider(error.clone()));
        }

        let mut outputs = self.outputs.lock().unwrap();
        if outputs.is_empty() {
            return Err(Error::provider("No more mock outputs available"));
        }

        Ok(outputs.remove(0))
    }
}

impl Default for MockVideoProvider {
    fn default() -> Self {
        Self::new()
    }
}
