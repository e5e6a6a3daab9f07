//! Stand-in submit handler: waits, then logs the submitted values

use super::traits::SubmitHandler;
use crate::state::FieldValues;
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Pretends to send the form somewhere. Nothing is stored.
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    delay: Duration,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl SubmitHandler for SimulatedSubmitter {
    async fn submit(&self, values: FieldValues) -> Result<()> {
        tokio::time::sleep(self.delay).await;
        let payload = serde_json::to_string(&values)?;
        tracing::info!(%payload, "contact form submitted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FieldValue;

    #[tokio::test]
    async fn test_submit_succeeds_after_delay() {
        let submitter = SimulatedSubmitter::new(Duration::from_millis(1));
        let mut values = FieldValues::new();
        values.insert("city".to_string(), FieldValue::from("Graz"));
        values.insert("terms".to_string(), FieldValue::Bool(true));
        assert!(submitter.submit(values).await.is_ok());
    }

    #[tokio::test]
    async fn test_submit_waits_for_delay() {
        let submitter = SimulatedSubmitter::new(Duration::from_millis(30));
        let started = std::time::Instant::now();
        submitter.submit(FieldValues::new()).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(30));
    }
}
