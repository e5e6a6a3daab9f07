//! Trait abstraction for the submit callback to enable mocking in tests

use crate::state::FieldValues;
use anyhow::Result;
use async_trait::async_trait;

/// Receives the validated values once a submit attempt is accepted.
/// May take arbitrarily long; the form stays in its submitting phase until
/// the returned future resolves.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmitHandler: Send + Sync {
    async fn submit(&self, values: FieldValues) -> Result<()>;
}
