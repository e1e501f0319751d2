// ── Backend call wrapper ──
//
// Every adapter method runs its backend work through `api_call` exactly
// once, so failures reach callers already classified and named.

use std::future::Future;

use tracing::warn;

use crate::error::CoreError;

/// Await `fut`, translating any transport failure into a [`CoreError`]
/// tagged with `operation`.
pub async fn api_call<T, F>(operation: &'static str, fut: F) -> Result<T, CoreError>
where
    F: Future<Output = Result<T, cmms_api::Error>>,
{
    fut.await.map_err(|source| {
        let err = CoreError::new(operation, source);
        warn!(
            operation,
            kind = %err.kind(),
            error = %err.api_error(),
            "backend call failed"
        );
        err
    })
}
