use std::future::Future;

use crate::error::{ServiceError, ServiceResult};

/// Run a guarded sequence on its own task and wait for its result.
///
/// Dropping the returned future does not cancel `work`: once started, the
/// sequence runs to completion and its writes land even if the caller is
/// gone.
pub(crate) async fn run_to_completion<F, T>(work: F) -> ServiceResult<T>
where
    F: Future<Output = ServiceResult<T>> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(work)
        .await
        .map_err(|e| ServiceError::Internal(format!("guarded task failed: {e}")))?
}
