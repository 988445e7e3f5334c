//! API Routes
//!
//! Route handlers organized by functionality.

pub mod health;
pub mod plans;
pub mod targets;
pub mod water;
pub mod weight;

use crate::api::error::{ApiError, ApiResult};

/// Run file-backed log work off the async worker threads
pub(crate) async fn run_blocking<T, F>(f: F) -> ApiResult<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(format!("Blocking task failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_blocking_returns_value() {
        let value = run_blocking(|| 40 + 2).await.unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_run_blocking_panic_is_internal_error() {
        let result: ApiResult<()> = run_blocking(|| panic!("disk gone")).await;
        assert!(matches!(result, Err(ApiError::Internal(_))));
    }
}
