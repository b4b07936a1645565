//! Per-call timeout wrapper for remote directory operations

use peermatch_directory::DirectoryError;
use std::future::Future;
use std::time::Duration;

/// Run one directory call under the configured timeout. Expiry is
/// folded into the directory error taxonomy so call sites apply one
/// failure policy, whatever the cause.
pub(crate) async fn with_timeout<T, F>(limit: Duration, call: F) -> Result<T, DirectoryError>
where
    F: Future<Output = Result<T, DirectoryError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(DirectoryError::Unreachable(format!(
            "call timed out after {limit:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_result_passes_through() {
        let ok = with_timeout(Duration::from_secs(1), async { Ok(7u64) }).await;
        assert_eq!(ok.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_expiry_becomes_unreachable() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(0u64)
        };
        let err = with_timeout(Duration::from_millis(5), slow).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Unreachable(_)));
    }
}
