//! Deadline enforcement for Brain calls.
//!
//! Wraps a call in Tokio's timeout. When the deadline passes the call future
//! is dropped, which cancels the request locally; the Brain may keep working.

use std::future::Future;
use std::time::Duration;

use crate::upstream::UpstreamError;

/// Run `call`, failing with [`UpstreamError::Timeout`] once `deadline` elapses.
pub async fn with_deadline<T, F>(deadline: Duration, call: F) -> Result<T, UpstreamError>
where
    F: Future<Output = Result<T, UpstreamError>>,
{
    match tokio::time::timeout(deadline, call).await {
        Ok(result) => result,
        Err(_) => Err(UpstreamError::Timeout(deadline)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn slow_call_times_out() {
        let result: Result<(), _> = with_deadline(Duration::from_secs(30), async {
            tokio::time::sleep(Duration::from_secs(31)).await;
            Ok(())
        })
        .await;
        assert!(matches!(result, Err(UpstreamError::Timeout(d)) if d == Duration::from_secs(30)));
    }

    #[tokio::test(start_paused = true)]
    async fn fast_call_keeps_its_result() {
        let result = with_deadline(Duration::from_secs(30), async {
            tokio::time::sleep(Duration::from_secs(29)).await;
            Ok::<_, UpstreamError>("done")
        })
        .await;
        assert_eq!(result.unwrap(), "done");
    }

    #[tokio::test]
    async fn call_errors_pass_through() {
        let result: Result<(), _> = with_deadline(Duration::from_secs(1), async {
            Err(UpstreamError::from(tonic::Status::internal("boom")))
        })
        .await;
        assert!(matches!(result, Err(UpstreamError::Status { code: tonic::Code::Internal, .. })));
    }
}
