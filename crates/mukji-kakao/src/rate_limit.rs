//! Retry with exponential backoff for transient Kakao API failures.
//!
//! Only 429 responses and network-level failures are retried. Auth failures,
//! unexpected statuses, and unparseable bodies are returned on the first try.

use std::future::Future;
use std::time::Duration;

use crate::error::KakaoError;

fn is_retriable(err: &KakaoError) -> bool {
    matches!(err, KakaoError::RateLimited { .. } | KakaoError::Http(_))
}

/// Runs `operation`, retrying retriable errors up to `max_retries` more times.
///
/// The wait before retry `n` (1-based) is `backoff_base_secs * 2^(n-1)`
/// seconds, so `max_retries = 2` with a base of 1 s attempts at most three
/// times and sleeps 1 s then 2 s. The last error is returned once retries
/// run out.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, KakaoError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, KakaoError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if !is_retriable(&err) || attempt >= max_retries => return Err(err),
            Err(err) => err,
        };

        let delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %err,
            "transient kakao api error, retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn rate_limited() -> KakaoError {
        KakaoError::RateLimited {
            retry_after_secs: 0,
        }
    }

    #[tokio::test]
    async fn returns_first_success_without_retrying() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<_, KakaoError>("ok")
            }
        })
        .await;
        assert_eq!(result.unwrap(), "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_rate_limit_until_success() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                if c.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(rate_limited())
                } else {
                    Ok::<u32, KakaoError>(15)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 15);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(2, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(rate_limited())
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(matches!(result, Err(KakaoError::RateLimited { .. })));
    }

    #[tokio::test]
    async fn unauthorized_is_not_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(KakaoError::Unauthorized { status: 401 })
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(KakaoError::Unauthorized { status: 401 })));
    }

    #[tokio::test]
    async fn bad_body_is_not_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
                Err::<u32, _>(KakaoError::Deserialize {
                    context: "keyword search".to_owned(),
                    source,
                })
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(KakaoError::Deserialize { .. })));
    }
}
