//! Database connection with readiness retries
//!
//! The database container may still be starting when the server boots, so
//! connecting is retried on a fixed interval before giving up.

use std::future::Future;
use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

use crate::config::Config;

/// Connect and ping, retrying `config.db_connect_retries` times
pub async fn connect_with_retry(config: &Config) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(config.db_max_connections)
        .sqlx_logging(config.db_echo);

    with_retries(
        config.db_connect_retries,
        config.db_connect_interval,
        || {
            let options = options.clone();
            async move {
                let db = Database::connect(options).await?;
                db.ping().await?;
                Ok(db)
            }
        },
    )
    .await
}

/// Run `attempt` until it succeeds or `retries` extra attempts have failed
pub(crate) async fn with_retries<T, F, Fut>(
    retries: u32,
    interval: Duration,
    mut attempt: F,
) -> Result<T, DbErr>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbErr>>,
{
    let mut failures = 0;
    loop {
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(e) if failures < retries => {
                failures += 1;
                tracing::warn!(
                    error = %e,
                    attempt = failures,
                    retries,
                    "Database not ready, retrying in {:?}",
                    interval
                );
                tokio::time::sleep(interval).await;
            }
            Err(e) => {
                tracing::error!(error = %e, retries, "Database still unavailable, giving up");
                return Err(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn succeeds_after_transient_failures() {
        let calls = AtomicU32::new(0);
        let counter = &calls;

        let result = with_retries(5, Duration::ZERO, move || async move {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            if n < 2 {
                Err(DbErr::Conn(sea_orm::RuntimeErr::Internal(
                    "connection refused".to_string(),
                )))
            } else {
                Ok(n)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_retries() {
        let calls = AtomicU32::new(0);
        let counter = &calls;

        let result: Result<(), DbErr> = with_retries(5, Duration::ZERO, move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(DbErr::Conn(sea_orm::RuntimeErr::Internal(
                "connection refused".to_string(),
            )))
        })
        .await;

        assert!(result.is_err());
        // First attempt plus five retries
        assert_eq!(calls.load(Ordering::SeqCst), 6);
    }

    #[tokio::test]
    async fn zero_retries_tries_once() {
        let calls = AtomicU32::new(0);
        let counter = &calls;

        let result: Result<(), DbErr> = with_retries(0, Duration::ZERO, move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(DbErr::Custom("down".to_string()))
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
