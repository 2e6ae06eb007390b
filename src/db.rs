use metrics::{counter, histogram};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{
    future::Future,
    time::{Duration, Instant},
};

pub type DbPool = PgPool;

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(30))
        .connect(database_url)
        .await
}

pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

pub async fn ping(pool: &DbPool) -> Result<(), sqlx::Error> {
    observe("ping", sqlx::query("SELECT 1").execute(pool)).await?;
    Ok(())
}

/// Runs a database call, recording its outcome and latency under `operation`.
pub async fn observe<T, F>(operation: &'static str, query: F) -> Result<T, sqlx::Error>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    let started = Instant::now();
    let result = query.await;
    let status = if result.is_ok() { "ok" } else { "error" };

    counter!("database_operations_total", "operation" => operation, "status" => status)
        .increment(1);
    histogram!("database_operation_duration_seconds", "operation" => operation)
        .record(started.elapsed().as_secs_f64());

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::metrics_handle;

    #[tokio::test]
    async fn test_observe_records_outcome_per_operation() {
        let handle = metrics_handle();

        let ok = observe("observe_test", async { Ok::<_, sqlx::Error>(7) }).await;
        let failed = observe("observe_test", async { Err::<i32, _>(sqlx::Error::PoolTimedOut) }).await;

        assert_eq!(ok.unwrap(), 7);
        assert!(matches!(failed, Err(sqlx::Error::PoolTimedOut)));

        let rendered = handle.render();
        assert!(rendered
            .contains("database_operations_total{operation=\"observe_test\",status=\"ok\"} 1"));
        assert!(rendered
            .contains("database_operations_total{operation=\"observe_test\",status=\"error\"} 1"));
        assert!(rendered.contains("database_operation_duration_seconds"));
    }
}
