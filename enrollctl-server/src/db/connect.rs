//! Database connection establishment with bounded retry
//!
//! At process start the database may not be accepting connections yet.
//! [`connect`] opens a pool and pings it, retrying each step with a
//! backoff of `min(attempt² + jitter(0..10ms), 5s)` until the retry budget
//! runs out.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use rand::Rng;
use sqlx::postgres::{PgConnectOptions, PgConnection, PgPoolOptions};
use sqlx::{Connection, PgPool};
use tokio::time::Instant;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Upper bound for a single backoff delay.
const MAX_BACKOFF: Duration = Duration::from_millis(5_000);

/// Jitter is drawn from `0..MAX_JITTER_MS` milliseconds.
const MAX_JITTER_MS: u64 = 10;

/// Which step of connection establishment gave up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Open,
    Ping,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => f.write_str("open"),
            Self::Ping => f.write_str("ping"),
        }
    }
}

/// Connection establishment error
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    /// Retry budget was zero; no attempt was made
    #[error("invalid retry duration {0:?}: must be positive")]
    InvalidDuration(Duration),

    /// Every attempt failed before the deadline
    #[error("failed to {phase} database with retry duration of {duration:?} and {attempts} attempts")]
    Exhausted {
        phase: Phase,
        attempts: u32,
        duration: Duration,
        #[source]
        source: Option<sqlx::Error>,
    },
}

/// Outcome of [`retry`] when no attempt succeeded
#[derive(Debug)]
pub enum RetryError<E> {
    InvalidDuration(Duration),
    Exhausted {
        attempts: u32,
        elapsed: Duration,
        /// Last attempt error; `None` if the only attempts ran into the deadline
        last_error: Option<E>,
    },
}

/// Backoff before the next attempt, given how many attempts have failed.
pub fn backoff_delay(attempt: u32) -> Duration {
    let jitter = rand::thread_rng().gen_range(0..MAX_JITTER_MS);
    backoff_with_jitter(attempt, jitter)
}

fn backoff_with_jitter(attempt: u32, jitter_ms: u64) -> Duration {
    let base = u64::from(attempt).saturating_mul(u64::from(attempt));
    Duration::from_millis(base.saturating_add(jitter_ms)).min(MAX_BACKOFF)
}

/// Run `op` until it succeeds or `max_duration` elapses.
///
/// Returns the value and the number of attempts it took. An attempt still
/// running at the deadline is abandoned.
pub async fn retry<T, E, F, Fut>(max_duration: Duration, mut op: F) -> Result<(T, u32), RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    if max_duration.is_zero() {
        return Err(RetryError::InvalidDuration(max_duration));
    }

    let started = Instant::now();
    let deadline = started + max_duration;
    let mut attempts = 0u32;
    let mut last_error = None;

    while Instant::now() < deadline {
        attempts += 1;
        match tokio::time::timeout_at(deadline, op()).await {
            Ok(Ok(value)) => return Ok((value, attempts)),
            Ok(Err(e)) => last_error = Some(e),
            Err(_) => break,
        }

        let delay = backoff_delay(attempts);
        tracing::debug!(attempts, delay_ms = delay.as_millis() as u64, "attempt failed, backing off");
        tokio::time::sleep_until((Instant::now() + delay).min(deadline)).await;
    }

    Err(RetryError::Exhausted {
        attempts,
        elapsed: started.elapsed(),
        last_error,
    })
}

/// Open a PostgreSQL pool and verify the server answers a ping.
///
/// Opening and pinging are retried independently, each within
/// `retry_duration`. Every ping attempt dials a fresh connection, so a
/// refused connection fails that attempt instead of waiting on the pool's
/// acquire timeout. If every ping fails the opened pool is closed before
/// the error is returned.
///
/// # Example
///
/// ```ignore
/// let pool = connect("postgres://localhost/enrollctl", 5, Duration::from_secs(10)).await?;
/// ```
pub async fn connect(
    database_url: &str,
    max_connections: u32,
    retry_duration: Duration,
) -> Result<PgPool, ConnectError> {
    tracing::info!("connecting to database");

    let ((pool, options), attempts) = retry(retry_duration, || async move {
        let options: PgConnectOptions = database_url.parse()?;
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_lazy_with(options.clone());
        Ok::<_, sqlx::Error>((pool, options))
    })
    .await
    .map_err(|e| exhausted(Phase::Open, retry_duration, e))?;
    tracing::info!(attempts, "database pool opened");

    tracing::info!("pinging database");
    match retry(retry_duration, || ping(&options)).await {
        Ok(((), attempts)) => {
            tracing::info!(attempts, "database connection established");
            Ok(pool)
        }
        Err(e) => {
            pool.close().await;
            Err(exhausted(Phase::Ping, retry_duration, e))
        }
    }
}

async fn ping(options: &PgConnectOptions) -> Result<(), sqlx::Error> {
    let mut conn = PgConnection::connect_with(options).await?;
    conn.ping().await?;
    conn.close().await
}

/// Close `pool`, giving up after `limit`.
///
/// Closing waits for checked-out connections to be returned; a task that
/// outlived server shutdown can hold one indefinitely. Returns `false` when
/// the limit was hit.
pub async fn close_pool(pool: &PgPool, limit: Duration) -> bool {
    match tokio::time::timeout(limit, pool.close()).await {
        Ok(()) => true,
        Err(_) => {
            tracing::warn!(?limit, "database pool did not close in time");
            false
        }
    }
}

fn exhausted(phase: Phase, duration: Duration, e: RetryError<sqlx::Error>) -> ConnectError {
    match e {
        RetryError::InvalidDuration(d) => ConnectError::InvalidDuration(d),
        RetryError::Exhausted {
            attempts,
            last_error,
            ..
        } => ConnectError::Exhausted {
            phase,
            attempts,
            duration,
            source: last_error,
        },
    }
}
