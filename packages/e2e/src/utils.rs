//! Polling, best-effort execution and process helpers

use crate::error::{MigrationError, Result};
use std::future::Future;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

/// Poll a check function until it returns true or the timeout elapses
///
/// Errors from `check` are logged and retried; the chain or relayer may not
/// have caught up yet. Elapsing the timeout yields
/// [`MigrationError::RelayTimeout`].
///
/// # Example
/// ```no_run
/// # async fn example() -> oro_migration_e2e::error::Result<()> {
/// use std::time::Duration;
/// use oro_migration_e2e::utils::poll_until;
///
/// poll_until(
///     "channel on localneutron-1",
///     || async { Ok(true) },
///     Duration::from_secs(30),
///     Duration::from_secs(1),
/// ).await?;
/// # Ok(())
/// # }
/// ```
pub async fn poll_until<F, Fut>(
    description: &str,
    check: F,
    timeout: Duration,
    interval: Duration,
) -> Result<()>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let start = Instant::now();
    loop {
        match check().await {
            Ok(true) => {
                debug!("{} observed after {:?}", description, start.elapsed());
                return Ok(());
            }
            Ok(false) => {
                debug!("{} not observed yet, retrying...", description);
            }
            Err(e) => {
                debug!("{} check failed: {}, retrying...", description, e);
            }
        }

        if start.elapsed() >= timeout {
            return Err(MigrationError::RelayTimeout {
                what: description.to_string(),
                timeout,
            });
        }
        sleep(interval).await;
    }
}

/// Run a setup side effect whose rejection is acceptable
///
/// Verification setup (top-ups, priming transfers, bridge migration) may
/// already have been applied by a previous run and be rejected by the chain.
/// Only `TransactionFailed` is swallowed; every other error propagates.
pub async fn attempt_best_effort<Fut>(description: &str, operation: Fut) -> Result<()>
where
    Fut: Future<Output = Result<()>>,
{
    match operation.await {
        Ok(()) => {
            debug!("{} applied", description);
            Ok(())
        }
        Err(e) if e.is_transaction_failure() => {
            warn!("{} skipped: {}", description, e);
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Run a process and return its stdout
///
/// A non-zero exit becomes [`MigrationError::Command`] carrying stderr.
pub async fn run_command(program: &str, args: &[&str]) -> Result<String> {
    info!("Executing {} {:?}", program, args);

    let output = Command::new(program).args(args).output().await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        // Cosmos CLIs print some failures on stdout
        let message = if stderr.trim().is_empty() {
            stdout.trim().to_string()
        } else {
            stderr.trim().to_string()
        };
        return Err(MigrationError::Command {
            command: format!("{} {}", program, args.join(" ")),
            stderr: message,
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    debug!("Command output: {}", stdout.trim());
    Ok(stdout)
}
