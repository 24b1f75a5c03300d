//! Foreign-key enforcement bracketing

use dbrestore_core::Result;
use dbrestore_providers::DatabaseProvider;
use std::future::Future;
use tracing::{debug, warn};

/// Tracks a session with foreign-key enforcement switched off.
///
/// Enforcement is restored by [`ForeignKeyGuard::release`]. Re-enabling is
/// async, so it cannot happen in `Drop`; a guard dropped unreleased only logs.
pub struct ForeignKeyGuard<'a> {
    provider: &'a dyn DatabaseProvider,
    released: bool,
}

impl<'a> ForeignKeyGuard<'a> {
    pub async fn acquire(provider: &'a dyn DatabaseProvider) -> Result<Self> {
        provider.disable_foreign_key_enforcement().await?;
        debug!("Foreign key enforcement disabled ({})", provider.name());
        Ok(Self {
            provider,
            released: false,
        })
    }

    pub async fn release(mut self) -> Result<()> {
        self.released = true;
        self.provider.enable_foreign_key_enforcement().await?;
        debug!("Foreign key enforcement enabled ({})", self.provider.name());
        Ok(())
    }
}

impl Drop for ForeignKeyGuard<'_> {
    fn drop(&mut self) {
        if !self.released {
            warn!(
                "Foreign key enforcement was left disabled on {}",
                self.provider.name()
            );
        }
    }
}

/// Runs `body` with foreign-key enforcement disabled.
///
/// Enforcement is re-enabled whether `body` succeeds or fails. When both
/// `body` and re-enabling fail, the error from `body` is returned.
pub async fn with_foreign_keys_disabled<T, F>(
    provider: &dyn DatabaseProvider,
    body: F,
) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let guard = ForeignKeyGuard::acquire(provider).await?;
    let outcome = body.await;
    let released = guard.release().await;

    match (outcome, released) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(release_err)) => {
            warn!("Failed to re-enable foreign keys: {}", release_err);
            Err(e)
        }
    }
}
