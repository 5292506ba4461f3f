use std::sync::Arc;
use std::time::Duration;

use glodabin_core::{BinningConfig, GlodaError, HistoryConfig, Interval, MessageIndex};

/// Orchestrator that builds per-contact mail histories from a message index.
pub struct Glodabin {
    pub(crate) index: Arc<dyn MessageIndex>,
    pub(crate) cfg: HistoryConfig,
}

/// Builder for constructing a `Glodabin` orchestrator with custom configuration.
pub struct GlodabinBuilder {
    index: Option<Arc<dyn MessageIndex>>,
    cfg: HistoryConfig,
}

impl Default for GlodabinBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GlodabinBuilder {
    /// Create a new builder with default configuration.
    ///
    /// Defaults: 20 top contacts, 2500 messages per contact and direction,
    /// monthly bins in UTC, no index timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            index: None,
            cfg: HistoryConfig::default(),
        }
    }

    /// Set the message index to read from. A later call replaces an earlier one.
    #[must_use]
    pub fn with_index(mut self, index: Arc<dyn MessageIndex>) -> Self {
        self.index = Some(index);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: HistoryConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Number of top contacts to request from the index.
    #[must_use]
    pub const fn contact_limit(mut self, limit: usize) -> Self {
        self.cfg.contact_limit = limit;
        self
    }

    /// Cap on messages fetched per contact and direction.
    #[must_use]
    pub const fn per_contact_message_limit(mut self, limit: usize) -> Self {
        self.cfg.per_contact_message_limit = limit;
        self
    }

    /// Bin granularity for the fused history.
    #[must_use]
    pub const fn interval(mut self, interval: Interval) -> Self {
        self.cfg.interval = interval;
        self
    }

    /// Bound every individual index call by `timeout`.
    ///
    /// An expired call fails the whole request with `IndexTimeout`.
    #[must_use]
    pub const fn index_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.index_timeout = Some(timeout);
        self
    }

    /// Calendar and binning behaviour (time zone, week start, end-date policy).
    #[must_use]
    pub const fn binning(mut self, binning: BinningConfig) -> Self {
        self.cfg.binning = binning;
        self
    }

    /// Build the `Glodabin` orchestrator.
    ///
    /// # Errors
    /// - `InvalidArg` if no index was registered via [`Self::with_index`], or a
    ///   limit or timeout is zero.
    /// - `InvalidInterval` if the configured interval is not supported.
    pub fn build(self) -> Result<Glodabin, GlodaError> {
        let Some(index) = self.index else {
            return Err(GlodaError::InvalidArg(
                "no message index registered; add one via with_index(...)".to_string(),
            ));
        };
        self.cfg.validate()?;
        Ok(Glodabin {
            index,
            cfg: self.cfg,
        })
    }
}

/// Attribute an error to `index` unless it already names its origin.
pub(crate) fn tag_err(index: &str, e: GlodaError) -> GlodaError {
    match e {
        e @ (GlodaError::Index { .. }
        | GlodaError::IndexTimeout { .. }
        | GlodaError::NotFound { .. }) => e,
        other => GlodaError::index(index, other.to_string()),
    }
}

impl Glodabin {
    /// Start building a new `Glodabin` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use glodabin::{Glodabin, Interval};
    ///
    /// let glodabin = Glodabin::builder()
    ///     .with_index(Arc::new(my_index))
    ///     .interval(Interval::Weeks)
    ///     .index_timeout(std::time::Duration::from_secs(2))
    ///     .build()?;
    /// let histories = glodabin.top_contacts_with_personal_history().await?;
    /// ```
    #[must_use]
    pub fn builder() -> GlodabinBuilder {
        GlodabinBuilder::new()
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &HistoryConfig {
        &self.cfg
    }

    /// Name of the underlying index.
    #[must_use]
    pub fn index_name(&self) -> &'static str {
        self.index.name()
    }

    /// Run an index future, bounded by the configured timeout if any.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "glodabin::core::index_call",
            skip(self, fut),
            fields(index = self.index.name(), operation = operation),
        )
    )]
    pub(crate) async fn index_call<T, Fut>(
        &self,
        operation: &'static str,
        fut: Fut,
    ) -> Result<T, GlodaError>
    where
        Fut: core::future::Future<Output = Result<T, GlodaError>>,
    {
        let name = self.index.name();
        let res = match self.cfg.index_timeout {
            Some(timeout) => Self::index_call_with_timeout(name, operation, timeout, fut).await,
            None => fut.await,
        };
        #[cfg(feature = "tracing")]
        let res = res.inspect_err(|e| tracing::warn!(error = %e, "index call failed"));
        res.map_err(|e| tag_err(name, e))
    }

    /// Wrap an index future with a timeout and map expiry to `IndexTimeout`.
    pub(crate) async fn index_call_with_timeout<T, Fut>(
        index_name: &'static str,
        operation: &'static str,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, GlodaError>
    where
        Fut: core::future::Future<Output = Result<T, GlodaError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(GlodaError::index_timeout(index_name, operation)))
    }
}
