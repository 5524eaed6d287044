use super::types::CollectorResult;

/// Contract implemented by every inventory collector.
///
/// A producer reads its raw source (a `/proc` or `/sys` pseudo-file, or the
/// captured stdout of an external command), parses it, and returns a typed
/// snapshot. Producers hold no state between calls: every invocation
/// acquires its text source fresh and releases it before returning, so
/// concurrent calls from multiple tasks are safe.
///
/// The `'static` bound lets collector instances live in the global registry
/// as trait objects.
#[async_trait::async_trait]
pub trait DataProducer: Send + Sync + 'static {
    /// The structured snapshot this producer returns. Must be
    /// `Send + Sync + 'static` so it can be boxed as a dynamic `Serialize`
    /// value by the registry wrapper.
    type Output: Send + Sync + 'static;

    /// Collects one snapshot, converting every failure into a
    /// [`CollectorError`](super::error::CollectorError).
    async fn produce(&self) -> CollectorResult<Self::Output>;
}
