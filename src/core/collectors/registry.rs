use std::{collections::HashMap, sync::Arc};

use erased_serde::Serialize;
use once_cell::sync::Lazy;

use super::{error::CollectorError, traits::DataProducer, types::CollectorResult};

/// Object-safe view of a collector, so differently-typed producers can live
/// in one registry and be invoked by name at runtime.
#[async_trait::async_trait]
pub trait DynCollector: Send + Sync {
    /// Registry name of the collector (`"cpu"`, `"memory"`, ...).
    fn name(&self) -> &'static str;

    /// Runs the collector and boxes its typed output as a dynamic
    /// `Serialize` value for the snapshot layer.
    async fn produce_dyn(&self) -> CollectorResult<Box<dyn Serialize + Send + Sync>>;
}

impl std::fmt::Debug for dyn DynCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynCollector")
            .field("name", &self.name())
            .finish()
    }
}

/// Adapter from a concrete [`DataProducer`] to the [`DynCollector`] trait
/// object the registry stores.
pub struct DynWrapper<T> {
    inner: T,
    name: &'static str,
}

impl<T> DynWrapper<T> {
    pub fn new(name: &'static str, inner: T) -> Self {
        Self { name, inner }
    }
}

#[async_trait::async_trait]
impl<T> DynCollector for DynWrapper<T>
where
    T: DataProducer + Send + Sync,
    T::Output: Serialize + Send + 'static,
{
    fn name(&self) -> &'static str {
        self.name
    }

    async fn produce_dyn(&self) -> CollectorResult<Box<dyn Serialize + Send + Sync>> {
        let output = self.inner.produce().await?;
        Ok(Box::new(output))
    }
}

/// Compile-time registration record: a name plus a factory producing the
/// boxed collector. Submitted to the global inventory by
/// [`register_collector!`](crate::register_collector).
pub struct CollectorMeta {
    pub name: &'static str,
    pub factory: fn() -> Arc<dyn DynCollector>,
}

inventory::collect!(CollectorMeta);

/// Registry of every collector compiled into the binary, built once at
/// startup from the submitted [`CollectorMeta`] records.
pub struct CollectorRegistry {
    collectors: HashMap<&'static str, Arc<dyn DynCollector>>,
}

impl CollectorRegistry {
    pub fn new() -> Self {
        let mut collectors = HashMap::new();
        for meta in inventory::iter::<CollectorMeta> {
            collectors.insert(meta.name, (meta.factory)());
        }
        CollectorRegistry { collectors }
    }

    /// Looks a collector up by name.
    pub fn get(&self, name: &str) -> CollectorResult<Arc<dyn DynCollector>> {
        self.collectors
            .get(name)
            .cloned()
            .ok_or_else(|| CollectorError::CollectorNotFound(name.to_string()))
    }

    pub fn list_names(&self) -> Vec<&'static str> {
        self.collectors.keys().copied().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.collectors.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.collectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collectors.is_empty()
    }

    /// The lazily-built process-wide registry.
    pub fn global() -> &'static CollectorRegistry {
        &GLOBAL_REGISTRY
    }
}

impl Default for CollectorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_REGISTRY: Lazy<CollectorRegistry> = Lazy::new(CollectorRegistry::new);

/// Facade over the global registry; the API application code actually uses.
pub struct Collectors;

impl Collectors {
    pub fn get(name: &str) -> CollectorResult<Arc<dyn DynCollector>> {
        CollectorRegistry::global().get(name)
    }

    pub fn list() -> Vec<&'static str> {
        CollectorRegistry::global().list_names()
    }

    pub fn exists(name: &str) -> bool {
        CollectorRegistry::global().contains(name)
    }
}

/// Registers a collector type under a name in the global inventory at
/// compile time. The type must implement `Default` and `DataProducer`.
#[macro_export]
macro_rules! register_collector {
    ($collector_type:ty, $name:expr) => {
        inventory::submit! {
            $crate::core::collectors::registry::CollectorMeta {
                name: $name,
                factory: || {
                    std::sync::Arc::new(
                        $crate::core::collectors::registry::DynWrapper::new(
                            $name,
                            <$collector_type>::default(),
                        )
                    )
                },
            }
        }
    };
}
