use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Opaque handle to whatever definition (check, hook, mutator) started an
/// execution. The engine never reads it; callers that stored a concrete
/// type can recover it through [`InProgressRegistry::get`].
pub type ExecutionHandle = Arc<dyn Any + Send + Sync>;

/// Shared map of executions currently in flight, keyed by logical name.
///
/// Owned by the scheduling loop, not the engine: callers insert before
/// submitting a request and remove on normal completion. The engine removes
/// an entry in exactly one case, a timed-out execution whose process group
/// could not be killed, so that the name is not wedged forever.
pub struct InProgressRegistry {
    entries: Mutex<HashMap<String, ExecutionHandle>>,
}

impl InProgressRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            entries: Mutex::new(HashMap::new()),
        })
    }

    pub fn insert<T: Send + Sync + 'static>(&self, name: impl Into<String>, handle: Arc<T>) {
        self.entries.lock().unwrap().insert(name.into(), handle);
    }

    /// Removes `name`, returning whether an entry was present.
    pub fn remove(&self, name: &str) -> bool {
        self.entries.lock().unwrap().remove(name).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.lock().unwrap().contains_key(name)
    }

    pub fn get<T: Send + Sync + 'static>(&self, name: &str) -> Option<Arc<T>> {
        let handle = self.entries.lock().unwrap().get(name)?.clone();
        handle.downcast::<T>().ok()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.lock().unwrap().keys().cloned().collect()
    }
}

impl fmt::Debug for InProgressRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InProgressRegistry")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_contains_remove() {
        let registry = InProgressRegistry::new();
        registry.insert("disk-check", Arc::new("definition".to_string()));
        assert!(registry.contains("disk-check"));
        assert!(registry.remove("disk-check"));
        assert!(!registry.contains("disk-check"));
        assert!(!registry.remove("disk-check"));
    }

    #[test]
    fn get_downcasts_stored_handle() {
        let registry = InProgressRegistry::new();
        registry.insert("cpu-check", Arc::new(42u64));
        assert_eq!(registry.get::<u64>("cpu-check").as_deref(), Some(&42));
        assert!(registry.get::<String>("cpu-check").is_none());
        assert!(registry.get::<u64>("absent").is_none());
    }

    #[test]
    fn names_reflects_current_entries() {
        let registry = InProgressRegistry::new();
        registry.insert("a", Arc::new(()));
        registry.insert("b", Arc::new(()));
        registry.remove("a");
        assert_eq!(registry.names(), vec!["b".to_string()]);
        assert_eq!(registry.len(), 1);
    }
}
