use std::sync::{Arc, Mutex};

/// Byte sink shared between a child's stdout and stderr pumps.
///
/// Writes are serialized under a single lock, so chunks from the two
/// streams never corrupt each other; `snapshot` reflects every write that
/// completed before the call. Ordering between the streams is whatever
/// order the pipes deliver.
pub struct SyncBuffer {
    inner: Mutex<Vec<u8>>,
}

impl SyncBuffer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(Vec::new()),
        })
    }

    pub fn write(&self, data: &[u8]) -> usize {
        let mut g = self.inner.lock().unwrap();
        g.extend_from_slice(data);
        data.len()
    }

    pub fn snapshot(&self) -> String {
        let g = self.inner.lock().unwrap();
        String::from_utf8_lossy(&g).into_owned()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
