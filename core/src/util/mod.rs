mod sync_buffer;

pub use sync_buffer::SyncBuffer;
