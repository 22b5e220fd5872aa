use std::sync::Arc;

use tokio::io::AsyncReadExt;
use tokio::task::JoinHandle;

use crate::util::SyncBuffer;

/// Copies one child stream into the shared sink in chunks. The task ends at
/// EOF; a read error ends it early without failing the execution.
pub(super) fn pump<R>(mut rd: R, sink: Arc<SyncBuffer>, stream: &'static str) -> JoinHandle<u64>
where
    R: tokio::io::AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = vec![0u8; 16 * 1024];
        let mut total = 0u64;
        loop {
            match rd.read(&mut buf).await {
                Ok(0) => break,
                Ok(n) => {
                    sink.write(&buf[..n]);
                    total += n as u64;
                }
                Err(err) => {
                    tracing::warn!(stream, error = %err, "stopped capturing child stream");
                    break;
                }
            }
        }
        total
    })
}
