use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::errors::DaemonError;

/// Upper bound for a single JSONL message, newline included.
pub const MAX_MESSAGE_BYTES: usize = 64 * 1024;

/// Read one newline-delimited JSON message.
///
/// Returns `Ok(None)` on a clean EOF. Blank lines are skipped. A line that
/// is not valid JSON for `T` yields `DaemonError::ProtocolError` and leaves
/// the reader positioned at the next line. A line longer than
/// `MAX_MESSAGE_BYTES` yields `DaemonError::MessageTooLarge`; at most
/// `MAX_MESSAGE_BYTES + 1` bytes are buffered, and the stream is left
/// mid-line, so the caller should drop the connection.
pub async fn read_message<R, T>(reader: &mut R) -> Result<Option<T>, DaemonError>
where
    R: AsyncBufRead + Unpin,
    T: DeserializeOwned,
{
    let mut line = String::new();
    loop {
        line.clear();
        let n = (&mut *reader)
            .take(MAX_MESSAGE_BYTES as u64 + 1)
            .read_line(&mut line)
            .await?;
        if n == 0 {
            return Ok(None);
        }
        if n > MAX_MESSAGE_BYTES {
            return Err(DaemonError::MessageTooLarge {
                limit: MAX_MESSAGE_BYTES,
            });
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        return serde_json::from_str(trimmed)
            .map(Some)
            .map_err(|e| DaemonError::ProtocolError(e.to_string()));
    }
}

/// Serialize `msg` as one JSON line and flush it.
pub async fn write_message<W, T>(writer: &mut W, msg: &T) -> Result<(), DaemonError>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let mut buf =
        serde_json::to_vec(msg).map_err(|e| DaemonError::ProtocolError(e.to_string()))?;
    buf.push(b'\n');
    writer.write_all(&buf).await?;
    writer.flush().await?;
    Ok(())
}
