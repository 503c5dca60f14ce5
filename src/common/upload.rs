use anyhow::{Result, anyhow};
use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::error;

/// Stream a request body chunk-by-chunk into `dest` without buffering the
/// whole file in memory. A failed or interrupted stream removes the partial
/// file before the error is returned.
pub async fn stream_to_disk<S, E>(dest: &Path, body: S) -> Result<u64>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: std::fmt::Display,
{
    match write_chunks(dest, body).await {
        Ok(written) => Ok(written),
        Err(e) => {
            error!("Upload to {} failed: {}", dest.display(), e);
            let _ = fs::remove_file(dest).await;
            Err(e)
        }
    }
}

async fn write_chunks<S, E>(dest: &Path, mut body: S) -> Result<u64>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: std::fmt::Display,
{
    let mut file = fs::File::create(dest).await?;
    let mut written: u64 = 0;

    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|e| anyhow!("Stream interrupted: {}", e))?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    file.flush().await?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;
    use std::io;

    fn ok_chunks(parts: &[&str]) -> Vec<Result<Bytes, io::Error>> {
        parts
            .iter()
            .map(|p| Ok(Bytes::copy_from_slice(p.as_bytes())))
            .collect()
    }

    #[tokio::test]
    async fn writes_all_chunks_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("audio.mp3");

        let body = stream::iter(ok_chunks(&["ID3", "frame-1", "frame-2"]));
        let written = stream_to_disk(&dest, body).await.unwrap();

        assert_eq!(written, 17);
        assert_eq!(std::fs::read(&dest).unwrap(), b"ID3frame-1frame-2");
    }

    #[tokio::test]
    async fn interrupted_stream_removes_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("audio.mp3");

        let body = stream::iter(vec![
            Ok(Bytes::from_static(b"ID3")),
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "peer gone")),
        ]);

        assert!(stream_to_disk(&dest, body).await.is_err());
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn empty_stream_creates_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("audio.mp3");

        let body = stream::iter(ok_chunks(&[]));
        let written = stream_to_disk(&dest, body).await.unwrap();

        assert_eq!(written, 0);
        assert!(dest.exists());
    }
}
