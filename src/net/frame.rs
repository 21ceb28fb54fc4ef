//! Length-delimited frame transport.
//!
//! # Responsibilities
//! - Delimit request/response messages on the persistent daemon socket
//! - Detect clean connection close vs. a frame truncated mid-transfer
//! - Enforce the configured frame size ceiling
//!
//! # Design Decisions
//! - Every frame travels as a 4-byte big-endian byte count followed by the
//!   payload, in both directions; bodies may therefore contain blank lines
//!   or any byte sequence without breaking message boundaries
//! - A zero-length frame is legal: it is the wire form of an aborted
//!   response

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Transport-level framing failure.
#[derive(Debug)]
pub enum FrameError {
    /// Socket read/write failed or the peer vanished mid-frame.
    Io(std::io::Error),
    /// The announced payload length exceeds the configured ceiling.
    TooLarge { len: usize, max: usize },
}

impl std::fmt::Display for FrameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameError::Io(e) => write!(f, "Frame I/O failed: {}", e),
            FrameError::TooLarge { len, max } => {
                write!(f, "Frame of {} bytes exceeds limit of {} bytes", len, max)
            }
        }
    }
}

impl std::error::Error for FrameError {}

impl From<std::io::Error> for FrameError {
    fn from(e: std::io::Error) -> Self {
        FrameError::Io(e)
    }
}

/// Read one complete frame.
///
/// Returns `Ok(None)` when the peer closed the connection cleanly at a
/// frame boundary. EOF inside the length prefix or inside the payload is an
/// I/O error: the frame was truncated.
pub async fn read_frame<R>(reader: &mut R, max: usize) -> Result<Option<Vec<u8>>, FrameError>
where
    R: AsyncRead + Unpin,
{
    let mut prefix = [0u8; 4];
    let mut filled = 0;
    while filled < prefix.len() {
        let n = reader.read(&mut prefix[filled..]).await?;
        if n == 0 {
            if filled == 0 {
                return Ok(None);
            }
            return Err(FrameError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "connection closed inside a frame length prefix",
            )));
        }
        filled += n;
    }

    let len = u32::from_be_bytes(prefix) as usize;
    if len > max {
        return Err(FrameError::TooLarge { len, max });
    }

    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload).await?;
    Ok(Some(payload))
}

/// Write one complete frame: length prefix, payload, flush.
pub async fn write_frame<W>(writer: &mut W, payload: &[u8]) -> Result<(), FrameError>
where
    W: AsyncWrite + Unpin,
{
    let len = u32::try_from(payload.len()).map_err(|_| {
        FrameError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "frame payload exceeds u32 range",
        ))
    })?;
    writer.write_all(&len.to_be_bytes()).await?;
    writer.write_all(payload).await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    const MAX: usize = 64 * 1024;

    #[tokio::test]
    async fn frame_round_trips_through_a_duplex_pipe() {
        let (mut a, mut b) = tokio::io::duplex(1024);

        write_frame(&mut a, b"GET /ping\n\n").await.unwrap();
        let frame = read_frame(&mut b, MAX).await.unwrap().unwrap();
        assert_eq!(frame, b"GET /ping\n\n");
    }

    #[tokio::test]
    async fn empty_frame_round_trips() {
        let (mut a, mut b) = tokio::io::duplex(64);

        write_frame(&mut a, b"").await.unwrap();
        let frame = read_frame(&mut b, MAX).await.unwrap().unwrap();
        assert!(frame.is_empty());
    }

    #[tokio::test]
    async fn clean_close_reads_as_none() {
        let (a, mut b) = tokio::io::duplex(64);
        drop(a);

        assert!(read_frame(&mut b, MAX).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn eof_inside_prefix_is_an_error() {
        let (mut a, mut b) = tokio::io::duplex(64);
        a.write_all(&[0, 0]).await.unwrap();
        drop(a);

        assert!(matches!(
            read_frame(&mut b, MAX).await,
            Err(FrameError::Io(_))
        ));
    }

    #[tokio::test]
    async fn eof_inside_payload_is_an_error() {
        let (mut a, mut b) = tokio::io::duplex(64);
        a.write_all(&8u32.to_be_bytes()).await.unwrap();
        a.write_all(b"half").await.unwrap();
        drop(a);

        assert!(matches!(
            read_frame(&mut b, MAX).await,
            Err(FrameError::Io(_))
        ));
    }

    #[tokio::test]
    async fn oversized_frame_is_rejected_before_allocation() {
        let (mut a, mut b) = tokio::io::duplex(64);
        a.write_all(&(MAX as u32 + 1).to_be_bytes()).await.unwrap();

        assert!(matches!(
            read_frame(&mut b, MAX).await,
            Err(FrameError::TooLarge { .. })
        ));
    }

    #[tokio::test]
    async fn back_to_back_frames_stay_delimited() {
        let (mut a, mut b) = tokio::io::duplex(1024);

        write_frame(&mut a, b"first").await.unwrap();
        write_frame(&mut a, b"second\n\nwith blank line").await.unwrap();

        assert_eq!(read_frame(&mut b, MAX).await.unwrap().unwrap(), b"first");
        assert_eq!(
            read_frame(&mut b, MAX).await.unwrap().unwrap(),
            b"second\n\nwith blank line"
        );
    }
}
