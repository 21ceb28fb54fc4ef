//! Shared utilities for integration testing against a scripted daemon.
//!
//! The harness plays the Mercury side of the extension socket: it accepts
//! one session, pushes request frames, and collects one reply frame per
//! request. Frame I/O is reimplemented here on purpose so an encoder bug in
//! the crate cannot mask itself in the tests.

use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Bind a scripted daemon on an ephemeral port.
///
/// It accepts exactly one session, sends each request frame in turn,
/// reads one reply per request, then closes its write half and asserts
/// the session writes nothing further. Returns the address to connect to
/// and a handle resolving to the collected replies.
pub async fn spawn_scripted_daemon(
    requests: Vec<Vec<u8>>,
) -> (SocketAddr, JoinHandle<Vec<Vec<u8>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut replies = Vec::new();
        for request in requests {
            write_frame(&mut socket, &request).await;
            replies.push(read_frame(&mut socket).await);
        }

        // Signal end-of-session, then verify exactly one reply was written
        // per request and nothing more.
        socket.shutdown().await.unwrap();
        let mut extra = Vec::new();
        socket.read_to_end(&mut extra).await.unwrap();
        assert!(
            extra.is_empty(),
            "session wrote {} unexpected trailing bytes",
            extra.len()
        );

        replies
    });

    (addr, handle)
}

/// Daemon-side frame write: 4-byte big-endian byte count, then payload.
pub async fn write_frame(socket: &mut TcpStream, payload: &[u8]) {
    let len = u32::try_from(payload.len()).unwrap();
    socket.write_all(&len.to_be_bytes()).await.unwrap();
    socket.write_all(payload).await.unwrap();
    socket.flush().await.unwrap();
}

/// Daemon-side frame read.
pub async fn read_frame(socket: &mut TcpStream) -> Vec<u8> {
    let mut prefix = [0u8; 4];
    socket.read_exact(&mut prefix).await.unwrap();

    let mut payload = vec![0u8; u32::from_be_bytes(prefix) as usize];
    socket.read_exact(&mut payload).await.unwrap();
    payload
}

/// Split a reply frame into (status line, header lines, body).
#[allow(dead_code)]
pub fn split_reply(frame: &[u8]) -> (String, Vec<String>, String) {
    let text = String::from_utf8(frame.to_vec()).unwrap();
    let (status_line, rest) = text.split_once('\n').unwrap();
    let (header_block, body) = rest.split_once("\n\n").unwrap();

    let headers = if header_block.is_empty() {
        Vec::new()
    } else {
        header_block.split('\n').map(str::to_string).collect()
    };

    (status_line.to_string(), headers, body.to_string())
}
