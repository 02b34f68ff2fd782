//! Mock TCP server for protocol-level testing.
//!
//! [`MockTcpServer`] is a scripted TCP listener that stands in for a
//! network-attached projector (SDCP, or a serial-to-Ethernet adapter).
//!
//! Projector sessions are short-lived: the connector usually opens a fresh
//! connection per command. The server therefore keeps accepting clients
//! until every expectation has been consumed, working through the script
//! across as many connections as the client makes.
//!
//! # Example
//!
//! ```
//! use projlib_test_harness::MockTcpServer;
//!
//! # async fn example() -> projlib_core::Result<()> {
//! let mut server = MockTcpServer::new().await?;
//! server.expect(
//!     &[0x02, 0x0A, b'S', b'O', b'N', b'Y', 0x01, 0x01, 0x02, 0x02, 0x00, 0x00],
//!     &[0x02, 0x0A, b'S', b'O', b'N', b'Y', 0x01, 0x01, 0x02, 0x02, 0x00, 0x03],
//! );
//! server.start();
//! let addr = server.addr().to_string();
//! // ... point a TcpTransport at `addr` ...
//! # Ok(())
//! # }
//! ```

use projlib_core::error::{Error, Result};
use std::collections::VecDeque;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// A pre-loaded request and its optional response.
#[derive(Debug, Clone)]
struct TcpExpectation {
    /// The exact bytes we expect the client to send.
    request: Vec<u8>,
    /// The bytes to send back; `None` for unacknowledged frames.
    response: Option<Vec<u8>>,
}

/// A mock TCP server for testing protocol engines over the network.
///
/// The server listens on a random available port on localhost. Once
/// [`start`](MockTcpServer::start) is called, it accepts connections and
/// processes expectations in order. A client that disconnects between
/// expectations is simply replaced by the next one accepted.
///
/// If a client sends data that does not match the next expectation, the
/// server stops and [`wait`](MockTcpServer::wait) reports the mismatch.
pub struct MockTcpServer {
    /// The address the server is listening on (e.g., "127.0.0.1:54321").
    addr: String,
    listener: Option<TcpListener>,
    /// Ordered queue of expected requests.
    expectations: VecDeque<TcpExpectation>,
    /// Handle to the server task once started. Yields the number of
    /// connections accepted.
    server_handle: Option<JoinHandle<std::result::Result<usize, String>>>,
}

impl MockTcpServer {
    /// Create a new mock TCP server listening on a random port.
    ///
    /// Connections are not serviced until [`start`](MockTcpServer::start)
    /// is called, allowing expectations to be loaded first. Clients that
    /// connect earlier wait in the listen backlog.
    pub async fn new() -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| Error::Transport(format!("failed to bind mock TCP server: {}", e)))?;
        let addr = listener.local_addr().map_err(Error::Io)?.to_string();

        Ok(Self {
            addr,
            listener: Some(listener),
            expectations: VecDeque::new(),
            server_handle: None,
        })
    }

    /// Add an expected request/response pair.
    pub fn expect(&mut self, request: &[u8], response: &[u8]) {
        self.expectations.push_back(TcpExpectation {
            request: request.to_vec(),
            response: Some(response.to_vec()),
        });
    }

    /// Add an expected request that gets no response (IR frames).
    pub fn expect_send(&mut self, request: &[u8]) {
        self.expectations.push_back(TcpExpectation {
            request: request.to_vec(),
            response: None,
        });
    }

    /// Get the address the server is listening on.
    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Start servicing connections in a background task.
    ///
    /// Calling `start` a second time has no effect.
    pub fn start(&mut self) {
        let Some(listener) = self.listener.take() else {
            return;
        };
        let mut expectations: VecDeque<TcpExpectation> = self.expectations.drain(..).collect();

        let handle = tokio::spawn(async move {
            let mut connections = 0;
            let mut index = 0;
            while !expectations.is_empty() {
                let (mut stream, _) = listener
                    .accept()
                    .await
                    .map_err(|e| format!("failed to accept connection: {}", e))?;
                connections += 1;
                tracing::trace!(connections, "mock TCP server accepted client");

                serve_connection(&mut stream, &mut expectations, &mut index).await?;
            }
            Ok(connections)
        });

        self.server_handle = Some(handle);
    }

    /// Wait for the server task to complete and return the number of
    /// connections it accepted, or the first error it hit.
    ///
    /// Call this after the client has finished its interactions to verify
    /// that all expectations were met.
    pub async fn wait(self) -> std::result::Result<usize, String> {
        match self.server_handle {
            Some(handle) => handle
                .await
                .map_err(|e| format!("server task panicked: {}", e))?,
            None => Ok(0),
        }
    }
}

/// Work through expectations on one client until it disconnects or the
/// script runs out.
async fn serve_connection(
    stream: &mut TcpStream,
    expectations: &mut VecDeque<TcpExpectation>,
    index: &mut usize,
) -> std::result::Result<(), String> {
    while let Some(expectation) = expectations.front() {
        let i = *index;
        let mut buf = vec![0u8; expectation.request.len()];
        let mut total_read = 0;

        while total_read < buf.len() {
            let n = stream
                .read(&mut buf[total_read..])
                .await
                .map_err(|e| format!("expectation {}: read error: {}", i, e))?;
            if n == 0 {
                if total_read == 0 {
                    // Clean disconnect between commands.
                    return Ok(());
                }
                return Err(format!(
                    "expectation {}: client disconnected after {} bytes (expected {})",
                    i,
                    total_read,
                    buf.len()
                ));
            }
            total_read += n;
        }

        if buf != expectation.request {
            return Err(format!(
                "expectation {}: request mismatch: expected {:02X?}, got {:02X?}",
                i, expectation.request, buf
            ));
        }

        if let Some(response) = &expectation.response {
            stream
                .write_all(response)
                .await
                .map_err(|e| format!("expectation {}: write error: {}", i, e))?;
            stream
                .flush()
                .await
                .map_err(|e| format!("expectation {}: flush error: {}", i, e))?;
        }

        expectations.pop_front();
        *index += 1;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_across_reconnects() {
        let mut server = MockTcpServer::new().await.unwrap();
        server.expect(b"one", b"1");
        server.expect(b"two", b"2");
        server.start();

        for (req, resp) in [(b"one", b"1"), (b"two", b"2")] {
            let mut client = TcpStream::connect(server.addr()).await.unwrap();
            client.write_all(req).await.unwrap();
            let mut buf = [0u8; 1];
            client.read_exact(&mut buf).await.unwrap();
            assert_eq!(&buf, resp);
        }

        assert_eq!(server.wait().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn expect_send_writes_nothing_back() {
        let mut server = MockTcpServer::new().await.unwrap();
        server.expect_send(b"ir");
        server.expect(b"get", b"ok");
        server.start();

        let mut client = TcpStream::connect(server.addr()).await.unwrap();
        client.write_all(b"ir").await.unwrap();
        client.write_all(b"get").await.unwrap();
        let mut buf = [0u8; 2];
        client.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"ok");

        assert_eq!(server.wait().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn mismatch_is_reported() {
        let mut server = MockTcpServer::new().await.unwrap();
        server.expect(b"abc", b"x");
        server.start();

        let mut client = TcpStream::connect(server.addr()).await.unwrap();
        client.write_all(b"xyz").await.unwrap();

        let err = server.wait().await.unwrap_err();
        assert!(err.contains("request mismatch"), "got: {err}");
    }
}
