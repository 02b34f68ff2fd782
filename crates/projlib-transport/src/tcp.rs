//! TCP transport for projector control.
//!
//! This module provides [`TcpTransport`], which implements the [`Transport`]
//! trait for network-connected projectors. Two kinds of endpoint use it:
//!
//! - SDCP, the projector's native network control protocol (port 53484)
//! - serial-to-Ethernet adapters carrying the RS-232 protocol unchanged
//!
//! The socket is connected lazily on [`open`](Transport::open) and shut down
//! on [`close`](Transport::close); the same transport can be reopened for
//! the next command session.
//!
//! # Example
//!
//! ```no_run
//! use projlib_transport::TcpTransport;
//! use projlib_core::transport::Transport;
//! use std::time::Duration;
//!
//! # async fn example() -> projlib_core::Result<()> {
//! let mut transport = TcpTransport::connect("192.168.1.50:53484").await?;
//!
//! let mut buf = [0u8; 64];
//! let n = transport.receive(&mut buf, Duration::from_secs(2)).await?;
//! transport.close().await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use projlib_core::error::{Error, Result};
use projlib_core::transport::Transport;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// Default connection timeout (5 seconds).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// TCP transport for projector control.
#[derive(Debug)]
pub struct TcpTransport {
    /// The underlying TCP stream, `None` while closed.
    stream: Option<TcpStream>,
    /// The `host:port` address to connect to.
    addr: String,
    connect_timeout: Duration,
}

impl TcpTransport {
    /// Create a closed transport for a `host:port` address.
    pub fn new(addr: &str) -> Self {
        Self {
            stream: None,
            addr: addr.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Set the maximum time [`open`](Transport::open) waits for the
    /// connection to be established.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Create a transport and open it immediately.
    pub async fn connect(addr: &str) -> Result<Self> {
        let mut transport = Self::new(addr);
        transport.open().await?;
        Ok(transport)
    }

    /// Get the address string this transport connects to.
    pub fn addr(&self) -> &str {
        &self.addr
    }
}

#[async_trait]
impl Transport for TcpTransport {
    async fn open(&mut self) -> Result<()> {
        if self.stream.is_some() {
            return Ok(());
        }

        tracing::debug!(
            addr = %self.addr,
            timeout_ms = self.connect_timeout.as_millis(),
            "Connecting to TCP endpoint"
        );

        let stream = tokio::time::timeout(self.connect_timeout, TcpStream::connect(&self.addr))
            .await
            .map_err(|_| {
                tracing::error!(addr = %self.addr, "TCP connection timed out");
                Error::Timeout
            })?
            .map_err(|e| {
                tracing::error!(addr = %self.addr, error = %e, "TCP connection failed");
                map_connect_error(e, &self.addr)
            })?;

        if let Err(e) = stream.set_nodelay(true) {
            tracing::warn!(
                addr = %self.addr,
                error = %e,
                "Failed to set TCP_NODELAY (continuing anyway)"
            );
        }

        tracing::debug!(addr = %self.addr, "TCP connection established");
        self.stream = Some(stream);
        Ok(())
    }

    async fn send(&mut self, data: &[u8]) -> Result<()> {
        let stream = self.stream.as_mut().ok_or(Error::NotConnected)?;

        tracing::trace!(
            addr = %self.addr,
            bytes = data.len(),
            data = ?data,
            "Sending data"
        );

        stream.write_all(data).await.map_err(|e| {
            tracing::error!(addr = %self.addr, error = %e, "Failed to send data");
            map_io_error(e)
        })?;

        stream.flush().await.map_err(|e| {
            tracing::error!(addr = %self.addr, error = %e, "Failed to flush TCP stream");
            map_io_error(e)
        })?;

        Ok(())
    }

    async fn receive(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize> {
        let stream = self.stream.as_mut().ok_or(Error::NotConnected)?;

        match tokio::time::timeout(timeout, stream.read(buf)).await {
            Ok(Ok(0)) => {
                // TCP: 0 bytes read means the peer has closed the connection.
                tracing::warn!(addr = %self.addr, "Peer closed connection (0 bytes read)");
                Err(Error::ConnectionLost)
            }
            Ok(Ok(n)) => {
                tracing::trace!(
                    addr = %self.addr,
                    bytes = n,
                    data = ?&buf[..n],
                    "Received data"
                );
                Ok(n)
            }
            Ok(Err(e)) => {
                tracing::error!(addr = %self.addr, error = %e, "Failed to receive data");
                Err(map_io_error(e))
            }
            Err(_) => {
                tracing::trace!(
                    addr = %self.addr,
                    timeout_ms = timeout.as_millis(),
                    "Timeout waiting for data"
                );
                Err(Error::Timeout)
            }
        }
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(mut stream) = self.stream.take() {
            if let Err(e) = stream.shutdown().await {
                tracing::warn!(
                    addr = %self.addr,
                    error = %e,
                    "Failed to shutdown TCP stream (continuing anyway)"
                );
            }
            tracing::debug!(addr = %self.addr, "TCP connection closed");
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.stream.is_some()
    }
}

/// Map a connection-time I/O error to the appropriate [`Error`] variant.
fn map_connect_error(e: std::io::Error, addr: &str) -> Error {
    match e.kind() {
        std::io::ErrorKind::ConnectionRefused => {
            Error::Transport(format!("connection refused: {}", addr))
        }
        _ => Error::Io(e),
    }
}

/// Map a data-path I/O error to the appropriate [`Error`] variant.
fn map_io_error(e: std::io::Error) -> Error {
    match e.kind() {
        std::io::ErrorKind::ConnectionReset
        | std::io::ErrorKind::BrokenPipe
        | std::io::ErrorKind::NotConnected
        | std::io::ErrorKind::ConnectionAborted => Error::ConnectionLost,
        _ => Error::Io(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    /// Helper: bind a TcpListener on a random available port and return it
    /// along with its address string.
    async fn test_listener() -> (TcpListener, String) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        (listener, addr)
    }

    #[tokio::test]
    async fn new_transport_is_closed_until_opened() {
        let (listener, addr) = test_listener().await;
        let server = tokio::spawn(async move {
            let (_stream, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let mut transport = TcpTransport::new(&addr);
        assert!(!transport.is_connected());

        transport.open().await.unwrap();
        assert!(transport.is_connected());

        // Opening again is a no-op
        transport.open().await.unwrap();
        assert!(transport.is_connected());

        transport.close().await.unwrap();
        server.abort();
    }

    #[tokio::test]
    async fn connect_send_receive() {
        let (listener, addr) = test_listener().await;

        // Echo one SDCP-sized frame back
        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 12];
            stream.read_exact(&mut buf).await.unwrap();
            stream.write_all(&buf).await.unwrap();
            stream.flush().await.unwrap();
        });

        let frame = [0x02, 0x0A, b'S', b'O', b'N', b'Y', 0x01, 0x01, 0x02, 0x02, 0x00, 0x00];
        let mut transport = TcpTransport::connect(&addr).await.unwrap();
        transport.send(&frame).await.unwrap();

        let mut buf = [0u8; 64];
        let n = transport
            .receive(&mut buf, Duration::from_secs(2))
            .await
            .unwrap();
        assert_eq!(&buf[..n], &frame);

        transport.close().await.unwrap();
        server.await.unwrap();
    }

    #[tokio::test]
    async fn reopen_after_close() {
        let (listener, addr) = test_listener().await;

        // Accept two sessions, echoing one byte on each.
        let server = tokio::spawn(async move {
            for _ in 0..2 {
                let (mut stream, _) = listener.accept().await.unwrap();
                let mut b = [0u8; 1];
                stream.read_exact(&mut b).await.unwrap();
                stream.write_all(&b).await.unwrap();
            }
        });

        let mut transport = TcpTransport::new(&addr);
        for byte in [0x11u8, 0x22] {
            transport.open().await.unwrap();
            transport.send(&[byte]).await.unwrap();
            let mut buf = [0u8; 4];
            let n = transport
                .receive(&mut buf, Duration::from_secs(2))
                .await
                .unwrap();
            assert_eq!(&buf[..n], &[byte]);
            transport.close().await.unwrap();
            assert!(!transport.is_connected());
        }

        server.await.unwrap();
    }

    #[tokio::test]
    async fn connect_refused() {
        // Bind a listener and immediately drop it so the port is not listening
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        drop(listener);

        let mut transport = TcpTransport::new(&addr);
        match transport.open().await {
            Err(Error::Transport(msg)) => assert!(
                msg.contains("connection refused"),
                "expected 'connection refused' in message, got: {}",
                msg
            ),
            other => panic!("expected Transport error, got: {:?}", other),
        }
        assert!(!transport.is_connected());
    }

    #[tokio::test]
    async fn receive_timeout() {
        let (listener, addr) = test_listener().await;

        let server = tokio::spawn(async move {
            let (_stream, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let mut transport = TcpTransport::connect(&addr).await.unwrap();

        let mut buf = [0u8; 16];
        let result = transport
            .receive(&mut buf, Duration::from_millis(100))
            .await;
        assert!(matches!(result, Err(Error::Timeout)));

        transport.close().await.unwrap();
        server.abort();
    }

    #[tokio::test]
    async fn disconnection_detection() {
        let (listener, addr) = test_listener().await;

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            drop(stream);
        });

        let mut transport = TcpTransport::connect(&addr).await.unwrap();
        server.await.unwrap();

        // Give the OS a moment to propagate the FIN
        tokio::time::sleep(Duration::from_millis(50)).await;

        let mut buf = [0u8; 16];
        let result = transport.receive(&mut buf, Duration::from_secs(2)).await;
        assert!(
            matches!(result, Err(Error::ConnectionLost)),
            "expected ConnectionLost, got: {:?}",
            result
        );
    }

    #[tokio::test]
    async fn send_while_closed_returns_not_connected() {
        let mut transport = TcpTransport::new("127.0.0.1:1");
        let result = transport.send(b"x").await;
        assert!(matches!(result, Err(Error::NotConnected)));

        let mut buf = [0u8; 4];
        let result = transport.receive(&mut buf, Duration::from_millis(10)).await;
        assert!(matches!(result, Err(Error::NotConnected)));
    }

    #[test]
    fn builder_style_timeout() {
        let transport =
            TcpTransport::new("10.0.0.1:53484").with_connect_timeout(Duration::from_secs(1));
        assert_eq!(transport.connect_timeout, Duration::from_secs(1));
        assert_eq!(transport.addr(), "10.0.0.1:53484");
    }
}
