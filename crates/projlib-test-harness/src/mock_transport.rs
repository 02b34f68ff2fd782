//! Mock transport for deterministic testing of protocol engines.
//!
//! [`MockTransport`] implements the [`Transport`] trait with pre-loaded
//! request/response pairs. This lets you test frame encoding, response
//! validation, and connector logic without a projector on the bench.
//!
//! The transport is handed to the connector as a `Box<dyn Transport>`, so
//! the mock keeps its state behind a shared handle: clone the mock before
//! boxing it and use the clone to inspect what the connector did.
//!
//! # Example
//!
//! ```
//! use projlib_test_harness::MockTransport;
//!
//! let mut mock = MockTransport::new();
//! // Serial protocol: GET power status, reply STANDBY.
//! mock.expect(&[0xA9, 0x01, 0x02, 0x01, 0x00, 0x00, 0x03, 0x9A],
//!             &[0xA9, 0x01, 0x02, 0x02, 0x00, 0x00, 0x03, 0x9A]);
//! // IR frame: no response is read.
//! mock.expect_send(&[0xA9, 0x17, 0x2E, 0x00, 0x00, 0x00, 0x3F, 0x9A]);
//!
//! let handle = mock.clone();
//! assert_eq!(handle.remaining_expectations(), 2);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use projlib_core::error::{Error, Result};
use projlib_core::transport::Transport;

/// A pre-loaded request and its optional response.
#[derive(Debug, Clone)]
struct Expectation {
    /// The exact bytes we expect to be sent.
    request: Vec<u8>,
    /// The bytes to return when the matching request is received. `None`
    /// for fire-and-forget frames that get no answer.
    response: Option<Vec<u8>>,
}

/// One transport call recorded by [`MockTransport`], in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockEvent {
    Open,
    Send(Vec<u8>),
    /// Bytes handed out by one `receive()` call.
    Receive(Vec<u8>),
    Close,
}

#[derive(Debug, Default)]
struct MockState {
    /// Ordered queue of expected requests.
    expectations: VecDeque<Expectation>,
    /// The response data pending for the next `receive()` call.
    pending_response: Option<Vec<u8>>,
    /// Cursor into the pending response (how many bytes have been read so far).
    response_cursor: usize,
    connected: bool,
    /// When set, `open()` fails with a transport error.
    fail_open: bool,
    open_count: usize,
    close_count: usize,
    /// Log of all bytes sent through this transport.
    sent_log: Vec<Vec<u8>>,
    events: Vec<MockEvent>,
    /// How long each `receive()` sleeps before answering.
    receive_delay: Duration,
}

/// A mock [`Transport`] for testing protocol engines without hardware.
///
/// Expectations are consumed in order. When `send()` is called, the sent
/// data is recorded and matched against the next expectation. The
/// corresponding response is then returned by the next `receive()` call.
///
/// The mock starts closed, like the real transports. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// Create a new mock transport in the closed state.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // A panic inside a test while the lock is held poisons it; the
        // state is still usable for the assertions that follow.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Add an expected request/response pair.
    ///
    /// When `send()` is called with data matching `request`, the subsequent
    /// `receive()` call will return `response`. An empty `response` makes
    /// the next `receive()` time out, which simulates a silent device.
    pub fn expect(&mut self, request: &[u8], response: &[u8]) {
        self.state().expectations.push_back(Expectation {
            request: request.to_vec(),
            response: Some(response.to_vec()),
        });
    }

    /// Add an expected request that gets no response at all.
    pub fn expect_send(&mut self, request: &[u8]) {
        self.state().expectations.push_back(Expectation {
            request: request.to_vec(),
            response: None,
        });
    }

    /// Return a copy of all data that has been sent through this transport.
    ///
    /// Each element is the byte slice from one `send()` call.
    pub fn sent_data(&self) -> Vec<Vec<u8>> {
        self.state().sent_log.clone()
    }

    /// Every successful open, send, receive, and close, in call order.
    pub fn events(&self) -> Vec<MockEvent> {
        self.state().events.clone()
    }

    /// Return the number of expectations that have not yet been consumed.
    pub fn remaining_expectations(&self) -> usize {
        self.state().expectations.len()
    }

    /// Number of times `open()` succeeded.
    pub fn open_count(&self) -> usize {
        self.state().open_count
    }

    /// Number of times `close()` was called on an open transport.
    pub fn close_count(&self) -> usize {
        self.state().close_count
    }

    /// Total transport activity: successful opens plus sends.
    ///
    /// Zero means the code under test never touched the link.
    pub fn io_count(&self) -> usize {
        let state = self.state();
        state.open_count + state.sent_log.len()
    }

    /// Make every `receive()` sleep for `delay` before answering, so the
    /// caller yields to other tasks mid-exchange like it would on a socket.
    pub fn set_receive_delay(&mut self, delay: Duration) {
        self.state().receive_delay = delay;
    }

    /// Make subsequent `open()` calls fail.
    pub fn set_fail_open(&mut self, fail: bool) {
        self.state().fail_open = fail;
    }

    /// Set the connected state of the mock transport.
    ///
    /// When set to `false`, subsequent `send()` and `receive()` calls will
    /// return [`Error::NotConnected`].
    pub fn set_connected(&mut self, connected: bool) {
        self.state().connected = connected;
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn open(&mut self) -> Result<()> {
        let mut state = self.state();
        if state.fail_open {
            return Err(Error::Transport("mock transport refused to open".into()));
        }
        if !state.connected {
            state.connected = true;
            state.open_count += 1;
            state.events.push(MockEvent::Open);
        }
        Ok(())
    }

    async fn send(&mut self, data: &[u8]) -> Result<()> {
        let mut state = self.state();
        if !state.connected {
            return Err(Error::NotConnected);
        }

        state.sent_log.push(data.to_vec());
        state.events.push(MockEvent::Send(data.to_vec()));

        let Some(expectation) = state.expectations.pop_front() else {
            return Err(Error::Transport(
                "no more expectations in mock transport".into(),
            ));
        };
        if data != expectation.request.as_slice() {
            return Err(Error::Transport(format!(
                "unexpected send data: expected {:02X?}, got {:02X?}",
                expectation.request, data
            )));
        }
        state.pending_response = expectation.response;
        state.response_cursor = 0;
        Ok(())
    }

    async fn receive(&mut self, buf: &mut [u8], _timeout: Duration) -> Result<usize> {
        let delay = self.state().receive_delay;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state();
        if !state.connected {
            return Err(Error::NotConnected);
        }

        let Some(response) = state.pending_response.take() else {
            return Err(Error::Timeout);
        };
        let remaining = &response[state.response_cursor..];
        if remaining.is_empty() {
            state.response_cursor = 0;
            return Err(Error::Timeout);
        }
        let n = remaining.len().min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        state.response_cursor += n;
        state.events.push(MockEvent::Receive(buf[..n].to_vec()));
        if state.response_cursor >= response.len() {
            state.response_cursor = 0;
        } else {
            state.pending_response = Some(response);
        }
        Ok(n)
    }

    async fn close(&mut self) -> Result<()> {
        let mut state = self.state();
        if state.connected {
            state.close_count += 1;
            state.events.push(MockEvent::Close);
        }
        state.connected = false;
        state.pending_response = None;
        state.response_cursor = 0;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.state().connected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn opened() -> MockTransport {
        let mut mock = MockTransport::new();
        mock.open().await.unwrap();
        mock
    }

    #[tokio::test]
    async fn mock_transport_starts_closed() {
        let mut mock = MockTransport::new();
        assert!(!mock.is_connected());

        let result = mock.send(&[0x01]).await;
        assert!(matches!(result, Err(Error::NotConnected)));
        assert_eq!(mock.io_count(), 0);
    }

    #[tokio::test]
    async fn mock_transport_basic_send_receive() {
        let mut mock = opened().await;
        let request = &[0xA9, 0x00, 0x10, 0x01, 0x00, 0x00, 0x11, 0x9A];
        let response = &[0xA9, 0x00, 0x10, 0x02, 0x00, 0x32, 0x32, 0x9A];
        mock.expect(request, response);

        mock.send(request).await.unwrap();

        let mut buf = [0u8; 64];
        let n = mock
            .receive(&mut buf, Duration::from_millis(100))
            .await
            .unwrap();
        assert_eq!(&buf[..n], response);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let mut mock = MockTransport::new();
        let handle = mock.clone();
        mock.expect(&[0x01, 0x02], &[0xFF]);
        mock.expect(&[0x03, 0x04], &[0xFE]);

        mock.open().await.unwrap();
        mock.send(&[0x01, 0x02]).await.unwrap();
        mock.send(&[0x03, 0x04]).await.unwrap();
        mock.close().await.unwrap();

        assert_eq!(handle.sent_data(), vec![vec![0x01, 0x02], vec![0x03, 0x04]]);
        assert_eq!(handle.open_count(), 1);
        assert_eq!(handle.close_count(), 1);
        assert_eq!(handle.io_count(), 3);
        assert_eq!(handle.remaining_expectations(), 0);
    }

    #[tokio::test]
    async fn expect_send_has_no_response() {
        let mut mock = opened().await;
        mock.expect_send(&[0x17, 0x2E]);

        mock.send(&[0x17, 0x2E]).await.unwrap();

        let mut buf = [0u8; 8];
        let result = mock.receive(&mut buf, Duration::from_millis(10)).await;
        assert!(matches!(result, Err(Error::Timeout)));
    }

    #[tokio::test]
    async fn empty_response_times_out() {
        let mut mock = opened().await;
        mock.expect(&[0x01], &[]);
        mock.send(&[0x01]).await.unwrap();

        let mut buf = [0u8; 8];
        let result = mock.receive(&mut buf, Duration::from_millis(10)).await;
        assert!(matches!(result, Err(Error::Timeout)));
    }

    #[tokio::test]
    async fn wrong_data_errors() {
        let mut mock = opened().await;
        mock.expect(&[0x01], &[0xFF]);

        let result = mock.send(&[0x99]).await;
        assert!(matches!(result, Err(Error::Transport(_))));
    }

    #[tokio::test]
    async fn no_expectations_errors() {
        let mut mock = opened().await;
        let result = mock.send(&[0x01]).await;
        assert!(matches!(result, Err(Error::Transport(_))));
    }

    #[tokio::test]
    async fn fail_open() {
        let mut mock = MockTransport::new();
        mock.set_fail_open(true);
        assert!(matches!(mock.open().await, Err(Error::Transport(_))));
        assert!(!mock.is_connected());
        assert_eq!(mock.open_count(), 0);
    }

    #[tokio::test]
    async fn open_twice_counts_once() {
        let mut mock = MockTransport::new();
        mock.open().await.unwrap();
        mock.open().await.unwrap();
        assert_eq!(mock.open_count(), 1);
    }

    #[tokio::test]
    async fn partial_receive() {
        let mut mock = opened().await;
        mock.expect(&[0x01], &[0xAA, 0xBB, 0xCC, 0xDD]);
        mock.send(&[0x01]).await.unwrap();

        let mut buf = [0u8; 2];
        let n = mock
            .receive(&mut buf, Duration::from_millis(100))
            .await
            .unwrap();
        assert_eq!(&buf[..n], &[0xAA, 0xBB]);

        let n = mock
            .receive(&mut buf, Duration::from_millis(100))
            .await
            .unwrap();
        assert_eq!(&buf[..n], &[0xCC, 0xDD]);

        let result = mock.receive(&mut buf, Duration::from_millis(10)).await;
        assert!(matches!(result, Err(Error::Timeout)));
    }

    #[tokio::test]
    async fn set_connected_false() {
        let mut mock = opened().await;
        mock.set_connected(false);

        let mut buf = [0u8; 8];
        let result = mock.receive(&mut buf, Duration::from_millis(10)).await;
        assert!(matches!(result, Err(Error::NotConnected)));
    }

    #[tokio::test]
    async fn events_follow_call_order() {
        let mut mock = MockTransport::new();
        mock.expect(&[0x01], &[0xAA]);
        mock.set_receive_delay(Duration::from_millis(5));

        mock.open().await.unwrap();
        mock.send(&[0x01]).await.unwrap();
        let mut buf = [0u8; 4];
        let start = std::time::Instant::now();
        mock.receive(&mut buf, Duration::from_millis(100)).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(5));
        mock.close().await.unwrap();
        mock.close().await.unwrap();

        assert_eq!(
            mock.events(),
            vec![
                MockEvent::Open,
                MockEvent::Send(vec![0x01]),
                MockEvent::Receive(vec![0xAA]),
                MockEvent::Close,
            ]
        );
    }
}
