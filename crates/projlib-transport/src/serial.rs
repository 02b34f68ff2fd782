//! Serial port transport for projector control.
//!
//! This module provides [`SerialTransport`], which implements the [`Transport`]
//! trait for the RS-232 control port found on the back of most home cinema
//! projectors (usually reached through a USB adapter).
//!
//! The port is not opened when the transport is constructed. The connector
//! opens it at the start of each command session and closes it afterwards,
//! so other software can share the port between commands.
//!
//! # Example
//!
//! ```no_run
//! use projlib_transport::{SerialConfig, SerialTransport};
//! use projlib_core::transport::Transport;
//! use std::time::Duration;
//!
//! # async fn example() -> projlib_core::Result<()> {
//! let mut transport = SerialTransport::new("/dev/ttyUSB0", SerialConfig::default());
//! transport.open().await?;
//!
//! // Query power status
//! transport.send(&[0xA9, 0x01, 0x02, 0x01, 0x00, 0x00, 0x03, 0x9A]).await?;
//!
//! let mut buf = [0u8; 8];
//! let n = transport.receive(&mut buf, Duration::from_secs(1)).await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use projlib_core::error::{Error, Result};
use projlib_core::transport::Transport;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_serial::{SerialPort, SerialPortBuilderExt, SerialStream};

/// Serial port configuration.
///
/// Defaults match the projector control port: 38400 baud, 8 data bits,
/// even parity, 1 stop bit, no flow control.
#[derive(Debug, Clone)]
pub struct SerialConfig {
    /// Baud rate (38400 on every supported projector)
    pub baud_rate: u32,
    /// Number of data bits
    pub data_bits: DataBits,
    /// Number of stop bits
    pub stop_bits: StopBits,
    /// Parity checking
    pub parity: Parity,
    /// Flow control
    pub flow_control: FlowControl,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: 38_400,
            data_bits: DataBits::Eight,
            stop_bits: StopBits::One,
            parity: Parity::Even,
            flow_control: FlowControl::None,
        }
    }
}

/// Number of data bits per character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataBits {
    Seven,
    Eight,
}

impl From<DataBits> for tokio_serial::DataBits {
    fn from(bits: DataBits) -> Self {
        match bits {
            DataBits::Seven => tokio_serial::DataBits::Seven,
            DataBits::Eight => tokio_serial::DataBits::Eight,
        }
    }
}

/// Number of stop bits per character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopBits {
    One,
    Two,
}

impl From<StopBits> for tokio_serial::StopBits {
    fn from(bits: StopBits) -> Self {
        match bits {
            StopBits::One => tokio_serial::StopBits::One,
            StopBits::Two => tokio_serial::StopBits::Two,
        }
    }
}

/// Parity checking mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    None,
    Odd,
    Even,
}

impl From<Parity> for tokio_serial::Parity {
    fn from(parity: Parity) -> Self {
        match parity {
            Parity::None => tokio_serial::Parity::None,
            Parity::Odd => tokio_serial::Parity::Odd,
            Parity::Even => tokio_serial::Parity::Even,
        }
    }
}

/// Flow control mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowControl {
    None,
    Hardware,
}

impl From<FlowControl> for tokio_serial::FlowControl {
    fn from(flow: FlowControl) -> Self {
        match flow {
            FlowControl::None => tokio_serial::FlowControl::None,
            FlowControl::Hardware => tokio_serial::FlowControl::Hardware,
        }
    }
}

/// Serial port transport for projector control.
pub struct SerialTransport {
    /// The underlying serial port stream, `None` while closed.
    port: Option<SerialStream>,
    /// Port name for logging and for reopening.
    port_name: String,
    config: SerialConfig,
}

impl SerialTransport {
    /// Create a closed transport for the given port path.
    ///
    /// * `port` - Serial port path (e.g., "/dev/ttyUSB0" on Linux, "COM3" on Windows)
    /// * `config` - Line settings; [`SerialConfig::default()`] suits Sony projectors
    pub fn new(port: &str, config: SerialConfig) -> Self {
        Self {
            port: None,
            port_name: port.to_string(),
            config,
        }
    }

    /// Get the name of the serial port.
    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    /// Get the line settings used when the port is opened.
    pub fn config(&self) -> &SerialConfig {
        &self.config
    }
}

/// Map a data-path I/O error to the appropriate [`Error`] variant.
fn map_io_error(e: std::io::Error) -> Error {
    match e.kind() {
        std::io::ErrorKind::BrokenPipe | std::io::ErrorKind::NotConnected => Error::ConnectionLost,
        _ => Error::Io(e),
    }
}

#[async_trait]
impl Transport for SerialTransport {
    async fn open(&mut self) -> Result<()> {
        if self.port.is_some() {
            return Ok(());
        }

        let config = &self.config;
        tracing::debug!(
            port = %self.port_name,
            baud_rate = config.baud_rate,
            data_bits = ?config.data_bits,
            stop_bits = ?config.stop_bits,
            parity = ?config.parity,
            flow_control = ?config.flow_control,
            "Opening serial port"
        );

        let mut serial_stream = tokio_serial::new(&self.port_name, config.baud_rate)
            .data_bits(config.data_bits.into())
            .stop_bits(config.stop_bits.into())
            .parity(config.parity.into())
            .flow_control(config.flow_control.into())
            .open_native_async()
            .map_err(|e| {
                tracing::error!(port = %self.port_name, error = %e, "Failed to open serial port");
                Error::Transport(format!(
                    "failed to open serial port {}: {}",
                    self.port_name, e
                ))
            })?;

        // Some USB adapters wire RTS to the projector's RX enable line and
        // garble the first frame if it is left asserted.
        if let Err(e) = serial_stream.write_request_to_send(false) {
            tracing::warn!(port = %self.port_name, error = %e, "Failed to de-assert RTS");
        }

        tracing::debug!(port = %self.port_name, "Serial port opened");
        self.port = Some(serial_stream);
        Ok(())
    }

    async fn send(&mut self, data: &[u8]) -> Result<()> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;

        tracing::trace!(
            port = %self.port_name,
            bytes = data.len(),
            data = ?data,
            "Sending data"
        );

        port.write_all(data).await.map_err(|e| {
            tracing::error!(port = %self.port_name, error = %e, "Failed to send data");
            map_io_error(e)
        })?;

        port.flush().await.map_err(|e| {
            tracing::error!(port = %self.port_name, error = %e, "Failed to flush serial port");
            map_io_error(e)
        })?;

        Ok(())
    }

    async fn receive(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;

        match tokio::time::timeout(timeout, port.read(buf)).await {
            Ok(Ok(n)) => {
                tracing::trace!(
                    port = %self.port_name,
                    bytes = n,
                    data = ?&buf[..n],
                    "Received data"
                );
                Ok(n)
            }
            Ok(Err(e)) => {
                tracing::error!(port = %self.port_name, error = %e, "Failed to receive data");
                Err(map_io_error(e))
            }
            Err(_) => {
                tracing::trace!(
                    port = %self.port_name,
                    timeout_ms = timeout.as_millis(),
                    "Timeout waiting for data"
                );
                Err(Error::Timeout)
            }
        }
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(mut port) = self.port.take() {
            if let Err(e) = port.flush().await {
                tracing::warn!(
                    port = %self.port_name,
                    error = %e,
                    "Failed to flush before closing (continuing anyway)"
                );
            }
            tracing::debug!(port = %self.port_name, "Serial port closed");
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.port.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_config_default_is_8e1_38400() {
        let config = SerialConfig::default();
        assert_eq!(config.baud_rate, 38_400);
        assert_eq!(config.data_bits, DataBits::Eight);
        assert_eq!(config.stop_bits, StopBits::One);
        assert_eq!(config.parity, Parity::Even);
        assert_eq!(config.flow_control, FlowControl::None);
    }

    #[test]
    fn parity_conversion() {
        assert_eq!(
            tokio_serial::Parity::from(Parity::Even),
            tokio_serial::Parity::Even
        );
        assert_eq!(
            tokio_serial::Parity::from(Parity::None),
            tokio_serial::Parity::None
        );
    }

    #[test]
    fn new_transport_starts_closed() {
        let transport = SerialTransport::new("/dev/ttyUSB9", SerialConfig::default());
        assert!(!transport.is_connected());
        assert_eq!(transport.port_name(), "/dev/ttyUSB9");
    }

    #[tokio::test]
    async fn send_while_closed_returns_not_connected() {
        let mut transport = SerialTransport::new("/dev/ttyUSB9", SerialConfig::default());
        let result = transport.send(&[0xA9]).await;
        assert!(matches!(result, Err(Error::NotConnected)));
    }

    #[tokio::test]
    async fn open_missing_port_is_transport_error() {
        let mut transport =
            SerialTransport::new("/dev/projlib-no-such-port", SerialConfig::default());
        let result = transport.open().await;
        assert!(matches!(result, Err(Error::Transport(_))));
        assert!(!transport.is_connected());
    }

    #[tokio::test]
    async fn close_while_closed_is_noop() {
        let mut transport = SerialTransport::new("/dev/ttyUSB9", SerialConfig::default());
        transport.close().await.unwrap();
        assert!(!transport.is_connected());
    }
}
