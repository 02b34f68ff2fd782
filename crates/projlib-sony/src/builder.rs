//! SonyProjectorBuilder -- fluent builder for constructing [`SonyProjector`]
//! instances.
//!
//! Separates configuration from construction so that callers can pick the
//! protocol, addressing, and timing before the connector is created. No
//! connection is made by `build()`; the link opens on first use.
//!
//! # Example
//!
//! ```no_run
//! use projlib_sony::builder::{Protocol, SonyProjectorBuilder};
//! use projlib_sony::models::VW520;
//! use std::time::Duration;
//!
//! # async fn example() -> projlib_core::Result<()> {
//! let projector = SonyProjectorBuilder::new(VW520)
//!     .protocol(Protocol::Sdcp)
//!     .host("192.168.1.40")
//!     .command_timeout(Duration::from_millis(1500))
//!     .build()
//!     .await?;
//! println!("{}", projector.power_status().await?);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use projlib_core::error::{Error, Result};
use projlib_core::transport::Transport;
use projlib_transport::{DEFAULT_CONNECT_TIMEOUT, SerialConfig, SerialTransport, TcpTransport};

use crate::codec::FrameCodec;
use crate::models::ProjectorModel;
use crate::projector::SonyProjector;
use crate::sdcp::{self, SdcpCodec};
use crate::serial::SerialCodec;

pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(1);

/// Time the projector needs to digest an IR frame before the next command.
pub const DEFAULT_IR_SETTLE: Duration = Duration::from_millis(45);

/// How the connector talks to the projector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Protocol {
    /// SDCP over TCP.
    #[default]
    Sdcp,
    /// The serial protocol on an RS-232C port.
    Serial,
    /// The serial protocol through a serial-to-Ethernet adapter.
    SerialOverIp,
}

impl Protocol {
    /// Port used when none is configured. Only SDCP has a fixed port.
    pub fn default_port(self) -> Option<u16> {
        match self {
            Protocol::Sdcp => Some(sdcp::DEFAULT_PORT),
            Protocol::Serial | Protocol::SerialOverIp => None,
        }
    }

    pub fn is_network(self) -> bool {
        self != Protocol::Serial
    }

    fn codec(self, community: [u8; 4]) -> Box<dyn FrameCodec> {
        match self {
            Protocol::Sdcp => Box::new(SdcpCodec::new(community)),
            Protocol::Serial | Protocol::SerialOverIp => Box::new(SerialCodec),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Protocol::Sdcp => "sdcp",
            Protocol::Serial => "serial",
            Protocol::SerialOverIp => "serial-over-ip",
        })
    }
}

impl FromStr for Protocol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sdcp" | "ip" => Ok(Protocol::Sdcp),
            "serial" | "rs232" => Ok(Protocol::Serial),
            "serial-over-ip" | "serial_over_ip" | "ip-serial" => Ok(Protocol::SerialOverIp),
            _ => Err(Error::InvalidParameter(format!("unknown protocol {s:?}"))),
        }
    }
}

/// Fluent builder for [`SonyProjector`].
///
/// The simplest usage is:
///
/// ```ignore
/// let projector = SonyProjectorBuilder::new(VW520)
///     .host("192.168.1.40")
///     .build()
///     .await?;
/// ```
pub struct SonyProjectorBuilder {
    model: ProjectorModel,
    protocol: Protocol,
    host: Option<String>,
    port: Option<u16>,
    serial_port: Option<String>,
    serial_config: SerialConfig,
    community: String,
    command_timeout: Duration,
    connect_timeout: Duration,
    ir_settle: Duration,
    double_ir_power_on: bool,
    cancel: CancellationToken,
    auto_detect_model: bool,
}

impl SonyProjectorBuilder {
    /// Create a new builder for the given model.
    pub fn new(model: ProjectorModel) -> Self {
        SonyProjectorBuilder {
            model,
            protocol: Protocol::default(),
            host: None,
            port: None,
            serial_port: None,
            serial_config: SerialConfig::default(),
            community: String::from_utf8_lossy(&sdcp::DEFAULT_COMMUNITY).into_owned(),
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            ir_settle: DEFAULT_IR_SETTLE,
            double_ir_power_on: true,
            cancel: CancellationToken::new(),
            auto_detect_model: false,
        }
    }

    /// Set the protocol (default: SDCP).
    pub fn protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// Set the projector's host name or IP address.
    pub fn host(mut self, host: &str) -> Self {
        self.host = Some(host.to_string());
        self
    }

    /// Set the TCP port. SDCP defaults to 53484; serial-over-IP has no
    /// default.
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the serial port path (e.g. `/dev/ttyUSB0` or `COM3`).
    pub fn serial_port(mut self, port: &str) -> Self {
        self.serial_port = Some(port.to_string());
        self
    }

    /// Override the serial line settings (default: 38400 8E1).
    pub fn serial_config(mut self, config: SerialConfig) -> Self {
        self.serial_config = config;
        self
    }

    /// Set the SDCP community, four ASCII characters (default: `SONY`).
    pub fn community(mut self, community: &str) -> Self {
        self.community = community.to_string();
        self
    }

    /// Set the timeout for one request/response exchange (default: 1s).
    pub fn command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    /// Set the TCP connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the wait after each IR frame (default: 45ms).
    pub fn ir_settle(mut self, settle: Duration) -> Self {
        self.ir_settle = settle;
        self
    }

    /// Send the IR power-on code twice when the power status cannot be
    /// read (default: enabled).
    pub fn double_ir_power_on(mut self, enabled: bool) -> Self {
        self.double_ir_power_on = enabled;
        self
    }

    /// Provide a token that aborts pending IR settle waits when cancelled.
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Query the model name at build time and on every
    /// [`refresh`](SonyProjector::refresh), switching to the matching model
    /// row. SDCP only.
    pub fn auto_detect_model(mut self, enabled: bool) -> Self {
        self.auto_detect_model = enabled;
        self
    }

    fn community_bytes(&self) -> Result<[u8; 4]> {
        let bytes: [u8; 4] = self.community.as_bytes().try_into().map_err(|_| {
            Error::InvalidParameter(format!(
                "community must be 4 characters, got {:?}",
                self.community
            ))
        })?;
        if !bytes.iter().all(u8::is_ascii_graphic) {
            return Err(Error::InvalidParameter(format!(
                "community must be printable ASCII, got {:?}",
                self.community
            )));
        }
        Ok(bytes)
    }

    /// Build a [`SonyProjector`] with a caller-provided transport.
    ///
    /// This is the primary entry point for testing (pass a `MockTransport`
    /// from `projlib-test-harness`) and for custom links.
    pub async fn build_with_transport(self, transport: Box<dyn Transport>) -> Result<SonyProjector> {
        let community = self.community_bytes()?;
        if self.auto_detect_model && self.protocol != Protocol::Sdcp {
            return Err(Error::InvalidParameter(
                "auto_detect_model requires the SDCP protocol".into(),
            ));
        }

        debug!(
            model = self.model.name,
            protocol = %self.protocol,
            auto_detect = self.auto_detect_model,
            "building projector"
        );
        let projector = SonyProjector::new(
            transport,
            self.protocol.codec(community),
            self.protocol,
            self.model,
            self.command_timeout,
            self.ir_settle,
            self.double_ir_power_on,
            self.cancel,
        )
        .with_auto_detect(self.auto_detect_model);

        if self.auto_detect_model {
            projector.detect_model().await;
        }
        Ok(projector)
    }

    /// Build a [`SonyProjector`] with the transport the protocol needs.
    ///
    /// SDCP and serial-over-IP need [`host()`](Self::host), and
    /// serial-over-IP also needs [`port()`](Self::port). The serial
    /// protocol needs [`serial_port()`](Self::serial_port).
    pub async fn build(self) -> Result<SonyProjector> {
        let transport: Box<dyn Transport> = match self.protocol {
            Protocol::Sdcp | Protocol::SerialOverIp => {
                let host = self.host.as_deref().ok_or_else(|| {
                    Error::InvalidParameter(format!("host is required for {}", self.protocol))
                })?;
                let port = self
                    .port
                    .or(self.protocol.default_port())
                    .ok_or_else(|| {
                        Error::InvalidParameter(format!("port is required for {}", self.protocol))
                    })?;
                let addr = if host.contains(':') {
                    format!("[{host}]:{port}")
                } else {
                    format!("{host}:{port}")
                };
                Box::new(TcpTransport::new(&addr).with_connect_timeout(self.connect_timeout))
            }
            Protocol::Serial => {
                let port = self.serial_port.as_deref().ok_or_else(|| {
                    Error::InvalidParameter("serial_port is required for serial".into())
                })?;
                Box::new(SerialTransport::new(port, self.serial_config.clone()))
            }
        };
        self.build_with_transport(transport).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Command;
    use crate::models::{HW45ES, VW520};
    use crate::status::PowerStatus;
    use projlib_test_harness::{MockTcpServer, MockTransport};

    fn sdcp_response(item: [u8; 2], data: &[u8]) -> Vec<u8> {
        let mut frame = vec![0x02, 0x0A, b'S', b'O', b'N', b'Y', 0x01, item[0], item[1]];
        frame.push(data.len() as u8);
        frame.extend_from_slice(data);
        frame
    }

    #[tokio::test]
    async fn builder_defaults() {
        let mock = MockTransport::new();
        let projector = SonyProjectorBuilder::new(VW520)
            .build_with_transport(Box::new(mock.clone()))
            .await
            .unwrap();

        assert_eq!(projector.model().name, "VPL-VW520");
        assert_eq!(projector.protocol(), Protocol::Sdcp);
        assert_eq!(mock.io_count(), 0);
    }

    #[tokio::test]
    async fn builder_rejects_bad_community() {
        for community in ["SON", "SONYX", "SÖNY", "SO Y"] {
            let result = SonyProjectorBuilder::new(VW520)
                .community(community)
                .build_with_transport(Box::new(MockTransport::new()))
                .await;
            assert!(matches!(result, Err(Error::InvalidParameter(_))), "{community}");
        }
    }

    #[tokio::test]
    async fn build_requires_host() {
        let result = SonyProjectorBuilder::new(VW520).build().await;
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[tokio::test]
    async fn serial_over_ip_requires_port() {
        let result = SonyProjectorBuilder::new(VW520)
            .protocol(Protocol::SerialOverIp)
            .host("10.0.0.5")
            .build()
            .await;
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[tokio::test]
    async fn serial_requires_port_name() {
        let result = SonyProjectorBuilder::new(VW520)
            .protocol(Protocol::Serial)
            .build()
            .await;
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[tokio::test]
    async fn build_does_not_connect() {
        let projector = SonyProjectorBuilder::new(VW520)
            .host("192.0.2.1")
            .build()
            .await
            .unwrap();
        assert!(!projector.is_session_open().await);
    }

    #[tokio::test]
    async fn auto_detect_switches_model() {
        let mut mock = MockTransport::new();
        let request = SdcpCodec::default().encode(Command::Get, [0x80, 0x01], [0x00, 0x00]);
        mock.expect(&request, &sdcp_response([0x80, 0x01], b"VPL-HW45ES"));

        let projector = SonyProjectorBuilder::new(VW520)
            .auto_detect_model(true)
            .build_with_transport(Box::new(mock.clone()))
            .await
            .unwrap();
        assert_eq!(projector.model().name, HW45ES.name);
        assert_eq!(projector.capabilities().model(), HW45ES.name);
        assert_eq!(mock.close_count(), 1);
    }

    #[tokio::test]
    async fn auto_detect_keeps_model_on_failure() {
        let mut mock = MockTransport::new();
        let request = SdcpCodec::default().encode(Command::Get, [0x80, 0x01], [0x00, 0x00]);
        mock.expect(&request, &sdcp_response([0x80, 0x01], b"VPL-XX1"));

        let projector = SonyProjectorBuilder::new(VW520)
            .auto_detect_model(true)
            .build_with_transport(Box::new(mock))
            .await
            .unwrap();
        assert_eq!(projector.model().name, "VPL-VW520");
    }

    #[tokio::test]
    async fn refresh_detects_model_again() {
        let codec = SdcpCodec::default();
        let model_request = codec.encode(Command::Get, [0x80, 0x01], [0x00, 0x00]);
        let mut mock = MockTransport::new();
        mock.expect(&model_request, &sdcp_response([0x80, 0x01], b"VPL-VW520"));
        mock.expect(&model_request, &sdcp_response([0x80, 0x01], b"VPL-HW45ES"));
        mock.expect(
            &codec.encode(Command::Get, [0x01, 0x02], [0x00, 0x00]),
            &sdcp_response([0x01, 0x02], &[0x00, 0x00]),
        );
        mock.expect(
            &codec.encode(Command::Get, [0x01, 0x01], [0x00, 0x00]),
            &sdcp_response([0x01, 0x01], &[0x00, 0x00]),
        );

        let projector = SonyProjectorBuilder::new(VW520)
            .auto_detect_model(true)
            .build_with_transport(Box::new(mock.clone()))
            .await
            .unwrap();
        assert_eq!(projector.model().name, "VPL-VW520");

        let state = projector.refresh().await.unwrap();
        assert_eq!(projector.model().name, HW45ES.name);
        assert_eq!(projector.capabilities().model(), HW45ES.name);
        assert_eq!(state.power, Some(PowerStatus::Standby));
        assert_eq!(state.settings.len(), HW45ES.capabilities().available().count());
        assert_eq!(mock.remaining_expectations(), 0);
    }

    #[tokio::test]
    async fn auto_detect_requires_sdcp() {
        let result = SonyProjectorBuilder::new(VW520)
            .protocol(Protocol::Serial)
            .auto_detect_model(true)
            .build_with_transport(Box::new(MockTransport::new()))
            .await;
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn protocol_parsing() {
        assert_eq!("SDCP".parse::<Protocol>().unwrap(), Protocol::Sdcp);
        assert_eq!("serial".parse::<Protocol>().unwrap(), Protocol::Serial);
        assert_eq!(
            "serial-over-ip".parse::<Protocol>().unwrap(),
            Protocol::SerialOverIp
        );
        assert!("udp".parse::<Protocol>().is_err());
        assert_eq!(Protocol::Sdcp.default_port(), Some(53484));
    }

    #[tokio::test]
    async fn sdcp_over_tcp_end_to_end() {
        let codec = SdcpCodec::new(*b"ABCD");
        let status_request = codec.encode(Command::Get, [0x01, 0x02], [0x00, 0x00]);
        let mut status_response = sdcp_response([0x01, 0x02], &[0x00, 0x03]);
        status_response[2..6].copy_from_slice(b"ABCD");
        let ir_request = codec.encode_ir([0x17, 0x29]);

        let mut server = MockTcpServer::new().await.unwrap();
        server.expect(&status_request, &status_response);
        server.expect_send(&ir_request);
        server.start();
        let port: u16 = server
            .addr()
            .rsplit_once(':')
            .and_then(|(_, port)| port.parse().ok())
            .unwrap();

        let projector = SonyProjectorBuilder::new(VW520)
            .host("127.0.0.1")
            .port(port)
            .community("ABCD")
            .build()
            .await
            .unwrap();
        assert_eq!(projector.power_status().await.unwrap(), PowerStatus::On);
        projector.send_ir(&crate::items::IR_MENU).await.unwrap();

        assert_eq!(server.wait().await.unwrap(), 2);
    }
}
