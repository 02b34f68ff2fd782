//! SonyProjector -- the protocol connector for Sony projectors.
//!
//! This module ties a [`FrameCodec`] (SDCP or serial) to a [`Transport`].
//! Every operation that touches the link takes the transport lock for its
//! whole open, write, read, close sequence, so commands from concurrent
//! callers never interleave on the wire and run in call order.
//!
//! Connections are call-scoped by default: an operation opens the link if
//! it is closed and closes it again when done. Callers that batch commands
//! can hold the link open with [`SonyProjector::open_session`]; operations
//! then reuse the open link and leave it open.
//!
//! Typed accessors check the model's [`Capabilities`] first and fail with
//! [`Error::UnsupportedForModel`] before any I/O when a setting does not
//! exist on the model. Symbolic values are resolved through the setting's
//! capability table, also before any I/O.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use projlib_core::capability::CapabilityTable;
use projlib_core::error::{Error, Result};
use projlib_core::transport::Transport;
use projlib_core::{Code, checked_encode16, decode16, encode16};

use crate::builder::Protocol;
use crate::codec::{Command, DecodeResult, FrameCodec};
use crate::items::{self, Item};
use crate::models::{Capabilities, ProjectorModel, Setting, SettingKind};
use crate::state::{ProjectorState, SettingValue};
use crate::status::{ErrorStatus, PowerStatus};

const POWER_ON: Code = [0x00, 0x01];
const POWER_OFF: Code = [0x00, 0x00];
const SWITCH_ON: Code = [0x00, 0x01];
const SWITCH_OFF: Code = [0x00, 0x00];
const NO_DATA: Code = [0x00, 0x00];

macro_rules! numeric_setting {
    ($get:ident, $set:ident, $setting:expr) => {
        pub async fn $get(&self) -> Result<u16> {
            self.get_numeric($setting).await
        }

        pub async fn $set(&self, value: u16) -> Result<()> {
            self.set_numeric($setting, value).await
        }
    };
}

macro_rules! choice_setting {
    ($get:ident, $set:ident, $setting:expr) => {
        pub async fn $get(&self) -> Result<&'static str> {
            self.get_choice($setting).await
        }

        pub async fn $set(&self, name: &str) -> Result<()> {
            self.set_choice($setting, name).await
        }
    };
}

macro_rules! switch_setting {
    ($get:ident, $set:ident, $setting:expr) => {
        pub async fn $get(&self) -> Result<bool> {
            self.get_switch($setting).await
        }

        pub async fn $set(&self, on: bool) -> Result<()> {
            self.set_switch($setting, on).await
        }
    };
}

/// The model row in use and the capabilities derived from it.
struct Profile {
    model: ProjectorModel,
    capabilities: Capabilities,
}

impl Profile {
    fn new(model: ProjectorModel) -> Self {
        Profile {
            capabilities: model.capabilities(),
            model,
        }
    }
}

/// A Sony projector controlled over SDCP or the serial protocol.
///
/// Constructed via [`SonyProjectorBuilder`](crate::builder::SonyProjectorBuilder).
pub struct SonyProjector {
    transport: Mutex<Box<dyn Transport>>,
    codec: Box<dyn FrameCodec>,
    protocol: Protocol,
    /// Replaced when auto-detection finds another model.
    profile: RwLock<Profile>,
    command_timeout: Duration,
    ir_settle: Duration,
    double_ir_power_on: bool,
    auto_detect_model: bool,
    /// Set while a caller holds the link through `open_session`.
    session_held: AtomicBool,
    cancel: CancellationToken,
}

impl SonyProjector {
    /// Create a connector from its parts.
    ///
    /// Called by the builder; callers should use the builder API instead.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        transport: Box<dyn Transport>,
        codec: Box<dyn FrameCodec>,
        protocol: Protocol,
        model: ProjectorModel,
        command_timeout: Duration,
        ir_settle: Duration,
        double_ir_power_on: bool,
        cancel: CancellationToken,
    ) -> Self {
        SonyProjector {
            transport: Mutex::new(transport),
            codec,
            protocol,
            profile: RwLock::new(Profile::new(model)),
            command_timeout,
            ir_settle,
            double_ir_power_on,
            auto_detect_model: false,
            session_held: AtomicBool::new(false),
            cancel,
        }
    }

    /// Re-detect the model on every [`refresh`](Self::refresh). SDCP only.
    pub(crate) fn with_auto_detect(mut self, enabled: bool) -> Self {
        self.auto_detect_model = enabled;
        self
    }

    fn profile(&self) -> RwLockReadGuard<'_, Profile> {
        self.profile.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn model(&self) -> ProjectorModel {
        self.profile().model
    }

    pub fn capabilities(&self) -> Capabilities {
        self.profile().capabilities.clone()
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    // ---------------------------------------------------------------
    // Session handling
    // ---------------------------------------------------------------

    /// Open the link and keep it open across operations.
    ///
    /// Until [`close_session`](Self::close_session) is called, operations
    /// reuse the open link instead of opening and closing their own.
    pub async fn open_session(&self) -> Result<()> {
        let mut transport = self.transport.lock().await;
        Self::ensure_open(&mut transport).await?;
        self.session_held.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Close the link opened by [`open_session`](Self::open_session).
    pub async fn close_session(&self) -> Result<()> {
        let mut transport = self.transport.lock().await;
        self.session_held.store(false, Ordering::SeqCst);
        transport
            .close()
            .await
            .map_err(|e| Error::communication("close session", e))
    }

    pub async fn is_session_open(&self) -> bool {
        self.transport.lock().await.is_connected()
    }

    /// Open the link if needed. Returns `true` if this call opened it.
    async fn ensure_open(transport: &mut Box<dyn Transport>) -> Result<bool> {
        if transport.is_connected() {
            return Ok(false);
        }
        transport
            .open()
            .await
            .map_err(|e| Error::Connection(Box::new(e)))?;
        Ok(true)
    }

    // ---------------------------------------------------------------
    // Generic exchange
    // ---------------------------------------------------------------

    /// Read the raw two-byte value of a data item.
    pub async fn get_setting(&self, item: &Item) -> Result<Code> {
        debug!(item = %item, "get setting");
        let payload = self.exchange(Command::Get, item, NO_DATA).await?;
        let code = Code::try_from(payload.as_slice()).map_err(|_| {
            Error::communication(
                format!("get setting {item}"),
                Error::InvalidResponse {
                    reason: format!("expected 2 data bytes, got {}", payload.len()),
                    bytes: payload.clone(),
                },
            )
        })?;
        debug!(item = %item, data = ?code, "get setting succeeded");
        Ok(code)
    }

    /// Write the raw two-byte value of a data item.
    pub async fn set_setting(&self, item: &Item, data: Code) -> Result<()> {
        debug!(item = %item, data = ?data, "set setting");
        self.exchange(Command::Set, item, data).await?;
        debug!(item = %item, "set setting succeeded");
        Ok(())
    }

    /// One request/response exchange inside the transport lock.
    ///
    /// The link is closed, when this call opened it, before the response is
    /// validated.
    async fn exchange(&self, command: Command, item: &Item, data: Code) -> Result<Vec<u8>> {
        let Some(code) = item.data_code else {
            return Err(Error::InvalidParameter(format!(
                "{item} has no data code"
            )));
        };
        let context = format!("{} setting {}", command.as_str(), item.id);
        let request = self.codec.encode(command, code, data);

        let mut transport = self.transport.lock().await;
        let opened_here = Self::ensure_open(&mut transport).await?;
        let result = self.write_and_read(&mut **transport, &request).await;
        let closed = if opened_here {
            transport.close().await
        } else {
            Ok(())
        };
        drop(transport);

        let frame = result
            .and_then(|frame| closed.map(|()| frame))
            .map_err(|e| Error::communication(&context, e))?;
        self.codec
            .validate(&frame, command, code)
            .map(<[u8]>::to_vec)
            .map_err(|e| Error::communication(context, e))
    }

    async fn write_and_read(&self, transport: &mut dyn Transport, request: &[u8]) -> Result<Vec<u8>> {
        trace!(protocol = self.codec.name(), frame = ?request, "sending frame");
        transport.send(request).await?;
        self.read_frame(transport).await
    }

    /// Accumulate received bytes until the codec reports a complete frame.
    async fn read_frame(&self, transport: &mut dyn Transport) -> Result<Vec<u8>> {
        let deadline = Instant::now() + self.command_timeout;
        let mut buf = [0u8; 64];
        let mut frame = Vec::new();

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let received = if remaining.is_zero() {
                Err(Error::Timeout)
            } else {
                match tokio::time::timeout(remaining, transport.receive(&mut buf, remaining)).await {
                    Ok(result) => result,
                    Err(_) => Err(Error::Timeout),
                }
            };

            match received {
                Ok(n) => {
                    frame.extend_from_slice(&buf[..n]);
                    if let DecodeResult::Complete(len) = self.codec.decode(&frame) {
                        frame.truncate(len);
                        trace!(protocol = self.codec.name(), frame = ?frame, "received frame");
                        return Ok(frame);
                    }
                }
                Err(Error::Timeout) if !frame.is_empty() => {
                    return Err(Error::InvalidResponse {
                        reason: "incomplete response".into(),
                        bytes: frame,
                    });
                }
                Err(e) => return Err(e),
            }
        }
    }

    // ---------------------------------------------------------------
    // Infrared emulation
    // ---------------------------------------------------------------

    fn ir_code(item: &Item) -> Result<Code> {
        item.ir_code
            .ok_or_else(|| Error::InvalidParameter(format!("{item} has no IR code")))
    }

    /// Send a remote-control code. No response is read.
    ///
    /// The link stays locked for the settle time after the frame is
    /// written. Once the builder's token is cancelled no frame goes out and
    /// the call fails with [`Error::Cancelled`]. Cancelling during the wait
    /// fails the call with [`Error::Cancelled`] wrapped in a communication
    /// error, since the frame was already sent.
    pub async fn send_ir(&self, item: &Item) -> Result<()> {
        let code = Self::ir_code(item)?;
        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        debug!(item = %item, "send IR");

        let mut transport = self.transport.lock().await;
        let opened_here = Self::ensure_open(&mut transport).await?;
        let result = self.write_ir(&mut **transport, code).await;
        let closed = if opened_here {
            transport.close().await
        } else {
            Ok(())
        };

        result
            .and(closed)
            .map_err(|e| Error::communication(format!("send IR {item}"), e))?;
        debug!(item = %item, "send IR succeeded");
        Ok(())
    }

    /// Send several remote-control codes over one connection.
    ///
    /// Every item is checked before the link is opened. Sending stops at
    /// the first failure or cancellation.
    pub async fn send_ir_batch(&self, items: &[&Item]) -> Result<()> {
        let codes = items
            .iter()
            .map(|item| Self::ir_code(item))
            .collect::<Result<Vec<_>>>()?;
        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        debug!(count = codes.len(), "send IR batch");

        let mut transport = self.transport.lock().await;
        let opened_here = Self::ensure_open(&mut transport).await?;
        let mut result = Ok(());
        for (item, code) in items.iter().zip(codes) {
            result = self
                .write_ir(&mut **transport, code)
                .await
                .map_err(|e| Error::communication(format!("send IR {item}"), e));
            if result.is_err() {
                break;
            }
        }
        let closed = if opened_here {
            transport.close().await
        } else {
            Ok(())
        };

        result?;
        closed.map_err(|e| Error::communication("send IR batch", e))
    }

    async fn write_ir(&self, transport: &mut dyn Transport, code: Code) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        let frame = self.codec.encode_ir(code);
        trace!(protocol = self.codec.name(), frame = ?frame, "sending IR frame");
        transport.send(&frame).await?;

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(Error::Cancelled),
            _ = tokio::time::sleep(self.ir_settle) => Ok(()),
        }
    }

    // ---------------------------------------------------------------
    // Power
    // ---------------------------------------------------------------

    pub async fn power_status(&self) -> Result<PowerStatus> {
        PowerStatus::from_code(self.get_setting(&items::STATUS_POWER).await?)
    }

    pub async fn error_status(&self) -> Result<ErrorStatus> {
        Ok(ErrorStatus::from_code(
            self.get_setting(&items::STATUS_ERROR).await?,
        ))
    }

    /// Power status, or `None` when the query failed.
    async fn query_power_status(&self) -> Option<PowerStatus> {
        match self.power_status().await {
            Ok(status) => Some(status),
            Err(e) => {
                warn!(error = %e, "power status query failed");
                None
            }
        }
    }

    /// Turn the projector on.
    ///
    /// Fails with [`Error::NotReady`] unless the projector is in standby or
    /// its status could not be read. Models without a power command are
    /// switched on through the IR path; when the status was unknown the IR
    /// code is sent twice, unless disabled in the builder.
    pub async fn power_on(&self) -> Result<()> {
        let status = self.query_power_status().await;
        debug!(status = ?status, "power on");
        if status.is_some_and(|s| s != PowerStatus::Standby) {
            return Err(Error::NotReady("ON"));
        }

        if self.model().power_command {
            debug!("power on using the power command");
            return self.set_setting(&items::POWER, POWER_ON).await;
        }

        debug!("power on using the IR power command");
        self.send_ir(&items::IR_POWER_ON).await?;
        if status.is_none() && self.double_ir_power_on {
            self.send_ir(&items::IR_POWER_ON).await?;
        }
        Ok(())
    }

    /// Turn the projector off. Fails with [`Error::NotReady`] unless the
    /// projector is fully on.
    pub async fn power_off(&self) -> Result<()> {
        let status = self.query_power_status().await;
        debug!(status = ?status, "power off");
        if status != Some(PowerStatus::On) {
            return Err(Error::NotReady("OFF"));
        }

        if self.model().power_command {
            debug!("power off using the power command");
            self.set_setting(&items::POWER, POWER_OFF).await
        } else {
            debug!("power off using the IR power command");
            self.send_ir(&items::IR_POWER_OFF).await
        }
    }

    // ---------------------------------------------------------------
    // Typed settings
    // ---------------------------------------------------------------

    fn table(setting: Setting) -> Result<&'static CapabilityTable> {
        setting
            .table()
            .ok_or_else(|| Error::InvalidParameter(format!("{setting} has no named values")))
    }

    async fn get_numeric(&self, setting: Setting) -> Result<u16> {
        self.capabilities().require(setting)?;
        Ok(decode16(self.get_setting(setting.item()).await?))
    }

    async fn set_numeric(&self, setting: Setting, value: u16) -> Result<()> {
        self.capabilities().require(setting)?;
        if setting.is_read_only() {
            return Err(Error::InvalidParameter(format!("{setting} is read-only")));
        }
        self.set_setting(setting.item(), encode16(value)).await
    }

    async fn get_choice(&self, setting: Setting) -> Result<&'static str> {
        let category = self.capabilities().require(setting)?;
        let table = Self::table(setting)?;
        let code = self.get_setting(setting.item()).await?;
        table.resolve_name(category, &code)
    }

    async fn set_choice(&self, setting: Setting, name: &str) -> Result<()> {
        let category = self.capabilities().require(setting)?;
        let code = Self::table(setting)?.resolve_code(category, name)?;
        self.set_setting(setting.item(), code).await
    }

    async fn get_switch(&self, setting: Setting) -> Result<bool> {
        let category = self.capabilities().require(setting)?;
        match self.get_setting(setting.item()).await? {
            SWITCH_ON => Ok(true),
            SWITCH_OFF => Ok(false),
            code => Err(Error::UnknownCode {
                table: setting.name(),
                category,
                code: code.to_vec(),
            }),
        }
    }

    async fn set_switch(&self, setting: Setting, on: bool) -> Result<()> {
        self.capabilities().require(setting)?;
        let data = if on { SWITCH_ON } else { SWITCH_OFF };
        self.set_setting(setting.item(), data).await
    }

    /// Read any setting.
    pub async fn get(&self, setting: Setting) -> Result<SettingValue> {
        match setting.kind() {
            SettingKind::Numeric => self.get_numeric(setting).await.map(SettingValue::Numeric),
            SettingKind::Choice => self.get_choice(setting).await.map(SettingValue::Choice),
            SettingKind::Switch => self.get_switch(setting).await.map(SettingValue::Switch),
        }
    }

    /// Write any setting from its textual form.
    ///
    /// Numeric settings take a decimal integer in `0..=65535`, switches take
    /// `on`/`off`, and choice settings take a name valid for the model.
    pub async fn set_from_str(&self, setting: Setting, value: &str) -> Result<()> {
        match setting.kind() {
            SettingKind::Numeric => {
                let parsed: i64 = value.trim().parse().map_err(|_| {
                    Error::InvalidParameter(format!("{setting} expects a number, got {value:?}"))
                })?;
                let code = checked_encode16(parsed)?;
                self.set_numeric(setting, decode16(code)).await
            }
            SettingKind::Switch => {
                let on = match value.trim().to_ascii_lowercase().as_str() {
                    "on" | "true" | "1" => true,
                    "off" | "false" | "0" => false,
                    _ => {
                        return Err(Error::InvalidParameter(format!(
                            "{setting} expects on or off, got {value:?}"
                        )));
                    }
                };
                self.set_switch(setting, on).await
            }
            SettingKind::Choice => self.set_choice(setting, value).await,
        }
    }

    /// Names accepted by a choice setting on this model.
    pub fn available_options(&self, setting: Setting) -> Result<Vec<&'static str>> {
        self.capabilities().options(setting)
    }

    numeric_setting!(get_contrast, set_contrast, Setting::Contrast);
    numeric_setting!(get_brightness, set_brightness, Setting::Brightness);
    numeric_setting!(get_color, set_color, Setting::Color);
    numeric_setting!(get_hue, set_hue, Setting::Hue);
    numeric_setting!(get_sharpness, set_sharpness, Setting::Sharpness);
    numeric_setting!(get_iris_manual, set_iris_manual, Setting::IrisManual);

    /// Lamp hours. Read-only.
    pub async fn get_lamp_use_time(&self) -> Result<u16> {
        self.get_numeric(Setting::LampUseTime).await
    }

    choice_setting!(get_calibration_preset, set_calibration_preset, Setting::CalibrationPreset);
    choice_setting!(get_input, set_input, Setting::Input);
    choice_setting!(get_contrast_enhancer, set_contrast_enhancer, Setting::ContrastEnhancer);
    choice_setting!(get_film_mode, set_film_mode, Setting::FilmMode);
    choice_setting!(get_lamp_control, set_lamp_control, Setting::LampControl);
    choice_setting!(get_picture_position, set_picture_position, Setting::PicturePosition);
    choice_setting!(get_aspect, set_aspect, Setting::Aspect);
    choice_setting!(get_color_temperature, set_color_temperature, Setting::ColorTemperature);
    choice_setting!(get_iris_mode, set_iris_mode, Setting::IrisMode);
    choice_setting!(get_iris_sensitivity, set_iris_sensitivity, Setting::IrisSensitivity);
    choice_setting!(get_film_projection, set_film_projection, Setting::FilmProjection);
    choice_setting!(get_motion_enhancer, set_motion_enhancer, Setting::MotionEnhancer);
    choice_setting!(get_gamma_correction, set_gamma_correction, Setting::GammaCorrection);
    choice_setting!(get_color_space, set_color_space, Setting::ColorSpace);
    choice_setting!(get_nr, set_nr, Setting::NoiseReduction);
    choice_setting!(get_block_nr, set_block_nr, Setting::BlockNr);
    choice_setting!(get_mosquito_nr, set_mosquito_nr, Setting::MosquitoNr);
    choice_setting!(get_mpeg_nr, set_mpeg_nr, Setting::MpegNr);

    switch_setting!(get_picture_muting, set_picture_muting, Setting::PictureMuting);
    switch_setting!(get_overscan, set_overscan, Setting::Overscan);
    switch_setting!(get_xvcolor, set_xvcolor, Setting::XvColor);

    // ---------------------------------------------------------------
    // Identification and polling
    // ---------------------------------------------------------------

    /// Ask the projector for its model name. SDCP only.
    pub async fn model_name(&self) -> Result<String> {
        if self.protocol != Protocol::Sdcp {
            return Err(Error::InvalidParameter(
                "the model name can only be queried over SDCP".into(),
            ));
        }
        let payload = self.exchange(Command::Get, &items::MODEL_NAME, NO_DATA).await?;
        let name = String::from_utf8_lossy(&payload);
        Ok(name.trim_end_matches(['\0', ' ']).to_string())
    }

    /// Ask for the model name and switch to the matching model row.
    ///
    /// The current model is kept when the query fails or the name is not
    /// in the table.
    pub(crate) async fn detect_model(&self) {
        let current = self.model();
        match self.model_name().await {
            Ok(name) => match ProjectorModel::from_name(&name, false) {
                Ok(model) if model.name == current.name => {
                    trace!(model = model.name, "model unchanged");
                }
                Ok(model) => {
                    info!(model = model.name, reported = %name, "detected projector model");
                    *self.profile.write().unwrap_or_else(PoisonError::into_inner) =
                        Profile::new(*model);
                }
                Err(_) => {
                    info!(reported = %name, model = current.name, "unknown model name, keeping current model");
                }
            },
            Err(e) => debug!(error = %e, "model detection failed, keeping current model"),
        }
    }

    /// Poll the projector and return a snapshot.
    ///
    /// The link is opened once for the whole poll. The transport lock is
    /// taken per read, so other callers' commands may run between reads.
    /// A session opened with [`open_session`](Self::open_session) while the
    /// poll runs is left open.
    ///
    /// When auto-detection is enabled the model is detected again first.
    /// Power and error status are always read; the model's settings are
    /// read only while the projector is on. A failed read leaves its field
    /// empty and does not stop the poll. Only a failure to open the link
    /// fails the call.
    pub async fn refresh(&self) -> Result<ProjectorState> {
        let opened_here = {
            let mut transport = self.transport.lock().await;
            Self::ensure_open(&mut transport).await?
        };

        if self.auto_detect_model {
            self.detect_model().await;
        }

        let mut state = ProjectorState {
            power: self.query_power_status().await,
            ..Default::default()
        };
        state.error = match self.error_status().await {
            Ok(error) => Some(error),
            Err(e) => {
                debug!(error = %e, "error status query failed");
                None
            }
        };

        let is_on = state.is_on();
        let capabilities = self.capabilities();
        for setting in capabilities.available() {
            let value = if is_on {
                match self.get(setting).await {
                    Ok(value) => Some(value),
                    Err(e) => {
                        debug!(setting = %setting, error = %e, "refresh read failed");
                        None
                    }
                }
            } else {
                None
            };
            state.settings.push((setting, value));
        }

        if opened_here {
            self.finish_poll().await?;
        }
        Ok(state)
    }

    /// Close the link a poll opened, unless a caller has since claimed it
    /// with `open_session`.
    async fn finish_poll(&self) -> Result<()> {
        let mut transport = self.transport.lock().await;
        if self.session_held.load(Ordering::SeqCst) {
            debug!("session opened during refresh, leaving link open");
            return Ok(());
        }
        transport
            .close()
            .await
            .map_err(|e| Error::communication("close session", e))
    }
}
