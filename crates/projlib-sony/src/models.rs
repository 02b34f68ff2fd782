//! Sony projector model definitions.
//!
//! Each supported projector is described by a [`ProjectorModel`] row that
//! records whether it has a direct power command and, for every
//! table-backed setting, which category of the capability table applies.
//! A category of `0` (or `false` for settings that have a single encoding)
//! means the setting does not exist on that model.
//!
//! The per-setting categories are independent: two models that share an
//! aspect category may still disagree on color temperature.
//!
//! [`ProjectorModel::capabilities`] flattens a row into a [`Capabilities`]
//! set that the connector consults before every accessor.

use std::fmt;
use std::str::FromStr;

use projlib_core::capability::CapabilityTable;
use projlib_core::error::{Error, Result};

use crate::items::{self, Item};
use crate::tables::COMMON;

/// A user-facing projector setting.
///
/// Every setting is backed by one catalog [`Item`]. Settings whose values
/// are names also carry a [`CapabilityTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    CalibrationPreset,
    Input,
    Contrast,
    Brightness,
    Color,
    Hue,
    Sharpness,
    ContrastEnhancer,
    FilmMode,
    LampUseTime,
    LampControl,
    PictureMuting,
    PicturePosition,
    Overscan,
    Aspect,
    ColorTemperature,
    IrisMode,
    IrisManual,
    IrisSensitivity,
    FilmProjection,
    MotionEnhancer,
    GammaCorrection,
    ColorSpace,
    NoiseReduction,
    BlockNr,
    MosquitoNr,
    MpegNr,
    XvColor,
}

/// How a setting's two-byte payload is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    /// Big-endian unsigned integer.
    Numeric,
    /// A name resolved through a capability table.
    Choice,
    /// `00 01` for on, `00 00` for off.
    Switch,
}

impl Setting {
    pub const COUNT: usize = 28;

    /// All settings, in the order they are polled by a refresh.
    pub const ALL: [Setting; Setting::COUNT] = [
        Setting::CalibrationPreset,
        Setting::Input,
        Setting::Contrast,
        Setting::Brightness,
        Setting::Color,
        Setting::Hue,
        Setting::Sharpness,
        Setting::ContrastEnhancer,
        Setting::FilmMode,
        Setting::LampUseTime,
        Setting::LampControl,
        Setting::PictureMuting,
        Setting::PicturePosition,
        Setting::Overscan,
        Setting::Aspect,
        Setting::ColorTemperature,
        Setting::IrisMode,
        Setting::IrisManual,
        Setting::IrisSensitivity,
        Setting::FilmProjection,
        Setting::MotionEnhancer,
        Setting::GammaCorrection,
        Setting::ColorSpace,
        Setting::NoiseReduction,
        Setting::BlockNr,
        Setting::MosquitoNr,
        Setting::MpegNr,
        Setting::XvColor,
    ];

    /// Lowercase name used in errors, logs and the command line.
    pub fn name(self) -> &'static str {
        match self {
            Setting::CalibrationPreset => "calibration preset",
            Setting::Input => "input",
            Setting::Contrast => "contrast",
            Setting::Brightness => "brightness",
            Setting::Color => "color",
            Setting::Hue => "hue",
            Setting::Sharpness => "sharpness",
            Setting::ContrastEnhancer => "contrast enhancer",
            Setting::FilmMode => "film mode",
            Setting::LampUseTime => "lamp use time",
            Setting::LampControl => "lamp control",
            Setting::PictureMuting => "picture muting",
            Setting::PicturePosition => "picture position",
            Setting::Overscan => "overscan",
            Setting::Aspect => "aspect",
            Setting::ColorTemperature => "color temperature",
            Setting::IrisMode => "iris mode",
            Setting::IrisManual => "iris manual",
            Setting::IrisSensitivity => "iris sensitivity",
            Setting::FilmProjection => "film projection",
            Setting::MotionEnhancer => "motion enhancer",
            Setting::GammaCorrection => "gamma correction",
            Setting::ColorSpace => "color space",
            Setting::NoiseReduction => "noise reduction",
            Setting::BlockNr => "block nr",
            Setting::MosquitoNr => "mosquito nr",
            Setting::MpegNr => "mpeg nr",
            Setting::XvColor => "xvcolor",
        }
    }

    /// The catalog item used to read and write this setting.
    pub fn item(self) -> &'static Item {
        match self {
            Setting::CalibrationPreset => &items::CALIBRATION_PRESET,
            Setting::Input => &items::INPUT,
            Setting::Contrast => &items::CONTRAST,
            Setting::Brightness => &items::BRIGHTNESS,
            Setting::Color => &items::COLOR,
            Setting::Hue => &items::HUE,
            Setting::Sharpness => &items::SHARPNESS,
            Setting::ContrastEnhancer => &items::CONTRAST_ENHANCER,
            Setting::FilmMode => &items::FILM_MODE,
            Setting::LampUseTime => &items::LAMP_USE_TIME,
            Setting::LampControl => &items::LAMP_CONTROL,
            Setting::PictureMuting => &items::PICTURE_MUTING,
            Setting::PicturePosition => &items::PICTURE_POSITION,
            Setting::Overscan => &items::OVERSCAN,
            Setting::Aspect => &items::ASPECT,
            Setting::ColorTemperature => &items::COLOR_TEMP,
            Setting::IrisMode => &items::IRIS_MODE,
            Setting::IrisManual => &items::IRIS_MANUAL,
            Setting::IrisSensitivity => &items::IRIS_SENSITIVITY,
            Setting::FilmProjection => &items::FILM_PROJECTION,
            Setting::MotionEnhancer => &items::MOTION_ENHANCER,
            Setting::GammaCorrection => &items::GAMMA_CORRECTION,
            Setting::ColorSpace => &items::COLOR_SPACE,
            Setting::NoiseReduction => &items::NR,
            Setting::BlockNr => &items::BLOCK_NR,
            Setting::MosquitoNr => &items::MOSQUITO_NR,
            Setting::MpegNr => &items::MPEG_NR,
            Setting::XvColor => &items::XVCOLOR,
        }
    }

    /// The capability table for choice settings.
    pub fn table(self) -> Option<&'static CapabilityTable> {
        self.item().table
    }

    pub fn kind(self) -> SettingKind {
        match self {
            Setting::Contrast
            | Setting::Brightness
            | Setting::Color
            | Setting::Hue
            | Setting::Sharpness
            | Setting::LampUseTime
            | Setting::IrisManual => SettingKind::Numeric,
            Setting::PictureMuting | Setting::Overscan | Setting::XvColor => SettingKind::Switch,
            _ => SettingKind::Choice,
        }
    }

    /// Whether the setting can only be read.
    pub fn is_read_only(self) -> bool {
        self == Setting::LampUseTime
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Setting {
    type Err = Error;

    /// Parse a setting name. Case, `-` and `_` are ignored, so
    /// `"color-temperature"`, `"COLOR_TEMPERATURE"` and
    /// `"color temperature"` are equivalent.
    fn from_str(s: &str) -> Result<Self> {
        let wanted: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        Setting::ALL
            .into_iter()
            .find(|setting| setting.name().replace(' ', "") == wanted)
            .ok_or_else(|| Error::InvalidParameter(format!("unknown setting {s:?}")))
    }
}

/// Static description of one projector model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectorModel {
    /// Model name as reported by the projector (e.g. "VPL-VW520").
    pub name: &'static str,
    /// Whether the `POWER` data command exists. Models without it are
    /// powered through the IR path.
    pub power_command: bool,
    pub calibration_preset: u8,
    pub input: u8,
    pub contrast_enhancer: u8,
    pub film_mode: u8,
    pub lamp_control: bool,
    pub picture_position: u8,
    pub overscan: bool,
    pub aspect: u8,
    pub color_temperature: u8,
    pub iris_mode: u8,
    pub iris_manual: bool,
    pub iris_sensitivity: bool,
    pub gamma_correction: u8,
    pub noise_reduction: u8,
    pub block_nr: bool,
    pub mosquito_nr: bool,
    pub mpeg_nr: u8,
    pub xvcolor: bool,
    pub color_space: u8,
    pub film_projection: u8,
    pub motion_enhancer: u8,
}

#[allow(clippy::too_many_arguments)]
const fn row(
    name: &'static str,
    power_command: bool,
    calibration_preset: u8,
    input: u8,
    contrast_enhancer: u8,
    film_mode: u8,
    lamp_control: bool,
    picture_position: u8,
    overscan: bool,
    aspect: u8,
    color_temperature: u8,
    iris_mode: u8,
    iris_manual: bool,
    iris_sensitivity: bool,
    gamma_correction: u8,
    noise_reduction: u8,
    block_nr: bool,
    mosquito_nr: bool,
    mpeg_nr: u8,
    xvcolor: bool,
    color_space: u8,
    film_projection: u8,
    motion_enhancer: u8,
) -> ProjectorModel {
    ProjectorModel {
        name,
        power_command,
        calibration_preset,
        input,
        contrast_enhancer,
        film_mode,
        lamp_control,
        picture_position,
        overscan,
        aspect,
        color_temperature,
        iris_mode,
        iris_manual,
        iris_sensitivity,
        gamma_correction,
        noise_reduction,
        block_nr,
        mosquito_nr,
        mpeg_nr,
        xvcolor,
        color_space,
        film_projection,
        motion_enhancer,
    }
}

const fn flag(available: bool) -> u8 {
    if available { COMMON } else { 0 }
}

impl ProjectorModel {
    /// Category of a setting for this model; `0` when unavailable.
    ///
    /// Numeric settings other than iris manual and picture muting exist on
    /// every model and report [`COMMON`].
    pub fn category(&self, setting: Setting) -> u8 {
        match setting {
            Setting::CalibrationPreset => self.calibration_preset,
            Setting::Input => self.input,
            Setting::ContrastEnhancer => self.contrast_enhancer,
            Setting::FilmMode => self.film_mode,
            Setting::LampControl => flag(self.lamp_control),
            Setting::PicturePosition => self.picture_position,
            Setting::Overscan => flag(self.overscan),
            Setting::Aspect => self.aspect,
            Setting::ColorTemperature => self.color_temperature,
            Setting::IrisMode => self.iris_mode,
            Setting::IrisManual => flag(self.iris_manual),
            Setting::IrisSensitivity => flag(self.iris_sensitivity),
            Setting::GammaCorrection => self.gamma_correction,
            Setting::NoiseReduction => self.noise_reduction,
            Setting::BlockNr => flag(self.block_nr),
            Setting::MosquitoNr => flag(self.mosquito_nr),
            Setting::MpegNr => self.mpeg_nr,
            Setting::XvColor => flag(self.xvcolor),
            Setting::ColorSpace => self.color_space,
            Setting::FilmProjection => self.film_projection,
            Setting::MotionEnhancer => self.motion_enhancer,
            Setting::Contrast
            | Setting::Brightness
            | Setting::Color
            | Setting::Hue
            | Setting::Sharpness
            | Setting::LampUseTime
            | Setting::PictureMuting => COMMON,
        }
    }

    /// Resolve availability and category for every setting.
    pub fn capabilities(&self) -> Capabilities {
        let mut categories = [0u8; Setting::COUNT];
        for setting in Setting::ALL {
            categories[setting as usize] = self.category(setting);
        }
        Capabilities {
            model: self.name,
            categories,
        }
    }

    /// Look up a model by name.
    ///
    /// A strict lookup requires an exact match. A loose lookup ignores any
    /// letters after the last digit, so `"VPL-VW520ES"` finds `"VPL-VW520"`
    /// and `"VPL-VW295"` finds `"VPL-VW295ES"`.
    pub fn from_name(name: &str, strict: bool) -> Result<&'static ProjectorModel> {
        let loose = loose_name(name);
        ALL_MODELS
            .iter()
            .find(|model| {
                if strict {
                    model.name == name
                } else {
                    loose_name(model.name) == loose
                }
            })
            .ok_or_else(|| Error::InvalidParameter(format!("unknown projector model {name:?}")))
    }
}

impl Default for ProjectorModel {
    fn default() -> Self {
        VW520
    }
}

impl fmt::Display for ProjectorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

fn loose_name(name: &str) -> &str {
    match name.rfind(|c: char| c.is_ascii_digit()) {
        Some(pos) => &name[..=pos],
        None => name,
    }
}

/// Availability and category of every setting for one model.
///
/// Built once per connector from the model row, then consulted by every
/// accessor before any I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities {
    model: &'static str,
    categories: [u8; Setting::COUNT],
}

impl Capabilities {
    pub fn model(&self) -> &'static str {
        self.model
    }

    /// Category of `setting`; `0` when unavailable.
    pub fn category(&self, setting: Setting) -> u8 {
        self.categories[setting as usize]
    }

    pub fn is_available(&self, setting: Setting) -> bool {
        self.category(setting) != 0
    }

    /// Category of `setting`, or [`Error::UnsupportedForModel`].
    pub fn require(&self, setting: Setting) -> Result<u8> {
        match self.category(setting) {
            0 => Err(Error::UnsupportedForModel {
                setting: setting.name(),
                model: self.model,
            }),
            category => Ok(category),
        }
    }

    /// Settings available on this model, in [`Setting::ALL`] order.
    pub fn available(&self) -> impl Iterator<Item = Setting> + '_ {
        Setting::ALL
            .into_iter()
            .filter(|setting| self.is_available(*setting))
    }

    /// Names accepted by a choice setting on this model.
    ///
    /// Empty for numeric and switch settings.
    pub fn options(&self, setting: Setting) -> Result<Vec<&'static str>> {
        let category = self.require(setting)?;
        Ok(setting
            .table()
            .map(|table| table.list_names(category))
            .unwrap_or_default())
    }
}

// ---------------------------------------------------------------
// Model rows
// ---------------------------------------------------------------
//
// Columns: name, power command, calibration preset, input, contrast
// enhancer, film mode, lamp control, picture position, overscan, aspect,
// color temperature, iris mode, iris manual, iris sensitivity, gamma
// correction, NR, block NR, mosquito NR, MPEG NR, xvColor, color space,
// film projection, motion enhancer.

pub const HW10: ProjectorModel = row("VPL-HW10", false, 2, 2, 2, 1, true, 0, true, 2, 3, 3, true, true, 2, 2, true, true, 0, true, 3, 0, 0);
pub const HW15: ProjectorModel = row("VPL-HW15", false, 2, 2, 2, 1, true, 0, true, 2, 3, 3, true, true, 3, 2, true, true, 0, true, 3, 0, 0);
pub const HW20: ProjectorModel = row("VPL-HW20", false, 2, 2, 2, 1, true, 0, true, 2, 3, 3, true, true, 3, 2, true, true, 0, true, 3, 0, 0);
pub const HW30ES: ProjectorModel = row("VPL-HW30ES", false, 4, 3, 3, 2, true, 0, true, 2, 4, 3, true, true, 4, 2, true, true, 0, true, 4, 0, 0);
pub const HW35ES: ProjectorModel = row("VPL-HW35ES", false, 1, 3, 1, 2, true, 0, true, 5, 6, 0, false, false, 6, 2, false, false, 2, true, 6, 3, 2);
pub const HW40ES: ProjectorModel = row("VPL-HW40ES", false, 1, 3, 1, 2, true, 0, true, 5, 6, 0, false, false, 6, 2, false, false, 2, true, 6, 3, 2);
pub const HW45ES: ProjectorModel = row("VPL-HW45ES", false, 1, 1, 1, 1, true, 0, false, 6, 6, 0, false, false, 6, 2, false, false, 2, true, 6, 0, 1);
pub const HW50ES: ProjectorModel = row("VPL-HW50ES", false, 1, 3, 1, 2, true, 0, true, 5, 7, 5, true, false, 1, 2, false, false, 2, true, 6, 3, 2);
pub const HW55ES: ProjectorModel = row("VPL-HW55ES", false, 1, 3, 1, 2, true, 0, true, 5, 7, 5, true, false, 1, 2, false, false, 2, true, 6, 3, 2);
pub const HW58ES: ProjectorModel = row("VPL-HW58ES", false, 1, 3, 1, 2, true, 0, true, 5, 6, 0, false, false, 6, 2, false, false, 2, true, 6, 3, 2);
pub const HW60: ProjectorModel = row("VPL-HW60", true, 1, 1, 1, 1, true, 0, false, 6, 1, 1, true, false, 1, 1, false, false, 1, true, 1, 0, 1);
pub const HW65: ProjectorModel = row("VPL-HW65", true, 1, 1, 1, 1, true, 0, false, 6, 1, 1, true, false, 1, 1, false, false, 1, true, 1, 0, 1);
pub const HW68: ProjectorModel = row("VPL-HW68", true, 1, 1, 1, 1, true, 0, false, 6, 1, 1, true, false, 1, 1, false, false, 1, true, 1, 0, 1);

pub const VW40: ProjectorModel = row("VPL-VW40", false, 2, 2, 2, 0, true, 0, true, 2, 2, 2, true, true, 2, 2, false, false, 0, false, 3, 0, 0);
pub const VW50: ProjectorModel = row("VPL-VW50", false, 2, 2, 2, 0, true, 0, true, 2, 2, 2, true, true, 2, 2, false, false, 0, false, 3, 0, 0);
pub const VW60: ProjectorModel = row("VPL-VW60", false, 2, 2, 2, 0, true, 0, true, 3, 2, 2, true, true, 2, 2, false, false, 0, false, 3, 0, 0);
pub const VW70: ProjectorModel = row("VPL-VW70", false, 2, 2, 2, 1, true, 0, true, 3, 3, 3, true, true, 3, 2, true, true, 0, true, 3, 0, 0);
pub const VW80: ProjectorModel = row("VPL-VW80", false, 2, 2, 2, 2, true, 0, true, 3, 3, 3, true, true, 3, 2, true, true, 0, true, 3, 1, 2);
pub const VW85: ProjectorModel = row("VPL-VW85", false, 3, 2, 3, 2, true, 0, true, 3, 4, 3, true, true, 5, 2, true, true, 0, true, 4, 1, 2);
pub const VW90ES: ProjectorModel = row("VPL-VW90ES", false, 3, 5, 3, 2, true, 0, true, 3, 4, 3, true, true, 5, 2, true, true, 0, true, 4, 2, 2);
pub const VW95ES: ProjectorModel = row("VPL-VW95ES", false, 4, 3, 3, 2, true, 2, true, 3, 4, 3, true, true, 5, 2, true, true, 0, true, 4, 2, 2);
pub const VW100: ProjectorModel = row("VPL-VW100", false, 2, 4, 2, 3, false, 0, true, 4, 2, 4, false, false, 2, 2, false, false, 0, false, 3, 0, 0);
pub const VW200: ProjectorModel = row("VPL-VW200", false, 2, 2, 2, 2, false, 0, true, 3, 2, 3, true, true, 2, 2, false, false, 0, true, 3, 1, 2);
pub const VW260: ProjectorModel = row("VPL-VW260ES", true, 1, 1, 1, 1, true, 0, false, 1, 1, 0, false, false, 1, 1, false, false, 1, true, 2, 0, 1);
pub const VW270: ProjectorModel = row("VPL-VW270ES", true, 1, 1, 1, 1, true, 0, false, 1, 1, 0, false, false, 1, 1, false, false, 1, true, 2, 0, 3);
pub const VW285: ProjectorModel = row("VPL-VW285ES", true, 1, 1, 1, 1, true, 0, false, 1, 1, 0, false, false, 1, 1, false, false, 1, true, 2, 0, 1);
pub const VW295: ProjectorModel = row("VPL-VW295ES", true, 1, 1, 1, 1, true, 0, false, 1, 1, 0, false, false, 1, 1, false, false, 1, true, 2, 0, 3);
pub const VW300: ProjectorModel = row("VPL-VW300ES", true, 1, 1, 1, 1, true, 0, false, 1, 1, 0, false, false, 1, 1, false, false, 1, true, 1, 0, 1);
pub const VW315: ProjectorModel = row("VPL-VW315", true, 1, 1, 1, 1, true, 0, false, 1, 1, 0, false, false, 1, 1, false, false, 1, true, 1, 0, 1);
pub const VW320: ProjectorModel = row("VPL-VW320", true, 1, 1, 1, 1, true, 0, false, 1, 1, 0, false, false, 1, 1, false, false, 1, true, 1, 0, 1);
pub const VW328: ProjectorModel = row("VPL-VW328", true, 1, 1, 1, 1, true, 0, false, 1, 1, 0, false, false, 1, 1, false, false, 1, true, 1, 0, 1);
pub const VW350: ProjectorModel = row("VPL-VW350ES", true, 1, 1, 1, 1, true, 0, false, 1, 1, 0, false, false, 1, 1, false, false, 1, true, 1, 0, 1);
pub const VW365: ProjectorModel = row("VPL-VW365", true, 1, 1, 1, 1, true, 0, false, 1, 1, 0, false, false, 1, 1, false, false, 1, true, 1, 0, 1);
pub const VW385: ProjectorModel = row("VPL-VW385ES", true, 1, 1, 1, 1, true, 1, false, 1, 1, 1, true, false, 1, 1, false, false, 1, true, 2, 0, 1);
pub const VW500: ProjectorModel = row("VPL-VW500ES", true, 1, 1, 1, 1, true, 1, false, 1, 1, 1, true, false, 1, 1, false, false, 1, true, 1, 0, 1);
pub const VW515: ProjectorModel = row("VPL-VW515", true, 1, 1, 1, 1, true, 1, false, 1, 1, 1, true, false, 1, 1, false, false, 1, true, 2, 0, 1);
pub const VW520: ProjectorModel = row("VPL-VW520", true, 1, 1, 1, 1, true, 1, false, 1, 1, 1, true, false, 1, 1, false, false, 1, true, 2, 0, 1);
pub const VW528: ProjectorModel = row("VPL-VW528", true, 1, 1, 1, 1, true, 1, false, 1, 1, 1, true, false, 1, 1, false, false, 1, true, 2, 0, 1);
pub const VW550: ProjectorModel = row("VPL-VW550ES", true, 1, 1, 1, 1, true, 1, false, 1, 1, 1, true, false, 1, 1, false, false, 1, true, 1, 0, 1);
pub const VW570: ProjectorModel = row("VPL-VW570ES", true, 1, 1, 1, 1, true, 1, false, 1, 1, 1, true, false, 1, 1, false, false, 1, true, 2, 0, 1);
pub const VW600: ProjectorModel = row("VPL-VW600ES", true, 1, 1, 1, 1, true, 1, false, 1, 1, 1, true, false, 1, 1, false, false, 1, true, 1, 0, 1);
pub const VW665: ProjectorModel = row("VPL-VW665", true, 1, 1, 1, 1, true, 1, false, 1, 1, 1, true, false, 1, 1, false, false, 1, true, 2, 0, 1);
pub const VW675: ProjectorModel = row("VPL-VW675ES", true, 1, 1, 1, 1, true, 1, false, 1, 1, 1, true, false, 1, 1, false, false, 1, true, 2, 0, 1);
pub const VW695: ProjectorModel = row("VPL-VW695ES", true, 1, 1, 1, 1, true, 1, false, 1, 1, 1, true, false, 1, 1, false, false, 1, true, 2, 0, 1);
pub const VW760: ProjectorModel = row("VPL-VW760ES", true, 1, 1, 1, 1, false, 1, false, 1, 1, 1, false, false, 1, 1, false, false, 1, true, 2, 0, 1);
pub const VW870: ProjectorModel = row("VPL-VW870ES", true, 1, 1, 1, 1, false, 1, false, 1, 1, 1, false, false, 1, 1, false, false, 1, true, 2, 0, 1);
pub const VW885: ProjectorModel = row("VPL-VW885ES", true, 1, 1, 1, 1, false, 1, false, 1, 1, 1, false, false, 1, 1, false, false, 1, true, 2, 0, 1);
pub const VW995: ProjectorModel = row("VPL-VW995ES", true, 1, 1, 1, 1, false, 1, false, 1, 1, 1, false, false, 1, 1, false, false, 1, true, 2, 0, 1);
pub const VW1000ES: ProjectorModel = row("VPL-VW1000ES", false, 5, 3, 1, 2, true, 1, true, 1, 5, 5, true, false, 1, 2, false, false, 2, true, 5, 3, 2);
pub const VW1100ES: ProjectorModel = row("VPL-VW1100ES", false, 5, 3, 1, 2, true, 1, true, 1, 5, 5, true, false, 1, 2, false, false, 2, true, 5, 3, 2);

/// Every supported model, in catalog order.
pub static ALL_MODELS: &[ProjectorModel] = &[
    HW10, HW15, HW20, HW30ES, HW35ES, HW40ES, HW45ES, HW50ES, HW55ES, HW58ES, HW60, HW65, HW68,
    VW40, VW50, VW60, VW70, VW80, VW85, VW90ES, VW95ES, VW100, VW200, VW260, VW270, VW285, VW295,
    VW300, VW315, VW320, VW328, VW350, VW365, VW385, VW500, VW515, VW520, VW528, VW550, VW570,
    VW600, VW665, VW675, VW695, VW760, VW870, VW885, VW995, VW1000ES, VW1100ES,
];

/// Names of every supported model.
pub fn model_names() -> impl Iterator<Item = &'static str> {
    ALL_MODELS.iter().map(|model| model.name)
}
