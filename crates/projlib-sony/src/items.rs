//! Command catalog: every control point the projector understands.
//!
//! An [`Item`] names one control point and carries up to two codes:
//!
//! - a *data code*, used for acknowledged get/set exchanges
//! - an *IR code*, used to emulate a button on the infrared remote
//!
//! Items whose values are symbolic (aspect, input, ...) also reference the
//! [`CapabilityTable`] that translates names to codes.
//!
//! # IR codes
//!
//! Remote-control codes belong to one of three command families,
//! identified by the first byte: `0x17`, `0x19`, or `0x1B`. Use
//! [`Item::has_valid_ir_code`] to filter items for an IR menu.

use std::fmt;

use projlib_core::Code;
use projlib_core::capability::CapabilityTable;

use crate::tables;

/// First bytes of the three remote-control command families.
pub const IR_FAMILIES: [u8; 3] = [0x17, 0x19, 0x1B];

/// One named control point.
#[derive(Clone, Copy)]
pub struct Item {
    /// Stable identifier, e.g. `"ASPECT"` or `"IR_MENU"`.
    pub id: &'static str,
    /// Human-readable name for menus and logs.
    pub display_name: &'static str,
    /// Code for the get/set protocol.
    pub data_code: Option<Code>,
    /// Code for infrared remote emulation.
    pub ir_code: Option<Code>,
    /// Table used to resolve this item's value, if it is symbolic.
    pub table: Option<&'static CapabilityTable>,
}

impl Item {
    const fn data(id: &'static str, display_name: &'static str, code: Code) -> Self {
        Item {
            id,
            display_name,
            data_code: Some(code),
            ir_code: None,
            table: None,
        }
    }

    const fn ir(id: &'static str, display_name: &'static str, code: Code) -> Self {
        Item {
            id,
            display_name,
            data_code: None,
            ir_code: Some(code),
            table: None,
        }
    }

    const fn with_table(mut self, table: &'static CapabilityTable) -> Self {
        self.table = Some(table);
        self
    }

    /// Returns `true` if the item carries an IR code from a known family.
    pub fn has_valid_ir_code(&self) -> bool {
        self.ir_code.is_some_and(|code| is_valid_ir_code(&code))
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("id", &self.id)
            .field("data_code", &self.data_code)
            .field("ir_code", &self.ir_code)
            .field("table", &self.table.map(|t| t.name()))
            .finish()
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id)
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Item {}

/// Returns `true` if `code` starts with one of the remote-control family bytes.
pub fn is_valid_ir_code(code: &[u8]) -> bool {
    code.first().is_some_and(|b| IR_FAMILIES.contains(b))
}

// ---------------------------------------------------------------
// Settings (data codes)
// ---------------------------------------------------------------

pub const INPUT: Item = Item {
    ir_code: Some([0x17, 0x57]),
    ..Item::data("INPUT", "Input", [0x00, 0x01]).with_table(&tables::INPUT)
};
pub const CALIBRATION_PRESET: Item = Item::data("CALIBRATION_PRESET", "Calibration Preset", [0x00, 0x02])
    .with_table(&tables::CALIBRATION_PRESET);
pub const CONTRAST: Item = Item::data("CONTRAST", "Contrast", [0x00, 0x10]);
pub const BRIGHTNESS: Item = Item::data("BRIGHTNESS", "Brightness", [0x00, 0x11]);
pub const COLOR: Item = Item::data("COLOR", "Color", [0x00, 0x12]);
pub const HUE: Item = Item::data("HUE", "Hue", [0x00, 0x13]);
pub const SHARPNESS: Item = Item::data("SHARPNESS", "Sharpness", [0x00, 0x14]);
pub const COLOR_TEMP: Item =
    Item::data("COLOR_TEMP", "Color Temperature", [0x00, 0x17]).with_table(&tables::COLOR_TEMPERATURE);
pub const LAMP_CONTROL: Item =
    Item::data("LAMP_CONTROL", "Lamp Control", [0x00, 0x1A]).with_table(&tables::LAMP_CONTROL);
pub const CONTRAST_ENHANCER: Item = Item::data("CONTRAST_ENHANCER", "Contrast Enhancer", [0x00, 0x1C])
    .with_table(&tables::CONTRAST_ENHANCER);
pub const IRIS_MODE: Item =
    Item::data("IRIS_MODE", "Iris Mode", [0x00, 0x1D]).with_table(&tables::IRIS_MODE);
pub const IRIS_MANUAL: Item = Item::data("IRIS_MANUAL", "Iris Manual", [0x00, 0x1E]);
pub const FILM_MODE: Item =
    Item::data("FILM_MODE", "Film Mode", [0x00, 0x1F]).with_table(&tables::FILM_MODE);
pub const ASPECT: Item = Item {
    ir_code: Some([0x19, 0x6E]),
    ..Item::data("ASPECT", "Aspect", [0x00, 0x20]).with_table(&tables::ASPECT)
};
pub const GAMMA_CORRECTION: Item = Item::data("GAMMA_CORRECTION", "Gamma Correction", [0x00, 0x22])
    .with_table(&tables::GAMMA_CORRECTION);
pub const OVERSCAN: Item = Item::data("OVERSCAN", "Overscan", [0x00, 0x23]);
pub const NR: Item = Item::data("NR", "Noise Reduction", [0x00, 0x25]).with_table(&tables::NOISE_REDUCTION);
pub const BLOCK_NR: Item = Item::data("BLOCK_NR", "Block NR", [0x00, 0x26]).with_table(&tables::BLOCK_NR);
pub const MOSQUITO_NR: Item =
    Item::data("MOSQUITO_NR", "Mosquito NR", [0x00, 0x27]).with_table(&tables::MOSQUITO_NR);
pub const MPEG_NR: Item = Item::data("MPEG_NR", "MPEG NR", [0x00, 0x28]).with_table(&tables::MPEG_NR);
pub const PICTURE_MUTING: Item = Item {
    ir_code: Some([0x17, 0x24]),
    ..Item::data("PICTURE_MUTING", "Picture Muting", [0x00, 0x30])
};
pub const XVCOLOR: Item = Item::data("XVCOLOR", "xvColor", [0x00, 0x3A]);
pub const COLOR_SPACE: Item =
    Item::data("COLOR_SPACE", "Color Space", [0x00, 0x3B]).with_table(&tables::COLOR_SPACE);
pub const IRIS_SENSITIVITY: Item = Item::data("IRIS_SENSITIVITY", "Iris Sensitivity", [0x00, 0x56])
    .with_table(&tables::IRIS_SENSITIVITY);
pub const FILM_PROJECTION: Item = Item::data("FILM_PROJECTION", "Film Projection", [0x00, 0x58])
    .with_table(&tables::FILM_PROJECTION);
pub const MOTION_ENHANCER: Item = Item::data("MOTION_ENHANCER", "Motion Enhancer", [0x00, 0x59])
    .with_table(&tables::MOTION_ENHANCER);
pub const PICTURE_POSITION: Item = Item::data("PICTURE_POSITION", "Picture Position", [0x00, 0x66])
    .with_table(&tables::PICTURE_POSITION);

// ---------------------------------------------------------------
// Status and control (data codes)
// ---------------------------------------------------------------

pub const STATUS_ERROR: Item = Item::data("STATUS_ERROR", "Status Error", [0x01, 0x01]);
pub const STATUS_POWER: Item =
    Item::data("STATUS_POWER", "Status Power", [0x01, 0x02]).with_table(&tables::POWER_STATUS);
pub const LAMP_USE_TIME: Item = Item::data("LAMP_USE_TIME", "Lamp Use Time", [0x01, 0x13]);
pub const POWER: Item = Item::data("POWER", "Power", [0x01, 0x30]);
/// ASCII model name. Answered over SDCP only.
pub const MODEL_NAME: Item = Item::data("MODEL_NAME", "Model Name", [0x80, 0x01]);

// ---------------------------------------------------------------
// Remote control (IR codes)
// ---------------------------------------------------------------

pub const IR_POWER_ON: Item = Item::ir("IR_POWER_ON", "Power On", [0x17, 0x2E]);
pub const IR_POWER_OFF: Item = Item::ir("IR_POWER_OFF", "Power Off", [0x17, 0x2F]);
pub const IR_MENU: Item = Item::ir("IR_MENU", "Menu", [0x17, 0x29]);
pub const IR_UP: Item = Item::ir("IR_UP", "Cursor Up", [0x17, 0x35]);
pub const IR_DOWN: Item = Item::ir("IR_DOWN", "Cursor Down", [0x17, 0x36]);
pub const IR_LEFT: Item = Item::ir("IR_LEFT", "Cursor Left", [0x17, 0x34]);
pub const IR_RIGHT: Item = Item::ir("IR_RIGHT", "Cursor Right", [0x17, 0x33]);
pub const IR_ENTER: Item = Item::ir("IR_ENTER", "Enter", [0x17, 0x5A]);
pub const IR_RESET: Item = Item::ir("IR_RESET", "Reset", [0x17, 0x7B]);
pub const IR_INPUT: Item = Item::ir("IR_INPUT", "Input", [0x17, 0x57]);
pub const IR_PICTURE_MODE: Item = Item::ir("IR_PICTURE_MODE", "Picture Mode", [0x19, 0x5B]);
pub const IR_ASPECT: Item = Item::ir("IR_ASPECT", "Aspect", [0x19, 0x6E]);
pub const IR_PICTURE_MUTING: Item = Item::ir("IR_PICTURE_MUTING", "Picture Muting", [0x17, 0x24]);
pub const IR_LENS: Item = Item::ir("IR_LENS", "Lens", [0x19, 0x78]);
pub const IR_LENS_SHIFT_UP: Item = Item::ir("IR_LENS_SHIFT_UP", "Lens Shift Up", [0x19, 0x72]);
pub const IR_LENS_SHIFT_DOWN: Item = Item::ir("IR_LENS_SHIFT_DOWN", "Lens Shift Down", [0x19, 0x73]);
pub const IR_LENS_SHIFT_LEFT: Item = Item::ir("IR_LENS_SHIFT_LEFT", "Lens Shift Left", [0x19, 0x74]);
pub const IR_LENS_SHIFT_RIGHT: Item = Item::ir("IR_LENS_SHIFT_RIGHT", "Lens Shift Right", [0x19, 0x75]);
pub const IR_LENS_FOCUS_FAR: Item = Item::ir("IR_LENS_FOCUS_FAR", "Lens Focus Far", [0x19, 0x64]);
pub const IR_LENS_FOCUS_NEAR: Item = Item::ir("IR_LENS_FOCUS_NEAR", "Lens Focus Near", [0x19, 0x65]);
pub const IR_LENS_ZOOM_LARGE: Item = Item::ir("IR_LENS_ZOOM_LARGE", "Lens Zoom Large", [0x19, 0x77]);
pub const IR_LENS_ZOOM_SMALL: Item = Item::ir("IR_LENS_ZOOM_SMALL", "Lens Zoom Small", [0x19, 0x7A]);
pub const IR_MOTION_ENHANCER: Item = Item::ir("IR_MOTION_ENHANCER", "Motion Enhancer", [0x1B, 0x5D]);
pub const IR_REALITY_CREATION: Item = Item::ir("IR_REALITY_CREATION", "Reality Creation", [0x1B, 0x20]);
pub const IR_CONTRAST_ENHANCER: Item = Item::ir("IR_CONTRAST_ENHANCER", "Contrast Enhancer", [0x1B, 0x1C]);
pub const IR_COLOR_TEMP: Item = Item::ir("IR_COLOR_TEMP", "Color Temperature", [0x19, 0x5C]);
pub const IR_GAMMA_CORRECTION: Item = Item::ir("IR_GAMMA_CORRECTION", "Gamma Correction", [0x19, 0x44]);
pub const IR_COLOR_SPACE: Item = Item::ir("IR_COLOR_SPACE", "Color Space", [0x1B, 0x4B]);
pub const IR_ADVANCED_IRIS: Item = Item::ir("IR_ADVANCED_IRIS", "Advanced Iris", [0x19, 0x5D]);
pub const IR_FILM_PROJECTION: Item = Item::ir("IR_FILM_PROJECTION", "Film Projection", [0x1B, 0x27]);
pub const IR_CINEMA_BLACK_PRO: Item = Item::ir("IR_CINEMA_BLACK_PRO", "Cinema Black Pro", [0x1B, 0x18]);
pub const IR_3D: Item = Item::ir("IR_3D", "3D", [0x1B, 0x3B]);
pub const IR_HDR: Item = Item::ir("IR_HDR", "HDR", [0x1B, 0x6C]);
pub const IR_HDMI1: Item = Item::ir("IR_HDMI1", "HDMI 1", [0x1B, 0x4D]);
pub const IR_HDMI2: Item = Item::ir("IR_HDMI2", "HDMI 2", [0x1B, 0x4E]);

/// Every item in the catalog.
pub static ALL_ITEMS: &[Item] = &[
    INPUT,
    CALIBRATION_PRESET,
    CONTRAST,
    BRIGHTNESS,
    COLOR,
    HUE,
    SHARPNESS,
    COLOR_TEMP,
    LAMP_CONTROL,
    CONTRAST_ENHANCER,
    IRIS_MODE,
    IRIS_MANUAL,
    FILM_MODE,
    ASPECT,
    GAMMA_CORRECTION,
    OVERSCAN,
    NR,
    BLOCK_NR,
    MOSQUITO_NR,
    MPEG_NR,
    PICTURE_MUTING,
    XVCOLOR,
    COLOR_SPACE,
    IRIS_SENSITIVITY,
    FILM_PROJECTION,
    MOTION_ENHANCER,
    PICTURE_POSITION,
    STATUS_ERROR,
    STATUS_POWER,
    LAMP_USE_TIME,
    POWER,
    MODEL_NAME,
    IR_POWER_ON,
    IR_POWER_OFF,
    IR_MENU,
    IR_UP,
    IR_DOWN,
    IR_LEFT,
    IR_RIGHT,
    IR_ENTER,
    IR_RESET,
    IR_INPUT,
    IR_PICTURE_MODE,
    IR_ASPECT,
    IR_PICTURE_MUTING,
    IR_LENS,
    IR_LENS_SHIFT_UP,
    IR_LENS_SHIFT_DOWN,
    IR_LENS_SHIFT_LEFT,
    IR_LENS_SHIFT_RIGHT,
    IR_LENS_FOCUS_FAR,
    IR_LENS_FOCUS_NEAR,
    IR_LENS_ZOOM_LARGE,
    IR_LENS_ZOOM_SMALL,
    IR_MOTION_ENHANCER,
    IR_REALITY_CREATION,
    IR_CONTRAST_ENHANCER,
    IR_COLOR_TEMP,
    IR_GAMMA_CORRECTION,
    IR_COLOR_SPACE,
    IR_ADVANCED_IRIS,
    IR_FILM_PROJECTION,
    IR_CINEMA_BLACK_PRO,
    IR_3D,
    IR_HDR,
    IR_HDMI1,
    IR_HDMI2,
];

/// Look up an item by its identifier (case-insensitive).
pub fn find(id: &str) -> Option<&'static Item> {
    ALL_ITEMS.iter().find(|item| item.id.eq_ignore_ascii_case(id))
}

/// Items that can be sent as remote-control commands.
///
/// Only items whose IR code belongs to a known command family are listed.
pub fn ir_commands() -> impl Iterator<Item = &'static Item> {
    ALL_ITEMS
        .iter()
        .filter(|item| item.data_code.is_none() && item.has_valid_ir_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_item_has_a_code() {
        for item in ALL_ITEMS {
            assert!(
                item.data_code.is_some() || item.ir_code.is_some(),
                "{} has neither a data code nor an IR code",
                item.id
            );
        }
    }

    #[test]
    fn ids_and_data_codes_are_unique() {
        let mut ids = HashSet::new();
        let mut codes = HashSet::new();
        for item in ALL_ITEMS {
            assert!(ids.insert(item.id), "duplicate id {}", item.id);
            if let Some(code) = item.data_code {
                assert!(codes.insert(code), "duplicate data code on {}", item.id);
            }
        }
    }

    #[test]
    fn ir_validity_predicate() {
        assert!(is_valid_ir_code(&[0x17, 0x2E]));
        assert!(is_valid_ir_code(&[0x19, 0x00]));
        assert!(is_valid_ir_code(&[0x1B, 0xFF]));
        assert!(!is_valid_ir_code(&[0x18, 0x2E]));
        assert!(!is_valid_ir_code(&[0x00, 0x20]));
        assert!(!is_valid_ir_code(&[]));
    }

    #[test]
    fn ir_commands_lists_only_remote_items() {
        let ids: Vec<&str> = ir_commands().map(|i| i.id).collect();
        assert!(ids.contains(&"IR_POWER_ON"));
        assert!(ids.contains(&"IR_HDR"));
        assert!(!ids.contains(&"CONTRAST"));
        // Items with both codes are driven through the data protocol.
        assert!(!ids.contains(&"ASPECT"));
        assert!(ir_commands().all(|i| i.has_valid_ir_code()));
    }

    #[test]
    fn dual_code_items() {
        assert_eq!(ASPECT.data_code, Some([0x00, 0x20]));
        assert_eq!(ASPECT.ir_code, Some([0x19, 0x6E]));
        assert!(ASPECT.table.is_some());
        assert!(PICTURE_MUTING.has_valid_ir_code());
    }

    #[test]
    fn find_is_case_insensitive() {
        assert_eq!(find("ir_menu"), Some(&IR_MENU));
        assert_eq!(find("Aspect").map(|i| i.data_code), Some(Some([0x00, 0x20])));
        assert!(find("NOPE").is_none());
    }

    #[test]
    fn symbolic_items_reference_tables() {
        assert_eq!(ASPECT.table.map(|t| t.name()), Some("aspect"));
        assert!(CONTRAST.table.is_none());
        assert!(IR_MENU.table.is_none());
    }
}
