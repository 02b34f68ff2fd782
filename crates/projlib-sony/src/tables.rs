//! Capability data for every table-backed projector setting.
//!
//! Each table maps `(category, name)` to the two-byte code the projector
//! uses for that value. Category numbers are assigned per setting by the
//! model catalog in [`models`](crate::models); a model's category for
//! "aspect" says nothing about its category for "gamma correction".
//!
//! Settings that are not split by hardware generation (lamp control, iris
//! sensitivity, block and mosquito NR, power status) use a single
//! category, [`COMMON`].

use projlib_core::capability::{CapabilityTable, Variant};
use projlib_core::encode16;

/// Category used by settings with one encoding across all models.
pub const COMMON: u8 = 1;

const fn v(category: u8, name: &'static str, code: u16) -> Variant {
    Variant::new(category, name, encode16(code))
}

pub static CALIBRATION_PRESET: CapabilityTable = CapabilityTable::new(
    "calibration preset",
    &[
        v(1, "Cinema Film 1", 0x0000),
        v(1, "Cinema Film 2", 0x0001),
        v(1, "Reference", 0x0002),
        v(1, "TV", 0x0003),
        v(1, "Photo", 0x0004),
        v(1, "Game", 0x0005),
        v(1, "Bright Cinema", 0x0006),
        v(1, "Bright TV", 0x0007),
        v(1, "User", 0x0008),
        v(2, "Dynamic", 0x0000),
        v(2, "Standard", 0x0001),
        v(2, "Cinema", 0x0002),
        v(2, "User 1", 0x0003),
        v(2, "User 2", 0x0004),
        v(2, "User 3", 0x0005),
        v(3, "Dynamic", 0x0000),
        v(3, "Standard", 0x0001),
        v(3, "Cinema 1", 0x0002),
        v(3, "Cinema 2", 0x0003),
        v(3, "User 1", 0x0004),
        v(3, "User 2", 0x0005),
        v(3, "User 3", 0x0006),
        v(4, "Cinema 1", 0x0000),
        v(4, "Cinema 2", 0x0001),
        v(4, "Cinema 3", 0x0002),
        v(4, "Game", 0x0005),
        v(4, "Photo", 0x0006),
        v(4, "User 1", 0x0007),
        v(4, "User 2", 0x0008),
        v(4, "User 3", 0x0009),
        v(5, "Dynamic", 0x0000),
        v(5, "Standard", 0x0001),
        v(5, "Cinema", 0x0002),
        v(5, "User 1", 0x0003),
        v(5, "User 2", 0x0004),
        v(5, "User 3", 0x0005),
        v(5, "Custom", 0x0006),
    ],
);

pub static INPUT: CapabilityTable = CapabilityTable::new(
    "input",
    &[
        v(1, "HDMI1", 0x0002),
        v(1, "HDMI2", 0x0003),
        v(2, "Video", 0x0000),
        v(2, "S-Video", 0x0001),
        v(2, "Input A", 0x0002),
        v(2, "Component", 0x0003),
        v(2, "HDMI", 0x0004),
        v(3, "Video", 0x0000),
        v(3, "S-Video", 0x0001),
        v(3, "Input A", 0x0002),
        v(3, "Component", 0x0003),
        v(3, "HDMI1", 0x0004),
        v(3, "HDMI2", 0x0005),
        v(4, "Video", 0x0000),
        v(4, "S-Video", 0x0001),
        v(4, "Input A", 0x0002),
        v(4, "Input B", 0x0003),
        v(4, "HDMI1", 0x0004),
        v(4, "HDMI2", 0x0005),
        v(5, "Video", 0x0000),
        v(5, "S-Video", 0x0001),
        v(5, "Input A", 0x0002),
        v(5, "Component", 0x0003),
        v(5, "HDMI1", 0x0004),
        v(5, "HDMI2", 0x0005),
        v(5, "Input B", 0x0006),
    ],
);

pub static CONTRAST_ENHANCER: CapabilityTable = CapabilityTable::new(
    "contrast enhancer",
    &[
        v(1, "Off", 0x0000),
        v(1, "Low", 0x0001),
        v(1, "High", 0x0002),
        v(1, "Middle", 0x0003),
        v(2, "Off", 0x0000),
        v(2, "On", 0x0001),
        v(3, "Off", 0x0000),
        v(3, "Low", 0x0001),
        v(3, "Middle", 0x0002),
        v(3, "High", 0x0003),
    ],
);

pub static FILM_MODE: CapabilityTable = CapabilityTable::new(
    "film mode",
    &[
        v(1, "Off", 0x0000),
        v(1, "Auto", 0x0002),
        v(2, "Off", 0x0000),
        v(2, "Auto", 0x0001),
        v(3, "Off", 0x0000),
        v(3, "Auto 1", 0x0001),
        v(3, "Auto 2", 0x0002),
    ],
);

pub static LAMP_CONTROL: CapabilityTable = CapabilityTable::new(
    "lamp control",
    &[v(COMMON, "Low", 0x0000), v(COMMON, "High", 0x0001)],
);

pub static PICTURE_POSITION: CapabilityTable = CapabilityTable::new(
    "picture position",
    &[
        v(1, "1.85:1", 0x0000),
        v(1, "2.35:1", 0x0001),
        v(1, "Custom 1", 0x0002),
        v(1, "Custom 2", 0x0003),
        v(1, "Custom 3", 0x0004),
        v(2, "1.85:1", 0x0000),
        v(2, "2.35:1", 0x0001),
        v(2, "Custom 1", 0x0002),
        v(2, "Custom 2", 0x0003),
        v(2, "Custom 3", 0x0004),
        v(2, "Custom 4", 0x0005),
        v(2, "Custom 5", 0x0006),
    ],
);

pub static ASPECT: CapabilityTable = CapabilityTable::new(
    "aspect",
    &[
        v(1, "Normal", 0x0001),
        v(1, "V Stretch", 0x000B),
        v(1, "Zoom 1.85", 0x000C),
        v(1, "Zoom 2.35", 0x000D),
        v(1, "Stretch", 0x000E),
        v(1, "Squeeze", 0x000F),
        v(2, "Full", 0x0000),
        v(2, "Normal", 0x0001),
        v(2, "Wide Zoom", 0x0002),
        v(2, "Zoom", 0x0003),
        v(2, "Full 1", 0x0007),
        v(2, "Full 2", 0x0008),
        v(3, "Full", 0x0000),
        v(3, "Normal", 0x0001),
        v(3, "Wide Zoom", 0x0002),
        v(3, "Zoom", 0x0003),
        v(3, "Subtitle", 0x0004),
        v(3, "Full 1", 0x0007),
        v(3, "Full 2", 0x0008),
        v(4, "Full", 0x0000),
        v(4, "Normal", 0x0001),
        v(4, "Wide Zoom", 0x0002),
        v(4, "Zoom", 0x0003),
        v(4, "Subtitle", 0x0004),
        v(5, "Full", 0x0000),
        v(5, "Normal", 0x0001),
        v(5, "Wide Zoom", 0x0002),
        v(5, "Zoom", 0x0003),
        v(5, "V Stretch", 0x000B),
        v(5, "Stretch", 0x000E),
        v(5, "Squeeze", 0x000F),
        v(6, "Full", 0x0000),
        v(6, "Normal", 0x0001),
        v(6, "Wide Zoom", 0x0002),
        v(6, "Zoom", 0x0003),
        v(6, "Full 1", 0x0007),
        v(6, "Full 2", 0x0008),
    ],
);

pub static COLOR_TEMPERATURE: CapabilityTable = CapabilityTable::new(
    "color temperature",
    &[
        v(1, "D93", 0x0000),
        v(1, "D75", 0x0001),
        v(1, "D65", 0x0002),
        v(1, "Custom 1", 0x0003),
        v(1, "Custom 2", 0x0004),
        v(1, "Custom 3", 0x0005),
        v(1, "Custom 4", 0x0006),
        v(1, "Custom 5", 0x0007),
        v(1, "D55", 0x0009),
        v(2, "High", 0x0000),
        v(2, "Middle", 0x0001),
        v(2, "Low", 0x0002),
        v(2, "Custom", 0x0003),
        v(3, "High", 0x0000),
        v(3, "Middle", 0x0001),
        v(3, "Low", 0x0002),
        v(3, "Custom 1", 0x0003),
        v(3, "Custom 2", 0x0004),
        v(3, "Custom 3", 0x0005),
        v(4, "High", 0x0000),
        v(4, "Middle", 0x0001),
        v(4, "Low 1", 0x0002),
        v(4, "Low 2", 0x0003),
        v(4, "Custom 1", 0x0004),
        v(4, "Custom 2", 0x0005),
        v(4, "Custom 3", 0x0006),
        v(4, "Custom 4", 0x0007),
        v(4, "Custom 5", 0x0008),
        v(5, "High", 0x0000),
        v(5, "Middle", 0x0001),
        v(5, "Low", 0x0002),
        v(5, "Custom 1", 0x0003),
        v(5, "Custom 2", 0x0004),
        v(5, "Custom 3", 0x0005),
        v(5, "Custom 4", 0x0006),
        v(6, "D93", 0x0000),
        v(6, "D75", 0x0001),
        v(6, "D65", 0x0002),
        v(6, "D55", 0x0009),
        v(6, "Custom 1", 0x0003),
        v(6, "Custom 2", 0x0004),
        v(6, "Custom 3", 0x0005),
        v(7, "High", 0x0000),
        v(7, "Middle", 0x0001),
        v(7, "Low", 0x0002),
        v(7, "Custom 1", 0x0003),
        v(7, "Custom 2", 0x0004),
        v(7, "Custom 3", 0x0005),
        v(7, "Custom 4", 0x0006),
        v(7, "Custom 5", 0x0007),
    ],
);

pub static IRIS_MODE: CapabilityTable = CapabilityTable::new(
    "iris mode",
    &[
        v(1, "Off", 0x0000),
        v(1, "Full", 0x0002),
        v(1, "Limited", 0x0003),
        v(2, "Off", 0x0000),
        v(2, "Manual", 0x0001),
        v(2, "Auto", 0x0002),
        v(3, "Off", 0x0000),
        v(3, "Manual", 0x0001),
        v(3, "Auto 1", 0x0002),
        v(3, "Auto 2", 0x0003),
        v(4, "Off", 0x0000),
        v(4, "On", 0x0001),
        v(4, "Auto", 0x0002),
        v(5, "Off", 0x0000),
        v(5, "Manual", 0x0001),
        v(5, "Auto 1", 0x0002),
        v(5, "Auto 2", 0x0003),
        v(5, "Auto 3", 0x0004),
    ],
);

pub static IRIS_SENSITIVITY: CapabilityTable = CapabilityTable::new(
    "iris sensitivity",
    &[
        v(COMMON, "Recommend", 0x0000),
        v(COMMON, "Fast", 0x0001),
        v(COMMON, "Slow", 0x0002),
    ],
);

// Category 2 is an older relative gamma adjustment sent as signed values.
pub static GAMMA_CORRECTION: CapabilityTable = CapabilityTable::new(
    "gamma correction",
    &[
        v(1, "Off", 0x0000),
        v(1, "1.8", 0x0001),
        v(1, "2.0", 0x0002),
        v(1, "2.1", 0x0003),
        v(1, "2.2", 0x0004),
        v(1, "2.4", 0x0005),
        v(1, "2.6", 0x0006),
        v(1, "Gamma 7", 0x0007),
        v(1, "Gamma 8", 0x0008),
        v(1, "Gamma 9", 0x0009),
        v(1, "Gamma 10", 0x000A),
        Variant::signed(2, "-3", -3),
        Variant::signed(2, "-2", -2),
        Variant::signed(2, "-1", -1),
        Variant::signed(2, "0", 0),
        Variant::signed(2, "1", 1),
        Variant::signed(2, "2", 2),
        Variant::signed(2, "3", 3),
        v(3, "Off", 0x0000),
        v(3, "Gamma 1", 0x0001),
        v(3, "Gamma 2", 0x0002),
        v(3, "Gamma 3", 0x0003),
        v(4, "Off", 0x0000),
        v(4, "Gamma 1", 0x0001),
        v(4, "Gamma 2", 0x0002),
        v(4, "Gamma 3", 0x0003),
        v(4, "Gamma 4", 0x0004),
        v(4, "Gamma 5", 0x0005),
        v(4, "Gamma 6", 0x0006),
        v(5, "Off", 0x0000),
        v(5, "Gamma 1", 0x0001),
        v(5, "Gamma 2", 0x0002),
        v(5, "Gamma 3", 0x0003),
        v(5, "Gamma 4", 0x0004),
        v(6, "Off", 0x0000),
        v(6, "1.8", 0x0001),
        v(6, "2.0", 0x0002),
        v(6, "2.1", 0x0003),
        v(6, "2.2", 0x0004),
        v(6, "2.4", 0x0005),
        v(6, "2.6", 0x0006),
    ],
);

pub static NOISE_REDUCTION: CapabilityTable = CapabilityTable::new(
    "noise reduction",
    &[
        v(1, "Off", 0x0000),
        v(1, "Low", 0x0001),
        v(1, "Middle", 0x0002),
        v(1, "High", 0x0003),
        v(1, "Auto", 0x0004),
        v(2, "Off", 0x0000),
        v(2, "Low", 0x0001),
        v(2, "Middle", 0x0002),
        v(2, "High", 0x0003),
    ],
);

pub static BLOCK_NR: CapabilityTable = CapabilityTable::new(
    "block noise reduction",
    &[
        v(COMMON, "Off", 0x0000),
        v(COMMON, "Low", 0x0001),
        v(COMMON, "Middle", 0x0002),
        v(COMMON, "High", 0x0003),
    ],
);

pub static MOSQUITO_NR: CapabilityTable = CapabilityTable::new(
    "mosquito noise reduction",
    &[
        v(COMMON, "Off", 0x0000),
        v(COMMON, "Low", 0x0001),
        v(COMMON, "Middle", 0x0002),
        v(COMMON, "High", 0x0003),
    ],
);

pub static MPEG_NR: CapabilityTable = CapabilityTable::new(
    "MPEG noise reduction",
    &[
        v(1, "Off", 0x0000),
        v(1, "Low", 0x0001),
        v(1, "Middle", 0x0002),
        v(1, "High", 0x0003),
        v(1, "Auto", 0x0004),
        v(2, "Off", 0x0000),
        v(2, "Low", 0x0001),
        v(2, "Middle", 0x0002),
        v(2, "High", 0x0003),
    ],
);

pub static COLOR_SPACE: CapabilityTable = CapabilityTable::new(
    "color space",
    &[
        v(1, "Normal", 0x0000),
        v(1, "Wide", 0x0001),
        v(2, "BT.709", 0x0000),
        v(2, "Color Space 1", 0x0003),
        v(2, "Color Space 2", 0x0004),
        v(2, "Color Space 3", 0x0005),
        v(2, "Custom", 0x0006),
        v(2, "BT.2020", 0x0008),
        v(3, "Standard", 0x0000),
        v(3, "Wide", 0x0001),
        v(4, "Normal", 0x0000),
        v(4, "Wide", 0x0001),
        v(4, "Wide 2", 0x0002),
        v(5, "BT.709", 0x0000),
        v(5, "BT.2020", 0x0008),
        v(5, "Color Space 1", 0x0003),
        v(5, "Color Space 2", 0x0004),
        v(5, "Color Space 3", 0x0005),
        v(5, "Custom", 0x0006),
        v(6, "BT.709", 0x0000),
        v(6, "Wide", 0x0001),
    ],
);

pub static FILM_PROJECTION: CapabilityTable = CapabilityTable::new(
    "film projection",
    &[
        v(1, "Off", 0x0000),
        v(1, "Mode 1", 0x0001),
        v(1, "Mode 2", 0x0002),
        v(1, "Mode 3", 0x0003),
        v(2, "Off", 0x0000),
        v(2, "On", 0x0001),
        v(3, "Off", 0x0000),
        v(3, "Mode 1", 0x0001),
        v(3, "Mode 2", 0x0002),
    ],
);

pub static MOTION_ENHANCER: CapabilityTable = CapabilityTable::new(
    "motion enhancer",
    &[
        v(1, "Off", 0x0000),
        v(1, "Low", 0x0001),
        v(1, "High", 0x0002),
        v(2, "Off", 0x0000),
        v(2, "Low", 0x0001),
        v(2, "High", 0x0002),
        v(2, "Smooth High", 0x0003),
        v(2, "Smooth Low", 0x0004),
        v(2, "Impulse", 0x0005),
        v(2, "True Cinema", 0x0006),
        v(3, "Off", 0x0000),
        v(3, "Low", 0x0001),
        v(3, "High", 0x0002),
        v(3, "Smooth High", 0x0003),
        v(3, "Smooth Low", 0x0004),
    ],
);

pub static POWER_STATUS: CapabilityTable = CapabilityTable::new(
    "power status",
    &[
        v(COMMON, "Standby", 0x0000),
        v(COMMON, "Starting up", 0x0001),
        v(COMMON, "Lamp starting", 0x0002),
        v(COMMON, "On", 0x0003),
        v(COMMON, "Cooling 1", 0x0004),
        v(COMMON, "Cooling 2", 0x0005),
        v(COMMON, "Saving cooling 1", 0x0006),
        v(COMMON, "Saving cooling 2", 0x0007),
        v(COMMON, "Saving standby", 0x0008),
    ],
);

/// Every capability table, for iteration in tests and tooling.
pub static ALL_TABLES: [&CapabilityTable; 19] = [
    &ASPECT,
    &CALIBRATION_PRESET,
    &COLOR_SPACE,
    &COLOR_TEMPERATURE,
    &CONTRAST_ENHANCER,
    &FILM_MODE,
    &FILM_PROJECTION,
    &GAMMA_CORRECTION,
    &INPUT,
    &IRIS_MODE,
    &IRIS_SENSITIVITY,
    &LAMP_CONTROL,
    &MOTION_ENHANCER,
    &MPEG_NR,
    &NOISE_REDUCTION,
    &BLOCK_NR,
    &MOSQUITO_NR,
    &PICTURE_POSITION,
    &POWER_STATUS,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_is_a_bijection() {
        for table in ALL_TABLES {
            table
                .check_bijection()
                .unwrap_or_else(|e| panic!("{}: {e}", table.name()));
        }
    }

    #[test]
    fn name_code_round_trip_for_all_variants() {
        for table in ALL_TABLES {
            for variant in table.variants() {
                let code = table.resolve_code(variant.category, variant.name).unwrap();
                assert_eq!(code, variant.code);
                let name = table.resolve_name(variant.category, &code).unwrap();
                assert_eq!(name, variant.name, "{}", table.name());
            }
        }
    }

    #[test]
    fn aspect_category_1_stretch() {
        assert_eq!(ASPECT.resolve_code(1, "Stretch").unwrap(), [0x00, 0x0E]);
        assert_eq!(ASPECT.resolve_name(1, &[0x00, 0x0E]).unwrap(), "Stretch");
    }

    #[test]
    fn aspect_has_six_schemes_and_no_stretch_in_category_6() {
        assert_eq!(ASPECT.categories(), vec![1, 2, 3, 4, 5, 6]);
        assert!(!ASPECT.list_names(6).contains(&"Stretch"));
        assert!(ASPECT.resolve_code(6, "Stretch").is_err());
    }

    #[test]
    fn legacy_gamma_uses_twos_complement() {
        assert_eq!(GAMMA_CORRECTION.resolve_code(2, "-3").unwrap(), [0xFF, 0xFD]);
        assert_eq!(GAMMA_CORRECTION.resolve_name(2, &[0xFF, 0xFF]).unwrap(), "-1");
    }

    #[test]
    fn list_names_in_declaration_order() {
        assert_eq!(LAMP_CONTROL.list_names(COMMON), vec!["Low", "High"]);
        assert_eq!(
            FILM_MODE.list_names(3),
            vec!["Off", "Auto 1", "Auto 2"]
        );
    }
}
