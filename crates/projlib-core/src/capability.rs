//! Capability tables: model-scoped mapping between setting names and codes.
//!
//! A projector setting such as "aspect" has different legal values on
//! different hardware generations, and the same value may be encoded
//! differently from one generation to the next. Models that share an
//! encoding for a setting form a *category*. A [`CapabilityTable`] holds
//! every `(category, name, code)` triple for one setting.
//!
//! Within a table, each category is its own numbering scheme. There is no
//! global code space: `00 01` may mean "Normal" in category 1 and
//! "Full" in category 2.
//!
//! ```
//! use projlib_core::capability::{CapabilityTable, Variant};
//!
//! static LAMP: CapabilityTable = CapabilityTable::new(
//!     "lamp control",
//!     &[
//!         Variant::new(1, "Low", [0x00, 0x00]),
//!         Variant::new(1, "High", [0x00, 0x01]),
//!     ],
//! );
//!
//! assert_eq!(LAMP.resolve_code(1, "High").unwrap(), [0x00, 0x01]);
//! assert_eq!(LAMP.resolve_name(1, &[0x00, 0x00]).unwrap(), "Low");
//! assert_eq!(LAMP.list_names(1), vec!["Low", "High"]);
//! ```

use crate::error::{Error, Result};
use crate::helpers::{Code, encode_signed16};

/// One named, binary-coded legal value of a setting within a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variant {
    /// Model category this variant belongs to.
    pub category: u8,
    /// Human-readable name, unique within the category.
    pub name: &'static str,
    /// Two-byte wire code, unique within the category.
    pub code: Code,
}

impl Variant {
    /// Create a variant with an explicit two-byte code.
    pub const fn new(category: u8, name: &'static str, code: Code) -> Self {
        Variant {
            category,
            name,
            code,
        }
    }

    /// Create a variant whose code is a signed value in two's complement.
    pub const fn signed(category: u8, name: &'static str, value: i16) -> Self {
        Variant {
            category,
            name,
            code: encode_signed16(value),
        }
    }
}

/// An immutable set of [`Variant`]s for one logical setting.
#[derive(Debug)]
pub struct CapabilityTable {
    name: &'static str,
    variants: &'static [Variant],
}

impl CapabilityTable {
    /// Create a table from static variant data.
    pub const fn new(name: &'static str, variants: &'static [Variant]) -> Self {
        CapabilityTable { name, variants }
    }

    /// The setting name this table describes (used in error messages).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// All variants in declaration order.
    pub fn variants(&self) -> &'static [Variant] {
        self.variants
    }

    /// Resolve a symbolic name to its wire code for the given category.
    ///
    /// The name comparison is exact and case-sensitive. A name that exists
    /// only in another category fails just like a name that exists nowhere.
    pub fn resolve_code(&self, category: u8, name: &str) -> Result<Code> {
        self.variants
            .iter()
            .find(|v| v.category == category && v.name == name)
            .map(|v| v.code)
            .ok_or_else(|| Error::UnknownName {
                table: self.name,
                category,
                name: name.to_string(),
            })
    }

    /// Resolve a wire code back to its symbolic name for the given category.
    pub fn resolve_name(&self, category: u8, code: &[u8]) -> Result<&'static str> {
        self.variants
            .iter()
            .find(|v| v.category == category && v.code.as_slice() == code)
            .map(|v| v.name)
            .ok_or_else(|| Error::UnknownCode {
                table: self.name,
                category,
                code: code.to_vec(),
            })
    }

    /// List every name defined for a category, in declaration order.
    pub fn list_names(&self, category: u8) -> Vec<&'static str> {
        self.variants
            .iter()
            .filter(|v| v.category == category)
            .map(|v| v.name)
            .collect()
    }

    /// Returns `true` if at least one variant is defined for the category.
    pub fn has_category(&self, category: u8) -> bool {
        self.variants.iter().any(|v| v.category == category)
    }

    /// The distinct categories present in this table, in first-seen order.
    pub fn categories(&self) -> Vec<u8> {
        let mut out: Vec<u8> = Vec::new();
        for v in self.variants {
            if !out.contains(&v.category) {
                out.push(v.category);
            }
        }
        out
    }

    /// Verify that names and codes are each unique within every category.
    ///
    /// Tables are static data, so this is normally only called from tests.
    pub fn check_bijection(&self) -> Result<()> {
        for (i, a) in self.variants.iter().enumerate() {
            for b in &self.variants[i + 1..] {
                if a.category != b.category {
                    continue;
                }
                if a.name == b.name {
                    return Err(Error::InvalidParameter(format!(
                        "{} category {}: duplicate name {:?}",
                        self.name, a.category, a.name
                    )));
                }
                if a.code == b.code {
                    return Err(Error::InvalidParameter(format!(
                        "{} category {}: {:?} and {:?} share code {:02X?}",
                        self.name, a.category, a.name, b.name, a.code
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static ASPECT: CapabilityTable = CapabilityTable::new(
        "aspect",
        &[
            Variant::new(1, "Normal", [0x00, 0x01]),
            Variant::new(1, "Stretch", [0x00, 0x0E]),
            Variant::new(2, "Full", [0x00, 0x01]),
            Variant::new(2, "Normal", [0x00, 0x02]),
        ],
    );

    #[test]
    fn resolve_code_is_category_scoped() {
        assert_eq!(ASPECT.resolve_code(1, "Normal").unwrap(), [0x00, 0x01]);
        assert_eq!(ASPECT.resolve_code(2, "Normal").unwrap(), [0x00, 0x02]);
    }

    #[test]
    fn resolve_code_unknown_in_category() {
        let err = ASPECT.resolve_code(2, "Stretch").unwrap_err();
        match err {
            Error::UnknownName {
                table,
                category,
                name,
            } => {
                assert_eq!(table, "aspect");
                assert_eq!(category, 2);
                assert_eq!(name, "Stretch");
            }
            other => panic!("expected UnknownName, got {other:?}"),
        }
    }

    #[test]
    fn resolve_code_is_case_sensitive() {
        assert!(ASPECT.resolve_code(1, "stretch").is_err());
    }

    #[test]
    fn resolve_name_same_code_different_categories() {
        assert_eq!(ASPECT.resolve_name(1, &[0x00, 0x01]).unwrap(), "Normal");
        assert_eq!(ASPECT.resolve_name(2, &[0x00, 0x01]).unwrap(), "Full");
    }

    #[test]
    fn resolve_name_unknown_code() {
        let err = ASPECT.resolve_name(1, &[0x00, 0x7F]).unwrap_err();
        assert!(matches!(err, Error::UnknownCode { category: 1, .. }));
    }

    #[test]
    fn list_names_preserves_order() {
        assert_eq!(ASPECT.list_names(1), vec!["Normal", "Stretch"]);
        assert_eq!(ASPECT.list_names(2), vec!["Full", "Normal"]);
        assert!(ASPECT.list_names(9).is_empty());
    }

    #[test]
    fn categories_in_first_seen_order() {
        assert_eq!(ASPECT.categories(), vec![1, 2]);
        assert!(ASPECT.has_category(2));
        assert!(!ASPECT.has_category(3));
    }

    #[test]
    fn signed_variant_codes() {
        let v = Variant::signed(1, "-3", -3);
        assert_eq!(v.code, [0xFF, 0xFD]);
    }

    #[test]
    fn bijection_detects_duplicates() {
        static DUP_NAME: CapabilityTable = CapabilityTable::new(
            "dup",
            &[
                Variant::new(1, "A", [0x00, 0x00]),
                Variant::new(1, "A", [0x00, 0x01]),
            ],
        );
        static DUP_CODE: CapabilityTable = CapabilityTable::new(
            "dup",
            &[
                Variant::new(1, "A", [0x00, 0x00]),
                Variant::new(1, "B", [0x00, 0x00]),
                Variant::new(2, "A", [0x00, 0x00]),
            ],
        );
        assert!(ASPECT.check_bijection().is_ok());
        assert!(DUP_NAME.check_bijection().is_err());
        assert!(DUP_CODE.check_bijection().is_err());
    }
}
