//! Section initializer table: `[section][template_number] -> callback` (§4.5).
//!
//! Each GRIB section (0-5) owns a small closed table mapping a template
//! number to the function that writes that template's structural keys into
//! the output dictionary. Virtual template numbers above 1000 (only used by
//! Section 2) key into the same table as ordinary ones; there's nothing
//! special about the boundary from the registry's point of view.
//!
//! All six sections share one callback signature even though only Section 3
//! reads `geo` — keeping a single `SectionInitFn` type means the six tables
//! can live side by side as `&'static [Entry]` without a parallel type family
//! for the sections that don't need the grid dictionary.

use mars2grib_core::{Dictionary, MemDict};

use crate::error::SectionError;
use crate::sections;

/// `template` is passed through to the callback at call time rather than
/// baked into a distinct function per template number — the source's
/// template-number-as-template-parameter trick has no equivalent that stays
/// readable in Rust without one monomorphized function per entry, and most
/// sections only use the number to write it straight into the output dict.
pub type SectionInitFn = fn(
    &MemDict,
    &MemDict,
    &MemDict,
    &MemDict,
    i64,
    &mut dyn Dictionary,
) -> Result<(), SectionError>;

pub struct Entry {
    pub template: i64,
    pub init: SectionInitFn,
}

pub const fn entry(template: i64, init: SectionInitFn) -> Entry {
    Entry { template, init }
}

static SEC0: &[Entry] = &[entry(0, sections::sec0::init)];

static SEC1: &[Entry] = &[entry(0, sections::sec1::init)];

static SEC2: &[Entry] = &[
    entry(1000, sections::sec2::init),
    entry(1001, sections::sec2::init),
    entry(1002, sections::sec2::init),
    entry(1004, sections::sec2::init),
];

static SEC3: &[Entry] = &[
    entry(0, sections::sec3::init),
    entry(40, sections::sec3::init),
    entry(50, sections::sec3::init),
    entry(101, sections::sec3::init),
    entry(150, sections::sec3::init),
];

static SEC4: &[Entry] = &[
    entry(0, sections::sec4::init),
    entry(1, sections::sec4::init),
    entry(2, sections::sec4::init),
    entry(8, sections::sec4::init),
    entry(11, sections::sec4::init),
    entry(12, sections::sec4::init),
    entry(32, sections::sec4::init),
    entry(33, sections::sec4::init),
    entry(40, sections::sec4::init),
    entry(41, sections::sec4::init),
    entry(42, sections::sec4::init),
    entry(43, sections::sec4::init),
    entry(50, sections::sec4::init),
    entry(45, sections::sec4::init),
    entry(46, sections::sec4::init),
    entry(85, sections::sec4::init),
    entry(48, sections::sec4::init),
    entry(49, sections::sec4::init),
    entry(60, sections::sec4::init),
    entry(61, sections::sec4::init),
    entry(76, sections::sec4::init),
    entry(77, sections::sec4::init),
    entry(78, sections::sec4::init),
    entry(79, sections::sec4::init),
    entry(99, sections::sec4::init),
    entry(100, sections::sec4::init),
    entry(103, sections::sec4::init),
    entry(104, sections::sec4::init),
    entry(142, sections::sec4::init),
    entry(143, sections::sec4::init),
];

static SEC5: &[Entry] = &[
    entry(0, sections::sec5::init),
    entry(42, sections::sec5::init),
    entry(51, sections::sec5::init),
];

fn table(section: u8) -> &'static [Entry] {
    match section {
        0 => SEC0,
        1 => SEC1,
        2 => SEC2,
        3 => SEC3,
        4 => SEC4,
        5 => SEC5,
        _ => &[],
    }
}

/// Look up the initializer registered for `(section, template)`.
///
/// Mirrors `getSectionInitializerFn`: a linear scan over a small constant
/// table, throwing immediately rather than falling back to a guessed default
/// when the pair isn't registered.
pub fn lookup(section: u8, template: i64) -> Result<SectionInitFn, SectionError> {
    table(section)
        .iter()
        .find(|e| e.template == template)
        .map(|e| e.init)
        .ok_or(SectionError::UnknownTemplate { section, template })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_pairs_resolve() {
        assert!(lookup(0, 0).is_ok());
        assert!(lookup(2, 1001).is_ok());
        assert!(lookup(3, 50).is_ok());
        assert!(lookup(4, 8).is_ok());
        assert!(lookup(5, 51).is_ok());
    }

    #[test]
    fn unknown_pair_is_an_immediate_error() {
        let err = lookup(3, 9999).unwrap_err();
        assert!(matches!(err, SectionError::UnknownTemplate { section: 3, template: 9999 }));
    }

    #[test]
    fn unknown_section_is_empty() {
        assert!(lookup(9, 0).is_err());
    }
}
