//! Generic GRIB code-table enum infrastructure.
//!
//! A GRIB code table is a small closed mapping between a numeric code and a
//! stable name (e.g. `shapeOfTheEarth` code 6 ↔ `"spherical"`). Concepts that
//! need such a table declare one with [`CodeTable`] rather than hand-rolling
//! a `match`, so that the round-trip property required by §8 ("for every
//! enum E ... name_to_enum(enum_to_name(e)) == e and long_to_enum(long(e))
//! == e") is structural rather than something each concept has to reprove.

use crate::error::TableError;

/// A closed code ↔ name table for one GRIB code-table enum.
///
/// `E` is typically a small `Copy` enum; `entries` is a `const` array of
/// `(code, name, variant)` triples, declared once per table.
pub struct CodeTable<E: Copy + PartialEq + 'static> {
    pub name: &'static str,
    pub entries: &'static [(i64, &'static str, E)],
}

impl<E: Copy + PartialEq + 'static> CodeTable<E> {
    pub const fn new(name: &'static str, entries: &'static [(i64, &'static str, E)]) -> Self {
        Self { name, entries }
    }

    pub fn enum_to_name(&self, value: E) -> &'static str {
        self.entries
            .iter()
            .find(|(_, _, v)| *v == value)
            .map(|(_, name, _)| *name)
            .expect("CodeTable entries must cover every constructible variant")
    }

    pub fn enum_to_code(&self, value: E) -> i64 {
        self.entries
            .iter()
            .find(|(_, _, v)| *v == value)
            .map(|(code, _, _)| *code)
            .expect("CodeTable entries must cover every constructible variant")
    }

    pub fn name_to_enum(&self, name: &str) -> Result<E, TableError> {
        self.entries
            .iter()
            .find(|(_, n, _)| *n == name)
            .map(|(_, _, v)| *v)
            .ok_or_else(|| TableError::UnknownName {
                table: self.name,
                name: name.to_owned(),
            })
    }

    pub fn code_to_enum(&self, code: i64) -> Result<E, TableError> {
        self.entries
            .iter()
            .find(|(c, _, _)| *c == code)
            .map(|(_, _, v)| *v)
            .ok_or_else(|| TableError::UnknownCode {
                table: self.name,
                code,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Shape {
        Spherical,
        Oblate,
    }

    const SHAPE_TABLE: CodeTable<Shape> = CodeTable::new(
        "shapeOfTheEarth",
        &[(6, "spherical", Shape::Spherical), (7, "oblate", Shape::Oblate)],
    );

    #[test]
    fn round_trips_name_and_code() {
        for &(code, name, variant) in SHAPE_TABLE.entries {
            assert_eq!(
                SHAPE_TABLE.name_to_enum(SHAPE_TABLE.enum_to_name(variant)).unwrap(),
                variant
            );
            assert_eq!(
                SHAPE_TABLE.code_to_enum(SHAPE_TABLE.enum_to_code(variant)).unwrap(),
                variant
            );
            assert_eq!(SHAPE_TABLE.enum_to_code(variant), code);
            assert_eq!(SHAPE_TABLE.enum_to_name(variant), name);
        }
    }

    #[test]
    fn unknown_name_and_code_are_table_errors() {
        assert!(matches!(
            SHAPE_TABLE.name_to_enum("nonsense"),
            Err(TableError::UnknownName { .. })
        ));
        assert!(matches!(
            SHAPE_TABLE.code_to_enum(999),
            Err(TableError::UnknownCode { .. })
        ));
    }
}
