//! GRIB code tables used by more than one concept (§4.3 shapeOfTheEarth, wave period encoding).
//!
//! Both tables reproduce ecCodes GRIB tables verbatim (code, canonical
//! kebab-case name, and ordering) rather than inventing local shorthand:
//! table 3.2 (`ShapeOfTheEarth`) and table 4.91 (`TypeOfInterval`).

use mars2grib_core::table::CodeTable;

/// GRIB table 3.2, "shape of the reference system".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeOfTheEarth {
    EarthSphericalRadius6367470,
    EarthSphericalRadiusSpecified,
    EarthOblateIau1965,
    EarthOblateAxesKmSpecified,
    EarthOblateIagGrs80,
    EarthWgs84,
    EarthSphericalRadius6371229,
    EarthOblateAxesMetersSpecified,
    EarthSphericalRadius6371200Wgs84Datum,
    EarthOsgb1936Airy1830,
    EarthWgs84CorrectedGeomagnetic,
    SunSphericalStonyhurst,
    Missing,
}

pub const SHAPE_OF_THE_EARTH: CodeTable<ShapeOfTheEarth> = CodeTable::new(
    "shapeOfTheEarth",
    &[
        (0, "earth-spherical-radius-6367470", ShapeOfTheEarth::EarthSphericalRadius6367470),
        (1, "earth-spherical-radius-specified", ShapeOfTheEarth::EarthSphericalRadiusSpecified),
        (2, "earth-oblate-iau-1965", ShapeOfTheEarth::EarthOblateIau1965),
        (3, "earth-oblate-axes-km-specified", ShapeOfTheEarth::EarthOblateAxesKmSpecified),
        (4, "earth-oblate-iag-grs80", ShapeOfTheEarth::EarthOblateIagGrs80),
        (5, "earth-wgs84", ShapeOfTheEarth::EarthWgs84),
        (6, "earth-spherical-radius-6371229", ShapeOfTheEarth::EarthSphericalRadius6371229),
        (7, "earth-oblate-axes-m-specified", ShapeOfTheEarth::EarthOblateAxesMetersSpecified),
        (
            8,
            "earth-spherical-radius-6371200-wgs84-datum",
            ShapeOfTheEarth::EarthSphericalRadius6371200Wgs84Datum,
        ),
        (9, "earth-osgb1936-airy1830", ShapeOfTheEarth::EarthOsgb1936Airy1830),
        (10, "earth-wgs84-corrected-geomagnetic", ShapeOfTheEarth::EarthWgs84CorrectedGeomagnetic),
        (11, "sun-spherical-stonyhurst", ShapeOfTheEarth::SunSphericalStonyhurst),
        (255, "missing", ShapeOfTheEarth::Missing),
    ],
);

/// GRIB table 4.91, "type of interval", used by the `wave`/`Period`
/// variant to pick `typeOfWavePeriodInterval` depending on which of
/// `par["iTmin"]` / `par["iTmax"]` is present (§4.3 "wave").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeOfInterval {
    SmallerThanFirstLimit,
    GreaterThanSecondLimit,
    BetweenFirstInclusiveSecondExclusive,
    GreaterThanFirstLimit,
    SmallerThanSecondLimit,
    SmallerOrEqualFirstLimit,
    GreaterOrEqualSecondLimit,
    BetweenFirstInclusiveSecondInclusive,
    GreaterOrEqualFirstLimit,
    SmallerOrEqualSecondLimit,
    BetweenFirstExclusiveSecondInclusive,
    EqualFirstLimit,
    Missing,
}

pub const TYPE_OF_INTERVAL: CodeTable<TypeOfInterval> = CodeTable::new(
    "typeOfInterval",
    &[
        (0, "smaller-than-first-limit", TypeOfInterval::SmallerThanFirstLimit),
        (1, "greater-than-second-limit", TypeOfInterval::GreaterThanSecondLimit),
        (
            2,
            "between-first-inclusive-second-exclusive",
            TypeOfInterval::BetweenFirstInclusiveSecondExclusive,
        ),
        (3, "greater-than-first-limit", TypeOfInterval::GreaterThanFirstLimit),
        (4, "smaller-than-second-limit", TypeOfInterval::SmallerThanSecondLimit),
        (5, "smaller-or-equal-first-limit", TypeOfInterval::SmallerOrEqualFirstLimit),
        (6, "greater-or-equal-second-limit", TypeOfInterval::GreaterOrEqualSecondLimit),
        (
            7,
            "between-first-inclusive-second-inclusive",
            TypeOfInterval::BetweenFirstInclusiveSecondInclusive,
        ),
        (8, "greater-or-equal-first-limit", TypeOfInterval::GreaterOrEqualFirstLimit),
        (9, "smaller-or-equal-second-limit", TypeOfInterval::SmallerOrEqualSecondLimit),
        (
            10,
            "between-first-exclusive-second-inclusive",
            TypeOfInterval::BetweenFirstExclusiveSecondInclusive,
        ),
        (11, "equal-first-limit", TypeOfInterval::EqualFirstLimit),
        (255, "missing", TypeOfInterval::Missing),
    ],
);
