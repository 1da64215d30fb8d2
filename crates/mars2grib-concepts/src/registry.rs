//! Concept registry and dispatch table (§4.2).
//!
//! Concepts are declared as plain modules under [`crate::concepts`] rather
//! than trait objects: each exposes a `matcher` and a `dispatch` function
//! pointer, and [`CONCEPTS`] is the static array that stands in for the
//! source's compile-time `[variant][stage][section]` table — built once,
//! immutable thereafter, exactly as §9's re-architecture note asks for.

use mars2grib_core::{Dictionary, MemDict};

use crate::concepts;
use crate::error::ConceptError;
use crate::error::ConceptOpError;
use crate::stage::Stage;

/// A concept operation, invoked once a cell's lookup resolves to non-null.
pub type ConceptOp = fn(
    &MemDict,
    &MemDict,
    &MemDict,
    &MemDict,
    &mut dyn Dictionary,
) -> Result<(), ConceptOpError>;

/// One concept's entry in the registry.
///
/// `matcher` is pure and depends only on `mars`/`opt` (§4.2 "Matcher
/// contract"); `dispatch` looks up the callback for a resolved variant at a
/// given `(stage, section)`, returning `None` when the cell is not
/// applicable.
pub struct Descriptor {
    pub name: &'static str,
    pub matcher: fn(&MemDict, &MemDict) -> Option<&'static str>,
    pub dispatch: fn(&'static str, Stage, u8) -> Option<ConceptOp>,
}

pub static CONCEPTS: &[Descriptor] = &[
    Descriptor {
        name: "mars",
        matcher: concepts::mars::matcher,
        dispatch: concepts::mars::dispatch,
    },
    Descriptor {
        name: "param",
        matcher: concepts::param::matcher,
        dispatch: concepts::param::dispatch,
    },
    Descriptor {
        name: "level",
        matcher: concepts::level::matcher,
        dispatch: concepts::level::dispatch,
    },
    Descriptor {
        name: "referenceTime",
        matcher: concepts::reference_time::matcher,
        dispatch: concepts::reference_time::dispatch,
    },
    Descriptor {
        name: "representation",
        matcher: concepts::representation::matcher,
        dispatch: concepts::representation::dispatch,
    },
    Descriptor {
        name: "wave",
        matcher: concepts::wave::matcher,
        dispatch: concepts::wave::dispatch,
    },
    Descriptor {
        name: "satellite",
        matcher: concepts::satellite::matcher,
        dispatch: concepts::satellite::dispatch,
    },
    Descriptor {
        name: "shapeOfTheEarth",
        matcher: concepts::shape_of_the_earth::matcher,
        dispatch: concepts::shape_of_the_earth::dispatch,
    },
    Descriptor {
        name: "statistics",
        matcher: concepts::statistics::matcher,
        dispatch: concepts::statistics::dispatch,
    },
    Descriptor {
        name: "packing",
        matcher: concepts::packing::matcher,
        dispatch: concepts::packing::dispatch,
    },
];

/// The variant each concept resolved to at encode start (§4.2: matchers run
/// once per encode, never per cell).
pub struct ResolvedVariants(Vec<Option<&'static str>>);

pub fn resolve_variants(mars: &MemDict, opt: &MemDict) -> ResolvedVariants {
    ResolvedVariants(CONCEPTS.iter().map(|d| (d.matcher)(mars, opt)).collect())
}

/// Invoke every concept applicable to `(stage, section)`, in registration order.
pub fn run_cell(
    resolved: &ResolvedVariants,
    stage: Stage,
    section: u8,
    mars: &MemDict,
    geo: &MemDict,
    par: &MemDict,
    opt: &MemDict,
    out: &mut dyn Dictionary,
) -> Result<(), ConceptError> {
    for (descriptor, variant) in CONCEPTS.iter().zip(resolved.0.iter()) {
        let Some(variant) = variant else { continue };
        let Some(op) = (descriptor.dispatch)(variant, stage, section) else {
            continue;
        };

        let span = tracing::trace_span!(
            target: "concept",
            "concept",
            concept = descriptor.name,
            variant = *variant,
            stage = ?stage,
            section
        );
        let _enter = span.enter();

        op(mars, geo, par, opt, out).map_err(|source| ConceptError {
            concept: descriptor.name,
            variant,
            stage,
            section,
            source,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_concept_has_a_stable_name() {
        let names: Vec<_> = CONCEPTS.iter().map(|d| d.name).collect();
        assert!(names.contains(&"mars"));
        assert!(names.contains(&"level"));
        assert!(names.contains(&"statistics"));
    }

    #[test]
    fn resolving_on_empty_dicts_never_panics() {
        let mars = MemDict::new();
        let opt = MemDict::new();
        let _resolved = resolve_variants(&mars, &opt);
    }
}
