//! Top-level encode error (§7 propagation policy, §10.2).
//!
//! Wraps whichever crate-boundary error actually failed, tagging it with
//! stage/section context and a JSON dump of the four input dictionaries so a
//! caller never has to re-derive what was being encoded when it blew up.

use mars2grib_concepts::{ConceptError, RuleError, Stage};
use mars2grib_core::MemDict;
use mars2grib_sections::SectionError;

/// A JSON snapshot of the dictionaries in play when an encode failed.
#[derive(Debug, serde::Serialize)]
struct InputDump<'a> {
    mars: &'a MemDict,
    geo: &'a MemDict,
    par: &'a MemDict,
    opt: &'a MemDict,
}

fn dump(mars: &MemDict, geo: &MemDict, par: &MemDict, opt: &MemDict) -> String {
    serde_json::to_string(&InputDump { mars, geo, par, opt })
        .unwrap_or_else(|e| format!("<failed to serialise encode inputs: {e}>"))
}

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("stat-param rule preprocessing failed\ninputs: {inputs}")]
    Rule {
        #[source]
        source: RuleError,
        inputs: String,
    },

    #[error("concept dispatch failed at stage {stage:?} section {section}\ninputs: {inputs}")]
    Concept {
        stage: Stage,
        section: u8,
        #[source]
        source: ConceptError,
        inputs: String,
    },

    #[error("section {section} initializer failed (template {template})\ninputs: {inputs}")]
    Section {
        section: u8,
        template: i64,
        #[source]
        source: SectionError,
        inputs: String,
    },
}

impl EncodeError {
    pub(crate) fn rule(source: RuleError, mars: &MemDict, geo: &MemDict, par: &MemDict, opt: &MemDict) -> Self {
        EncodeError::Rule {
            source,
            inputs: dump(mars, geo, par, opt),
        }
    }

    pub(crate) fn concept(
        stage: Stage,
        section: u8,
        source: ConceptError,
        mars: &MemDict,
        geo: &MemDict,
        par: &MemDict,
        opt: &MemDict,
    ) -> Self {
        EncodeError::Concept {
            stage,
            section,
            source,
            inputs: dump(mars, geo, par, opt),
        }
    }

    pub(crate) fn section(
        section: u8,
        template: i64,
        source: SectionError,
        mars: &MemDict,
        geo: &MemDict,
        par: &MemDict,
        opt: &MemDict,
    ) -> Self {
        EncodeError::Section {
            section,
            template,
            source,
            inputs: dump(mars, geo, par, opt),
        }
    }
}
