//! YAML-driven rule engine (§4.6).
//!
//! A rule tree is one of three node kinds: [`Rule::Mapping`] dispatches on a
//! dictionary value, [`Rule::Write`] writes fixed key/value entries, and
//! [`Rule::Failure`] terminates with a message. Every execution threads a
//! [`Vec<TraceEntry>`] so that, on failure, a caller can see the exact path
//! taken without re-running anything (§10.1: this trace is plain data, not a
//! `tracing` span, because it is part of the error's public payload).

mod yaml;

use indexmap::IndexMap;
use mars2grib_core::{Dictionary, MemDict, Value};

use crate::error::RuleError;

pub use yaml::parse_str;

/// One step recorded while walking a rule tree.
#[derive(Debug, Clone)]
pub struct TraceEntry {
    pub node: String,
    pub detail: String,
}

/// A literal scalar written by a [`Rule::Write`] node.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleValue {
    Int(i64),
    Double(f64),
    Str(String),
}

impl From<&RuleValue> for Value {
    fn from(v: &RuleValue) -> Self {
        match v {
            RuleValue::Int(i) => Value::Int(*i),
            RuleValue::Double(d) => Value::Double(*d),
            RuleValue::Str(s) => Value::Str(s.clone()),
        }
    }
}

/// Which dictionary a [`Rule::Mapping`] node reads its key from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictSource {
    /// The mutable working dictionary, as of this point in the tree.
    Work,
    /// The immutable pre-rule-engine snapshot (`mars` merged with `par`/`opt`
    /// at rule-engine entry).
    Initial,
}

#[derive(Debug, Clone)]
pub enum Rule {
    Mapping {
        key: String,
        dict: DictSource,
        value_map: IndexMap<String, Box<Rule>>,
        default: Option<Box<Rule>>,
        null_is_default: bool,
        not_found_is_default: bool,
    },
    Write {
        write: Vec<(String, RuleValue)>,
        write_out: Vec<(String, RuleValue)>,
        write_work: Vec<(String, RuleValue)>,
    },
    Failure {
        message: String,
    },
}

fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Int(i) => Some(i.to_string()),
        Value::Double(d) => Some(d.to_string()),
        Value::Str(s) => Some(s.clone()),
        Value::Missing => None,
        Value::IntVec(_) | Value::DoubleVec(_) => None,
    }
}

/// Entry point: seeds the trace with the rule file's name, then walks the tree.
pub fn apply(
    rule: &Rule,
    source_name: &str,
    initial: &MemDict,
    work: &mut MemDict,
    out: &mut dyn Dictionary,
) -> Result<(), RuleError> {
    let mut trace = vec![TraceEntry {
        node: "root".to_owned(),
        detail: format!("applying rule file '{source_name}'"),
    }];
    execute(rule, initial, work, out, &mut trace)
}

fn execute(
    rule: &Rule,
    initial: &MemDict,
    work: &mut MemDict,
    out: &mut dyn Dictionary,
    trace: &mut Vec<TraceEntry>,
) -> Result<(), RuleError> {
    match rule {
        Rule::Write {
            write,
            write_out,
            write_work,
        } => {
            for (key, value) in write {
                work.insert(key.clone(), Value::from(value));
                out.set_or_throw(key, Value::from(value)).map_err(|e| RuleError {
                    message: format!("writing '{key}' to output dict: {e}"),
                    trace: trace.clone(),
                })?;
            }
            for (key, value) in write_out {
                out.set_or_throw(key, Value::from(value)).map_err(|e| RuleError {
                    message: format!("writing '{key}' to output dict: {e}"),
                    trace: trace.clone(),
                })?;
            }
            for (key, value) in write_work {
                work.insert(key.clone(), Value::from(value));
            }
            trace.push(TraceEntry {
                node: "write".to_owned(),
                detail: format!(
                    "{} to both, {} out-only, {} work-only",
                    write.len(),
                    write_out.len(),
                    write_work.len()
                ),
            });
            Ok(())
        }
        Rule::Failure { message } => {
            trace.push(TraceEntry {
                node: "fail".to_owned(),
                detail: message.clone(),
            });
            Err(RuleError {
                message: message.clone(),
                trace: trace.clone(),
            })
        }
        Rule::Mapping {
            key,
            dict,
            value_map,
            default,
            null_is_default,
            not_found_is_default,
        } => {
            let source: &dyn Dictionary = match dict {
                DictSource::Work => work,
                DictSource::Initial => initial,
            };
            let found = source.get(key);

            let next = match found {
                None => {
                    trace.push(TraceEntry {
                        node: "mapping".to_owned(),
                        detail: format!("key '{key}' not found"),
                    });
                    if *not_found_is_default {
                        default.as_deref()
                    } else {
                        return Err(RuleError {
                            message: format!("key '{key}' not found and no default permitted"),
                            trace: trace.clone(),
                        });
                    }
                }
                Some(Value::Missing) => {
                    trace.push(TraceEntry {
                        node: "mapping".to_owned(),
                        detail: format!("key '{key}' is null"),
                    });
                    if *null_is_default {
                        default.as_deref()
                    } else {
                        return Err(RuleError {
                            message: format!("key '{key}' is null and no default permitted"),
                            trace: trace.clone(),
                        });
                    }
                }
                Some(value) => {
                    let text = stringify(value).ok_or_else(|| RuleError {
                        message: format!("key '{key}' has a non-scalar value"),
                        trace: trace.clone(),
                    })?;
                    match value_map.get(&text) {
                        Some(sub) => {
                            trace.push(TraceEntry {
                                node: "mapping".to_owned(),
                                detail: format!("key '{key}' = '{text}' matched"),
                            });
                            Some(sub.as_ref())
                        }
                        None => {
                            trace.push(TraceEntry {
                                node: "mapping".to_owned(),
                                detail: format!("key '{key}' = '{text}' unmapped"),
                            });
                            if *not_found_is_default {
                                default.as_deref()
                            } else {
                                return Err(RuleError {
                                    message: format!(
                                        "key '{key}' = '{text}' is not in the value map and no default permitted"
                                    ),
                                    trace: trace.clone(),
                                });
                            }
                        }
                    }
                }
            };

            match next {
                Some(sub) => execute(sub, initial, work, out, trace),
                None => Err(RuleError {
                    message: format!("key '{key}' requires a default branch but none is configured"),
                    trace: trace.clone(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_populates_both_work_and_out() {
        let rule = Rule::Write {
            write: vec![("typeOfStatisticalProcessing".to_owned(), RuleValue::Int(1))],
            write_out: vec![],
            write_work: vec![],
        };
        let initial = MemDict::new();
        let mut work = MemDict::new();
        let mut out = MemDict::new();
        apply(&rule, "test", &initial, &mut work, &mut out).unwrap();
        assert_eq!(work.get_i64("typeOfStatisticalProcessing").unwrap(), 1);
        assert_eq!(out.get_i64("typeOfStatisticalProcessing").unwrap(), 1);
    }

    #[test]
    fn mapping_dispatches_on_value() {
        let mut value_map = IndexMap::new();
        value_map.insert(
            "8".to_owned(),
            Box::new(Rule::Write {
                write: vec![("typeOfStatisticalProcessing".to_owned(), RuleValue::Int(1))],
                write_out: vec![],
                write_work: vec![],
            }),
        );
        let rule = Rule::Mapping {
            key: "paramId".to_owned(),
            dict: DictSource::Initial,
            value_map,
            default: None,
            null_is_default: true,
            not_found_is_default: true,
        };
        let mut initial = MemDict::new();
        initial.insert("paramId", 8_i64);
        let mut work = MemDict::new();
        let mut out = MemDict::new();
        apply(&rule, "test", &initial, &mut work, &mut out).unwrap();
        assert_eq!(out.get_i64("typeOfStatisticalProcessing").unwrap(), 1);
    }

    #[test]
    fn unmapped_without_default_fails_with_trace() {
        let rule = Rule::Mapping {
            key: "paramId".to_owned(),
            dict: DictSource::Initial,
            value_map: IndexMap::new(),
            default: None,
            null_is_default: true,
            not_found_is_default: false,
        };
        let mut initial = MemDict::new();
        initial.insert("paramId", 99_i64);
        let mut work = MemDict::new();
        let mut out = MemDict::new();
        let err = apply(&rule, "test", &initial, &mut work, &mut out).unwrap_err();
        assert!(!err.trace.is_empty());
    }
}
