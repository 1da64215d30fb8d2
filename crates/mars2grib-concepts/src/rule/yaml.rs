//! YAML parsing for the rule engine (§4.6, §6 "Rule files").
//!
//! The schema is closed: a rule node is a mapping node (`key`, `dict`,
//! `value-map`, `default`, `null-is-default`, `not-found-is-default`), a
//! write node (`write`/`write-out`/`write-work`), or a failure node (`fail`).
//! Any other key at the top of a node, or a node with keys from more than
//! one of those three groups, is an error.

use indexmap::IndexMap;
use serde_yaml::Value as Yaml;

use super::{DictSource, Rule, RuleValue};
use crate::error::{DeductionCause, DeductionError};

const MAPPING_KEYS: &[&str] = &["key", "dict", "value-map", "default", "null-is-default", "not-found-is-default"];
const WRITE_KEYS: &[&str] = &["write", "write-out", "write-work"];
const FAILURE_KEYS: &[&str] = &["fail"];

pub fn parse_str(source: &str) -> Result<Rule, DeductionError> {
    let doc: Yaml = serde_yaml::from_str(source)
        .map_err(|e| DeductionError::new("rule-file", DeductionCause::Message(e.to_string())))?;
    parse_node(&doc)
}

fn parse_node(node: &Yaml) -> Result<Rule, DeductionError> {
    let map = node.as_mapping().ok_or_else(|| {
        DeductionError::new(
            "rule-file",
            DeductionCause::Message("rule node is not a YAML mapping".to_owned()),
        )
    })?;

    let keys: Vec<&str> = map.keys().filter_map(|k| k.as_str()).collect();

    let is_failure = keys.iter().any(|k| FAILURE_KEYS.contains(k));
    let is_write = keys.iter().any(|k| WRITE_KEYS.contains(k));
    let is_mapping = keys.iter().any(|k| k == &"key");

    match (is_failure, is_write, is_mapping) {
        (true, false, false) => parse_failure(map),
        (false, true, false) => parse_write(map),
        (false, false, true) => parse_mapping(map),
        _ => Err(DeductionError::new(
            "rule-file",
            DeductionCause::Message(format!("rule node mixes action kinds: keys {keys:?}")),
        )),
    }
}

fn unknown_key_check(map: &serde_yaml::Mapping, allowed: &[&str]) -> Result<(), DeductionError> {
    for k in map.keys() {
        let Some(k) = k.as_str() else {
            return Err(DeductionError::new(
                "rule-file",
                DeductionCause::Message("rule node has a non-string key".to_owned()),
            ));
        };
        if !allowed.contains(&k) {
            return Err(DeductionError::new(
                "rule-file",
                DeductionCause::Message(format!("unknown rule key '{k}'")),
            ));
        }
    }
    Ok(())
}

fn parse_failure(map: &serde_yaml::Mapping) -> Result<Rule, DeductionError> {
    unknown_key_check(map, FAILURE_KEYS)?;
    let message = map
        .get("fail")
        .and_then(|v| v.as_str())
        .ok_or_else(|| DeductionError::new("rule-file", DeductionCause::Message("'fail' must be a string".to_owned())))?
        .to_owned();
    Ok(Rule::Failure { message })
}

fn parse_scalar_map(node: &Yaml) -> Result<Vec<(String, RuleValue)>, DeductionError> {
    let Some(map) = node.as_mapping() else {
        return Err(DeductionError::new(
            "rule-file",
            DeductionCause::Message("write bucket must be a mapping of key to scalar".to_owned()),
        ));
    };
    let mut out = Vec::with_capacity(map.len());
    for (k, v) in map {
        let key = k
            .as_str()
            .ok_or_else(|| DeductionError::new("rule-file", DeductionCause::Message("write key must be a string".to_owned())))?
            .to_owned();
        let value = if let Some(i) = v.as_i64() {
            RuleValue::Int(i)
        } else if let Some(f) = v.as_f64() {
            RuleValue::Double(f)
        } else if let Some(s) = v.as_str() {
            RuleValue::Str(s.to_owned())
        } else {
            return Err(DeductionError::new(
                "rule-file",
                DeductionCause::Message(format!("write value for '{key}' is not a scalar")),
            ));
        };
        out.push((key, value));
    }
    Ok(out)
}

fn parse_write(map: &serde_yaml::Mapping) -> Result<Rule, DeductionError> {
    unknown_key_check(map, WRITE_KEYS)?;
    let write = match map.get("write") {
        Some(v) => parse_scalar_map(v)?,
        None => Vec::new(),
    };
    let write_out = match map.get("write-out") {
        Some(v) => parse_scalar_map(v)?,
        None => Vec::new(),
    };
    let write_work = match map.get("write-work") {
        Some(v) => parse_scalar_map(v)?,
        None => Vec::new(),
    };
    Ok(Rule::Write {
        write,
        write_out,
        write_work,
    })
}

fn parse_mapping(map: &serde_yaml::Mapping) -> Result<Rule, DeductionError> {
    unknown_key_check(map, MAPPING_KEYS)?;

    let key = map
        .get("key")
        .and_then(|v| v.as_str())
        .ok_or_else(|| DeductionError::new("rule-file", DeductionCause::Message("'key' must be a string".to_owned())))?
        .to_owned();

    let dict = match map.get("dict").and_then(|v| v.as_str()) {
        Some("initial") => DictSource::Initial,
        Some("work") | None => DictSource::Work,
        Some(other) => {
            return Err(DeductionError::new(
                "rule-file",
                DeductionCause::Message(format!("unknown dict source '{other}'")),
            ))
        }
    };

    let mut value_map = IndexMap::new();
    if let Some(vm) = map.get("value-map") {
        let vm = vm.as_mapping().ok_or_else(|| {
            DeductionError::new("rule-file", DeductionCause::Message("'value-map' must be a mapping".to_owned()))
        })?;
        for (k, v) in vm {
            let k = scalar_key_to_string(k)?;
            value_map.insert(k, Box::new(parse_node(v)?));
        }
    }

    let default = match map.get("default") {
        Some(v) => Some(Box::new(parse_node(v)?)),
        None => None,
    };

    let null_is_default = map.get("null-is-default").and_then(|v| v.as_bool()).unwrap_or(true);
    let not_found_is_default = map.get("not-found-is-default").and_then(|v| v.as_bool()).unwrap_or(true);

    Ok(Rule::Mapping {
        key,
        dict,
        value_map,
        default,
        null_is_default,
        not_found_is_default,
    })
}

fn scalar_key_to_string(k: &Yaml) -> Result<String, DeductionError> {
    if let Some(s) = k.as_str() {
        Ok(s.to_owned())
    } else if let Some(i) = k.as_i64() {
        Ok(i.to_string())
    } else {
        Err(DeductionError::new(
            "rule-file",
            DeductionCause::Message("value-map key must be a string or integer".to_owned()),
        ))
    }
}
