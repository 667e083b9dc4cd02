//! Structural validation of generated architectures
//!
//! The model's JSON is checked field by field against the architecture
//! shape before it is typed, so a failure names the first offending field
//! instead of surfacing a generic deserialization message.

use super::{Architecture, ArchitectureResult, Component};
use crate::error::PipelineError;
use serde_json::{Map, Value};
use std::ops::RangeInclusive;
use tracing::warn;

/// Component count the generation prompt asks for
pub const EXPECTED_COMPONENTS: RangeInclusive<usize> = 5..=8;

/// Parse sanitized model output into an [`ArchitectureResult`]
pub fn validate(text: &str) -> Result<ArchitectureResult, PipelineError> {
    let value: Value = serde_json::from_str(text).map_err(|e| PipelineError::malformed(&e, text))?;

    let root = value
        .as_object()
        .ok_or_else(|| PipelineError::schema("architecture", "must be inside a JSON object"))?;

    let arch = object(root, "architecture", "architecture")?;
    let overview = string(arch, "overview", "architecture.overview")?;
    let components = components(arch)?;
    let patterns = strings(arch, "patterns", "architecture.patterns")?;
    let reasoning = string(arch, "reasoning", "architecture.reasoning")?;
    let recommendations = strings(root, "recommendations", "recommendations")?;
    let tradeoffs = strings(root, "tradeoffs", "tradeoffs")?;

    if !EXPECTED_COMPONENTS.contains(&components.len()) {
        warn!(
            components = components.len(),
            "Generated architecture has {} components, expected {} to {}",
            components.len(),
            EXPECTED_COMPONENTS.start(),
            EXPECTED_COMPONENTS.end()
        );
    }

    Ok(ArchitectureResult {
        architecture: Architecture { overview, components, patterns, reasoning },
        recommendations,
        tradeoffs,
    })
}

fn components(arch: &Map<String, Value>) -> Result<Vec<Component>, PipelineError> {
    let items = non_empty_array(arch, "components", "architecture.components")?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| -> Result<Component, PipelineError> {
            let path = format!("architecture.components[{i}]");
            let fields = item
                .as_object()
                .ok_or_else(|| PipelineError::schema(path.clone(), "must be an object"))?;
            Ok(Component {
                name: string(fields, "name", &format!("{path}.name"))?,
                description: string(fields, "description", &format!("{path}.description"))?,
                technology: string(fields, "technology", &format!("{path}.technology"))?,
                reasoning: string(fields, "reasoning", &format!("{path}.reasoning"))?,
            })
        })
        .collect()
}

fn field<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<&'a Value, PipelineError> {
    match map.get(key) {
        None | Some(Value::Null) => Err(PipelineError::schema(path, "is missing")),
        Some(value) => Ok(value),
    }
}

fn object<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<&'a Map<String, Value>, PipelineError> {
    field(map, key, path)?
        .as_object()
        .ok_or_else(|| PipelineError::schema(path, "must be an object"))
}

fn string(map: &Map<String, Value>, key: &str, path: &str) -> Result<String, PipelineError> {
    let text = field(map, key, path)?
        .as_str()
        .ok_or_else(|| PipelineError::schema(path, "must be a string"))?;
    if text.trim().is_empty() {
        return Err(PipelineError::schema(path, "must not be empty"));
    }
    Ok(text.to_string())
}

fn non_empty_array<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<&'a Vec<Value>, PipelineError> {
    let items = field(map, key, path)?
        .as_array()
        .ok_or_else(|| PipelineError::schema(path, "must be an array"))?;
    if items.is_empty() {
        return Err(PipelineError::schema(path, "must not be empty"));
    }
    Ok(items)
}

fn strings(map: &Map<String, Value>, key: &str, path: &str) -> Result<Vec<String>, PipelineError> {
    non_empty_array(map, key, path)?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let item_path = format!("{path}[{i}]");
            match item.as_str() {
                Some(s) if !s.trim().is_empty() => Ok(s.to_string()),
                Some(_) => Err(PipelineError::schema(item_path, "must not be empty")),
                None => Err(PipelineError::schema(item_path, "must be a string")),
            }
        })
        .collect()
}
