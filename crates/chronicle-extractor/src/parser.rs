//! Parse the source JSON document into chunks

use crate::error::LoadError;
use crate::types::{
    ActorField, EventSource, SourceChunk, SourceEntry, TestimonySource, ViolationSource,
};
use serde_json::{Map, Value};
use tracing::warn;

/// Key under which the nested lists live in the source corpus
const MODEL_OUTPUT_KEY: &str = "model_output";

/// Parse a JSON document into source chunks
///
/// The top level must be an array of objects. Everything below a chunk is
/// tolerant: missing or wrongly-typed fields become `None` or empty.
pub fn parse_document(json: &str) -> Result<Vec<SourceChunk>, LoadError> {
    let value: Value = serde_json::from_str(json)?;
    parse_value(&value)
}

/// Parse an already-decoded JSON value into source chunks
pub fn parse_value(value: &Value) -> Result<Vec<SourceChunk>, LoadError> {
    let items = value
        .as_array()
        .ok_or_else(|| LoadError::InvalidFormat("Expected a JSON array of chunks".to_string()))?;

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let obj = item.as_object().ok_or_else(|| {
                LoadError::InvalidFormat(format!("Chunk {} is not a JSON object", idx))
            })?;
            Ok(parse_chunk(obj))
        })
        .collect()
}

/// Parse a single chunk object
fn parse_chunk(obj: &Map<String, Value>) -> SourceChunk {
    let chunk_id = text_field(obj, "chunk_id");

    // Nested lists normally sit under `model_output`; fall back to the chunk itself.
    let body = match obj.get(MODEL_OUTPUT_KEY).and_then(Value::as_object) {
        Some(model_output) => model_output,
        None => obj,
    };

    let mut entries = Vec::new();
    for item in entry_objects(body, "events", chunk_id.as_deref()) {
        entries.push(SourceEntry::Event(EventSource {
            date: date_field(item),
            label: text_field(item, "label"),
            description: text_field(item, "description"),
            actors: event_actors(item.get("actors")),
        }));
    }
    for item in entry_objects(body, "testimonies", chunk_id.as_deref()) {
        entries.push(SourceEntry::Testimony(TestimonySource {
            date: date_field(item),
            witness: text_field(item, "witness"),
            excerpt: text_field(item, "excerpt"),
            location: text_field(item, "location"),
        }));
    }
    for item in entry_objects(body, "violations", chunk_id.as_deref()) {
        entries.push(SourceEntry::Violation(ViolationSource {
            date: date_field(item),
            label: text_field(item, "label"),
            description: text_field(item, "description"),
            actors: actor_field(item.get("actors")),
            party: actor_field(item.get("party")),
        }));
    }

    SourceChunk {
        chunk_id,
        page: page_field(obj.get("page")),
        part_title: text_field(obj, "part_title"),
        chapter_title: text_field(obj, "chapter_title"),
        section_title: text_field(obj, "section_title"),
        entries,
    }
}

/// Object entries of a nested list, skipping anything that is not an object
fn entry_objects<'a>(
    body: &'a Map<String, Value>,
    key: &'a str,
    chunk_id: Option<&'a str>,
) -> impl Iterator<Item = &'a Map<String, Value>> + 'a {
    body.get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .enumerate()
        .filter_map(move |(idx, item)| {
            let obj = item.as_object();
            if obj.is_none() {
                warn!(
                    "Ignoring {} entry {} in chunk {}: not a JSON object",
                    key,
                    idx,
                    chunk_id.unwrap_or("<unknown>")
                );
            }
            obj
        })
}

/// Read a scalar as text; numbers and booleans are stringified
fn text_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Read the entry date, treating an empty string like a missing one
fn date_field(obj: &Map<String, Value>) -> Option<String> {
    text_field(obj, "date").filter(|date| !date.trim().is_empty())
}

/// Read a page number from an integer or numeric string
fn page_field(value: Option<&Value>) -> Option<u32> {
    match value? {
        Value::Number(n) => n.as_u64().and_then(|page| u32::try_from(page).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Read a list of names, dropping non-string items
fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Read event actors; a plain string counts as a single name
fn event_actors(value: Option<&Value>) -> Vec<String> {
    match actor_field(value) {
        Some(ActorField::List(names)) => names,
        Some(ActorField::Text(text)) if !text.trim().is_empty() => vec![text],
        Some(ActorField::Text(_)) => Vec::new(),
        None => {
            if let Some(other) = value.filter(|v| !v.is_null()) {
                warn!("Ignoring event actors of unexpected type: {}", other);
            }
            Vec::new()
        }
    }
}

/// Read an actor value stored as either a list or a string
fn actor_field(value: Option<&Value>) -> Option<ActorField> {
    match value? {
        Value::Array(_) => Some(ActorField::List(string_list(value))),
        Value::String(s) => Some(ActorField::Text(s.clone())),
        _ => None,
    }
}
