//! `scan_type` enum extraction from OpenAPI and Swagger documents

use serde_json::Value;

/// Schema holding the import endpoint's request fields
const IMPORT_REQUEST_SCHEMA: &str = "ImportScanRequest";

/// Extract the valid `scan_type` labels from an OpenAPI 3 or Swagger 2 document.
///
/// The well-known locations are checked first; otherwise the document is
/// crawled for any `ImportScanRequest` schema carrying the enum. Returns an
/// empty list when nothing is found. Non-string entries are skipped and
/// duplicates dropped, preserving first occurrence order.
pub fn scan_type_enum(doc: &Value) -> Vec<String> {
    let known = [
        doc.pointer("/components/schemas/ImportScanRequest"),
        doc.pointer("/definitions/ImportScanRequest"),
    ];

    let found = known
        .into_iter()
        .flatten()
        .find_map(|schema| enum_of(doc, schema))
        .or_else(|| crawl(doc));

    found.map(|values| dedup_strings(values)).unwrap_or_default()
}

/// `properties.scan_type.enum` of a request schema, if present.
///
/// The property may point at a shared enum schema through a local `$ref`,
/// either directly or from inside an `allOf`.
fn enum_of<'a>(doc: &'a Value, schema: &'a Value) -> Option<&'a Vec<Value>> {
    let property = schema.get("properties")?.get("scan_type")?;
    let property = resolve(doc, property)?;
    property.get("enum")?.as_array()
}

/// Follow local `$ref`s, giving up after a few hops.
fn resolve<'a>(doc: &'a Value, mut node: &'a Value) -> Option<&'a Value> {
    for _ in 0..8 {
        if node.get("enum").is_some() {
            return Some(node);
        }
        let target = match (node.get("$ref"), node.get("allOf")) {
            (Some(reference), _) => reference.as_str()?,
            (None, Some(Value::Array(parts))) => parts
                .iter()
                .find_map(|part| part.get("$ref").and_then(Value::as_str))?,
            _ => return Some(node),
        };
        node = doc.pointer(target.strip_prefix('#')?)?;
    }
    None
}

fn crawl(doc: &Value) -> Option<&Vec<Value>> {
    let mut stack = vec![doc];

    while let Some(node) = stack.pop() {
        match node {
            Value::Object(map) => {
                let found = map
                    .get(IMPORT_REQUEST_SCHEMA)
                    .and_then(|schema| enum_of(doc, schema));
                if let Some(values) = found {
                    return Some(values);
                }
                stack.extend(map.values());
            }
            Value::Array(items) => stack.extend(items),
            _ => {}
        }
    }

    None
}

fn dedup_strings(values: &[Value]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for label in values.iter().filter_map(Value::as_str) {
        if !out.iter().any(|seen| seen == label) {
            out.push(label.to_string());
        }
    }
    out
}
