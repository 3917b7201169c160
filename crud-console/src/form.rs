//! Form mapper: binding sets to request payloads and records back to fields.

use crate::binding::{Binding, BindingSet, FieldKind, Transform};
use crate::error::{ConsoleError, Result};
use crate::field::{apply_writes, DomWrite, FieldAccessor, UiContext};
use crate::record::{Record, ResourceKind, Scalar};

/// Read every bound field of `set` into a payload. The key is not included.
pub fn to_payload<F: FieldAccessor + ?Sized>(ui: &F, set: &BindingSet) -> Result<Record> {
    let mut payload = Record::new();
    for binding in set.bindings {
        let raw = ui.read(binding.element)?;
        payload.insert(binding.field, coerce(binding, raw));
    }
    log::debug!(
        "built {:?} payload for {} with {} fields",
        set.context,
        set.resource.label(),
        payload.len()
    );
    Ok(payload)
}

/// Read the identifier element of `set`, rejecting an empty value.
pub fn read_key<F: FieldAccessor + ?Sized>(ui: &F, set: &BindingSet) -> Result<String> {
    let key = set
        .key
        .ok_or(ConsoleError::MissingInput("identifier binding"))?;
    let id = ui.read(key.element)?;
    let id = id.trim();
    if id.is_empty() {
        return Err(ConsoleError::MissingInput(match set.resource {
            ResourceKind::Product => "Product ID",
            ResourceKind::Pet => "Pet ID",
        }));
    }
    Ok(id.to_string())
}

fn coerce(binding: &Binding, raw: String) -> Scalar {
    match binding.kind {
        FieldKind::Text => Scalar::Text(raw),
        FieldKind::Boolean => Scalar::Bool(raw == "true"),
    }
}

fn display(binding: &Binding, value: Option<&Scalar>) -> String {
    match (binding.transform, value) {
        (_, None) => String::new(),
        (Transform::Verbatim, Some(value)) => value.to_string(),
        (Transform::LikeCount, Some(value)) => match value {
            Scalar::Bool(true) => "1".to_string(),
            Scalar::Number(n) => n.to_string(),
            Scalar::Text(s) if s == "true" => "1".to_string(),
            Scalar::Text(s) if s.parse::<i64>().is_ok() => s.clone(),
            _ => "0".to_string(),
        },
    }
}

/// Writes that show `record` in the elements of `set`. Fields the record
/// lacks are shown as empty.
pub fn record_writes(set: &BindingSet, record: &Record) -> Vec<DomWrite> {
    set.key
        .iter()
        .chain(set.bindings.iter())
        .map(|binding| {
            DomWrite::field(binding.element, display(binding, record.get(binding.field)))
        })
        .collect()
}

pub fn apply_record<U: UiContext + ?Sized>(
    ui: &mut U,
    set: &BindingSet,
    record: &Record,
) -> Result<()> {
    apply_writes(ui, &record_writes(set, record))
}

/// Writes that clear every element of every set given.
pub fn reset_writes(sets: &[&BindingSet]) -> Vec<DomWrite> {
    let mut writes: Vec<DomWrite> = Vec::new();
    for set in sets {
        for element in set.elements() {
            let write = DomWrite::field(element, "");
            if !writes.contains(&write) {
                writes.push(write);
            }
        }
    }
    writes
}

pub fn reset_bindings<U: UiContext + ?Sized>(ui: &mut U, sets: &[&BindingSet]) -> Result<()> {
    apply_writes(ui, &reset_writes(sets))
}
