//! Field accessor contract and the in-memory document used by the CLI and tests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::binding;
use crate::error::{ConsoleError, Result};

/// Reads and writes single named UI fields.
///
/// A missing element is always reported as [`ConsoleError::ElementNotFound`];
/// implementations never silently ignore an unknown id.
pub trait FieldAccessor {
    fn read(&self, element: &str) -> Result<String>;

    fn write(&mut self, element: &str, value: &str) -> Result<()>;

    fn clear(&mut self, element: &str) -> Result<()> {
        self.write(element, "")
    }
}

/// The whole document a handler may touch: bound fields, the shared flash
/// area and the results container.
pub trait UiContext: FieldAccessor {
    fn flash(&self) -> &str;

    fn set_flash(&mut self, message: &str);

    fn results(&self) -> &str;

    fn set_results(&mut self, html: &str);
}

/// Description of one document mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomWrite {
    Field { element: &'static str, value: String },
    /// Replaces the flash area's content.
    Flash(String),
    /// Replaces the results container's content.
    Results(String),
}

impl DomWrite {
    pub fn field(element: &'static str, value: impl Into<String>) -> Self {
        DomWrite::Field {
            element,
            value: value.into(),
        }
    }

    pub fn clear_flash() -> Self {
        DomWrite::Flash(String::new())
    }
}

/// Apply writes in order, stopping at the first missing element.
pub fn apply_writes<U: UiContext + ?Sized>(ui: &mut U, writes: &[DomWrite]) -> Result<()> {
    for write in writes {
        match write {
            DomWrite::Field { element, value } => ui.write(element, value)?,
            DomWrite::Flash(message) => ui.set_flash(message),
            DomWrite::Results(html) => ui.set_results(html),
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InMemoryUi {
    fields: BTreeMap<String, String>,
    #[serde(default)]
    flash: String,
    #[serde(default)]
    results: String,
}

impl InMemoryUi {
    /// An empty document with no registered elements.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_elements<I, S>(elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields = elements
            .into_iter()
            .map(|e| (e.into(), String::new()))
            .collect();
        Self {
            fields,
            ..Self::default()
        }
    }

    /// A document holding every element the console binds.
    pub fn console() -> Self {
        Self::with_elements(binding::all_elements())
    }

    /// Builder-style write for setting up a document.
    pub fn set(mut self, element: &str, value: &str) -> Result<Self> {
        self.write(element, value)?;
        Ok(self)
    }

    pub fn has_element(&self, element: &str) -> bool {
        self.fields.contains_key(element)
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// Copy values for elements this document knows; unknown ids are
    /// returned so the caller can report them.
    pub fn merge_known(&mut self, values: &BTreeMap<String, String>) -> Vec<String> {
        let mut unknown = Vec::new();
        for (element, value) in values {
            match self.fields.get_mut(element) {
                Some(slot) => *slot = value.clone(),
                None => unknown.push(element.clone()),
            }
        }
        unknown
    }
}

impl FieldAccessor for InMemoryUi {
    fn read(&self, element: &str) -> Result<String> {
        self.fields
            .get(element)
            .cloned()
            .ok_or_else(|| ConsoleError::ElementNotFound(element.to_string()))
    }

    fn write(&mut self, element: &str, value: &str) -> Result<()> {
        match self.fields.get_mut(element) {
            Some(slot) => {
                *slot = value.to_string();
                Ok(())
            }
            None => Err(ConsoleError::ElementNotFound(element.to_string())),
        }
    }
}

impl UiContext for InMemoryUi {
    fn flash(&self) -> &str {
        &self.flash
    }

    fn set_flash(&mut self, message: &str) {
        self.flash = message.to_string();
    }

    fn results(&self) -> &str {
        &self.results
    }

    fn set_results(&mut self, html: &str) {
        self.results = html.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_element_is_an_error_on_every_path() {
        let mut ui = InMemoryUi::with_elements(["a"]);
        assert_eq!(
            ui.read("b"),
            Err(ConsoleError::ElementNotFound("b".to_string()))
        );
        assert!(ui.write("b", "x").is_err());
        assert!(ui.clear("b").is_err());
    }

    #[test]
    fn test_clear_writes_empty_string() {
        let mut ui = InMemoryUi::with_elements(["a"]).set("a", "value").unwrap();
        ui.clear("a").unwrap();
        assert_eq!(ui.read("a").unwrap(), "");
    }

    #[test]
    fn test_apply_writes_in_order() {
        let mut ui = InMemoryUi::with_elements(["a"]);
        apply_writes(
            &mut ui,
            &[
                DomWrite::Flash("old".to_string()),
                DomWrite::field("a", "1"),
                DomWrite::clear_flash(),
                DomWrite::Results("<table></table>".to_string()),
            ],
        )
        .unwrap();

        assert_eq!(ui.read("a").unwrap(), "1");
        assert_eq!(ui.flash(), "");
        assert_eq!(ui.results(), "<table></table>");
    }

    #[test]
    fn test_apply_writes_stops_at_missing_element() {
        let mut ui = InMemoryUi::with_elements(["a"]);
        let result = apply_writes(
            &mut ui,
            &[DomWrite::field("missing", "x"), DomWrite::field("a", "1")],
        );
        assert!(result.is_err());
        assert_eq!(ui.read("a").unwrap(), "");
    }

    #[test]
    fn test_console_document_registers_bound_elements() {
        let ui = InMemoryUi::console();
        assert!(ui.has_element("product_name_for_create"));
        assert!(ui.has_element("pet_available"));
        assert!(!ui.has_element("flash_message"));
    }

    #[test]
    fn test_merge_known_reports_unknown_ids() {
        let mut ui = InMemoryUi::with_elements(["a"]);
        let mut values = BTreeMap::new();
        values.insert("a".to_string(), "1".to_string());
        values.insert("z".to_string(), "2".to_string());

        let unknown = ui.merge_known(&values);
        assert_eq!(unknown, vec!["z".to_string()]);
        assert_eq!(ui.read("a").unwrap(), "1");
    }
}
