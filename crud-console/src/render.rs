//! Result renderer: outcomes to document writes.

use crate::binding::BindingSet;
use crate::config::Messages;
use crate::field::DomWrite;
use crate::form;
use crate::outcome::Failure;
use crate::record::{Record, ResourceKind};

#[derive(Debug, Clone, Default)]
pub struct ResultRenderer {
    messages: Messages,
}

impl ResultRenderer {
    pub fn new(messages: Messages) -> Self {
        Self { messages }
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    pub fn render_record(&self, set: &BindingSet, record: &Record) -> Vec<DomWrite> {
        form::record_writes(set, record)
    }

    /// Replace the results container with one table row per record. Rows are
    /// keyed by position (`row_0`, `row_1`, ...), not by record id.
    pub fn render_collection(&self, kind: ResourceKind, records: &[Record]) -> DomWrite {
        let columns = kind.columns();

        let mut table = String::from(r#"<table class="table table-striped" cellpadding="10">"#);
        table.push_str("<thead><tr>");
        for column in columns {
            table.push_str(&format!(r#"<th class="col-md-2">{}</th>"#, column.header));
        }
        table.push_str("</tr></thead><tbody>");

        for (i, record) in records.iter().enumerate() {
            table.push_str(&format!(r#"<tr id="row_{}">"#, i));
            for column in columns {
                let cell = record
                    .get(column.field)
                    .map(|value| value.to_string())
                    .unwrap_or_default();
                table.push_str(&format!("<td>{}</td>", html_escape::encode_text(&cell)));
            }
            table.push_str("</tr>");
        }

        table.push_str("</tbody></table>");
        DomWrite::Results(table)
    }

    pub fn render_message(&self, text: &str) -> DomWrite {
        DomWrite::Flash(text.to_string())
    }

    /// The backend's message verbatim, or the configured fallback.
    pub fn failure_message(&self, failure: &Failure) -> String {
        match &failure.message {
            Some(message) => message.clone(),
            None => self.messages.server_error.clone(),
        }
    }

    pub fn render_failure(&self, failure: &Failure) -> DomWrite {
        self.render_message(&self.failure_message(failure))
    }
}
