//! Request/response mapping layer for the products and pets REST console.
//!
//! UI fields are read through a [`field::FieldAccessor`], turned into
//! requests by [`console::plan`], sent by a [`http_client::Dispatcher`] and
//! rendered back into the document by [`console::settle`].

pub mod binding;
pub mod config;
pub mod console;
pub mod error;
pub mod field;
pub mod form;
pub mod http_client;
pub mod outcome;
pub mod query;
pub mod record;
pub mod render;

pub use config::{Config, Messages};
pub use console::{prelude, ConsoleAction, ConsoleManager, Phase};
pub use error::{ConsoleError, Result};
pub use field::{DomWrite, FieldAccessor, InMemoryUi, UiContext};
pub use http_client::{Dispatcher, HttpClient, Method, Request};
pub use outcome::{Expect, Failure, FailureCause, Outcome, Payload};
pub use query::{Filter, ListScope};
pub use record::{Record, ResourceKind, Scalar};
pub use render::ResultRenderer;
