pub mod actions;
pub mod effect;
pub mod manager;


pub use actions::ConsoleAction;
pub use effect::{plan, settle, Effect};
pub use manager::{ConsoleManager, Phase};

// Re-export for convenience
pub mod prelude {
    pub use super::actions::ConsoleAction;
    pub use super::manager::{ConsoleManager, Phase};
    pub use crate::field::{FieldAccessor, InMemoryUi, UiContext};
    pub use crate::http_client::{Dispatcher, HttpClient};
    pub use crate::query::ListScope;
}
