//! Composition root
//!
//! ```text
//! AppConfig → provider_resolvers → linkme registries → Arc<dyn Port>
//!                                                         ↓
//!                                  AppContext (use cases over shared ports)
//! ```

pub mod bootstrap;
pub mod provider_resolvers;

pub use bootstrap::{AppContext, init_app};
pub use provider_resolvers::{
    AvailableProviders, list_available_providers, resolve_document_source, resolve_model_loader,
    resolve_vector_store,
};
