//! GRI Sustainability Assessment Engine
//!
//! Schema-driven form and report engine for GRI Standards disclosures.
//! One static disclosure registry drives validation, default values, form
//! rendering, completion percentages, the live report preview and the
//! paginated export.
//!
//! Layout:
//! - `registry/`: disclosure, section and topic-group tables
//! - `form_state`: the form value tree, field paths, the filled predicate
//! - `schema/`: validator and default tree built from the registry
//! - `store/`: form state store, storage backends, debounced persistence
//! - `renderer/`: section views, sidebar navigator, navigation
//! - `completion`: per-section completion percentages
//! - `report/`: preview, export and their formatters
//! - `frameworks`: framework catalog and route resolution
//! - `api_server` (feature `api`): HTTP surface

pub mod completion;
pub mod config;
pub mod error;
pub mod form_state;
pub mod frameworks;
pub mod registry;
pub mod renderer;
pub mod report;
pub mod schema;
pub mod store;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use completion::{compute_completion, section_completion};
pub use config::ServerConfig;
pub use error::{StorageError, StoreError};
pub use form_state::{is_filled, FieldPath, FieldValue, FormState};
pub use registry::{code_to_field_key, DisclosureDefinition, FieldType, Registry, SectionMeta, TopicStandardGroup};
pub use renderer::{render_section, Navigator, SectionView, ValidationStatus};
pub use report::{build_export, build_preview, prepare_export, ExportDocument, ReportPreview};
pub use schema::{build_schema, Schema, ValidationError, ValidationErrorKind};
pub use store::{spawn_persister, FileStorage, FormStore, MemoryStorage, Persister, Storage};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
