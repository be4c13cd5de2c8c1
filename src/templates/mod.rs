//! Template library: reusable action sets by creature archetype.

mod builtin;
pub mod library;

pub use library::{
    ActionTemplate, RechargeSeed, TemplateCategory, TemplateExport, TemplateLibrary,
    EXPORT_VERSION,
};
