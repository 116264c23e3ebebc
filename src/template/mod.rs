//! Templates: discovery, loading and flattening into leaf paths.

mod flatten;
mod source;

pub use flatten::{flatten, FlatTemplate};
pub use source::{
    discover_templates, is_glob_pattern, load_template, load_templates, parse_template_file_name,
    TemplateSource, TEMPLATE_EXTENSION,
};
