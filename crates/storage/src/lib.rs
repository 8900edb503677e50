#![warn(clippy::pedantic)]

mod memory;
mod template_doc;

pub use memory::InMemoryStorage;
pub use template_doc::{TemplateError, parse_template, starter_template};
