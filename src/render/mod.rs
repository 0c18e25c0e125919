//! Output formats, one `Renderer` per artifact.

pub mod json;
pub mod markdown;
pub mod stub;

use crate::model::NamespaceGroup;

/// Trait for rendering the merged namespace groups into one artifact.
pub trait Renderer {
    fn render(&self, groups: &[NamespaceGroup]) -> String;
    fn file_name(&self) -> &str;
}

/// Every artifact produced by a run, in write order.
pub fn renderers() -> Vec<Box<dyn Renderer>> {
    vec![
        Box::new(json::JsonRenderer),
        Box::new(markdown::MarkdownRenderer),
        Box::new(stub::StubRenderer),
    ]
}
