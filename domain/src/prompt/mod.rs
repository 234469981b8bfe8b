//! Role prompt templates

pub mod template;

pub use template::PromptTemplate;
