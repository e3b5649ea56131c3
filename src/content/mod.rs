// src/content/mod.rs

pub mod dispatch;
pub mod draft;
pub mod loader;
pub mod materials;
pub mod normalize;
pub mod source;
pub mod submissions;
pub mod visibility;

pub use loader::{ContentLoader, LoadedContent};
pub use source::{ApiContentSource, ContentSource, LoadScope};
