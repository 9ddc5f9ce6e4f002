pub mod cache;
pub mod diagnostics;
pub mod io;
pub mod markup;
pub mod models;
pub mod parsing;
pub mod registry;
pub mod render;

// Re-export key types for easier usage
pub use cache::{MemoryOutlineCache, OutlineCache};
pub use diagnostics::Advisory;
pub use models::{book::*, outline::*};
pub use parsing::{ContentError, Reconstruction, ReconstructOptions, reconstruct};
pub use registry::{TagDefinition, TagRegistry};
pub use render::{
    RenderOptions, RenderedBody, RenderedChapter, RenderedSection, RenderedVerse,
    UnderscorePolicy, render_chapter,
};
