mod body;
mod escape;
mod options;
mod parser;
mod registry;
mod render;
mod scanner;
mod tag;
mod transform;

pub use body::{Body, Piece};
pub use escape::escape;
pub use options::{DEFAULT_MAX_DEPTH, TransformOptions};
pub use registry::TagRegistry;
pub use render::{ITEM_MARKER, NEUTRAL_HREF};
pub use scanner::{ParamGrammar, Scanner, TagMatch};
pub use tag::{BodyMode, Layout, RenderFn, RenderInput, TagDescriptor};
pub use transform::{Transformed, Transformer, suggest_close, transform};
