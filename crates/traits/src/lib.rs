pub mod minify;
pub mod preload;
pub mod resolver;

pub use minify::{CssMinifier, MinifyError, PassthroughMinifier};
pub use preload::{NoPreload, PreloadPolicy};
pub use resolver::{FontResolver, InMemoryFontResolver, ResolveError};
