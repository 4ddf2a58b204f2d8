pub mod font;
pub mod generic;
pub mod metrics;
pub mod minify;
pub mod resolve;

pub use font::{FontFaceData, FontSource, FontWeight};
pub use generic::GenericFamily;
pub use metrics::FontMetrics;
pub use minify::{Charset, MinifyConfig};
pub use resolve::{ResolveOptions, ResolvedFontFamily};
