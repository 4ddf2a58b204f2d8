use fontless_types::FontFaceData;

/// Decides whether a resolved font should be preloaded.
///
/// Evaluated once per candidate declaration against the family's first
/// resolved face.
pub trait PreloadPolicy: Send + Sync {
    fn should_preload(&self, family: &str, face: &FontFaceData) -> bool;
}

impl<F> PreloadPolicy for F
where
    F: Fn(&str, &FontFaceData) -> bool + Send + Sync,
{
    fn should_preload(&self, family: &str, face: &FontFaceData) -> bool {
        self(family, face)
    }
}

/// Never preloads anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPreload;

impl PreloadPolicy for NoPreload {
    fn should_preload(&self, _family: &str, _face: &FontFaceData) -> bool {
        false
    }
}
