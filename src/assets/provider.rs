use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::assets::decode::decode_image;
use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{MascotError, MascotResult};

/// Placeholder images are a fixed 100x100 solid fill.
pub const PLACEHOLDER_SIZE: u32 = 100;

/// Source of raw asset bytes, keyed by logical path-like names
/// (e.g. `"model/head.png"`).
pub trait AssetSource: Send {
    /// Read the full byte content for `name`, or fail (not found, I/O, ...).
    fn open(&self, name: &str) -> MascotResult<Vec<u8>>;
}

/// Filesystem-backed [`AssetSource`] rooted at a directory.
pub struct DirAssetSource {
    root: PathBuf,
}

impl DirAssetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetSource for DirAssetSource {
    fn open(&self, name: &str) -> MascotResult<Vec<u8>> {
        let norm = normalize_rel_path(name)?;
        let p = self.root.join(Path::new(&norm));
        std::fs::read(&p)
            .map_err(|e| MascotError::asset(format!("failed to read asset '{}': {e}", p.display())))
    }
}

/// In-memory [`AssetSource`] for tests and asset-less demos.
#[derive(Default)]
pub struct MemAssetSource {
    entries: HashMap<String, Vec<u8>>,
}

impl MemAssetSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bytes` under `name`, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.entries.insert(name.into(), bytes);
    }
}

impl AssetSource for MemAssetSource {
    fn open(&self, name: &str) -> MascotResult<Vec<u8>> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| MascotError::asset(format!("no such asset '{name}'")))
    }
}

/// Normalize and validate source-relative asset paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and
/// rejects absolute paths or parent traversals (`..`).
pub(crate) fn normalize_rel_path(source: &str) -> MascotResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(MascotError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(MascotError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(MascotError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(MascotError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

/// Resolved raster part in premultiplied RGBA8 form.
///
/// Clones share the same pixel allocation; two handles for the same logical
/// name compare pointer-equal on `rgba8_premul`.
#[derive(Clone, Debug)]
pub struct PartImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
    /// True when this image is a synthesized solid-color placeholder.
    pub placeholder: bool,
}

/// Memoizing resolver from logical part names to [`PartImage`] handles.
///
/// The first `resolve` for a name decodes from the backing source; on any
/// failure it synthesizes a solid-color placeholder instead. Either way the
/// result is cached under the name, so a given name resolves to the same
/// handle for the provider's lifetime — failures are not retried.
pub struct ImageProvider {
    source: Box<dyn AssetSource>,
    cache: HashMap<String, PartImage>,
}

impl ImageProvider {
    pub fn new(source: Box<dyn AssetSource>) -> Self {
        Self {
            source,
            cache: HashMap::new(),
        }
    }

    /// Resolve `name` to an image handle, falling back to a `fallback`-colored
    /// placeholder on any load or decode failure.
    pub fn resolve(&mut self, name: &str, fallback: Rgba8Premul) -> PartImage {
        if let Some(img) = self.cache.get(name) {
            return img.clone();
        }

        let img = match self.try_load(name) {
            Ok(img) => {
                debug!(name, width = img.width, height = img.height, "loaded part image");
                img
            }
            Err(e) => {
                warn!(name, error = %e, "failed to load part image; using placeholder");
                placeholder_image(fallback)
            }
        };

        self.cache.insert(name.to_owned(), img.clone());
        img
    }

    /// Return the cached entry for `name`, if any, without triggering a load.
    pub fn peek(&self, name: &str) -> Option<PartImage> {
        self.cache.get(name).cloned()
    }

    fn try_load(&self, name: &str) -> MascotResult<PartImage> {
        let bytes = self.source.open(name)?;
        let decoded = decode_image(&bytes)?;
        Ok(PartImage {
            width: decoded.width,
            height: decoded.height,
            rgba8_premul: Arc::new(decoded.rgba8_premul),
            placeholder: false,
        })
    }
}

fn placeholder_image(color: Rgba8Premul) -> PartImage {
    let px = [color.r, color.g, color.b, color.a];
    let n = (PLACEHOLDER_SIZE as usize) * (PLACEHOLDER_SIZE as usize);
    let mut data = Vec::with_capacity(n * 4);
    for _ in 0..n {
        data.extend_from_slice(&px);
    }
    PartImage {
        width: PLACEHOLDER_SIZE,
        height: PLACEHOLDER_SIZE,
        rgba8_premul: Arc::new(data),
        placeholder: true,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/provider.rs"]
mod tests;
