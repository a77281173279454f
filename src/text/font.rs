use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use sha2::Digest as _;

use crate::foundation::math::Fnv1a64;

/// A font file held in memory. Every [`Font`] size derived from it shares the same bytes.
pub struct FontFile {
    path: PathBuf,
    bytes: Arc<Vec<u8>>,
    index: u32,
    id: u64,
    cpu_font: vello_cpu::peniko::FontData,
}

impl FontFile {
    pub fn new(path: impl Into<PathBuf>, bytes: Vec<u8>, index: u32) -> Self {
        let path = path.into();
        let mut hasher = Fnv1a64::new_default();
        hasher.write_bytes(path.to_string_lossy().as_bytes());
        hasher.write_u8(0);
        hasher.write_u64(bytes.len() as u64);
        hasher.write_u64(u64::from(index));

        let cpu_font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(bytes.clone()),
            index,
        );
        Self {
            path,
            bytes: Arc::new(bytes),
            index,
            id: hasher.finish(),
            cpu_font,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// Face index inside a collection (`.ttc`) file.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Stable identity used to key per-engine registrations.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn cpu_font(&self) -> &vello_cpu::peniko::FontData {
        &self.cpu_font
    }

    pub fn sha256_hex(&self) -> String {
        let digest = sha2::Sha256::digest(self.bytes.as_slice());
        let mut out = String::with_capacity(digest.len() * 2);
        for b in digest {
            out.push_str(&format!("{:02x}", b));
        }
        out
    }
}

impl std::fmt::Debug for FontFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFile")
            .field("path", &self.path)
            .field("bytes_len", &self.bytes.len())
            .field("index", &self.index)
            .finish()
    }
}

/// Where a font's glyphs come from.
#[derive(Clone, Debug)]
pub enum FontFace {
    File(Arc<FontFile>),
    /// Last-resort face: fixed advances, box glyphs. Always available.
    Builtin,
}

impl FontFace {
    pub fn is_builtin(&self) -> bool {
        matches!(self, FontFace::Builtin)
    }

    /// Short human-readable origin, used in diagnostics.
    pub fn describe(&self) -> String {
        match self {
            FontFace::File(file) => file.path().display().to_string(),
            FontFace::Builtin => "<builtin>".to_string(),
        }
    }
}

/// A face at a concrete pixel size.
#[derive(Clone, Debug)]
pub struct Font {
    face: FontFace,
    size_px: f32,
}

impl Font {
    pub fn new(face: FontFace, size_px: f32) -> Self {
        let size_px = if size_px.is_finite() {
            size_px.max(1.0)
        } else {
            1.0
        };
        Self { face, size_px }
    }

    pub fn builtin(size_px: f32) -> Self {
        Self::new(FontFace::Builtin, size_px)
    }

    pub fn face(&self) -> &FontFace {
        &self.face
    }

    pub fn size_px(&self) -> f32 {
        self.size_px
    }
}

/// The three fonts a card is typeset with.
#[derive(Clone, Debug)]
pub struct FontTriple {
    pub title: Font,
    pub body: Font,
    pub brand: Font,
}

#[cfg(test)]
#[path = "../../tests/unit/text/font.rs"]
mod tests;
