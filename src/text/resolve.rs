//! Font discovery.
//!
//! A font request is turned into an ordered list of candidate files by pure functions
//! ([`candidate_paths`], [`fallback_candidates`]); [`FontLibrary`] then walks the list and takes
//! the first file that loads and shapes. After the files come the system font database and
//! finally the built-in face, so resolution always produces a face.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, OnceLock},
};

use crate::text::{
    flow::TextFlow,
    font::{Font, FontFace, FontFile, FontTriple},
};

/// CJK font files commonly installed on desktop systems, looked up by file name.
pub const CJK_SYSTEM_FILES: [&str; 3] = ["msyh.ttc", "Microsoft YaHei.ttf", "SimHei.ttf"];

/// Packaged CJK face tried after the system files.
pub const FALLBACK_ASSET: &str = "NotoSansSC-Regular.ttf";

/// Families preferred when asking the system font database for a CJK-capable face.
const SYSTEM_CJK_FAMILIES: [&str; 6] = [
    "Noto Sans CJK SC",
    "Noto Sans SC",
    "Source Han Sans SC",
    "WenQuanYi Micro Hei",
    "PingFang SC",
    "Microsoft YaHei",
];

const MAX_FONT_DIR_DEPTH: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Bold,
    Regular,
}

impl FontWeight {
    /// File-name style suffixes in preference order.
    fn styles(self) -> [&'static str; 3] {
        match self {
            FontWeight::Bold => ["Bold", "Medium", "Regular"],
            FontWeight::Regular => ["Regular", "Medium", "Bold"],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontCandidate {
    /// A concrete path, usually inside the package fonts directory.
    Asset(PathBuf),
    /// A bare file name searched for in the OS font directories.
    System(&'static str),
}

/// Ordered candidates for `family` at `weight`.
///
/// With `cjk_only` the well-known CJK system files are appended, so a CJK-capable face is
/// preferred over the generic fallback chain.
pub fn candidate_paths(
    family: &str,
    weight: FontWeight,
    cjk_only: bool,
    fonts_dir: &Path,
) -> Vec<FontCandidate> {
    let mut out: Vec<FontCandidate> = weight
        .styles()
        .iter()
        .map(|style| FontCandidate::Asset(fonts_dir.join(format!("{family}-{style}.ttf"))))
        .collect();
    if cjk_only {
        out.extend(CJK_SYSTEM_FILES.iter().map(|&name| FontCandidate::System(name)));
    }
    out
}

/// Files tried when no candidate loads, before the font database and the built-in face.
pub fn fallback_candidates(fonts_dir: &Path) -> Vec<FontCandidate> {
    let mut out: Vec<FontCandidate> = CJK_SYSTEM_FILES
        .iter()
        .map(|&name| FontCandidate::System(name))
        .collect();
    out.push(FontCandidate::Asset(fonts_dir.join(FALLBACK_ASSET)));
    out
}

/// Watermark text uses the family's regular face, then its bold one. No system files.
pub fn watermark_candidates(family: &str, fonts_dir: &Path) -> Vec<FontCandidate> {
    ["Regular", "Bold"]
        .iter()
        .map(|style| FontCandidate::Asset(fonts_dir.join(format!("{family}-{style}.ttf"))))
        .collect()
}

/// Directories searched for [`FontCandidate::System`] names.
pub fn system_font_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(windir) = std::env::var_os("WINDIR") {
        dirs.push(PathBuf::from(windir).join("Fonts"));
    }
    if let Some(home) = std::env::var_os("HOME") {
        let home = PathBuf::from(home);
        dirs.push(home.join(".fonts"));
        dirs.push(home.join(".local/share/fonts"));
        dirs.push(home.join("Library/Fonts"));
    }
    dirs.extend(
        [
            "/usr/share/fonts",
            "/usr/local/share/fonts",
            "/System/Library/Fonts",
            "/Library/Fonts",
        ]
        .iter()
        .map(PathBuf::from),
    );
    dirs
}

/// Loads and caches font files for one render.
///
/// Missing or unreadable files are skipped silently. Resolved faces are cached per
/// (family, weight, CJK policy), so repeated requests during the title-fit search are cheap.
pub struct FontLibrary {
    fonts_dir: PathBuf,
    system_fonts: bool,
    files: HashMap<PathBuf, Option<Arc<FontFile>>>,
    system_paths: HashMap<&'static str, Option<PathBuf>>,
    faces: HashMap<(String, FontWeight, bool), FontFace>,
    fallback: Option<FontFace>,
}

impl FontLibrary {
    /// `system_fonts = false` restricts resolution to `fonts_dir` and the built-in face.
    pub fn new(fonts_dir: impl Into<PathBuf>, system_fonts: bool) -> Self {
        Self {
            fonts_dir: fonts_dir.into(),
            system_fonts,
            files: HashMap::new(),
            system_paths: HashMap::new(),
            faces: HashMap::new(),
            fallback: None,
        }
    }

    pub fn fonts_dir(&self) -> &Path {
        &self.fonts_dir
    }

    /// Face for `family` at `weight` under the given CJK policy.
    pub fn resolve_weight(
        &mut self,
        flow: &mut TextFlow,
        family: &str,
        weight: FontWeight,
        cjk_only: bool,
    ) -> FontFace {
        let key = (family.to_string(), weight, cjk_only);
        if let Some(face) = self.faces.get(&key) {
            return face.clone();
        }
        let candidates = candidate_paths(family, weight, cjk_only, &self.fonts_dir);
        let face = self.resolve(flow, &candidates);
        self.faces.insert(key, face.clone());
        face
    }

    /// First usable candidate, else the fallback chain.
    pub fn resolve(&mut self, flow: &mut TextFlow, candidates: &[FontCandidate]) -> FontFace {
        for candidate in candidates {
            if let Some(file) = self.load_candidate(flow, candidate) {
                return FontFace::File(file);
            }
        }
        self.fallback_face(flow)
    }

    /// Title (bold) plus body and brand (regular) fonts; the brand runs at 90% of body size.
    pub fn load_triple(
        &mut self,
        flow: &mut TextFlow,
        family: &str,
        cjk_only: bool,
        title_size: f32,
        body_size: f32,
    ) -> FontTriple {
        let bold = self.resolve_weight(flow, family, FontWeight::Bold, cjk_only);
        let regular = self.resolve_weight(flow, family, FontWeight::Regular, cjk_only);
        FontTriple {
            title: Font::new(bold, title_size),
            body: Font::new(regular.clone(), body_size),
            brand: Font::new(regular, (body_size * 0.9).trunc()),
        }
    }

    fn fallback_face(&mut self, flow: &mut TextFlow) -> FontFace {
        if let Some(face) = &self.fallback {
            return face.clone();
        }
        let face = fallback_candidates(&self.fonts_dir)
            .iter()
            .find_map(|candidate| self.load_candidate(flow, candidate))
            .or_else(|| self.system_database_face(flow))
            .map(FontFace::File)
            .unwrap_or(FontFace::Builtin);
        if face.is_builtin() {
            tracing::debug!("no font file usable, falling back to the built-in face");
        }
        self.fallback = Some(face.clone());
        face
    }

    fn load_candidate(
        &mut self,
        flow: &mut TextFlow,
        candidate: &FontCandidate,
    ) -> Option<Arc<FontFile>> {
        let path = match candidate {
            FontCandidate::Asset(path) => path.clone(),
            FontCandidate::System(name) => self.find_system_file(name)?,
        };
        self.load_file(flow, &path)
    }

    fn load_file(&mut self, flow: &mut TextFlow, path: &Path) -> Option<Arc<FontFile>> {
        if let Some(known) = self.files.get(path) {
            return known.clone();
        }
        let loaded = std::fs::read(path).ok().and_then(|bytes| {
            let file = FontFile::new(path, bytes, 0);
            match flow.register(&file) {
                Some(_) => Some(Arc::new(file)),
                None => {
                    tracing::debug!(path = %path.display(), "font file is not usable");
                    None
                }
            }
        });
        self.files.insert(path.to_path_buf(), loaded.clone());
        loaded
    }

    fn find_system_file(&mut self, name: &'static str) -> Option<PathBuf> {
        if !self.system_fonts {
            return None;
        }
        if let Some(known) = self.system_paths.get(name) {
            return known.clone();
        }
        let found = system_font_dirs()
            .iter()
            .find_map(|dir| find_file_named(dir, name, MAX_FONT_DIR_DEPTH));
        self.system_paths.insert(name, found.clone());
        found
    }

    fn system_database_face(&mut self, flow: &mut TextFlow) -> Option<Arc<FontFile>> {
        if !self.system_fonts {
            return None;
        }
        let db = system_database();
        let families: Vec<usvg::fontdb::Family<'_>> = SYSTEM_CJK_FAMILIES
            .iter()
            .map(|&name| usvg::fontdb::Family::Name(name))
            .chain(std::iter::once(usvg::fontdb::Family::SansSerif))
            .collect();
        let query = usvg::fontdb::Query {
            families: &families,
            weight: usvg::fontdb::Weight::NORMAL,
            stretch: usvg::fontdb::Stretch::Normal,
            style: usvg::fontdb::Style::Normal,
        };
        let id = db.query(&query).or_else(|| db.faces().next().map(|f| f.id))?;

        let face = db.face(id)?;
        let path = match &face.source {
            usvg::fontdb::Source::File(path) => path.clone(),
            _ => PathBuf::from(format!("fontdb:{}", face.post_script_name)),
        };
        let (bytes, index) = db.with_face_data(id, |data, index| (data.to_vec(), index))?;
        let file = FontFile::new(path, bytes, index);
        flow.register(&file)?;
        Some(Arc::new(file))
    }
}

/// Report the fonts a card was typeset with.
pub fn log_font_triple(flow: &mut TextFlow, fonts: &FontTriple) {
    for (role, font) in [
        ("title", &fonts.title),
        ("body", &fonts.body),
        ("brand", &fonts.brand),
    ] {
        let sha256 = match font.face() {
            FontFace::File(file) => file.sha256_hex(),
            FontFace::Builtin => String::new(),
        };
        tracing::info!(
            role,
            name = %flow.family_name(font),
            path = %font.face().describe(),
            size = font.size_px(),
            sha256 = %sha256,
            "resolved font"
        );
    }
}

fn system_database() -> &'static usvg::fontdb::Database {
    static DB: OnceLock<usvg::fontdb::Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        db
    })
}

/// Depth-limited search for a file whose name matches `name` case-insensitively.
fn find_file_named(dir: &Path, name: &str, depth: usize) -> Option<PathBuf> {
    let rd = std::fs::read_dir(dir).ok()?;
    let mut subdirs = Vec::new();
    for entry in rd.flatten() {
        let path = entry.path();
        if path.is_dir() {
            subdirs.push(path);
            continue;
        }
        let matches = path
            .file_name()
            .and_then(|s| s.to_str())
            .is_some_and(|file| file.eq_ignore_ascii_case(name));
        if matches {
            return Some(path);
        }
    }
    if depth == 0 {
        return None;
    }
    subdirs.sort();
    subdirs
        .iter()
        .find_map(|sub| find_file_named(sub, name, depth - 1))
}

#[cfg(test)]
#[path = "../../tests/unit/text/resolve.rs"]
mod tests;
