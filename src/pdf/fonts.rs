//! TrueType font discovery.
//!
//! Files are grouped into families by their `Family-Suffix` stem. Variants a
//! family lacks reuse its regular file, so bold or italic text always has
//! something to render with.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use genpdf::fonts::{FontData, FontFamily};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Family preferred as the body font when it is available.
pub const BASE_FAMILY: &str = "DejaVuSans";

/// Suffix keywords, checked in order with `ends_with`.
const SUFFIX_STYLES: &[(&str, FontStyle)] = &[
    ("boldoblique", FontStyle::BoldItalic),
    ("bolditalic", FontStyle::BoldItalic),
    ("bold", FontStyle::Bold),
    ("oblique", FontStyle::Italic),
    ("italic", FontStyle::Italic),
    ("regular", FontStyle::Regular),
    ("book", FontStyle::Regular),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

/// The four files backing one family. Missing variants already point at a
/// fallback file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFiles {
    pub regular: PathBuf,
    pub bold: PathBuf,
    pub italic: PathBuf,
    pub bold_italic: PathBuf,
}

impl FontFiles {
    /// Read every variant into memory.
    pub fn load(&self) -> Result<FontFamily<FontData>> {
        Ok(FontFamily {
            regular: FontData::load(&self.regular, None)?,
            bold: FontData::load(&self.bold, None)?,
            italic: FontData::load(&self.italic, None)?,
            bold_italic: FontData::load(&self.bold_italic, None)?,
        })
    }
}

/// All families found in a fonts directory, keyed by family name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontSet {
    families: BTreeMap<String, FontFiles>,
}

impl FontSet {
    /// Name of the body font family: [`BASE_FAMILY`] when present, otherwise
    /// the first name in sorted order.
    pub fn base_family(&self) -> Option<&str> {
        if self.families.contains_key(BASE_FAMILY) {
            return Some(BASE_FAMILY);
        }
        self.families.keys().next().map(String::as_str)
    }

    pub fn get(&self, family: &str) -> Option<&FontFiles> {
        self.families.get(family)
    }

    pub fn families(&self) -> impl Iterator<Item = (&str, &FontFiles)> {
        self.families.iter().map(|(name, files)| (name.as_str(), files))
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

/// Split a file stem into family name and style.
///
/// `"DejaVuSans-BoldOblique"` is `("DejaVuSans", BoldItalic)`. A stem
/// without a recognized suffix is a regular face of a family named by the
/// whole stem.
pub fn classify_stem(stem: &str) -> (&str, FontStyle) {
    if let Some((family, suffix)) = stem.split_once('-') {
        let suffix = suffix.to_ascii_lowercase();
        if let Some(&(_, style)) = SUFFIX_STYLES
            .iter()
            .find(|(keyword, _)| suffix.ends_with(keyword))
        {
            return (family, style);
        }
    }
    (stem, FontStyle::Regular)
}

/// Scan `dir` for `*.ttf` files and group them into families.
pub fn discover_fonts(dir: &Path) -> Result<FontSet> {
    let mut paths: Vec<PathBuf> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .and_then(|e| e.to_str())
                        .is_some_and(|e| e.eq_ignore_ascii_case("ttf"))
            })
            .collect(),
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "Cannot read fonts directory");
            Vec::new()
        }
    };
    paths.sort();

    let mut found: BTreeMap<String, BTreeMap<FontStyle, PathBuf>> = BTreeMap::new();
    for path in paths {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let (family, style) = classify_stem(stem);
        let styles = found.entry(family.to_string()).or_default();
        if styles.contains_key(&style) {
            debug!(path = %path.display(), "Skipping duplicate font variant");
            continue;
        }
        styles.insert(style, path);
    }

    let families: BTreeMap<String, FontFiles> = found
        .into_iter()
        .filter_map(|(name, styles)| {
            let fallback = styles
                .get(&FontStyle::Regular)
                .or_else(|| styles.values().next())?
                .clone();
            let pick = |style| styles.get(&style).cloned().unwrap_or_else(|| fallback.clone());
            let files = FontFiles {
                regular: pick(FontStyle::Regular),
                bold: pick(FontStyle::Bold),
                italic: pick(FontStyle::Italic),
                bold_italic: pick(FontStyle::BoldItalic),
            };
            Some((name, files))
        })
        .collect();

    if families.is_empty() {
        return Err(Error::NoFonts(dir.to_path_buf()));
    }

    debug!(count = families.len(), "Discovered font families");
    Ok(FontSet { families })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, names: &[&str]) {
        for name in names {
            fs::write(dir.join(name), b"").unwrap();
        }
    }

    #[test]
    fn test_classify_stem() {
        assert_eq!(classify_stem("DejaVuSans-BoldOblique"), ("DejaVuSans", FontStyle::BoldItalic));
        assert_eq!(classify_stem("Serif-SemiBold"), ("Serif", FontStyle::Bold));
        assert_eq!(classify_stem("Serif-Italic"), ("Serif", FontStyle::Italic));
        assert_eq!(classify_stem("NotoSansYi-Regular"), ("NotoSansYi", FontStyle::Regular));
        assert_eq!(classify_stem("DejaVuSans"), ("DejaVuSans", FontStyle::Regular));
        assert_eq!(
            classify_stem("DejaVuSans-ExtraLight"),
            ("DejaVuSans-ExtraLight", FontStyle::Regular)
        );
    }

    #[test]
    fn test_discover_groups_and_falls_back() {
        let tmp = TempDir::new().unwrap();
        touch(
            tmp.path(),
            &[
                "DejaVuSans.ttf",
                "DejaVuSans-Bold.ttf",
                "NotoSansYi-Regular.TTF",
                "readme.txt",
            ],
        );

        let set = discover_fonts(tmp.path()).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.base_family(), Some("DejaVuSans"));

        let dejavu = set.get("DejaVuSans").unwrap();
        assert!(dejavu.bold.ends_with("DejaVuSans-Bold.ttf"));
        assert_eq!(dejavu.italic, dejavu.regular);
        assert_eq!(dejavu.bold_italic, dejavu.regular);

        let yi = set.get("NotoSansYi").unwrap();
        assert_eq!(yi.bold, yi.regular);
    }

    #[test]
    fn test_first_file_per_variant_wins() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), &["Serif-Book.ttf", "Serif-Regular.ttf"]);
        let set = discover_fonts(tmp.path()).unwrap();
        assert!(set.get("Serif").unwrap().regular.ends_with("Serif-Book.ttf"));
    }

    #[test]
    fn test_family_without_regular_uses_a_variant() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), &["Mono-Bold.ttf", "Mono-Italic.ttf"]);
        let set = discover_fonts(tmp.path()).unwrap();
        let mono = set.get("Mono").unwrap();
        assert!(mono.regular.ends_with("Mono-Bold.ttf"));
        assert!(mono.italic.ends_with("Mono-Italic.ttf"));
        assert_eq!(set.base_family(), Some("Mono"));
    }

    #[test]
    fn test_no_fonts() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(discover_fonts(tmp.path()), Err(Error::NoFonts(_))));
        assert!(matches!(
            discover_fonts(&tmp.path().join("missing")),
            Err(Error::NoFonts(_))
        ));
    }
}
