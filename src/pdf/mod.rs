//! PDF output via `genpdf`.
//!
//! The assembled markup is re-parsed and laid out on Letter paper with the
//! fonts found in a fonts directory.

pub mod fonts;
mod layout;

use std::fs;
use std::path::Path;

use genpdf::{PaperSize, SimplePageDecorator};
use tracing::{debug, info};

pub use fonts::{BASE_FAMILY, FontFiles, FontSet, FontStyle, classify_stem, discover_fonts};
pub use layout::{FontFaces, Layouter, parse_color, to_alignment};

use crate::error::{Error, Result};
use crate::markup::Document;

/// Page margin in millimetres.
const MARGIN_MM: i32 = 15;

/// Typeset `document` and write it to `output`, creating parent directories.
pub fn render_pdf(document: &Document, fonts_dir: &Path, font_size: u8, output: &Path) -> Result<()> {
    let fonts = discover_fonts(fonts_dir)?;
    let base_name = fonts
        .base_family()
        .ok_or_else(|| Error::NoFonts(fonts_dir.to_path_buf()))?
        .to_string();
    let base_files = fonts
        .get(&base_name)
        .ok_or_else(|| Error::NoFonts(fonts_dir.to_path_buf()))?;

    let mut doc = genpdf::Document::new(base_files.load()?);
    doc.set_title(document.title.as_str());
    doc.set_paper_size(PaperSize::Letter);
    doc.set_font_size(font_size);

    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(MARGIN_MM);
    doc.set_page_decorator(decorator);

    let mut faces = FontFaces::default();
    for (name, files) in fonts.families() {
        if name == base_name {
            continue;
        }
        let family = doc.add_font_family(files.load()?);
        faces.insert(name, family);
        debug!(family = name, "Registered font family");
    }
    info!(base = %base_name, extra = faces.len(), "Fonts ready");

    let markup = document.to_markup();
    doc.push(Layouter::new(&markup, &faces, font_size).layout());

    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    doc.render_to_file(output)?;
    info!(path = %output.display(), "Wrote PDF");
    Ok(())
}
