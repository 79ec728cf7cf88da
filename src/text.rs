//! Font resolution, shaping and measurement.
//!
//! Faces are resolved through `fontdb` (system fonts and/or explicit files) and shaped with Parley.
//! When no face can be found the engine falls back to a width estimate and produces no glyphs, so
//! layout stays deterministic on machines without fonts.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use usvg::fontdb;

use crate::config::{FontSpec, FontsConfig};
use crate::foundation::color::ColorDef;

/// Where the engine looks for faces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontSource {
    /// Installed system fonts plus optional extra files.
    System { extra_files: Vec<PathBuf> },
    /// Only the listed files.
    Files(Vec<PathBuf>),
    /// No faces at all: widths are estimated and nothing is drawn.
    None,
}

impl FontSource {
    pub fn from_config(cfg: &FontsConfig) -> Self {
        match (cfg.system, cfg.files.is_empty()) {
            (true, _) => Self::System {
                extra_files: cfg.files.clone(),
            },
            (false, false) => Self::Files(cfg.files.clone()),
            (false, true) => Self::None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color carried through Parley layouts.
pub(crate) struct TextBrush {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<ColorDef> for TextBrush {
    fn from(c: ColorDef) -> Self {
        let [r, g, b, a] = c.to_rgba8();
        Self { r, g, b, a }
    }
}

/// One positioned glyph, relative to the text's left edge and baseline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedGlyph {
    pub id: u32,
    pub x: f32,
    pub y: f32,
}

/// Shaped single-line text ready for drawing.
#[derive(Clone, Debug)]
pub struct ShapedText {
    pub width: f64,
    /// Distance from the baseline to the top of the line box.
    pub ascent: f64,
    /// Distance from the baseline to the bottom of the line box.
    pub descent: f64,
    pub size: f32,
    pub color: ColorDef,
    pub glyphs: Vec<PlacedGlyph>,
    pub font: Option<vello_cpu::peniko::FontData>,
}

impl ShapedText {
    /// Baseline offset that vertically centers the line box on an anchor.
    pub fn middle_baseline(&self) -> f64 {
        (self.ascent - self.descent) / 2.0
    }

    pub fn has_glyphs(&self) -> bool {
        self.font.is_some() && !self.glyphs.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct FaceKey {
    family: String,
    bold: bool,
    italic: bool,
}

#[derive(Clone)]
struct LoadedFace {
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

/// Stateful text shaper. Owned by the view; not shared across threads.
pub struct TextEngine {
    source: FontSource,
    db: Option<Arc<fontdb::Database>>,
    faces: HashMap<FaceKey, Option<LoadedFace>>,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    warned: bool,
}

impl std::fmt::Debug for TextEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextEngine")
            .field("source", &self.source)
            .field("faces", &self.faces.len())
            .finish()
    }
}

impl TextEngine {
    pub fn new(source: FontSource) -> Self {
        Self {
            source,
            db: None,
            faces: HashMap::new(),
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            warned: false,
        }
    }

    pub fn source(&self) -> &FontSource {
        &self.source
    }

    /// Shape `text` on one line.
    pub fn shape(&mut self, text: &str, font: &FontSpec) -> ShapedText {
        let size = if font.size.is_finite() && font.size > 0.0 {
            font.size as f32
        } else {
            1.0
        };

        let Some(face) = self.resolve(font) else {
            return estimate(text, size, font.color);
        };
        if text.is_empty() {
            let mut empty = estimate("", size, font.color);
            empty.font = Some(face.font);
            return empty;
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(face.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size));
        if font.is_bold() {
            builder.push_default(parley::style::StyleProperty::FontWeight(
                parley::style::FontWeight::BOLD,
            ));
        }
        if font.is_italic() {
            builder.push_default(parley::style::StyleProperty::FontStyle(
                parley::style::FontStyle::Italic,
            ));
        }
        builder.push_default(parley::style::StyleProperty::Brush(TextBrush::from(
            font.color,
        )));

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(None);

        let mut glyphs = Vec::new();
        let (mut ascent, mut descent, mut baseline) =
            (f64::from(size) * 0.8, f64::from(size) * 0.2, 0.0f32);
        if let Some(line) = layout.lines().next() {
            let m = line.metrics();
            ascent = f64::from(m.ascent);
            descent = f64::from(m.descent);
            baseline = m.baseline;
        }
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                glyphs.extend(run.positioned_glyphs().map(|g| PlacedGlyph {
                    id: g.id,
                    x: g.x,
                    y: g.y - baseline,
                }));
            }
        }

        ShapedText {
            width: f64::from(layout.width()),
            ascent,
            descent,
            size,
            color: font.color,
            glyphs,
            font: Some(face.font),
        }
    }

    pub fn measure(&mut self, text: &str, font: &FontSpec) -> f64 {
        self.shape(text, font).width
    }

    /// Truncate `text` with a trailing ellipsis so it fits in `max_width`.
    pub fn ellipsize(&mut self, text: &str, font: &FontSpec, max_width: f64) -> String {
        if self.measure(text, font) <= max_width {
            return text.to_string();
        }
        let chars: Vec<char> = text.chars().collect();
        let mut keep = chars.len();
        while keep > 0 {
            keep -= 1;
            let candidate: String = chars[..keep].iter().collect::<String>() + "\u{2026}";
            if self.measure(&candidate, font) <= max_width {
                return candidate;
            }
        }
        String::new()
    }

    fn resolve(&mut self, spec: &FontSpec) -> Option<LoadedFace> {
        if self.source == FontSource::None {
            return None;
        }
        let key = FaceKey {
            family: spec.family.clone(),
            bold: spec.is_bold(),
            italic: spec.is_italic(),
        };
        if let Some(hit) = self.faces.get(&key) {
            return hit.clone();
        }

        let face = self.load_face(&key);
        if face.is_none() && !self.warned {
            self.warned = true;
            tracing::warn!(
                family = %key.family,
                "no font face resolved; text widths are estimated and glyphs are skipped"
            );
        }
        self.faces.insert(key, face.clone());
        face
    }

    fn load_face(&mut self, key: &FaceKey) -> Option<LoadedFace> {
        let db = self.database();

        let names = parse_family_list(&key.family);
        let mut families: Vec<fontdb::Family<'_>> = names
            .iter()
            .map(|n| match n.to_ascii_lowercase().as_str() {
                "serif" => fontdb::Family::Serif,
                "sans-serif" => fontdb::Family::SansSerif,
                "monospace" => fontdb::Family::Monospace,
                "cursive" => fontdb::Family::Cursive,
                "fantasy" => fontdb::Family::Fantasy,
                _ => fontdb::Family::Name(n.as_str()),
            })
            .collect();
        families.push(fontdb::Family::SansSerif);

        let query = fontdb::Query {
            families: &families,
            weight: if key.bold {
                fontdb::Weight::BOLD
            } else {
                fontdb::Weight::NORMAL
            },
            stretch: fontdb::Stretch::Normal,
            style: if key.italic {
                fontdb::Style::Italic
            } else {
                fontdb::Style::Normal
            },
        };

        let id = db.query(&query).or_else(|| db.faces().next().map(|f| f.id))?;
        let (bytes, index) = db.with_face_data(id, |data, index| (data.to_vec(), index))?;

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id)?;
        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)?
            .to_string();

        Some(LoadedFace {
            family_name,
            font: vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), index),
        })
    }

    fn database(&mut self) -> Arc<fontdb::Database> {
        if let Some(db) = &self.db {
            return Arc::clone(db);
        }
        let mut db = fontdb::Database::new();
        let files: &[PathBuf] = match &self.source {
            FontSource::System { extra_files } => {
                db.load_system_fonts();
                extra_files
            }
            FontSource::Files(files) => files,
            FontSource::None => &[],
        };
        for path in files {
            if let Err(err) = db.load_font_file(path) {
                tracing::warn!(path = %path.display(), error = %err, "font file not loaded");
            }
        }
        let db = Arc::new(db);
        self.db = Some(Arc::clone(&db));
        db
    }
}

/// Metrics used when no face is available.
fn estimate(text: &str, size: f32, color: ColorDef) -> ShapedText {
    let size_f = f64::from(size);
    ShapedText {
        width: 0.6 * size_f * text.chars().count() as f64,
        ascent: 0.8 * size_f,
        descent: 0.2 * size_f,
        size,
        color,
        glyphs: Vec::new(),
        font: None,
    }
}

/// Split a CSS family list such as `"Arial", sans-serif` into bare names.
pub(crate) fn parse_family_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_matches(|c| c == '"' || c == '\'').trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "../tests/unit/text.rs"]
mod tests;
