//! View options, merged over defaults.
//!
//! Options are plain JSON shaped like the defaults (camelCase keys). [`Config::merged`] applies a
//! recursive object merge: objects merge key by key, everything else (scalars, arrays) replaces the
//! default. The legacy keys `space` and `onlyMe` are accepted and mapped to `cell` and
//! `onlyPrimaryContributor`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::foundation::color::ColorDef;
use crate::foundation::error::{GitnetError, GitnetResult};

fn color(s: &str) -> ColorDef {
    // Defaults are literals below; a typo is a programming error caught by `defaults_are_valid`.
    ColorDef::parse(s).unwrap_or(ColorDef::rgba(0.0, 0.0, 0.0, 1.0))
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Grid cell size in pixels: `h` per time index, `v` per lane.
    pub cell: CellSize,
    /// Extra room below the last lane of the off-screen surface for labels.
    pub label_margin: f64,
    pub network: NetworkStyle,
    pub x_axis: XAxisStyle,
    pub y_axis: YAxisStyle,
    pub grid: GridStyle,
    pub tooltip: TooltipStyle,
    pub border: BorderStyle,
    pub title: TitleStyle,
    pub guide: GuideStyle,
    /// Restrict rendered lanes and labels to the first block.
    pub only_primary_contributor: bool,
    /// Honor container resize notifications.
    pub auto_resize: bool,
    pub lang: Lang,
    pub fonts: FontsConfig,
    /// `owner/name`, substituted into `{{repository}}`.
    pub repository: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cell: CellSize { h: 25.0, v: 25.0 },
            label_margin: 200.0,
            network: NetworkStyle::default(),
            x_axis: XAxisStyle::default(),
            y_axis: YAxisStyle::default(),
            grid: GridStyle::default(),
            tooltip: TooltipStyle::default(),
            border: BorderStyle {
                width: 1.0,
                color: color("#DDDDDD"),
            },
            title: TitleStyle::default(),
            guide: GuideStyle::default(),
            only_primary_contributor: false,
            auto_resize: false,
            lang: Lang::default(),
            fonts: FontsConfig::default(),
            repository: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellSize {
    pub h: f64,
    pub v: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NetworkStyle {
    pub point_radius: f64,
    pub line_width: f64,
    pub labels: LabelStyle,
    /// Lane palette. Entry 0 is reserved for lane 0.
    pub colors: Vec<ColorDef>,
    /// Commit URL template.
    pub link: String,
}

impl Default for NetworkStyle {
    fn default() -> Self {
        let colors = [
            "#000000", "#c0392b", "#3498db", "#2ecc71", "#8e44ad", "#f1c40f", "#e67e22",
            "#34495e", "#e74c3c", "#2980b9", "#1abc9c", "#9b59b6", "#f39c12", "#7f8c8d",
            "#2c3e50", "#d35400", "#e74c3c", "#95a5a6", "#bdc3c7", "#16a085", "#27ae60",
        ]
        .into_iter()
        .map(color)
        .collect();

        Self {
            point_radius: 3.0,
            line_width: 2.0,
            labels: LabelStyle::default(),
            colors,
            link: "https://github.com/{{user.name}}/{{user.repo}}/commit/{{commit.id}}".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LabelStyle {
    pub enabled: bool,
    pub background: ColorDef,
    pub padding: f64,
    pub arrow_size: f64,
    pub font: FontSpec,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            enabled: true,
            background: color("rgba(0,0,0,0.8)"),
            padding: 5.0,
            arrow_size: 8.0,
            font: FontSpec::new(10.0, "normal", "#EEEEEE"),
        }
    }
}

/// Font description: size in px, CSS-like family list, style keywords, color.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FontSpec {
    pub size: f64,
    pub family: String,
    /// Keywords such as `normal`, `bold`, `italic`, `bold italic`.
    pub style: String,
    pub color: ColorDef,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new(12.0, "normal", "#333333")
    }
}

impl FontSpec {
    fn new(size: f64, style: &str, c: &str) -> Self {
        Self {
            size,
            family: "\"Arial\", sans-serif".to_string(),
            style: style.to_string(),
            color: color(c),
        }
    }

    pub fn is_bold(&self) -> bool {
        self.style
            .split_whitespace()
            .any(|w| w.eq_ignore_ascii_case("bold"))
    }

    pub fn is_italic(&self) -> bool {
        self.style
            .split_whitespace()
            .any(|w| w.eq_ignore_ascii_case("italic") || w.eq_ignore_ascii_case("oblique"))
    }

    /// Same font with bold weight.
    pub fn bold(&self) -> Self {
        Self {
            style: "bold".to_string(),
            ..self.clone()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Toggle {
    pub enabled: bool,
}

impl Default for Toggle {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TickStyle {
    pub enabled: bool,
    pub width: f64,
    pub height: f64,
    pub color: ColorDef,
}

impl Default for TickStyle {
    fn default() -> Self {
        Self {
            enabled: true,
            width: 1.0,
            height: 6.0,
            color: color("#DDDDDD"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct XAxisStyle {
    pub enabled: bool,
    pub height: f64,
    pub background: ColorDef,
    pub days: Toggle,
    pub font: FontSpec,
    pub ticks: TickStyle,
}

impl Default for XAxisStyle {
    fn default() -> Self {
        Self {
            enabled: true,
            height: 40.0,
            background: color("#F7F7F7"),
            days: Toggle::default(),
            font: FontSpec::default(),
            ticks: TickStyle::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderStyle {
    pub width: f64,
    pub color: ColorDef,
}

impl Default for BorderStyle {
    fn default() -> Self {
        Self {
            width: 1.0,
            color: color("#DDDDDD"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct YAxisStyle {
    pub enabled: bool,
    pub width: f64,
    /// Alternating band colors.
    pub background: Vec<ColorDef>,
    pub background_active: ColorDef,
    pub names: Toggle,
    pub font: FontSpec,
    pub border: BorderStyle,
    /// Contributor URL template.
    pub link: String,
}

impl Default for YAxisStyle {
    fn default() -> Self {
        Self {
            enabled: true,
            width: 120.0,
            background: vec![color("#FFFFFF"), color("#F9F9F9")],
            background_active: color("#EEEEEE"),
            names: Toggle::default(),
            font: FontSpec::default(),
            border: BorderStyle::default(),
            link: "https://github.com/{{user.name}}/{{user.repo}}".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridStyle {
    pub enabled: bool,
    pub background: Vec<ColorDef>,
    pub background_active: ColorDef,
    pub border: BorderStyle,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            enabled: true,
            background: vec![color("#FFFFFF"), color("#F9F9F9")],
            background_active: color("#EEEEEE"),
            border: BorderStyle::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub top: f64,
    pub left: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TooltipStyle {
    pub enabled: bool,
    pub offset: Offset,
    /// Placeholder avatar, requested once per dataset.
    pub default_gravatar: String,
    /// Maximum box width.
    pub width: f64,
    pub padding: f64,
    pub avatar_size: f64,
    pub background: ColorDef,
    pub border: BorderStyle,
    pub font: FontSpec,
}

impl Default for TooltipStyle {
    fn default() -> Self {
        Self {
            enabled: true,
            offset: Offset {
                top: 20.0,
                left: -20.0,
            },
            default_gravatar:
                "https://i2.wp.com/assets-cdn.github.com/images/gravatars/gravatar-user-420.png"
                    .to_string(),
            width: 350.0,
            padding: 8.0,
            avatar_size: 40.0,
            background: color("#FFFFFF"),
            border: BorderStyle {
                width: 1.0,
                color: color("#CCCCCC"),
            },
            font: FontSpec::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TitleStyle {
    pub enabled: bool,
    pub text: String,
    pub background: ColorDef,
    pub font: FontSpec,
    pub link: String,
}

impl Default for TitleStyle {
    fn default() -> Self {
        Self {
            enabled: true,
            text: "Network".to_string(),
            background: color("#F7F7F7"),
            font: FontSpec::new(18.0, "bold italic", "#333333"),
            link: "https://github.com/{{repository}}".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideStyle {
    pub width: f64,
    pub color: ColorDef,
}

impl Default for GuideStyle {
    fn default() -> Self {
        Self {
            width: 1.0,
            color: color("#3498db"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Lang {
    pub short_months: Vec<String>,
}

impl Default for Lang {
    fn default() -> Self {
        Self {
            short_months: [
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
        }
    }
}

/// Where text faces come from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontsConfig {
    /// Query installed system fonts.
    pub system: bool,
    /// Extra font files loaded before the system fonts.
    pub files: Vec<PathBuf>,
}

impl Default for FontsConfig {
    fn default() -> Self {
        Self {
            system: true,
            files: Vec::new(),
        }
    }
}

impl Config {
    /// Merge JSON overrides over `self` and validate the result.
    pub fn merged(&self, overrides: &serde_json::Value) -> GitnetResult<Self> {
        let mut base = serde_json::to_value(self)?;
        let mut overrides = overrides.clone();
        normalize_legacy_keys(&mut overrides);
        merge_json(&mut base, &overrides);
        let mut cfg: Config = serde_json::from_value(base)?;

        // a new repository names the title unless the title text is given alongside it
        let title_given = overrides
            .pointer("/title/text")
            .is_some_and(|t| t.as_str().is_some_and(|t| !t.is_empty()));
        if overrides.get("repository").is_some_and(|r| r.is_string())
            && !title_given
            && let Some(name) = cfg.repository.as_deref().and_then(repository_name)
        {
            cfg.title.text = name.to_string();
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Defaults with overrides applied.
    pub fn from_overrides(overrides: &serde_json::Value) -> GitnetResult<Self> {
        Self::default().merged(overrides)
    }

    pub fn validate(&self) -> GitnetResult<()> {
        if self.network.colors.len() < 2 {
            return Err(GitnetError::validation(
                "network.colors needs at least two entries (entry 0 is reserved for lane 0)",
            ));
        }
        if !(self.cell.h > 0.0 && self.cell.v > 0.0) {
            return Err(GitnetError::validation("cell sizes must be > 0"));
        }
        if self.network.point_radius < 0.0 || self.network.line_width < 0.0 {
            return Err(GitnetError::validation(
                "network.pointRadius and network.lineWidth must be >= 0",
            ));
        }
        if self.grid.background.is_empty() || self.y_axis.background.is_empty() {
            return Err(GitnetError::validation(
                "grid.background and yAxis.background need at least one color",
            ));
        }
        if self.label_margin < 0.0 || self.border.width < 0.0 {
            return Err(GitnetError::validation(
                "labelMargin and border.width must be >= 0",
            ));
        }
        Ok(())
    }

    /// Height reserved for the date axis; zero when disabled.
    pub fn x_axis_height(&self) -> f64 {
        if self.x_axis.enabled {
            self.x_axis.height
        } else {
            0.0
        }
    }

    /// Width reserved for the contributor axis; zero when disabled.
    pub fn y_axis_width(&self) -> f64 {
        if self.y_axis.enabled {
            self.y_axis.width
        } else {
            0.0
        }
    }

    /// Whether a change from `self` to `next` requires re-rendering the off-screen surface.
    pub fn affects_network(&self, next: &Config) -> bool {
        self.cell != next.cell
            || self.label_margin != next.label_margin
            || self.network != next.network
            || self.only_primary_contributor != next.only_primary_contributor
            || self.fonts != next.fonts
    }
}

/// `name` out of `owner/name`.
fn repository_name(repository: &str) -> Option<&str> {
    repository.split('/').nth(1).filter(|n| !n.is_empty())
}

fn normalize_legacy_keys(v: &mut serde_json::Value) {
    let Some(obj) = v.as_object_mut() else {
        return;
    };
    for (legacy, key) in [("space", "cell"), ("onlyMe", "onlyPrimaryContributor")] {
        if let Some(val) = obj.remove(legacy) {
            obj.entry(key.to_string()).or_insert(val);
        }
    }
}

/// Recursive object merge; non-object values replace.
pub(crate) fn merge_json(base: &mut serde_json::Value, over: &serde_json::Value) {
    match (base, over) {
        (serde_json::Value::Object(b), serde_json::Value::Object(o)) => {
            for (k, ov) in o {
                match b.get_mut(k) {
                    Some(bv) => merge_json(bv, ov),
                    None => {
                        b.insert(k.clone(), ov.clone());
                    }
                }
            }
        }
        (b, o) => *b = o.clone(),
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
