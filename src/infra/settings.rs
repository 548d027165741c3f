//! Usage: Persisted widget settings (`config.ini`): schema, tolerant load, full-overwrite save.
//!
//! The file is meant to be hand-edited, so loading never rejects a record: every field is
//! normalized on its own and falls back to its default when missing or malformed. Only I/O
//! failures are reported as errors.

use crate::app_paths;
use crate::shared::fs::{read_optional_to_string, write_file_atomic};
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;

pub const DEFAULT_WIDTH: u32 = 400;
pub const DEFAULT_HEIGHT: u32 = 100;
pub const DEFAULT_INPUT_ENABLED: bool = true;
pub const DEFAULT_ALWAYS_ON_TOP: bool = true;
pub const DEFAULT_TRANSPARENCY: f64 = 50.0;
pub const MIN_TRANSPARENCY: f64 = 0.01;
pub const MAX_TRANSPARENCY: f64 = 100.0;
pub const DEFAULT_BACKGROUND_COLOR: &str = "#000000";
pub const DEFAULT_BORDER_RADIUS: f64 = 15.0;

const SECTION_WINDOW_STATE: &str = "windowState";
const SECTION_APPEARANCE: &str = "appearance";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowState {
    pub width: u32,
    pub height: u32,
    // Both set or both unset; unset lets the window manager pick the initial position.
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub input_enabled: bool,
    pub always_on_top: bool,
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            x: None,
            y: None,
            input_enabled: DEFAULT_INPUT_ENABLED,
            always_on_top: DEFAULT_ALWAYS_ON_TOP,
        }
    }
}

impl WindowState {
    pub fn position(&self) -> Option<(i32, i32)> {
        Some((self.x?, self.y?))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Appearance {
    pub transparency: f64,
    pub background_color: String,
    pub border_radius: f64,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            transparency: DEFAULT_TRANSPARENCY,
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            border_radius: DEFAULT_BORDER_RADIUS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsRecord {
    pub window_state: WindowState,
    pub appearance: Appearance,
}

/// Reads and writes the single `config.ini` of this installation.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn for_app(app: &tauri::AppHandle) -> Result<Self, String> {
        Ok(Self::new(app_paths::settings_path(app)?))
    }

    #[cfg(test)]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Loads the record, creating the file with defaults on first run.
    pub fn load(&self) -> Result<SettingsRecord, String> {
        let Some(content) = read_optional_to_string(&self.path)
            .map_err(|e| format!("failed to read settings: {e}"))?
        else {
            let record = SettingsRecord::default();
            self.save(&record)?;
            tracing::info!(path = %self.path.display(), "created default settings file");
            return Ok(record);
        };

        let sections = parse_sections(&content);
        let (record, repaired) = normalize(&sections);
        if !repaired.is_empty() {
            tracing::debug!(
                path = %self.path.display(),
                fields = ?repaired,
                "settings fields fell back to defaults"
            );
        }
        Ok(record)
    }

    /// Overwrites the whole file; callers pass a complete, normalized record.
    pub fn save(&self, record: &SettingsRecord) -> Result<(), String> {
        write_file_atomic(&self.path, to_ini_string(record).as_bytes())
            .map_err(|e| format!("failed to write settings: {e}"))
    }
}

type Sections = HashMap<String, HashMap<String, String>>;

fn strip_matching_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

fn parse_section_header(trimmed: &str) -> Option<&str> {
    let inner = trimmed.strip_prefix('[')?.strip_suffix(']')?.trim();
    if inner.is_empty() {
        return None;
    }
    Some(inner)
}

/// Line-oriented INI parse. Only whole-line comments are recognised, so a value such as
/// `#000000` survives untouched. Keys before the first header are ignored.
fn parse_sections(content: &str) -> Sections {
    let mut sections = Sections::new();
    let mut current: Option<String> = None;

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(';') || trimmed.starts_with('#') {
            continue;
        }

        if let Some(name) = parse_section_header(trimmed) {
            sections.entry(name.to_string()).or_default();
            current = Some(name.to_string());
            continue;
        }

        let Some(section) = current.as_deref() else {
            continue;
        };
        let Some((key, value)) = trimmed.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }

        sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), strip_matching_quotes(value.trim()).to_string());
    }

    sections
}

fn parse_number(raw: Option<&str>) -> Option<f64> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_dimension(raw: Option<&str>) -> Option<u32> {
    let value = parse_number(raw)?.round();
    if value < 1.0 {
        return None;
    }
    // `as` saturates for out-of-range floats.
    Some(value as u32)
}

fn parse_position(raw_x: Option<&str>, raw_y: Option<&str>) -> (Option<i32>, Option<i32>) {
    match (parse_number(raw_x), parse_number(raw_y)) {
        (Some(x), Some(y)) => (Some(x.round() as i32), Some(y.round() as i32)),
        _ => (None, None),
    }
}

fn parse_flag(raw: Option<&str>) -> bool {
    raw.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

fn parse_transparency(raw: Option<&str>) -> Option<f64> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    // Overflowing values ("1e400") parse to infinity and clamp like any other out-of-range
    // number; only NaN is unusable.
    raw.parse::<f64>()
        .ok()
        .filter(|v| !v.is_nan())
        .map(|v| v.clamp(MIN_TRANSPARENCY, MAX_TRANSPARENCY))
}

fn parse_border_radius(raw: Option<&str>) -> Option<f64> {
    parse_number(raw).filter(|v| *v >= 0.0)
}

fn parse_color(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

fn field<'a>(group: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    group.get(key).map(String::as_str)
}

fn fallback<T>(
    value: Option<T>,
    default: T,
    name: &'static str,
    repaired: &mut Vec<&'static str>,
) -> T {
    value.unwrap_or_else(|| {
        repaired.push(name);
        default
    })
}

fn normalize(sections: &Sections) -> (SettingsRecord, Vec<&'static str>) {
    let empty = HashMap::new();
    let window = sections.get(SECTION_WINDOW_STATE).unwrap_or(&empty);
    let appearance = sections.get(SECTION_APPEARANCE).unwrap_or(&empty);

    let mut repaired = Vec::new();

    let width = fallback(
        parse_dimension(field(window, "width")),
        DEFAULT_WIDTH,
        "windowState.width",
        &mut repaired,
    );
    let height = fallback(
        parse_dimension(field(window, "height")),
        DEFAULT_HEIGHT,
        "windowState.height",
        &mut repaired,
    );
    let (x, y) = parse_position(field(window, "x"), field(window, "y"));

    let transparency = fallback(
        parse_transparency(field(appearance, "transparency")),
        DEFAULT_TRANSPARENCY,
        "appearance.transparency",
        &mut repaired,
    );
    let background_color = fallback(
        parse_color(field(appearance, "backgroundColor")),
        DEFAULT_BACKGROUND_COLOR.to_string(),
        "appearance.backgroundColor",
        &mut repaired,
    );
    let border_radius = fallback(
        parse_border_radius(field(appearance, "borderRadius")),
        DEFAULT_BORDER_RADIUS,
        "appearance.borderRadius",
        &mut repaired,
    );

    let record = SettingsRecord {
        window_state: WindowState {
            width,
            height,
            x,
            y,
            input_enabled: parse_flag(field(window, "inputEnabled")),
            always_on_top: parse_flag(field(window, "alwaysOnTop")),
        },
        appearance: Appearance {
            transparency,
            background_color,
            border_radius,
        },
    };

    (record, repaired)
}

// f64 `Display` already prints integral values without a fractional part ("50", not "50.0")
// and round-trips every finite value exactly.
fn format_number(value: f64) -> String {
    format!("{value}")
}

/// Deterministic serialization: fixed group order, fixed key order, `x`/`y` only when set.
pub fn to_ini_string(record: &SettingsRecord) -> String {
    let ws = &record.window_state;
    let ap = &record.appearance;

    let mut out = String::new();
    out.push_str(&format!("[{SECTION_WINDOW_STATE}]\n"));
    out.push_str(&format!("width={}\n", ws.width));
    out.push_str(&format!("height={}\n", ws.height));
    if let Some((x, y)) = ws.position() {
        out.push_str(&format!("x={x}\n"));
        out.push_str(&format!("y={y}\n"));
    }
    out.push_str(&format!("inputEnabled={}\n", ws.input_enabled));
    out.push_str(&format!("alwaysOnTop={}\n", ws.always_on_top));
    out.push('\n');
    out.push_str(&format!("[{SECTION_APPEARANCE}]\n"));
    out.push_str(&format!("transparency={}\n", format_number(ap.transparency)));
    out.push_str(&format!("backgroundColor={}\n", ap.background_color));
    out.push_str(&format!("borderRadius={}\n", format_number(ap.border_radius)));
    out
}

#[cfg(test)]
mod tests;
