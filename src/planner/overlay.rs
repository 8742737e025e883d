//! Filter chain construction for vertical reformatting with text overlays

use serde::{Deserialize, Serialize};

use crate::domain::model::{Canvas, Geometry, TextPlacement, TextSlot};

/// Visual style of the overlay text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    /// Font family resolved through fontconfig; ffmpeg's default when unset
    pub font: Option<String>,
    pub title_color: String,
    pub subtitle_color: String,
    pub box_color: String,
    pub title_box_border: u32,
    pub subtitle_box_border: u32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            font: None,
            title_color: "yellow".to_string(),
            subtitle_color: "white".to_string(),
            box_color: "black@0.4".to_string(),
            title_box_border: 10,
            subtitle_box_border: 8,
        }
    }
}

/// Escape text so it can be inlined as an unquoted drawtext option value.
///
/// Two levels apply: the option parser (`\ ' :`) and then the filtergraph
/// parser (`\ ' [ ] , ;`). `%` is left alone because filters are emitted
/// with `expansion=none`.
pub fn escape_drawtext(text: &str) -> String {
    let option_level = escape_chars(text, &['\\', '\'', ':']);
    escape_chars(&option_level, &['\\', '\'', '[', ']', ',', ';'])
}

fn escape_chars(text: &str, special: &[char]) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if special.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Build the `-vf` chain: scale into the canvas, pad to center, draw text
pub fn vertical_filter(
    geometry: &Geometry,
    canvas: Canvas,
    placement: &TextPlacement,
    style: &OverlayStyle,
) -> String {
    let mut filters = vec![
        format!("scale={}:{}", geometry.scaled_width, geometry.scaled_height),
        format!(
            "pad={}:{}:{}:{}:color=black",
            canvas.width, canvas.height, geometry.offset_x, geometry.offset_y
        ),
        "setsar=1".to_string(),
    ];

    if let Some(title) = &placement.title {
        filters.push(drawtext(title, &style.title_color, style.title_box_border, style));
    }
    if let Some(subtitle) = &placement.subtitle {
        filters.push(drawtext(
            subtitle,
            &style.subtitle_color,
            style.subtitle_box_border,
            style,
        ));
    }

    filters.join(",")
}

fn drawtext(slot: &TextSlot, color: &str, box_border: u32, style: &OverlayStyle) -> String {
    let font = style
        .font
        .as_deref()
        .map(|f| format!(":font={}", escape_drawtext(f)))
        .unwrap_or_default();

    format!(
        "drawtext=expansion=none{}:text={}:fontcolor={}:fontsize={}:x=(w-text_w)/2:y={}:box=1:boxcolor={}:boxborderw={}",
        font,
        escape_drawtext(&slot.text),
        color,
        slot.font_size,
        slot.y,
        style.box_color,
        box_border
    )
}
