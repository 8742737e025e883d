//! Letterbox/pillarbox fit and text placement

use crate::domain::model::{Canvas, Geometry, TextPlacement, TextSlot};
use crate::error::{SplicerError, SplicerResult};

/// Distance in pixels text must keep from the canvas top and bottom edges
pub const EDGE_CLEARANCE_PX: i64 = 4;

/// Computes how a source frame is fitted into a canvas and where text goes
pub struct GeometryPlanner;

impl GeometryPlanner {
    /// Scale `iw x ih` uniformly to fit inside the canvas and center it.
    ///
    /// The limiting dimension matches the canvas exactly; the other is
    /// floored. Integer arithmetic keeps the exact-fit case free of float
    /// rounding (1920 * 1080 / 1920 is 1080, never 1079).
    pub fn fit_center(iw: u32, ih: u32, canvas: Canvas) -> SplicerResult<Geometry> {
        if iw == 0 || ih == 0 {
            return Err(SplicerError::invalid(format!(
                "source dimensions must be positive, got {}x{}",
                iw, ih
            )));
        }
        if canvas.width == 0 || canvas.height == 0 {
            return Err(SplicerError::invalid(format!(
                "canvas dimensions must be positive, got {}",
                canvas
            )));
        }

        let (iw64, ih64) = (iw as u64, ih as u64);
        let (tw64, th64) = (canvas.width as u64, canvas.height as u64);

        // tw/iw <= th/ih  <=>  tw*ih <= th*iw
        let width_limited = tw64 * ih64 <= th64 * iw64;
        let (scaled_width, scaled_height) = if width_limited {
            (tw64, (ih64 * tw64 / iw64).max(1))
        } else {
            ((iw64 * th64 / ih64).max(1), th64)
        };

        let scale = (canvas.width as f64 / iw as f64).min(canvas.height as f64 / ih as f64);

        Ok(Geometry {
            scale,
            scaled_width: scaled_width as u32,
            scaled_height: scaled_height as u32,
            offset_x: ((tw64 - scaled_width) / 2) as u32,
            offset_y: ((th64 - scaled_height) / 2) as u32,
        })
    }

    /// Position title and subtitle around the visible video area.
    ///
    /// The title sits just above the video and the subtitle just below it;
    /// when there is no room outside the video they move inside its top or
    /// bottom edge. Empty or absent text produces no slot.
    pub fn place_text(
        geometry: &Geometry,
        canvas: Canvas,
        title: Option<&str>,
        subtitle: Option<&str>,
    ) -> TextPlacement {
        let sh = geometry.scaled_height as i64;
        let oy = geometry.offset_y as i64;
        let th = canvas.height as i64;

        let title_size = (sh * 6 / 100).max(12);
        let subtitle_size = (sh * 45 / 1000).max(10);
        let margin = (sh * 2 / 100).max(6);

        let title = non_empty(title).map(|text| {
            let mut y = oy - title_size - margin;
            if y < EDGE_CLEARANCE_PX {
                y = oy + margin;
            }
            slot(text, title_size, y, th)
        });

        let subtitle = non_empty(subtitle).map(|text| {
            let mut y = oy + sh + margin;
            if y + subtitle_size > th - EDGE_CLEARANCE_PX {
                y = oy + sh - subtitle_size - margin;
            }
            slot(text, subtitle_size, y, th)
        });

        TextPlacement {
            margin_px: margin as u32,
            title,
            subtitle,
        }
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.is_empty())
}

fn slot(text: &str, font_size: i64, y: i64, canvas_height: i64) -> TextSlot {
    let max_y = (canvas_height - font_size).max(0);
    TextSlot {
        text: text.to_string(),
        font_size: font_size as u32,
        y: y.clamp(0, max_y) as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(width: u32, height: u32) -> Canvas {
        Canvas { width, height }
    }

    #[test]
    fn test_landscape_into_vertical() {
        let g = GeometryPlanner::fit_center(1920, 1080, Canvas::VERTICAL_HD).unwrap();
        assert_eq!(g.scale, 0.5625);
        assert_eq!(g.scaled_width, 1080);
        assert_eq!(g.scaled_height, 607);
        assert_eq!(g.offset_x, 0);
        assert_eq!(g.offset_y, 656);
    }

    #[test]
    fn test_tall_source_is_pillarboxed() {
        let g = GeometryPlanner::fit_center(720, 1920, canvas(1080, 1920)).unwrap();
        assert_eq!(g.scaled_height, 1920);
        assert_eq!(g.scaled_width, 720);
        assert_eq!(g.offset_x, 180);
        assert_eq!(g.offset_y, 0);
    }

    #[test]
    fn test_same_aspect_fills_canvas() {
        let g = GeometryPlanner::fit_center(540, 960, Canvas::VERTICAL_HD).unwrap();
        assert_eq!((g.scaled_width, g.scaled_height), (1080, 1920));
        assert_eq!((g.offset_x, g.offset_y), (0, 0));
        assert_eq!(g.scale, 2.0);
    }

    #[test]
    fn test_fit_invariants_hold() {
        let sources = [(1920, 1080), (1280, 720), (640, 480), (1080, 1920), (333, 777), (4096, 2160), (1, 1)];
        let canvases = [canvas(1080, 1920), canvas(1920, 1080), canvas(1000, 1000), canvas(7, 13)];
        for &(iw, ih) in &sources {
            for &c in &canvases {
                let g = GeometryPlanner::fit_center(iw, ih, c).unwrap();
                assert!(g.scaled_width <= c.width);
                assert!(g.scaled_height <= c.height);
                assert!(g.scaled_width == c.width || g.scaled_height == c.height);
                assert_eq!(g.offset_x, (c.width - g.scaled_width) / 2);
                assert_eq!(g.offset_y, (c.height - g.scaled_height) / 2);

                // Aspect ratio preserved up to one pixel of flooring
                let source_ratio = iw as f64 / ih as f64;
                let lo = g.scaled_width as f64 / (g.scaled_height as f64 + 1.0);
                let hi = (g.scaled_width as f64 + 1.0) / g.scaled_height as f64;
                assert!(lo <= source_ratio && source_ratio <= hi, "{}x{} in {}", iw, ih, c);
            }
        }
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            GeometryPlanner::fit_center(0, 1080, Canvas::VERTICAL_HD),
            Err(SplicerError::InvalidArgument { .. })
        ));
        assert!(GeometryPlanner::fit_center(1920, 0, Canvas::VERTICAL_HD).is_err());
        assert!(GeometryPlanner::fit_center(1920, 1080, canvas(0, 1920)).is_err());
        assert!(GeometryPlanner::fit_center(1920, 1080, canvas(1080, 0)).is_err());
    }

    #[test]
    fn test_text_outside_video_when_room() {
        let c = Canvas::VERTICAL_HD;
        let g = GeometryPlanner::fit_center(1920, 1080, c).unwrap();
        let placement = GeometryPlanner::place_text(&g, c, Some("Title"), Some("Caption"));

        assert_eq!(placement.margin_px, 12);
        let title = placement.title.unwrap();
        assert_eq!(title.font_size, 36);
        assert_eq!(title.y, 656 - 36 - 12);
        let subtitle = placement.subtitle.unwrap();
        assert_eq!(subtitle.font_size, 27);
        assert_eq!(subtitle.y, 656 + 607 + 12);
    }

    #[test]
    fn test_text_moves_inside_when_video_fills_canvas() {
        let c = Canvas::VERTICAL_HD;
        let g = GeometryPlanner::fit_center(1080, 1920, c).unwrap();
        let placement = GeometryPlanner::place_text(&g, c, Some("Title"), Some("Caption"));

        // 1920 * 0.06 = 115, 1920 * 0.045 = 86, 1920 * 0.02 = 38
        let title = placement.title.unwrap();
        assert_eq!(title.font_size, 115);
        assert_eq!(title.y, 38);
        let subtitle = placement.subtitle.unwrap();
        assert_eq!(subtitle.font_size, 86);
        assert_eq!(subtitle.y, 1920 - 86 - 38);
    }

    #[test]
    fn test_title_fallback_stays_within_video_top_band() {
        let sources = [(1080, 1920), (1000, 1700), (1080, 1800), (900, 1600)];
        let c = Canvas::VERTICAL_HD;
        for &(iw, ih) in &sources {
            let g = GeometryPlanner::fit_center(iw, ih, c).unwrap();
            let placement = GeometryPlanner::place_text(&g, c, Some("T"), None);
            let title = placement.title.unwrap();
            let threshold = title.font_size + placement.margin_px + 4;
            if g.offset_y < threshold {
                assert!(title.y >= g.offset_y);
                assert!(title.y <= g.offset_y + placement.margin_px);
            }
        }
    }

    #[test]
    fn test_small_video_uses_minimum_sizes() {
        let c = canvas(200, 400);
        let g = GeometryPlanner::fit_center(160, 90, c).unwrap();
        assert_eq!(g.scaled_height, 112);
        let placement = GeometryPlanner::place_text(&g, c, Some("T"), Some("S"));
        assert_eq!(placement.margin_px, 6);
        assert_eq!(placement.title.unwrap().font_size, 12);
        assert_eq!(placement.subtitle.unwrap().font_size, 10);
    }

    #[test]
    fn test_empty_or_missing_text_is_omitted() {
        let c = Canvas::VERTICAL_HD;
        let g = GeometryPlanner::fit_center(1920, 1080, c).unwrap();

        let placement = GeometryPlanner::place_text(&g, c, Some(""), None);
        assert!(placement.is_empty());

        let placement = GeometryPlanner::place_text(&g, c, None, Some("Only subtitle"));
        assert!(placement.title.is_none());
        assert_eq!(placement.subtitle.unwrap().text, "Only subtitle");
    }

    #[test]
    fn test_text_never_leaves_canvas() {
        let c = canvas(100, 60);
        let g = GeometryPlanner::fit_center(100, 60, c).unwrap();
        let placement = GeometryPlanner::place_text(&g, c, Some("T"), Some("S"));
        for slot in [placement.title.unwrap(), placement.subtitle.unwrap()] {
            assert!(slot.y + slot.font_size <= c.height);
        }
    }

    #[test]
    fn test_planner_is_deterministic() {
        let c = Canvas::VERTICAL_HD;
        let a = GeometryPlanner::fit_center(1280, 720, c).unwrap();
        let b = GeometryPlanner::fit_center(1280, 720, c).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            GeometryPlanner::place_text(&a, c, Some("x"), Some("y")),
            GeometryPlanner::place_text(&b, c, Some("x"), Some("y"))
        );
    }
}
