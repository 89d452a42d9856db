use std::fmt::Write as _;

use crate::error::{ChartError, ChartResult};
use crate::geometry::format_coord;
use crate::render::{
    CardContent, ChartCard, CirclePrimitive, Color, LinePrimitive, PathPrimitive,
    PolygonPrimitive, RectPrimitive, RenderFrame, Renderer, Stroke, TextHAlign, TextPrimitive,
};

/// Height of the title band drawn above the card body.
pub const TITLE_BAND_PX: u32 = 32;
const TITLE_FONT_PX: f64 = 16.0;
const TITLE_INSET_PX: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SvgRenderStats {
    pub polygons_drawn: usize,
    pub paths_drawn: usize,
    pub rects_drawn: usize,
    pub lines_drawn: usize,
    pub circles_drawn: usize,
    pub texts_drawn: usize,
}

/// Serializes cards to standalone `<svg>` documents.
///
/// Each card becomes a title band followed by the body group shifted below
/// it. The latest document is kept until the next render.
#[derive(Debug)]
pub struct SvgRenderer {
    background: Color,
    font_family: String,
    last_document: Option<String>,
    last_stats: SvgRenderStats,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            background: Color::rgb(1.0, 1.0, 1.0),
            font_family: "Arial, sans-serif".to_owned(),
            last_document: None,
            last_stats: SvgRenderStats::default(),
        }
    }
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "svg"
    }

    pub fn set_background(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.background = color;
        Ok(())
    }

    pub fn set_font_family(&mut self, family: impl Into<String>) -> ChartResult<()> {
        let family = family.into();
        if family.trim().is_empty() {
            return Err(ChartError::InvalidData(
                "font family must not be empty".to_owned(),
            ));
        }
        self.font_family = family;
        Ok(())
    }

    #[must_use]
    pub fn last_document(&self) -> Option<&str> {
        self.last_document.as_deref()
    }

    pub fn take_document(&mut self) -> Option<String> {
        self.last_document.take()
    }

    #[must_use]
    pub fn last_stats(&self) -> SvgRenderStats {
        self.last_stats
    }

    /// Renders `card` and returns the document without keeping it.
    pub fn card_to_svg(&mut self, card: &ChartCard) -> ChartResult<String> {
        card.validate()?;
        let width = card.viewport.width;
        let height = card.viewport.height + TITLE_BAND_PX;
        let mut stats = SvgRenderStats::default();
        let mut out = String::new();

        write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="{}">"#,
            escape_xml(&self.font_family)
        )
        .map_err(map_write_error)?;
        write!(
            out,
            r#"<rect x="0" y="0" width="{width}" height="{height}" fill="{}"/>"#,
            self.background.to_css()
        )
        .map_err(map_write_error)?;
        write!(
            out,
            r##"<text class="card-title" x="{}" y="{}" font-size="{}" font-weight="bold" fill="#333333">{}</text>"##,
            format_coord(TITLE_INSET_PX),
            format_coord(f64::from(TITLE_BAND_PX) / 2.0 + TITLE_FONT_PX / 3.0),
            format_coord(TITLE_FONT_PX),
            escape_xml(&card.title)
        )
        .map_err(map_write_error)?;

        let class = match card.content {
            CardContent::Visual => "card-body",
            CardContent::Message(_) => "card-body card-empty",
        };
        write!(
            out,
            r#"<g class="{class}" transform="translate(0 {TITLE_BAND_PX})">"#
        )
        .map_err(map_write_error)?;
        write_frame(&mut out, &card.body, &mut stats)?;
        out.push_str("</g></svg>");

        self.last_stats = stats;
        Ok(out)
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, card: &ChartCard) -> ChartResult<()> {
        let document = self.card_to_svg(card)?;
        self.last_document = Some(document);
        Ok(())
    }
}

fn write_frame(out: &mut String, frame: &RenderFrame, stats: &mut SvgRenderStats) -> ChartResult<()> {
    for polygon in &frame.polygons {
        write_polygon(out, polygon)?;
        stats.polygons_drawn += 1;
    }
    for path in &frame.paths {
        write_path(out, path)?;
        stats.paths_drawn += 1;
    }
    for rect in &frame.rects {
        write_rect(out, *rect)?;
        stats.rects_drawn += 1;
    }
    for line in &frame.lines {
        write_line(out, *line)?;
        stats.lines_drawn += 1;
    }
    for circle in &frame.circles {
        write_circle(out, *circle)?;
        stats.circles_drawn += 1;
    }
    for text in &frame.texts {
        write_text(out, text)?;
        stats.texts_drawn += 1;
    }
    Ok(())
}

fn stroke_attrs(stroke: Option<Stroke>) -> String {
    match stroke {
        Some(stroke) => format!(
            r#" stroke="{}" stroke-width="{}""#,
            stroke.color.to_css(),
            format_coord(stroke.width)
        ),
        None => String::new(),
    }
}

fn fill_attr(fill: Option<Color>) -> String {
    fill.map_or_else(|| "none".to_owned(), Color::to_css)
}

fn write_polygon(out: &mut String, polygon: &PolygonPrimitive) -> ChartResult<()> {
    let points = polygon
        .points
        .iter()
        .map(|point| format!("{},{}", format_coord(point.x), format_coord(point.y)))
        .collect::<Vec<_>>()
        .join(" ");
    write!(
        out,
        r#"<polygon points="{points}" fill="{}"{}/>"#,
        polygon.fill.to_css(),
        stroke_attrs(polygon.stroke)
    )
    .map_err(map_write_error)
}

fn write_path(out: &mut String, path: &PathPrimitive) -> ChartResult<()> {
    write!(
        out,
        r#"<path d="{}" fill="{}"{}/>"#,
        path.data.to_svg(),
        fill_attr(path.fill),
        stroke_attrs(path.stroke)
    )
    .map_err(map_write_error)
}

fn write_rect(out: &mut String, rect: RectPrimitive) -> ChartResult<()> {
    let corner = if rect.corner_radius > 0.0 {
        format!(r#" rx="{}""#, format_coord(rect.corner_radius))
    } else {
        String::new()
    };
    write!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}"{corner} fill="{}"/>"#,
        format_coord(rect.x),
        format_coord(rect.y),
        format_coord(rect.width),
        format_coord(rect.height),
        rect.fill.to_css()
    )
    .map_err(map_write_error)
}

fn write_line(out: &mut String, line: LinePrimitive) -> ChartResult<()> {
    let dash = line
        .dash
        .map(|dash| format!(r#" stroke-dasharray="{}""#, format_coord(dash)))
        .unwrap_or_default();
    write!(
        out,
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"{dash}/>"#,
        format_coord(line.x1),
        format_coord(line.y1),
        format_coord(line.x2),
        format_coord(line.y2),
        line.color.to_css(),
        format_coord(line.stroke_width)
    )
    .map_err(map_write_error)
}

fn write_circle(out: &mut String, circle: CirclePrimitive) -> ChartResult<()> {
    write!(
        out,
        r#"<circle cx="{}" cy="{}" r="{}" fill="{}"{}/>"#,
        format_coord(circle.cx),
        format_coord(circle.cy),
        format_coord(circle.radius),
        fill_attr(circle.fill),
        stroke_attrs(circle.stroke)
    )
    .map_err(map_write_error)
}

fn write_text(out: &mut String, text: &TextPrimitive) -> ChartResult<()> {
    let anchor = match text.h_align {
        TextHAlign::Left => "start",
        TextHAlign::Center => "middle",
        TextHAlign::Right => "end",
    };
    let weight = if text.bold { r#" font-weight="bold""# } else { "" };
    let rotation = if text.rotation_deg == 0.0 {
        String::new()
    } else {
        format!(
            r#" transform="rotate({} {} {})""#,
            format_coord(text.rotation_deg),
            format_coord(text.x),
            format_coord(text.y)
        )
    };
    write!(
        out,
        r#"<text x="{}" y="{}" font-size="{}" fill="{}" text-anchor="{anchor}"{weight}{rotation}>{}</text>"#,
        format_coord(text.x),
        format_coord(text.y),
        format_coord(text.font_size_px),
        text.color.to_css(),
        escape_xml(&text.text)
    )
    .map_err(map_write_error)
}

/// Escapes the five XML special characters.
#[must_use]
pub fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn map_write_error(err: std::fmt::Error) -> ChartError {
    ChartError::InvalidData(format!("failed to write svg markup: {err}"))
}
