//! SVG primitive emission: a growing text document plus the handful of
//! element writers the map needs.

use geo::Coord;

use super::settings::Offset;

/// Format a coordinate with 6 significant digits, trailing zeros stripped.
pub(crate) fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (5 - magnitude).max(0) as usize;
    let mut text = format!("{value:.decimals$}");
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    text
}

/// Escape the five XML-special characters in label text.
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Positioning and typography shared by a label and its underlay.
pub(crate) struct Label<'a> {
    pub position: Coord<f64>,
    pub offset: Offset,
    pub font_size: u32,
    pub bold: bool,
    pub text: &'a str,
}

/// An SVG document under construction. Primitives appear in the output in
/// the exact order they are written.
pub(crate) struct SvgDocument {
    buf: String,
}

impl SvgDocument {
    pub(crate) fn new() -> Self {
        let mut buf = String::new();
        buf.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n");
        buf.push_str("<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\">\n");
        Self { buf }
    }

    /// Unfilled polyline with round caps and joins.
    pub(crate) fn polyline(&mut self, points: &[Coord<f64>], stroke: &str, stroke_width: f64) {
        self.buf.push_str("<polyline points=\"");
        for (i, point) in points.iter().enumerate() {
            if i > 0 {
                self.buf.push(' ');
            }
            self.buf.push_str(&format!("{},{}", format_number(point.x), format_number(point.y)));
        }
        self.buf.push_str(&format!(
            "\" fill=\"none\" stroke=\"{stroke}\" stroke-width=\"{}\" \
             stroke-linecap=\"round\" stroke-linejoin=\"round\"/>\n",
            format_number(stroke_width),
        ));
    }

    /// Filled circle without a stroke.
    pub(crate) fn circle(&mut self, center: Coord<f64>, radius: f64, fill: &str) {
        self.buf.push_str(&format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{fill}\"/>\n",
            format_number(center.x),
            format_number(center.y),
            format_number(radius),
        ));
    }

    /// Text node. `stroke` carries the underlay halo: color plus width,
    /// rendered with round caps and joins.
    pub(crate) fn text(&mut self, label: &Label, fill: &str, stroke: Option<(&str, f64)>) {
        self.buf.push_str(&format!("<text fill=\"{fill}\""));
        if let Some((color, width)) = stroke {
            self.buf.push_str(&format!(
                " stroke=\"{color}\" stroke-width=\"{}\" \
                 stroke-linecap=\"round\" stroke-linejoin=\"round\"",
                format_number(width),
            ));
        }
        self.buf.push_str(&format!(
            " x=\"{}\" y=\"{}\" dx=\"{}\" dy=\"{}\" font-size=\"{}\" font-family=\"Verdana\"",
            format_number(label.position.x),
            format_number(label.position.y),
            format_number(label.offset.dx()),
            format_number(label.offset.dy()),
            label.font_size,
        ));
        if label.bold {
            self.buf.push_str(" font-weight=\"bold\"");
        }
        self.buf.push_str(&format!(">{}</text>\n", escape_xml(label.text)));
    }

    /// Close the root element and hand back the document text.
    pub(crate) fn finish(mut self) -> String {
        self.buf.push_str("</svg>\n");
        self.buf
    }
}
