//! Crossterm-backed status renderer.
//!
//! Everything goes to stderr except `detail`, which carries the command's
//! actual payload (URLs, tokens, SVG) and goes to stdout so it can be piped.

use crossterm::style::{Color, Stylize};

const INDENT: &str = "  ";
const GLYPH_BULLET: &str = "•";
const GLYPH_SWATCH: &str = "██";
const LABEL_OK: &str = "ok:";
const LABEL_WARNING: &str = "warning:";
const LABEL_ERROR: &str = "error:";

const COLOR_BULLET: Color = Color::DarkGrey;
const COLOR_TITLE: Color = Color::White;
const COLOR_KEY: Color = Color::Grey;
const COLOR_VALUE: Color = Color::White;
const COLOR_OK: Color = Color::Green;
const COLOR_WARNING: Color = Color::Yellow;
const COLOR_ERROR: Color = Color::Red;

/// Default terminal renderer.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn color(&self) -> bool {
        self.color
    }

    pub fn section(&self, title: &str) {
        if self.color {
            eprintln!(
                "{} {}",
                GLYPH_BULLET.with(COLOR_BULLET),
                title.with(COLOR_TITLE).bold()
            );
        } else {
            eprintln!("{title}:");
        }
    }

    /// Print a key/value line under a section.
    pub fn field(&self, key: &str, value: &str) {
        if self.color {
            eprintln!(
                "{INDENT}{} {}",
                format!("{key}:").with(COLOR_KEY),
                value.with(COLOR_VALUE)
            );
        } else {
            eprintln!("{INDENT}{key}: {value}");
        }
    }

    pub fn detail(&self, text: &str) {
        println!("{text}");
    }

    pub fn swatch(&self, label: &str, hex: &str, marker: &str) {
        match parse_hex_color(hex).filter(|_| self.color) {
            Some(color) => eprintln!("{INDENT}{} {marker} {label}", GLYPH_SWATCH.with(color)),
            None => eprintln!("{INDENT}{marker} {label} ({hex})"),
        }
    }

    pub fn success(&self, msg: &str) {
        self.status(LABEL_OK, COLOR_OK, msg);
    }

    pub fn warn(&self, msg: &str) {
        self.status(LABEL_WARNING, COLOR_WARNING, msg);
    }

    pub fn error(&self, msg: &str) {
        self.status(LABEL_ERROR, COLOR_ERROR, msg);
    }

    fn status(&self, label: &str, color: Color, msg: &str) {
        if self.color {
            eprintln!("{} {msg}", label.with(color).bold());
        } else {
            eprintln!("{label} {msg}");
        }
    }
}

/// Parse `#RRGGBB` into a truecolor value.
fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some(Color::Rgb {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
    })
}
