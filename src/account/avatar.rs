//! Generated initials avatar tinted by the active city theme.

use crate::theme::CityTheme;

/// Avatar glyphs derived from a display name or email.
///
/// CJK names use their last character; everything else uses the first two
/// ASCII alphanumerics, uppercased. Falls back to `?`.
pub fn avatar_text(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return "?".to_string();
    }
    if trimmed.chars().any(is_cjk) {
        return trimmed
            .chars()
            .filter(|c| !c.is_whitespace())
            .last()
            .map(String::from)
            .unwrap_or_else(|| "?".to_string());
    }
    let letters: String = trimmed
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(2)
        .collect::<String>()
        .to_ascii_uppercase();
    if letters.is_empty() {
        "?".to_string()
    } else {
        letters
    }
}

fn is_cjk(c: char) -> bool {
    matches!(c, '\u{3400}'..='\u{9FFF}' | '\u{F900}'..='\u{FAFF}')
}

/// 128x128 circular SVG avatar.
pub fn avatar_svg(text: &str, theme: CityTheme) -> String {
    let meta = theme.meta();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="128" height="128" viewBox="0 0 128 128">
  <defs>
    <clipPath id="c">
      <circle cx="64" cy="64" r="64" />
    </clipPath>
  </defs>
  <g clip-path="url(#c)">
    <rect width="128" height="128" fill="{bg}" />
    <text x="64" y="64" text-anchor="middle" dominant-baseline="central" font-family="-apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Helvetica, Arial" font-size="48" font-weight="700" fill="{fg}">{text}</text>
  </g>
</svg>"#,
        bg = meta.avatar_bg,
        fg = meta.avatar_text,
        text = escape_xml(text),
    )
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
