//! Quoting for generated markup and scripts

/// Escape text for use in XML character data or a double-quoted attribute.
///
/// Control characters that XML 1.0 forbids are dropped.
pub fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            // typographic single quotes also close PowerShell literals
            '\u{2018}'..='\u{201B}' => escaped.push_str(&format!("&#x{:X};", c as u32)),
            '\t' | '\n' | '\r' => escaped.push(c),
            '\u{0}'..='\u{1F}' => {}
            '\u{FFFE}' | '\u{FFFF}' => {}
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render text as a PowerShell single-quoted string literal.
///
/// Single-quoted strings are not interpolated; the only special characters
/// are the quote marks themselves, which PowerShell also recognises in
/// their typographic forms.
pub fn powershell_literal(text: &str) -> String {
    let mut literal = String::with_capacity(text.len() + 2);
    literal.push('\'');
    for c in text.chars() {
        if matches!(c, '\'' | '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}') {
            literal.push(c);
        }
        literal.push(c);
    }
    literal.push('\'');
    literal
}
