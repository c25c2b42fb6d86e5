//! Translate in-band `<color=#RRGGBBAA>` markup into ANSI escapes.

use cathode_types::color::Color;

const RESET: &str = "\x1b[0m";

/// Rewrite color markup as 24-bit ANSI color sequences. Tags that do
/// not parse are passed through literally.
pub fn markup_to_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("<color=") {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match tail.find('>') {
            Some(end) => {
                let spec = &tail["<color=".len()..end];
                match Color::parse_hex(spec) {
                    Some(color) => {
                        out.push_str(&format!(
                            "\x1b[38;2;{};{};{}m",
                            color.r, color.g, color.b
                        ));
                    },
                    None => out.push_str(&tail[..=end]),
                }
                rest = &tail[end + 1..];
            },
            None => {
                out.push_str(tail);
                return out;
            },
        }
    }
    out.push_str(rest);
    out.replace("</color>", RESET)
}
