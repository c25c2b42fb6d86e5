//! Text coloring decorator.
//!
//! Recognizes the `HEADER:body` shape on visible entries: error and
//! info headers get distinct header/body colors, anything else is
//! wrapped whole in the default response color. Background entries
//! pass through untouched.

use cathode_types::color::{Color, ColorKey, color_string};

use crate::response::{ERROR_MARKER, INFO_MARKER, ServiceResponse, split_marker};
use crate::services::DecoratorService;

const ERROR_COLOR: &str = "red";
const ERROR_BODY_COLOR: &str = "yellow";
const INFO_COLOR: &str = "blue";
const INFO_BODY_COLOR: &str = "yellow";
// nfcp stands for "not from color palette".
const SIMPLE_RESPONSE_COLOR: &str = "nfcp_intense_yellow";

/// Applies the palette to visible responses.
pub struct TextFormatterService {
    colors: Vec<ColorKey>,
}

impl TextFormatterService {
    pub fn new() -> Self {
        Self {
            colors: default_palette(),
        }
    }

    /// Replace the palette (keys looked up by name).
    pub fn with_palette(mut self, colors: Vec<ColorKey>) -> Self {
        self.colors = colors;
        self
    }

    fn color(&self, key: &str) -> Color {
        match self.colors.iter().find(|c| c.key == key) {
            Some(entry) => entry.color,
            None => {
                log::warn!("palette has no color {key:?}");
                Color::rgb(255, 255, 255)
            },
        }
    }

    fn format_text(&self, text: &str) -> String {
        if let Some((header, body)) = split_marker(text) {
            match header {
                ERROR_MARKER => {
                    return format!(
                        "{} {}",
                        color_string(header, self.color(ERROR_COLOR)),
                        color_string(body, self.color(ERROR_BODY_COLOR))
                    );
                },
                INFO_MARKER => {
                    return format!(
                        "{} {}",
                        color_string(header, self.color(INFO_COLOR)),
                        color_string(body, self.color(INFO_BODY_COLOR))
                    );
                },
                // A plain response that happens to contain a colon.
                _ => {},
            }
        }
        color_string(text, self.color(SIMPLE_RESPONSE_COLOR))
    }
}

impl Default for TextFormatterService {
    fn default() -> Self {
        Self::new()
    }
}

impl DecoratorService for TextFormatterService {
    fn decorate(&mut self, responses: Vec<ServiceResponse>) -> Vec<ServiceResponse> {
        responses
            .into_iter()
            .map(|response| match response {
                ServiceResponse::Plain { text, background } if !background => {
                    ServiceResponse::Plain {
                        text: self.format_text(&text),
                        background,
                    }
                },
                other => other,
            })
            .collect()
    }
}

/// The stock palette.
pub fn default_palette() -> Vec<ColorKey> {
    [
        ("black", "#021b21"),
        ("gray", "#555d71"),
        ("red", "#ff5879"),
        ("yellow", "#f2f1b9"),
        ("blue", "#9ed9d8"),
        ("purple", "#d936ff"),
        ("orange", "#ef5847"),
        ("nfcp_intense_yellow", "#ffca00"),
    ]
    .into_iter()
    .filter_map(|(key, hex)| Color::parse_hex(hex).map(|c| ColorKey::new(key, c)))
    .collect()
}
