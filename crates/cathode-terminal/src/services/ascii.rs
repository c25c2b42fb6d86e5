//! ASCII art provider for the method registry.

use crate::response::ServiceResponse;

/// A banner loaded at composition time, served line by line with blank
/// padding around it.
#[derive(Debug, Clone)]
pub struct AsciiArt {
    lines: Vec<String>,
    spacing: usize,
}

impl AsciiArt {
    pub fn new(text: &str, spacing: usize) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
            spacing,
        }
    }

    /// The banner as visible responses, padded with empty lines.
    pub fn load(&self) -> Vec<ServiceResponse> {
        let mut responses = Vec::with_capacity(self.lines.len() + 2 * self.spacing);
        for _ in 0..self.spacing {
            responses.push(ServiceResponse::plain(""));
        }
        for line in &self.lines {
            responses.push(ServiceResponse::plain(line.clone()));
        }
        for _ in 0..self.spacing {
            responses.push(ServiceResponse::plain(""));
        }
        responses
    }
}
