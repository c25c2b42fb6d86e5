//! Human-readable byte quantities.

const SIZE_SUFFIXES: [&str; 9] = [
    "Bytes", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB",
];

/// Break a byte count into a scaled value and its unit suffix.
///
/// Negative inputs are treated as their absolute value; zero reports as
/// `(0.0, "Bytes")`.
pub fn readable_size(bytes: u64) -> (f64, &'static str) {
    if bytes == 0 {
        return (0.0, SIZE_SUFFIXES[0]);
    }
    let magnitude = ((bytes as f64).log2() / 10.0).floor() as usize;
    let magnitude = magnitude.min(SIZE_SUFFIXES.len() - 1);
    let adjusted = bytes as f64 / 1024f64.powi(magnitude as i32);
    (adjusted, SIZE_SUFFIXES[magnitude])
}

/// Format a byte count as `12.34MB`.
pub fn format_size(bytes: u64) -> String {
    let (size, unit) = readable_size(bytes);
    format!("{size:.2}{unit}")
}

/// Format a transfer rate as `12.34MB/s`.
pub fn format_rate(bytes_per_sec: u64) -> String {
    let (size, unit) = readable_size(bytes_per_sec);
    format!("{size:.2}{unit}/s")
}
