//! Sentinel comment scanner.
//!
//! Scripts carry two kinds of marker lines:
//!
//! | Line prefix | Kind | Meaning |
//! |-------------|------|---------|
//! | `--!` | [`LineKind::Run`] | send the buffer now |
//! | `--:` | [`LineKind::Config`] | ordered config value (URL, then namespace) |
//!
//! Markers are only recognised at the very start of a line. Everything else
//! is [`LineKind::Other`].

/// Literal prefix of a run marker.
pub const RUN_PREFIX: &str = "--!";

/// Literal prefix of a config marker.
pub const CONFIG_PREFIX: &str = "--:";

/// Classification of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Starts with `--!`.
    Run,
    /// Starts with `--:`; holds the value after the prefix and at most one space.
    Config(&'a str),
    /// Anything else.
    Other,
}

/// Classify one line (without its `\n` terminator).
pub fn classify(line: &str) -> LineKind<'_> {
    if line.starts_with(RUN_PREFIX) {
        return LineKind::Run;
    }
    match line.strip_prefix(CONFIG_PREFIX) {
        Some(rest) => {
            let rest = rest.strip_prefix(' ').unwrap_or(rest);
            LineKind::Config(rest.strip_suffix('\r').unwrap_or(rest))
        }
        None => LineKind::Other,
    }
}

/// Result of a full-buffer scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scan<'a> {
    /// Number of run-marker lines.
    pub run_markers: usize,
    /// Config values in document order.
    pub config: Vec<&'a str>,
}

impl Scan<'_> {
    /// Whether the buffer asks to be sent.
    pub fn has_run_marker(&self) -> bool {
        self.run_markers > 0
    }
}

/// Classify every line of `buffer`.
pub fn scan(buffer: &str) -> Scan<'_> {
    let mut result = Scan::default();
    for line in buffer.split('\n') {
        match classify(line) {
            LineKind::Run => result.run_markers += 1,
            LineKind::Config(value) => result.config.push(value),
            LineKind::Other => {}
        }
    }
    result
}

/// Replace the `--!` prefix of every run-marker line with `block`.
///
/// The rest of each marker line, and every other line, is kept verbatim.
pub fn replace_run_markers(buffer: &str, block: &str) -> String {
    let mut out = String::with_capacity(buffer.len() + block.len());
    for (i, line) in buffer.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        match line.strip_prefix(RUN_PREFIX) {
            Some(rest) => {
                out.push_str(block);
                out.push_str(rest);
            }
            None => out.push_str(line),
        }
    }
    out
}
