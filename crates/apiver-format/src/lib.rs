//! Renders [`ApiVersion`] values through a custom format-specifier
//! mini-language.
//!
//! Specifier letters: `F`/`FF` (full form), `G`/`GG` (group date),
//! `yyyy`/`MM`/`dd` (group parts), `V`–`VVVV` (numeric forms), `v`
//! (minor), `P`/`p` with an optional digit count (zero-padded major /
//! minor, default width 2), `S` (status). Literal text is quoted with
//! `'`/`"`, escaped with `\`, and `%X` writes a single specifier `X`
//! without repetition expansion. Unrecognized specifier letters are
//! dropped silently; broken format strings (unterminated literal,
//! dangling escape) are [`FormatError`]s.
//!
//! ```
//! use apiver_core::ApiVersion;
//!
//! let v = ApiVersion::with_status(1, 5, "Alpha").unwrap();
//! assert_eq!(apiver_format::format(&v, "'v'VVVV").unwrap(), "v1.5-Alpha");
//! ```

mod token;

pub use token::{FormatError, Token, Tokenizer};

use apiver_core::ApiVersion;
use chrono::{Datelike, NaiveDate};
use std::fmt::Write as _;

/// A destination for rendered output.
///
/// `write` reports whether the sink can keep accepting output; the
/// writer stops early on `false` without error.
pub trait FormatSink {
    fn write(&mut self, text: &str) -> bool;
}

impl FormatSink for String {
    fn write(&mut self, text: &str) -> bool {
        self.push_str(text);
        true
    }
}

/// A fixed-capacity sink: output beyond `capacity` bytes is refused and
/// rendering stops at the last whole token that fit.
#[derive(Debug, Clone)]
pub struct BoundedSink {
    buffer: String,
    capacity: usize,
}

impl BoundedSink {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: String::new(),
            capacity,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn into_string(self) -> String {
        self.buffer
    }
}

impl FormatSink for BoundedSink {
    fn write(&mut self, text: &str) -> bool {
        if self.buffer.len() + text.len() > self.capacity {
            return false;
        }
        self.buffer.push_str(text);
        true
    }
}

/// Per-part rendering hooks.
///
/// The engine decides *which* parts a specifier emits; a renderer decides
/// what each part looks like. Substitute an implementation to customize
/// status or number rendering without reimplementing the engine.
pub trait PartRenderer {
    fn render_group(&self, group: NaiveDate, out: &mut String) {
        let _ = write!(
            out,
            "{:04}-{:02}-{:02}",
            group.year(),
            group.month(),
            group.day()
        );
    }

    /// `pad` is the minimum digit count; zero means no padding.
    fn render_number(&self, value: u64, pad: usize, out: &mut String) {
        let _ = write!(out, "{value:0pad$}");
    }

    fn render_status(&self, status: &str, out: &mut String) {
        out.push_str(status);
    }
}

/// The stock renderer used by [`format`] and [`format_into`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRenderer;

impl PartRenderer for DefaultRenderer {}

/// Render `version` against `format` into a new string.
///
/// An empty format string renders all applicable parts (the `F` form).
pub fn format(version: &ApiVersion, format: &str) -> Result<String, FormatError> {
    let mut out = String::new();
    format_with(version, format, &DefaultRenderer, &mut out)?;
    Ok(out)
}

/// Render into any [`FormatSink`], stopping early when the sink is full.
pub fn format_into(
    version: &ApiVersion,
    format: &str,
    sink: &mut impl FormatSink,
) -> Result<(), FormatError> {
    format_with(version, format, &DefaultRenderer, sink)
}

/// Render with a substituted [`PartRenderer`].
pub fn format_with(
    version: &ApiVersion,
    format: &str,
    renderer: &impl PartRenderer,
    sink: &mut impl FormatSink,
) -> Result<(), FormatError> {
    let format = if format.is_empty() { "F" } else { format };
    for token in Tokenizer::new(format) {
        let accepted = match token? {
            Token::Literal(text) => sink.write(text),
            Token::Escaped(c) => sink.write(c.encode_utf8(&mut [0u8; 4])),
            Token::Specifier {
                letter,
                count,
                width,
            } => {
                let mut piece = String::new();
                expand(version, renderer, letter, count, width, &mut piece);
                sink.write(&piece)
            }
        };
        if !accepted {
            break;
        }
    }
    Ok(())
}

/// Default zero-padding width for `P`/`p` when no digit count is given.
const DEFAULT_PAD: usize = 2;

fn expand(
    version: &ApiVersion,
    renderer: &impl PartRenderer,
    letter: char,
    count: usize,
    width: Option<usize>,
    out: &mut String,
) {
    match letter {
        'F' => full(version, renderer, count >= 2, out),
        'G' => group(version, renderer, count >= 2, out),
        'y' => year(version, count, out),
        'M' => month(version, count, out),
        'd' => day(version, count, out),
        'V' => numeric(version, renderer, count, out),
        'v' => {
            if version.major().is_some() || version.minor().is_some() {
                renderer.render_number(version.implied_minor(), 0, out);
            }
        }
        'P' => {
            if let Some(major) = version.major() {
                renderer.render_number(major, width.unwrap_or(DEFAULT_PAD), out);
            }
        }
        'p' => {
            if version.major().is_some() || version.minor().is_some() {
                renderer.render_number(version.implied_minor(), width.unwrap_or(DEFAULT_PAD), out);
            }
        }
        'S' => {
            if let Some(status) = version.status() {
                renderer.render_status(status, out);
            }
        }
        // Unrecognized specifiers are dropped, not errors.
        _ => {}
    }
}

/// `F`/`FF`: every applicable part, absent components omitted. `FF`
/// renders a defaulted minor whenever a major is present.
fn full(version: &ApiVersion, renderer: &impl PartRenderer, default_minor: bool, out: &mut String) {
    if let Some(group) = version.group() {
        renderer.render_group(group, out);
    }
    if let Some(major) = version.major() {
        if version.group().is_some() {
            out.push('.');
        }
        renderer.render_number(major, 0, out);
        match version.minor() {
            Some(minor) => {
                out.push('.');
                renderer.render_number(minor, 0, out);
            }
            None if default_minor => {
                out.push('.');
                renderer.render_number(0, 0, out);
            }
            None => {}
        }
    }
    if let Some(status) = version.status() {
        out.push('-');
        renderer.render_status(status, out);
    }
}

/// `G`/`GG`: the group date alone, `GG` with the status suffix.
fn group(version: &ApiVersion, renderer: &impl PartRenderer, with_status: bool, out: &mut String) {
    let Some(group) = version.group() else {
        return;
    };
    renderer.render_group(group, out);
    if with_status && let Some(status) = version.status() {
        out.push('-');
        renderer.render_status(status, out);
    }
}

/// `V`–`VVVV`: the numeric forms. Nothing is rendered without a major.
fn numeric(version: &ApiVersion, renderer: &impl PartRenderer, count: usize, out: &mut String) {
    let Some(major) = version.major() else {
        return;
    };
    renderer.render_number(major, 0, out);
    match count {
        // V: major alone.
        1 => {}
        // VV: major and minor, minor defaulting to 0.
        2 => {
            out.push('.');
            renderer.render_number(version.implied_minor(), 0, out);
        }
        // VVV: omit a defaulted minor, append status.
        3 => {
            if let Some(minor) = version.minor() {
                out.push('.');
                renderer.render_number(minor, 0, out);
            }
            if let Some(status) = version.status() {
                out.push('-');
                renderer.render_status(status, out);
            }
        }
        // VVVV: minor always, append status.
        _ => {
            out.push('.');
            renderer.render_number(version.implied_minor(), 0, out);
            if let Some(status) = version.status() {
                out.push('-');
                renderer.render_status(status, out);
            }
        }
    }
}

fn year(version: &ApiVersion, count: usize, out: &mut String) {
    let Some(group) = version.group() else {
        return;
    };
    if count <= 2 {
        let _ = write!(out, "{:0count$}", group.year().rem_euclid(100));
    } else {
        let _ = write!(out, "{:04}", group.year());
    }
}

fn month(version: &ApiVersion, count: usize, out: &mut String) {
    if let Some(group) = version.group() {
        let width = count.min(2);
        let _ = write!(out, "{:0width$}", group.month());
    }
}

fn day(version: &ApiVersion, count: usize, out: &mut String) {
    if let Some(group) = version.group() {
        let width = count.min(2);
        let _ = write!(out, "{:0width$}", group.day());
    }
}
