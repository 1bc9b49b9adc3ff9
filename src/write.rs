//! JSON output: a token-level generator plus field writers for scalar arrays
//! and string maps.
//!
//! The generator tracks container state (comma and field positions) and
//! delegates everything else (escaping, number encoding, indentation) to
//! `serde_json`'s formatters. It never validates the emitted structure;
//! balanced start/end calls are the caller's responsibility.

use std::io;

use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter};

use crate::codec::codec;

// ------------------------------ Generator --------------------------------- //

/// Token writer bound to a caller-owned buffer, compact or indented.
///
/// Construct one through [`crate::codec::JsonCodec::generator`] or drive a
/// whole document through [`generate`].
pub struct JsonGenerator<'out> {
    out: &'out mut Vec<u8>,
    style: Style,
    frames: Vec<Frame>,
    pending_field: bool,
}

enum Style {
    Compact(CompactFormatter),
    Pretty(PrettyFormatter<'static>),
}

// One generator type covers both layouts: delegate the structural callbacks
// the pretty formatter overrides, inherit the trait defaults for scalars.
impl Formatter for Style {
    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        match self {
            Self::Compact(fmt) => fmt.begin_array(writer),
            Self::Pretty(fmt) => fmt.begin_array(writer),
        }
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        match self {
            Self::Compact(fmt) => fmt.end_array(writer),
            Self::Pretty(fmt) => fmt.end_array(writer),
        }
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        match self {
            Self::Compact(fmt) => fmt.begin_array_value(writer, first),
            Self::Pretty(fmt) => fmt.begin_array_value(writer, first),
        }
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        match self {
            Self::Compact(fmt) => fmt.end_array_value(writer),
            Self::Pretty(fmt) => fmt.end_array_value(writer),
        }
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        match self {
            Self::Compact(fmt) => fmt.begin_object(writer),
            Self::Pretty(fmt) => fmt.begin_object(writer),
        }
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        match self {
            Self::Compact(fmt) => fmt.end_object(writer),
            Self::Pretty(fmt) => fmt.end_object(writer),
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        match self {
            Self::Compact(fmt) => fmt.begin_object_key(writer, first),
            Self::Pretty(fmt) => fmt.begin_object_key(writer, first),
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        match self {
            Self::Compact(fmt) => fmt.begin_object_value(writer),
            Self::Pretty(fmt) => fmt.begin_object_value(writer),
        }
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        match self {
            Self::Compact(fmt) => fmt.end_object_value(writer),
            Self::Pretty(fmt) => fmt.end_object_value(writer),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Container {
    Object,
    Array,
}

/// Where a value sits relative to its parent, so the matching end callback
/// fires after the value (or the container it opens) completes.
#[derive(Clone, Copy)]
enum Pos {
    Root,
    Element,
    FieldValue,
}

struct Frame {
    kind: Container,
    first: bool,
    pos: Pos,
}

impl<'out> JsonGenerator<'out> {
    pub(crate) fn compact(out: &'out mut Vec<u8>) -> Self {
        Self::new(out, Style::Compact(CompactFormatter))
    }

    pub(crate) fn pretty(out: &'out mut Vec<u8>, indent: &'static [u8]) -> Self {
        Self::new(out, Style::Pretty(PrettyFormatter::with_indent(indent)))
    }

    fn new(out: &'out mut Vec<u8>, style: Style) -> Self {
        Self {
            out,
            style,
            frames: Vec::new(),
            pending_field: false,
        }
    }

    fn before_value(&mut self) -> io::Result<Pos> {
        if self.pending_field {
            self.pending_field = false;
            self.style.begin_object_value(self.out)?;
            return Ok(Pos::FieldValue);
        }
        if let Some(frame) = self.frames.last_mut() {
            if frame.kind == Container::Array {
                let first = frame.first;
                frame.first = false;
                self.style.begin_array_value(self.out, first)?;
                return Ok(Pos::Element);
            }
        }
        Ok(Pos::Root)
    }

    fn after_value(&mut self, pos: Pos) -> io::Result<()> {
        match pos {
            Pos::Root => Ok(()),
            Pos::Element => self.style.end_array_value(self.out),
            Pos::FieldValue => self.style.end_object_value(self.out),
        }
    }

    pub fn write_start_object(&mut self) -> io::Result<()> {
        let pos = self.before_value()?;
        self.style.begin_object(self.out)?;
        self.frames.push(Frame {
            kind: Container::Object,
            first: true,
            pos,
        });
        Ok(())
    }

    pub fn write_end_object(&mut self) -> io::Result<()> {
        let pos = self.frames.pop().map(|frame| frame.pos).unwrap_or(Pos::Root);
        self.style.end_object(self.out)?;
        self.after_value(pos)
    }

    pub fn write_start_array(&mut self) -> io::Result<()> {
        let pos = self.before_value()?;
        self.style.begin_array(self.out)?;
        self.frames.push(Frame {
            kind: Container::Array,
            first: true,
            pos,
        });
        Ok(())
    }

    pub fn write_end_array(&mut self) -> io::Result<()> {
        let pos = self.frames.pop().map(|frame| frame.pos).unwrap_or(Pos::Root);
        self.style.end_array(self.out)?;
        self.after_value(pos)
    }

    /// Write a field name; the next write supplies its value.
    pub fn write_field_name(&mut self, name: &str) -> io::Result<()> {
        let first = match self.frames.last_mut() {
            Some(frame) if frame.kind == Container::Object => {
                let first = frame.first;
                frame.first = false;
                first
            }
            _ => true,
        };
        self.style.begin_object_key(self.out, first)?;
        serde_json::to_writer(&mut *self.out, name)?;
        self.style.end_object_key(self.out)?;
        self.pending_field = true;
        Ok(())
    }

    pub fn write_null(&mut self) -> io::Result<()> {
        let pos = self.before_value()?;
        self.style.write_null(self.out)?;
        self.after_value(pos)
    }

    pub fn write_bool(&mut self, value: bool) -> io::Result<()> {
        let pos = self.before_value()?;
        self.style.write_bool(self.out, value)?;
        self.after_value(pos)
    }

    pub fn write_i32(&mut self, value: i32) -> io::Result<()> {
        let pos = self.before_value()?;
        self.style.write_i32(self.out, value)?;
        self.after_value(pos)
    }

    pub fn write_i64(&mut self, value: i64) -> io::Result<()> {
        let pos = self.before_value()?;
        self.style.write_i64(self.out, value)?;
        self.after_value(pos)
    }

    pub fn write_f64(&mut self, value: f64) -> io::Result<()> {
        let pos = self.before_value()?;
        self.style.write_f64(self.out, value)?;
        self.after_value(pos)
    }

    pub fn write_string(&mut self, value: &str) -> io::Result<()> {
        let pos = self.before_value()?;
        serde_json::to_writer(&mut *self.out, value)?;
        self.after_value(pos)
    }

    pub fn write_string_field(&mut self, name: &str, value: &str) -> io::Result<()> {
        self.write_field_name(name)?;
        self.write_string(value)
    }

    pub fn write_null_field(&mut self, name: &str) -> io::Result<()> {
        self.write_field_name(name)?;
        self.write_null()
    }

    pub fn write_bool_field(&mut self, name: &str, value: bool) -> io::Result<()> {
        self.write_field_name(name)?;
        self.write_bool(value)
    }

    pub fn write_i32_field(&mut self, name: &str, value: i32) -> io::Result<()> {
        self.write_field_name(name)?;
        self.write_i32(value)
    }

    pub fn write_i64_field(&mut self, name: &str, value: i64) -> io::Result<()> {
        self.write_field_name(name)?;
        self.write_i64(value)
    }
}

// ------------------------------ Field writers ----------------------------- //

/// Write `field` bound to an array of ints.
pub fn write_integer_array<I>(field: &str, items: I, generator: &mut JsonGenerator<'_>) -> io::Result<()>
where
    I: IntoIterator<Item = i32>,
{
    generator.write_field_name(field)?;
    generator.write_start_array()?;
    for item in items {
        generator.write_i32(item)?;
    }
    generator.write_end_array()
}

/// Write `field` bound to an array of longs.
pub fn write_long_array<I>(field: &str, items: I, generator: &mut JsonGenerator<'_>) -> io::Result<()>
where
    I: IntoIterator<Item = i64>,
{
    generator.write_field_name(field)?;
    generator.write_start_array()?;
    for item in items {
        generator.write_i64(item)?;
    }
    generator.write_end_array()
}

/// Write `field` bound to an array of strings.
pub fn write_string_array<I>(field: &str, items: I, generator: &mut JsonGenerator<'_>) -> io::Result<()>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    generator.write_field_name(field)?;
    generator.write_start_array()?;
    for item in items {
        generator.write_string(item.as_ref())?;
    }
    generator.write_end_array()
}

/// Write `field` bound to a string map. A `None` value is written as a JSON
/// null token, never omitted, so the output round-trips through
/// [`crate::access::collect::get_string_map_nullable_values`].
pub fn write_string_map<I, K, V>(field: &str, entries: I, generator: &mut JsonGenerator<'_>) -> io::Result<()>
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    generator.write_field_name(field)?;
    generator.write_start_object()?;
    for (key, value) in entries {
        match value {
            Some(text) => generator.write_string_field(key.as_ref(), text.as_ref())?,
            None => generator.write_null_field(key.as_ref())?,
        }
    }
    generator.write_end_object()
}

/// Write `field: value` only when `condition` holds.
pub fn write_integer_field_if(
    condition: bool,
    field: &str,
    value: i32,
    generator: &mut JsonGenerator<'_>,
) -> io::Result<()> {
    if condition {
        generator.write_i32_field(field, value)?;
    }
    Ok(())
}

/// Write `field: value` only when `condition` holds.
pub fn write_long_field_if(
    condition: bool,
    field: &str,
    value: i64,
    generator: &mut JsonGenerator<'_>,
) -> io::Result<()> {
    if condition {
        generator.write_i64_field(field, value)?;
    }
    Ok(())
}

// ------------------------------ Entry point ------------------------------- //

/// Drive `task` against a fresh generator and return the emitted text.
///
/// The buffer and generator are private to the call, so concurrent calls
/// never interact; a task failure propagates after they are released.
/// `pretty` selects indented output and affects whitespace only.
pub fn generate<F>(task: F, pretty: bool) -> io::Result<String>
where
    F: FnOnce(&mut JsonGenerator<'_>) -> io::Result<()>,
{
    let mut out = Vec::new();
    let mut generator = codec().generator(&mut out, pretty);
    task(&mut generator)?;
    drop(generator);
    String::from_utf8(out).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}

// ------------------------------- Tests ------------------------------------ //
