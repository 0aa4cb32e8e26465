//! Exposing a format closure to the host's printing machinery.
//!
//! [`Printable`] owns one sink- or writer-shaped closure and realizes it on
//! demand: through [`fmt::Display`], into any [`fmt::Write`], or into an
//! [`io::Write`].  Nothing is cached; every realization calls the closure
//! exactly once.

use std::fmt;
use std::io;

use crate::arg::FormatArg;
use crate::closure::{Shaped, SinkWrite, SpecWrite, ToSink, ToWriter};
use crate::spec::FormatSpec;

/// Realization strategy for a closure of a given call shape.
///
/// Implemented for [`ToSink`] and [`ToWriter`] only, so a thunk (or any other
/// shape) cannot be wrapped:
///
/// ```compile_fail
/// use lazyfmt::{printable, thunk};
///
/// let p = printable(thunk(|| 5));
/// ```
///
/// Adapting the thunk with [`defer`](crate::defer) makes it printable:
///
/// ```
/// use lazyfmt::{defer, printable, thunk};
///
/// assert_eq!(printable(defer(thunk(|| 5))).to_string(), "5");
/// ```
#[diagnostic::on_unimplemented(
    message = "`{C}` is not printable",
    label = "closures of shape `{Self}` cannot be realized as text",
    note = "wrap a sink- or writer-shaped closure; a thunk can be adapted with `lazyfmt::defer`"
)]
pub trait Realize<C> {
    /// `consumer` is the spec the consumer asked for, if any.
    fn realize(closure: &C, out: &mut dyn fmt::Write, consumer: Option<&FormatSpec>) -> fmt::Result;
}

/// A baked closure has its own spec; the consumer's is ignored.
impl<C: SinkWrite> Realize<C> for ToSink {
    fn realize(closure: &C, out: &mut dyn fmt::Write, _consumer: Option<&FormatSpec>) -> fmt::Result {
        closure.write_sink(out)
    }
}

impl<C: SpecWrite> Realize<C> for ToWriter {
    fn realize(closure: &C, out: &mut dyn fmt::Write, consumer: Option<&FormatSpec>) -> fmt::Result {
        closure.write_spec(out, consumer.unwrap_or(&FormatSpec::GENERIC))
    }
}

// ── Printable ─────────────────────────────────────────────────────────────────

/// One sink- or writer-shaped closure, realized afresh on every use.
#[derive(Clone, Copy)]
pub struct Printable<C> {
    closure: C,
}

/// Wrap `closure`; same as [`Printable::new`].
pub fn printable<C>(closure: C) -> Printable<C>
where
    C: Shaped,
    C::Shape: Realize<C>,
{
    Printable::new(closure)
}

impl<C> Printable<C>
where
    C: Shaped,
    C::Shape: Realize<C>,
{
    /// Compiles only for closures whose shape implements [`Realize`].
    pub fn new(closure: C) -> Self {
        Self { closure }
    }

    /// Realize into a bare sink with the default `%s` directive.
    pub fn write_to(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        <C::Shape as Realize<C>>::realize(&self.closure, out, None)
    }

    /// Realize into a byte sink.
    pub fn write_io<W: io::Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{self}")
    }
}

impl<C> Printable<C> {
    pub fn closure(&self) -> &C {
        &self.closure
    }

    pub fn into_inner(self) -> C {
        self.closure
    }
}

impl<C: SpecWrite> Printable<C> {
    /// Realize under an explicit directive.  Only writer-shaped closures take
    /// one; a baked closure does not offer this method:
    ///
    /// ```compile_fail
    /// use lazyfmt::{format_with, printable, FormatSpec};
    ///
    /// let baked = printable(format_with(FormatSpec::GENERIC, (5,)));
    /// let mut s = String::new();
    /// baked.write_spec(&mut s, &FormatSpec::GENERIC).unwrap();
    /// ```
    ///
    /// ```
    /// use lazyfmt::{format_dyn, printable, FormatSpec};
    ///
    /// let p = printable(format_dyn((255,)));
    /// let mut s = String::new();
    /// p.write_spec(&mut s, &"%#x".parse::<FormatSpec>().unwrap()).unwrap();
    /// assert_eq!(s, "0xff");
    /// ```
    pub fn write_spec(&self, out: &mut dyn fmt::Write, spec: &FormatSpec) -> fmt::Result {
        self.closure.write_spec(out, spec)
    }
}

/// Width, precision and the `-`, `0`, `+`, `#` flags of the consumer's
/// format string reach writer-shaped closures.
impl<C> fmt::Display for Printable<C>
where
    C: Shaped,
    C::Shape: Realize<C>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spec = FormatSpec::from_formatter(f);
        <C::Shape as Realize<C>>::realize(&self.closure, f, Some(&spec))
    }
}

/// A printable is itself a value, so printables nest.
impl<C> FormatArg for Printable<C>
where
    C: Shaped,
    C::Shape: Realize<C>,
{
    fn write_arg(&self, out: &mut dyn fmt::Write, spec: &FormatSpec) -> fmt::Result {
        <C::Shape as Realize<C>>::realize(&self.closure, out, Some(spec))
    }
}

impl<C> fmt::Debug for Printable<C>
where
    C: Shaped,
    C::Shape: Realize<C>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Printable(\"")?;
        self.write_to(&mut Escaped(f))?;
        f.write_str("\")")
    }
}

/// Forwards text with `str::escape_debug` applied.
struct Escaped<'a, 'b>(&'a mut fmt::Formatter<'b>);

impl fmt::Write for Escaped<'_, '_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        write!(self.0, "{}", s.escape_debug())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
