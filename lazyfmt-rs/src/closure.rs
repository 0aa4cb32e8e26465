//! Value-captured closures with a declared call shape.
//!
//! A [`Closure`] stores its captured values inline next to a statically bound
//! function.  The third type parameter names the *call shape*, the arguments
//! supplied at call time on top of the captured ones:
//!
//! | Shape | Call trait | Call-time arguments |
//! |-------|------------|---------------------|
//! | [`Nullary<R>`] | [`Thunk`] | none; returns `R` |
//! | [`ToSink`] | [`SinkWrite`] | a sink |
//! | [`ToWriter`] | [`SpecWrite`] | a sink and a [`FormatSpec`] |
//!
//! The shape is part of the type, so combinators and [`Printable`] can
//! require matching shapes without ever inspecting a closure at run time.
//!
//! [`Printable`]: crate::Printable

use std::fmt;
use std::marker::PhantomData;

use crate::spec::FormatSpec;

// ── Call shapes ───────────────────────────────────────────────────────────────

/// Marker implemented by the call-shape types.
pub trait Shape {}

/// `() -> R`.
pub struct Nullary<R>(PhantomData<fn() -> R>);

/// `(sink) -> fmt::Result`.
pub enum ToSink {}

/// `(sink, spec) -> fmt::Result`.
pub enum ToWriter {}

impl<R> Shape for Nullary<R> {}
impl Shape for ToSink {}
impl Shape for ToWriter {}

/// Declares the call shape of a closure-like value.
pub trait Shaped {
    type Shape: Shape;
}

/// A zero-argument closure producing a value.
pub trait Thunk {
    type Output;
    fn force(&self) -> Self::Output;
}

/// A closure that writes into a sink.
pub trait SinkWrite {
    fn write_sink(&self, out: &mut dyn fmt::Write) -> fmt::Result;
}

/// A closure that writes into a sink under a caller-supplied spec.
pub trait SpecWrite {
    fn write_spec(&self, out: &mut dyn fmt::Write, spec: &FormatSpec) -> fmt::Result;
}

// ── Closure ───────────────────────────────────────────────────────────────────

/// Captured values `C`, a function `F` over them, and a call shape `S`.
pub struct Closure<C, F, S> {
    captured: C,
    func: F,
    shape: PhantomData<S>,
}

impl<C, F, R> Closure<C, F, Nullary<R>>
where
    F: Fn(&C) -> R,
{
    /// A thunk computing `func(&captured)`.
    pub fn thunk(captured: C, func: F) -> Self {
        Self { captured, func, shape: PhantomData }
    }
}

impl<C, F> Closure<C, F, ToSink>
where
    F: Fn(&C, &mut dyn fmt::Write) -> fmt::Result,
{
    /// A closure writing `func(&captured, sink)`.
    pub fn sink(captured: C, func: F) -> Self {
        Self { captured, func, shape: PhantomData }
    }
}

impl<C, F> Closure<C, F, ToWriter>
where
    F: Fn(&C, &mut dyn fmt::Write, &FormatSpec) -> fmt::Result,
{
    /// A closure writing `func(&captured, sink, spec)`.
    pub fn writer(captured: C, func: F) -> Self {
        Self { captured, func, shape: PhantomData }
    }
}

impl<C, F, S> Closure<C, F, S> {
    pub fn captured(&self) -> &C {
        &self.captured
    }

    pub fn into_captured(self) -> C {
        self.captured
    }
}

/// A thunk over a capture-free `Fn() -> R`.
pub fn thunk<F, R>(func: F) -> Closure<F, impl Fn(&F) -> R, Nullary<R>>
where
    F: Fn() -> R,
{
    Closure::thunk(func, |f: &F| f())
}

impl<C, F, S: Shape> Shaped for Closure<C, F, S> {
    type Shape = S;
}

impl<C, F, R> Thunk for Closure<C, F, Nullary<R>>
where
    F: Fn(&C) -> R,
{
    type Output = R;

    #[inline]
    fn force(&self) -> R {
        (self.func)(&self.captured)
    }
}

impl<C, F> SinkWrite for Closure<C, F, ToSink>
where
    F: Fn(&C, &mut dyn fmt::Write) -> fmt::Result,
{
    #[inline]
    fn write_sink(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        (self.func)(&self.captured, out)
    }
}

impl<C, F> SpecWrite for Closure<C, F, ToWriter>
where
    F: Fn(&C, &mut dyn fmt::Write, &FormatSpec) -> fmt::Result,
{
    #[inline]
    fn write_spec(&self, out: &mut dyn fmt::Write, spec: &FormatSpec) -> fmt::Result {
        (self.func)(&self.captured, out, spec)
    }
}

impl<C: Clone, F: Clone, S> Clone for Closure<C, F, S> {
    fn clone(&self) -> Self {
        Self {
            captured: self.captured.clone(),
            func: self.func.clone(),
            shape: PhantomData,
        }
    }
}

impl<C: Copy, F: Copy, S> Copy for Closure<C, F, S> {}

impl<C: fmt::Debug, F, S> fmt::Debug for Closure<C, F, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("captured", &self.captured)
            .finish_non_exhaustive()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
