//! Building format closures from captured values.
//!
//! * [`format_with`] bakes a directive in: the result writes to a bare sink.
//! * [`format_dyn`] leaves the directive to the caller of the closure.
//! * [`defer`] wraps a thunk so its result is produced at write time.
//!
//! All three store a plain `fn` pointer, so the closure types can be named
//! ([`Baked`], [`Dynamic`], [`Deferred`]) and held in struct fields.

use std::fmt;

use crate::arg::FormatArg;
use crate::closure::{Closure, SpecWrite, Thunk, ToSink, ToWriter};
use crate::spec::FormatSpec;

// ── FormatArgs ────────────────────────────────────────────────────────────────

/// An ordered group of values written one after another under one spec.
pub trait FormatArgs {
    fn write_each(&self, out: &mut dyn fmt::Write, spec: &FormatSpec) -> fmt::Result;
}

impl FormatArgs for () {
    fn write_each(&self, _out: &mut dyn fmt::Write, _spec: &FormatSpec) -> fmt::Result {
        Ok(())
    }
}

impl<T: FormatArgs + ?Sized> FormatArgs for &T {
    fn write_each(&self, out: &mut dyn fmt::Write, spec: &FormatSpec) -> fmt::Result {
        (**self).write_each(out, spec)
    }
}

impl<T: FormatArg> FormatArgs for [T] {
    fn write_each(&self, out: &mut dyn fmt::Write, spec: &FormatSpec) -> fmt::Result {
        self.iter().try_for_each(|v| v.write_arg(out, spec))
    }
}

impl<T: FormatArg, const N: usize> FormatArgs for [T; N] {
    fn write_each(&self, out: &mut dyn fmt::Write, spec: &FormatSpec) -> fmt::Result {
        self.as_slice().write_each(out, spec)
    }
}

macro_rules! tuple_args {
    ($($name:ident)+) => {
        impl<$($name: FormatArg),+> FormatArgs for ($($name,)+) {
            #[allow(non_snake_case)]
            fn write_each(&self, out: &mut dyn fmt::Write, spec: &FormatSpec) -> fmt::Result {
                let ($($name,)+) = self;
                $($name.write_arg(out, spec)?;)+
                Ok(())
            }
        }
    };
}

tuple_args!(A);
tuple_args!(A B);
tuple_args!(A B C);
tuple_args!(A B C D);
tuple_args!(A B C D E);
tuple_args!(A B C D E F);
tuple_args!(A B C D E F G);
tuple_args!(A B C D E F G H);
tuple_args!(A B C D E F G H I);
tuple_args!(A B C D E F G H I J);
tuple_args!(A B C D E F G H I J K);
tuple_args!(A B C D E F G H I J K L);

// ── Adapters ──────────────────────────────────────────────────────────────────

/// A sink closure over `values` with a directive fixed at construction.
pub type Baked<V> = Closure<(FormatSpec, V), fn(&(FormatSpec, V), &mut dyn fmt::Write) -> fmt::Result, ToSink>;

/// A writer closure over `values`; the directive arrives with each call.
pub type Dynamic<V> = Closure<V, fn(&V, &mut dyn fmt::Write, &FormatSpec) -> fmt::Result, ToWriter>;

/// A writer closure that forces the thunk `T` on every call.
pub type Deferred<T> = Closure<T, fn(&T, &mut dyn fmt::Write, &FormatSpec) -> fmt::Result, ToWriter>;

/// Bake `spec` in: every value of `values` is written under it.
pub fn format_with<V: FormatArgs>(spec: FormatSpec, values: V) -> Baked<V> {
    let func: fn(&(FormatSpec, V), &mut dyn fmt::Write) -> fmt::Result = write_baked::<V>;
    Closure::sink((spec, values), func)
}

/// Write `values` under whatever spec the caller passes.
pub fn format_dyn<V: FormatArgs>(values: V) -> Dynamic<V> {
    let func: fn(&V, &mut dyn fmt::Write, &FormatSpec) -> fmt::Result = write_dynamic::<V>;
    Closure::writer(values, func)
}

/// The value is produced at write time and written through [`format_dyn`].
pub fn defer<T>(thunk: T) -> Deferred<T>
where
    T: Thunk,
    T::Output: FormatArg,
{
    let func: fn(&T, &mut dyn fmt::Write, &FormatSpec) -> fmt::Result = write_deferred::<T>;
    Closure::writer(thunk, func)
}

fn write_baked<V: FormatArgs>(captured: &(FormatSpec, V), out: &mut dyn fmt::Write) -> fmt::Result {
    let (spec, values) = captured;
    values.write_each(out, spec)
}

fn write_dynamic<V: FormatArgs>(values: &V, out: &mut dyn fmt::Write, spec: &FormatSpec) -> fmt::Result {
    values.write_each(out, spec)
}

fn write_deferred<T>(thunk: &T, out: &mut dyn fmt::Write, spec: &FormatSpec) -> fmt::Result
where
    T: Thunk,
    T::Output: FormatArg,
{
    format_dyn((thunk.force(),)).write_spec(out, spec)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
