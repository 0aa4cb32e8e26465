//! Ready-made printables.
//!
//! These wrap the adapters in [`Printable`] so the result can go straight into
//! `format!`, `write!` or any other `Display` consumer.  Nothing is evaluated
//! until one of them realizes the value.

use crate::adapter::{defer, format_dyn, format_with, Baked, Deferred, Dynamic, FormatArgs};
use crate::arg::FormatArg;
use crate::closure::Thunk;
use crate::combinator::{select, Select};
use crate::printable::Printable;
use crate::spec::FormatSpec;

pub type Formatted<V> = Printable<Dynamic<V>>;
pub type FormattedWith<V> = Printable<Baked<V>>;
pub type FmtIf<A, B> = Printable<Select<Deferred<A>, Deferred<B>>>;

/// `values`, formatted with whatever the consumer asks for (`%s` by default).
pub fn formatted<V: FormatArgs>(values: V) -> Formatted<V> {
    Printable::new(format_dyn(values))
}

/// `values`, each formatted with `spec`.
pub fn formatted_with<V: FormatArgs>(spec: FormatSpec, values: V) -> FormattedWith<V> {
    Printable::new(format_with(spec, values))
}

/// Prints the result of `on_true` or `on_false`.
///
/// The condition is fixed here; the chosen thunk is forced once per
/// realization and the other one never is.  The two results may have
/// different types.
pub fn fmt_if<A, B>(cond: bool, on_true: A, on_false: B) -> FmtIf<A, B>
where
    A: Thunk,
    A::Output: FormatArg,
    B: Thunk,
    B::Output: FormatArg,
{
    Printable::new(select(cond, defer(on_true), defer(on_false)))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
