//! `select` and `seq`: composing closures of one call shape.
//!
//! Both combinators are plain structs over their operands, so a composed
//! closure keeps a distinct, fully static type and lives wherever its parts
//! lived.  The `Shaped<Shape = A::Shape>` bounds reject operands of different
//! shapes at compile time.

use std::fmt;

use crate::closure::{Shaped, SinkWrite, SpecWrite, Thunk};
use crate::spec::FormatSpec;

// ── Select ────────────────────────────────────────────────────────────────────

/// Invokes exactly one of two closures, chosen by a condition fixed at
/// construction.  The other branch is never called.
///
/// Both branches must have the same call shape:
///
/// ```compile_fail
/// use lazyfmt::{format_dyn, format_with, select, FormatSpec};
///
/// let mixed = select(true, format_dyn((1,)), format_with(FormatSpec::GENERIC, (2,)));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Select<A, B> {
    cond: bool,
    on_true: A,
    on_false: B,
}

/// Choose between `on_true` and `on_false` by `cond`.
///
/// ```
/// use lazyfmt::{select, thunk, Thunk};
///
/// assert_eq!(select(false, thunk(|| 1), thunk(|| 2)).force(), 2);
/// ```
pub fn select<A, B>(cond: bool, on_true: A, on_false: B) -> Select<A, B>
where
    A: Shaped,
    B: Shaped<Shape = A::Shape>,
{
    Select { cond, on_true, on_false }
}

impl<A, B> Select<A, B> {
    /// The condition fixed at construction.
    pub fn condition(&self) -> bool {
        self.cond
    }
}

impl<A, B> Shaped for Select<A, B>
where
    A: Shaped,
    B: Shaped<Shape = A::Shape>,
{
    type Shape = A::Shape;
}

impl<A, B> Thunk for Select<A, B>
where
    A: Thunk,
    B: Thunk<Output = A::Output>,
{
    type Output = A::Output;

    fn force(&self) -> A::Output {
        if self.cond {
            self.on_true.force()
        } else {
            self.on_false.force()
        }
    }
}

impl<A: SinkWrite, B: SinkWrite> SinkWrite for Select<A, B> {
    fn write_sink(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        if self.cond {
            self.on_true.write_sink(out)
        } else {
            self.on_false.write_sink(out)
        }
    }
}

impl<A: SpecWrite, B: SpecWrite> SpecWrite for Select<A, B> {
    fn write_spec(&self, out: &mut dyn fmt::Write, spec: &FormatSpec) -> fmt::Result {
        if self.cond {
            self.on_true.write_spec(out, spec)
        } else {
            self.on_false.write_spec(out, spec)
        }
    }
}

// ── Seq ───────────────────────────────────────────────────────────────────────

/// Invokes `first`, then `rest`, with the same call-time arguments.
///
/// Longer sequences nest to the right (see [`seq!`](crate::seq)), so writes
/// always land in declaration order.  The first sink error ends the sequence.
///
/// Every operand must have the same call shape:
///
/// ```compile_fail
/// use lazyfmt::{format_with, seq, thunk, FormatSpec};
///
/// let mixed = seq(format_with(FormatSpec::GENERIC, (1,)), thunk(|| ()));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Seq<A, B> {
    first: A,
    rest: B,
}

/// Run `first`, then `rest`.
pub fn seq<A, B>(first: A, rest: B) -> Seq<A, B>
where
    A: Shaped,
    B: Shaped<Shape = A::Shape>,
{
    Seq { first, rest }
}

impl<A, B> Shaped for Seq<A, B>
where
    A: Shaped,
    B: Shaped<Shape = A::Shape>,
{
    type Shape = A::Shape;
}

impl<A, B> Thunk for Seq<A, B>
where
    A: Thunk<Output = ()>,
    B: Thunk<Output = ()>,
{
    type Output = ();

    fn force(&self) {
        self.first.force();
        self.rest.force();
    }
}

impl<A: SinkWrite, B: SinkWrite> SinkWrite for Seq<A, B> {
    fn write_sink(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        self.first.write_sink(out)?;
        self.rest.write_sink(out)
    }
}

impl<A: SpecWrite, B: SpecWrite> SpecWrite for Seq<A, B> {
    fn write_spec(&self, out: &mut dyn fmt::Write, spec: &FormatSpec) -> fmt::Result {
        self.first.write_spec(out, spec)?;
        self.rest.write_spec(out, spec)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::closure::{thunk, Closure};
    use crate::sink::FixedBuf;
    use std::cell::{Cell, RefCell};

    fn word(w: &'static str) -> impl SinkWrite + Shaped<Shape = crate::closure::ToSink> {
        Closure::sink(w, |w: &&'static str, out: &mut dyn fmt::Write| out.write_str(w))
    }

    #[test]
    fn select_invokes_only_the_chosen_thunk() {
        let taken = Cell::new(0);
        let skipped = Cell::new(0);
        let pick = select(
            true,
            Closure::thunk(&taken, |c: &&Cell<u32>| {
                c.set(c.get() + 1);
                "yes"
            }),
            Closure::thunk(&skipped, |c: &&Cell<u32>| {
                c.set(c.get() + 1);
                "no"
            }),
        );
        assert_eq!(pick.force(), "yes");
        assert_eq!(pick.force(), "yes");
        assert_eq!(taken.get(), 2);
        assert_eq!(skipped.get(), 0);
        assert!(pick.condition());
    }

    #[test]
    fn select_false_branch() {
        let pick = select(false, thunk(|| 1), thunk(|| 2));
        assert_eq!(pick.force(), 2);
    }

    #[test]
    fn select_between_sinks() {
        let mut s = String::new();
        select(false, word("left"), word("right")).write_sink(&mut s).unwrap();
        assert_eq!(s, "right");
    }

    #[test]
    fn seq_writes_in_declaration_order() {
        let mut s = String::new();
        seq(word("a"), seq(word("b"), word("c"))).write_sink(&mut s).unwrap();
        assert_eq!(s, "abc");
    }

    #[test]
    fn nested_combinators_keep_order() {
        let inner = select(true, seq(word("1"), word("2")), seq(word("x"), word("y")));
        let mut s = String::new();
        seq(word("<"), seq(inner, word(">"))).write_sink(&mut s).unwrap();
        assert_eq!(s, "<12>");
    }

    #[test]
    fn seq_stops_at_first_sink_error() {
        let log = RefCell::new(Vec::new());
        let logged = |name: &'static str| {
            Closure::sink((name, &log), |&(name, log): &(&'static str, &RefCell<Vec<&'static str>>), out: &mut dyn fmt::Write| {
                log.borrow_mut().push(name);
                out.write_str(name)
            })
        };
        let mut buf = FixedBuf::<5>::new();
        let result = seq(logged("abc"), seq(logged("def"), logged("g"))).write_sink(&mut buf);
        assert!(result.is_err());
        assert_eq!(buf, "abc");
        assert_eq!(*log.borrow(), ["abc", "def"]);
    }

    #[test]
    fn seq_of_unit_thunks() {
        let n = Cell::new(0);
        let bump = |by: u32| Closure::thunk((&n, by), |&(n, by): &(&Cell<u32>, u32)| n.set(n.get() * 10 + by));
        seq(bump(1), seq(bump(2), bump(3))).force();
        assert_eq!(n.get(), 123);
    }

    #[test]
    fn spec_flows_to_every_operand() {
        let echo = || {
            Closure::writer((), |_: &(), out: &mut dyn fmt::Write, spec: &FormatSpec| write!(out, "[{spec}]"))
        };
        let mut s = String::new();
        let spec = FormatSpec::parse("%5d").unwrap();
        seq(echo(), echo()).write_spec(&mut s, &spec).unwrap();
        assert_eq!(s, "[%5d][%5d]");
    }
}
