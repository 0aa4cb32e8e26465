//! End-to-end behaviour of the printables.

use std::cell::Cell;
use std::fmt::Write;

use lazyfmt::{
    fmt_if, fmt_seq, format_dyn, format_with, formatted, printable, select, seq, thunk, Closure,
    FixedBuf, FormatSpec,
};

fn ratio(a: i32, b: i32) -> String {
    fmt_if(b != 0, Closure::thunk((a, b), |&(a, b): &(i32, i32)| a / b), thunk(|| "NaN")).to_string()
}

#[test]
fn formatted_value_prints_plainly() {
    assert_eq!(formatted!(5).to_string(), "5");
}

#[test]
fn directive_baked_or_supplied_gives_the_same_text() {
    let baked = formatted!("%03d"; 5).to_string();
    let from_consumer = format!("{:03}", formatted!(5));
    let mut supplied = String::new();
    formatted!(5)
        .write_spec(&mut supplied, &"%03d".parse::<FormatSpec>().unwrap())
        .unwrap();
    assert_eq!(baked, "005");
    assert_eq!(from_consumer, "005");
    assert_eq!(supplied, "005");
}

#[test]
fn realizing_twice_gives_identical_text() {
    let p = fmt_seq!("%5.2f"; 1.5, -2.25);
    assert_eq!(p.to_string(), p.to_string());
    assert_eq!(p.to_string(), " 1.50-2.25");
}

#[test]
fn fmt_if_never_forces_the_untaken_branch() {
    let counter = Cell::new(0u32);
    let bump = |c: &&Cell<u32>| {
        c.set(c.get() + 1);
        "side effect"
    };
    let p = fmt_if(true, thunk(|| "left"), Closure::thunk(&counter, bump));
    assert_eq!(p.to_string(), "left");
    assert_eq!(p.to_string(), "left");
    assert_eq!(counter.get(), 0);

    let q = fmt_if(false, thunk(|| "left"), Closure::thunk(&counter, bump));
    assert_eq!(counter.get(), 0, "construction must not force");
    assert_eq!(q.to_string(), "side effect");
    assert_eq!(counter.get(), 1);
}

#[test]
fn fmt_seq_writes_in_order() {
    assert_eq!(fmt_seq!(5, " ", "apple").to_string(), "5 apple");
}

#[test]
fn guarded_division() {
    assert_eq!(ratio(4, 2), "2");
    assert_eq!(ratio(4, 0), "NaN");
}

#[test]
fn printables_nest_inside_printables() {
    let inner = formatted!("%02d"; 7);
    let outer = fmt_seq!("<", inner, ">");
    assert_eq!(outer.to_string(), "<07>");
}

#[test]
fn composed_closures_become_printable() {
    let hex = FormatSpec::parse("%#x").unwrap();
    let body = seq!(
        format_with(FormatSpec::GENERIC, ("id=",)),
        format_with(hex, (48879,)),
        format_with(FormatSpec::GENERIC, (";",)),
    );
    assert_eq!(printable(body).to_string(), "id=0xbeef;");

    let either = printable(select(false, format_dyn(("yes",)), format_dyn(("no",))));
    assert_eq!(format!("[{either:>4}]"), "[  no]");
}

#[test]
fn seq_fn_and_macro_agree() {
    let a = || format_with(FormatSpec::GENERIC, ("a",));
    let by_fn = printable(seq(a(), seq(a(), a()))).to_string();
    let by_macro = printable(seq!(a(), a(), a())).to_string();
    assert_eq!(by_fn, by_macro);
}

#[test]
fn exhausted_sink_reports_an_error() {
    let p = fmt_seq!("abc", "def");
    let mut buf = FixedBuf::<4>::new();
    assert!(write!(buf, "{p}").is_err());
    assert_eq!(buf, "abc");

    let mut roomy = FixedBuf::<16>::new();
    write!(roomy, "{p}").unwrap();
    assert_eq!(roomy, "abcdef");
}

#[test]
fn captured_values_outlive_their_scope() {
    let p = {
        let name = String::from("pear");
        formatted((name, 3))
    };
    assert_eq!(format!("{p:>5}"), " pear    3");
}
