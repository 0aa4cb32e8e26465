//! Macro front ends.
//!
//! A leading string literal followed by `;` is a directive.  It is parsed in a
//! `const` item, so a malformed directive stops the build instead of failing
//! at run time.

/// Chain closures of one shape, written left to right.
///
/// ```
/// use lazyfmt::{format_with, seq, FormatSpec, SinkWrite};
///
/// let line = seq!(
///     format_with(FormatSpec::GENERIC, ("a",)),
///     format_with(FormatSpec::GENERIC, ("b",)),
///     format_with(FormatSpec::GENERIC, ("c",)),
/// );
/// let mut s = String::new();
/// line.write_sink(&mut s).unwrap();
/// assert_eq!(s, "abc");
/// ```
#[macro_export]
macro_rules! seq {
    ($only:expr $(,)?) => {
        $only
    };
    ($first:expr, $($rest:expr),+ $(,)?) => {
        $crate::seq($first, $crate::seq!($($rest),+))
    };
}

/// A printable over the given values.
///
/// `formatted!(a, b)` takes its directive from the consumer;
/// `formatted!("%03d"; a, b)` bakes one in.
///
/// ```
/// use lazyfmt::formatted;
///
/// assert_eq!(formatted!(5).to_string(), "5");
/// assert_eq!(format!("{:03}", formatted!(5)), "005");
/// assert_eq!(formatted!("%03d"; 5).to_string(), "005");
/// ```
///
/// A malformed directive literal is rejected at build time:
///
/// ```compile_fail
/// use lazyfmt::formatted;
///
/// let p = formatted!("%q"; 5);
/// ```
#[macro_export]
macro_rules! formatted {
    ($fmt:literal; $($value:expr),* $(,)?) => {{
        const SPEC: $crate::FormatSpec = $crate::FormatSpec::from_literal($fmt);
        $crate::formatted_with(SPEC, ($($value,)*))
    }};
    ($($value:expr),* $(,)?) => {
        $crate::formatted(($($value,)*))
    };
}

/// One baked closure per value, all sharing a directive (`%s` when none is
/// given), sequenced and wrapped as a printable.
///
/// ```
/// use lazyfmt::fmt_seq;
///
/// assert_eq!(fmt_seq!(5, " ", "apple").to_string(), "5 apple");
/// assert_eq!(fmt_seq!("%02x"; 10, 255).to_string(), "0aff");
/// ```
#[macro_export]
macro_rules! fmt_seq {
    ($fmt:literal; $($value:expr),+ $(,)?) => {{
        const SPEC: $crate::FormatSpec = $crate::FormatSpec::from_literal($fmt);
        $crate::Printable::new($crate::seq!($($crate::format_with(SPEC, ($value,))),+))
    }};
    ($($value:expr),+ $(,)?) => {
        $crate::Printable::new($crate::seq!($($crate::format_with($crate::FormatSpec::GENERIC, ($value,))),+))
    };
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use crate::closure::SinkWrite;
    use crate::sink::FixedBuf;
    use crate::FormatSpec;

    #[test]
    fn formatted_forms() {
        assert_eq!(formatted!().to_string(), "");
        assert_eq!(formatted!(1, "-", 2,).to_string(), "1-2");
        assert_eq!(formatted!("%+d"; 1, 2).to_string(), "+1+2");
        assert_eq!(formatted!(-5).to_string(), "-5");
    }

    #[test]
    fn literal_value_without_directive() {
        assert_eq!(formatted!("%d").to_string(), "%d");
        assert_eq!(fmt_seq!("%d", 1).to_string(), "%d1");
    }

    #[test]
    fn fmt_seq_runs_in_order() {
        let n = 3;
        let p = fmt_seq!("[", n, "]");
        assert_eq!(p.to_string(), "[3]");
        assert_eq!(format!("{p:>10}"), "[3]");
    }

    #[test]
    fn fmt_seq_with_directive() {
        assert_eq!(fmt_seq!("%3s"; "a", "bc").to_string(), "  a bc");
    }

    #[test]
    fn seq_macro_single_operand() {
        let only = seq!(crate::format_with(FormatSpec::GENERIC, (1,)));
        let mut buf = FixedBuf::<4>::new();
        only.write_sink(&mut buf).unwrap();
        assert_eq!(buf, "1");
    }
}
