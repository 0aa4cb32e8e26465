//! Writing one value under a [`FormatSpec`].
//!
//! [`FormatArg`] is the writer capability: a value plus a directive in, text
//! out.  Padding needs the rendered length before anything is written, so each
//! value is rendered once into [`Measure`] and once into the real sink; nothing
//! is buffered on the heap.

use std::fmt::{self, Write};

use crate::sink::Measure;
use crate::spec::{Flags, FormatSpec, Presentation};

/// A value that can be written under a printf-style directive.
pub trait FormatArg {
    fn write_arg(&self, out: &mut dyn fmt::Write, spec: &FormatSpec) -> fmt::Result;
}

impl<T: FormatArg + ?Sized> FormatArg for &T {
    fn write_arg(&self, out: &mut dyn fmt::Write, spec: &FormatSpec) -> fmt::Result {
        (**self).write_arg(out, spec)
    }
}

// ── Padding ───────────────────────────────────────────────────────────────────

type Body<'a> = &'a dyn Fn(&mut dyn fmt::Write) -> fmt::Result;

/// Write `sign`, `prefix` and `body`, padded to the spec's width.
///
/// Zero padding goes between the prefix and the body and only applies when
/// `zero_fill` is set; `-` wins over `0`.
fn write_padded(
    out: &mut dyn fmt::Write,
    spec: &FormatSpec,
    sign: &str,
    prefix: &str,
    zero_fill: bool,
    body: Body<'_>,
) -> fmt::Result {
    let fill = match spec.width {
        Some(width) if width > 0 => {
            let len = sign.len() + prefix.len() + Measure::chars_of(body)?;
            width.saturating_sub(len)
        }
        _ => 0,
    };

    if fill == 0 {
        out.write_str(sign)?;
        out.write_str(prefix)?;
        body(out)
    } else if spec.has(Flags::LEFT) {
        out.write_str(sign)?;
        out.write_str(prefix)?;
        body(out)?;
        repeat(out, ' ', fill)
    } else if zero_fill && spec.has(Flags::ZERO) {
        out.write_str(sign)?;
        out.write_str(prefix)?;
        repeat(out, '0', fill)?;
        body(out)
    } else {
        repeat(out, ' ', fill)?;
        out.write_str(sign)?;
        out.write_str(prefix)?;
        body(out)
    }
}

fn repeat(out: &mut dyn fmt::Write, ch: char, n: usize) -> fmt::Result {
    for _ in 0..n {
        out.write_char(ch)?;
    }
    Ok(())
}

fn sign_of(negative: bool, spec: &FormatSpec) -> &'static str {
    if negative {
        "-"
    } else if spec.has(Flags::PLUS) {
        "+"
    } else if spec.has(Flags::SPACE) {
        " "
    } else {
        ""
    }
}

// ── Text ──────────────────────────────────────────────────────────────────────

/// Precision truncates to that many characters; text never zero-pads.
fn write_text(out: &mut dyn fmt::Write, spec: &FormatSpec, s: &str) -> fmt::Result {
    let text = match spec.precision {
        Some(p) => s.char_indices().nth(p).map_or(s, |(end, _)| &s[..end]),
        None => s,
    };
    write_padded(out, spec, "", "", false, &|w: &mut dyn fmt::Write| w.write_str(text))
}

fn write_char_text(out: &mut dyn fmt::Write, spec: &FormatSpec, ch: char) -> fmt::Result {
    write_padded(out, spec, "", "", false, &|w: &mut dyn fmt::Write| w.write_char(ch))
}

fn write_code_point(out: &mut dyn fmt::Write, spec: &FormatSpec, code: Option<u32>) -> fmt::Result {
    let ch = code.and_then(char::from_u32).unwrap_or(char::REPLACEMENT_CHARACTER);
    write_char_text(out, spec, ch)
}

impl FormatArg for str {
    fn write_arg(&self, out: &mut dyn fmt::Write, spec: &FormatSpec) -> fmt::Result {
        write_text(out, spec, self)
    }
}

impl FormatArg for String {
    fn write_arg(&self, out: &mut dyn fmt::Write, spec: &FormatSpec) -> fmt::Result {
        write_text(out, spec, self)
    }
}

impl FormatArg for char {
    fn write_arg(&self, out: &mut dyn fmt::Write, spec: &FormatSpec) -> fmt::Result {
        if spec.presentation.is_numeric() {
            u32::from(*self).write_arg(out, spec)
        } else {
            write_char_text(out, spec, *self)
        }
    }
}

impl FormatArg for bool {
    fn write_arg(&self, out: &mut dyn fmt::Write, spec: &FormatSpec) -> fmt::Result {
        if spec.presentation.is_numeric() {
            u8::from(*self).write_arg(out, spec)
        } else {
            write_text(out, spec, if *self { "true" } else { "false" })
        }
    }
}

// ── Integers ──────────────────────────────────────────────────────────────────

trait Digits: Copy + PartialEq + Default + fmt::Display + fmt::Octal + fmt::LowerHex + fmt::UpperHex {}

impl<T> Digits for T where
    T: Copy + PartialEq + Default + fmt::Display + fmt::Octal + fmt::LowerHex + fmt::UpperHex
{
}

/// `magnitude` is already in the representation the conversion asks for
/// (absolute value for `d`, two's complement bits for `u`/`o`/`x`).
fn write_integer<U: Digits>(
    out: &mut dyn fmt::Write,
    spec: &FormatSpec,
    magnitude: U,
    negative: bool,
) -> fmt::Result {
    let pres = spec.presentation;
    let is_zero = magnitude == U::default();
    let alt = spec.has(Flags::ALT);
    // Under `%s` (and `{:.N}`) an integer has no digit count to honour.
    let precision = match pres {
        Presentation::Generic => None,
        _ => spec.precision,
    };

    let digits = move |w: &mut dyn fmt::Write| -> fmt::Result {
        match pres {
            Presentation::Octal => write!(w, "{magnitude:o}"),
            Presentation::LowerHex => write!(w, "{magnitude:x}"),
            Presentation::UpperHex => write!(w, "{magnitude:X}"),
            _ => write!(w, "{magnitude}"),
        }
    };

    let sign = match pres {
        Presentation::Generic | Presentation::Decimal => sign_of(negative, spec),
        _ => "",
    };
    let prefix = match pres {
        Presentation::LowerHex if alt && !is_zero => "0x",
        Presentation::UpperHex if alt && !is_zero => "0X",
        _ => "",
    };

    // `%.0d` of zero prints no digits at all.
    let ndigits = if is_zero && precision == Some(0) {
        0
    } else {
        Measure::chars_of(&digits)?
    };
    let mut min_digits = precision.unwrap_or(0);
    if pres == Presentation::Octal && alt && (ndigits == 0 || !is_zero) {
        min_digits = min_digits.max(ndigits + 1);
    }
    let lead = min_digits.saturating_sub(ndigits);

    let body = |w: &mut dyn fmt::Write| -> fmt::Result {
        repeat(w, '0', lead)?;
        if ndigits > 0 {
            digits(w)
        } else {
            Ok(())
        }
    };
    // An explicit precision disables the `0` flag.
    write_padded(out, spec, sign, prefix, precision.is_none(), &body)
}

macro_rules! signed_arg {
    ($($s:ty => $u:ty),* $(,)?) => {$(
        impl FormatArg for $s {
            fn write_arg(&self, out: &mut dyn fmt::Write, spec: &FormatSpec) -> fmt::Result {
                let v = *self;
                match spec.presentation {
                    Presentation::Generic | Presentation::Decimal => {
                        write_integer(out, spec, v.unsigned_abs(), v < 0)
                    }
                    Presentation::Char => write_code_point(out, spec, u32::try_from(v).ok()),
                    p if p.is_float() => write_float(out, spec, v as f64),
                    _ => write_integer(out, spec, v as $u, false),
                }
            }
        }
    )*};
}

macro_rules! unsigned_arg {
    ($($u:ty),* $(,)?) => {$(
        impl FormatArg for $u {
            fn write_arg(&self, out: &mut dyn fmt::Write, spec: &FormatSpec) -> fmt::Result {
                let v = *self;
                match spec.presentation {
                    Presentation::Char => write_code_point(out, spec, u32::try_from(v).ok()),
                    p if p.is_float() => write_float(out, spec, v as f64),
                    _ => write_integer(out, spec, v, false),
                }
            }
        }
    )*};
}

signed_arg!(i8 => u8, i16 => u16, i32 => u32, i64 => u64, i128 => u128, isize => usize);
unsigned_arg!(u8, u16, u32, u64, u128, usize);

// ── Floats ────────────────────────────────────────────────────────────────────

trait Real: Copy + fmt::Display + fmt::LowerExp {
    fn is_nan(self) -> bool;
    fn is_finite(self) -> bool;
    fn is_sign_negative(self) -> bool;
    fn abs(self) -> Self;
    /// Truncating conversion for the integer conversions.
    fn to_i128(self) -> i128;
}

macro_rules! real {
    ($($t:ty),*) => {$(
        impl Real for $t {
            fn is_nan(self) -> bool { <$t>::is_nan(self) }
            fn is_finite(self) -> bool { <$t>::is_finite(self) }
            fn is_sign_negative(self) -> bool { <$t>::is_sign_negative(self) }
            fn abs(self) -> Self { <$t>::abs(self) }
            fn to_i128(self) -> i128 { self as i128 }
        }

        impl FormatArg for $t {
            fn write_arg(&self, out: &mut dyn fmt::Write, spec: &FormatSpec) -> fmt::Result {
                write_float(out, spec, *self)
            }
        }
    )*};
}

real!(f32, f64);

fn write_float<T: Real>(out: &mut dyn fmt::Write, spec: &FormatSpec, v: T) -> fmt::Result {
    let pres = spec.presentation;
    let upper = matches!(pres, Presentation::FixedUpper | Presentation::UpperExp);

    if v.is_nan() {
        let text = match pres {
            Presentation::Generic => "NaN",
            _ if upper => "NAN",
            _ => "nan",
        };
        return write_padded(out, spec, "", "", false, &|w: &mut dyn fmt::Write| w.write_str(text));
    }

    let sign = sign_of(v.is_sign_negative(), spec);
    let mag = v.abs();
    if !v.is_finite() {
        let text = if upper { "INF" } else { "inf" };
        return write_padded(out, spec, sign, "", false, &|w: &mut dyn fmt::Write| w.write_str(text));
    }

    let alt = spec.has(Flags::ALT);
    match pres {
        Presentation::Generic if spec.precision.is_none() => {
            write_padded(out, spec, sign, "", true, &|w: &mut dyn fmt::Write| write!(w, "{mag}"))
        }
        Presentation::LowerExp | Presentation::UpperExp => {
            let precision = spec.precision.unwrap_or(6);
            let body = |w: &mut dyn fmt::Write| -> fmt::Result {
                let mut exp = ExpWriter::new(w, upper, alt && precision == 0);
                write!(exp, "{mag:.precision$e}")?;
                exp.finish()
            };
            write_padded(out, spec, sign, "", true, &body)
        }
        Presentation::Generic | Presentation::Fixed | Presentation::FixedUpper => {
            let precision = spec.precision.unwrap_or(6);
            let body = |w: &mut dyn fmt::Write| -> fmt::Result {
                write!(w, "{mag:.precision$}")?;
                if alt && precision == 0 {
                    w.write_char('.')?;
                }
                Ok(())
            };
            write_padded(out, spec, sign, "", true, &body)
        }
        _ => v.to_i128().write_arg(out, spec),
    }
}

/// Rewrites the exponent of Rust's `1.5e3` into printf's `1.5e+03`.
struct ExpWriter<'a> {
    out: &'a mut dyn fmt::Write,
    upper: bool,
    /// `%#.0e` keeps the decimal point: `3.e+00`.
    force_point: bool,
    in_exp: bool,
    exp: [u8; 8],
    exp_len: usize,
}

impl<'a> ExpWriter<'a> {
    fn new(out: &'a mut dyn fmt::Write, upper: bool, force_point: bool) -> Self {
        Self { out, upper, force_point, in_exp: false, exp: [0; 8], exp_len: 0 }
    }

    fn push_exp(&mut self, s: &str) -> fmt::Result {
        let end = self.exp_len + s.len();
        if end > self.exp.len() {
            return Err(fmt::Error);
        }
        self.exp[self.exp_len..end].copy_from_slice(s.as_bytes());
        self.exp_len = end;
        Ok(())
    }

    fn finish(&mut self) -> fmt::Result {
        let digits = &self.exp[..self.exp_len];
        let (sign, digits) = match digits.split_first() {
            Some((&b'-', rest)) => ('-', rest),
            _ => ('+', digits),
        };
        self.out.write_char(if self.upper { 'E' } else { 'e' })?;
        self.out.write_char(sign)?;
        if digits.len() < 2 {
            self.out.write_char('0')?;
        }
        let digits = std::str::from_utf8(digits).map_err(|_| fmt::Error)?;
        self.out.write_str(digits)
    }
}

impl fmt::Write for ExpWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.in_exp {
            return self.push_exp(s);
        }
        match s.find('e') {
            Some(at) => {
                self.out.write_str(&s[..at])?;
                if self.force_point {
                    self.out.write_char('.')?;
                }
                self.in_exp = true;
                self.push_exp(&s[at + 1..])
            }
            None => self.out.write_str(s),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn render<T: FormatArg + ?Sized>(value: &T, spec: &str) -> String {
        let mut out = String::new();
        value.write_arg(&mut out, &FormatSpec::parse(spec).unwrap()).unwrap();
        out
    }

    #[test]
    fn decimal_padding_and_sign() {
        assert_eq!(render(&5, "%03d"), "005");
        assert_eq!(render(&-5, "%03d"), "-05");
        assert_eq!(render(&5, "%+d"), "+5");
        assert_eq!(render(&5, "% d"), " 5");
        assert_eq!(render(&42, "%-5d"), "42   ");
        assert_eq!(render(&42, "%5d"), "   42");
        assert_eq!(render(&42, "%-05d"), "42   ");
        assert_eq!(render(&i64::MIN, "%d"), "-9223372036854775808");
    }

    #[test]
    fn integer_precision() {
        assert_eq!(render(&7, "%.3d"), "007");
        assert_eq!(render(&-7, "%.3d"), "-007");
        assert_eq!(render(&7, "%05.3d"), "  007");
        assert_eq!(render(&0, "%.0d"), "");
        assert_eq!(render(&0, "%3.0d"), "   ");
    }

    #[test]
    fn generic_integers_ignore_precision() {
        assert_eq!(render(&5, "%.3s"), "5");
        assert_eq!(render(&-5, "%05.3s"), "-0005");
        assert_eq!(render(&0u8, "%.0s"), "0");
    }

    #[test]
    fn radix_conversions() {
        assert_eq!(render(&255u8, "%x"), "ff");
        assert_eq!(render(&255u8, "%#X"), "0XFF");
        assert_eq!(render(&255u32, "%#06x"), "0x00ff");
        assert_eq!(render(&0, "%#x"), "0");
        assert_eq!(render(&8, "%o"), "10");
        assert_eq!(render(&8, "%#o"), "010");
        assert_eq!(render(&0, "%#o"), "0");
        assert_eq!(render(&0, "%#.0o"), "0");
    }

    #[test]
    fn negative_values_under_unsigned_conversions() {
        assert_eq!(render(&-1i8, "%u"), "255");
        assert_eq!(render(&-1i32, "%x"), "ffffffff");
        assert_eq!(render(&-1i16, "%+u"), "65535");
    }

    #[test]
    fn code_points() {
        assert_eq!(render(&65, "%c"), "A");
        assert_eq!(render(&0x20ACu32, "%3c"), "  €");
        assert_eq!(render(&-1, "%c"), "\u{FFFD}");
        assert_eq!(render(&0xD800u32, "%c"), "\u{FFFD}");
    }

    #[test]
    fn fixed_floats() {
        assert_eq!(render(&1.23456, "%.2f"), "1.23");
        assert_eq!(render(&1.0, "%f"), "1.000000");
        assert_eq!(render(&-1.5, "%08.2f"), "-0001.50");
        assert_eq!(render(&1.5, "%+.1f"), "+1.5");
        assert_eq!(render(&3.0, "%#.0f"), "3.");
        assert_eq!(render(&3.0, "%.0f"), "3");
        assert_eq!(render(&-0.0, "%.1f"), "-0.0");
        assert_eq!(render(&5, "%.1f"), "5.0");
    }

    #[test]
    fn exponent_floats() {
        assert_eq!(render(&1234.5, "%e"), "1.234500e+03");
        assert_eq!(render(&0.00012, "%.1E"), "1.2E-04");
        assert_eq!(render(&0.0, "%e"), "0.000000e+00");
        assert_eq!(render(&1e-300, "%.0e"), "1e-300");
        assert_eq!(render(&3.0, "%#.0e"), "3.e+00");
        assert_eq!(render(&-2.5, "%012.2e"), "-0002.50e+00");
    }

    #[test]
    fn generic_floats() {
        assert_eq!(render(&2.5, "%s"), "2.5");
        assert_eq!(render(&5.0f64, "%s"), "5");
        assert_eq!(render(&0.1f32, "%s"), "0.1");
        assert_eq!(render(&2.5, "%.3s"), "2.500");
        assert_eq!(render(&2.5, "%06s"), "0002.5");
    }

    #[test]
    fn non_finite_floats() {
        assert_eq!(render(&f64::NAN, "%5f"), "  nan");
        assert_eq!(render(&f64::NAN, "%E"), "NAN");
        assert_eq!(render(&f64::NAN, "%s"), "NaN");
        assert_eq!(render(&f64::NEG_INFINITY, "%f"), "-inf");
        assert_eq!(render(&f64::INFINITY, "%08F"), "     INF");
        assert_eq!(render(&f64::INFINITY, "%+e"), "+inf");
    }

    #[test]
    fn floats_under_integer_conversions_truncate() {
        assert_eq!(render(&2.7, "%d"), "2");
        assert_eq!(render(&-2.7, "%d"), "-2");
        assert_eq!(render(&255.9, "%x"), "ff");
    }

    #[test]
    fn text() {
        assert_eq!(render("apple", "%s"), "apple");
        assert_eq!(render("apple", "%.3s"), "app");
        assert_eq!(render("apple", "%8s"), "   apple");
        assert_eq!(render("apple", "%-8s"), "apple   ");
        assert_eq!(render("apple", "%08s"), "   apple");
        assert_eq!(render("€uro", "%.1s"), "€");
        assert_eq!(render("€uro", "%5s"), " €uro");
        assert_eq!(render(&String::from("pear"), "%.10s"), "pear");
    }

    #[test]
    fn text_ignores_numeric_conversions() {
        assert_eq!(render("ab", "%d"), "ab");
        assert_eq!(render("ab", "%#x"), "ab");
    }

    #[test]
    fn chars_and_bools() {
        assert_eq!(render(&'x', "%3c"), "  x");
        assert_eq!(render(&'x', "%-3s"), "x  ");
        assert_eq!(render(&'a', "%d"), "97");
        assert_eq!(render(&'a', "%#x"), "0x61");
        assert_eq!(render(&true, "%s"), "true");
        assert_eq!(render(&false, "%.1s"), "f");
        assert_eq!(render(&true, "%d"), "1");
    }

    #[test]
    fn references_delegate() {
        let n = 5;
        assert_eq!(render(&&n, "%02d"), "05");
        assert_eq!(render(&&&"hi", "%3s"), " hi");
    }

    #[test]
    fn sink_errors_propagate() {
        let mut buf = crate::sink::FixedBuf::<2>::new();
        let spec = FormatSpec::parse("%5d").unwrap();
        assert!(42i32.write_arg(&mut buf, &spec).is_err());
    }
}
