//! Lazy, allocation-free text formatting.
//!
//! Values are captured into a closure when a format is described and written
//! only when a consumer asks for text.  Closures compose with [`select()`] and
//! [`seq()`] without boxing, and [`Printable`] hands the result to anything that
//! takes a [`std::fmt::Display`].
//!
//! ```
//! use lazyfmt::{fmt_if, fmt_seq, formatted, thunk, Closure};
//!
//! assert_eq!(format!("{:03}", formatted!(5)), "005");
//! assert_eq!(formatted!("%03d"; 5).to_string(), "005");
//! assert_eq!(fmt_seq!(5, " ", "apple").to_string(), "5 apple");
//!
//! let (a, b) = (6, 3);
//! let ratio = fmt_if(b != 0, Closure::thunk((a, b), |&(a, b): &(i32, i32)| a / b), thunk(|| "NaN"));
//! assert_eq!(ratio.to_string(), "2");
//! ```
//!
//! ## Modules
//!
//! * [`closure`]: captured values plus a function, tagged with a call shape.
//! * [`combinator`]: `select` and `seq`.
//! * [`adapter`]: closures that write captured values under a [`FormatSpec`].
//! * [`printable`]: the bridge to `Display`, `fmt::Write` and `io::Write`.
//! * [`lazy`]: `formatted`, `formatted_with` and `fmt_if`.
//! * [`spec`], [`arg`]: printf-style directives and how values render under them.
//! * [`sink`]: the fixed-capacity [`FixedBuf`] sink.

pub mod adapter;
pub mod arg;
pub mod cli;
pub mod closure;
pub mod combinator;
pub mod lazy;
pub mod macros;
pub mod printable;
pub mod sink;
pub mod spec;
pub mod value;

pub use adapter::{defer, format_dyn, format_with, Baked, Deferred, Dynamic, FormatArgs};
pub use arg::FormatArg;
pub use closure::{thunk, Closure, Nullary, Shape, Shaped, SinkWrite, SpecWrite, Thunk, ToSink, ToWriter};
pub use combinator::{select, seq, Select, Seq};
pub use lazy::{fmt_if, formatted, formatted_with, FmtIf, Formatted, FormattedWith};
pub use printable::{printable, Printable, Realize};
pub use sink::FixedBuf;
pub use spec::{Flags, FormatSpec, Presentation, SpecError};
pub use value::Value;
