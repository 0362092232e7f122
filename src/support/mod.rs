//! @acp:module "Support Fragments"
//! @acp:summary "Runtime helper types shared by cmdgen and every generated unit"
//! @acp:domain cli
//! @acp:layer runtime
//!
//! Each submodule is an ordinary module of this crate and, at the same time,
//! a template asset: its source text is spliced into generated code after
//! its leading `use` block (see `codegen::splice`). Fragments therefore only
//! refer to std, clap, chrono and each other through `super::`.

pub mod duration;
pub mod flags;
pub mod string_enum;
pub mod timestamp;

pub use duration::{parse_duration, Duration, InvalidDuration};
pub use flags::{Arity, FlagSet, FlagValue};
pub use string_enum::{StringEnum, StringEnumArray};
pub use timestamp::Timestamp;

/// Fragment sources in emission order
pub const FRAGMENTS: &[(&str, &str)] = &[
    ("flags.rs", include_str!("flags.rs")),
    ("duration.rs", include_str!("duration.rs")),
    ("string_enum.rs", include_str!("string_enum.rs")),
    ("timestamp.rs", include_str!("timestamp.rs")),
];
