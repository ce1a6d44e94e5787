//! Compilation knobs. Flattened into every CLI subcommand; embedders can also
//! deserialize them.
use clap::{Args, ValueEnum};
use serde::Deserialize;

pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Args, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Options {
    /// maximum descriptor nesting before compilation is aborted
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// how a field that accepts null but no primitive kind is emitted
    #[arg(long, value_enum, default_value_t = NullOnly::TypeNull)]
    pub null_only: NullOnly,
}

/// Policy for `null` when the field has no `Value` entry to fold it into.
///
/// This covers every such field, not only null-only ones: `"a" | null` and
/// `Object | null` fall under it too, since literals and objects carry no
/// type list for `null` to join.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NullOnly {
    /// emit a leading `{"type": ["null"]}` fragment
    #[default]
    TypeNull,
    /// emit nothing for null; a field left without fragments becomes `{}`
    Omit,
}

impl Default for Options {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH, null_only: NullOnly::default() }
    }
}
