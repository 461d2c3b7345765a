//! Mandatory-argument label convention
//!
//! A builtin label such as `push__list_item` stands for the function `push`
//! whose snippet must always contain the arguments `list` and `item`.

const MANDATORY_MARKER: &str = "__";
const ARG_SEPARATOR: char = '_';

/// A builtin label split into its visible name and mandatory arguments
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedLabel {
    pub base_label: String,
    pub mandatory_args: Vec<String>,
}

/// Decode the `base__arg1_arg2` convention.
///
/// Labels without the marker decode to themselves with no mandatory
/// arguments.
pub fn decode_label(label: &str) -> DecodedLabel {
    match label.split_once(MANDATORY_MARKER) {
        None => DecodedLabel {
            base_label: label.to_string(),
            mandatory_args: vec![],
        },
        Some((base, args)) => DecodedLabel {
            base_label: base.to_string(),
            mandatory_args: args
                .split(ARG_SEPARATOR)
                .filter(|arg| !arg.is_empty())
                .map(str::to_string)
                .collect(),
        },
    }
}
