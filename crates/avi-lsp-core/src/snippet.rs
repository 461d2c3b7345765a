//! Snippet synthesis for callable completions

use crate::signature::arg_name;

/// Build an insertable call snippet such as `push(list: ${1:list}, item: ${2:item})`.
///
/// Mandatory arguments come first in their given order. Signature arguments
/// follow, reduced to their bare names, and are skipped when a name is
/// already present. Each argument gets the next tab stop with its own name as
/// the default text.
pub fn make_snippet(label: &str, mandatory_args: &[String], signature_args: &[String]) -> String {
    let mut names: Vec<&str> = Vec::with_capacity(mandatory_args.len() + signature_args.len());

    let candidates = mandatory_args
        .iter()
        .map(|arg| arg.trim())
        .chain(signature_args.iter().map(|arg| arg_name(arg)));

    for name in candidates {
        if !name.is_empty() && !names.contains(&name) {
            names.push(name);
        }
    }

    let placeholders: Vec<String> = names
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{}: ${{{}:{}}}", name, i + 1, name))
        .collect();

    format!("{}({})", label, placeholders.join(", "))
}
