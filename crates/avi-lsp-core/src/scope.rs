//! Position-sensitive completion source
//!
//! Offers the parameters of every function whose body contains the cursor.
//! Bodies are found by brace matching from the declaration, so braces inside
//! strings or comments will confuse it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::extract::function_headers;
use crate::signature::extract_arg_names;

/// Zero-based cursor position; `character` counts UTF-16 code units
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// A name visible at the cursor
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopeSymbol {
    pub name: String,
    /// Function that declares it
    pub owner: String,
}

/// Byte offset of `position` in `text`, clamped to the end of its line and
/// to the end of the text
pub fn offset_at(text: &str, position: Position) -> usize {
    let mut offset = 0;

    for (idx, line) in text.split_inclusive('\n').enumerate() {
        if idx == position.line as usize {
            let content = line.trim_end_matches(['\n', '\r']);
            let mut units = 0;
            for (i, ch) in content.char_indices() {
                if units >= position.character as usize {
                    return offset + i;
                }
                units += ch.len_utf16();
            }
            return offset + content.len();
        }
        offset += line.len();
    }

    text.len()
}

/// Parameters in scope at `position`, innermost function first
pub fn scope_symbols(text: &str, position: Position) -> Vec<ScopeSymbol> {
    let offset = offset_at(text, position);

    let mut enclosing: Vec<_> = function_headers(text)
        .filter_map(|(header_end, function)| {
            let (open, close) = body_span(text, header_end)?;
            (open < offset && offset <= close).then_some((open, function))
        })
        .collect();
    enclosing.sort_by(|a, b| b.0.cmp(&a.0));

    let mut seen = HashSet::new();
    let mut symbols = Vec::new();
    for (_, function) in enclosing {
        for name in extract_arg_names(&function.signature) {
            if !name.is_empty() && seen.insert(name.clone()) {
                symbols.push(ScopeSymbol {
                    name,
                    owner: function.name.clone(),
                });
            }
        }
    }

    symbols
}

/// Byte offsets of a function body's `{` and its matching `}`.
///
/// Only whitespace or a `-> Type` annotation may sit between the parameter
/// list and the `{`; anything else means the declaration has no body. An
/// unterminated body runs to the end of the text.
fn body_span(text: &str, header_end: usize) -> Option<(usize, usize)> {
    let rest = &text[header_end..];
    let brace = rest.find('{')?;
    if !is_return_annotation(rest[..brace].trim()) {
        return None;
    }
    let open = header_end + brace;

    let mut depth = 0usize;
    for (i, byte) in text.bytes().enumerate().skip(open) {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some((open, i));
                }
            }
            _ => {}
        }
    }

    Some((open, text.len()))
}

fn is_return_annotation(between: &str) -> bool {
    if between.is_empty() {
        return true;
    }
    match between.strip_prefix("->").map(str::trim) {
        Some(ty) if !ty.is_empty() => ty.chars().all(is_type_char),
        _ => false,
    }
}

fn is_type_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '[' | ']' | '<' | '>' | ',' | '.' | ' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(symbols: &[ScopeSymbol]) -> Vec<&str> {
        symbols.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_offset_at() {
        let text = "ab\ncd\n";
        assert_eq!(offset_at(text, Position::new(0, 0)), 0);
        assert_eq!(offset_at(text, Position::new(1, 1)), 4);
        assert_eq!(offset_at(text, Position::new(1, 99)), 5);
        assert_eq!(offset_at(text, Position::new(7, 0)), text.len());
        assert_eq!(offset_at("", Position::new(0, 3)), 0);
    }

    #[test]
    fn test_offset_at_counts_utf16_units() {
        // 'é' is one UTF-16 unit but two bytes
        let text = "é x";
        assert_eq!(offset_at(text, Position::new(0, 2)), 3);
    }

    #[test]
    fn test_offset_at_crlf() {
        let text = "ab\r\ncd";
        assert_eq!(offset_at(text, Position::new(0, 9)), 2);
        assert_eq!(offset_at(text, Position::new(1, 0)), 4);
    }

    #[test]
    fn test_params_inside_body() {
        let text = "fn add(a: int, b: int) {\n  \n}\n";
        let symbols = scope_symbols(text, Position::new(1, 2));
        assert_eq!(names(&symbols), vec!["a", "b"]);
        assert_eq!(symbols[0].owner, "add");
    }

    #[test]
    fn test_nothing_outside_body() {
        let text = "fn add(a: int, b: int) {\n}\nlet z = 1\n";
        assert!(scope_symbols(text, Position::new(2, 0)).is_empty());
        assert!(scope_symbols(text, Position::new(0, 3)).is_empty());
    }

    #[test]
    fn test_nested_functions_innermost_first() {
        let text = "fn outer(x: int, mut y: int) {\n  fn inner(z: int, x: int) {\n    \n  }\n}\n";
        let symbols = scope_symbols(text, Position::new(2, 4));
        assert_eq!(names(&symbols), vec!["z", "x", "y"]);
        assert_eq!(symbols[0].owner, "inner");
        assert_eq!(symbols[2].owner, "outer");
    }

    #[test]
    fn test_unterminated_body_extends_to_end() {
        let text = "fn draft(item: str) {\n  let n = ";
        let symbols = scope_symbols(text, Position::new(1, 10));
        assert_eq!(names(&symbols), vec!["item"]);
    }

    #[test]
    fn test_declaration_without_body() {
        let text = "fn extern_call(a: int);\n{\n}\n";
        assert!(scope_symbols(text, Position::new(1, 1)).is_empty());
    }

    #[test]
    fn test_bodyless_header_does_not_claim_next_body() {
        let text = "fn decl(a)\nlet y = 1\nfn g(b) {\n x\n}";
        let symbols = scope_symbols(text, Position::new(3, 1));
        assert_eq!(names(&symbols), vec!["b"]);
        assert_eq!(symbols[0].owner, "g");
    }

    #[test]
    fn test_return_annotation_before_body() {
        let text = "fn size(items: list) -> int {\n  \n}\n";
        assert_eq!(names(&scope_symbols(text, Position::new(1, 2))), vec!["items"]);
    }
}
