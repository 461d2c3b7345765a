//! Call signature parsing
//!
//! Signatures come from builtin `detail` strings and from function
//! declarations found in the document, both in the `(name: Type, ...)` form.

/// Split the parameter list of a signature into raw argument strings.
///
/// Only the first parenthesised group is considered. Each returned entry may
/// still carry a type annotation (`"x: Number"`); use [`arg_name`] to get the
/// bare name.
pub fn parse_signature_args(signature: Option<&str>) -> Vec<String> {
    let Some(inside) = signature.and_then(parenthesised) else {
        return vec![];
    };

    inside
        .split(',')
        .map(str::trim)
        .filter(|arg| !arg.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reduce a raw argument such as `"mut count: int"` to its name (`"count"`).
pub fn arg_name(arg: &str) -> &str {
    let arg = arg.trim();
    let arg = match arg.strip_prefix("mut") {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest.trim_start(),
        _ => arg,
    };

    arg.split(':').next().unwrap_or_default().trim()
}

/// Bare parameter names of a signature, in declaration order
pub fn extract_arg_names(signature: &str) -> Vec<String> {
    parse_signature_args(Some(signature))
        .iter()
        .map(|arg| arg_name(arg).to_string())
        .collect()
}

/// Text between the first `(` and the next `)`
fn parenthesised(signature: &str) -> Option<&str> {
    let open = signature.find('(')?;
    let rest = &signature[open + 1..];
    let close = rest.find(')')?;
    Some(&rest[..close])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_typed_args() {
        assert_eq!(
            parse_signature_args(Some("(a: int, b: str)")),
            vec!["a: int", "b: str"]
        );
    }

    #[test]
    fn test_parse_absent_or_empty() {
        assert!(parse_signature_args(None).is_empty());
        assert!(parse_signature_args(Some("")).is_empty());
        assert!(parse_signature_args(Some("()")).is_empty());
        assert!(parse_signature_args(Some("(   )")).is_empty());
    }

    #[test]
    fn test_parse_without_parens() {
        assert!(parse_signature_args(Some("a: int, b: int")).is_empty());
        assert!(parse_signature_args(Some("(a: int")).is_empty());
    }

    #[test]
    fn test_parse_trailing_comma() {
        assert_eq!(parse_signature_args(Some("(x, y,)")), vec!["x", "y"]);
    }

    #[test]
    fn test_parse_uses_first_group() {
        assert_eq!(
            parse_signature_args(Some("map(list: List, f: (a) -> b)")),
            vec!["list: List", "f: (a"]
        );
    }

    #[test]
    fn test_arg_name() {
        assert_eq!(arg_name("value: str"), "value");
        assert_eq!(arg_name("  count  "), "count");
        assert_eq!(arg_name("mut acc: int"), "acc");
        assert_eq!(arg_name("mutable: bool"), "mutable");
        assert_eq!(arg_name(": int"), "");
    }

    #[test]
    fn test_extract_arg_names() {
        assert_eq!(
            extract_arg_names("add(mut a: int, b: int)"),
            vec!["a", "b"]
        );
        assert!(extract_arg_names("noop()").is_empty());
    }

    proptest! {
        #[test]
        fn prop_no_parens_gives_no_args(s in "[^()]*") {
            prop_assert!(parse_signature_args(Some(s.as_str())).is_empty());
        }

        #[test]
        fn prop_parse_is_deterministic(s in ".*") {
            prop_assert_eq!(
                parse_signature_args(Some(s.as_str())),
                parse_signature_args(Some(s.as_str()))
            );
        }
    }
}
