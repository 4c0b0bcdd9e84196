//! Parser for field directives.
//!
//! A directive is the string attached to a field, e.g.
//! `Required;MinSize(5);In(a,b,c)`:
//!
//! ```text
//! directive = rule (';' rule)*
//! rule      = name | name '(' arg (',' arg)* ')'
//! ```
//!
//! Parameters stay raw strings; rules that need numbers convert them when
//! they run. Malformed segments are dropped so one bad rule never disables
//! the rest of the directive.

use tracing::debug;

/// One rule named in a directive, with its raw parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleInvocation {
    pub name: String,
    pub params: Vec<String>,
}

impl RuleInvocation {
    pub fn new(name: impl Into<String>, params: Vec<String>) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}

/// Parse a directive into rule invocations, in declaration order.
pub fn parse(directive: &str) -> Vec<RuleInvocation> {
    split_rules(directive)
        .into_iter()
        .filter_map(|segment| {
            let parsed = parse_rule(segment);
            if parsed.is_none() {
                debug!(directive, segment, "ignoring malformed rule");
            }
            parsed
        })
        .collect()
}

/// Split on `;` outside of parentheses, dropping empty segments.
fn split_rules(directive: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (idx, ch) in directive.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ';' if depth == 0 => {
                segments.push(&directive[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    segments.push(&directive[start..]);

    segments
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_rule(segment: &str) -> Option<RuleInvocation> {
    let Some(open) = segment.find('(') else {
        return is_rule_name(segment).then(|| RuleInvocation::new(segment, Vec::new()));
    };

    let name = segment[..open].trim_end();
    let args = segment[open + 1..].strip_suffix(')')?;
    if !is_rule_name(name) || args.contains('(') || args.contains(')') {
        return None;
    }

    let params = if args.is_empty() {
        Vec::new()
    } else {
        args.split(',').map(str::to_string).collect()
    };
    Some(RuleInvocation::new(name, params))
}

fn is_rule_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(directive: &str) -> Vec<String> {
        parse(directive).into_iter().map(|r| r.name).collect()
    }

    #[test]
    fn test_bare_rules_in_order() {
        assert_eq!(names("Required;AlphaDash;Email"), ["Required", "AlphaDash", "Email"]);
    }

    #[test]
    fn test_parameters_are_raw() {
        let rules = parse("Range(1,2);In(a, b);Include( x)");
        assert_eq!(rules[0], RuleInvocation::new("Range", vec!["1".into(), "2".into()]));
        assert_eq!(rules[1].params, ["a", " b"]);
        assert_eq!(rules[2].params, [" x"]);
    }

    #[test]
    fn test_empty_and_whitespace_segments_are_skipped() {
        assert_eq!(names(""), Vec::<String>::new());
        assert_eq!(names(" ; Required ;; "), ["Required"]);
    }

    #[test]
    fn test_empty_parentheses() {
        let rules = parse("Size()");
        assert_eq!(rules, [RuleInvocation::new("Size", Vec::new())]);
    }

    #[test]
    fn test_malformed_segments_are_dropped() {
        assert_eq!(names("Required;MinSize(5"), ["Required"]);
        assert_eq!(names("Required);Email"), ["Email"]);
        assert_eq!(names("(5);Url"), ["Url"]);
        assert_eq!(names("Size(1)x;Email"), ["Email"]);
        assert_eq!(names("In((1));Email"), ["Email"]);
    }

    #[test]
    fn test_semicolon_inside_parentheses_does_not_split() {
        let rules = parse("Include(a;b);Required");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].params, ["a;b"]);
    }
}
