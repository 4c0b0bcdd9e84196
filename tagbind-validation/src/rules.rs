// Built-in rule set

use crate::directive::RuleInvocation;
use crate::errors::*;
use crate::field::{Field, Value};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static ALPHA_DASH_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_-]").unwrap());

static ALPHA_DASH_DOT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_.-]").unwrap());

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\w!#$%&'*+/=?^_`{|}~-]+(?:\.[\w!#$%&'*+/=?^_`{|}~-]+)*@(?:\w(?:[\w-]*\w)?\.)+[a-zA-Z0-9](?:[\w-]*\w)?$").unwrap()
});

/// The fixed catalog of rules a directive may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Required,
    AlphaDash,
    AlphaDashDot,
    Size,
    MinSize,
    MaxSize,
    Range,
    In,
    NotIn,
    Include,
    Exclude,
    Email,
    Url,
    Default,
}

impl RuleKind {
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "Required" => RuleKind::Required,
            "AlphaDash" => RuleKind::AlphaDash,
            "AlphaDashDot" => RuleKind::AlphaDashDot,
            "Size" => RuleKind::Size,
            "MinSize" => RuleKind::MinSize,
            "MaxSize" => RuleKind::MaxSize,
            "Range" => RuleKind::Range,
            "In" => RuleKind::In,
            "NotIn" => RuleKind::NotIn,
            "Include" => RuleKind::Include,
            "Exclude" => RuleKind::Exclude,
            "Email" => RuleKind::Email,
            "Url" => RuleKind::Url,
            "Default" => RuleKind::Default,
            _ => return None,
        };
        Some(kind)
    }

    /// Canonical rule name, also used as the error message.
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::Required => "Required",
            RuleKind::AlphaDash => "AlphaDash",
            RuleKind::AlphaDashDot => "AlphaDashDot",
            RuleKind::Size => "Size",
            RuleKind::MinSize => "MinSize",
            RuleKind::MaxSize => "MaxSize",
            RuleKind::Range => "Range",
            RuleKind::In => "In",
            RuleKind::NotIn => "NotIn",
            RuleKind::Include => "Include",
            RuleKind::Exclude => "Exclude",
            RuleKind::Email => "Email",
            RuleKind::Url => "Url",
            RuleKind::Default => "Default",
        }
    }

    pub fn classification(&self) -> &'static str {
        match self {
            RuleKind::Required => ERR_REQUIRED,
            RuleKind::AlphaDash => ERR_ALPHA_DASH,
            RuleKind::AlphaDashDot => ERR_ALPHA_DASH_DOT,
            RuleKind::Size => ERR_SIZE,
            RuleKind::MinSize => ERR_MIN_SIZE,
            RuleKind::MaxSize => ERR_MAX_SIZE,
            RuleKind::Range => ERR_RANGE,
            RuleKind::In => ERR_IN,
            RuleKind::NotIn => ERR_NOT_IN,
            RuleKind::Include => ERR_INCLUDE,
            RuleKind::Exclude => ERR_EXCLUDE,
            RuleKind::Email => ERR_EMAIL,
            RuleKind::Url => ERR_URL,
            RuleKind::Default => ERR_DEFAULT,
        }
    }
}

/// A rule resolved from a directive, ready to run against a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    kind: RuleKind,
    params: Vec<String>,
}

impl Rule {
    pub fn new(kind: RuleKind, params: Vec<String>) -> Self {
        Self { kind, params }
    }

    /// Resolve an invocation against the catalog. Unknown names are dropped.
    pub fn compile(invocation: RuleInvocation) -> Option<Self> {
        match RuleKind::from_name(&invocation.name) {
            Some(kind) => Some(Self::new(kind, invocation.params)),
            None => {
                debug!(rule = %invocation.name, "ignoring unknown rule");
                None
            }
        }
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Run the rule, appending at most one error for `field_name`.
    pub fn apply(&self, field: &mut dyn Field, field_name: &str, errors: &mut Errors) {
        if !self.check(field) {
            errors.add([field_name], self.kind.classification(), self.kind.name());
        }
    }

    /// Whether the field satisfies the rule. `Default` may assign the field.
    pub fn check(&self, field: &mut dyn Field) -> bool {
        match self.kind {
            RuleKind::Required => !field.is_zero(),
            RuleKind::Default => !field.is_zero() || field.apply_default(&self.joined()),
            // Every other rule only constrains values that were provided.
            _ if field.is_zero() => true,
            _ => self.check_value(field.value()),
        }
    }

    fn check_value(&self, value: Value<'_>) -> bool {
        match self.kind {
            RuleKind::AlphaDash => value
                .text()
                .is_none_or(|text| !ALPHA_DASH_REGEX.is_match(&text)),
            RuleKind::AlphaDashDot => value
                .text()
                .is_none_or(|text| !ALPHA_DASH_DOT_REGEX.is_match(&text)),
            RuleKind::Size => self.compare_len(value, |len, n| len == n),
            RuleKind::MinSize => self.compare_len(value, |len, n| len >= n),
            RuleKind::MaxSize => self.compare_len(value, |len, n| len <= n),
            RuleKind::Range => self.in_range(value),
            RuleKind::In => value
                .text()
                .is_some_and(|text| self.params.iter().any(|p| *p == text)),
            RuleKind::NotIn => value
                .text()
                .is_none_or(|text| !self.params.iter().any(|p| *p == text)),
            RuleKind::Include => value
                .text()
                .is_some_and(|text| text.contains(self.joined().as_str())),
            RuleKind::Exclude => value
                .text()
                .is_none_or(|text| !text.contains(self.joined().as_str())),
            RuleKind::Email => value.text().is_some_and(|text| EMAIL_REGEX.is_match(&text)),
            RuleKind::Url => value.text().is_some_and(|text| is_url(&text)),
            RuleKind::Required | RuleKind::Default => true,
        }
    }

    /// Size rules take one non-negative integer; anything else fails.
    fn compare_len(&self, value: Value<'_>, cmp: impl Fn(usize, usize) -> bool) -> bool {
        let [raw] = self.params.as_slice() else {
            return false;
        };
        let Some(n) = raw.trim().parse::<usize>().ok() else {
            return false;
        };
        value.len().is_none_or(|len| cmp(len, n))
    }

    fn in_range(&self, value: Value<'_>) -> bool {
        let [lo, hi] = self.params.as_slice() else {
            return false;
        };
        let (Ok(lo), Ok(hi)) = (lo.trim().parse::<i128>(), hi.trim().parse::<i128>()) else {
            return false;
        };
        let bounds = lo..=hi;

        // Integers compare exactly; only floats go through f64.
        let exact = match value {
            Value::Int(n) => Some(i128::from(n)),
            Value::Uint(n) => Some(i128::from(n)),
            Value::Str(s) => s.trim().parse::<i128>().ok(),
            _ => None,
        };
        match exact {
            Some(n) => bounds.contains(&n),
            None => value
                .number()
                .is_some_and(|n| n >= *bounds.start() as f64 && n <= *bounds.end() as f64),
        }
    }

    /// Parameters re-joined, for rules whose single argument may contain commas.
    fn joined(&self) -> String {
        self.params.join(",")
    }
}

fn is_url(text: &str) -> bool {
    url::Url::parse(text)
        .map(|url| !url.cannot_be_a_base() && url.host_str().is_some_and(|h| !h.is_empty()))
        .unwrap_or(false)
}
