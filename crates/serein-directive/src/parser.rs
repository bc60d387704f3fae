//! Directive extraction from raw assistant text.
//!
//! The grammar is deliberately small: one `#NAME{...}` block where
//! `NAME` is uppercase letters/underscores and the braces hold
//! comma-separated `key:value` pairs. Values are double-quoted strings
//! (`\"` is the only escape), unsigned/decimal numbers, or the literals
//! `true`/`false`.
//!
//! Parsing never fails. Text without a well-formed directive passes
//! through untouched, and individually malformed pairs inside an
//! otherwise valid directive are skipped rather than rejecting the
//! whole block.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use serein_types::ParamValue;

/// A directive-shaped block: `#NAME{...}` with a non-nested brace body.
static DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([A-Z_]+)\{([^{}]*)\}").expect("directive pattern compiles"));

/// One `key:value` pair inside the brace body. Permissive on purpose:
/// pairs that do not match are skipped, not fatal.
static PAIR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_][A-Za-z0-9_]*)\s*:\s*("(?:[^"\\]|\\")*"|true|false|[0-9]+(?:\.[0-9]+)?)"#)
        .expect("pair pattern compiles")
});

/// The result of one parse call.
///
/// Produced fresh per call and carries no identity. At most one
/// directive is ever present; `display_text` never contains a
/// directive-shaped substring, so re-parsing it always yields
/// `directive_name = None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDirective {
    /// Name of the recognized directive, if any.
    pub directive_name: Option<String>,

    /// Flat key/value parameters of the recognized directive.
    pub params: BTreeMap<String, ParamValue>,

    /// The input with directive blocks removed and whitespace trimmed.
    pub display_text: String,

    /// The input as given.
    pub raw_text: String,
}

/// Extract at most one directive from `text`.
///
/// Only the first directive-shaped block contributes a name and
/// parameters. Every directive-shaped block is removed from
/// `display_text` so that later blocks stay inert: they are never
/// actionable, on this parse or any re-parse of the display text.
/// Removal runs to a fixpoint, since deleting a block can splice the
/// surrounding text into a new directive-shaped substring.
///
/// ```
/// let parsed = serein_directive::parse("Respire. #EXERCICE_RESPIRATION{type:\"4-7-8\",cycles:3}");
/// assert_eq!(parsed.display_text, "Respire.");
/// assert_eq!(parsed.directive_name.as_deref(), Some("EXERCICE_RESPIRATION"));
/// ```
pub fn parse(text: &str) -> ParsedDirective {
    let Some(caps) = DIRECTIVE_RE.captures(text) else {
        return ParsedDirective {
            directive_name: None,
            params: BTreeMap::new(),
            display_text: text.to_string(),
            raw_text: text.to_string(),
        };
    };

    let name = caps[1].to_string();
    let params = parse_params(&caps[2]);
    let display_text = strip_directives(text);

    ParsedDirective {
        directive_name: Some(name),
        params,
        display_text,
        raw_text: text.to_string(),
    }
}

/// Remove every directive-shaped block, repeating until the text no
/// longer matches. A single pass is not enough: removing a block can
/// join its neighbours into a fresh `#NAME{...}` shape, and that
/// residue must not survive into the display text.
fn strip_directives(text: &str) -> String {
    let mut stripped = DIRECTIVE_RE.replace_all(text, "").into_owned();
    while DIRECTIVE_RE.is_match(&stripped) {
        stripped = DIRECTIVE_RE.replace_all(&stripped, "").into_owned();
    }
    stripped.trim().to_string()
}

/// Scan the brace body for `key:value` pairs. Unparseable fragments
/// between matches are ignored.
fn parse_params(body: &str) -> BTreeMap<String, ParamValue> {
    let mut params = BTreeMap::new();
    for caps in PAIR_RE.captures_iter(body) {
        let key = caps[1].to_string();
        let value = decode_value(&caps[2]);
        params.insert(key, value);
    }
    if params.is_empty() && !body.trim().is_empty() {
        trace!(body, "directive body yielded no parseable pairs");
    }
    params
}

/// Decode one matched value token into a [`ParamValue`].
///
/// Quoted values are unescaped and then coerced: a purely numeric
/// string becomes a number, a `true`/`false` string becomes a boolean.
fn decode_value(token: &str) -> ParamValue {
    if let Some(inner) = token.strip_prefix('"').and_then(|t| t.strip_suffix('"')) {
        let unescaped = inner.replace("\\\"", "\"");
        return coerce(unescaped);
    }
    match token {
        "true" => ParamValue::Bool(true),
        "false" => ParamValue::Bool(false),
        // The pair pattern only admits digit/dot sequences here.
        other => other
            .parse::<f64>()
            .map(ParamValue::Num)
            .unwrap_or_else(|_| ParamValue::Str(other.to_string())),
    }
}

/// Coerce a quoted string: `"123"` -> 123, `"true"`/`"false"` -> bool,
/// everything else stays a string.
fn coerce(s: String) -> ParamValue {
    match s.as_str() {
        "true" => return ParamValue::Bool(true),
        "false" => return ParamValue::Bool(false),
        _ => {}
    }
    let numeric_looking =
        !s.is_empty() && s.chars().all(|c| c.is_ascii_digit() || c == '.');
    if numeric_looking {
        if let Ok(n) = s.parse::<f64>() {
            return ParamValue::Num(n);
        }
    }
    ParamValue::Str(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_directive(parsed: &ParsedDirective) {
        assert!(parsed.directive_name.is_none());
        assert!(parsed.params.is_empty());
    }

    #[test]
    fn plain_text_passes_through() {
        let parsed = parse("Bonsoir, comment te sens-tu ce soir ?");
        no_directive(&parsed);
        assert_eq!(parsed.display_text, "Bonsoir, comment te sens-tu ce soir ?");
        assert_eq!(parsed.raw_text, parsed.display_text);
    }

    #[test]
    fn empty_input_passes_through() {
        let parsed = parse("");
        no_directive(&parsed);
        assert_eq!(parsed.display_text, "");
    }

    #[test]
    fn breathing_exercise_example() {
        let parsed = parse("Respire. #EXERCICE_RESPIRATION{type:\"4-7-8\",cycles:3}");
        assert_eq!(parsed.display_text, "Respire.");
        assert_eq!(
            parsed.directive_name.as_deref(),
            Some("EXERCICE_RESPIRATION")
        );
        assert_eq!(parsed.params["type"], ParamValue::Str("4-7-8".into()));
        assert_eq!(parsed.params["cycles"], ParamValue::Num(3.0));
    }

    #[test]
    fn directive_only_input_leaves_empty_display() {
        let parsed = parse("#REDIRECT{path:\"/urgence\"}");
        assert_eq!(parsed.directive_name.as_deref(), Some("REDIRECT"));
        assert_eq!(parsed.params["path"], ParamValue::Str("/urgence".into()));
        assert_eq!(parsed.display_text, "");
    }

    #[test]
    fn directive_in_the_middle_is_removed_and_trimmed() {
        let parsed = parse("Prends ton temps. #JOURNAL{prompt:\"ce qui pèse\"} On en reparle.");
        assert_eq!(parsed.directive_name.as_deref(), Some("JOURNAL"));
        assert_eq!(parsed.display_text, "Prends ton temps.  On en reparle.");
    }

    #[test]
    fn first_directive_wins() {
        let parsed = parse("#INFO{sujet:\"sommeil\"} et #REDIRECT{path:\"/aide\"}");
        assert_eq!(parsed.directive_name.as_deref(), Some("INFO"));
        assert_eq!(parsed.params["sujet"], ParamValue::Str("sommeil".into()));
        assert!(!parsed.params.contains_key("path"));
    }

    #[test]
    fn reparse_of_display_text_is_directive_free() {
        let inputs = [
            "Respire. #EXERCICE_RESPIRATION{type:\"4-7-8\",cycles:3}",
            "#INFO{a:1} milieu #REDIRECT{path:\"/aide\"}",
            "sans directive",
            "",
            "#MALFORMED{####}",
            "#INFO#REDIRECT{a:1}{b:2}",
            "#A{x:1}#B{{y:2}#C{z:3}}",
        ];
        for input in inputs {
            let once = parse(input);
            let twice = parse(&once.display_text);
            assert!(
                twice.directive_name.is_none(),
                "display text of {input:?} still parses: {:?}",
                twice.directive_name
            );
            assert_eq!(twice.display_text, once.display_text);
        }
    }

    #[test]
    fn removal_that_splices_a_new_block_is_repeated() {
        // Deleting "#REDIRECT{a:1}" joins "#INFO" with "{b:2}" into a
        // directive shape; removal must keep going until nothing
        // directive-shaped is left.
        let parsed = parse("#INFO#REDIRECT{a:1}{b:2}");
        assert_eq!(parsed.directive_name.as_deref(), Some("REDIRECT"));
        assert_eq!(parsed.params["a"], ParamValue::Num(1.0));
        assert_eq!(parsed.display_text, "");
        no_directive(&parse(&parsed.display_text));
    }

    #[test]
    fn lowercase_name_is_not_a_directive() {
        let parsed = parse("#respire{type:\"calme\"}");
        no_directive(&parsed);
        assert_eq!(parsed.display_text, "#respire{type:\"calme\"}");
    }

    #[test]
    fn unbalanced_braces_degrade_to_text() {
        let parsed = parse("#EXERCICE_RESPIRATION{type:\"4-7-8\"");
        no_directive(&parsed);
        assert_eq!(parsed.display_text, "#EXERCICE_RESPIRATION{type:\"4-7-8\"");
    }

    #[test]
    fn nested_braces_are_rejected() {
        // The brace body must be non-nested; an inner block breaks the
        // shape and the whole thing degrades to plain text.
        let parsed = parse("#SESSION_SON{theme:{nope:1}}");
        no_directive(&parsed);
        assert_eq!(parsed.display_text, "#SESSION_SON{theme:{nope:1}}");
    }

    #[test]
    fn malformed_pairs_are_skipped_not_fatal() {
        let parsed = parse("#SESSION_SON{theme:\"pluie\", 12bad, duree:300}");
        assert_eq!(parsed.directive_name.as_deref(), Some("SESSION_SON"));
        assert_eq!(parsed.params["theme"], ParamValue::Str("pluie".into()));
        assert_eq!(parsed.params["duree"], ParamValue::Num(300.0));
        assert_eq!(parsed.params.len(), 2);
    }

    #[test]
    fn boolean_literals() {
        let parsed = parse("#SESSION_SON{boucle:true, fondu:false}");
        assert_eq!(parsed.params["boucle"], ParamValue::Bool(true));
        assert_eq!(parsed.params["fondu"], ParamValue::Bool(false));
    }

    #[test]
    fn quoted_numeric_and_boolean_are_coerced() {
        let parsed = parse("#EXERCICE_RESPIRATION{cycles:\"5\", guide:\"true\"}");
        assert_eq!(parsed.params["cycles"], ParamValue::Num(5.0));
        assert_eq!(parsed.params["guide"], ParamValue::Bool(true));
    }

    #[test]
    fn decimal_numbers() {
        let parsed = parse("#SESSION_SON{volume:0.5}");
        assert_eq!(parsed.params["volume"], ParamValue::Num(0.5));
    }

    #[test]
    fn escaped_quote_inside_string() {
        let parsed = parse(r#"#JOURNAL{prompt:"dis \"bonjour\" au matin"}"#);
        assert_eq!(
            parsed.params["prompt"],
            ParamValue::Str(r#"dis "bonjour" au matin"#.into())
        );
    }

    #[test]
    fn mixed_string_is_not_coerced() {
        // "4-7-8" looks vaguely numeric but contains dashes: stays a string.
        let parsed = parse("#EXERCICE_RESPIRATION{type:\"4-7-8\"}");
        assert_eq!(parsed.params["type"], ParamValue::Str("4-7-8".into()));
    }

    #[test]
    fn empty_body_yields_empty_params() {
        let parsed = parse("#INFO{}");
        assert_eq!(parsed.directive_name.as_deref(), Some("INFO"));
        assert!(parsed.params.is_empty());
    }

    #[test]
    fn raw_text_is_preserved_verbatim() {
        let input = "  Respire. #INFO{}  ";
        let parsed = parse(input);
        assert_eq!(parsed.raw_text, input);
        assert_eq!(parsed.display_text, "Respire.");
    }
}
