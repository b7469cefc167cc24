//! Renders a translation bundle into the jQuery `$.msg` plugin source.

use std::borrow::Cow;

use crate::bundle::TranslationBundle;
use crate::locale::LocaleSpec;

/// Assignments per group; groups are separated by a line holding two tabs.
const GROUP_SIZE: usize = 3;

/// Everything before the assignments.
const HEADER: &str = "jQuery( function($)\n{\n\t$.msg = function (key)\n\t{\n\t\tvar m = new Array();\n\n";

/// Everything after the assignments. Missing keys render as `??[key]??`.
const FOOTER: &str = concat!(
    "\n\t\tvar msg = m[key];\n\t",
    "\n\t\tmsg = (msg == undefined) ? ('??[' + key + ']??') : msg;\n\t",
    "\n\t\treturn msg;\n\t",
    "}\n",
    "});",
);

/// Generated script for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedScript {
    /// Locale the script was rendered for.
    locale: LocaleSpec,
    /// Script source text.
    source: String,
}

impl RenderedScript {
    #[must_use]
    pub const fn locale(&self) -> &LocaleSpec {
        &self.locale
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Renders `bundle` into script source.
///
/// Returns `None` for an empty bundle, nothing should be written for it.
///
/// ```
/// use js_i18n_bundle_export::bundle::TranslationBundle;
/// use js_i18n_bundle_export::locale::LocaleSpec;
/// use js_i18n_bundle_export::script::render;
///
/// let bundle = TranslationBundle::from_entries(LocaleSpec::new("en"), [("a", "x")]);
/// let script = render(&bundle).unwrap();
/// assert!(script.source().contains("\t\tm[\"a\"] = \"x\";\n"));
/// ```
#[must_use]
pub fn render(bundle: &TranslationBundle) -> Option<RenderedScript> {
    if bundle.is_empty() {
        return None;
    }

    let mut source = String::from(HEADER);
    for (index, (key, value)) in bundle.iter().enumerate() {
        if index > 0 && index % GROUP_SIZE == 0 {
            source.push_str("\t\t\n");
        }
        source.push_str("\t\tm[\"");
        source.push_str(&escape_js_string(key));
        source.push_str("\"] = \"");
        source.push_str(&escape_js_string(value));
        source.push_str("\";\n");
    }
    source.push('\t');
    source.push_str(FOOTER);

    Some(RenderedScript { locale: bundle.locale().clone(), source })
}

/// Escapes text for a double or single quoted JavaScript string literal.
///
/// Line breaks become `\n` / `\r` escapes and quotes and backslashes are
/// backslash-escaped.
#[must_use]
pub fn escape_js_string(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['\\', '"', '\'', '\n', '\r', '\u{2028}', '\u{2029}']) {
        return Cow::Borrowed(raw);
    }

    let mut escaped = String::with_capacity(raw.len() + 8);
    for c in raw.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\'' => escaped.push_str("\\'"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\u{2028}' => escaped.push_str("\\u2028"),
            '\u{2029}' => escaped.push_str("\\u2029"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    /// Renders a bundle built from `entries` for locale `en`.
    fn render_entries(entries: &[(&str, &str)]) -> Option<RenderedScript> {
        render(&TranslationBundle::from_entries(LocaleSpec::new("en"), entries.iter().copied()))
    }

    /// Evaluates `$.msg(key)` against the generated source.
    ///
    /// Understands the plain `m["k"] = "v";` assignments and the string
    /// concatenation of the fallback expression, nothing else.
    fn call_msg(source: &str, key: &str) -> String {
        let assigned = source.lines().map(str::trim_start).find_map(|line| {
            let (k, rest) = line.strip_prefix("m[\"")?.split_once("\"] = \"")?;
            (k == key).then(|| rest.strip_suffix("\";").unwrap().to_string())
        });
        if let Some(value) = assigned {
            return value;
        }

        let fallback = source
            .lines()
            .find_map(|line| line.trim_start().strip_prefix("msg = (msg == undefined) ? ("))
            .and_then(|rest| rest.strip_suffix(") : msg;"))
            .unwrap();
        fallback
            .split(" + ")
            .map(|operand| match operand {
                "key" => key.to_string(),
                literal => literal.strip_prefix('\'').unwrap().strip_suffix('\'').unwrap().to_string(),
            })
            .collect()
    }

    #[rstest]
    #[case::present("a", "x")]
    #[case::absent("nonexistent", "??[nonexistent]??")]
    #[case::absent_dotted("you.key.of.properties.file", "??[you.key.of.properties.file]??")]
    fn test_render_msg_lookup(#[case] key: &str, #[case] expected: &str) {
        let script = render_entries(&[("a", "x"), ("b", "y")]).unwrap();

        assert_eq!(call_msg(script.source(), key), expected);
    }

    #[rstest]
    fn test_render_empty_bundle() {
        assert_eq!(render_entries(&[]), None);
    }

    #[rstest]
    fn test_render_single_entry_exact_output() {
        let script = render_entries(&[("a", "x")]).unwrap();

        let expected = "jQuery( function($)\n\
                        {\n\
                        \t$.msg = function (key)\n\
                        \t{\n\
                        \t\tvar m = new Array();\n\
                        \n\
                        \t\tm[\"a\"] = \"x\";\n\
                        \t\n\
                        \t\tvar msg = m[key];\n\
                        \t\n\
                        \t\tmsg = (msg == undefined) ? ('??[' + key + ']??') : msg;\n\
                        \t\n\
                        \t\treturn msg;\n\
                        \t}\n\
                        });";
        assert_eq!(script.source(), expected);
        assert_eq!(script.locale().as_str(), "en");
    }

    #[rstest]
    fn test_render_groups_assignments_by_three() {
        let script = render_entries(&[
            ("k1", "v1"),
            ("k2", "v2"),
            ("k3", "v3"),
            ("k4", "v4"),
            ("k5", "v5"),
            ("k6", "v6"),
            ("k7", "v7"),
        ])
        .unwrap();

        let expected_block = "\t\tvar m = new Array();\n\n\
                              \t\tm[\"k1\"] = \"v1\";\n\
                              \t\tm[\"k2\"] = \"v2\";\n\
                              \t\tm[\"k3\"] = \"v3\";\n\
                              \t\t\n\
                              \t\tm[\"k4\"] = \"v4\";\n\
                              \t\tm[\"k5\"] = \"v5\";\n\
                              \t\tm[\"k6\"] = \"v6\";\n\
                              \t\t\n\
                              \t\tm[\"k7\"] = \"v7\";\n\
                              \t\n\
                              \t\tvar msg = m[key];";
        assert!(script.source().contains(expected_block), "{}", script.source());
    }

    #[rstest]
    fn test_render_full_group_has_no_trailing_separator() {
        let script = render_entries(&[("k1", "v1"), ("k2", "v2"), ("k3", "v3")]).unwrap();

        assert!(script.source().contains("\t\tm[\"k3\"] = \"v3\";\n\t\n\t\tvar msg = m[key];"));
        assert!(!script.source().contains("\t\t\n"));
    }

    #[googletest::test]
    fn test_render_escapes_newlines() {
        let script = render_entries(&[("a", "x"), ("b", "y\nz")]).unwrap();

        expect_that!(script.source(), contains_substring("m[\"a\"] = \"x\";"));
        expect_that!(script.source(), contains_substring("m[\"b\"] = \"y\\nz\";"));
        expect_that!(script.source(), not(contains_substring("y\nz")));
    }

    #[googletest::test]
    fn test_render_contains_missing_key_fallback() {
        let script = render_entries(&[("a", "x")]).unwrap();

        expect_that!(
            script.source(),
            contains_substring("msg = (msg == undefined) ? ('??[' + key + ']??') : msg;")
        );
        expect_that!(script.source(), ends_with("});"));
        expect_that!(script.source(), starts_with("jQuery( function($)\n"));
    }

    #[rstest]
    fn test_render_is_deterministic() {
        let bundle = TranslationBundle::from_entries(
            LocaleSpec::new("pt_BR"),
            [("b", "dois"), ("a", "um"), ("c", "três")],
        );

        assert_eq!(render(&bundle), render(&bundle));
    }

    #[rstest]
    #[case::plain("Hello", "Hello")]
    #[case::newline("a\nb", "a\\nb")]
    #[case::carriage_return("a\r\nb", "a\\r\\nb")]
    #[case::single_quote("it's", "it\\'s")]
    #[case::double_quote("say \"hi\"", "say \\\"hi\\\"")]
    #[case::backslash("C:\\temp", "C:\\\\temp")]
    #[case::line_separator("a\u{2028}b", "a\\u2028b")]
    #[case::non_ascii("olá", "olá")]
    fn test_escape_js_string(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(escape_js_string(raw), expected);
    }

    #[rstest]
    fn test_escape_js_string_borrows_clean_input() {
        assert!(matches!(escape_js_string("clean"), Cow::Borrowed("clean")));
    }

    #[rstest]
    fn test_render_escapes_keys() {
        let script = render_entries(&[("odd\"key", "v")]).unwrap();

        assert!(script.source().contains("m[\"odd\\\"key\"] = \"v\";"));
    }
}
