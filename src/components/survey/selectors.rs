//! Element lookups for the survey form.
//!
//! The form is owned by a third party, so everything is located by visible
//! text, ARIA label or class name rather than by generated ids.

use fantoccini::Locator;
use std::fmt;

const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";

/// Owned form of a fantoccini [`Locator`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Css(String),
    XPath(String),
}

impl Selector {
    pub fn css(selector: &str) -> Self {
        Selector::Css(selector.to_string())
    }

    pub fn xpath(selector: impl Into<String>) -> Self {
        Selector::XPath(selector.into())
    }

    pub fn locator(&self) -> Locator<'_> {
        match self {
            Selector::Css(selector) => Locator::Css(selector),
            Selector::XPath(selector) => Locator::XPath(selector),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Css(selector) => write!(f, "css={}", selector),
            Selector::XPath(selector) => write!(f, "xpath={}", selector),
        }
    }
}

/// Quote `value` as an XPath 1.0 string literal
pub fn xpath_literal(value: &str) -> String {
    if !value.contains('\'') {
        return format!("'{}'", value);
    }
    if !value.contains('"') {
        return format!("\"{}\"", value);
    }

    // Both quote kinds present: stitch the pieces together with concat()
    let parts: Vec<String> = value
        .split('\'')
        .map(|part| format!("'{}'", part))
        .collect();
    format!("concat({})", parts.join(", \"'\", "))
}

/// Text in these elements is never rendered as a clickable label
const NOT_RENDERED: &str = "[not(ancestor-or-self::script or ancestor-or-self::style \
or ancestor-or-self::title or ancestor-or-self::noscript)]";

fn lowercase_text() -> String {
    format!("translate(normalize-space(.), '{}', '{}')", UPPER, LOWER)
}

/// Element holding a text node that contains `text`, ignoring case
pub fn text_contains(text: &str) -> String {
    format!(
        "//*[text()[contains({}, {})]]{}",
        lowercase_text(),
        xpath_literal(&text.to_lowercase()),
        NOT_RENDERED
    )
}

/// Element holding a text node equal to `text`, ignoring case and surrounding whitespace
pub fn text_equals(text: &str) -> String {
    format!(
        "//*[text()[{} = {}]]{}",
        lowercase_text(),
        xpath_literal(&text.to_lowercase()),
        NOT_RENDERED
    )
}

/// Clickable option whose visible label contains `label`
pub fn option(label: &str) -> Selector {
    Selector::xpath(text_contains(label))
}

/// Response `label` inside the container two levels above the question prompt
pub fn scoped_response(question: &str, label: &str) -> Selector {
    Selector::xpath(format!(
        "({})[1]/../..{}",
        text_contains(question),
        text_equals(label)
    ))
}

/// The `index`-th (zero-based) occurrence of `label` anywhere on the page.
///
/// Best effort only: if the label text also appears outside the answer grid
/// this may answer the wrong question.
pub fn nth_response(label: &str, index: usize) -> Selector {
    Selector::xpath(format!("({})[{}]", text_equals(label), index + 1))
}

/// First free-text input
pub fn name_field() -> Selector {
    Selector::css("textarea")
}

/// Last free-text input
pub fn comment_field() -> Selector {
    Selector::xpath("(//textarea)[last()]")
}

/// First single-line text input
pub fn date_field() -> Selector {
    Selector::css("input[type='text']")
}

/// Candidates for the "next"/"submit" control, in the order they are tried
pub fn next_controls() -> Vec<Selector> {
    vec![
        Selector::css("button[aria-label='Next']"),
        Selector::xpath("//button[contains(normalize-space(.), '→')]"),
        Selector::css(".NextButton"),
        // Last resort: whatever button comes last on the page
        Selector::xpath("(//button)[last()]"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xpath_literal() {
        assert_eq!(xpath_literal("Agree"), "'Agree'");
        assert_eq!(xpath_literal("Don't"), "\"Don't\"");
        assert_eq!(
            xpath_literal("It's \"fine\""),
            "concat('It', \"'\", 's \"fine\"')"
        );
    }

    #[test]
    fn test_text_matchers_lowercase_needle() {
        let xpath = text_contains("General Conference");
        assert!(xpath.starts_with("//*[text()[contains(translate(normalize-space(.)"));
        assert!(xpath.ends_with(&format!("'general conference')]]{}", NOT_RENDERED)));

        let xpath = text_equals("Strongly Agree");
        assert!(xpath.ends_with(&format!(" = 'strongly agree']]{}", NOT_RENDERED)));
    }

    #[test]
    fn test_text_matchers_skip_unrendered_elements() {
        for xpath in [text_contains("8AM"), text_equals("Agree")] {
            for tag in ["script", "style", "title", "noscript"] {
                assert!(xpath.contains(&format!("ancestor-or-self::{}", tag)));
            }
            assert!(xpath.contains("[not("));
        }
    }

    #[test]
    fn test_scoped_response_climbs_two_levels() {
        let Selector::XPath(xpath) = scoped_response("The lecture format", "Agree") else {
            panic!("expected xpath");
        };
        assert!(xpath.contains(&format!(
            "'the lecture format')]]{})[1]/../..//*[text()",
            NOT_RENDERED
        )));
        assert!(xpath.ends_with(&format!("= 'agree']]{}", NOT_RENDERED)));
    }

    #[test]
    fn test_nth_response_is_one_based() {
        assert_eq!(
            nth_response("Neutral", 0),
            Selector::xpath(format!("({})[1]", text_equals("Neutral")))
        );
        assert_eq!(
            nth_response("Neutral", 2),
            Selector::xpath(format!("({})[3]", text_equals("Neutral")))
        );
    }

    #[test]
    fn test_next_control_order() {
        let controls = next_controls();
        assert_eq!(controls.len(), 4);
        assert_eq!(controls[0], Selector::css("button[aria-label='Next']"));
        assert!(matches!(&controls[1], Selector::XPath(x) if x.contains('→')));
        assert_eq!(controls[2], Selector::css(".NextButton"));
        assert_eq!(controls[3], Selector::xpath("(//button)[last()]"));
    }

    #[test]
    fn test_display() {
        assert_eq!(name_field().to_string(), "css=textarea");
        assert_eq!(comment_field().to_string(), "xpath=(//textarea)[last()]");
    }
}
