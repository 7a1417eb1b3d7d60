//! Reconstruction of PLC tag addresses from trigger expressions.
//!
//! The exporter writes bit selections on bit-typed triggers as 1-based
//! trigger values, and writes the trailing bit of other addresses one higher
//! than the controller's 0-based numbering. Both are translated back to
//! device addressing here.

use std::sync::LazyLock;

use regex::Regex;

use super::TriggerInfo;

static BIT_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.([0-9]+)$").expect("bit suffix pattern is valid"));

/// Builds the canonical tag for a message.
///
/// Returns `None` when no row should be produced: the trigger did not resolve,
/// or its expression holds no tag name.
///
/// For bit-typed triggers with a trigger value, any trailing bit on the base
/// tag is replaced by `trigger_value - 1` (clamped at zero). Otherwise a
/// trailing bit already present on the base tag is decremented by one
/// (clamped at zero), and tags without one pass through unchanged.
#[must_use]
pub fn build_tag(trigger: Option<&TriggerInfo>, trigger_value: Option<i32>) -> Option<String> {
    let trigger = trigger?;

    let base = extract_tag_name(&trigger.expression);
    if base.is_empty() {
        return None;
    }

    match trigger_value {
        Some(value) if trigger.is_bit() => {
            let bit = value.saturating_sub(1).max(0);
            Some(format!("{}.{bit}", strip_bit_suffix(base)))
        }
        _ => Some(correct_bit_suffix(base)),
    }
}

/// Extracts the tag name from a trigger expression.
///
/// Surrounding whitespace and one layer of outer curly braces are removed,
/// followed by a leading bracketed qualifier such as a device shortcut
/// (`[PLC]Line1.Fault` becomes `Line1.Fault`). A qualifier is only dropped
/// when something follows it.
#[must_use]
pub fn extract_tag_name(expression: &str) -> &str {
    let mut name = expression.trim();

    if name.len() >= 2 && name.starts_with('{') && name.ends_with('}') {
        name = &name[1..name.len() - 1];
    }

    if name.starts_with('[') {
        if let Some(end) = name.find(']') {
            if end + 1 < name.len() {
                name = &name[end + 1..];
            }
        }
    }

    name.trim()
}

/// Removes a trailing `.<digits>` bit suffix, if present.
#[must_use]
pub fn strip_bit_suffix(tag: &str) -> &str {
    BIT_SUFFIX
        .find(tag)
        .map_or(tag, |suffix| &tag[..suffix.start()])
}

/// Decrements a trailing `.<digits>` bit suffix by one, never going below
/// zero.
///
/// A suffix too large to represent is left untouched.
#[must_use]
pub fn correct_bit_suffix(tag: &str) -> String {
    let Some(captures) = BIT_SUFFIX.captures(tag) else {
        return tag.to_string();
    };
    let (Some(suffix), Some(digits)) = (captures.get(0), captures.get(1)) else {
        return tag.to_string();
    };
    let Ok(bit) = digits.as_str().parse::<u64>() else {
        return tag.to_string();
    };

    let prefix = &tag[..suffix.start()];
    format!("{prefix}.{}", bit.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn bit_trigger(expression: &str) -> TriggerInfo {
        TriggerInfo::new("T1", "bit", expression)
    }

    fn value_trigger(expression: &str) -> TriggerInfo {
        TriggerInfo::new("T2", "digital", expression)
    }

    #[test_case("Line1.Fault", "Line1.Fault"; "plain")]
    #[test_case("  Line1.Fault  ", "Line1.Fault"; "whitespace")]
    #[test_case("{Line1.Fault}", "Line1.Fault"; "braces")]
    #[test_case("{{Line1.Fault}}", "{Line1.Fault}"; "only one brace layer")]
    #[test_case("{ Line1.Fault }", "Line1.Fault"; "whitespace inside braces")]
    #[test_case("[Group1]Line2.Run", "Line2.Run"; "qualifier")]
    #[test_case("{[PLC]Line2.Run}", "Line2.Run"; "braces and qualifier")]
    #[test_case("[PLC] Line2.Run", "Line2.Run"; "whitespace after qualifier")]
    #[test_case("[PLC]", "[PLC]"; "qualifier with nothing after it is kept")]
    #[test_case("[PLC", "[PLC"; "unterminated qualifier")]
    #[test_case("Tag[3].1", "Tag[3].1"; "array index is not a qualifier")]
    #[test_case("{}", ""; "empty braces")]
    #[test_case("{", "{"; "lone brace")]
    #[test_case("   ", ""; "blank")]
    fn extract_tag_name_cases(expression: &str, expected: &str) {
        assert_eq!(extract_tag_name(expression), expected);
    }

    #[test_case(1, "Line1.Fault.0")]
    #[test_case(3, "Line1.Fault.2")]
    #[test_case(16, "Line1.Fault.15")]
    #[test_case(0, "Line1.Fault.0"; "zero clamps")]
    #[test_case(-4, "Line1.Fault.0"; "negative clamps")]
    #[test_case(i32::MIN, "Line1.Fault.0"; "minimum does not overflow")]
    fn bit_trigger_uses_trigger_value(value: i32, expected: &str) {
        let trigger = bit_trigger("{Line1.Fault}");
        assert_eq!(build_tag(Some(&trigger), Some(value)).unwrap(), expected);
    }

    #[test]
    fn bit_trigger_replaces_existing_suffix() {
        let trigger = bit_trigger("{Word.7}");
        assert_eq!(build_tag(Some(&trigger), Some(5)).unwrap(), "Word.4");
    }

    #[test]
    fn bit_trigger_only_replaces_last_suffix() {
        let trigger = bit_trigger("Rack.1.Word.7");
        assert_eq!(build_tag(Some(&trigger), Some(2)).unwrap(), "Rack.1.Word.1");
    }

    #[test]
    fn bit_trigger_keeps_array_index() {
        let trigger = bit_trigger("{[PLC]Faults[4]}");
        assert_eq!(build_tag(Some(&trigger), Some(8)).unwrap(), "Faults[4].7");
    }

    #[test]
    fn bit_trigger_without_value_corrects_suffix() {
        let trigger = bit_trigger("{Word.7}");
        assert_eq!(build_tag(Some(&trigger), None).unwrap(), "Word.6");
    }

    #[test_case("{Line1.Stop.5}", "Line1.Stop.4")]
    #[test_case("{Line1.Stop.1}", "Line1.Stop.0")]
    #[test_case("{Line1.Stop.0}", "Line1.Stop.0"; "zero stays zero")]
    #[test_case("{Line1.Stop.10}", "Line1.Stop.9")]
    #[test_case("{Line1.Stop.007}", "Line1.Stop.6"; "leading zeros")]
    #[test_case("{Line1.Stop}", "Line1.Stop"; "no suffix")]
    #[test_case("{Faults[3]}", "Faults[3]"; "index only")]
    #[test_case("{Faults[3].2}", "Faults[3].1"; "index and bit")]
    #[test_case("{Line1.Stop.x}", "Line1.Stop.x"; "non numeric suffix")]
    #[test_case("{.5}", ".4"; "suffix without prefix")]
    #[test_case(
        "{Tag.99999999999999999999999}",
        "Tag.99999999999999999999999";
        "overflowing suffix"
    )]
    fn value_trigger_corrects_suffix(expression: &str, expected: &str) {
        let trigger = value_trigger(expression);
        assert_eq!(build_tag(Some(&trigger), None).unwrap(), expected);
    }

    #[test]
    fn value_trigger_ignores_trigger_value() {
        let trigger = value_trigger("{Line1.Stop.5}");
        assert_eq!(build_tag(Some(&trigger), Some(9)).unwrap(), "Line1.Stop.4");
    }

    #[test]
    fn unresolved_trigger_yields_no_tag() {
        assert_eq!(build_tag(None, Some(3)), None);
    }

    #[test_case(""; "empty")]
    #[test_case("  "; "whitespace")]
    #[test_case("{}"; "empty braces")]
    #[test_case("{  }"; "blank braces")]
    fn blank_expression_yields_no_tag(expression: &str) {
        assert_eq!(build_tag(Some(&bit_trigger(expression)), Some(1)), None);
        assert_eq!(build_tag(Some(&value_trigger(expression)), None), None);
    }

    #[test_case("Word.3", "Word")]
    #[test_case("Word", "Word")]
    #[test_case("Word.3.4", "Word.3")]
    #[test_case("Word.x", "Word.x")]
    fn strip_bit_suffix_cases(tag: &str, expected: &str) {
        assert_eq!(strip_bit_suffix(tag), expected);
    }
}
