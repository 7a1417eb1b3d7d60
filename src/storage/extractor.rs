//! Extraction of alarm rows from an HMI alarm export.
//!
//! Each `message` element references a `trigger` element by id. Messages
//! whose trigger does not resolve, or resolves to an expression without a
//! tag, produce no row.

use crate::{
    domain::{AlarmRow, TriggerIndex, TriggerInfo, build_tag, normalize_description},
    storage::document::{Document, Element},
};

/// Builds the trigger lookup for a single document.
#[must_use]
pub fn trigger_index(document: &Document) -> TriggerIndex {
    document
        .descendants("trigger")
        .map(|trigger| {
            TriggerInfo::new(
                trigger.attribute("id").unwrap_or_default(),
                trigger.attribute("type").unwrap_or_default(),
                trigger.attribute("exp").unwrap_or_default(),
            )
        })
        .collect()
}

/// Extracts alarm rows from a document, in document order.
#[must_use]
pub fn extract_rows(document: &Document) -> Vec<AlarmRow> {
    let triggers = trigger_index(document);
    document
        .descendants("message")
        .filter_map(|message| extract_row(message, &triggers))
        .collect()
}

fn extract_row(message: &Element, triggers: &TriggerIndex) -> Option<AlarmRow> {
    let reference = message.attribute("trigger").unwrap_or_default();
    let id = reference.strip_prefix('#').unwrap_or(reference);

    let trigger_value = message
        .attribute("trigger-value")
        .and_then(parse_trigger_value);

    let tag = build_tag(triggers.get(id), trigger_value)?;
    let description = normalize_description(message.attribute("text").unwrap_or_default());

    AlarmRow::new(tag, description)
}

/// Parses a base-10 trigger value with an optional sign, ignoring surrounding
/// whitespace.
#[must_use]
pub fn parse_trigger_value(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn rows(xml: &str) -> Vec<(String, String)> {
        let document = Document::parse(xml).unwrap();
        extract_rows(&document)
            .into_iter()
            .map(|row| (row.tag().to_string(), row.description().to_string()))
            .collect()
    }

    fn single(tag: &str, description: &str) -> Vec<(String, String)> {
        vec![(tag.to_string(), description.to_string())]
    }

    #[test]
    fn bit_trigger_with_value() {
        let xml = r##"<alarms>
            <trigger id="T1" type="bit" exp="{Line1.Fault}"/>
            <message trigger="#T1" trigger-value="3" text="[WARN] Motor overload"/>
        </alarms>"##;

        assert_eq!(rows(xml), single("Line1.Fault.2", "Motor overload"));
    }

    #[test]
    fn value_trigger_suffix_is_corrected() {
        let xml = r##"<alarms>
            <trigger id="T2" type="digital" exp="{Line1.Stop.5}"/>
            <message trigger="#T2" text="E-stop pressed"/>
        </alarms>"##;

        assert_eq!(rows(xml), single("Line1.Stop.4", "E-stop pressed"));
    }

    #[test]
    fn leading_qualifier_is_stripped() {
        let xml = r##"<alarms>
            <trigger id="T3" type="value" exp="[Group1]Line2.Run"/>
            <message trigger="#T3" trigger-value="1" text="Line 2 running"/>
        </alarms>"##;

        assert_eq!(rows(xml), single("Line2.Run", "Line 2 running"));
    }

    #[test]
    fn unresolved_trigger_produces_no_row() {
        let xml = r##"<alarms>
            <trigger id="T1" type="bit" exp="{Line1.Fault}"/>
            <message trigger="#T9" trigger-value="1" text="Orphan"/>
            <message text="No trigger at all"/>
        </alarms>"##;

        assert!(rows(xml).is_empty());
    }

    #[test]
    fn trigger_reference_ignores_case() {
        let xml = r##"<alarms>
            <trigger id="Alarm_T1" type="BIT" exp="{Tank.Level}"/>
            <message trigger="#alarm_t1" trigger-value="2" text="High level"/>
        </alarms>"##;

        assert_eq!(rows(xml), single("Tank.Level.1", "High level"));
    }

    #[test]
    fn reference_without_marker_resolves() {
        let xml = r#"<alarms>
            <trigger id="T1" type="bit" exp="{Tank.Level}"/>
            <message trigger="T1" trigger-value="1" text="High level"/>
        </alarms>"#;

        assert_eq!(rows(xml), single("Tank.Level.0", "High level"));
    }

    #[test]
    fn only_one_marker_is_stripped() {
        let xml = r###"<alarms>
            <trigger id="T1" type="bit" exp="{Tank.Level}"/>
            <message trigger="##T1" trigger-value="1" text="High level"/>
        </alarms>"###;

        assert!(rows(xml).is_empty());
    }

    #[test]
    fn unparsable_trigger_value_falls_back_to_suffix_correction() {
        let xml = r##"<alarms>
            <trigger id="T1" type="bit" exp="{Word.4}"/>
            <message trigger="#T1" trigger-value="three" text="Text"/>
        </alarms>"##;

        assert_eq!(rows(xml), single("Word.3", "Text"));
    }

    #[test]
    fn blank_expression_produces_no_row() {
        let xml = r##"<alarms>
            <trigger id="T1" type="bit" exp="{ }"/>
            <trigger id="T2" type="bit"/>
            <message trigger="#T1" trigger-value="1" text="A"/>
            <message trigger="#T2" trigger-value="1" text="B"/>
        </alarms>"##;

        assert!(rows(xml).is_empty());
    }

    #[test]
    fn missing_text_gives_empty_description() {
        let xml = r##"<alarms>
            <trigger id="T1" type="bit" exp="{Tank.Level}"/>
            <message trigger="#T1" trigger-value="1"/>
        </alarms>"##;

        assert_eq!(rows(xml), single("Tank.Level.0", ""));
    }

    #[test]
    fn triggers_without_id_are_ignored() {
        let xml = r##"<alarms>
            <trigger type="bit" exp="{Tank.Level}"/>
            <message trigger="#" trigger-value="1" text="A"/>
            <message trigger="" trigger-value="1" text="B"/>
        </alarms>"##;

        assert!(rows(xml).is_empty());
    }

    #[test]
    fn rows_keep_document_order() {
        let xml = r##"<alarms>
            <messages>
                <message trigger="#B" trigger-value="1" text="first"/>
                <message trigger="#A" trigger-value="2" text="second"/>
                <message trigger="#B" trigger-value="4" text="third"/>
            </messages>
            <triggers>
                <trigger id="A" type="bit" exp="{Zeta}"/>
                <trigger id="B" type="bit" exp="{Alpha}"/>
            </triggers>
        </alarms>"##;

        assert_eq!(
            rows(xml),
            vec![
                ("Alpha.0".to_string(), "first".to_string()),
                ("Zeta.1".to_string(), "second".to_string()),
                ("Alpha.3".to_string(), "third".to_string()),
            ]
        );
    }

    #[test]
    fn last_duplicate_trigger_wins() {
        let xml = r##"<alarms>
            <trigger id="T1" type="bit" exp="{Old}"/>
            <trigger id="t1" type="bit" exp="{New}"/>
            <message trigger="#T1" trigger-value="1" text="A"/>
        </alarms>"##;

        assert_eq!(rows(xml), single("New.0", "A"));
    }

    #[test_case("3", Some(3); "plain")]
    #[test_case(" 12 ", Some(12); "whitespace")]
    #[test_case("+7", Some(7); "plus sign")]
    #[test_case("-2", Some(-2); "negative")]
    #[test_case("", None; "empty")]
    #[test_case("3.0", None; "decimal")]
    #[test_case("0x10", None; "hex")]
    #[test_case("99999999999", None; "overflow")]
    fn trigger_value_parsing(raw: &str, expected: Option<i32>) {
        assert_eq!(parse_trigger_value(raw), expected);
    }
}
