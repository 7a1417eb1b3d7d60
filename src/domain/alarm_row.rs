use non_empty_string::NonEmptyString;
use serde::Serialize;

/// A single exported alarm: a PLC tag address and its description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlarmRow {
    tag: NonEmptyString,
    description: String,
}

impl AlarmRow {
    /// Creates a row, or `None` if the tag is blank.
    #[must_use]
    pub fn new(tag: impl Into<String>, description: impl Into<String>) -> Option<Self> {
        let tag = tag.into();
        if tag.trim().is_empty() {
            return None;
        }
        let tag = NonEmptyString::new(tag).ok()?;
        Some(Self {
            tag,
            description: description.into(),
        })
    }

    /// The PLC tag address.
    #[must_use]
    pub fn tag(&self) -> &str {
        self.tag.as_str()
    }

    /// The alarm description. May be empty.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the description is empty or whitespace.
    #[must_use]
    pub fn has_blank_description(&self) -> bool {
        self.description.trim().is_empty()
    }
}
