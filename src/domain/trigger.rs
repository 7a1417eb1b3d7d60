use std::collections::HashMap;

/// A trigger definition read from an HMI alarm export.
///
/// Triggers reference a PLC memory location through their `exp` expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerInfo {
    /// The trigger identifier, as written in the document.
    pub id: String,
    /// The trigger type (`bit`, `value`, ...).
    pub kind: String,
    /// The raw address expression, e.g. `{[PLC]Line1.Fault}`.
    pub expression: String,
}

impl TriggerInfo {
    /// Creates a new trigger definition.
    pub fn new(
        id: impl Into<String>,
        kind: impl Into<String>,
        expression: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            expression: expression.into(),
        }
    }

    /// Whether the trigger is bit-typed, in which case a message's trigger
    /// value selects a bit position.
    #[must_use]
    pub fn is_bit(&self) -> bool {
        self.kind.eq_ignore_ascii_case("bit")
    }
}

/// Lookup from trigger identifier to trigger definition, scoped to a single
/// document.
///
/// Identifiers are matched case-insensitively. When a document defines the
/// same identifier more than once, the last definition wins.
#[derive(Debug, Default, Clone)]
pub struct TriggerIndex {
    triggers: HashMap<String, TriggerInfo>,
}

impl TriggerIndex {
    /// Builds an index from trigger definitions, discarding those with a blank
    /// identifier.
    pub fn build(triggers: impl IntoIterator<Item = TriggerInfo>) -> Self {
        let mut index = Self::default();
        for trigger in triggers {
            index.insert(trigger);
        }
        index
    }

    /// Inserts a trigger, replacing any previous definition with the same
    /// identifier. Triggers with a blank identifier are ignored.
    pub fn insert(&mut self, trigger: TriggerInfo) {
        if trigger.id.trim().is_empty() {
            return;
        }
        self.triggers.insert(normalize_id(&trigger.id), trigger);
    }

    /// Resolves a trigger by identifier, ignoring case.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&TriggerInfo> {
        self.triggers.get(&normalize_id(id))
    }

    /// The number of distinct trigger identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    /// Whether the index holds no triggers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }
}

impl FromIterator<TriggerInfo> for TriggerIndex {
    fn from_iter<I: IntoIterator<Item = TriggerInfo>>(iter: I) -> Self {
        Self::build(iter)
    }
}

fn normalize_id(id: &str) -> String {
    id.to_lowercase()
}
