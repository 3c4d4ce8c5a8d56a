use indexmap::IndexMap;

/// Value recorded for one argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    /// A boolean switch that occurred in the stream.
    Flag,
    /// Single-valued argument; later occurrences overwrite.
    Single(String),
    /// Multiple-valued argument; occurrences append in encounter order.
    Many(Vec<String>),
}

impl ArgValue {
    /// The value as a string, taking the last entry of a sequence.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Flag => None,
            Self::Single(value) => Some(value),
            Self::Many(values) => values.last().map(String::as_str),
        }
    }

    /// All recorded values; a single value becomes a one-element slice.
    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::Flag => &[],
            Self::Single(value) => std::slice::from_ref(value),
            Self::Many(values) => values,
        }
    }
}

/// Outcome of delegating to a subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubcommandMatch {
    /// The subcommand has its own descriptor; the remaining tokens were
    /// matched against it.
    Matched(MatchResult),
    /// The subcommand dispatches to an external handler; the remaining
    /// tokens are handed over unparsed.
    Deferred(Vec<String>),
}

/// Immutable outcome of one matching pass.
///
/// Maps canonical argument names to values and occurrence counts, in the
/// order they were first recorded. At most one subcommand pair is present,
/// forming a singly linked chain that mirrors the subcommand depth actually
/// taken at runtime. Owned exclusively by the caller of the matching pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    values: IndexMap<String, ArgValue>,
    occurrences: IndexMap<String, usize>,
    subcommand: Option<Box<(String, SubcommandMatch)>>,
}

impl MatchResult {
    /// The recorded value for `name`, if it is a single string (or the last
    /// entry of a sequence). Switches yield `None`; use [`contains`].
    ///
    /// [`contains`]: MatchResult::contains
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(ArgValue::as_str)
    }

    /// All recorded values for `name`; empty when absent or a switch.
    pub fn get_many(&self, name: &str) -> &[String] {
        self.values.get(name).map(ArgValue::as_slice).unwrap_or(&[])
    }

    /// The raw recorded value for `name`.
    pub fn value(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    /// Whether any value (switch, string, or sequence) was recorded.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// How many times `name` occurred in the token stream. Values resolved
    /// from environment or default fallbacks do not count.
    pub fn occurrences_of(&self, name: &str) -> usize {
        self.occurrences.get(name).copied().unwrap_or(0)
    }

    /// The subcommand path taken, if any.
    pub fn subcommand(&self) -> Option<(&str, &SubcommandMatch)> {
        self.subcommand
            .as_deref()
            .map(|(name, nested)| (name.as_str(), nested))
    }

    /// Recorded values in first-recorded order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.subcommand.is_none()
    }

    pub(crate) fn record_flag(&mut self, name: &str) {
        self.values.insert(name.to_string(), ArgValue::Flag);
    }

    pub(crate) fn record_value(&mut self, name: &str, multiple: bool, value: String) {
        if multiple {
            let slot = self
                .values
                .entry(name.to_string())
                .or_insert_with(|| ArgValue::Many(Vec::new()));
            match slot {
                ArgValue::Many(values) => values.push(value),
                other => *other = ArgValue::Many(vec![value]),
            }
        } else {
            self.values.insert(name.to_string(), ArgValue::Single(value));
        }
    }

    pub(crate) fn bump(&mut self, name: &str) {
        *self.occurrences.entry(name.to_string()).or_insert(0) += 1;
    }

    pub(crate) fn set_subcommand(&mut self, name: String, nested: SubcommandMatch) {
        self.subcommand = Some(Box::new((name, nested)));
    }
}
