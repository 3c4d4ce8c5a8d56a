//! Command and argument descriptors for the corral matching engine.
//!
//! The crate keeps two forms of the same data apart:
//! - [`CommandSchema`] and [`ArgSpec`] are the plain declaration form. They
//!   derive the serde traits, are what the fluent builder methods
//!   accumulate, and are what the JSON descriptor loader reads.
//! - [`CommandSpec`] is the validated form the matcher and help renderer
//!   consume: canonical names resolved, long/short lookup indexes built,
//!   positionals ordered, subcommand aliases checked. Construction fails
//!   fast on configuration mistakes instead of letting a later declaration
//!   silently shadow an earlier one.
//!
//! Descriptors are configuration: built once during application setup,
//! immutable afterwards, and safe to share across any number of concurrent
//! matching passes.

use std::collections::{BTreeMap, HashMap, HashSet};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors reported while building a [`CommandSpec`].
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("duplicate argument name '{0}'")]
    DuplicateName(String),

    #[error("duplicate long option --{0}")]
    DuplicateLong(String),

    #[error("duplicate short option -{0}")]
    DuplicateShort(char),

    #[error("duplicate positional index {0}")]
    DuplicateIndex(usize),

    #[error("positional indexes must be contiguous from zero, missing index {0}")]
    MissingIndex(usize),

    #[error("positional '{0}' takes multiple values and must be the last positional")]
    MultipleNotLast(String),

    #[error("argument '{0}' declares both a positional index and an option name")]
    IndexWithOptionName(String),

    #[error("duplicate subcommand '{0}'")]
    DuplicateSubcommand(String),

    #[error("alias '{alias}' of subcommand '{command}' collides with '{existing}'")]
    AliasConflict {
        alias: String,
        command: String,
        existing: String,
    },

    #[error("argument '{arg}' refers to unknown argument '{refers}'")]
    UnknownRelation { arg: String, refers: String },

    #[error("invalid descriptor document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Descriptor for one parseable argument: a boolean switch, a valued
/// option, or a positional slot.
///
/// `name` is the canonical key values are recorded under. It may be left
/// empty in the declaration form; [`CommandSpec`] resolution fills it from
/// the long name, the short name, the value-name label (positionals), or a
/// synthetic `arg{N}` derived from declaration order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct ArgSpec {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
    /// Zero-based positional index. Mutually exclusive with `short`/`long`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub help: String,
    /// Display label for the value in usage and options listings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_name: Option<String>,
    pub required: bool,
    /// Repeated occurrences accumulate into an ordered sequence instead of
    /// overwriting. A multiple positional absorbs the rest of the stream.
    pub multiple: bool,
    /// `false` turns the argument into a boolean switch.
    pub takes_value: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Environment variable consulted when a required argument is missing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
    pub hidden: bool,
    /// Declared constraint metadata. References are validated at build time
    /// but never enforced during matching.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conflicts_with: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<String>,
}

impl Default for ArgSpec {
    fn default() -> Self {
        Self {
            name: String::new(),
            short: None,
            long: None,
            index: None,
            help: String::new(),
            value_name: None,
            required: false,
            multiple: false,
            takes_value: true,
            default_value: None,
            env: None,
            hidden: false,
            conflicts_with: Vec::new(),
            requires: Vec::new(),
        }
    }
}

impl ArgSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    pub fn long(mut self, long: impl Into<String>) -> Self {
        self.long = Some(long.into());
        self
    }

    pub fn index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    pub fn value_name(mut self, value_name: impl Into<String>) -> Self {
        self.value_name = Some(value_name.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    /// Declare a boolean switch (no value consumed).
    pub fn switch(mut self) -> Self {
        self.takes_value = false;
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn env(mut self, var: impl Into<String>) -> Self {
        self.env = Some(var.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn conflicts_with(mut self, other: impl Into<String>) -> Self {
        self.conflicts_with.push(other.into());
        self
    }

    pub fn requires(mut self, other: impl Into<String>) -> Self {
        self.requires.push(other.into());
        self
    }

    /// Whether this argument fills a positional slot.
    pub fn is_positional(&self) -> bool {
        self.index.is_some()
    }
}

/// External handler reference: the subcommand name is recognized, but the
/// remaining tokens are handed over unparsed instead of being matched
/// against a nested [`CommandSpec`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct HandlerSpec {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    pub hidden: bool,
}

impl HandlerSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// One subcommand declaration: a nested command or an external handler.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum SubcommandSchema {
    Command(CommandSchema),
    Handler(HandlerSpec),
}

/// Plain declaration of one command level.
///
/// Accumulated through the fluent methods or deserialized from a descriptor
/// document, then turned into a [`CommandSpec`] with [`CommandSchema::build`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct CommandSchema {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    /// Alternate names this command answers to when nested as a subcommand.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    pub hidden: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<ArgSpec>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subcommands: Vec<SubcommandSchema>,
}

impl CommandSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn arg(mut self, arg: ArgSpec) -> Self {
        self.args.push(arg);
        self
    }

    pub fn subcommand(mut self, schema: CommandSchema) -> Self {
        self.subcommands.push(SubcommandSchema::Command(schema));
        self
    }

    pub fn handler(mut self, handler: HandlerSpec) -> Self {
        self.subcommands.push(SubcommandSchema::Handler(handler));
        self
    }

    /// Validate the declaration and build the indexed form.
    pub fn build(self) -> Result<CommandSpec, SpecError> {
        CommandSpec::try_from(self)
    }
}

/// Target of a registered subcommand name.
#[derive(Debug, Clone)]
pub enum SubcommandSpec {
    /// Remaining tokens are matched recursively against the nested spec.
    Command(CommandSpec),
    /// Remaining tokens are handed to an external handler unparsed.
    Handler(HandlerSpec),
}

impl SubcommandSpec {
    pub fn name(&self) -> &str {
        match self {
            Self::Command(command) => command.name(),
            Self::Handler(handler) => &handler.name,
        }
    }

    pub fn about(&self) -> Option<&str> {
        match self {
            Self::Command(command) => command.about(),
            Self::Handler(handler) => handler.about.as_deref(),
        }
    }

    pub fn aliases(&self) -> &[String] {
        match self {
            Self::Command(command) => command.aliases(),
            Self::Handler(handler) => &handler.aliases,
        }
    }

    pub fn hidden(&self) -> bool {
        match self {
            Self::Command(command) => command.is_hidden(),
            Self::Handler(handler) => handler.hidden,
        }
    }
}

/// Validated descriptor for one command level.
///
/// Holds the ordered argument list with canonical names resolved, the
/// long-name index (canonical key) with the short-name secondary index, the
/// ordered positional sequence, and the declaration-ordered subcommand
/// registry. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    name: String,
    version: Option<String>,
    author: Option<String>,
    about: Option<String>,
    aliases: Vec<String>,
    hidden: bool,
    args: Vec<ArgSpec>,
    by_long: HashMap<String, usize>,
    by_short: HashMap<char, usize>,
    positionals: Vec<usize>,
    subcommands: IndexMap<String, SubcommandSpec>,
    alias_index: HashMap<String, String>,
}

impl CommandSpec {
    /// Fluent entry point; equivalent to [`CommandSchema::new`].
    pub fn builder(name: impl Into<String>) -> CommandSchema {
        CommandSchema::new(name)
    }

    /// Load a spec from a JSON descriptor document.
    pub fn from_json(text: &str) -> Result<Self, SpecError> {
        let schema: CommandSchema = serde_json::from_str(text)?;
        schema.build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn about(&self) -> Option<&str> {
        self.about.as_deref()
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// All arguments in declaration order.
    pub fn args(&self) -> &[ArgSpec] {
        &self.args
    }

    pub fn arg_by_long(&self, long: &str) -> Option<&ArgSpec> {
        self.by_long.get(long).map(|&slot| &self.args[slot])
    }

    pub fn arg_by_short(&self, short: char) -> Option<&ArgSpec> {
        self.by_short.get(&short).map(|&slot| &self.args[slot])
    }

    /// The positional argument filling `slot`, counted from zero.
    pub fn positional(&self, slot: usize) -> Option<&ArgSpec> {
        self.positionals.get(slot).map(|&i| &self.args[i])
    }

    /// Positional arguments in fill order.
    pub fn positional_args(&self) -> impl Iterator<Item = &ArgSpec> {
        self.positionals.iter().map(|&i| &self.args[i])
    }

    /// Whether any non-positional arguments are declared.
    pub fn has_named_args(&self) -> bool {
        self.args.iter().any(|arg| !arg.is_positional())
    }

    pub fn has_subcommands(&self) -> bool {
        !self.subcommands.is_empty()
    }

    /// Registered subcommands in declaration order.
    pub fn subcommands(&self) -> impl Iterator<Item = (&str, &SubcommandSpec)> {
        self.subcommands.iter().map(|(name, sub)| (name.as_str(), sub))
    }

    /// Resolve a token to a subcommand by name or alias, returning the
    /// canonical name.
    pub fn resolve_subcommand(&self, token: &str) -> Option<(&str, &SubcommandSpec)> {
        if let Some((name, sub)) = self.subcommands.get_key_value(token) {
            return Some((name.as_str(), sub));
        }
        let name = self.alias_index.get(token)?;
        self.subcommands
            .get_key_value(name.as_str())
            .map(|(name, sub)| (name.as_str(), sub))
    }
}

impl TryFrom<CommandSchema> for CommandSpec {
    type Error = SpecError;

    fn try_from(schema: CommandSchema) -> Result<Self, SpecError> {
        let mut args = schema.args;

        for (declared, arg) in args.iter_mut().enumerate() {
            if !arg.name.is_empty() {
                continue;
            }
            arg.name = if let Some(long) = &arg.long {
                long.clone()
            } else if let Some(short) = arg.short {
                short.to_string()
            } else if arg.index.is_some() {
                arg.value_name
                    .as_ref()
                    .map(|label| label.to_ascii_lowercase())
                    .unwrap_or_else(|| format!("arg{declared}"))
            } else {
                format!("arg{declared}")
            };
        }

        let mut names: HashSet<String> = HashSet::new();
        let mut by_long: HashMap<String, usize> = HashMap::new();
        let mut by_short: HashMap<char, usize> = HashMap::new();
        let mut by_index: BTreeMap<usize, usize> = BTreeMap::new();

        for (slot, arg) in args.iter().enumerate() {
            if !names.insert(arg.name.clone()) {
                return Err(SpecError::DuplicateName(arg.name.clone()));
            }
            if arg.index.is_some() && (arg.short.is_some() || arg.long.is_some()) {
                return Err(SpecError::IndexWithOptionName(arg.name.clone()));
            }
            if let Some(long) = &arg.long {
                if by_long.insert(long.clone(), slot).is_some() {
                    return Err(SpecError::DuplicateLong(long.clone()));
                }
            }
            if let Some(short) = arg.short {
                if by_short.insert(short, slot).is_some() {
                    return Err(SpecError::DuplicateShort(short));
                }
            }
            if let Some(index) = arg.index {
                if by_index.insert(index, slot).is_some() {
                    return Err(SpecError::DuplicateIndex(index));
                }
            }
        }

        let mut positionals = Vec::with_capacity(by_index.len());
        for (expected, (&index, &slot)) in by_index.iter().enumerate() {
            if index != expected {
                return Err(SpecError::MissingIndex(expected));
            }
            positionals.push(slot);
        }
        if positionals.len() > 1 {
            for &slot in &positionals[..positionals.len() - 1] {
                if args[slot].multiple {
                    return Err(SpecError::MultipleNotLast(args[slot].name.clone()));
                }
            }
        }

        for arg in &args {
            for refers in arg.conflicts_with.iter().chain(&arg.requires) {
                if !names.contains(refers) {
                    return Err(SpecError::UnknownRelation {
                        arg: arg.name.clone(),
                        refers: refers.clone(),
                    });
                }
            }
        }

        let mut subcommands: IndexMap<String, SubcommandSpec> = IndexMap::new();
        for declared in schema.subcommands {
            let sub = match declared {
                SubcommandSchema::Command(nested) => SubcommandSpec::Command(nested.build()?),
                SubcommandSchema::Handler(handler) => SubcommandSpec::Handler(handler),
            };
            let name = sub.name().to_string();
            if subcommands.contains_key(&name) {
                return Err(SpecError::DuplicateSubcommand(name));
            }
            subcommands.insert(name, sub);
        }

        let mut alias_index: HashMap<String, String> = HashMap::new();
        for (name, sub) in &subcommands {
            for alias in sub.aliases() {
                if alias.is_empty() || alias == name {
                    continue;
                }
                if subcommands.contains_key(alias) {
                    return Err(SpecError::AliasConflict {
                        alias: alias.clone(),
                        command: name.clone(),
                        existing: alias.clone(),
                    });
                }
                if let Some(previous) = alias_index.insert(alias.clone(), name.clone()) {
                    if previous != *name {
                        return Err(SpecError::AliasConflict {
                            alias: alias.clone(),
                            command: name.clone(),
                            existing: previous,
                        });
                    }
                }
            }
        }

        Ok(Self {
            name: schema.name,
            version: schema.version,
            author: schema.author,
            about: schema.about,
            aliases: schema.aliases,
            hidden: schema.hidden,
            args,
            by_long,
            by_short,
            positionals,
            subcommands,
            alias_index,
        })
    }
}
