//! Item schema shared by the catalog, resolver, and installer
//!
//! An item name is conventionally `<basename>.<extension>` and matches the
//! file name it is written out as. The basename (text before the first `.`)
//! is the logical identity used for lookups, so `find("button")` and
//! `find("button.tsx")` refer to the same item.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of a distributable item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Component,
    Hook,
    Type,
    Utility,
    Style,
}

/// All item kinds, in display order (used for error messages)
pub const ITEM_KINDS: &[ItemKind] = &[
    ItemKind::Component,
    ItemKind::Hook,
    ItemKind::Type,
    ItemKind::Utility,
    ItemKind::Style,
];

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Component => "component",
            ItemKind::Hook => "hook",
            ItemKind::Type => "type",
            ItemKind::Utility => "utility",
            ItemKind::Style => "style",
        }
    }

    /// Comma-separated list of all valid kinds
    pub fn valid_kinds() -> String {
        ITEM_KINDS
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "component" => Ok(ItemKind::Component),
            "hook" => Ok(ItemKind::Hook),
            "type" => Ok(ItemKind::Type),
            "utility" => Ok(ItemKind::Utility),
            "style" => Ok(ItemKind::Style),
            other => Err(format!("unknown item kind '{other}'")),
        }
    }
}

/// A distributable unit as declared in the catalog
///
/// `item_dependencies` must not include the descriptor itself; the catalog
/// rejects self-references at construction time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDescriptor {
    /// Unique name, conventionally `<basename>.<extension>`
    pub name: String,

    /// Item kind, selects the destination directory on install
    pub kind: ItemKind,

    /// Third-party packages required at runtime (optionally `@version`ed)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub package_dependencies: Vec<String>,

    /// Third-party packages required only for development tooling
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dev_package_dependencies: Vec<String>,

    /// Other catalog items this item directly requires
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub item_dependencies: Vec<ItemDescriptor>,
}

impl ItemDescriptor {
    /// The logical identity: text before the first `.`
    pub fn basename(&self) -> &str {
        basename(&self.name)
    }
}

/// Text before the first `.` of an item name
pub fn basename(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}

/// A descriptor with source code attached and its dependencies resolved
///
/// Produced per-request by the resolver; the flattened tree returned by one
/// `resolve` call contains no duplicate names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedItem {
    pub name: String,

    pub kind: ItemKind,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub package_dependencies: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dev_package_dependencies: Vec<String>,

    /// Literal file content for this item
    pub source_code: String,

    /// Resolved nested dependencies, deduplicated across the whole tree
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resolved_dependencies: Vec<ResolvedItem>,
}

impl ResolvedItem {
    /// Walk this item and every nested dependency, depth-first
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a ResolvedItem)) {
        visit(self);
        for dep in &self.resolved_dependencies {
            dep.walk(visit);
        }
    }
}
