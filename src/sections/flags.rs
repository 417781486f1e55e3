use super::catalog::SectionCatalog;
use crate::survey::FlagSource;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Enablement of every declared section, keyed by section name in
/// declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionFlags {
    flags: IndexMap<String, bool>,
}

impl SectionFlags {
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        Self {
            flags: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Unknown sections read as disabled.
    pub fn is_enabled(&self, section_name: &str) -> bool {
        self.flags.get(section_name).copied().unwrap_or(false)
    }

    pub fn enabled_sections(&self) -> impl Iterator<Item = &str> {
        self.flags
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(name, _)| name.as_str())
    }

    /// Route a page to the first declared section that prefixes its name and
    /// is enabled. Disabled sections never capture a page.
    pub fn route(&self, page_name: &str) -> Option<&str> {
        self.flags
            .iter()
            .find(|(name, enabled)| **enabled && page_name.starts_with(name.as_str()))
            .map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.flags.iter().map(|(name, enabled)| (name.as_str(), *enabled))
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

/// Coerce a raw enablement flag.
///
/// Native booleans pass through. Any other value is enabled only when it is
/// exactly the string `"true"`; missing flags, `"false"`, `"TRUE"`, `" true"`,
/// `"1"` and `1` are all disabled.
pub fn flag_enabled(raw: Option<&Value>) -> bool {
    match raw {
        Some(Value::Bool(enabled)) => *enabled,
        Some(Value::String(s)) => s == "true",
        _ => false,
    }
}

/// Resolve which declared sections are enabled for scoring.
pub fn resolve_section_flags<S: FlagSource + ?Sized>(
    catalog: &SectionCatalog,
    source: &S,
) -> SectionFlags {
    let flags = SectionFlags::from_pairs(
        catalog
            .iter()
            .map(|decl| (decl.name.clone(), flag_enabled(source.get_value(&decl.flag_key)))),
    );

    debug!(
        declared = flags.len(),
        enabled = flags.enabled_sections().count(),
        "resolved section flags"
    );

    flags
}
