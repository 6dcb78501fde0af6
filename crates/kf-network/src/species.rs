//! Species capability.

use std::fmt;

/// A chemical species as seen by the network layer.
///
/// Identity is the catalog handle; structure comparison belongs to whoever
/// registers species, and it must register each distinct structure once.
pub trait Species: fmt::Debug + Send + Sync {
    /// Human-readable label for logs.
    fn label(&self) -> &str;

    /// Whether the species takes part in bimolecular reaction generation.
    ///
    /// Non-reactive species (bath gases, inerts) are sinks.
    fn is_reactive(&self) -> bool {
        true
    }
}

/// Minimal species: a label and a reactivity flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabeledSpecies {
    pub label: String,
    pub reactive: bool,
}

impl LabeledSpecies {
    /// A reactive species.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            reactive: true,
        }
    }

    /// A non-reactive (inert) species.
    pub fn inert(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            reactive: false,
        }
    }
}

impl Species for LabeledSpecies {
    fn label(&self) -> &str {
        &self.label
    }

    fn is_reactive(&self) -> bool {
        self.reactive
    }
}

impl fmt::Display for LabeledSpecies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reactivity_flag() {
        assert!(LabeledSpecies::new("CH4").is_reactive());
        assert!(!LabeledSpecies::inert("Ar").is_reactive());
        assert_eq!(LabeledSpecies::inert("Ar").label(), "Ar");
    }
}
