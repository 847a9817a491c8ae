//! Dispatch intents.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One independent dispatch intent.
///
/// Only [`DispatchFlag::OverrideSameRoute`] is interpreted by the core; the
/// rest are passed through to the presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DispatchFlag {
    /// Record the presentation in the presenter's history.
    AddToHistory,
    /// Remove the current presentation before presenting.
    PopCurrent,
    /// Replace the current target instead of adding on top.
    ReplaceTarget,
    /// Expect a result back from the presented target.
    StartForResult,
    /// Dispatch even when the route is already the current one.
    OverrideSameRoute,
}

impl DispatchFlag {
    pub const ALL: [DispatchFlag; 5] = [
        DispatchFlag::AddToHistory,
        DispatchFlag::PopCurrent,
        DispatchFlag::ReplaceTarget,
        DispatchFlag::StartForResult,
        DispatchFlag::OverrideSameRoute,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchFlag::AddToHistory => "add-to-history",
            DispatchFlag::PopCurrent => "pop-current",
            DispatchFlag::ReplaceTarget => "replace-target",
            DispatchFlag::StartForResult => "start-for-result",
            DispatchFlag::OverrideSameRoute => "override-same-route",
        }
    }
}

impl fmt::Display for DispatchFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DispatchFlag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DispatchFlag::ALL
            .into_iter()
            .find(|flag| flag.as_str() == s)
            .ok_or_else(|| format!("unknown dispatch flag {:?}", s))
    }
}

/// An unordered set of dispatch intents. Absence means "off".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DispatchFlags(BTreeSet<DispatchFlag>);

impl DispatchFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, flag: DispatchFlag) -> Self {
        self.0.insert(flag);
        self
    }

    pub fn insert(&mut self, flag: DispatchFlag) {
        self.0.insert(flag);
    }

    pub fn contains(&self, flag: DispatchFlag) -> bool {
        self.0.contains(&flag)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = DispatchFlag> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<DispatchFlag> for DispatchFlags {
    fn from_iter<I: IntoIterator<Item = DispatchFlag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for DispatchFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(DispatchFlag::as_str).collect();
        write!(f, "[{}]", names.join(", "))
    }
}
