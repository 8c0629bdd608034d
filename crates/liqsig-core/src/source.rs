use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Canonical feed identifiers used in metadata and envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedId {
    /// Snapshots held in memory.
    Memory,
    /// Snapshots loaded from a JSON file.
    File,
    /// Snapshots read from standard input.
    Stdin,
    /// A single snapshot given on the command line.
    Inline,
    /// Reference data compiled into the crate.
    Builtin,
}

impl FeedId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::File => "file",
            Self::Stdin => "stdin",
            Self::Inline => "inline",
            Self::Builtin => "builtin",
        }
    }
}

impl Display for FeedId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
