//! Request identity for the async lifecycle streams.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Sequence number of a request within its stream.
///
/// Numbers are issued in increasing order per stream; only the highest issued
/// number may complete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestSeq(pub u64);

impl From<u64> for RequestSeq {
    fn from(seq: u64) -> Self {
        Self(seq)
    }
}

impl Display for RequestSeq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The independently tracked request lineages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    List,
    Search,
    Detail,
}

impl Stream {
    pub fn as_str(self) -> &'static str {
        match self {
            Stream::List => "list",
            Stream::Search => "search",
            Stream::Detail => "detail",
        }
    }
}

impl Display for Stream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
