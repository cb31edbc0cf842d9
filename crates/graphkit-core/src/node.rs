use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{GraphError, GraphResult};

/// Best known distance between two nodes; `None` means no path
pub type Distance = Option<u64>;

/// Descriptive payload attached to a graph node
///
/// Opaque to both graph engines: they store, compare and print it,
/// but never look inside.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeData(String);

impl NodeData {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeData {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// 1-based index of a node within a graph of known size
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// Validate `raw` against `[1, size]`
    pub fn checked(raw: i64, size: usize) -> GraphResult<Self> {
        match usize::try_from(raw) {
            Ok(index) if (1..=size).contains(&index) => Ok(Self(index)),
            _ => Err(GraphError::InvalidNodeIndex { index: raw, size }),
        }
    }

    /// Like [`NodeIndex::checked`], for callers that treat out-of-range as "absent"
    pub fn within(raw: usize, size: usize) -> Option<Self> {
        (1..=size).contains(&raw).then_some(Self(raw))
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Zero-based position in backing storage
    pub(crate) fn slot(self) -> usize {
        self.0 - 1
    }

    pub(crate) fn from_slot(slot: usize) -> Self {
        Self(slot + 1)
    }

    /// Every index of a graph with `size` nodes, ascending
    pub fn all(size: usize) -> impl Iterator<Item = NodeIndex> {
        (1..=size).map(NodeIndex)
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-negative edge cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weight(u32);

impl Weight {
    /// Dijkstra relies on non-negative weights, so negative values are rejected here
    pub fn new(value: i64) -> GraphResult<Self> {
        if value < 0 {
            return Err(GraphError::InvalidWeight(value));
        }
        u32::try_from(value)
            .map(Self)
            .map_err(|_| GraphError::InvalidWeight(value))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for Weight {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_index_bounds() {
        assert_eq!(NodeIndex::checked(1, 3).unwrap().get(), 1);
        assert_eq!(NodeIndex::checked(3, 3).unwrap().get(), 3);
        assert!(matches!(
            NodeIndex::checked(0, 3),
            Err(GraphError::InvalidNodeIndex { index: 0, size: 3 })
        ));
        assert!(matches!(
            NodeIndex::checked(4, 3),
            Err(GraphError::InvalidNodeIndex { index: 4, size: 3 })
        ));
        assert!(NodeIndex::checked(-2, 3).is_err());
    }

    #[test]
    fn test_within() {
        assert!(NodeIndex::within(0, 2).is_none());
        assert_eq!(NodeIndex::within(2, 2).map(NodeIndex::get), Some(2));
        assert!(NodeIndex::within(3, 2).is_none());
    }

    #[test]
    fn test_slot_is_zero_based() {
        assert_eq!(NodeIndex::checked(1, 1).unwrap().slot(), 0);
    }

    #[test]
    fn test_weight_rejects_negative() {
        assert!(matches!(Weight::new(-1), Err(GraphError::InvalidWeight(-1))));
        assert_eq!(Weight::new(0).unwrap().get(), 0);
        assert_eq!(Weight::new(42).unwrap().get(), 42);
    }

    #[test]
    fn test_weight_rejects_overflow() {
        assert!(Weight::new(i64::from(u32::MAX) + 1).is_err());
    }

    #[test]
    fn test_node_data_display() {
        let data = NodeData::from("Aurora and 85th");
        assert_eq!(data.to_string(), "Aurora and 85th");
        assert!(NodeData::from("a") < NodeData::from("b"));
    }
}
