use std::collections::HashSet;
use std::fmt;

/// Outcome of resolving one module during the walk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Copy, Default)]
pub enum ResolutionStatus {
    #[default]
    Ok,
    NullReference,
    NotFound,
    CorruptImage,
    NoPermission,
}

impl ResolutionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ResolutionStatus::Ok => "Ok",
            ResolutionStatus::NullReference => "NullReference",
            ResolutionStatus::NotFound => "NotFound",
            ResolutionStatus::CorruptImage => "CorruptImage",
            ResolutionStatus::NoPermission => "NoPermission",
        }
    }

    pub fn is_ok(self) -> bool {
        self == ResolutionStatus::Ok
    }
}

impl fmt::Display for ResolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One module encountered during a walk. Identity is the name alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    pub depth: usize,
    pub status: ResolutionStatus,
}

impl Node {
    pub fn new(name: impl Into<String>, depth: usize) -> Self {
        Self {
            name: name.into(),
            depth,
            status: ResolutionStatus::Ok,
        }
    }

    pub fn with_status(mut self, status: ResolutionStatus) -> Self {
        self.status = status;
        self
    }
}

/// Append-only pre-order sequence of visited nodes, keyed by name.
///
/// Nodes are never removed or reordered once pushed; a second node with an
/// already visited name is rejected.
pub struct SequenceBuilder {
    nodes: Vec<Node>,
    visited: HashSet<String>,
}

impl SequenceBuilder {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            visited: HashSet::new(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.visited.contains(name)
    }

    /// Appends `node` unless its name was already visited. Returns whether it
    /// was appended.
    pub fn push(&mut self, node: Node) -> bool {
        if !self.visited.insert(node.name.clone()) {
            return false;
        }
        self.nodes.push(node);
        true
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn build(self) -> Vec<Node> {
        self.nodes
    }
}

impl Default for SequenceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
