pub mod text_tree;
pub mod xml;

use anyhow::{bail, Result};

use crate::core::Node;

pub use text_tree::TextTreeFormatter;
pub use xml::XmlFormatter;

/// Checks that `nodes` reads as a pre-order traversal: the first node sits at
/// depth 0 and no node is more than one level deeper than its predecessor.
pub fn validate_sequence(nodes: &[Node]) -> Result<()> {
    if let Some(first) = nodes.first() {
        if first.depth != 0 {
            bail!(
                "sequence must start at depth 0, found {} at depth {}",
                first.name,
                first.depth
            );
        }
    }

    for pair in nodes.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        if next.depth > current.depth + 1 {
            bail!(
                "{} at depth {} cannot follow {} at depth {}",
                next.name,
                next.depth,
                current.name,
                current.depth
            );
        }
    }
    Ok(())
}
