use anyhow::Result;
use std::io::Write;

use crate::core::Node;

const INDENT_WIDTH: usize = 2;

/// Indented, line-per-module report followed by a module count and one
/// diagnostic line per failed module.
pub struct TextTreeFormatter {
    indent_width: usize,
}

impl TextTreeFormatter {
    pub fn new() -> Self {
        Self {
            indent_width: INDENT_WIDTH,
        }
    }

    pub fn write_to<W: Write>(&self, nodes: &[Node], mut writer: W) -> Result<()> {
        writer.write_all(self.format_sequence(nodes).as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    pub fn format_sequence(&self, nodes: &[Node]) -> String {
        let mut out = String::new();

        for node in nodes {
            out.push_str(&" ".repeat(node.depth * self.indent_width));
            out.push_str(&node.name);
            if !node.status.is_ok() {
                out.push_str(&format!(" with status: {}", node.status));
            }
            out.push('\n');
        }

        out.push_str(&format!("{} assemblies\n", nodes.len()));

        for node in nodes.iter().filter(|node| !node.status.is_ok()) {
            out.push_str(&format!("{}: {}\n", node.status, node.name));
        }

        out
    }
}

impl Default for TextTreeFormatter {
    fn default() -> Self {
        Self::new()
    }
}
