//! The player's tool inventory.

use crate::tool::Tool;

/// Ordered collection of tools carried by the player.
///
/// Names are not forced to be unique: two rooms may both hold a tool called
/// `cylinder`, and the player can carry both. Lookups always resolve to the
/// first match.
#[derive(Debug, Default)]
pub struct Backpack {
    tools: Vec<Tool>,
}

impl Backpack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a tool at the end of the backpack.
    pub fn store(&mut self, tool: Tool) {
        log::debug!("backpack: stored {}", tool.name());
        self.tools.push(tool);
    }

    /// Look a tool up by name without removing it.
    pub fn retrieve(&self, name: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.name() == name)
    }

    /// Remove the first tool with this name and hand it over.
    pub fn take(&mut self, name: &str) -> Option<Tool> {
        let index = self.tools.iter().position(|t| t.name() == name)?;
        Some(self.tools.remove(index))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.iter().any(|t| t.name() == name)
    }

    /// Drop every held tool that shares this tool's identity.
    pub fn remove(&mut self, tool: &Tool) {
        self.tools.retain(|t| t.name() != tool.name());
    }

    /// Comma-separated tool names, in carrying order.
    pub fn list_names(&self) -> String {
        self.tools
            .iter()
            .map(Tool::name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// First oxygen cylinder in the backpack, if any.
    pub fn find_oxygen_cylinder(&self) -> Option<&Tool> {
        self.tools.iter().find(|t| t.is_oxygen_cylinder())
    }

    /// Remove and return the first oxygen cylinder.
    pub fn take_oxygen_cylinder(&mut self) -> Option<Tool> {
        let index = self.tools.iter().position(Tool::is_oxygen_cylinder)?;
        Some(self.tools.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tool> {
        self.tools.iter()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
