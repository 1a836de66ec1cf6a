//! Portable tools.
//!
//! A tool is created once while the world is assembled and then only moves:
//! room floor → backpack → (sometimes) spent. Tools are never cloned during
//! play, so the `Tool` type deliberately does not derive `Clone`.

use serde::{Deserialize, Serialize};

use crate::error::ConstructionError;
use crate::oxygen;

/// What a tool is, as far as the rules care.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ToolKind {
    Key,
    ToolKit,
    LaserCutter,
    AccessCard,
    PowerCable,
    Flashlight,
    StarTracker,
    /// Scenery item with no special rule.
    Generic,
    OxygenCylinder {
        /// Fixed at creation; a contaminated cylinder ends the game when breathed.
        #[serde(default)]
        contaminated: bool,
        /// Oxygen credited to the room when a clean cylinder is used.
        #[serde(rename = "yield", default = "default_yield")]
        oxygen_yield: f32,
    },
}

fn default_yield() -> f32 {
    oxygen::CYLINDER_YIELD
}

/// A portable item with a unique name.
#[derive(Debug, PartialEq)]
pub struct Tool {
    name: String,
    description: String,
    kind: ToolKind,
}

impl Tool {
    /// Create a tool, rejecting blank names and descriptions.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        kind: ToolKind,
    ) -> Result<Self, ConstructionError> {
        let name = name.into();
        let description = description.into();
        if name.trim().is_empty() {
            return Err(ConstructionError::EmptyName { what: "tool" });
        }
        if description.trim().is_empty() {
            return Err(ConstructionError::EmptyDescription { what: "tool", name });
        }
        if let ToolKind::OxygenCylinder { oxygen_yield, .. } = kind {
            if oxygen_yield < 0.0 {
                return Err(ConstructionError::NegativeYield {
                    name,
                    value: oxygen_yield,
                });
            }
        }
        Ok(Self {
            name,
            description,
            kind,
        })
    }

    /// Oxygen cylinder holding the standard yield.
    pub fn oxygen_cylinder(
        name: impl Into<String>,
        description: impl Into<String>,
        contaminated: bool,
    ) -> Result<Self, ConstructionError> {
        Self::new(
            name,
            description,
            ToolKind::OxygenCylinder {
                contaminated,
                oxygen_yield: oxygen::CYLINDER_YIELD,
            },
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> ToolKind {
        self.kind
    }

    /// Use the tool on its own.
    ///
    /// Every kind reports `true` except oxygen cylinders, which report their
    /// contamination flag: `true` means the air is poisoned and breathing it
    /// is fatal. No side effects either way.
    pub fn use_alone(&self) -> bool {
        match self.kind {
            ToolKind::OxygenCylinder { contaminated, .. } => contaminated,
            _ => true,
        }
    }

    pub fn is_oxygen_cylinder(&self) -> bool {
        matches!(self.kind, ToolKind::OxygenCylinder { .. })
    }

    /// Oxygen this tool would add to a room, if it is a cylinder.
    pub fn oxygen_yield(&self) -> Option<f32> {
        match self.kind {
            ToolKind::OxygenCylinder { oxygen_yield, .. } => Some(oxygen_yield),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_tool_is_usable() {
        let flashlight = Tool::new("flashlight", "A flashlight.", ToolKind::Flashlight).unwrap();
        assert!(flashlight.use_alone());
        assert!(!flashlight.is_oxygen_cylinder());
        assert_eq!(flashlight.oxygen_yield(), None);
    }

    #[test]
    fn test_cylinder_reports_contamination() {
        let clean = Tool::oxygen_cylinder("cylinder-1", "Air.", false).unwrap();
        let bad = Tool::oxygen_cylinder("cylinder-2", "Air?", true).unwrap();
        assert!(!clean.use_alone(), "clean cylinder is not contaminated");
        assert!(bad.use_alone(), "contaminated cylinder reports true");
        assert_eq!(clean.oxygen_yield(), Some(1.5));
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = Tool::new("  ", "Something.", ToolKind::Generic).unwrap_err();
        assert_eq!(err, ConstructionError::EmptyName { what: "tool" });
    }

    #[test]
    fn test_empty_description_rejected() {
        let err = Tool::new("key-1", "", ToolKind::Key).unwrap_err();
        assert!(matches!(err, ConstructionError::EmptyDescription { .. }));
    }

    #[test]
    fn test_negative_yield_rejected() {
        let kind = ToolKind::OxygenCylinder {
            contaminated: false,
            oxygen_yield: -1.0,
        };
        assert!(Tool::new("cylinder", "Air.", kind).is_err());
    }

    #[test]
    fn test_kind_from_json() {
        let kind: ToolKind =
            serde_json::from_str(r#"{"kind": "oxygen-cylinder", "contaminated": true}"#).unwrap();
        assert_eq!(
            kind,
            ToolKind::OxygenCylinder {
                contaminated: true,
                oxygen_yield: 1.5
            }
        );
        let kind: ToolKind = serde_json::from_str(r#"{"kind": "star-tracker"}"#).unwrap();
        assert_eq!(kind, ToolKind::StarTracker);
    }
}
