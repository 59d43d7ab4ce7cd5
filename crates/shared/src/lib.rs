use serde::{Deserialize, Serialize};

pub mod catalog;

pub use catalog::{
    board_feet, default_profile_id, resolve_profile, resolve_species, FinishPreset,
    LumberProfile, MaterialParams, ProfileSize, WoodSpecies, WoodSpeciesId, LUMBER_PROFILES,
};

/// Unique identifier of a placed lumber piece
pub type EntityId = String;

/// Position in inches, rotation in degrees, scale as a unitless multiplier.
/// This is the persisted representation; the viewport converts to
/// meters/radians when writing scene objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    pub scale: [f64; 3],
}

impl Transform {
    pub fn new() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            scale: [1.0, 1.0, 1.0],
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

/// One placed lumber piece
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    /// Catalog profile reference; not validated here — the reconciler skips
    /// entities whose profile cannot be resolved.
    pub profile_id: String,
    pub transform: Transform,
    /// Locked pieces are excluded from pick-selection and gizmo attachment
    pub locked: bool,
    /// Hidden pieces keep their scene object but are not rendered or pickable
    pub visible: bool,
}

/// Active manipulation tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolMode {
    #[default]
    Translate,
    Rotate,
    Scale,
}

/// Translation snap step. Serialized as its inch value so persisted
/// snapshots stay readable; anything outside {0.25, 0.5, 1} is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum SnapIncrement {
    #[default]
    Quarter,
    Half,
    Whole,
}

impl SnapIncrement {
    /// Snap step in inches
    pub fn inches(&self) -> f64 {
        match self {
            SnapIncrement::Quarter => 0.25,
            SnapIncrement::Half => 0.5,
            SnapIncrement::Whole => 1.0,
        }
    }

    /// All available increments
    pub fn all() -> &'static [SnapIncrement] {
        &[
            SnapIncrement::Quarter,
            SnapIncrement::Half,
            SnapIncrement::Whole,
        ]
    }
}

impl TryFrom<f64> for SnapIncrement {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value == 0.25 {
            Ok(SnapIncrement::Quarter)
        } else if value == 0.5 {
            Ok(SnapIncrement::Half)
        } else if value == 1.0 {
            Ok(SnapIncrement::Whole)
        } else {
            Err(format!("invalid snap increment: {value}"))
        }
    }
}

impl From<SnapIncrement> for f64 {
    fn from(value: SnapIncrement) -> f64 {
        value.inches()
    }
}

/// UI theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Workspace preferences, carried inside the snapshot so they undo with it
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Preferences {
    pub snap_increment: SnapIncrement,
    pub theme: Theme,
}

/// One immutable full state of the builder — the unit of undo/redo.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub entities: Vec<Entity>,
    /// Selected entity ids in selection order; always a subset of `entities`
    pub selection: Vec<EntityId>,
    pub tool: ToolMode,
    pub preferences: Preferences,
}

impl Snapshot {
    /// Find an entity by id
    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Primary (first) selected entity id
    pub fn primary_selection(&self) -> Option<&EntityId> {
        self.selection.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_increment_values() {
        assert_eq!(SnapIncrement::Quarter.inches(), 0.25);
        assert_eq!(SnapIncrement::Half.inches(), 0.5);
        assert_eq!(SnapIncrement::Whole.inches(), 1.0);
    }

    #[test]
    fn test_snap_increment_serde_roundtrip() {
        let json = serde_json::to_string(&SnapIncrement::Half).unwrap();
        assert_eq!(json, "0.5");
        let back: SnapIncrement = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SnapIncrement::Half);
    }

    #[test]
    fn test_snap_increment_rejects_unknown_value() {
        let result: Result<SnapIncrement, _> = serde_json::from_str("0.125");
        assert!(result.is_err());
    }

    #[test]
    fn test_tool_mode_serde_lowercase() {
        let json = serde_json::to_string(&ToolMode::Rotate).unwrap();
        assert_eq!(json, "\"rotate\"");
    }

    #[test]
    fn test_default_transform_is_identity() {
        let t = Transform::new();
        assert_eq!(t.position, [0.0; 3]);
        assert_eq!(t.rotation, [0.0; 3]);
        assert_eq!(t.scale, [1.0; 3]);
    }

    #[test]
    fn test_snapshot_serde_roundtrip() {
        let snapshot = Snapshot {
            entities: vec![Entity {
                id: "a".into(),
                name: "Lumber 1".into(),
                profile_id: "stud-2x4".into(),
                transform: Transform::new(),
                locked: false,
                visible: true,
            }],
            selection: vec!["a".into()],
            tool: ToolMode::Scale,
            preferences: Preferences::default(),
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
