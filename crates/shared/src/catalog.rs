//! Static lumber catalog: purchasable profiles, species, and finishes.
//!
//! Lookup is pure and synchronous; the scene core never mutates this table.

use serde::{Deserialize, Serialize};

/// Species identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WoodSpeciesId {
    Pine,
    Cedar,
    Oak,
    Walnut,
}

/// A named finish option for a species
#[derive(Debug, Clone, Copy)]
pub struct FinishPreset {
    pub name: &'static str,
    /// 0xRRGGBB
    pub color: u32,
    pub roughness: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct WoodSpecies {
    pub label: &'static str,
    /// lb/ft^3
    pub density: f64,
    /// psi
    pub modulus: f64,
    pub finish_presets: &'static [FinishPreset],
}

/// Nominal stock dimensions in inches (actual, not trade size)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileSize {
    pub width: f64,
    pub height: f64,
    pub length: f64,
}

/// Render material parameters for a profile
#[derive(Debug, Clone, Copy)]
pub struct MaterialParams {
    /// 0xRRGGBB
    pub color: u32,
    pub roughness: f32,
    pub metalness: f32,
}

impl MaterialParams {
    /// Color as linear-ish RGB floats for the mesh vertex stream
    pub fn rgb(&self) -> [f32; 3] {
        [
            ((self.color >> 16) & 0xff) as f32 / 255.0,
            ((self.color >> 8) & 0xff) as f32 / 255.0,
            (self.color & 0xff) as f32 / 255.0,
        ]
    }
}

/// One purchasable lumber profile
#[derive(Debug, Clone, Copy)]
pub struct LumberProfile {
    pub id: &'static str,
    pub label: &'static str,
    pub species: WoodSpeciesId,
    pub size_inches: ProfileSize,
    pub material: MaterialParams,
    pub notes: Option<&'static str>,
}

const PINE_FINISHES: &[FinishPreset] = &[
    FinishPreset { name: "Bare", color: 0xe5c39d, roughness: 0.85 },
    FinishPreset { name: "Clear Coat", color: 0xd7b38b, roughness: 0.45 },
];

const CEDAR_FINISHES: &[FinishPreset] = &[
    FinishPreset { name: "Natural", color: 0xc68f5d, roughness: 0.75 },
    FinishPreset { name: "Oil", color: 0xb0723c, roughness: 0.6 },
];

const OAK_FINISHES: &[FinishPreset] = &[
    FinishPreset { name: "Natural", color: 0xc9a27a, roughness: 0.65 },
    FinishPreset { name: "Walnut Stain", color: 0x8a5b30, roughness: 0.5 },
];

const WALNUT_FINISHES: &[FinishPreset] = &[
    FinishPreset { name: "Bare", color: 0x5c3a21, roughness: 0.55 },
    FinishPreset { name: "Polish", color: 0x402414, roughness: 0.35 },
];

/// Resolve a species. Species ids are a closed enum, so this is total.
pub fn resolve_species(id: WoodSpeciesId) -> WoodSpecies {
    match id {
        WoodSpeciesId::Pine => WoodSpecies {
            label: "Douglas Fir / Pine",
            density: 34.0,
            modulus: 1_200_000.0,
            finish_presets: PINE_FINISHES,
        },
        WoodSpeciesId::Cedar => WoodSpecies {
            label: "Western Red Cedar",
            density: 23.0,
            modulus: 1_100_000.0,
            finish_presets: CEDAR_FINISHES,
        },
        WoodSpeciesId::Oak => WoodSpecies {
            label: "White Oak",
            density: 47.0,
            modulus: 1_500_000.0,
            finish_presets: OAK_FINISHES,
        },
        WoodSpeciesId::Walnut => WoodSpecies {
            label: "Black Walnut",
            density: 40.0,
            modulus: 1_400_000.0,
            finish_presets: WALNUT_FINISHES,
        },
    }
}

pub const LUMBER_PROFILES: &[LumberProfile] = &[
    LumberProfile {
        id: "stud-2x4",
        label: "2×4 Stud",
        species: WoodSpeciesId::Pine,
        size_inches: ProfileSize { width: 1.5, height: 3.5, length: 96.0 },
        material: MaterialParams { color: 0xe5c39d, roughness: 0.8, metalness: 0.05 },
        notes: Some("Standard framing stud"),
    },
    LumberProfile {
        id: "beam-4x4",
        label: "4×4 Post",
        species: WoodSpeciesId::Cedar,
        size_inches: ProfileSize { width: 3.5, height: 3.5, length: 96.0 },
        material: MaterialParams { color: 0xc68f5d, roughness: 0.7, metalness: 0.04 },
        notes: Some("Outdoor pergola post"),
    },
    LumberProfile {
        id: "board-1x6",
        label: "1×6 Board",
        species: WoodSpeciesId::Oak,
        size_inches: ProfileSize { width: 0.75, height: 5.5, length: 72.0 },
        material: MaterialParams { color: 0xc9a27a, roughness: 0.65, metalness: 0.04 },
        notes: None,
    },
    LumberProfile {
        id: "panel-3-4",
        label: "3/4″ Walnut Panel",
        species: WoodSpeciesId::Walnut,
        size_inches: ProfileSize { width: 0.75, height: 24.0, length: 48.0 },
        material: MaterialParams { color: 0x5c3a21, roughness: 0.55, metalness: 0.03 },
        notes: None,
    },
];

/// Resolve a profile by id
pub fn resolve_profile(id: &str) -> Option<&'static LumberProfile> {
    LUMBER_PROFILES.iter().find(|profile| profile.id == id)
}

/// Profile used for quick-add shortcuts
pub fn default_profile_id() -> &'static str {
    LUMBER_PROFILES[0].id
}

const CUBIC_INCHES_PER_BOARD_FOOT: f64 = 144.0;

/// Board feet of one piece at the given scale: scaled volume / 144.
pub fn board_feet(profile: &LumberProfile, scale: [f64; 3]) -> f64 {
    let volume = profile.size_inches.width * scale[0]
        * profile.size_inches.height * scale[1]
        * profile.size_inches.length * scale[2];
    volume / CUBIC_INCHES_PER_BOARD_FOOT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_profile() {
        let profile = resolve_profile("stud-2x4").unwrap();
        assert_eq!(profile.label, "2×4 Stud");
        assert_eq!(profile.size_inches.width, 1.5);
    }

    #[test]
    fn test_resolve_unknown_profile() {
        assert!(resolve_profile("plywood-sheet").is_none());
    }

    #[test]
    fn test_default_profile_exists() {
        assert!(resolve_profile(default_profile_id()).is_some());
    }

    #[test]
    fn test_board_feet_stud_at_unit_scale() {
        // 1.5 × 3.5 × 96 / 144 = 3.5
        let profile = resolve_profile("stud-2x4").unwrap();
        let bf = board_feet(profile, [1.0, 1.0, 1.0]);
        assert!((bf - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_board_feet_linear_in_each_axis() {
        let profile = resolve_profile("board-1x6").unwrap();
        let base = board_feet(profile, [1.0, 1.0, 1.0]);
        assert!((board_feet(profile, [2.0, 1.0, 1.0]) - base * 2.0).abs() < 1e-9);
        assert!((board_feet(profile, [1.0, 2.0, 1.0]) - base * 2.0).abs() < 1e-9);
        assert!((board_feet(profile, [1.0, 1.0, 2.0]) - base * 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_species_have_finishes() {
        for id in [
            WoodSpeciesId::Pine,
            WoodSpeciesId::Cedar,
            WoodSpeciesId::Oak,
            WoodSpeciesId::Walnut,
        ] {
            assert!(!resolve_species(id).finish_presets.is_empty());
        }
    }

    #[test]
    fn test_material_rgb_unpack() {
        let m = MaterialParams { color: 0xff8000, roughness: 0.5, metalness: 0.0 };
        let rgb = m.rgb();
        assert!((rgb[0] - 1.0).abs() < 1e-6);
        assert!((rgb[1] - 128.0 / 255.0).abs() < 1e-6);
        assert!(rgb[2].abs() < 1e-6);
    }
}
