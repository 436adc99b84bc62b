//! Material definitions and palette

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a material behaves physically
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialType {
    /// Nothing there
    Empty,
    /// Doesn't move (stone, plant)
    Solid,
    /// Falls, piles up, sinks through water (sand)
    Powder,
    /// Falls and flows sideways (water, lava)
    Liquid,
    /// Short-lived and reactive (fire)
    Energy,
}

/// The closed set of states a cell can hold.
///
/// Discriminants follow the classic ordering (empty = 0 .. stone = 6), which
/// is also the order of the `1`-`7` hotkeys.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Material {
    #[default]
    Empty = 0,
    Sand = 1,
    Water = 2,
    Plant = 3,
    Fire = 4,
    Lava = 5,
    Stone = 6,
}

impl Material {
    /// Every material in discriminant order
    pub const ALL: [Material; 7] = [
        Material::Empty,
        Material::Sand,
        Material::Water,
        Material::Plant,
        Material::Fire,
        Material::Lava,
        Material::Stone,
    ];

    /// Everything except Empty (used for scatter seeding)
    pub const PAINTABLE: [Material; 6] = [
        Material::Sand,
        Material::Water,
        Material::Plant,
        Material::Fire,
        Material::Lava,
        Material::Stone,
    ];

    /// Lowercase display name
    pub fn name(self) -> &'static str {
        match self {
            Material::Empty => "empty",
            Material::Sand => "sand",
            Material::Water => "water",
            Material::Plant => "plant",
            Material::Fire => "fire",
            Material::Lava => "lava",
            Material::Stone => "stone",
        }
    }

    /// Base color (RGBA)
    pub fn color(self) -> [u8; 4] {
        match self {
            Material::Empty => [0, 0, 0, 255],
            Material::Sand => [210, 190, 120, 255],
            Material::Water => [30, 144, 255, 255],
            Material::Plant => [34, 139, 34, 255],
            Material::Fire => [255, 69, 0, 255],
            Material::Lava => [207, 16, 32, 255],
            Material::Stone => [128, 128, 128, 255],
        }
    }

    pub fn material_type(self) -> MaterialType {
        match self {
            Material::Empty => MaterialType::Empty,
            Material::Sand => MaterialType::Powder,
            Material::Water | Material::Lava => MaterialType::Liquid,
            Material::Plant | Material::Stone => MaterialType::Solid,
            Material::Fire => MaterialType::Energy,
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Material::Empty
    }

    /// Look up a material by its numeric id
    pub fn from_index(index: u8) -> Option<Material> {
        Self::ALL.get(index as usize).copied()
    }

    /// Map a `1`-`7` hotkey to a material (`1` is Empty, `7` is Stone)
    pub fn from_hotkey(key: char) -> Option<Material> {
        let digit = key.to_digit(10)?;
        if (1..=7).contains(&digit) {
            Self::from_index((digit - 1) as u8)
        } else {
            None
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a material name doesn't match any known material
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown material `{0}` (expected one of: empty, sand, water, plant, fire, lava, stone)")]
pub struct ParseMaterialError(pub String);

impl FromStr for Material {
    type Err = ParseMaterialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Material::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseMaterialError(wanted.to_string()))
    }
}
