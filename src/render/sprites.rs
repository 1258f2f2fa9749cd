//! Sprite atlas names
//!
//! The atlas is a flat list of asset names; instances refer to sprites by
//! index so the renderer can load textures once up front.

use crate::sim::Pose;

/// Spin frames in 45 degree steps, matching `Pose::Spinning::frame`
pub const PLAYER_SPIN: [&str; 8] = [
    "student2.gif",
    "45.gif",
    "90.gif",
    "135.gif",
    "180.gif",
    "315.gif",
    "270.gif",
    "225.gif",
];

/// Standing sprites indexed by facing + 1
pub const PLAYER_STANDING: [&str; 3] = ["studentlewo.gif", "student2.gif", "studentprawo.gif"];

pub const PLATFORM_DEFAULT: &str = "plat.gif";
pub const BONUS: &str = "image.gif";
pub const STAR: &str = "star";

/// Every asset the renderer needs, without duplicates
pub const ATLAS: [&str; 21] = [
    "student2.gif",
    "45.gif",
    "90.gif",
    "135.gif",
    "180.gif",
    "315.gif",
    "270.gif",
    "225.gif",
    "studentlewo.gif",
    "studentprawo.gif",
    "plat.gif",
    "plat100.gif",
    "plat120.gif",
    "plat140.gif",
    "plat160.gif",
    "plat180.gif",
    "plat200.gif",
    "plat220.gif",
    "plat240.gif",
    "image.gif",
    "star",
];

/// Platform lengths that have a sized sprite
const SIZED_PLATFORMS: std::ops::RangeInclusive<u32> = 5..=12;

/// Asset name for a platform of the given length category
pub fn platform_sprite(length: u32) -> &'static str {
    if SIZED_PLATFORMS.contains(&length) {
        // ATLAS[11] is plat100.gif
        ATLAS[11 + (length - 5) as usize]
    } else {
        PLATFORM_DEFAULT
    }
}

/// Asset name for the player's current pose
pub fn player_sprite(pose: Pose) -> &'static str {
    match pose {
        Pose::Spinning { frame } => PLAYER_SPIN[frame as usize % PLAYER_SPIN.len()],
        Pose::Standing { facing } => PLAYER_STANDING[(facing.clamp(-1, 1) + 1) as usize],
    }
}

/// Atlas index of an asset name
pub fn atlas_index(name: &str) -> Option<u32> {
    ATLAS.iter().position(|n| *n == name).map(|i| i as u32)
}
