//! Frame sizes.
//!
//! Most archives use one size for every frame, taken from their [`crate::settings::AssetSettings`].
//! The cursor atlas and the character button panel pack differently sized frames together and
//! carry their own tables.

/// Width and height of a frame in pixels
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct FrameDimensions {
    pub width: u32,
    pub height: u32,
}

impl FrameDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixels in a frame of this size
    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Archive name of the cursor atlas
pub const CURSOR_ATLAS: &str = "objcurs.cel";

/// Archive name of the character button panel
pub const BUTTON_PANEL: &str = "charbut.cel";

/// How the dimensions of the frames of an archive are chosen
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DimensionRule {
    /// Every frame has the configured size
    Fixed(FrameDimensions),

    /// Per-frame sizes of `objcurs.cel`
    CursorAtlas,

    /// Per-frame widths of `charbut.cel`, height from the settings
    ButtonPanel { height: u32 },
}

impl DimensionRule {
    /// Rule for the archive `name` (lowercase base name) with the configured size
    pub fn for_archive(name: &str, configured: FrameDimensions) -> Self {
        match name {
            CURSOR_ATLAS => DimensionRule::CursorAtlas,
            BUTTON_PANEL => DimensionRule::ButtonPanel {
                height: configured.height,
            },
            _ => DimensionRule::Fixed(configured),
        }
    }

    /// Dimensions of the frame at `index` in archive order
    pub fn resolve(&self, index: usize) -> FrameDimensions {
        match *self {
            DimensionRule::Fixed(dimensions) => dimensions,
            DimensionRule::CursorAtlas => cursor_dimensions(index),
            DimensionRule::ButtonPanel { height } => FrameDimensions {
                width: if index == 0 { 95 } else { 41 },
                height,
            },
        }
    }
}

fn cursor_dimensions(index: usize) -> FrameDimensions {
    let width = match index {
        0 => 33,
        1..=9 => 32,
        10 => 23,
        11..=85 => 28,
        _ => 56,
    };

    let height = match index {
        0 => 29,
        1..=9 => 32,
        10 => 35,
        11..=60 => 28,
        61..=66 => 56,
        67..=85 => 84,
        86..=110 => 56,
        _ => 84,
    };

    FrameDimensions { width, height }
}
