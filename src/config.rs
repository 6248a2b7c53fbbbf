use crate::canvas::Rgba;

/// World dimensions; the raster scales these onto the terminal
pub const WORLD_WIDTH: f32 = 1200.0;
pub const WORLD_HEIGHT: f32 = 900.0;

/// Deepest recursion level the tree may reach
pub const MAX_LEVEL: u32 = 10;
pub const DEFAULT_LEVEL: u32 = 8;
pub const DEFAULT_FPS: u32 = 60;

/// Trunk placement
pub const TRUNK_LENGTH: f32 = 150.0;
pub const TRUNK_BASE_OFFSET: f32 = 50.0;

/// Runtime configuration for the blossom tree
#[derive(Clone)]
pub struct TreeConfig {
    pub level: u32,
    pub time_step: f32,
    pub seed: Option<u64>,
    pub print: bool,
    pub sky: Rgba,
}

/// Fixed colours of the scene
pub mod palette {
    use crate::canvas::Rgba;

    pub const SKY: Rgba = Rgba::rgb(135, 206, 235);

    pub const TRUNK: Rgba = Rgba::rgb(101, 67, 33);

    pub const LIGHT_PINK: Rgba = Rgba::rgb(255, 182, 193);
    pub const PINK: Rgba = Rgba::rgb(255, 192, 203);
    pub const BLOSSOM_CENTER: Rgba = Rgba::rgb(255, 215, 0);
}
