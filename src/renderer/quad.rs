//! Draw-list primitive

use bytemuck::{Pod, Zeroable};

/// Shape tags for [`Quad::shape`]
pub const SHAPE_RECT: u32 = 0;
pub const SHAPE_ROUNDED: u32 = 1;
pub const SHAPE_CIRCLE: u32 = 2;

/// One filled shape, centred on `position`, in canvas pixels
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Quad {
    pub position: [f32; 2],
    pub size: [f32; 2],
    pub color: [f32; 4],
    pub shape: u32,
}

impl Quad {
    pub const fn new(x: f32, y: f32, w: f32, h: f32, color: [f32; 4], shape: u32) -> Self {
        Self {
            position: [x, y],
            size: [w, h],
            color,
            shape,
        }
    }
}

/// Unpack 0xRRGGBBAA into normalized RGBA
pub fn rgba(packed: u32) -> [f32; 4] {
    let [r, g, b, a] = packed.to_be_bytes();
    [
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        a as f32 / 255.0,
    ]
}

/// Linear blend between two colors
pub fn mix(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    let t = t.clamp(0.0, 1.0);
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

/// Colors for game elements
pub mod colors {
    pub const BOARD_DARK: [f32; 4] = [0.07, 0.07, 0.12, 1.0];
    pub const BOARD_LIGHT: [f32; 4] = [0.09, 0.09, 0.15, 1.0];
    pub const GRID_FLASH: [f32; 4] = [1.0, 1.0, 1.0, 0.35];
    pub const SNAKE_HEAD: [f32; 4] = [0.18, 0.8, 0.44, 1.0];
    pub const SNAKE_TAIL: [f32; 4] = [0.09, 0.42, 0.25, 1.0];
    pub const SNAKE_DEAD: [f32; 4] = [0.5, 0.5, 0.55, 1.0];
    pub const APPLE: [f32; 4] = [1.0, 0.32, 0.32, 1.0];
    pub const GOLDEN: [f32; 4] = [1.0, 0.84, 0.0, 1.0];
    pub const SPEED: [f32; 4] = [0.39, 0.71, 0.96, 1.0];
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.6];
}

/// FNV-1a over the raw bytes of a draw list
pub fn fingerprint(quads: &[Quad]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytemuck::cast_slice::<Quad, u8>(quads)
        .iter()
        .fold(OFFSET, |hash, &byte| (hash ^ u64::from(byte)).wrapping_mul(PRIME))
}
