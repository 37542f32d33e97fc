//! Color helpers.
//!
//! Colors are RGB triples stored in a [`Vec3`] with each channel in 0.0-1.0,
//! the same representation the scene materials use. Configuration files
//! carry colors as 24-bit hex integers (`0xf0f0f0`).

use glam::Vec3;

/// Near-black resting color of an idle neuron.
pub const DEFAULT_BASE: u32 = 0x0b0b0b;

/// Near-white color a neuron shows at the start of a flash.
pub const DEFAULT_FLASH: u32 = 0xf0f0f0;

/// Decode a `0xRRGGBB` integer into an RGB color.
///
/// Bits above the low 24 are ignored.
pub fn from_hex(hex: u32) -> Vec3 {
    let r = (hex >> 16) & 0xff;
    let g = (hex >> 8) & 0xff;
    let b = hex & 0xff;
    Vec3::new(r as f32, g as f32, b as f32) / 255.0
}

/// Encode an RGB color as `0xRRGGBB`, clamping each channel.
pub fn to_hex(color: Vec3) -> u32 {
    let c = (color.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
    ((c.x as u32) << 16) | ((c.y as u32) << 8) | c.z as u32
}

/// Linear interpolation: `t = 0` gives exactly `from`, `t = 1` exactly `to`.
#[inline]
pub fn lerp(from: Vec3, to: Vec3, t: f32) -> Vec3 {
    from * (1.0 - t) + to * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        let c = from_hex(0xff8000);
        assert!((c.x - 1.0).abs() < 1e-6);
        assert!((c.y - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.z, 0.0);
    }

    #[test]
    fn test_hex_survives_decode() {
        assert_eq!(to_hex(from_hex(DEFAULT_BASE)), DEFAULT_BASE);
        assert_eq!(to_hex(from_hex(DEFAULT_FLASH)), DEFAULT_FLASH);
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = from_hex(DEFAULT_BASE);
        let b = from_hex(DEFAULT_FLASH);
        assert_eq!(lerp(a, b, 0.0), a);
        assert!((lerp(a, b, 1.0) - b).length() < 1e-6);
    }
}
