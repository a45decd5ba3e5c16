// ============================================================================
// EASING FUNCTIONS for smooth animations
// ============================================================================

use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;

use crate::camera::Viewport;
use crate::decor::{Frame, Rgb};

/// Ease-in-out cubic: slow at start and end, fast in the middle
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Ease-out cubic: fast at start, decelerates at end
/// Good for "arriving" animations like the NO button gliding to its new spot
pub fn ease_out_cubic(t: f32) -> f32 {
    let x = 1.0 - t;
    1.0 - x * x * x
}

// ============================================================================
// COLORS
// ============================================================================

pub fn color(rgb: Rgb, alpha: f32) -> Color {
    let [r, g, b] = rgb.to_f32();
    Color::srgba(r, g, b, alpha)
}

// ============================================================================
// MESHES - filled outlines as triangle fans around the origin
// ============================================================================

fn fan_mesh(outline: &[Vec2]) -> Mesh {
    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(outline.len() + 1);
    let mut uvs: Vec<[f32; 2]> = Vec::with_capacity(outline.len() + 1);
    let mut indices: Vec<u32> = Vec::with_capacity(outline.len() * 3);

    positions.push([0.0, 0.0, 0.0]);
    uvs.push([0.5, 0.5]);
    for p in outline {
        positions.push([p.x, p.y, 0.0]);
        uvs.push([p.x + 0.5, 0.5 - p.y]);
    }

    let rim = outline.len() as u32;
    for i in 1..=rim {
        let next = if i == rim { 1 } else { i + 1 };
        indices.extend_from_slice(&[0, i, next]);
    }

    let normals = vec![[0.0, 0.0, 1.0]; positions.len()];

    Mesh::new(PrimitiveTopology::TriangleList, default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
        .with_inserted_indices(Indices::U32(indices))
}

/// Unit-sized heart (fits a 1x1 box), point down
pub fn heart_mesh() -> Mesh {
    const SEGMENTS: usize = 48;
    let outline: Vec<Vec2> = (0..SEGMENTS)
        .map(|i| {
            let t = i as f32 / SEGMENTS as f32 * std::f32::consts::TAU;
            let x = 16.0 * t.sin().powi(3);
            let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
            // Raw curve spans roughly 32 x 29 units, centered a little high
            Vec2::new(x / 34.0, (y + 2.5) / 34.0)
        })
        .collect();
    fan_mesh(&outline)
}

/// Unit-sized five-point star
pub fn star_mesh() -> Mesh {
    let outline: Vec<Vec2> = (0..10)
        .map(|i| {
            let angle = std::f32::consts::FRAC_PI_2 + i as f32 * std::f32::consts::PI / 5.0;
            let radius = if i % 2 == 0 { 0.5 } else { 0.2 };
            Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect();
    fan_mesh(&outline)
}

/// Pill shape for buttons and banners
pub fn pill_mesh(width: f32, height: f32) -> Mesh {
    Capsule2d::new(height * 0.5, (width - height).max(0.0))
        .mesh()
        .build()
        .rotated_by(Quat::from_rotation_z(std::f32::consts::FRAC_PI_2))
}

// ============================================================================
// DECORATION FRAMES
// ============================================================================

/// Write a sampled decoration frame into an entity's transform and tint
pub fn apply_frame(
    frame: Frame,
    viewport: &Viewport,
    transform: &mut Transform,
    material: Option<&mut ColorMaterial>,
    base_alpha: f32,
) {
    let z = transform.translation.z;
    *transform = viewport
        .place(frame.x, frame.y, z)
        .with_rotation(Quat::from_rotation_z(-frame.rotation_deg.to_radians()))
        .with_scale(Vec3::splat(frame.scale.max(0.0)));

    if let Some(material) = material {
        material.color.set_alpha(base_alpha * frame.opacity.clamp(0.0, 1.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        for ease in [ease_in_out_cubic, ease_out_cubic] {
            assert_eq!(ease(0.0), 0.0);
            assert_eq!(ease(1.0), 1.0);
        }
        assert!(ease_out_cubic(0.5) > 0.5);
    }

    #[test]
    fn test_heart_fits_unit_box() {
        let mesh = heart_mesh();
        let Some(positions) = mesh.attribute(Mesh::ATTRIBUTE_POSITION) else {
            panic!("heart mesh has no positions");
        };
        let positions = positions.as_float3().unwrap();
        assert_eq!(positions.len(), 49);
        assert!(positions.iter().all(|p| p[0].abs() <= 0.5 && p[1].abs() <= 0.5));
    }

    #[test]
    fn test_apply_frame_flips_y_and_rotation() {
        let viewport = Viewport {
            width: 200.0,
            height: 100.0,
        };
        let mut transform = Transform::from_xyz(0.0, 0.0, 3.0);
        let frame = Frame {
            x: 0.0,
            y: 0.0,
            scale: 2.0,
            rotation_deg: 90.0,
            opacity: 0.5,
        };
        let mut material = ColorMaterial::from(Color::WHITE);

        apply_frame(frame, &viewport, &mut transform, Some(&mut material), 0.8);

        assert_eq!(transform.translation, Vec3::new(-100.0, 50.0, 3.0));
        assert_eq!(transform.scale, Vec3::splat(2.0));
        assert!((material.color.alpha() - 0.4).abs() < 1e-6);
        let (_, angle) = transform.rotation.to_axis_angle();
        assert!((angle - std::f32::consts::FRAC_PI_2).abs() < 1e-4);
    }
}
