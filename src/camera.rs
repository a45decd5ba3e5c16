use bevy::prelude::*;

use crate::evasion::{Point, ViewportBounds};

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Viewport>()
            .add_systems(Startup, setup_camera)
            .add_systems(PreUpdate, update_viewport);
    }
}

/// Logical window size, kept in sync with the primary window.
///
/// Everything game-side talks viewport space (origin top-left, y down); this
/// resource converts to and from the 2D world the camera renders, whose
/// origin is the window center with y up.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

impl Viewport {
    pub fn bounds(&self) -> ViewportBounds {
        ViewportBounds::new(self.width, self.height)
    }

    /// Viewport pixels to world position
    pub fn to_world(&self, p: Point) -> Vec2 {
        Vec2::new(p.x - self.width * 0.5, self.height * 0.5 - p.y)
    }

    /// World position to viewport pixels
    pub fn to_viewport(&self, world: Vec2) -> Point {
        Point::new(world.x + self.width * 0.5, self.height * 0.5 - world.y)
    }

    /// Transform for something drawn at viewport `(x, y)` on layer `z`
    pub fn place(&self, x: f32, y: f32, z: f32) -> Transform {
        Transform::from_translation(self.to_world(Point::new(x, y)).extend(z))
    }
}

#[derive(Component)]
pub struct MainCamera;

/// Plain orthographic 2D camera: one world unit per logical pixel
fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2d, MainCamera));
}

/// Update viewport resource when the window is resized
fn update_viewport(mut viewport: ResMut<Viewport>, windows: Query<&Window>) {
    let Ok(window) = windows.single() else {
        return;
    };

    let (width, height) = (window.width(), window.height());
    if (width - viewport.width).abs() > 0.5 || (height - viewport.height).abs() > 0.5 {
        viewport.width = width;
        viewport.height = height;
        debug!("Viewport resized to {}x{}", width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_center_is_world_origin() {
        let viewport = Viewport {
            width: 800.0,
            height: 600.0,
        };
        assert_eq!(viewport.to_world(Point::new(400.0, 300.0)), Vec2::ZERO);
        assert_eq!(viewport.to_world(Point::new(0.0, 0.0)), Vec2::new(-400.0, 300.0));
    }

    #[test]
    fn test_conversion_round_trips() {
        let viewport = Viewport::default();
        let p = Point::new(123.0, 456.0);
        assert_eq!(viewport.to_viewport(viewport.to_world(p)), p);
    }
}
