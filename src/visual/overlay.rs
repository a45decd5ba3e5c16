use bevy::prelude::*;

use crate::{
    camera::Viewport,
    decor::{Rgb, palette},
    game::{Mode, ProposalSession},
    visual::{
        Hitbox, layer,
        pose::pulse,
        utils::{color, ease_in_out_cubic, heart_mesh, pill_mesh},
    },
};

const MUTE_SIZE: Vec2 = Vec2::new(110.0, 48.0);
const BANNER_SIZE: Vec2 = Vec2::new(520.0, 110.0);
const BANNER_IN_SECS: f32 = 0.7;
const BACKGROUND_FADE_SECS: f32 = 2.0;

/// Sound toggle in the bottom-left corner
#[derive(Component)]
pub struct MuteButton;

#[derive(Component)]
pub struct MuteLabel;

/// "Love is Magic!" banner shown right after the unlock
#[derive(Component, Default)]
pub struct MagicBanner {
    shown_for: f32,
}

/// Faint pulsing heart pinned to a corner
#[derive(Component)]
pub struct CornerHeart {
    /// 0 = top-left, 1 = bottom-right
    corner: u8,
}

/// Crossfade of the window clear color between palettes
#[derive(Resource)]
pub struct BackgroundFade {
    from: Rgb,
    to: Rgb,
    elapsed: f32,
}

impl Default for BackgroundFade {
    fn default() -> Self {
        let start = palette::background(Mode::Sweet);
        Self {
            from: start,
            to: start,
            elapsed: BACKGROUND_FADE_SECS,
        }
    }
}

impl BackgroundFade {
    pub fn retarget(&mut self, to: Rgb) {
        if to != self.to {
            self.from = self.to;
            self.to = to;
            self.elapsed = 0.0;
        }
    }

    pub fn advance(&mut self, delta: f32) -> Color {
        self.elapsed = (self.elapsed + delta).min(BACKGROUND_FADE_SECS);
        let k = ease_in_out_cubic(self.elapsed / BACKGROUND_FADE_SECS);
        let a = self.from.to_f32();
        let b = self.to.to_f32();
        let mix = |i: usize| a[i] * (1.0 - k) + b[i] * k;
        Color::srgb(mix(0), mix(1), mix(2))
    }
}

fn corner_heart_color(mode: Mode, corner: u8) -> Color {
    match (mode, corner) {
        (Mode::Sweet, 0) => color(Rgb::from_hex(0xec4899), 0.2),
        (Mode::Sweet, _) => color(Rgb::from_hex(0xf43f5e), 0.2),
        (Mode::Magic, 0) => color(Rgb::from_hex(0xfcd34d), 1.0),
        (Mode::Magic, _) => color(Rgb::from_hex(0xc084fc), 1.0),
    }
}

/// System: mute toggle, the magic banner (hidden) and the corner hearts
pub fn spawn_overlay(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands
        .spawn((
            MuteButton,
            Hitbox::new(MUTE_SIZE.x, MUTE_SIZE.y),
            Mesh2d(meshes.add(pill_mesh(MUTE_SIZE.x, MUTE_SIZE.y))),
            MeshMaterial2d(materials.add(ColorMaterial::from(Color::srgba(1.0, 1.0, 1.0, 0.2)))),
            Transform::from_xyz(0.0, 0.0, layer::CONTROLS),
        ))
        .with_children(|parent| {
            parent.spawn((
                MuteLabel,
                Text2d::new("SOUND"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Transform::from_xyz(0.0, 0.0, 0.1),
            ));
        });

    commands
        .spawn((
            MagicBanner::default(),
            Mesh2d(meshes.add(pill_mesh(BANNER_SIZE.x, BANNER_SIZE.y))),
            MeshMaterial2d(materials.add(ColorMaterial::from(Color::srgba(1.0, 1.0, 1.0, 0.1)))),
            Transform::from_xyz(0.0, 0.0, layer::BANNER),
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text2d::new("Love is Magic!"),
                TextFont {
                    font_size: 44.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Transform::from_xyz(0.0, 0.0, 0.1),
            ));
        });

    for corner in 0..2 {
        commands.spawn((
            CornerHeart { corner },
            Mesh2d(meshes.add(heart_mesh())),
            MeshMaterial2d(materials.add(ColorMaterial::from(corner_heart_color(Mode::Sweet, corner)))),
            Transform::from_xyz(0.0, 0.0, layer::BACKDROP + 5.0).with_scale(Vec3::splat(48.0)),
        ));
    }
}

/// System: pin the mute button and keep its label honest
pub fn update_mute_button(
    viewport: Res<Viewport>,
    session: Res<ProposalSession>,
    mut buttons: Query<&mut Transform, With<MuteButton>>,
    mut labels: Query<&mut Text2d, With<MuteLabel>>,
) {
    for mut transform in &mut buttons {
        *transform = viewport.place(
            24.0 + MUTE_SIZE.x * 0.5,
            viewport.height - 24.0 - MUTE_SIZE.y * 0.5,
            layer::CONTROLS,
        );
    }

    if !session.is_changed() {
        return;
    }
    let label = if session.is_muted() { "MUTED" } else { "SOUND" };
    for mut text in &mut labels {
        if text.0 != label {
            text.0 = label.to_string();
        }
    }
}

/// System: fade and zoom the banner in while the magic message is up
pub fn update_magic_banner(
    time: Res<Time>,
    viewport: Res<Viewport>,
    session: Res<ProposalSession>,
    mut banners: Query<(&mut MagicBanner, &mut Transform, &mut Visibility)>,
) {
    for (mut banner, mut transform, mut visibility) in &mut banners {
        if !session.magic_message_visible() {
            banner.shown_for = 0.0;
            *visibility = Visibility::Hidden;
            continue;
        }

        banner.shown_for += time.delta_secs();
        let k = ease_in_out_cubic((banner.shown_for / BANNER_IN_SECS).min(1.0));
        let center = viewport.bounds().center();
        *transform = viewport
            .place(center.x, center.y, layer::BANNER)
            .with_scale(Vec3::splat(0.9 + 0.1 * k));
        *visibility = Visibility::Visible;
    }
}

/// System: corner hearts pulse and follow the mode's colors
pub fn update_corner_hearts(
    time: Res<Time>,
    viewport: Res<Viewport>,
    session: Res<ProposalSession>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut hearts: Query<(&CornerHeart, &mut Transform, &MeshMaterial2d<ColorMaterial>)>,
) {
    let now = time.elapsed_secs();
    for (heart, mut transform, material) in &mut hearts {
        let (x, y, delay) = if heart.corner == 0 {
            (40.0 + 24.0, 40.0 + 24.0, 0.0)
        } else {
            (viewport.width - 64.0, viewport.height - 64.0, 0.7)
        };
        let scale = transform.scale;
        *transform = viewport.place(x, y, layer::BACKDROP + 5.0).with_scale(scale);

        if let Some(material) = materials.get_mut(&material.0) {
            let base = corner_heart_color(session.mode(), heart.corner);
            material.color = base.with_alpha(base.alpha() * pulse(now, delay));
        }
    }
}

/// System: crossfade the clear color when the mode changes
pub fn update_background(
    time: Res<Time>,
    session: Res<ProposalSession>,
    mut fade: ResMut<BackgroundFade>,
    mut clear_color: ResMut<ClearColor>,
) {
    fade.retarget(palette::background(session.mode()));
    clear_color.0 = fade.advance(time.delta_secs());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_fade() {
        let mut fade = BackgroundFade::default();
        assert_eq!(fade.advance(0.1), color(palette::background(Mode::Sweet), 1.0));

        fade.retarget(palette::background(Mode::Magic));
        let start = fade.advance(0.0);
        assert_eq!(start, color(palette::background(Mode::Sweet), 1.0));

        let end = fade.advance(BACKGROUND_FADE_SECS);
        assert_eq!(end, color(palette::background(Mode::Magic), 1.0));
    }

    #[test]
    fn test_retarget_same_color_keeps_progress() {
        let mut fade = BackgroundFade::default();
        fade.retarget(palette::background(Mode::Magic));
        fade.advance(1.0);
        fade.retarget(palette::background(Mode::Magic));
        assert_eq!(fade.elapsed, 1.0);
    }
}
