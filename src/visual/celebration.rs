//! Everything spawned when YES is pressed: confetti, floating hearts,
//! shimmer, the "Yay!" headline and the closing curtain.

use bevy::prelude::*;

use crate::{
    camera::Viewport,
    decor::{CelebrationScene, ConfettiShape, Curtain, Rgb},
    game::ProposalSession,
    visual::{
        layer,
        pose::{bounce_lift, pulse},
        utils::{apply_frame, color, heart_mesh, star_mesh},
    },
};

const HEART_TINT: Rgb = Rgb::from_hex(0xfb7185);
const STAR_TINT: Rgb = Rgb::from_hex(0xfde047);
const CAPTION_TINT: Rgb = Rgb::from_hex(0xfda4af);

/// The running celebration, present once the proposal has been accepted
#[derive(Resource)]
pub struct Celebration {
    pub scene: CelebrationScene,
    pub started_at: f32,
    pub ending_started_at: Option<f32>,
}

impl Celebration {
    pub fn elapsed(&self, now: f32) -> f32 {
        now - self.started_at
    }

    /// Curtain state right now (fully open before the ending begins)
    pub fn curtain(&self, now: f32) -> Curtain {
        Curtain::at(self.ending_started_at.map_or(0.0, |start| now - start))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    Confetti(usize),
    Heart(usize),
    Shimmer(usize),
}

#[derive(Component, Debug, Clone, Copy)]
pub struct CelebrationPiece {
    pub kind: PieceKind,
    pub base_alpha: f32,
}

/// Headline, subtitle and star row; zooms out and fades with the curtain
#[derive(Component, Debug, Clone, Copy)]
pub struct CelebrationContent {
    /// Offset from the viewport center, viewport pixels (y down)
    pub offset: Vec2,
    pub role: ContentRole,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContentRole {
    Headline,
    Subtitle,
    Star { delay: f32 },
}

#[derive(Component)]
pub struct CurtainOverlay;

#[derive(Component)]
pub struct CurtainCaption;

fn confetti_mesh(shape: ConfettiShape, size: f32) -> Mesh {
    match shape {
        ConfettiShape::Square => Rectangle::new(size, size).mesh().build(),
        ConfettiShape::Circle => Circle::new(size * 0.5).mesh().build(),
        ConfettiShape::Triangle => Triangle2d::new(
            Vec2::new(0.0, size * 0.5),
            Vec2::new(-size * 0.5, -size * 0.5),
            Vec2::new(size * 0.5, -size * 0.5),
        )
        .mesh()
        .build(),
        ConfettiShape::Heart => heart_mesh().scaled_by(Vec3::splat(size)),
        ConfettiShape::Star => star_mesh().scaled_by(Vec3::splat(size)),
    }
}

/// System: start the celebration the frame the proposal is accepted
pub fn spawn_celebration(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    time: Res<Time>,
    session: Res<ProposalSession>,
    existing: Option<Res<Celebration>>,
) {
    if !session.is_accepted() || existing.is_some() {
        return;
    }

    let scene = CelebrationScene::generate(&mut rand::rng());

    let mut spawn_piece = |kind: PieceKind, mesh: Mesh, tint: Color, z: f32| {
        commands.spawn((
            CelebrationPiece {
                kind,
                base_alpha: tint.alpha(),
            },
            Mesh2d(meshes.add(mesh)),
            MeshMaterial2d(materials.add(ColorMaterial::from(tint.with_alpha(0.0)))),
            Transform::from_xyz(0.0, 0.0, z),
        ));
    };

    for h in &scene.hearts {
        spawn_piece(
            PieceKind::Heart(h.id),
            heart_mesh().scaled_by(Vec3::splat(h.size)),
            color(HEART_TINT, 0.3),
            layer::CELEBRATION,
        );
    }
    for s in &scene.shimmers {
        spawn_piece(
            PieceKind::Shimmer(s.id),
            Circle::new(2.0).mesh().build(),
            Color::WHITE,
            layer::CELEBRATION + 0.5,
        );
    }
    for c in &scene.confetti {
        spawn_piece(
            PieceKind::Confetti(c.id),
            confetti_mesh(c.shape, c.size),
            color(c.color, 1.0),
            layer::CONFETTI + (c.id % 8) as f32 * 0.01,
        );
    }

    let text = |value: &str, size: f32, tint: Color| {
        (
            Text2d::new(value),
            TextFont {
                font_size: size,
                ..default()
            },
            TextColor(tint),
        )
    };

    commands.spawn((
        CelebrationContent {
            offset: Vec2::new(0.0, -160.0),
            role: ContentRole::Headline,
        },
        text("Yay! I love you!", 72.0, Color::WHITE),
        Transform::from_xyz(0.0, 0.0, layer::CELEBRATION + 2.0),
    ));
    commands.spawn((
        CelebrationContent {
            offset: Vec2::new(0.0, 40.0),
            role: ContentRole::Subtitle,
        },
        text("Best Valentine's Ever!", 48.0, Color::WHITE),
        Transform::from_xyz(0.0, 0.0, layer::CELEBRATION + 2.0),
    ));
    for i in 1..=5 {
        commands.spawn((
            CelebrationContent {
                offset: Vec2::new((i as f32 - 3.0) * 64.0, 140.0),
                role: ContentRole::Star { delay: i as f32 * 0.2 },
            },
            Mesh2d(meshes.add(star_mesh())),
            MeshMaterial2d(materials.add(ColorMaterial::from(color(STAR_TINT, 1.0)))),
            Transform::from_xyz(0.0, 0.0, layer::CELEBRATION + 2.0).with_scale(Vec3::splat(32.0)),
        ));
    }

    commands.spawn((
        CurtainOverlay,
        Mesh2d(meshes.add(Rectangle::new(1.0, 1.0))),
        MeshMaterial2d(materials.add(ColorMaterial::from(Color::srgba(0.0, 0.0, 0.0, 0.0)))),
        Transform::from_xyz(0.0, 0.0, layer::CURTAIN),
    ));
    commands.spawn((
        CurtainCaption,
        text("Forever Together.", 40.0, color(CAPTION_TINT, 0.0)),
        Transform::from_xyz(0.0, 0.0, layer::CURTAIN + 1.0),
    ));

    info!(
        "Celebration started: {} confetti, {} hearts, {} shimmers",
        scene.confetti.len(),
        scene.hearts.len(),
        scene.shimmers.len()
    );
    commands.insert_resource(Celebration {
        scene,
        started_at: time.elapsed_secs(),
        ending_started_at: None,
    });
}

/// System: confetti, hearts and shimmer; spent one-shot confetti is despawned
pub fn animate_celebration_pieces(
    mut commands: Commands,
    time: Res<Time>,
    viewport: Res<Viewport>,
    celebration: Option<Res<Celebration>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut pieces: Query<(Entity, &CelebrationPiece, &mut Transform, &MeshMaterial2d<ColorMaterial>)>,
) {
    let Some(celebration) = celebration else {
        return;
    };
    let now = time.elapsed_secs();
    let t = celebration.elapsed(now);
    let bounds = viewport.bounds();
    let scene = &celebration.scene;

    for (entity, piece, mut transform, material) in &mut pieces {
        let frame = match piece.kind {
            PieceKind::Confetti(i) => match scene.confetti.get(i) {
                Some(c) if c.is_spent(t) => {
                    commands.entity(entity).despawn();
                    continue;
                }
                Some(c) => c.sample(t, bounds),
                None => continue,
            },
            PieceKind::Heart(i) => match scene.hearts.get(i) {
                Some(h) => h.sample(t, bounds),
                None => continue,
            },
            PieceKind::Shimmer(i) => match scene.shimmers.get(i) {
                Some(s) => s.sample(t, bounds),
                None => continue,
            },
        };
        apply_frame(
            frame,
            &viewport,
            &mut transform,
            materials.get_mut(&material.0),
            piece.base_alpha,
        );
    }
}

/// System: headline bounce, subtitle and star pulse, and the zoom-out under the curtain
pub fn animate_celebration_content(
    time: Res<Time>,
    viewport: Res<Viewport>,
    celebration: Option<Res<Celebration>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut content: Query<(
        &CelebrationContent,
        &mut Transform,
        Option<&mut TextColor>,
        Option<&MeshMaterial2d<ColorMaterial>>,
    )>,
) {
    let Some(celebration) = celebration else {
        return;
    };
    let now = time.elapsed_secs();
    let curtain = celebration.curtain(now);
    let center = viewport.bounds().center();

    for (item, mut transform, text_color, material) in &mut content {
        let (lift, opacity) = match item.role {
            ContentRole::Headline => (72.0 * bounce_lift(now), 1.0),
            ContentRole::Subtitle => (0.0, pulse(now, 0.0)),
            ContentRole::Star { delay } => (0.0, pulse(now, delay)),
        };

        // Everything shrinks towards the screen center as the curtain closes
        let offset = item.offset * curtain.content_scale;
        *transform = viewport.place(
            center.x + offset.x,
            center.y + offset.y - lift * curtain.content_scale,
            transform.translation.z,
        );
        transform.scale = if matches!(item.role, ContentRole::Star { .. }) {
            Vec3::splat(32.0 * curtain.content_scale)
        } else {
            Vec3::splat(curtain.content_scale)
        };

        let alpha = opacity * curtain.content_opacity;
        if let Some(mut text_color) = text_color {
            text_color.0.set_alpha(alpha);
        }
        if let Some(material) = material.and_then(|m| materials.get_mut(&m.0)) {
            material.color.set_alpha(alpha);
        }
    }
}

/// System: start the ending once the session says so, then close the curtain
pub fn animate_curtain(
    time: Res<Time>,
    viewport: Res<Viewport>,
    session: Res<ProposalSession>,
    celebration: Option<ResMut<Celebration>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut overlay: Query<(&mut Transform, &MeshMaterial2d<ColorMaterial>), With<CurtainOverlay>>,
    mut caption: Query<(&mut Transform, &mut TextColor), (With<CurtainCaption>, Without<CurtainOverlay>)>,
) {
    let Some(mut celebration) = celebration else {
        return;
    };
    let now = time.elapsed_secs();

    if session.celebration_ending() && celebration.ending_started_at.is_none() {
        celebration.ending_started_at = Some(now);
        info!("Curtain closing");
    }

    let curtain = celebration.curtain(now);
    let center = viewport.bounds().center();

    for (mut transform, material) in &mut overlay {
        *transform = viewport
            .place(center.x, center.y, layer::CURTAIN)
            .with_scale(Vec3::new(viewport.width, viewport.height, 1.0));
        if let Some(material) = materials.get_mut(&material.0) {
            material.color.set_alpha(curtain.overlay);
        }
    }

    for (mut transform, mut text_color) in &mut caption {
        *transform = viewport
            .place(center.x, center.y, layer::CURTAIN + 1.0)
            .with_scale(Vec3::splat(curtain.caption_scale));
        text_color.0.set_alpha(curtain.caption_opacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_curtain_waits_for_ending() {
        let mut celebration = Celebration {
            scene: CelebrationScene::generate(&mut StdRng::seed_from_u64(1)),
            started_at: 10.0,
            ending_started_at: None,
        };
        assert_eq!(celebration.curtain(30.0).overlay, 0.0);
        assert_eq!(celebration.elapsed(12.5), 2.5);

        celebration.ending_started_at = Some(12.0);
        assert_eq!(celebration.curtain(12.0).overlay, 0.0);
        assert_eq!(celebration.curtain(20.0).overlay, 1.0);
    }
}
