//! Sparkles, lanterns, shooting stars and the petal rain behind the card.

use bevy::prelude::*;

use crate::{
    camera::Viewport,
    decor::{Decorations, Frame, PetalKind, SHOOTING_STARS, palette},
    game::{Mode, ProposalSession},
    visual::{
        layer,
        utils::{apply_frame, color, heart_mesh},
    },
};

/// The backdrop dims while the celebration plays over it
const ACCEPTED_DIM: f32 = 0.6;

/// The generated decorations currently on screen
#[derive(Resource, Default)]
pub struct Backdrop {
    pub decorations: Option<Decorations>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackdropKind {
    Sparkle(usize),
    Lantern(usize),
    Petal(usize),
    ShootingStar(usize),
}

#[derive(Component, Debug, Clone, Copy)]
pub struct BackdropItem {
    pub kind: BackdropKind,
    /// Alpha at full opacity
    pub base_alpha: f32,
}

/// System: (re)generate the backdrop whenever the mode differs from what is shown
pub fn rebuild_backdrop(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut backdrop: ResMut<Backdrop>,
    session: Res<ProposalSession>,
    items: Query<Entity, With<BackdropItem>>,
) {
    let mode = session.mode();
    if backdrop.decorations.as_ref().is_some_and(|d| d.mode == mode) {
        return;
    }

    for entity in &items {
        commands.entity(entity).despawn();
    }

    let decorations = Decorations::generate(&mut rand::rng(), mode);
    spawn_items(&mut commands, &mut meshes, &mut materials, &decorations, mode);
    info!(
        "Backdrop generated for {:?} mode: {} sparkles, {} lanterns, {} petals",
        mode,
        decorations.sparkles.len(),
        decorations.lanterns.len(),
        decorations.petals.len()
    );
    backdrop.decorations = Some(decorations);
}

fn spawn_items(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<ColorMaterial>,
    decorations: &Decorations,
    mode: Mode,
) {
    let mut spawn = |kind: BackdropKind, mesh: Mesh, tint: Color, z: f32| {
        commands.spawn((
            BackdropItem {
                kind,
                base_alpha: tint.alpha(),
            },
            Mesh2d(meshes.add(mesh)),
            MeshMaterial2d(materials.add(ColorMaterial::from(tint.with_alpha(0.0)))),
            Transform::from_xyz(0.0, 0.0, z),
        ));
    };

    let sparkle = color(palette::sparkle_color(mode), 1.0);
    for s in &decorations.sparkles {
        spawn(
            BackdropKind::Sparkle(s.id),
            Circle::new(s.size * 0.5).mesh().build(),
            sparkle,
            layer::BACKDROP + 1.0,
        );
    }

    let (lantern_rgb, lantern_alpha) = palette::lantern_color(mode);
    for l in &decorations.lanterns {
        spawn(
            BackdropKind::Lantern(l.id),
            Rectangle::new(l.size, l.size * 1.4).mesh().build(),
            color(lantern_rgb, lantern_alpha),
            layer::BACKDROP + 2.0,
        );
    }

    for (i, _) in SHOOTING_STARS.iter().enumerate() {
        spawn(
            BackdropKind::ShootingStar(i),
            Rectangle::new(100.0, 2.0).mesh().build(),
            Color::WHITE,
            layer::BACKDROP + 3.0,
        );
    }

    let tints = palette::petal_colors(mode);
    for p in &decorations.petals {
        let mesh = match p.kind {
            PetalKind::Sakura => Ellipse::new(p.size * 0.5, p.size * 0.35).mesh().build(),
            PetalKind::Heart => heart_mesh().scaled_by(Vec3::splat(p.size)),
            PetalKind::Leaf => Ellipse::new(p.size * 0.2, p.size * 0.5).mesh().build(),
        };
        // Spread petals over a few depth slices so they overlap the card edges
        let z = layer::BACKDROP + 4.0 + (p.id % 4) as f32 * 0.01;
        spawn(BackdropKind::Petal(p.id), mesh, color(tints[p.color_index], 1.0), z);
    }
}

fn sample(decorations: &Decorations, kind: BackdropKind, time: f32, viewport: &Viewport) -> Option<Frame> {
    let bounds = viewport.bounds();
    match kind {
        BackdropKind::Sparkle(i) => decorations.sparkles.get(i).map(|s| s.sample(time, bounds)),
        BackdropKind::Lantern(i) => decorations.lanterns.get(i).map(|l| l.sample(time, bounds)),
        BackdropKind::Petal(i) => decorations.petals.get(i).map(|p| p.sample(time, bounds)),
        BackdropKind::ShootingStar(i) => SHOOTING_STARS.get(i).map(|s| s.sample(time, bounds)),
    }
}

/// System: move every backdrop item to its sampled frame
pub fn animate_backdrop(
    time: Res<Time>,
    viewport: Res<Viewport>,
    backdrop: Res<Backdrop>,
    session: Res<ProposalSession>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut items: Query<(&BackdropItem, &mut Transform, &MeshMaterial2d<ColorMaterial>)>,
) {
    let Some(decorations) = backdrop.decorations.as_ref() else {
        return;
    };
    let now = time.elapsed_secs();
    let dim = if session.is_accepted() { ACCEPTED_DIM } else { 1.0 };

    for (item, mut transform, material) in &mut items {
        let Some(frame) = sample(decorations, item.kind, now, &viewport) else {
            continue;
        };
        apply_frame(
            frame,
            &viewport,
            &mut transform,
            materials.get_mut(&material.0),
            item.base_alpha * dim,
        );
    }
}
