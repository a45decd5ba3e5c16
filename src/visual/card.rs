use bevy::prelude::*;

use crate::{
    camera::Viewport,
    decor::palette,
    game::{Mode, ProposalSession},
    visual::{
        AskingScreen, Hitbox,
        cues::Cue,
        layer,
        no_button::spawn_no_button,
        pointer::HoverState,
        pose::bounce_lift,
        utils::{color, heart_mesh, pill_mesh},
    },
};

const PANEL_SIZE: Vec2 = Vec2::new(460.0, 440.0);
const HEART_SIZE: f32 = 80.0;
const TITLE_FONT: f32 = 40.0;
const YES_SIZE: Vec2 = Vec2::new(200.0, 72.0);

/// Fixed spot on the card, as an offset from the viewport center (y down)
#[derive(Component, Debug, Clone, Copy)]
pub struct CardSlot {
    pub offset: Vec2,
    pub z: f32,
}

#[derive(Component)]
pub struct CardHeart;

#[derive(Component)]
pub struct TitleText;

#[derive(Component)]
pub struct YesButton;

/// Which palette entry an asking-screen element is painted with
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    Panel,
    Accent,
    Title,
    AccentLabel,
}

impl Tint {
    fn color(self, mode: Mode) -> Color {
        match self {
            Tint::Panel => Color::srgba(1.0, 1.0, 1.0, 0.4),
            Tint::Accent => color(palette::accent(mode), 1.0),
            Tint::Title => color(palette::title(mode), 1.0),
            Tint::AccentLabel => Color::WHITE,
        }
    }
}

/// System: build the asking screen (card, heart, title, YES and the NO button)
pub fn spawn_asking_screen(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    session: Res<ProposalSession>,
) {
    let mode = session.mode();

    commands.spawn((
        AskingScreen,
        CardSlot {
            offset: Vec2::ZERO,
            z: layer::CARD,
        },
        Tint::Panel,
        Mesh2d(meshes.add(Rectangle::new(PANEL_SIZE.x, PANEL_SIZE.y))),
        MeshMaterial2d(materials.add(ColorMaterial::from(Tint::Panel.color(mode)))),
        Transform::default(),
    ));

    commands.spawn((
        AskingScreen,
        CardHeart,
        CardSlot {
            offset: Vec2::new(0.0, -120.0),
            z: layer::CARD + 1.0,
        },
        Tint::Accent,
        Mesh2d(meshes.add(heart_mesh())),
        MeshMaterial2d(materials.add(ColorMaterial::from(Tint::Accent.color(mode)))),
        Transform::from_scale(Vec3::splat(HEART_SIZE * 1.25)),
    ));

    commands.spawn((
        AskingScreen,
        TitleText,
        CardSlot {
            offset: Vec2::new(0.0, 0.0),
            z: layer::CARD + 1.0,
        },
        Tint::Title,
        Hitbox::new(PANEL_SIZE.x - 40.0, TITLE_FONT * 1.6),
        Text2d::new("Will you be my Valentine?"),
        TextFont {
            font_size: TITLE_FONT,
            ..default()
        },
        TextColor(Tint::Title.color(mode)),
        Transform::default(),
    ));

    commands
        .spawn((
            AskingScreen,
            YesButton,
            CardSlot {
                offset: Vec2::new(-90.0, 120.0),
                z: layer::CARD + 2.0,
            },
            Tint::Accent,
            Hitbox::new(YES_SIZE.x, YES_SIZE.y),
            Mesh2d(meshes.add(pill_mesh(YES_SIZE.x, YES_SIZE.y))),
            MeshMaterial2d(materials.add(ColorMaterial::from(Tint::Accent.color(mode)))),
            Transform::default(),
        ))
        .with_children(|parent| {
            parent.spawn((
                Tint::AccentLabel,
                Text2d::new("YES"),
                TextFont {
                    font_size: 28.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Transform::from_xyz(0.0, 0.0, 0.1),
            ));
        });

    spawn_no_button(&mut commands, &mut meshes, &mut materials, mode);

    info!("Asking screen ready ({:?} mode)", mode);
}

/// When the current title hop started. Every tap restarts it; it clears once
/// the session stops bouncing.
fn title_bounce_start(previous: Option<f32>, bouncing: bool, tapped: bool, now: f32) -> Option<f32> {
    match (bouncing, tapped) {
        (false, _) => None,
        (true, true) => Some(now),
        (true, false) => previous.or(Some(now)),
    }
}

/// System: keep the card centered and play its small animations
pub fn animate_card(
    time: Res<Time>,
    viewport: Res<Viewport>,
    session: Res<ProposalSession>,
    hover: Res<HoverState>,
    mut cues: MessageReader<Cue>,
    mut bounce_started: Local<Option<f32>>,
    mut slots: Query<(
        &CardSlot,
        &mut Transform,
        Has<CardHeart>,
        Has<TitleText>,
        Has<YesButton>,
    )>,
) {
    let now = time.elapsed_secs();
    let center = viewport.bounds().center();

    let last_tap = cues.read().fold(None, |last, cue| match cue {
        Cue::TitleTapped { count } => Some(*count),
        _ => last,
    });
    if let Some(count) = last_tap {
        debug!("Title tapped ({} towards magic)", count);
    }
    *bounce_started = title_bounce_start(*bounce_started, session.title_bouncing(), last_tap.is_some(), now);

    for (slot, mut transform, is_heart, is_title, is_yes) in &mut slots {
        let mut y = center.y + slot.offset.y;
        let mut scale = Vec3::ONE;

        if is_heart {
            y -= HEART_SIZE * bounce_lift(now);
            scale = Vec3::splat(HEART_SIZE * 1.25);
        }
        if is_title {
            if let Some(start) = *bounce_started {
                y -= TITLE_FONT * bounce_lift(now - start);
            }
        }
        if is_yes && hover.yes_hovered {
            y -= 6.0;
            scale = Vec3::splat(1.05);
        }

        *transform = viewport
            .place(center.x + slot.offset.x, y, slot.z)
            .with_scale(scale);
    }
}

/// System: repaint the card when the mode changes
pub fn theme_card(
    session: Res<ProposalSession>,
    mut last_mode: Local<Option<Mode>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut tinted: Query<(
        &Tint,
        Option<&MeshMaterial2d<ColorMaterial>>,
        Option<&mut TextColor>,
    )>,
) {
    let mode = session.mode();
    if *last_mode == Some(mode) {
        return;
    }
    *last_mode = Some(mode);

    for (tint, material, text_color) in &mut tinted {
        let c = tint.color(mode);
        if let Some(material) = material.and_then(|m| materials.get_mut(&m.0)) {
            material.color = c;
        }
        if let Some(mut text_color) = text_color {
            text_color.0 = c;
        }
    }
}

/// System: tear the asking screen down once YES has been pressed
pub fn despawn_asking_screen(
    mut commands: Commands,
    session: Res<ProposalSession>,
    screen: Query<Entity, With<AskingScreen>>,
) {
    if !session.is_accepted() || screen.is_empty() {
        return;
    }

    let mut count = 0;
    for entity in &screen {
        commands.entity(entity).despawn();
        count += 1;
    }
    info!("Asking screen removed ({} entities)", count);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_tap_restarts_title_hop() {
        let start = title_bounce_start(None, true, true, 1.0);
        assert_eq!(start, Some(1.0));

        // Still hopping from the first tap
        assert_eq!(title_bounce_start(start, true, false, 1.2), Some(1.0));

        // A second tap mid-hop starts over
        assert_eq!(title_bounce_start(start, true, true, 1.3), Some(1.3));
    }

    #[test]
    fn test_title_hop_clears_when_session_stops() {
        assert_eq!(title_bounce_start(Some(1.0), false, false, 2.0), None);
        assert_eq!(title_bounce_start(Some(1.0), false, true, 2.0), None);
    }
}
