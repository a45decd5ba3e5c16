use bevy::prelude::*;

use crate::{
    camera::Viewport,
    decor::palette,
    evasion::{Point, TargetBox},
    game::{Mode, ProposalSession},
    visual::{
        AskingScreen, layer,
        pose::{Pose, pose},
        utils::{color, ease_out_cubic, pill_mesh},
    },
};

const SIZE: Vec2 = Vec2::new(190.0, 96.0);
const BORDER: f32 = 4.0;
const GLIDE_SECS: f32 = 0.5;

/// Eased travel of the displayed anchor towards the controller's anchor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glide {
    from: Point,
    to: Point,
    elapsed: f32,
    duration: f32,
}

impl Glide {
    pub fn at(p: Point) -> Self {
        Self {
            from: p,
            to: p,
            elapsed: GLIDE_SECS,
            duration: GLIDE_SECS,
        }
    }

    pub fn target(&self) -> Point {
        self.to
    }

    /// Start a new glide from wherever the button is drawn right now
    pub fn retarget(&mut self, to: Point) {
        self.from = self.current();
        self.to = to;
        self.elapsed = 0.0;
    }

    pub fn advance(&mut self, delta: f32) {
        self.elapsed = (self.elapsed + delta).min(self.duration);
    }

    pub fn current(&self) -> Point {
        let k = ease_out_cubic((self.elapsed / self.duration.max(f32::EPSILON)).clamp(0.0, 1.0));
        Point::new(
            self.from.x + (self.to.x - self.from.x) * k,
            self.from.y + (self.to.y - self.from.y) * k,
        )
    }
}

/// The button that runs away
#[derive(Component, Debug, Clone)]
pub struct NoButton {
    pub size: Vec2,
    pub glide: Glide,
    /// Cosmetic pose applied on the last frame
    pub pose: Pose,
}

impl NoButton {
    /// Screen-aligned bounds of the button as drawn: glide anchor, pose
    /// offset, scale and tilt all included. Lags the controller while gliding.
    pub fn measured_box(&self) -> TargetBox {
        let anchor = self.glide.current();
        let center_x = anchor.x + self.size.x * 0.5 + self.pose.dx;
        let center_y = anchor.y + self.size.y * 0.5 + self.pose.dy;

        let (sin, cos) = self.pose.rotation_deg.to_radians().sin_cos();
        let (sin, cos) = (sin.abs(), cos.abs());
        let w = self.size.x * self.pose.scale;
        let h = self.size.y * self.pose.scale;
        let width = w * cos + h * sin;
        let height = w * sin + h * cos;

        TargetBox::new(center_x - width * 0.5, center_y - height * 0.5, width, height)
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoButtonPart {
    Border,
    Fill,
    Label,
}

pub fn no_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Sweet => "NO",
        Mode::Magic => "MAYBE?",
    }
}

/// Spawned hidden; shown once the controller has been placed
pub fn spawn_no_button(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<ColorMaterial>,
    mode: Mode,
) {
    let (fill, label, border) = palette::declinable(mode);

    commands
        .spawn((
            NoButton {
                size: SIZE,
                glide: Glide::at(Point::default()),
                pose: Pose::rest(0.0),
            },
            AskingScreen,
            Transform::from_xyz(0.0, 0.0, layer::NO_BUTTON),
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            parent.spawn((
                NoButtonPart::Border,
                Mesh2d(meshes.add(pill_mesh(SIZE.x, SIZE.y))),
                MeshMaterial2d(materials.add(ColorMaterial::from(color(border, 1.0)))),
                Transform::from_xyz(0.0, 0.0, 0.0),
            ));
            parent.spawn((
                NoButtonPart::Fill,
                Mesh2d(meshes.add(pill_mesh(SIZE.x - BORDER * 2.0, SIZE.y - BORDER * 2.0))),
                MeshMaterial2d(materials.add(ColorMaterial::from(color(fill, 0.95)))),
                Transform::from_xyz(0.0, 0.0, 0.1),
            ));
            parent.spawn((
                NoButtonPart::Label,
                Text2d::new(no_label(mode)),
                TextFont {
                    font_size: 30.0,
                    ..default()
                },
                TextColor(color(label, 1.0)),
                Transform::from_xyz(0.0, 0.0, 0.2),
            ));
        });
}

/// System: place the controller once the window has a real size
pub fn place_no_button(
    viewport: Res<Viewport>,
    mut session: ResMut<ProposalSession>,
    mut buttons: Query<(&mut NoButton, &mut Visibility)>,
) {
    let ready = session.target().is_some_and(|t| t.is_initialized());
    if ready || viewport.bounds().is_empty() {
        return;
    }

    if !session.initialize_target(viewport.bounds()) {
        return;
    }

    let Some(anchor) = session.target().map(|t| t.position()) else {
        return;
    };
    for (mut button, mut visibility) in &mut buttons {
        button.glide = Glide::at(anchor);
        *visibility = Visibility::Visible;
    }
    info!("NO button placed at {}", anchor);
}

/// System: follow the controller's anchor and play the cosmetic pose
pub fn animate_no_button(
    time: Res<Time>,
    viewport: Res<Viewport>,
    session: Res<ProposalSession>,
    mut buttons: Query<(&mut NoButton, &mut Transform)>,
) {
    let Some(target) = session.target() else {
        return;
    };
    if !target.is_initialized() {
        return;
    }

    for (mut button, mut transform) in &mut buttons {
        if button.glide.target() != target.position() {
            button.glide.retarget(target.position());
        }
        button.glide.advance(time.delta_secs());

        let anchor = button.glide.current();
        let p = pose(
            target.animation(),
            target.rotation_deg(),
            time.elapsed_secs(),
            target.bounce_elapsed(),
            target.tuning().bounce_secs,
        );

        let center_x = anchor.x + button.size.x * 0.5 + p.dx;
        let center_y = anchor.y + button.size.y * 0.5 + p.dy;
        *transform = viewport
            .place(center_x, center_y, layer::NO_BUTTON)
            .with_rotation(Quat::from_rotation_z(-p.rotation_deg.to_radians()))
            .with_scale(Vec3::splat(p.scale));
        button.pose = p;
    }
}

/// System: recolor and relabel on a mode switch
pub fn theme_no_button(
    session: Res<ProposalSession>,
    mut last_mode: Local<Option<Mode>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut parts: Query<(
        &NoButtonPart,
        Option<&MeshMaterial2d<ColorMaterial>>,
        Option<&mut Text2d>,
        Option<&mut TextColor>,
    )>,
) {
    let mode = session.mode();
    if *last_mode == Some(mode) {
        return;
    }
    *last_mode = Some(mode);

    let (fill, label, border) = palette::declinable(mode);
    for (part, material, text, text_color) in &mut parts {
        match part {
            NoButtonPart::Border | NoButtonPart::Fill => {
                let (rgb, alpha) = if *part == NoButtonPart::Border {
                    (border, 1.0)
                } else {
                    (fill, 0.95)
                };
                if let Some(material) = material.and_then(|m| materials.get_mut(&m.0)) {
                    material.color = color(rgb, alpha);
                }
            }
            NoButtonPart::Label => {
                if let Some(mut text) = text {
                    text.0 = no_label(mode).to_string();
                }
                if let Some(mut text_color) = text_color {
                    text_color.0 = color(label, 1.0);
                }
            }
        }
    }
}
