use bevy::prelude::*;

mod audio;
mod camera;
mod decor;
mod evasion;
mod game;
mod input;
mod visual;

use audio::ProposalAudioPlugin;
use bevy::window::WindowResolution;
use camera::CameraPlugin;
use input::InputPlugin;

use crate::visual::plugin::ProposalPlugin;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Will You Be My Valentine?".into(),
            resolution: WindowResolution::new(1280, 800),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(CameraPlugin)
    .add_plugins(InputPlugin)
    .add_plugins(ProposalPlugin)
    .add_plugins(ProposalAudioPlugin);

    app.run();
}
