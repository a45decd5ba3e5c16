use crate::decor::palette;
use crate::game::{Mode, ProposalConfig, ProposalSession};
use crate::visual::backdrop::{Backdrop, animate_backdrop, rebuild_backdrop};
use crate::visual::card::{animate_card, despawn_asking_screen, spawn_asking_screen, theme_card};
use crate::visual::celebration::{
    animate_celebration_content, animate_celebration_pieces, animate_curtain, spawn_celebration,
};
use crate::visual::cues::Cue;
use crate::visual::no_button::{animate_no_button, place_no_button, theme_no_button};
use crate::visual::overlay::{
    BackgroundFade, spawn_overlay, update_background, update_corner_hearts, update_magic_banner,
    update_mute_button,
};
use crate::visual::pointer::{HoverState, handle_pointer_input};
use crate::visual::utils::color;
use bevy::prelude::*;

pub struct ProposalPlugin;

impl Plugin for ProposalPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ProposalSession>()
            .init_resource::<HoverState>()
            .init_resource::<Backdrop>()
            .init_resource::<BackgroundFade>()
            .insert_resource(ClearColor(color(palette::background(Mode::Sweet), 1.0)))
            .add_message::<Cue>()
            // Config first so the screen is built with the final tuning
            .add_systems(
                Startup,
                (load_proposal_config, spawn_asking_screen, spawn_overlay).chain(),
            )
            .add_systems(
                Update,
                (
                    tick_session,
                    // Asking screen
                    (
                        place_no_button,
                        handle_pointer_input,
                        animate_no_button,
                        theme_no_button,
                        animate_card,
                        theme_card,
                        despawn_asking_screen,
                    )
                        .chain(),
                    // Celebration
                    (
                        spawn_celebration,
                        animate_celebration_pieces,
                        animate_celebration_content,
                        animate_curtain,
                    )
                        .chain(),
                    // Backdrop and overlay
                    (
                        rebuild_backdrop,
                        animate_backdrop,
                        update_mute_button,
                        update_magic_banner,
                        update_corner_hearts,
                        update_background,
                    )
                        .chain(),
                )
                    .chain(),
            );
    }
}

/// Replace the default session with one built from the bundled config
fn load_proposal_config(mut commands: Commands) {
    let config = match ProposalConfig::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("Falling back to built-in proposal config: {}", e);
            ProposalConfig::default()
        }
    };
    info!(
        "Proposal config loaded: magic after {} taps, ending after {:.1}s",
        config.magic_tap_goal, config.timing.ending_delay_secs
    );
    commands.insert_resource(ProposalSession::new(config));
}

/// Advance session timers and the music ramp by frame time
fn tick_session(time: Res<Time>, mut session: ResMut<ProposalSession>) {
    let outcome = session.tick(time.delta_secs());
    for task in &outcome.fired {
        debug!("Cosmetic task fired: {:?} ({} pending)", task, session.pending_timers());
    }
    if let Some(volume) = outcome.music_volume {
        debug!("Music volume {:.2}", volume);
    }
}
