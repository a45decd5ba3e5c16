//! Music and sound effects.
//!
//! Every clip is optional: a missing or undecodable file only produces the
//! asset server's own error line and the app carries on in silence.

use bevy::audio::{AudioSinkPlayback, PlaybackMode, Volume};
use bevy::prelude::*;

use crate::game::ProposalSession;
use crate::visual::cues::Cue;

pub struct ProposalAudioPlugin;

impl Plugin for ProposalAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_sounds)
            .add_systems(Update, (play_cues, fade_music, apply_mute).chain());
    }
}

#[derive(Resource)]
pub struct SoundBank {
    pub music: Handle<AudioSource>,
    pub chime: Handle<AudioSource>,
    pub hover: Handle<AudioSource>,
    pub celebration: Handle<AudioSource>,
    pub magic: Handle<AudioSource>,
}

/// Looping background track, started on accept
#[derive(Component)]
pub struct Music;

/// One-shot effect and the volume it was started at
#[derive(Component)]
pub struct SoundEffect(pub f32);

fn load_sounds(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(SoundBank {
        music: asset_server.load("audio/music.ogg"),
        chime: asset_server.load("audio/chime.ogg"),
        hover: asset_server.load("audio/hover.ogg"),
        celebration: asset_server.load("audio/celebration.ogg"),
        magic: asset_server.load("audio/magic.ogg"),
    });
}

fn play_effect(commands: &mut Commands, clip: &Handle<AudioSource>, volume: f32, muted: bool) {
    commands.spawn((
        SoundEffect(volume),
        AudioPlayer::new(clip.clone()),
        PlaybackSettings {
            mode: PlaybackMode::Despawn,
            volume: Volume::Linear(if muted { 0.0 } else { volume }),
            ..default()
        },
    ));
}

/// System: turn session cues into sounds
fn play_cues(
    mut commands: Commands,
    mut cues: MessageReader<Cue>,
    bank: Option<Res<SoundBank>>,
    session: Res<ProposalSession>,
    music: Query<(), With<Music>>,
) {
    let Some(bank) = bank else {
        cues.clear();
        return;
    };
    let audio = &session.config().audio;
    let muted = session.is_muted();

    for cue in cues.read() {
        match cue {
            Cue::YesHovered => play_effect(&mut commands, &bank.hover, audio.hover_volume, muted),
            Cue::MagicUnlocked => play_effect(&mut commands, &bank.magic, audio.magic_volume, muted),
            Cue::Accepted => {
                play_effect(&mut commands, &bank.chime, audio.chime_volume, muted);
                play_effect(&mut commands, &bank.celebration, audio.celebration_volume, muted);
                if music.is_empty() {
                    commands.spawn((
                        Music,
                        AudioPlayer::new(bank.music.clone()),
                        PlaybackSettings {
                            mode: PlaybackMode::Loop,
                            volume: Volume::Linear(0.0),
                            ..default()
                        },
                    ));
                    debug!("Music started");
                }
            }
            Cue::TitleTapped { .. } | Cue::MuteToggled { .. } => {}
        }
    }
}

/// System: follow the session's fade-in ramp
fn fade_music(session: Res<ProposalSession>, mut sinks: Query<&mut AudioSink, With<Music>>) {
    let volume = if session.is_muted() { 0.0 } else { session.music_volume() };
    for mut sink in &mut sinks {
        sink.set_volume(Volume::Linear(volume));
    }
}

/// System: silence or restore effects that are already playing
fn apply_mute(
    mut cues: MessageReader<Cue>,
    mut effects: Query<(&SoundEffect, &mut AudioSink)>,
) {
    let Some(muted) = cues.read().fold(None, |last, cue| match cue {
        Cue::MuteToggled { muted } => Some(*muted),
        _ => last,
    }) else {
        return;
    };

    for (effect, mut sink) in &mut effects {
        sink.set_volume(Volume::Linear(if muted { 0.0 } else { effect.0 }));
    }
}
