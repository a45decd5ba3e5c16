use bevy::ecs::query::QueryFilter;
use bevy::prelude::*;

use crate::{
    camera::Viewport,
    evasion::{Point, Reaction},
    game::ProposalSession,
    input::{PointerEvent, PointerEventType},
    visual::{
        Hitbox,
        card::{TitleText, YesButton},
        cues::Cue,
        no_button::NoButton,
        overlay::MuteButton,
    },
};

#[derive(Resource, Default)]
pub struct HoverState {
    pub yes_hovered: bool,
}

/// Is `p` inside any of the queried hitboxes?
fn over<F: QueryFilter>(viewport: &Viewport, query: &Query<(&Transform, &Hitbox), F>, p: Point) -> bool {
    query.iter().any(|(transform, hitbox)| {
        let center = viewport.to_viewport(transform.translation.truncate());
        hitbox.contains(center, p)
    })
}

/// System: route pointer input into the session
///
/// Moves drive the NO button and YES hover; presses hit mute, YES or the
/// title, in that order.
#[allow(clippy::too_many_arguments)]
pub fn handle_pointer_input(
    mut pointer_events: MessageReader<PointerEvent>,
    viewport: Res<Viewport>,
    mut session: ResMut<ProposalSession>,
    mut hover: ResMut<HoverState>,
    mut cues: MessageWriter<Cue>,
    no_buttons: Query<&NoButton>,
    yes_buttons: Query<(&Transform, &Hitbox), With<YesButton>>,
    titles: Query<(&Transform, &Hitbox), With<TitleText>>,
    mute_buttons: Query<(&Transform, &Hitbox), With<MuteButton>>,
) {
    let mut rng = rand::rng();

    for event in pointer_events.read() {
        let p = event.point();

        match event.event_type {
            PointerEventType::Move => {
                if let Ok(button) = no_buttons.single() {
                    let reaction =
                        session.pointer_moved(p, button.measured_box(), viewport.bounds(), &mut rng);
                    if let Reaction::Jumped(jump) = reaction {
                        debug!(
                            "NO jumped {} -> {} tilted {:.0}° (pointer {:.0}px -> {:.0}px)",
                            jump.from, jump.to, jump.rotation_deg, jump.distance_before, jump.distance_after
                        );
                    }
                }

                let on_yes = over(&viewport, &yes_buttons, p);
                if on_yes && !hover.yes_hovered && session.hover_yes() {
                    cues.write(Cue::YesHovered);
                }
                hover.yes_hovered = on_yes;
            }

            PointerEventType::Down => {
                if over(&viewport, &mute_buttons, p) {
                    let muted = session.toggle_mute();
                    info!("Sound {}", if muted { "muted" } else { "on" });
                    cues.write(Cue::MuteToggled { muted });
                } else if over(&viewport, &yes_buttons, p) {
                    if session.accept() {
                        hover.yes_hovered = false;
                        cues.write(Cue::Accepted);
                    }
                } else if over(&viewport, &titles, p) {
                    if let Some(tap) = session.tap_title() {
                        cues.write(Cue::TitleTapped { count: tap.count });
                        if tap.magic_unlocked {
                            cues.write(Cue::MagicUnlocked);
                        }
                    }
                }
            }

            PointerEventType::Up => {}
        }
    }
}
