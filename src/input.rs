use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::prelude::*;
use bevy::window::CursorMoved;

use crate::evasion::Point;

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CursorPos>()
            .add_message::<PointerEvent>()
            .add_systems(PreUpdate, collect_pointer_events);
    }
}

#[derive(Message, Debug, Clone)]
pub struct PointerEvent {
    /// Window (logical) coordinates: pixels from top-left, y down
    pub position: Vec2,
    pub event_type: PointerEventType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventType {
    Down,
    Move,
    Up,
}

impl PointerEvent {
    pub fn point(&self) -> Point {
        Point::new(self.position.x, self.position.y)
    }
}

/// Last known mouse position, in window coordinates
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct CursorPos(pub Option<Vec2>);

/// Every cursor motion becomes a Move, pressed or not; presses and releases
/// are reported at the last known position.
fn collect_pointer_events(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut cursor: ResMut<CursorPos>,
    mut cursor_moves: MessageReader<CursorMoved>,
    mut touch_events: MessageReader<TouchInput>,
    mut out: MessageWriter<PointerEvent>,
) {
    for e in cursor_moves.read() {
        cursor.0 = Some(e.position);
        out.write(PointerEvent {
            position: e.position,
            event_type: PointerEventType::Move,
        });
    }

    if let Some(p) = cursor.0 {
        if mouse_buttons.just_pressed(MouseButton::Left) {
            out.write(PointerEvent {
                position: p,
                event_type: PointerEventType::Down,
            });
        }
        if mouse_buttons.just_released(MouseButton::Left) {
            out.write(PointerEvent {
                position: p,
                event_type: PointerEventType::Up,
            });
        }
    }

    for ev in touch_events.read() {
        let event_type = match ev.phase {
            TouchPhase::Started => PointerEventType::Down,
            TouchPhase::Moved => PointerEventType::Move,
            TouchPhase::Ended | TouchPhase::Canceled => PointerEventType::Up,
        };
        out.write(PointerEvent {
            position: ev.position,
            event_type,
        });
    }
}
