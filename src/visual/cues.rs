use bevy::prelude::*;

/// Something happened that other parts of the app (mostly audio) react to
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Pointer entered the YES button
    YesHovered,
    /// `count` is the progress towards the magic unlock
    TitleTapped { count: u32 },
    MagicUnlocked,
    Accepted,
    MuteToggled { muted: bool },
}
