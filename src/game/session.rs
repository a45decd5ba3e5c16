// game/session.rs

use super::audio_fade::FadeRamp;
use super::config::ProposalConfig;
use super::tap_counter::TapCounter;
use super::timers::{CosmeticTask, CosmeticTimers, TaskId, TaskScope};
use crate::evasion::{EvasiveTarget, Point, Reaction, TargetBox, ViewportBounds};
use bevy::prelude::Resource;
use rand::Rng;

/// Visual theme. Magic is the easter egg and never switches back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Mode {
    #[default]
    Sweet,
    Magic,
}

impl Mode {
    pub fn is_magic(self) -> bool {
        self == Mode::Magic
    }
}

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Asking,
    Accepted,
}

/// Result of tapping the title
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleTap {
    /// Taps counted towards the next unlock (0 right after an unlock)
    pub count: u32,
    /// This tap switched the card into magic mode
    pub magic_unlocked: bool,
}

/// What happened during one `tick`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    pub fired: Vec<CosmeticTask>,
    /// New music volume when the fade-in stepped this frame
    pub music_volume: Option<f32>,
}

/// The whole proposal screen state - one owner, pure transitions.
///
/// Bevy systems call the mutation methods with input and read the query
/// methods to decide what to draw or play.
#[derive(Debug, Clone, Resource)]
pub struct ProposalSession {
    config: ProposalConfig,
    phase: Phase,
    mode: Mode,
    muted: bool,
    magic_message_visible: bool,
    title_bouncing: bool,
    celebration_ending: bool,
    /// Dropped when the asking screen is torn down
    target: Option<EvasiveTarget>,
    taps: TapCounter,
    timers: CosmeticTimers,
    /// The pending end of the current title hop, replaced on every tap
    title_bounce_task: Option<TaskId>,
    music: FadeRamp,
}

impl ProposalSession {
    pub fn new(config: ProposalConfig) -> Self {
        let audio = &config.audio;
        ProposalSession {
            target: Some(EvasiveTarget::new(config.evasion.clone())),
            taps: TapCounter::new(config.magic_tap_goal),
            timers: CosmeticTimers::new(),
            title_bounce_task: None,
            music: FadeRamp::new(audio.music_step, audio.music_step_secs, audio.music_target),
            phase: Phase::Asking,
            mode: Mode::Sweet,
            muted: false,
            magic_message_visible: false,
            title_bouncing: false,
            celebration_ending: false,
            config,
        }
    }

    // === Query Methods (for Bevy systems to read state) ===

    pub fn config(&self) -> &ProposalConfig {
        &self.config
    }

    pub fn is_accepted(&self) -> bool {
        self.phase == Phase::Accepted
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn magic_message_visible(&self) -> bool {
        self.magic_message_visible
    }

    pub fn title_bouncing(&self) -> bool {
        self.title_bouncing
    }

    pub fn celebration_ending(&self) -> bool {
        self.celebration_ending
    }

    /// The evading button, while the asking screen exists
    pub fn target(&self) -> Option<&EvasiveTarget> {
        self.target.as_ref()
    }

    pub fn music_volume(&self) -> f32 {
        self.music.volume()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    // === Mutation Methods (for handling input) ===

    /// First geometry measurement of the evading button
    pub fn initialize_target(&mut self, viewport: ViewportBounds) -> bool {
        match self.target.as_mut() {
            Some(target) => target.initialize(viewport),
            None => false,
        }
    }

    pub fn pointer_moved(
        &mut self,
        pointer: Point,
        measured: TargetBox,
        viewport: ViewportBounds,
        rng: &mut impl Rng,
    ) -> Reaction {
        match self.target.as_mut() {
            Some(target) => target.on_pointer_move(pointer, measured, viewport, rng),
            None => Reaction::Ignored,
        }
    }

    /// Count a title tap; unlocks magic mode on the goal-th tap
    pub fn tap_title(&mut self) -> Option<TitleTap> {
        if self.is_accepted() {
            return None;
        }

        self.title_bouncing = true;
        if let Some(id) = self.title_bounce_task.take() {
            self.timers.cancel(id);
        }
        self.title_bounce_task = Some(self.timers.schedule(
            CosmeticTask::EndTitleBounce,
            self.config.timing.title_bounce_secs,
            TaskScope::Asking,
        ));

        let reached = self.taps.tap();
        let magic_unlocked = reached && self.unlock_magic();

        Some(TitleTap {
            count: self.taps.count(),
            magic_unlocked,
        })
    }

    fn unlock_magic(&mut self) -> bool {
        if self.mode.is_magic() {
            return false;
        }
        self.mode = Mode::Magic;
        self.magic_message_visible = true;
        self.timers.schedule(
            CosmeticTask::DismissMagicMessage,
            self.config.timing.magic_message_secs,
            TaskScope::Global,
        );
        log::info!("magic mode unlocked");
        true
    }

    /// YES was pressed. Tears down the asking screen; only the first call
    /// does anything.
    pub fn accept(&mut self) -> bool {
        if self.is_accepted() {
            return false;
        }

        self.phase = Phase::Accepted;
        let cancelled = self.timers.cancel_scope(TaskScope::Asking);
        self.target = None;
        self.title_bouncing = false;
        self.title_bounce_task = None;
        self.taps.reset();

        self.timers.schedule(
            CosmeticTask::BeginEnding,
            self.config.timing.ending_delay_secs,
            TaskScope::Celebration,
        );
        self.music.start();

        log::info!("proposal accepted ({} pending asking timers cancelled)", cancelled);
        true
    }

    /// Flip mute; returns the new state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Should hovering YES play the little chime?
    pub fn hover_yes(&self) -> bool {
        !self.is_accepted() && !self.muted
    }

    /// Advance every cosmetic clock by `delta` seconds
    pub fn tick(&mut self, delta: f32) -> TickOutcome {
        if let Some(target) = self.target.as_mut() {
            target.tick(delta);
        }

        let fired = if self.timers.is_empty() {
            Vec::new()
        } else {
            self.timers.advance(delta)
        };
        for task in &fired {
            match task {
                CosmeticTask::DismissMagicMessage => self.magic_message_visible = false,
                CosmeticTask::EndTitleBounce => {
                    self.title_bouncing = false;
                    self.title_bounce_task = None;
                }
                CosmeticTask::BeginEnding => self.celebration_ending = true,
            }
        }

        TickOutcome {
            fired,
            music_volume: self.music.advance(delta),
        }
    }
}

impl Default for ProposalSession {
    fn default() -> Self {
        ProposalSession::new(ProposalConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const VIEWPORT: ViewportBounds = ViewportBounds::new(1920.0, 1080.0);

    #[test]
    fn test_five_taps_unlock_magic_once() {
        let mut session = ProposalSession::default();

        for _ in 0..4 {
            assert!(!session.tap_title().unwrap().magic_unlocked);
        }
        let tap = session.tap_title().unwrap();
        assert!(tap.magic_unlocked);
        assert_eq!(tap.count, 0);
        assert_eq!(session.mode(), Mode::Magic);
        assert!(session.magic_message_visible());

        // Another full cycle counts again but never re-fires
        let mut last = tap;
        for _ in 0..5 {
            last = session.tap_title().unwrap();
            assert!(!last.magic_unlocked);
        }
        assert_eq!(last.count, 0);
        assert_eq!(session.mode(), Mode::Magic);
    }

    #[test]
    fn test_magic_message_dismisses_after_four_seconds() {
        let mut session = ProposalSession::default();
        for _ in 0..5 {
            session.tap_title();
        }

        session.tick(3.5);
        assert!(session.magic_message_visible());

        let outcome = session.tick(0.6);
        assert!(outcome.fired.contains(&CosmeticTask::DismissMagicMessage));
        assert!(!session.magic_message_visible());
    }

    #[test]
    fn test_title_bounce_is_short_lived() {
        let mut session = ProposalSession::default();
        session.tap_title();
        assert!(session.title_bouncing());

        session.tick(0.6);
        assert!(!session.title_bouncing());
    }

    #[test]
    fn test_tapping_again_extends_title_bounce() {
        let mut session = ProposalSession::default();
        session.tap_title();
        session.tick(0.4);
        session.tap_title();
        assert_eq!(session.pending_timers(), 1);

        // The first hop would have ended here
        session.tick(0.2);
        assert!(session.title_bouncing());

        let outcome = session.tick(0.4);
        assert_eq!(outcome.fired, vec![CosmeticTask::EndTitleBounce]);
        assert!(!session.title_bouncing());
        assert_eq!(session.pending_timers(), 0);
    }

    #[test]
    fn test_accept_tears_down_asking_screen() {
        let mut session = ProposalSession::default();
        session.initialize_target(VIEWPORT);
        session.tap_title();
        assert!(session.target().is_some());

        assert!(session.accept());
        assert!(!session.accept());

        assert!(session.is_accepted());
        assert!(session.target().is_none());
        assert!(!session.title_bouncing());
        assert!(session.tap_title().is_none());

        // Only the ending timer is left; the title bounce never fires
        let outcome = session.tick(5.0);
        assert_eq!(outcome.fired, vec![CosmeticTask::BeginEnding]);
        assert!(session.celebration_ending());
    }

    #[test]
    fn test_magic_message_survives_acceptance() {
        let mut session = ProposalSession::default();
        for _ in 0..5 {
            session.tap_title();
        }
        session.accept();

        let outcome = session.tick(4.5);
        assert!(outcome.fired.contains(&CosmeticTask::DismissMagicMessage));
        assert!(outcome.fired.contains(&CosmeticTask::BeginEnding));
        assert!(!session.magic_message_visible());
    }

    #[test]
    fn test_pointer_ignored_after_acceptance() {
        let mut session = ProposalSession::default();
        let mut rng = StdRng::seed_from_u64(3);
        session.initialize_target(VIEWPORT);
        session.accept();

        let measured = TargetBox::new(500.0, 400.0, 100.0, 60.0);
        let reaction = session.pointer_moved(measured.center(), measured, VIEWPORT, &mut rng);

        assert_eq!(reaction, Reaction::Ignored);
    }

    #[test]
    fn test_pointer_drives_target_while_asking() {
        let mut session = ProposalSession::default();
        let mut rng = StdRng::seed_from_u64(4);
        session.initialize_target(VIEWPORT);

        let measured = TargetBox::new(500.0, 400.0, 100.0, 60.0);
        let reaction = session.pointer_moved(Point::new(520.0, 420.0), measured, VIEWPORT, &mut rng);

        let Reaction::Jumped(jump) = reaction else {
            panic!("expected a jump");
        };
        assert_eq!(session.target().map(|t| t.position()), Some(jump.to));
        assert_eq!(session.target().map(|t| t.is_bouncing()), Some(true));
    }

    #[test]
    fn test_music_fades_in_after_acceptance() {
        let mut session = ProposalSession::default();
        assert_eq!(session.tick(1.0).music_volume, None);

        session.accept();
        let first = session.tick(0.2);
        assert_eq!(first.music_volume.map(|v| (v * 100.0).round()), Some(5.0));

        for _ in 0..20 {
            session.tick(0.2);
        }
        assert!((session.music_volume() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_mute_blocks_hover_chime() {
        let mut session = ProposalSession::default();
        assert!(session.hover_yes());

        assert!(session.toggle_mute());
        assert!(!session.hover_yes());

        assert!(!session.toggle_mute());
        session.accept();
        assert!(!session.hover_yes());
    }
}
