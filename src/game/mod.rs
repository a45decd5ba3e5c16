pub mod audio_fade;
pub mod config;
pub mod session;
pub mod tap_counter;
pub mod timers;

pub use config::{AudioConfig, ConfigError, ProposalConfig, TimingConfig};
pub use session::{Mode, ProposalSession, TickOutcome, TitleTap};
pub use timers::{CosmeticTask, TaskScope};
