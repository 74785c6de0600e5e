//! Fair draw protocol types and messages.

mod messages;
mod session;
mod types;

pub use messages::{CommitMessage, Reveal};
pub use session::{FairRandomSession, SessionState};
pub use types::{DrawPurpose, MatchId, Party, Winner};
