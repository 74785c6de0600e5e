//! Offline verification of revealed draws.

use crate::transcript::TranscriptEntry;
use anyhow::{Context, Result};
use fair_dice_core::{CommitMessage, Commitment, DrawPurpose, MatchId, RevealError, SecureKey};
use std::collections::HashMap;

/// Recompute the commitment from a revealed key and value
pub fn verify_reveal(commitment: &str, key: &str, value: u8) -> Result<bool> {
    let commitment: Commitment = commitment.parse().context("invalid commitment")?;
    let key = SecureKey::from_hex(key).context("invalid key, expected 64 hex characters")?;
    Ok(commitment.verify(&key, value))
}

/// Verdict for one revealed draw in a transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawCheck {
    pub match_id: MatchId,
    pub purpose: DrawPurpose,
    /// A commit entry for this commitment appeared before the reveal
    pub committed_first: bool,
    /// Outcome of checking the reveal against the published commit message
    pub outcome: Result<(), RevealError>,
}

impl DrawCheck {
    pub fn ok(&self) -> bool {
        self.committed_first && self.outcome.is_ok()
    }

    /// One-line verdict for the report
    pub fn verdict(&self) -> String {
        match (&self.outcome, self.committed_first) {
            (Err(err), _) => format!("INVALID ({})", err),
            (Ok(()), false) => "INVALID (no prior commitment)".to_string(),
            (Ok(()), true) => "valid".to_string(),
        }
    }
}

/// Check every reveal in a transcript against its earlier commit entry
pub fn verify_transcript(entries: &[TranscriptEntry]) -> Vec<DrawCheck> {
    let mut published: HashMap<Commitment, (MatchId, u8)> = HashMap::new();
    let mut checks = Vec::new();

    for entry in entries {
        match entry {
            TranscriptEntry::Commit {
                match_id,
                commitment,
                range_max,
                ..
            } => {
                published.insert(*commitment, (*match_id, *range_max));
            }
            TranscriptEntry::Reveal {
                match_id,
                purpose,
                commitment,
                reveal,
            } => {
                let prior = published
                    .get(commitment)
                    .filter(|(committed_in, _)| committed_in == match_id);
                // Without a commit entry only the reveal's own range is known
                let range_max = prior.map_or(reveal.range_max, |&(_, range_max)| range_max);
                let commit = CommitMessage {
                    commitment: *commitment,
                    range_max,
                };
                checks.push(DrawCheck {
                    match_id: *match_id,
                    purpose: *purpose,
                    committed_first: prior.is_some(),
                    outcome: reveal.check(&commit),
                });
            }
            TranscriptEntry::Result { .. } => {}
        }
    }
    checks
}
