//! Append-only JSON-lines record of every commitment and reveal.
//!
//! The transcript lets the player re-check each draw after the match with
//! `fair-dice verify --transcript <PATH>`. It is never read back by a match.

use fair_dice_core::{Commitment, DrawPurpose, MatchId, MatchResult, Reveal};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// One transcript line
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TranscriptEntry {
    Commit {
        match_id: MatchId,
        purpose: DrawPurpose,
        commitment: Commitment,
        range_max: u8,
    },
    Reveal {
        match_id: MatchId,
        purpose: DrawPurpose,
        commitment: Commitment,
        reveal: Reveal,
    },
    Result {
        match_id: MatchId,
        result: MatchResult,
    },
}

/// Writer appending entries to a transcript file
pub struct TranscriptWriter {
    out: BufWriter<File>,
}

impl TranscriptWriter {
    /// Open `path` for appending, creating it if needed
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            out: BufWriter::new(file),
        })
    }

    /// Append one entry and flush it to disk
    pub fn append(&mut self, entry: &TranscriptEntry) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, entry)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

/// Read every entry from a transcript file
pub fn read_entries(path: &Path) -> anyhow::Result<Vec<TranscriptEntry>> {
    let reader = BufReader::new(File::open(path)?);
    let mut entries = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let entry = serde_json::from_str(&line)
            .map_err(|e| anyhow::anyhow!("line {}: {}", number + 1, e))?;
        entries.push(entry);
    }
    Ok(entries)
}
