//! Journal storage and export.

use serde::{Deserialize, Serialize};

use super::entry::JournalEntry;

/// A chronological log of session events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to the journal.
    pub fn append(&mut self, entry: JournalEntry) {
        self.entries.push(entry);
    }

    /// Get all entries.
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the journal is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export the journal as markdown.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# TZ Session Journal\n\n");
        for entry in &self.entries {
            match entry {
                JournalEntry::StageChange {
                    from,
                    to,
                    timestamp,
                } => {
                    out.push_str(&format!(
                        "`{}` *{from}* → *{to}*\n\n",
                        timestamp.format("%H:%M:%S")
                    ));
                }
                JournalEntry::PlayerNamed { name, .. } => {
                    out.push_str(&format!("**Commander**: {name}\n\n"));
                }
                JournalEntry::PuzzleAttempt {
                    puzzle,
                    answer,
                    solved,
                    feedback,
                    attempt,
                    ..
                } => {
                    let mark = if *solved { "✓" } else { "✗" };
                    out.push_str(&format!(
                        "**{}** attempt {attempt}: `{answer}` {mark} {feedback}\n\n",
                        puzzle.title()
                    ));
                }
                JournalEntry::PuzzleExhausted {
                    puzzle, credited, ..
                } => {
                    let credit = if *credited { " (module credited)" } else { "" };
                    out.push_str(&format!(
                        "**{}**: attempts exhausted{credit}\n\n",
                        puzzle.title()
                    ));
                }
                JournalEntry::TaskSkipped { puzzle, .. } => {
                    out.push_str(&format!("**{}**: skipped\n\n", puzzle.title()));
                }
                JournalEntry::DeviationChange {
                    reason,
                    delta,
                    value,
                    ..
                } => {
                    out.push_str(&format!(
                        "*Deviation* {delta:+.2} ({reason}) → {value:.2}\n\n"
                    ));
                }
                JournalEntry::MemoryFragment {
                    experience_count,
                    cache_hit,
                    ..
                } => {
                    let source = if *cache_hit { "replayed" } else { "recovered" };
                    out.push_str(&format!(
                        "*Memory Fragment #{experience_count}* {source}\n\n"
                    ));
                }
                JournalEntry::EndingResolved {
                    ending,
                    modules,
                    deviation,
                    final_choice,
                    ..
                } => {
                    out.push_str(&format!("## {}\n\n", ending.title()));
                    out.push_str(&format!(
                        "Modules: {modules}/5, deviation {deviation:.2}, final choice {final_choice}\n\n"
                    ));
                }
            }
        }
        out
    }

    /// Export the journal as plain text.
    pub fn export_text(&self) -> String {
        let mut out = String::from("TZ Session Journal\n==================\n\n");
        for entry in &self.entries {
            match entry {
                JournalEntry::StageChange {
                    from,
                    to,
                    timestamp,
                } => {
                    out.push_str(&format!(
                        "[{}] {from} -> {to}\n",
                        timestamp.format("%H:%M:%S")
                    ));
                }
                JournalEntry::PlayerNamed { name, .. } => {
                    out.push_str(&format!("Commander: {name}\n"));
                }
                JournalEntry::PuzzleAttempt {
                    puzzle,
                    answer,
                    solved,
                    feedback,
                    attempt,
                    ..
                } => {
                    let mark = if *solved { "ok" } else { "fail" };
                    out.push_str(&format!(
                        "{} #{attempt}: {answer} [{mark}] {feedback}\n",
                        puzzle.title()
                    ));
                }
                JournalEntry::PuzzleExhausted {
                    puzzle, credited, ..
                } => {
                    let credit = if *credited { " (module credited)" } else { "" };
                    out.push_str(&format!(
                        "{}: attempts exhausted{credit}\n",
                        puzzle.title()
                    ));
                }
                JournalEntry::TaskSkipped { puzzle, .. } => {
                    out.push_str(&format!("{}: skipped\n", puzzle.title()));
                }
                JournalEntry::DeviationChange {
                    reason,
                    delta,
                    value,
                    ..
                } => {
                    out.push_str(&format!("Deviation {delta:+.2} ({reason}) -> {value:.2}\n"));
                }
                JournalEntry::MemoryFragment {
                    experience_count,
                    cache_hit,
                    ..
                } => {
                    let source = if *cache_hit { "replayed" } else { "recovered" };
                    out.push_str(&format!("Memory Fragment #{experience_count} {source}\n"));
                }
                JournalEntry::EndingResolved {
                    ending,
                    modules,
                    deviation,
                    final_choice,
                    ..
                } => {
                    out.push_str(&format!(
                        "Ending: {ending} (modules {modules}/5, deviation {deviation:.2}, choice {final_choice})\n"
                    ));
                }
            }
        }
        out
    }
}
