use super::device::RecognitionEvent;

/// Result of applying one recognition event
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptUpdate {
    /// The whole transcript: committed segments plus any pending interim
    pub transcript: String,
    /// Whether this event committed at least one final segment
    pub is_final: bool,
}

/// Merges a stream of interim/final recognition events into one transcript
///
/// Committed segments are append-only: once a final segment lands it is
/// never rewritten. At most one interim is tracked at a time and it is
/// rendered after the committed text, never stored with it.
#[derive(Debug, Default)]
pub struct TranscriptAggregator {
    committed: Vec<String>,
    pending_interim: Option<String>,
}

impl TranscriptAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event from the device
    ///
    /// Returns `None` when nothing observable changed: an empty batch, a
    /// `result_index` past the end of the batch, or an interim identical to
    /// the one already pending. Whitespace-only text is never stored, but a
    /// whitespace-only final still reports a final update.
    pub fn apply(&mut self, event: &RecognitionEvent) -> Option<TranscriptUpdate> {
        let new_results = event.results.get(event.result_index..)?;

        let mut committed_final = false;
        let mut interim_changed = false;

        for result in new_results {
            let Some(text) = result.alternatives.first().map(|a| a.transcript.as_str()) else {
                continue;
            };

            if result.is_final {
                if !text.trim().is_empty() {
                    self.committed.push(text.to_string());
                }
                self.pending_interim = None;
                committed_final = true;
            } else if text.trim().is_empty() {
                continue;
            } else if self.pending_interim.as_deref() != Some(text) {
                // Later interims in the same batch overwrite earlier ones
                self.pending_interim = Some(text.to_string());
                interim_changed = true;
            }
        }

        if committed_final || interim_changed {
            Some(TranscriptUpdate {
                transcript: self.full_transcript(),
                is_final: committed_final,
            })
        } else {
            None
        }
    }

    /// The transcript as displayed: committed segments joined by spaces,
    /// with the pending interim appended when present
    pub fn full_transcript(&self) -> String {
        let mut parts: Vec<&str> = self.committed.iter().map(String::as_str).collect();
        if let Some(interim) = &self.pending_interim {
            parts.push(interim);
        }
        parts.join(" ")
    }

    /// Finalized segments, in commit order
    pub fn committed(&self) -> &[String] {
        &self.committed
    }

    /// The not-yet-finalized utterance, if one is pending
    pub fn pending_interim(&self) -> Option<&str> {
        self.pending_interim.as_deref()
    }

    /// Drop all state; idempotent and safe while recognition is active
    pub fn clear(&mut self) {
        self.committed.clear();
        self.pending_interim = None;
    }
}
