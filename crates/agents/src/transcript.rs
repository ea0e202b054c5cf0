//! Run transcripts for workflow log artifacts.

use chrono::Utc;
use uuid::Uuid;

/// Accumulates timestamped log lines for one agent run.
///
/// Rendered transcripts become the `<log name>.txt` artifact the hosting
/// workflow exposes next to the structured output.
#[derive(Debug, Clone)]
pub struct Transcript {
    trace_id: String,
    lines: Vec<String>,
}

impl Transcript {
    /// Start a transcript with a fresh trace id.
    pub fn new(label: &str) -> Self {
        let trace_id = Uuid::new_v4().to_string();
        let mut transcript = Self {
            trace_id,
            lines: Vec::new(),
        };
        transcript.push(format!("=== {} ===", label));
        transcript
    }

    /// Trace id tying log lines to this run.
    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    /// Append a timestamped line.
    pub fn push(&mut self, line: impl AsRef<str>) {
        self.lines.push(format!(
            "[{} {}] {}",
            Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ"),
            &self.trace_id[..8],
            line.as_ref()
        ));
    }

    /// Render the transcript as the log artifact body.
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }

    /// Number of recorded lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the transcript is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_carry_the_trace_id() {
        let mut transcript = Transcript::new("unit");
        transcript.push("first step");
        let rendered = transcript.render();
        assert_eq!(transcript.len(), 2);
        assert!(rendered.contains("=== unit ==="));
        assert!(rendered.contains("first step"));
        assert!(rendered.contains(&transcript.trace_id()[..8]));
    }
}
