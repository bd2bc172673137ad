/// Marker that opens and closes a fenced code region.
pub const FENCE_MARKER: &str = "```";

/// Whether a line toggles the fenced-code state.
///
/// Any line whose trimmed text starts with three backticks counts, with or
/// without a language tag after it.
pub fn is_fence_line(line: &str) -> bool {
    line.trim().starts_with(FENCE_MARKER)
}

/// The language tag of a fence line, if it has one.
pub fn fence_language(line: &str) -> Option<&str> {
    let rest = line.trim().strip_prefix(FENCE_MARKER)?.trim();
    if rest.is_empty() { None } else { Some(rest) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CodeState {
    Outside,
    InsideCode,
}

/// What a line is, given the fence state before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    OpeningFence,
    ClosingFence,
    Code,
    Text,
}

/// Two-state machine walked once per pass, top to bottom.
///
/// Every pass builds its own tracker; nothing carries over between passes.
#[derive(Debug, Clone)]
pub struct FenceTracker {
    state: CodeState,
    line: usize,
    opened_at: Option<usize>,
}

impl Default for FenceTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl FenceTracker {
    pub fn new() -> Self {
        FenceTracker {
            state: CodeState::Outside,
            line: 0,
            opened_at: None,
        }
    }

    /// Feed the next line and classify it.
    pub fn advance(&mut self, line: &str) -> LineRole {
        let index = self.line;
        self.line += 1;

        if is_fence_line(line) {
            match self.state {
                CodeState::Outside => {
                    self.state = CodeState::InsideCode;
                    self.opened_at = Some(index);
                    LineRole::OpeningFence
                }
                CodeState::InsideCode => {
                    self.state = CodeState::Outside;
                    self.opened_at = None;
                    LineRole::ClosingFence
                }
            }
        } else {
            match self.state {
                CodeState::Outside => LineRole::Text,
                CodeState::InsideCode => LineRole::Code,
            }
        }
    }

    /// Line index of the fence that is still open, if any.
    pub fn open_fence(&self) -> Option<usize> {
        self.opened_at
    }
}

/// Index of a fence line that never gets closed.
pub fn unterminated_fence<'a>(lines: impl IntoIterator<Item = &'a str>) -> Option<usize> {
    let mut tracker = FenceTracker::new();
    for line in lines {
        tracker.advance(line);
    }
    tracker.open_fence()
}

