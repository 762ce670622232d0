use std::fmt::{Display, Formatter};

/// Event that caused a merge policy to be consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeTrigger {
    /// A newly flushed segment was added.
    SegmentFlush,
    /// A full flush (commit, reader reopen or close) finished.
    FullFlush,
    /// Requested explicitly by the user.
    Explicit,
    /// A previous merge finished and may cascade.
    MergeFinished,
    /// The writer is closing.
    Closing,
    /// Synchronous merges at commit.
    Commit,
    /// Synchronous merges while opening a point-in-time reader.
    GetReader,
}

impl MergeTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            MergeTrigger::SegmentFlush => "segment_flush",
            MergeTrigger::FullFlush => "full_flush",
            MergeTrigger::Explicit => "explicit",
            MergeTrigger::MergeFinished => "merge_finished",
            MergeTrigger::Closing => "closing",
            MergeTrigger::Commit => "commit",
            MergeTrigger::GetReader => "get_reader",
        }
    }
}

impl Display for MergeTrigger {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
