mod record;
mod recorder;
mod streak;

pub use record::{Difficulty, RecordId, SessionRecord};
pub use recorder::{CompletionOutcome, RecordWarning, SessionRecorder};
pub use streak::next_streak;
