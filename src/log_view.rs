/// Bounded in-app event log shown in the sidebar. Failure details land here
/// (and in the log file) instead of the transcript.
#[derive(Debug, Default)]
pub struct LogView {
    pub entries: Vec<String>,
}

const MAX_ENTRIES: usize = 200;

impl LogView {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, entry: String) {
        self.entries.push(entry);
        if self.entries.len() > MAX_ENTRIES {
            self.entries.remove(0);
        }
    }
}
