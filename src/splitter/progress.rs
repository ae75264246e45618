/// Receiver for human-readable progress narration
///
/// The splitter and joiner report what they are doing through this trait
/// so they never depend on a particular output channel.
pub trait ProgressSink {
    fn message(&mut self, text: &str);
}

/// Writes each message as a line on stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleProgress;

impl ProgressSink for ConsoleProgress {
    fn message(&mut self, text: &str) {
        println!("{}", text);
    }
}

/// Emits each message as an `info` event
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn message(&mut self, text: &str) {
        tracing::info!("{}", text);
    }
}

/// Collects messages, mostly useful in tests
impl ProgressSink for Vec<String> {
    fn message(&mut self, text: &str) {
        self.push(text.to_string());
    }
}
