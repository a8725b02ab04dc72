/// Receiver for one-line, player-facing notices raised by the rules
/// (action failures, arrival announcements, "no path" notices).
pub trait MessageSink {
    fn post_message(&mut self, text: String);
}

impl MessageSink for Vec<String> {
    fn post_message(&mut self, text: String) {
        self.push(text);
    }
}

/// Discards every message.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl MessageSink for NullSink {
    fn post_message(&mut self, _text: String) {}
}
