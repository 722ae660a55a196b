/// A seek bar drag driven from the keyboard.
///
/// The first nudge grabs the bar at the current progress; the pending
/// percent then moves in steps until the gesture is committed or cancelled.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeekGesture {
    pending: Option<u8>,
}

impl SeekGesture {
    pub fn is_active(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<u8> {
        self.pending
    }

    pub fn begin(&mut self, from: u8) {
        self.pending = Some(from.min(100));
    }

    pub fn nudge(&mut self, delta: i16) {
        if let Some(pct) = self.pending {
            let moved = (i16::from(pct) + delta).clamp(0, 100);
            self.pending = Some(moved as u8);
        }
    }

    /// Ends the gesture, returning where the bar was let go
    pub fn finish(&mut self) -> Option<u8> {
        self.pending.take()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
