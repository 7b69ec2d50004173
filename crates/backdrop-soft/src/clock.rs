use std::collections::VecDeque;

use backdrop_platform::{FrameHandle, FrameScheduler};

/// Display-refresh stand-in: requested frames fire one at a time when the driver asks.
#[derive(Debug, Default)]
pub struct ManualClock {
    next_id: u64,
    pending: VecDeque<FrameHandle>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pops the oldest outstanding request, as if the display just refreshed.
    pub fn next_due(&mut self) -> Option<FrameHandle> {
        self.pending.pop_front()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl FrameScheduler for ManualClock {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push_back(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|pending| *pending != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::ManualClock;
    use backdrop_platform::FrameScheduler;

    #[test]
    fn frames_fire_in_request_order() {
        let mut clock = ManualClock::new();
        let a = clock.request_frame();
        let b = clock.request_frame();
        assert_ne!(a, b);
        assert_eq!(clock.next_due(), Some(a));
        assert_eq!(clock.next_due(), Some(b));
        assert_eq!(clock.next_due(), None);
    }

    #[test]
    fn cancelled_frames_never_fire() {
        let mut clock = ManualClock::new();
        let a = clock.request_frame();
        let b = clock.request_frame();
        clock.cancel_frame(a);
        clock.cancel_frame(a);
        assert_eq!(clock.pending(), 1);
        assert_eq!(clock.next_due(), Some(b));
    }
}
