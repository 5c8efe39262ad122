// Countdown timer owning the repeating tick handle.

/// Host capability for a repeating callback.
pub trait TickScheduler {
    type Handle;

    /// Starts a repeating tick. `None` when the host refused it.
    fn schedule(&mut self, period_ms: i32) -> Option<Self::Handle>;
    fn cancel(&mut self, handle: Self::Handle);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimerState {
    Idle,
    Counting { started_at: f64 },
}

pub struct TimerController<S: TickScheduler> {
    scheduler: S,
    handle: Option<S::Handle>,
    state: TimerState,
    period_ms: i32,
}

impl<S: TickScheduler> TimerController<S> {
    pub fn new(scheduler: S, period_ms: i32) -> Self {
        Self {
            scheduler,
            handle: None,
            state: TimerState::Idle,
            period_ms,
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> TimerState {
        self.state
    }

    #[cfg(test)]
    pub(crate) fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Counting { .. })
    }

    /// Starts counting from `now`. A running timer keeps its tick and only
    /// resets the countdown start.
    pub fn start_or_restart(&mut self, now: f64) {
        if self.handle.is_none() {
            self.handle = self.scheduler.schedule(self.period_ms);
            if self.handle.is_none() {
                log::warn!("tick scheduling failed; countdown will not advance");
            }
        }
        self.state = TimerState::Counting { started_at: now };
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.scheduler.cancel(handle);
        }
        self.state = TimerState::Idle;
    }

    pub fn elapsed(&self, now: f64) -> Option<f64> {
        match self.state {
            TimerState::Counting { started_at } => Some((now - started_at).max(0.0)),
            TimerState::Idle => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

impl<S: TickScheduler> Drop for TimerController<S> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.scheduler.cancel(handle);
        }
    }
}
