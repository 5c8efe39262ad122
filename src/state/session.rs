// Chooser session: touch lifecycle, countdown and selection in one owner.
use rand::Rng;

use super::timer::{TickScheduler, TimerController};
use super::touch::TouchTracker;
use crate::model::{
    ChooserConfig, ContactPoint, RoundSummary, TouchId, DEFAULT_COUNTDOWN_MS,
    DEFAULT_TICK_INTERVAL_MS,
};
use crate::render::{self, Frame, Surface};
use crate::selection;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionOptions {
    pub countdown_ms: f64,
    pub tick_interval_ms: i32,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            countdown_ms: DEFAULT_COUNTDOWN_MS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

pub struct Session<S: Surface, T: TickScheduler, R: Rng> {
    surface: S,
    timer: TimerController<T>,
    touches: TouchTracker,
    rng: R,
    options: SessionOptions,
    config: ChooserConfig,
    /// Present from selection until the round is torn down.
    round: Option<RoundSummary>,
}

impl<S: Surface, T: TickScheduler, R: Rng> Session<S, T, R> {
    pub fn new(surface: S, scheduler: T, rng: R, options: SessionOptions) -> Self {
        Self {
            surface,
            timer: TimerController::new(scheduler, options.tick_interval_ms),
            touches: TouchTracker::default(),
            rng,
            options,
            config: ChooserConfig::default(),
            round: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn is_completed(&self) -> bool {
        self.round.is_some()
    }

    #[cfg(test)]
    pub(crate) fn round(&self) -> Option<&RoundSummary> {
        self.round.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn touches(&self) -> impl Iterator<Item = &crate::model::Touch> {
        self.touches.iter()
    }

    #[cfg(test)]
    pub(crate) fn touch(&self, id: TouchId) -> Option<&crate::model::Touch> {
        self.touches.get(id)
    }

    /// Takes effect at the next selection.
    pub fn set_config(&mut self, config: ChooserConfig) {
        self.config = config;
    }

    pub fn on_contact_start(&mut self, points: &[ContactPoint], now: f64) {
        if points.is_empty() {
            return;
        }
        if self.round.take().is_some() {
            log::debug!("contact after result, starting a new round");
            self.touches.clear();
        }
        for p in points {
            self.touches.insert(*p, &mut self.rng);
        }
        self.timer.start_or_restart(now);
    }

    pub fn on_contact_move(&mut self, points: &[ContactPoint]) {
        for p in points {
            self.touches.move_to(p.id, p.x, p.y);
        }
    }

    pub fn on_contact_end(&mut self, ids: &[TouchId], now: f64) {
        if self.is_completed() {
            for id in ids {
                self.touches.mark_lifted(*id);
            }
            if self.touches.all_lifted() {
                log::debug!("all fingers lifted, clearing result");
                self.reset();
            }
            return;
        }
        let mut removed = false;
        for id in ids {
            removed |= self.touches.remove(*id);
        }
        if !removed {
            return;
        }
        if self.touches.is_empty() {
            self.reset();
        } else {
            self.timer.start_or_restart(now);
        }
    }

    pub fn on_contact_cancel(&mut self, ids: &[TouchId], now: f64) {
        self.on_contact_end(ids, now);
    }

    /// One timer tick: selects once the countdown expired, then redraws.
    pub fn tick(&mut self, now: f64) {
        let Some(elapsed_ms) = self.timer.elapsed(now) else {
            return;
        };
        if elapsed_ms >= self.options.countdown_ms && !self.is_completed() {
            self.complete();
        }
        let frame = Frame {
            elapsed_ms,
            countdown_ms: self.options.countdown_ms,
            result: self.round.as_ref().map(|r| r.mode),
        };
        render::draw_frame(&mut self.surface, self.touches.iter(), &frame);
    }

    /// Cancels the tick; used when the host view goes away.
    pub fn shutdown(&mut self) {
        self.timer.stop();
    }

    fn complete(&mut self) {
        if self.touches.is_empty() {
            return;
        }
        let ids = self.touches.ids();
        let selection = selection::select(&ids, self.config, &mut self.rng);
        self.touches.apply(&selection.assignments);
        match serde_json::to_string(&selection.summary) {
            Ok(json) => log::info!("round complete {}", json),
            Err(err) => log::warn!("round summary not serializable: {}", err),
        }
        self.round = Some(selection.summary);
    }

    fn reset(&mut self) {
        self.timer.stop();
        self.surface.clear();
        self.touches.clear();
        self.round = None;
    }

    #[cfg(test)]
    pub(crate) fn surface(&self) -> &S {
        &self.surface
    }

    #[cfg(test)]
    pub(crate) fn scheduler(&self) -> &T {
        self.timer.scheduler()
    }
}
