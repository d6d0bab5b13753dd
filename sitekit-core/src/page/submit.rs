//! Simulated form submission.
//!
//! No request is sent. The machine walks `Idle → Sending → Succeeded → Idle`
//! on two timers and tells the caller what to do to the page at each step.
//! Timers are requested through [`SubmitEffect::Schedule`] and revoked through
//! [`SubmitEffect::CancelPending`]; at most one is outstanding at a time.

use smallvec::SmallVec;

use crate::config::SubmitConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Sending,
    Succeeded,
}

/// Where the form lives. Modal forms close their dialog when done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOrigin {
    Modal,
    Page,
}

impl FormOrigin {
    #[must_use]
    pub fn for_form(form_id: &str, modal_form_id: &str) -> Self {
        if form_id == modal_form_id {
            Self::Modal
        } else {
            Self::Page
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTimer {
    SendComplete,
    HideSuccess,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitEffect {
    /// Disable the submit button and show the sending label.
    DisableSubmit,
    /// Re-enable the submit button with its previous label.
    RestoreSubmit,
    ShowSuccess,
    HideSuccess,
    ResetForm,
    CloseModal,
    Schedule { timer: SubmitTimer, delay_ms: u32 },
    CancelPending,
}

pub type SubmitEffects = SmallVec<[SubmitEffect; 4]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("a submission is already being sent")]
    InFlight,
}

#[derive(Debug, Clone)]
pub struct SubmitMachine {
    phase: SubmitPhase,
    origin: FormOrigin,
    sending_ms: u32,
    success_visible_ms: u32,
}

impl SubmitMachine {
    #[must_use]
    pub const fn new(origin: FormOrigin, cfg: &SubmitConfig) -> Self {
        Self {
            phase: SubmitPhase::Idle,
            origin,
            sending_ms: cfg.sending_ms,
            success_visible_ms: cfg.success_visible_ms,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> SubmitPhase {
        self.phase
    }

    #[must_use]
    pub const fn origin(&self) -> FormOrigin {
        self.origin
    }

    /// Start a submission.
    ///
    /// Submitting while a success message is still showing dismisses it and
    /// starts over.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::InFlight`] while a previous submission is sending.
    pub fn submit(&mut self) -> Result<SubmitEffects, SubmitError> {
        let mut effects = SubmitEffects::new();
        match self.phase {
            SubmitPhase::Sending => return Err(SubmitError::InFlight),
            SubmitPhase::Succeeded => {
                effects.push(SubmitEffect::CancelPending);
                effects.push(SubmitEffect::HideSuccess);
            }
            SubmitPhase::Idle => {}
        }
        self.phase = SubmitPhase::Sending;
        effects.push(SubmitEffect::DisableSubmit);
        effects.push(SubmitEffect::Schedule {
            timer: SubmitTimer::SendComplete,
            delay_ms: self.sending_ms,
        });
        Ok(effects)
    }

    /// Advance on a fired timer. Timers that no longer match the phase are
    /// dropped.
    pub fn on_timer(&mut self, timer: SubmitTimer) -> SubmitEffects {
        let mut effects = SubmitEffects::new();
        match (self.phase, timer) {
            (SubmitPhase::Sending, SubmitTimer::SendComplete) => {
                self.phase = SubmitPhase::Succeeded;
                effects.extend([
                    SubmitEffect::RestoreSubmit,
                    SubmitEffect::ShowSuccess,
                    SubmitEffect::ResetForm,
                    SubmitEffect::Schedule {
                        timer: SubmitTimer::HideSuccess,
                        delay_ms: self.success_visible_ms,
                    },
                ]);
            }
            (SubmitPhase::Succeeded, SubmitTimer::HideSuccess) => {
                self.phase = SubmitPhase::Idle;
                effects.push(SubmitEffect::HideSuccess);
                if self.origin == FormOrigin::Modal {
                    effects.push(SubmitEffect::CloseModal);
                }
            }
            (phase, timer) => {
                log::debug!("dropping stale {timer:?} timer in {phase:?}");
            }
        }
        effects
    }

    /// Abandon whatever is in progress and return to idle.
    pub fn cancel(&mut self) -> SubmitEffects {
        let mut effects = SubmitEffects::new();
        match self.phase {
            SubmitPhase::Idle => {}
            SubmitPhase::Sending => {
                effects.push(SubmitEffect::CancelPending);
                effects.push(SubmitEffect::RestoreSubmit);
            }
            SubmitPhase::Succeeded => {
                effects.push(SubmitEffect::CancelPending);
                effects.push(SubmitEffect::HideSuccess);
            }
        }
        self.phase = SubmitPhase::Idle;
        effects
    }
}

/// Virtual clock for driving a [`SubmitMachine`] without real timers.
#[derive(Debug, Clone, Default)]
pub struct ManualTimeline {
    now_ms: u64,
    pending: Option<(u64, SubmitTimer)>,
}

impl ManualTimeline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.now_ms
    }

    #[must_use]
    pub const fn pending(&self) -> Option<SubmitTimer> {
        match self.pending {
            Some((_, timer)) => Some(timer),
            None => None,
        }
    }

    /// Take note of any schedule or cancel requests in `effects`.
    pub fn record(&mut self, effects: &[SubmitEffect]) {
        for effect in effects {
            match *effect {
                SubmitEffect::Schedule { timer, delay_ms } => {
                    self.pending = Some((self.now_ms + u64::from(delay_ms), timer));
                }
                SubmitEffect::CancelPending => self.pending = None,
                _ => {}
            }
        }
    }

    /// Move time forward, firing every timer that comes due along the way.
    /// Returns the effects produced by the fired timers, in order.
    pub fn advance(&mut self, machine: &mut SubmitMachine, delta_ms: u64) -> Vec<SubmitEffect> {
        let target = self.now_ms + delta_ms;
        let mut fired = Vec::new();
        while let Some((due, timer)) = self.pending {
            if due > target {
                break;
            }
            self.now_ms = due;
            self.pending = None;
            let effects = machine.on_timer(timer);
            self.record(&effects);
            fired.extend(effects);
        }
        self.now_ms = target;
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine(origin: FormOrigin) -> SubmitMachine {
        SubmitMachine::new(origin, &SubmitConfig::default())
    }

    #[test]
    fn modal_submission_runs_full_cycle() {
        let mut form = machine(FormOrigin::Modal);
        let mut clock = ManualTimeline::new();

        let start = form.submit().unwrap();
        assert_eq!(start[0], SubmitEffect::DisableSubmit);
        clock.record(&start);
        assert_eq!(form.phase(), SubmitPhase::Sending);

        assert!(clock.advance(&mut form, 1_499).is_empty());
        let sent = clock.advance(&mut form, 1);
        assert!(sent.contains(&SubmitEffect::ShowSuccess));
        assert!(sent.contains(&SubmitEffect::ResetForm));
        assert!(sent.contains(&SubmitEffect::RestoreSubmit));
        assert_eq!(form.phase(), SubmitPhase::Succeeded);

        assert!(clock.advance(&mut form, 2_999).is_empty());
        let done = clock.advance(&mut form, 1);
        assert_eq!(done, vec![SubmitEffect::HideSuccess, SubmitEffect::CloseModal]);
        assert_eq!(form.phase(), SubmitPhase::Idle);
        assert_eq!(clock.now_ms(), 4_500);
        assert_eq!(clock.pending(), None);
    }

    #[test]
    fn page_form_keeps_modal_alone() {
        let mut form = machine(FormOrigin::Page);
        let mut clock = ManualTimeline::new();
        clock.record(&form.submit().unwrap());
        let all = clock.advance(&mut form, 10_000);
        assert!(!all.contains(&SubmitEffect::CloseModal));
        assert_eq!(all.last(), Some(&SubmitEffect::HideSuccess));
    }

    #[test]
    fn double_submit_is_rejected() {
        let mut form = machine(FormOrigin::Page);
        form.submit().unwrap();
        assert_eq!(form.submit().unwrap_err(), SubmitError::InFlight);
    }

    #[test]
    fn resubmit_during_success_restarts() {
        let mut form = machine(FormOrigin::Page);
        let mut clock = ManualTimeline::new();
        clock.record(&form.submit().unwrap());
        clock.advance(&mut form, 1_500);
        let again = form.submit().unwrap();
        assert_eq!(again[0], SubmitEffect::CancelPending);
        clock.record(&again);
        assert_eq!(clock.pending(), Some(SubmitTimer::SendComplete));
    }

    #[test]
    fn cancel_drops_pending_timer() {
        let mut form = machine(FormOrigin::Modal);
        let mut clock = ManualTimeline::new();
        clock.record(&form.submit().unwrap());
        let cancelled = form.cancel();
        clock.record(&cancelled);
        assert_eq!(form.phase(), SubmitPhase::Idle);
        assert!(cancelled.contains(&SubmitEffect::RestoreSubmit));
        assert!(clock.advance(&mut form, 5_000).is_empty());
    }

    #[test]
    fn stale_timer_is_ignored() {
        let mut form = machine(FormOrigin::Modal);
        assert!(form.on_timer(SubmitTimer::HideSuccess).is_empty());
        assert_eq!(form.phase(), SubmitPhase::Idle);
    }

    #[test]
    fn origin_follows_form_id() {
        assert_eq!(FormOrigin::for_form("modalForm", "modalForm"), FormOrigin::Modal);
        assert_eq!(FormOrigin::for_form("contactForm", "modalForm"), FormOrigin::Page);
    }
}
