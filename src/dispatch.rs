use std::rc::Rc;

use tracing::debug;

use crate::host::{Element, Host, Timers};
use crate::limiter::RateLimiter;
use crate::types::DispatchPolicy;

/// Issues synthetic activations, immediately or after a fixed delay.
///
/// Delayed activations are fire-and-forget. A pending one is never
/// cancelled, even if another interrupt is activated before it fires.
pub(crate) struct Dispatcher<H, T> {
    host: Rc<H>,
    timers: Rc<T>,
}

impl<H, T> Dispatcher<H, T>
where
    H: Host + 'static,
    T: Timers,
{
    pub(crate) fn new(host: Rc<H>, timers: Rc<T>) -> Self {
        Self { host, timers }
    }

    pub(crate) fn host(&self) -> &H {
        &self.host
    }

    pub(crate) fn timers(&self) -> &T {
        &self.timers
    }

    /// Initiate activation of `control` under `policy`.
    ///
    /// When the policy updates the rate limiter, the initiation time is
    /// recorded whether or not the activation later succeeds.
    pub(crate) fn dispatch(
        &self,
        control: H::Element,
        policy: DispatchPolicy,
        limiter: &mut RateLimiter,
    ) {
        let now = self.timers.now();
        if policy.delay.is_zero() {
            activate(&*self.host, &control);
        } else {
            debug!(
                tag = %control.tag_name(),
                delay = ?policy.delay,
                "scheduling activation"
            );
            let host = Rc::clone(&self.host);
            self.timers.schedule_once(
                policy.delay,
                Box::new(move || activate(&*host, &control)),
            );
        }
        if policy.updates_rate_limit {
            limiter.mark_consumed(now);
        }
    }

    /// Activate right away without touching any rate limiter.
    pub(crate) fn activate_now(&self, control: &H::Element) {
        activate(&*self.host, control);
    }
}

fn activate<H: Host>(host: &H, control: &H::Element) {
    match host.activate(control) {
        Ok(()) => debug!(tag = %control.tag_name(), "activated control"),
        Err(err) => debug!(tag = %control.tag_name(), error = %err, "activation failed; discarded"),
    }
}
