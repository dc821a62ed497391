//! Per-owner timers driven by the host's frame tick.
//!
//! A `Timer` is a list of `(remaining delay, action tag)` pairs.  Nothing is
//! called back: `advance` hands the fired tags to the owner, which applies
//! them itself within the same tick.

#[derive(Clone, Debug)]
struct Pending<A> {
    remaining: u64,
    interval: Option<u64>,
    action: A,
    seq: u64,
}

#[derive(Clone, Debug)]
pub struct Timer<A> {
    elapsed: u64,
    paused: bool,
    next_seq: u64,
    pending: Vec<Pending<A>>,
}

impl<A> Default for Timer<A> {
    fn default() -> Self {
        Self {
            elapsed: 0,
            paused: false,
            next_seq: 0,
            pending: Vec::new(),
        }
    }
}

impl<A: Clone> Timer<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds this timer has been running (pauses excluded).
    pub fn now(&self) -> u64 {
        self.elapsed
    }

    /// Schedule `action` once, `delay` ms from now.
    pub fn add(&mut self, delay: u64, action: A) {
        self.push(delay, None, action);
    }

    /// Schedule `action` every `interval` ms, re-arming after each firing.
    pub fn repeat(&mut self, interval: u64, action: A) {
        let interval = interval.max(1);
        self.push(interval, Some(interval), action);
    }

    fn push(&mut self, remaining: u64, interval: Option<u64>, action: A) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending {
            remaining,
            interval,
            action,
            seq,
        });
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn cancel_where(&mut self, mut pred: impl FnMut(&A) -> bool) {
        self.pending.retain(|p| !pred(&p.action));
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Smallest remaining delay among entries matching `pred`.
    pub fn remaining_where(&self, mut pred: impl FnMut(&A) -> bool) -> Option<u64> {
        self.pending
            .iter()
            .filter(|p| pred(&p.action))
            .map(|p| p.remaining)
            .min()
    }

    /// Move the clock forward by `dt` ms and return every action that came
    /// due, ordered by due time and then by scheduling order.  A paused timer
    /// neither moves nor fires.
    pub fn advance(&mut self, dt: u64) -> Vec<A> {
        if self.paused {
            return Vec::new();
        }
        self.elapsed += dt;

        let mut fired: Vec<(u64, u64, A)> = Vec::new();
        self.pending.retain_mut(|p| {
            if p.remaining > dt {
                p.remaining -= dt;
                return true;
            }
            match p.interval {
                None => {
                    fired.push((p.remaining, p.seq, p.action.clone()));
                    false
                }
                Some(interval) => {
                    let mut due = p.remaining;
                    while due <= dt {
                        fired.push((due, p.seq, p.action.clone()));
                        due += interval;
                    }
                    p.remaining = due - dt;
                    true
                }
            }
        });

        fired.sort_by_key(|(due, seq, _)| (*due, *seq));
        fired.into_iter().map(|(_, _, action)| action).collect()
    }
}

// ── Cooldown window ───────────────────────────────────────────────────────────

/// A not-ready/ready gate.  `trigger` is the only way to become not-ready and
/// `expire` (called when the owner's timer fires) the only way back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CooldownWindow {
    start: u64,
    duration: u64,
    ready: bool,
}

impl CooldownWindow {
    pub fn new(duration: u64) -> Self {
        Self {
            start: 0,
            duration,
            ready: true,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn trigger(&mut self, now: u64) {
        self.ready = false;
        self.start = now;
    }

    pub fn expire(&mut self) {
        self.ready = true;
    }

    /// 100 when ready, otherwise elapsed/duration rounded to the nearest
    /// percent.  Never reports 100 before expiry.
    pub fn percent(&self, now: u64) -> u8 {
        if self.ready {
            return 100;
        }
        if self.duration == 0 {
            return 99;
        }
        let elapsed = now.saturating_sub(self.start) as f64;
        let pct = (elapsed / self.duration as f64 * 100.0).round();
        pct.clamp(0.0, 99.0) as u8
    }
}
