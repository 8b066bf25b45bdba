//! Delayed callbacks as plain data.
//!
//! Every delayed transition (explosion trigger, settle, look reverts, effect
//! lifetimes) is queued here with an absolute due time and drained by the
//! engine on each frame or timer pump. Entries are never cancelled
//! individually; stale ones are filtered by the handler.

#[derive(Clone, Debug)]
struct Entry<E> {
    due_ms: f64,
    seq: u64,
    event: E,
}

#[derive(Clone, Debug)]
pub struct Schedule<E> {
    entries: Vec<Entry<E>>,
    next_seq: u64,
}

impl<E> Default for Schedule<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<E> Schedule<E> {
    pub fn after(&mut self, now_ms: f64, delay_ms: f64, event: E) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry {
            due_ms: now_ms + delay_ms.max(0.0),
            seq,
            event,
        });
    }

    /// Remove and return every event due at `now_ms`, earliest first;
    /// ties keep insertion order.
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<E> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].due_ms <= now_ms {
                due.push(self.entries.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|e| e.event).collect()
    }

    pub fn next_due_ms(&self) -> Option<f64> {
        self.entries.iter().map(|e| e.due_ms).min_by(|a, b| a.total_cmp(b))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Rate gate for the main tick.
#[derive(Clone, Debug, Default)]
pub struct FrameGate {
    last_tick_ms: Option<f64>,
}

impl FrameGate {
    /// Returns true (and records the tick) when at least `interval_ms` has
    /// passed since the previous accepted tick.
    pub fn ready(&mut self, now_ms: f64, interval_ms: f64) -> bool {
        match self.last_tick_ms {
            Some(last) if now_ms - last < interval_ms => false,
            _ => {
                self.last_tick_ms = Some(now_ms);
                true
            }
        }
    }

    pub fn reset(&mut self) {
        self.last_tick_ms = None;
    }
}

/// Accept at most one event per window; the rest are dropped.
#[derive(Clone, Debug)]
pub struct Throttle {
    window_ms: f64,
    last_ms: Option<f64>,
}

impl Throttle {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms,
            last_ms: None,
        }
    }

    pub fn accept(&mut self, now_ms: f64) -> bool {
        match self.last_ms {
            Some(last) if now_ms - last < self.window_ms => false,
            _ => {
                self.last_ms = Some(now_ms);
                true
            }
        }
    }
}
