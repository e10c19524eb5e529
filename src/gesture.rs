//! Single-button gesture classification.
//!
//! One mechanical button is turned into at most one [`Press`] per
//! gesture: single, double, or long.  Two contexts take part:
//!
//! - The edge handler (interrupt context, [`EdgeHandler`]) sees every
//!   press and release transition of the line.  It debounces and
//!   latches press edges into the [`EdgeLatch`] and publishes the line
//!   level with its last release time in a [`ButtonLevel`].
//! - The main cycle calls [`GestureClassifier::poll`] once per cycle,
//!   which consumes the latched edge and does all the classification.
//!
//! Each shared object is a single atomic word with a flag in bit 31 and
//! a timestamp in bits 0..=30.  For the latch the flag means pending
//! (producer sets, consumer clears); for the level it means held, and
//! only the producer writes.
//!
//! Timestamps are milliseconds truncated to 31 bits; all differences
//! use wrapping arithmetic, so the wrap every ~24.8 days is harmless.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::config::{BUTTON_DEBOUNCE_MS, DOUBLE_PRESS_WINDOW_MS, LONG_PRESS_MS};
use crate::hw::{ButtonLine, Clock};

const PENDING: u32 = 1 << 31;
const HELD: u32 = 1 << 31;

/// Mask applied to every timestamp the classifier stores or compares.
pub const TICK_MASK: u32 = !PENDING;

/// Milliseconds from `from` to `to` on the 31-bit tick circle.
#[inline]
pub fn elapsed(from: u32, to: u32) -> u32 {
    to.wrapping_sub(from) & TICK_MASK
}

/// Result of one [`GestureClassifier::poll`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Press {
    /// Nothing to report this cycle.
    #[default]
    None,
    /// A short press with no second press inside the double-press window.
    Single,
    /// A second press began inside the window after the first release.
    Double,
    /// The button was held for at least the long-press threshold.
    Long,
}

/// Thresholds the classifier works with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GestureTiming {
    /// Press edges closer than this to the previous accepted press, or
    /// to the last release, are contact bounce.
    pub debounce_ms: u32,
    /// Hold duration that makes a press long.
    pub long_press_ms: u32,
    /// Maximum gap between the first release and the second press.
    pub double_press_window_ms: u32,
}

impl Default for GestureTiming {
    fn default() -> Self {
        Self {
            debounce_ms: BUTTON_DEBOUNCE_MS,
            long_press_ms: LONG_PRESS_MS,
            double_press_window_ms: DOUBLE_PRESS_WINDOW_MS,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Edge latch (shared with interrupt context)
// ═══════════════════════════════════════════════════════════════════════════

/// Single-producer/single-consumer cell holding the pending press edge.
///
/// Producer: the edge handler (`record`).
/// Consumer: the polling step (`take`).
pub struct EdgeLatch {
    word: AtomicU32,
    debounce_ms: u32,
}

impl EdgeLatch {
    /// Create an empty latch, usable in a `static`.
    pub const fn new(debounce_ms: u32) -> Self {
        Self {
            word: AtomicU32::new(0),
            debounce_ms,
        }
    }

    /// Latch a press edge seen at `now_ms`.
    ///
    /// Returns `false` when the edge falls inside the debounce interval
    /// of the previous accepted press and was dropped.  O(1), no
    /// loops; safe to call from an interrupt handler.
    pub fn record(&self, now_ms: u32) -> bool {
        let now = now_ms & TICK_MASK;
        let last = self.word.load(Ordering::Acquire) & TICK_MASK;
        if elapsed(last, now) <= self.debounce_ms {
            return false;
        }
        self.word.store(PENDING | now, Ordering::Release);
        true
    }

    /// Consume the pending edge, returning its timestamp.
    ///
    /// The debounce timestamp stays in place.
    pub fn take(&self) -> Option<u32> {
        let word = self.word.fetch_and(TICK_MASK, Ordering::AcqRel);
        if word & PENDING != 0 {
            Some(word & TICK_MASK)
        } else {
            None
        }
    }

    /// `true` if an edge is latched and not yet consumed.
    pub fn is_pending(&self) -> bool {
        self.word.load(Ordering::Acquire) & PENDING != 0
    }

    /// Timestamp of the last accepted press.
    pub fn last_debounced_ms(&self) -> u32 {
        self.word.load(Ordering::Acquire) & TICK_MASK
    }
}

impl Default for EdgeLatch {
    fn default() -> Self {
        Self::new(BUTTON_DEBOUNCE_MS)
    }
}

/// Live button level and the time the line was last released.
///
/// Bit 31 is set while held, bits 0..=30 hold the last release time.
/// Written only by the [`EdgeHandler`]; the polling side reads it
/// through [`ButtonLine`] so a tap that ended before the poll still
/// reports when it really ended.
pub struct ButtonLevel {
    word: AtomicU32,
}

impl ButtonLevel {
    pub const fn new() -> Self {
        Self {
            word: AtomicU32::new(0),
        }
    }

    /// The line went down; the last release time is kept.
    pub fn set_pressed(&self) {
        self.word.fetch_or(HELD, Ordering::AcqRel);
    }

    /// The line came back up at `now_ms`.
    pub fn set_released(&self, now_ms: u32) {
        self.word.store(now_ms & TICK_MASK, Ordering::Release);
    }

    pub fn is_pressed(&self) -> bool {
        self.word.load(Ordering::Acquire) & HELD != 0
    }

    pub fn last_release_ms(&self) -> u32 {
        self.word.load(Ordering::Acquire) & TICK_MASK
    }
}

impl Default for ButtonLevel {
    fn default() -> Self {
        Self::new()
    }
}

impl ButtonLine for &ButtonLevel {
    fn is_pressed(&mut self) -> bool {
        ButtonLevel::is_pressed(*self)
    }

    fn released_at_ms(&mut self) -> Option<u32> {
        Some(self.last_release_ms())
    }
}

/// Interrupt-context side of the button: filters raw line transitions,
/// latches qualifying press edges and publishes the line level.
///
/// Contacts bounce on release too; a falling edge right after a release
/// is not a new press.
pub struct EdgeHandler<'a> {
    latch: &'a EdgeLatch,
    level: &'a ButtonLevel,
    debounce_ms: u32,
    released_at: Option<u32>,
}

impl<'a> EdgeHandler<'a> {
    pub const fn new(latch: &'a EdgeLatch, level: &'a ButtonLevel, debounce_ms: u32) -> Self {
        Self {
            latch,
            level,
            debounce_ms,
            released_at: None,
        }
    }

    /// The line went to the pressed level at `now_ms`.
    ///
    /// Returns `true` if the edge was latched.
    pub fn on_press(&mut self, now_ms: u32) -> bool {
        self.level.set_pressed();
        if let Some(released) = self.released_at {
            if elapsed(released, now_ms & TICK_MASK) <= self.debounce_ms {
                return false;
            }
        }
        self.latch.record(now_ms)
    }

    /// The line went back to the released level at `now_ms`.
    pub fn on_release(&mut self, now_ms: u32) {
        self.released_at = Some(now_ms & TICK_MASK);
        self.level.set_released(now_ms);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Hold detection
// ═══════════════════════════════════════════════════════════════════════════

/// Outcome of waiting on a press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Hold {
    /// The button was let go at `at_ms` before the long-press threshold.
    Released { at_ms: u32 },
    /// The button was still held when the threshold passed.
    Long,
}

/// How the classifier waits out a press to tell short from long.
pub trait HoldStrategy {
    /// Wait until the press that started at `press_start_ms` is released
    /// or has lasted `long_press_ms`, whichever comes first.
    fn wait_for_release(&mut self, press_start_ms: u32, long_press_ms: u32) -> Hold;
}

/// Spins on the button line until release or the long-press threshold.
///
/// Blocks the caller for up to the full threshold.  The edge handler
/// must run at a higher priority to stay live meanwhile.
pub struct BusyWaitHold<L, C> {
    line: L,
    clock: C,
}

impl<L: ButtonLine, C: Clock> BusyWaitHold<L, C> {
    pub fn new(line: L, clock: C) -> Self {
        Self { line, clock }
    }

    /// The line's own release time when it falls between the press and
    /// `now`; otherwise `now`.  A tap that ended before the poll keeps
    /// its real release time.
    fn release_time(&mut self, start: u32, now: u32) -> u32 {
        match self.line.released_at_ms() {
            Some(at) if elapsed(start, at & TICK_MASK) <= elapsed(start, now) => at & TICK_MASK,
            _ => now,
        }
    }
}

impl<L: ButtonLine, C: Clock> HoldStrategy for BusyWaitHold<L, C> {
    fn wait_for_release(&mut self, press_start_ms: u32, long_press_ms: u32) -> Hold {
        let start = press_start_ms & TICK_MASK;
        loop {
            let pressed = self.line.is_pressed();
            let now = self.clock.now_ms() & TICK_MASK;
            if !pressed {
                return Hold::Released {
                    at_ms: self.release_time(start, now),
                };
            }
            if elapsed(start, now) >= long_press_ms {
                return Hold::Long;
            }
            core::hint::spin_loop();
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Classifier (polling context)
// ═══════════════════════════════════════════════════════════════════════════

/// Turns latched edges plus elapsed time into [`Press`] events.
pub struct GestureClassifier<'a> {
    edges: &'a EdgeLatch,
    timing: GestureTiming,
    /// When the press being (or last) classified started.
    press_start_ms: u32,
    /// Release time of a short press still waiting for its partner.
    awaiting_since: Option<u32>,
}

impl<'a> GestureClassifier<'a> {
    pub fn new(edges: &'a EdgeLatch, timing: GestureTiming) -> Self {
        Self {
            edges,
            timing,
            press_start_ms: 0,
            awaiting_since: None,
        }
    }

    /// `true` while a short press waits for a possible second press.
    pub fn is_awaiting_second_press(&self) -> bool {
        self.awaiting_since.is_some()
    }

    pub fn press_start_ms(&self) -> u32 {
        self.press_start_ms
    }

    /// Run one classification step at `now_ms`.
    ///
    /// A long press is reported on its own and discards any short press
    /// waiting for a partner; it never completes a double press.
    pub fn poll<H: HoldStrategy>(&mut self, now_ms: u32, hold: &mut H) -> Press {
        let mut now = now_ms & TICK_MASK;

        if let Some(edge_ms) = self.edges.take() {
            self.press_start_ms = edge_ms;

            let released = match hold.wait_for_release(edge_ms, self.timing.long_press_ms) {
                Hold::Long => {
                    self.awaiting_since = None;
                    return Press::Long;
                }
                Hold::Released { at_ms } => at_ms & TICK_MASK,
            };
            if elapsed(now, released) < elapsed(released, now) {
                now = released;
            }

            if let Some(first_release) = self.awaiting_since.take() {
                self.awaiting_since = Some(released);
                if elapsed(first_release, edge_ms) < self.timing.double_press_window_ms {
                    self.awaiting_since = None;
                    return Press::Double;
                }
                // The partner came too late: the first press was a single
                // one, the new press starts its own window.
                return Press::Single;
            }
            self.awaiting_since = Some(released);
        }

        if let Some(first_release) = self.awaiting_since {
            if elapsed(first_release, now) > self.timing.double_press_window_ms {
                self.awaiting_since = None;
                return Press::Single;
            }
        }

        Press::None
    }
}
