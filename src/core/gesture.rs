//! # Gesture Recognition
//!
//! Classifies a stream of raw touch samples into discrete [`GestureEvent`]s.
//!
//! ```text
//! on_touch_start ──► Single { anchor, long_press_at } ──► on_touch_end ──► Tap / DoubleTap / Swipe*
//!        │                    │ any move cancels long-press
//!        │                    ▼
//!        │              poll(now) ──► LongPress (consumes the sequence)
//!        ▼
//!   2+ touches ──► Pinch { baseline } ──► on_touch_move ──► PinchIn / PinchOut (repeatable)
//! ```
//!
//! Timers are deadlines, not OS timers. The host sizes its event-loop wait
//! with [`GestureRecognizer::next_deadline`] and calls
//! [`GestureRecognizer::poll`] every iteration. Every entry point flushes
//! elapsed timers first, so a late poll never swallows a pending tap.
//! When a flushed timer and a new gesture land in the same call, the newer
//! one is held back and returned by the next `poll`, keeping them in order.
//!
//! Single taps are held back for `double_tap_delay_ms` so a second tap can
//! merge into a `DoubleTap`.

use log::debug;
use std::collections::VecDeque;

/// One raw touch point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchSample {
    pub x: f32,
    pub y: f32,
    pub timestamp_ms: u64,
}

impl TouchSample {
    pub fn new(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self { x, y, timestamp_ms }
    }

    fn distance_to(&self, other: &TouchSample) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// A recognized gesture. At most one is returned per recognizer call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureEvent {
    SwipeLeft,
    SwipeRight,
    SwipeUp,
    SwipeDown,
    Tap,
    DoubleTap,
    LongPress,
    PinchIn,
    PinchOut,
}

impl GestureEvent {
    pub fn label(&self) -> &'static str {
        match self {
            Self::SwipeLeft => "swipe left",
            Self::SwipeRight => "swipe right",
            Self::SwipeUp => "swipe up",
            Self::SwipeDown => "swipe down",
            Self::Tap => "tap",
            Self::DoubleTap => "double tap",
            Self::LongPress => "long press",
            Self::PinchIn => "pinch in",
            Self::PinchOut => "pinch out",
        }
    }

    /// Route this event to the matching callback on `handler`.
    pub fn dispatch(self, handler: &mut dyn GestureHandler) {
        match self {
            Self::SwipeLeft => handler.on_swipe_left(),
            Self::SwipeRight => handler.on_swipe_right(),
            Self::SwipeUp => handler.on_swipe_up(),
            Self::SwipeDown => handler.on_swipe_down(),
            Self::Tap => handler.on_tap(),
            Self::DoubleTap => handler.on_double_tap(),
            Self::LongPress => handler.on_long_press(),
            Self::PinchIn => handler.on_pinch_in(),
            Self::PinchOut => handler.on_pinch_out(),
        }
    }
}

/// Gesture callbacks a host may implement. Every callback defaults to a no-op,
/// so hosts only override what they care about.
pub trait GestureHandler {
    fn on_swipe_left(&mut self) {}
    fn on_swipe_right(&mut self) {}
    fn on_swipe_up(&mut self) {}
    fn on_swipe_down(&mut self) {}
    fn on_tap(&mut self) {}
    fn on_double_tap(&mut self) {}
    fn on_long_press(&mut self) {}
    fn on_pinch_in(&mut self) {}
    fn on_pinch_out(&mut self) {}
}

/// Thresholds, fixed for the lifetime of a recognizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    /// Minimum travel on one axis to qualify as a swipe.
    pub swipe_threshold_px: f32,
    /// Minimum average speed to qualify as a swipe (rejects slow drags).
    pub velocity_threshold_px_per_ms: f32,
    pub long_press_delay_ms: u64,
    /// Max gap between two taps to merge them; also the latency of a lone tap.
    pub double_tap_delay_ms: u64,
    /// Minimum change in finger distance per pinch step.
    pub pinch_threshold_px: f32,
}

pub const DEFAULT_SWIPE_THRESHOLD_PX: f32 = 50.0;
pub const DEFAULT_VELOCITY_THRESHOLD_PX_PER_MS: f32 = 0.3;
pub const DEFAULT_LONG_PRESS_DELAY_MS: u64 = 500;
pub const DEFAULT_DOUBLE_TAP_DELAY_MS: u64 = 300;
pub const DEFAULT_PINCH_THRESHOLD_PX: f32 = 30.0;

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            swipe_threshold_px: DEFAULT_SWIPE_THRESHOLD_PX,
            velocity_threshold_px_per_ms: DEFAULT_VELOCITY_THRESHOLD_PX_PER_MS,
            long_press_delay_ms: DEFAULT_LONG_PRESS_DELAY_MS,
            double_tap_delay_ms: DEFAULT_DOUBLE_TAP_DELAY_MS,
            pinch_threshold_px: DEFAULT_PINCH_THRESHOLD_PX,
        }
    }
}

/// In-flight state for the current touch sequence.
#[derive(Debug)]
enum Sequence {
    Single {
        anchor: TouchSample,
        /// Most recent move sample. `None` means the finger never moved.
        last: Option<TouchSample>,
        long_press_at: Option<u64>,
        /// Set once a long-press fired; nothing else may fire for this sequence.
        consumed: bool,
    },
    Pinch {
        baseline: f32,
    },
}

#[derive(Debug, Clone, Copy)]
struct PendingTap {
    tapped_at: u64,
    fires_at: u64,
}

/// Touch gesture classifier for one input surface.
#[derive(Debug)]
pub struct GestureRecognizer {
    config: GestureConfig,
    sequence: Option<Sequence>,
    pending_tap: Option<PendingTap>,
    /// Events already due, oldest first.
    ready: VecDeque<GestureEvent>,
}

impl GestureRecognizer {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            sequence: None,
            pending_tap: None,
            ready: VecDeque::new(),
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// True while a touch sequence is in flight.
    pub fn is_tracking(&self) -> bool {
        self.sequence.is_some()
    }

    pub fn has_pending_tap(&self) -> bool {
        self.pending_tap.is_some()
    }

    /// Start (or extend) a touch sequence. `touches` holds every finger
    /// currently on the surface.
    ///
    /// A second finger converts the sequence to pinch mode, which suppresses
    /// long-press and swipe detection until the sequence ends.
    pub fn on_touch_start(&mut self, touches: &[TouchSample]) -> Option<GestureEvent> {
        let first = touches.first()?;
        self.fire_elapsed(first.timestamp_ms);

        match touches {
            [a, b, ..] => {
                let baseline = a.distance_to(b);
                debug!("Pinch sequence started, baseline {:.1}px", baseline);
                self.sequence = Some(Sequence::Pinch { baseline });
            }
            [anchor] => {
                self.sequence = Some(Sequence::Single {
                    anchor: *anchor,
                    last: None,
                    long_press_at: Some(anchor.timestamp_ms.saturating_add(self.config.long_press_delay_ms)),
                    consumed: false,
                });
            }
            [] => {}
        }

        self.ready.pop_front()
    }

    /// Feed the current finger positions of an active sequence.
    ///
    /// Single touch: records the sample and cancels a pending long-press.
    /// Two touches: emits a pinch step whenever the finger distance moved more
    /// than `pinch_threshold_px` from the baseline, then rebases.
    pub fn on_touch_move(&mut self, touches: &[TouchSample]) -> Option<GestureEvent> {
        let now = touches.first()?.timestamp_ms;
        self.fire_elapsed(now);
        let event = self.track_move(touches);
        self.emit(event)
    }

    fn track_move(&mut self, touches: &[TouchSample]) -> Option<GestureEvent> {
        let sequence = self.sequence.as_mut()?;
        match (sequence, touches) {
            (Sequence::Single { consumed: true, .. }, _) => None,
            (sequence @ Sequence::Single { .. }, [a, b, ..]) => {
                let baseline = a.distance_to(b);
                debug!("Second finger joined, switching to pinch at {:.1}px", baseline);
                *sequence = Sequence::Pinch { baseline };
                None
            }
            (
                Sequence::Single {
                    last,
                    long_press_at,
                    ..
                },
                [sample],
            ) => {
                *last = Some(*sample);
                if long_press_at.take().is_some() {
                    debug!("Long-press cancelled by movement");
                }
                None
            }
            (Sequence::Pinch { baseline }, [a, b, ..]) => {
                let distance = a.distance_to(b);
                let delta = distance - *baseline;
                if delta.abs() <= self.config.pinch_threshold_px {
                    return None;
                }
                *baseline = distance;
                if delta > 0.0 {
                    Some(GestureEvent::PinchOut)
                } else {
                    Some(GestureEvent::PinchIn)
                }
            }
            _ => None,
        }
    }

    /// Finish the current sequence and classify it.
    pub fn on_touch_end(&mut self, now_ms: u64) -> Option<GestureEvent> {
        let Some(sequence) = self.sequence.take() else {
            return self.poll(now_ms);
        };
        // An older tap that elapsed meanwhile goes out before this sequence.
        self.fire_elapsed(now_ms);

        let event = match sequence {
            Sequence::Pinch { .. } => None,
            Sequence::Single { consumed: true, .. } => None,
            Sequence::Single {
                long_press_at: Some(deadline),
                ..
            } if now_ms >= deadline => {
                // Held past the delay without an intervening poll.
                Some(GestureEvent::LongPress)
            }
            Sequence::Single {
                last: None,
                ..
            } => self.register_tap(now_ms),
            Sequence::Single {
                anchor,
                last: Some(last),
                ..
            } => self.classify_swipe(&anchor, &last),
        };
        self.emit(event)
    }

    /// Abandon the current sequence without emitting anything.
    /// A pending tap from an earlier sequence is kept.
    pub fn on_touch_cancel(&mut self) {
        if self.sequence.take().is_some() {
            debug!("Touch sequence cancelled");
        }
    }

    /// Drop every in-flight sequence and timer. Call when the owning surface
    /// goes away.
    pub fn reset(&mut self) {
        self.sequence = None;
        self.pending_tap = None;
        self.ready.clear();
    }

    /// Return the oldest due event, firing elapsed timers first.
    pub fn poll(&mut self, now_ms: u64) -> Option<GestureEvent> {
        self.fire_elapsed(now_ms);
        self.ready.pop_front()
    }

    /// Queue every elapsed timer in deadline order.
    fn fire_elapsed(&mut self, now_ms: u64) {
        let tap_due = self.pending_tap.filter(|p| now_ms >= p.fires_at);
        let long_press_due = match &self.sequence {
            Some(Sequence::Single {
                long_press_at: Some(deadline),
                ..
            }) if now_ms >= *deadline => Some(*deadline),
            _ => None,
        };

        // A tap that fell due before the long-press goes out first.
        if let Some(pending) = tap_due
            && long_press_due.is_none_or(|deadline| pending.fires_at <= deadline)
        {
            self.pending_tap = None;
            self.ready.push_back(GestureEvent::Tap);
        }
        if long_press_due.is_some()
            && let Some(Sequence::Single {
                long_press_at,
                consumed,
                ..
            }) = self.sequence.as_mut()
        {
            *long_press_at = None;
            *consumed = true;
            debug!("Long-press fired");
            self.ready.push_back(GestureEvent::LongPress);
        }
        if self.pending_tap.is_some_and(|p| now_ms >= p.fires_at) {
            self.pending_tap = None;
            self.ready.push_back(GestureEvent::Tap);
        }
    }

    /// Queue `event` behind anything already due and return the oldest.
    fn emit(&mut self, event: Option<GestureEvent>) -> Option<GestureEvent> {
        self.ready.extend(event);
        self.ready.pop_front()
    }

    /// Earliest instant at which [`poll`](Self::poll) has something to fire.
    /// Held-back events are due at once, reported as `0`.
    pub fn next_deadline(&self) -> Option<u64> {
        if !self.ready.is_empty() {
            return Some(0);
        }
        let long_press = match &self.sequence {
            Some(Sequence::Single { long_press_at, .. }) => *long_press_at,
            _ => None,
        };
        let tap = self.pending_tap.map(|p| p.fires_at);
        match (long_press, tap) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Merge a no-move release with a pending tap, or arm a new pending tap.
    fn register_tap(&mut self, now_ms: u64) -> Option<GestureEvent> {
        let delay = self.config.double_tap_delay_ms;
        match self.pending_tap.take() {
            Some(previous) if now_ms.saturating_sub(previous.tapped_at) < delay => {
                Some(GestureEvent::DoubleTap)
            }
            previous => {
                self.pending_tap = Some(PendingTap {
                    tapped_at: now_ms,
                    fires_at: now_ms.saturating_add(delay),
                });
                // An older tap that outlived its window still has to fire.
                previous.map(|_| GestureEvent::Tap)
            }
        }
    }

    fn classify_swipe(&self, anchor: &TouchSample, last: &TouchSample) -> Option<GestureEvent> {
        let elapsed = last.timestamp_ms.saturating_sub(anchor.timestamp_ms);
        if elapsed == 0 {
            return None;
        }

        let dx = last.x - anchor.x;
        let dy = last.y - anchor.y;
        let velocity = dx.hypot(dy) / elapsed as f32;
        let threshold = self.config.swipe_threshold_px;

        if velocity <= self.config.velocity_threshold_px_per_ms {
            debug!("Drag discarded: {:.3}px/ms is too slow", velocity);
            return None;
        }
        if dx.abs() <= threshold && dy.abs() <= threshold {
            debug!("Drag discarded: ({:.1}, {:.1}) is too short", dx, dy);
            return None;
        }

        // Ties resolve to the horizontal axis.
        let event = if dx.abs() >= dy.abs() {
            if dx > 0.0 {
                GestureEvent::SwipeRight
            } else {
                GestureEvent::SwipeLeft
            }
        } else if dy > 0.0 {
            GestureEvent::SwipeDown
        } else {
            GestureEvent::SwipeUp
        };
        Some(event)
    }
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}
