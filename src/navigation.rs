//! Buffered swipe navigation.
//!
//! The controller keeps `2k + 1` months laid out side by side as pages and a
//! single `animated_offset` positioning that strip. At rest the committed
//! month sits at the pivot, `-k * page_width`.
//!
//! Sign convention: a negative translation drags the strip toward the leading
//! edge and reveals the *next* month ([`SwipeDirection::Forward`]); a positive
//! translation reveals the previous month ([`SwipeDirection::Backward`]).
//!
//! Animations are requested through [`Animator`]. The host reports completion
//! with [`NavigationController::on_tween_complete`], passing back the
//! [`TweenId`]. Every new tween takes a fresh id, so completions of superseded
//! tweens are recognised and dropped.

use std::collections::VecDeque;
use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::config::SwipeConfig;
use crate::error::CalendarError;
use crate::CalendarDate;

/// Identity of one issued tween
pub type TweenId = u64;

/// An animation request: drive the offset from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub id: TweenId,
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
}

/// Animation executor supplied by the host.
pub trait Animator {
    /// Starts driving the offset toward `tween.to`, superseding any tween in
    /// flight. Once settled the host calls
    /// [`NavigationController::on_tween_complete`] with `tween.id`, outside
    /// the call that issued it.
    fn animate(&mut self, tween: Tween);

    /// Moves the offset immediately, cancelling any tween in flight. No
    /// completion follows, neither for this call nor for the cancelled tween.
    ///
    /// The controller snaps with this on every commit, including far jumps
    /// and same-month commits that interrupt a running tween, so a host that
    /// leaves the old tween running ends up with two competing motions.
    fn set_offset(&mut self, offset: f64);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SwipeDirection {
    #[default]
    None,
    /// Toward the next month
    Forward,
    /// Toward the previous month
    Backward,
}

impl SwipeDirection {
    /// Direction implied by a drag translation
    pub fn from_translation(translation: f64) -> Self {
        if translation < 0.0 {
            Self::Forward
        } else if translation > 0.0 {
            Self::Backward
        } else {
            Self::None
        }
    }

    /// Month step this direction commits to
    pub const fn month_offset(self) -> i32 {
        match self {
            Self::None => 0,
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// Coarse state of the controller. Navigation is locked in every phase but
/// `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationPhase {
    Idle,
    Dragging,
    Animating,
}

/// Notifications for the host, drained with
/// [`NavigationController::drain_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationEvent {
    /// Prev/next controls should be disabled while `locked`
    LockChanged { locked: bool },
    /// The committed month moved
    MonthCommitted {
        previous: CalendarDate,
        current: CalendarDate,
    },
}

/// What happens when the active tween settles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Navigate { target: CalendarDate },
    Commit { direction: SwipeDirection },
    Revert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Dragging,
    Animating { id: TweenId, transition: Transition },
}

fn finite(what: &'static str, value: f64) -> Result<f64, CalendarError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalendarError::NonFiniteValue { what, value })
    }
}

/// `2k + 1` months centred on `center`, one month apart. Neighbours are
/// first-of-month dates; the centre keeps its day.
pub fn month_buffer(center: CalendarDate, buffer_size: usize) -> Vec<CalendarDate> {
    let k = i32::try_from(buffer_size).unwrap_or(i32::MAX);
    (-k..=k)
        .map(|offset| {
            if offset == 0 {
                center
            } else {
                center.shift_month(offset)
            }
        })
        .collect()
}

/// Reconciles the committed month with gesture- and tween-driven motion.
#[derive(Debug)]
pub struct NavigationController<A> {
    config: SwipeConfig,
    buffer_size: i32,
    animator: A,
    committed: CalendarDate,
    window: Vec<CalendarDate>,
    offset: f64,
    page_width: f64,
    phase: Phase,
    direction: SwipeDirection,
    locked: bool,
    next_tween: TweenId,
    events: VecDeque<NavigationEvent>,
}

impl<A: Animator> NavigationController<A> {
    /// Creates an idle, unmeasured controller showing `committed`.
    ///
    /// # Errors
    /// Returns the [`SwipeConfig::validate`] error for an invalid config.
    pub fn new(
        committed: CalendarDate,
        config: SwipeConfig,
        animator: A,
    ) -> Result<Self, CalendarError> {
        config.validate()?;
        let buffer_size = i32::try_from(config.buffer_size())
            .map_err(|_| CalendarError::InvalidBufferSize(config.buffer_size()))?;
        Ok(Self {
            window: month_buffer(committed, config.buffer_size()),
            config,
            buffer_size,
            animator,
            committed,
            offset: 0.0,
            page_width: 0.0,
            phase: Phase::Idle,
            direction: SwipeDirection::None,
            locked: false,
            next_tween: 1,
            events: VecDeque::new(),
        })
    }

    // --- Accessors ---

    pub const fn committed_date(&self) -> CalendarDate {
        self.committed
    }

    /// Buffered months, oldest first; the committed month is in the middle.
    pub fn window(&self) -> &[CalendarDate] {
        &self.window
    }

    pub const fn animated_offset(&self) -> f64 {
        self.offset
    }

    /// Zero until the host reports a layout
    pub const fn page_width(&self) -> f64 {
        self.page_width
    }

    pub const fn is_measured(&self) -> bool {
        self.page_width > 0.0
    }

    /// Offset at which the committed month is fully shown
    pub fn rest_position(&self) -> f64 {
        -f64::from(self.buffer_size) * self.page_width
    }

    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    pub const fn phase(&self) -> NavigationPhase {
        match self.phase {
            Phase::Idle => NavigationPhase::Idle,
            Phase::Dragging => NavigationPhase::Dragging,
            Phase::Animating { .. } => NavigationPhase::Animating,
        }
    }

    /// Direction tracked by the current or last drag
    pub const fn direction(&self) -> SwipeDirection {
        self.direction
    }

    /// Id of the tween whose completion is awaited, if any
    pub const fn active_tween(&self) -> Option<TweenId> {
        match self.phase {
            Phase::Animating { id, .. } => Some(id),
            Phase::Idle | Phase::Dragging => None,
        }
    }

    pub const fn config(&self) -> &SwipeConfig {
        &self.config
    }

    pub const fn animator(&self) -> &A {
        &self.animator
    }

    pub const fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }

    /// Takes the notifications queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<NavigationEvent> {
        self.events.drain(..).collect()
    }

    // --- External navigation ---

    /// Navigates to the month of `target`.
    ///
    /// Within the buffer the strip animates one page per month of distance
    /// and commits when the tween settles. Farther jumps, or any jump before
    /// the page is measured, commit at once. A request arriving mid-transition
    /// restarts the tween; the latest request wins.
    pub fn go_to_date(&mut self, target: CalendarDate) {
        let diff = target.month_difference(&self.committed);
        if diff == 0 {
            if self.phase != Phase::Idle {
                debug!(%target, "navigation back to committed month; settling");
            }
            self.commit(target);
            return;
        }

        if diff.abs() > self.buffer_size || !self.is_measured() {
            debug!(
                %target,
                diff,
                measured = self.is_measured(),
                "jump outside buffer; committing without animation"
            );
            self.commit(target);
            return;
        }

        let destination = self.rest_position() - f64::from(diff) * self.page_width;
        self.start_tween(Transition::Navigate { target }, destination);
    }

    /// Moves by `months` as the prev/next controls do.
    ///
    /// # Errors
    /// Returns `CalendarError::NavigationLocked` while a drag or tween is in
    /// progress, and `CalendarError::DateOutOfRange` when the target month is
    /// outside the supported years. Either way nothing moves.
    pub fn step_months(&mut self, months: i32) -> Result<(), CalendarError> {
        if self.locked {
            return Err(CalendarError::NavigationLocked);
        }
        let Some(target) = self.committed.checked_shift_month(months) else {
            warn!(from = %self.committed, months, "month step leaves supported years; ignoring");
            return Err(CalendarError::DateOutOfRange {
                from: self.committed,
                months,
            });
        };
        self.go_to_date(target);
        Ok(())
    }

    // --- Host callbacks ---

    /// Records the page width reported by layout. Returns `false` when the
    /// width is rejected.
    pub fn on_layout_measured(&mut self, page_width: f64) -> bool {
        if let Err(err) = finite("page width", page_width) {
            warn!(%err, "ignoring layout");
            return false;
        }
        if page_width < 0.0 {
            warn!(page_width, "ignoring negative layout width");
            return false;
        }
        self.page_width = page_width;
        if self.phase == Phase::Idle {
            self.offset = self.rest_position();
            self.animator.set_offset(self.offset);
        }
        debug!(page_width, rest = self.rest_position(), "layout measured");
        true
    }

    /// Starts a drag. Ignored before measurement or while a tween runs.
    pub fn on_gesture_begin(&mut self) -> bool {
        if !self.is_measured() {
            debug!("gesture before layout measurement; ignoring");
            return false;
        }
        if matches!(self.phase, Phase::Animating { .. }) {
            debug!("gesture during transition; ignoring");
            return false;
        }
        self.phase = Phase::Dragging;
        self.direction = SwipeDirection::None;
        self.set_locked(true);
        true
    }

    /// Follows the drag: `translation` is the raw delta since the gesture
    /// began.
    pub fn on_gesture_update(&mut self, translation: f64) -> bool {
        if self.phase != Phase::Dragging {
            return false;
        }
        if let Err(err) = finite("gesture translation", translation) {
            warn!(%err, "ignoring gesture update");
            return false;
        }
        self.offset = self.rest_position() + translation;
        let direction = SwipeDirection::from_translation(translation);
        if direction != SwipeDirection::None {
            self.direction = direction;
        }
        self.animator.set_offset(self.offset);
        trace!(translation, offset = self.offset, direction = ?self.direction, "drag");
        true
    }

    /// Ends the drag, committing one month in the tracked direction when the
    /// travelled distance exceeds `threshold * page_width`, reverting
    /// otherwise.
    pub fn on_gesture_end(&mut self) -> bool {
        if self.phase != Phase::Dragging {
            return false;
        }
        let rest = self.rest_position();
        let travelled = (rest.abs() - self.offset.abs()).abs();
        let threshold = self.page_width * self.config.threshold();
        let commit = self.is_measured()
            && travelled > threshold
            && self.direction != SwipeDirection::None
            && self
                .committed
                .checked_shift_month(self.direction.month_offset())
                .is_some();

        if commit {
            let direction = self.direction;
            debug!(travelled, threshold, ?direction, "swipe committed");
            let destination = rest - f64::from(direction.month_offset()) * self.page_width;
            self.start_tween(Transition::Commit { direction }, destination);
        } else {
            debug!(travelled, threshold, "swipe reverted");
            self.start_tween(Transition::Revert, rest);
        }
        true
    }

    /// The gesture was interrupted by the host; snap back.
    pub fn on_gesture_cancel(&mut self) -> bool {
        if self.phase != Phase::Dragging {
            return false;
        }
        let rest = self.rest_position();
        self.start_tween(Transition::Revert, rest);
        true
    }

    /// Completion of tween `id`. Completions of superseded tweens are
    /// discarded.
    pub fn on_tween_complete(&mut self, id: TweenId) {
        let Phase::Animating {
            id: active,
            transition,
        } = self.phase
        else {
            debug!(id, "tween completion with no active transition; discarding");
            return;
        };
        if id != active {
            debug!(id, active, "stale tween completion; discarding");
            return;
        }
        self.finish(transition);
    }

    // --- Internals ---

    fn start_tween(&mut self, transition: Transition, destination: f64) {
        if let Err(err) = finite("tween destination", destination) {
            warn!(%err, ?transition, "abandoning transition");
            return;
        }
        let id = self.next_tween;
        self.next_tween += 1;
        let from = self.offset;
        self.offset = destination;
        self.phase = Phase::Animating { id, transition };
        self.set_locked(true);

        if (from - destination).abs() <= f64::EPSILON {
            // already there; nothing to animate
            self.finish(transition);
            return;
        }
        debug!(id, from, to = destination, ?transition, "tween issued");
        self.animator.animate(Tween {
            id,
            from,
            to: destination,
            duration: self.config.animation_duration(),
        });
    }

    fn finish(&mut self, transition: Transition) {
        match transition {
            Transition::Navigate { target } => self.commit(target),
            Transition::Commit { direction } => {
                // the strip already shows the neighbour; the navigation path
                // finds nothing left to animate and commits
                self.go_to_date(self.committed.shift_month(direction.month_offset()));
            }
            Transition::Revert => {
                self.offset = self.rest_position();
                self.phase = Phase::Idle;
                self.set_locked(false);
            }
        }
    }

    /// Makes `target` the committed date and settles at the pivot.
    fn commit(&mut self, target: CalendarDate) {
        let previous = self.committed;
        self.committed = target;
        self.window = month_buffer(target, self.config.buffer_size());
        self.offset = self.rest_position();
        self.animator.set_offset(self.offset);
        self.phase = Phase::Idle;
        self.set_locked(false);
        if !previous.is_same_month(&target) {
            debug!(%previous, current = %target, "month committed");
            self.events.push_back(NavigationEvent::MonthCommitted {
                previous,
                current: target,
            });
        }
    }

    fn set_locked(&mut self, locked: bool) {
        if self.locked != locked {
            self.locked = locked;
            self.events.push_back(NavigationEvent::LockChanged { locked });
        }
    }
}
