use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use crate::input::{direction_change_is_valid, Direction};

/// Flags shared between the input listener and the tick driver.
///
/// Every field is a single atomic, so readers never observe a torn value.
/// Direction changes are last-write-wins: a tick sees whatever direction
/// was stored when it started and nothing is queued.
#[derive(Debug)]
pub struct SharedControls {
    direction: AtomicU8,
    paused: AtomicBool,
    live: AtomicBool,
}

impl SharedControls {
    #[must_use]
    pub fn new(direction: Direction) -> Self {
        Self {
            direction: AtomicU8::new(direction.to_bits()),
            paused: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        Direction::from_bits(self.direction.load(Ordering::Acquire))
    }

    /// Stores `requested` unless it reverses the current direction.
    ///
    /// Returns whether the request was accepted.
    pub fn request_direction(&self, requested: Direction) -> bool {
        self.direction
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                direction_change_is_valid(Direction::from_bits(bits), requested)
                    .then_some(requested.to_bits())
            })
            .is_ok()
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    /// Flips the pause flag and returns the new value.
    pub fn toggle_pause(&self) -> bool {
        !self.paused.fetch_xor(true, Ordering::AcqRel)
    }

    /// Returns false once the session has been told to stop.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    pub fn shut_down(&self) {
        self.live.store(false, Ordering::Release);
    }
}
