//! ID generation logic
//!
//! One CAS-driven loop covering advance, same-tick, overflow and regression

use std::cmp::Ordering as TickOrdering;
use std::sync::atomic::Ordering;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, error, instrument, warn};

use super::state::State;
use super::wait::wait_for_next_tick;
use super::Microflake;
use crate::error::MicroflakeError;
use crate::time::TimeSource;

impl<C: TimeSource> Microflake<C> {
    /// Generate the next identifier.
    ///
    /// Returns `Pending` if the current tick's sequence is exhausted and the
    /// clock did not advance within the configured wait, and
    /// `ClockRegressed` if the clock reads earlier than the last issued tick,
    /// or `ClockBeforeEpoch` if it reads earlier than the epoch itself.
    /// None of these outcomes modifies the generator's state.
    #[instrument(level = "trace", skip(self), fields(instance_id = self.instance_id))]
    pub fn next_id(&self) -> Result<u64, MicroflakeError> {
        let mut deadline: Option<Instant> = None;

        loop {
            // State before clock: a tick claimed concurrently after this load
            // fails our CAS instead of looking like a regression.
            let current = State::from_raw(self.state.load(Ordering::Acquire));
            let reading = self.clock.current_ticks(self.unit);
            let Some(now) = reading.checked_sub(self.epoch) else {
                warn!(reading, epoch = self.epoch, "clock reads before the epoch");
                return Err(MicroflakeError::ClockBeforeEpoch {
                    reading,
                    epoch: self.epoch,
                });
            };
            if now > self.max_ts {
                error!(timestamp = now, max = self.max_ts, "layout timestamp space exhausted");
                return Err(MicroflakeError::TimestampOverflow {
                    timestamp: now,
                    max: self.max_ts,
                });
            }

            if current.is_none() {
                let start = self.config.starting_sequence();
                if let Some(id) = self.try_claim_tick(current, now, start) {
                    return Ok(id);
                }
                continue;
            }

            let last = current.tick(self.seq_bits);
            match now.cmp(&last) {
                TickOrdering::Greater => {
                    if let Some(id) = self.try_claim_tick(current, now, 0) {
                        return Ok(id);
                    }
                }
                TickOrdering::Equal => {
                    if current.sequence(self.seq_bits) < self.max_seq {
                        if let Some(id) = self.try_increment_sequence(current) {
                            return Ok(id);
                        }
                        continue;
                    }
                    let deadline =
                        *deadline.get_or_insert_with(|| Instant::now() + self.config.max_wait());
                    self.wait_next_tick(last, deadline)?;
                }
                TickOrdering::Less => {
                    warn!(last, current = now, "clock moved backwards");
                    return Err(MicroflakeError::ClockRegressed { last, current: now });
                }
            }
        }
    }

    /// Generate the next identifier, retrying `Pending` for up to `timeout`.
    ///
    /// Once `timeout` has passed the last `Pending` is returned. Clock
    /// regression and timestamp overflow are returned immediately.
    pub fn generate(&self, timeout: Duration) -> Result<u64, MicroflakeError> {
        let deadline = Instant::now().checked_add(timeout);
        loop {
            match self.next_id() {
                Err(pending @ MicroflakeError::Pending { .. }) => {
                    if deadline.is_some_and(|d| Instant::now() >= d) {
                        return Err(pending);
                    }
                    thread::yield_now();
                }
                other => return other,
            }
        }
    }

    /// Endless iterator of `next_id` results
    pub fn iter(&self) -> Iter<'_, C> {
        Iter { generator: self }
    }

    /// Try to move the state to a new tick
    #[inline]
    pub(crate) fn try_claim_tick(&self, current: State, tick: u64, sequence: u64) -> Option<u64> {
        let new_state = State::new(tick, sequence, self.seq_bits);
        self.cas_state(current, new_state)
            .then(|| self.assemble_id(tick, sequence))
    }

    /// Try to increment sequence within the current tick
    #[inline]
    pub(crate) fn try_increment_sequence(&self, current: State) -> Option<u64> {
        let tick = current.tick(self.seq_bits);
        let new_seq = current.sequence(self.seq_bits) + 1;
        let new_state = State::new(tick, new_seq, self.seq_bits);
        self.cas_state(current, new_state)
            .then(|| self.assemble_id(tick, new_seq))
    }

    /// Atomic compare-and-swap on state
    #[inline(always)]
    pub(crate) fn cas_state(&self, expected: State, new: State) -> bool {
        self.state
            .compare_exchange_weak(expected.raw(), new.raw(), Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Wait for the clock to leave `from_tick` without touching state
    #[cold]
    #[inline(never)]
    fn wait_next_tick(&self, from_tick: u64, deadline: Instant) -> Result<u64, MicroflakeError> {
        // A reading before the epoch never counts as an advance
        let now = || self.now().unwrap_or(0);
        wait_for_next_tick(from_tick, &self.config, deadline, now).ok_or_else(|| {
            debug!(tick = from_tick, "sequence exhausted, wait budget spent");
            MicroflakeError::Pending {
                yield_until: from_tick + 1,
            }
        })
    }
}

/// Iterator returned by [`Microflake::iter`]. Never ends.
#[derive(Debug)]
pub struct Iter<'a, C> {
    generator: &'a Microflake<C>,
}

impl<C: TimeSource> Iterator for Iter<'_, C> {
    type Item = Result<u64, MicroflakeError>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generator.next_id())
    }
}
