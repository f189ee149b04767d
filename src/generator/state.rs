//! Combined atomic state for last tick + sequence
//!
//! Packs the last issued tick above the sequence into a single u64 so the
//! whole transition is one CAS. The tick is bounded by the layout's timestamp
//! field, so a packed value never reaches bit 63 and `u64::MAX` is free to
//! mean "nothing issued yet".

/// Combined state: upper bits = tick, lower `sequence_bits` bits = sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct State(u64);

impl State {
    /// No identifier has been issued yet
    pub const NONE: State = State(u64::MAX);

    #[inline(always)]
    const fn mask(sequence_bits: u8) -> u64 {
        (1u64 << sequence_bits) - 1
    }

    /// Create new state from tick and sequence
    #[inline(always)]
    pub const fn new(tick: u64, sequence: u64, sequence_bits: u8) -> Self {
        Self((tick << sequence_bits) | sequence)
    }

    #[inline(always)]
    pub const fn is_none(self) -> bool {
        self.0 == Self::NONE.0
    }

    /// Extract tick from state
    #[inline(always)]
    pub const fn tick(self, sequence_bits: u8) -> u64 {
        self.0 >> sequence_bits
    }

    /// Extract sequence from state
    #[inline(always)]
    pub const fn sequence(self, sequence_bits: u8) -> u64 {
        self.0 & Self::mask(sequence_bits)
    }

    /// Get raw u64 value for atomic operations
    #[inline(always)]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Create state from raw u64 value
    #[inline(always)]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}
