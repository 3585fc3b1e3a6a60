// Scoring
pub const MATCH_SCORE: f32 = 1.0;
pub const MISMATCH_SCORE: f32 = -1.0;
pub const GAP_PENALTY: f32 = -2.0;

// Scheduling
pub const GRAIN_SIZE: usize = 1;

/// Symbol written into an aligned sequence in place of a skipped character
pub const GAP_SYMBOL: u8 = b'-';
