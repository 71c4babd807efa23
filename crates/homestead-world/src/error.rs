//! Error types for the `homestead-world` crate.

/// Errors that can occur while configuring or advancing world state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// A season must last at least one tick.
    #[error("ticks_per_season must be at least 1, got {0}")]
    InvalidSeasonLength(u64),

    /// Rangers must need at least one tick per draw.
    #[error("ranger_draw_ticks must be at least 1, got {0}")]
    InvalidDrawPeriod(u64),

    /// Tick counter would overflow.
    #[error("season tick counter overflow: cannot advance beyond u64::MAX")]
    TickOverflow,
}
