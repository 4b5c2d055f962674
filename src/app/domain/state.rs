/// Where a document stands with respect to reader mode.
///
/// Documents the controller has never seen, or has given up on, are `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReaderState {
    #[default]
    Idle,
    /// Waiting for the external detector to report the real encoding. Each
    /// modify event without a result consumes one tick.
    AwaitingEncoding { ticks_left: u32 },
    Active,
}

impl ReaderState {
    pub fn awaiting(ticks: u32) -> Self {
        Self::AwaitingEncoding { ticks_left: ticks }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn is_awaiting(&self) -> bool {
        matches!(self, Self::AwaitingEncoding { .. })
    }

    /// Consume one tick of the encoding wait. The last tick drops back to
    /// `Idle`; other states are unchanged.
    pub fn tick(self) -> Self {
        match self {
            Self::AwaitingEncoding { ticks_left } if ticks_left > 1 => Self::AwaitingEncoding {
                ticks_left: ticks_left - 1,
            },
            Self::AwaitingEncoding { .. } => Self::Idle,
            other => other,
        }
    }
}
