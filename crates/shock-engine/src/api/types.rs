/// Where a pulse came from. Only used for logging and reports; every
/// pulse does the same work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseSource {
    /// The letters started revealing.
    Reveal,
    /// The n-th repeat (1-based) of the letter jitter.
    Jitter(u32),
    /// Fired by the host directly (e.g. a click or a devtools call).
    Manual,
}

/// A discrete "shock" moment, delivered by the timeline or the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseEvent {
    pub source: PulseSource,
}

impl PulseEvent {
    pub fn new(source: PulseSource) -> Self {
        Self { source }
    }

    pub fn manual() -> Self {
        Self::new(PulseSource::Manual)
    }
}

/// What a dispatched pulse did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseReport {
    pub source: PulseSource,
    /// Lightning arcs drawn by this pulse's burst. May be zero.
    pub arcs: usize,
    /// Particles that received the impulse.
    pub particles: usize,
}
