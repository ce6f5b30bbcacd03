//! Fluent builder for constructing a [`Sim`].

use crate::{NoopObserver, Sim, SimConfig, SimObserver, SimResult};

/// Fluent builder for [`Sim<O>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: distributions, horizon, stop policy, cap, …
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default          |
/// |-----------------|------------------|
/// | `.observer(o)`  | [`NoopObserver`] |
///
/// # Example
///
/// ```rust,ignore
/// let mut rng = config.make_rng();
/// let run = SimBuilder::new(config)
///     .observer(MyObserver::default())
///     .build()?
///     .run(&mut rng)?;
/// ```
pub struct SimBuilder<O: SimObserver = NoopObserver> {
    config:   SimConfig,
    observer: O,
}

impl SimBuilder<NoopObserver> {
    pub fn new(config: SimConfig) -> Self {
        Self { config, observer: NoopObserver }
    }
}

impl<O: SimObserver> SimBuilder<O> {
    /// Replace the observer.
    pub fn observer<P: SimObserver>(self, observer: P) -> SimBuilder<P> {
        SimBuilder { config: self.config, observer }
    }

    /// Validate the config, build samplers and CDF evaluators, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<O>> {
        self.config.validate()?;
        Sim::from_parts(self.config, self.observer)
    }
}
