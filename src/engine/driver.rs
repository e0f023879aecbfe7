//! Headless driver: resume suspensions back to back.

use crate::core::Rejection;

use super::{Progress, TurnEngine};

impl TurnEngine {
    /// Start the game if needed, then resume every suspension immediately.
    ///
    /// Stops when a human seat must act, the game ends, or `max_steps`
    /// suspensions have been resumed. With every seat AI and a large enough
    /// budget the game always ends: the round limit bounds its length.
    ///
    /// ```
    /// use polyboard::core::GameConfig;
    /// use polyboard::engine::EngineBuilder;
    ///
    /// let mut engine = EngineBuilder::new(GameConfig::headless(4).with_seed(3))
    ///     .build()
    ///     .unwrap();
    /// let progress = engine.run_headless(100_000).unwrap();
    /// assert!(progress.is_finished());
    /// ```
    pub fn run_headless(&mut self, max_steps: usize) -> Result<Progress, Rejection> {
        let mut progress = if self.phase() == super::Phase::Setup {
            self.start()?
        } else {
            self.progress()
        };

        for _ in 0..max_steps {
            let Some(suspension) = progress.suspension() else {
                break;
            };
            progress = self.resume(suspension.token)?;
        }
        Ok(progress)
    }
}
