//! Extract data use case

use crate::domain::entities::{ExtractionResult, ExtractionSource, progress_steps};
use crate::domain::repositories::SharedSession;
use crate::domain::services::extract;
use futures::stream::{self, Stream, StreamExt};
use std::time::Duration;

/// Simulated device extraction
#[derive(Debug, Clone)]
pub struct ExtractDataUseCase {
    tick: Duration,
}

impl ExtractDataUseCase {
    /// Creates the use case with the delay between progress steps
    pub fn new(tick: Duration) -> Self {
        Self { tick }
    }

    pub fn tick(&self) -> Duration {
        self.tick
    }

    /// Runs the extraction immediately
    ///
    /// `Simulation` reads the session's recovered content and falls back to
    /// the mock dataset without it.
    pub fn execute(&self, session: &SharedSession, source: ExtractionSource) -> ExtractionResult {
        let result = {
            let guard = session.lock();
            extract(source, guard.recovered_data())
        };
        tracing::info!(
            requested = ?source,
            served = ?result.source,
            bytes = result.extracted_data.len(),
            "extraction complete"
        );
        result
    }

    /// Progress percentages, one per tick, starting at 0
    pub fn progress(&self) -> impl Stream<Item = u8> + Send + use<> {
        let tick = self.tick;
        stream::iter(progress_steps()).then(move |percent| async move {
            if percent > 0 {
                tokio::time::sleep(tick).await;
            }
            percent
        })
    }
}
