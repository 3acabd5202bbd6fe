use log::info;

use crate::core::inspector::HeaderInspector;
use crate::core::result::CheckResult;
use crate::SinkRef;

/// Walks the target list in order, one request at a time.
pub struct CheckEngine {
    inspector: HeaderInspector,
    sink: SinkRef,
}

impl CheckEngine {
    pub fn new(inspector: HeaderInspector, sink: SinkRef) -> Self {
        Self { inspector, sink }
    }

    /// Checks every target sequentially. Output order matches input order and
    /// duplicates are checked again.
    pub async fn run(&self, targets: &[String]) -> Vec<CheckResult> {
        info!(
            "checking {} target(s) with a {}s timeout",
            targets.len(),
            self.inspector.timeout().as_secs()
        );

        let mut results = Vec::with_capacity(targets.len());
        for (i, url) in targets.iter().enumerate() {
            self.sink.on_progress(url, i + 1, targets.len());
            let result = self.inspector.check(url).await;
            self.sink.on_result(&result);
            results.push(result);
        }
        results
    }
}
