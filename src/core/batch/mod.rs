//! Concurrent batch execution
//!
//! Runs N independent fallible async operations, bounding how many are in
//! flight at once, and reports every outcome. One task's failure never
//! cancels or aborts its siblings; the caller decides what to do with the
//! failed reports.

use crate::utils::error::ServiceError;
use futures::stream::{self, StreamExt};
use std::future::Future;
use std::time::{Duration, Instant};

/// Outcome of a single task in a batch
#[derive(Debug)]
pub struct TaskReport<T> {
    /// Index of the task in the original input order
    pub index: usize,
    /// The settled result; errors stay local to their report
    pub result: Result<T, ServiceError>,
    /// Time taken by this task
    pub duration: Duration,
}

impl<T> TaskReport<T> {
    /// Whether the task settled successfully
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Run every operation to completion and collect one report per input.
///
/// At most `concurrency` operations run at once (values below 1 are clamped
/// to 1). The returned vector is re-keyed by input index, so callers observe
/// a stable order regardless of completion timing. The call does not return
/// until literally every task has settled.
pub async fn settle_all<In, Out, F, Fut>(
    items: impl IntoIterator<Item = In>,
    operation: F,
    concurrency: usize,
) -> Vec<TaskReport<Out>>
where
    In: Send + 'static,
    Out: Send + 'static,
    F: Fn(In) -> Fut + Send + Sync + Clone + 'static,
    Fut: Future<Output = Result<Out, ServiceError>> + Send,
{
    let indexed: Vec<(usize, In)> = items.into_iter().enumerate().collect();

    let mut reports: Vec<TaskReport<Out>> = stream::iter(indexed)
        .map(|(index, item)| {
            let op = operation.clone();
            async move {
                let start = Instant::now();
                let result = op(item).await;
                TaskReport {
                    index,
                    result,
                    duration: start.elapsed(),
                }
            }
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    reports.sort_by_key(|report| report.index);
    reports
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_settle_all_success_preserves_order() {
        let reports = settle_all(
            vec![1u64, 2, 3, 4, 5],
            |n| async move {
                tokio::time::sleep(Duration::from_millis(10 - n)).await;
                Ok::<_, ServiceError>(n * 2)
            },
            2,
        )
        .await;

        assert_eq!(reports.len(), 5);
        for (i, report) in reports.iter().enumerate() {
            assert_eq!(report.index, i);
            assert_eq!(*report.result.as_ref().unwrap(), ((i as u64) + 1) * 2);
        }
    }

    #[tokio::test]
    async fn test_settle_all_isolates_failures() {
        let reports = settle_all(
            vec![1, 2, 3, 4, 5],
            |n| async move {
                if n == 3 {
                    Err(ServiceError::internal("task blew up"))
                } else {
                    Ok::<_, ServiceError>(n)
                }
            },
            2,
        )
        .await;

        assert_eq!(reports.len(), 5);
        assert!(reports[2].result.is_err());
        assert_eq!(reports.iter().filter(|r| r.is_success()).count(), 4);
    }

    #[tokio::test]
    async fn test_settle_all_empty_input() {
        let reports =
            settle_all(Vec::<i32>::new(), |n| async move { Ok::<_, ServiceError>(n) }, 4).await;
        assert!(reports.is_empty());
    }

    #[tokio::test]
    async fn test_settle_all_clamps_concurrency() {
        let reports = settle_all(
            vec![1, 2, 3],
            |n| async move { Ok::<_, ServiceError>(n) },
            0,
        )
        .await;
        assert_eq!(reports.len(), 3);
    }
}
