//! src/tasks/executor.rs
//! ============================================================================
//! # Bounded-Concurrency Executor
//!
//! Runs a batch of async units of work with at most `max_concurrency` in
//! flight, preserving submission-order result placement and failing fast on
//! the first completed error. Admission is a counting gate with a FIFO
//! waiter queue: a released slot is handed directly to the longest waiter,
//! never incrementing the free count past a waiting caller.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

use crate::error::AppError;

/// Counting admission gate with FIFO fairness.
///
/// `acquire` suspends (does not spin) when no slot is free, enqueuing the
/// caller; `release` wakes the longest waiter or frees the slot.
#[derive(Debug)]
pub struct AdmissionGate {
    inner: Mutex<GateState>,
}

#[derive(Debug)]
struct GateState {
    free: usize,
    waiters: VecDeque<oneshot::Sender<()>>,
}

impl AdmissionGate {
    /// `permits` below 1 is clamped to 1; a zero-width gate could never
    /// admit anyone.
    pub fn new(permits: usize) -> Self {
        Self {
            inner: Mutex::new(GateState {
                free: permits.max(1),
                waiters: VecDeque::new(),
            }),
        }
    }

    /// Waits for a slot. Callers are admitted in arrival order.
    pub async fn acquire(&self) {
        let rx: oneshot::Receiver<()> = {
            let mut state = self.inner.lock().expect("gate lock poisoned");
            if state.free > 0 {
                state.free -= 1;
                return;
            }
            let (tx, rx) = oneshot::channel();
            state.waiters.push_back(tx);
            rx
        };
        // Sender side is only dropped if the gate itself is dropped.
        let _ = rx.await;
    }

    /// Returns a slot: handed directly to the longest waiter if any,
    /// otherwise the free count grows back.
    pub fn release(&self) {
        let mut state = self.inner.lock().expect("gate lock poisoned");
        while let Some(waiter) = state.waiters.pop_front() {
            // A waiter whose receiver vanished is skipped, the slot goes to
            // the next one.
            if waiter.send(()).is_ok() {
                return;
            }
        }
        state.free += 1;
    }
}

/// Runs `tasks` with at most `max_concurrency` executing at any instant.
///
/// Result `i` corresponds to task `i` regardless of completion order. The
/// first task to *complete* with an error fails the whole call; tasks still
/// in flight are not cancelled, their results are discarded.
pub async fn run_limited<T, F, Fut>(
    tasks: Vec<F>,
    max_concurrency: usize,
) -> Result<Vec<T>, AppError>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, AppError>> + Send + 'static,
    T: Send + 'static,
{
    let total: usize = tasks.len();
    let gate: Arc<AdmissionGate> = Arc::new(AdmissionGate::new(max_concurrency));
    let (tx, mut rx) = mpsc::unbounded_channel::<(usize, Result<T, AppError>)>();

    for (index, task) in tasks.into_iter().enumerate() {
        let gate: Arc<AdmissionGate> = Arc::clone(&gate);
        let tx: mpsc::UnboundedSender<(usize, Result<T, AppError>)> = tx.clone();
        tokio::spawn(async move {
            gate.acquire().await;
            let outcome: Result<T, AppError> = task().await;
            gate.release();
            let _ = tx.send((index, outcome));
        });
    }
    drop(tx);

    let mut slots: Vec<Option<T>> = Vec::with_capacity(total);
    slots.resize_with(total, || None);

    while let Some((index, outcome)) = rx.recv().await {
        match outcome {
            Ok(value) => slots[index] = Some(value),
            Err(e) => return Err(e),
        }
    }

    let mut results: Vec<T> = Vec::with_capacity(total);
    for slot in slots {
        match slot {
            Some(value) => results.push(value),
            None => return Err(AppError::Task("task result went missing".into())),
        }
    }
    Ok(results)
}

// ------------------------------------------------------------------------- //
// Tests
// ------------------------------------------------------------------------- //

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::time::sleep;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn results_keep_submission_order() {
        // c completes first, a last; placement must still be [a, b, c].
        let tasks: Vec<_> = vec![
            (30u64, "a"),
            (20u64, "b"),
            (10u64, "c"),
        ]
        .into_iter()
        .map(|(delay, label)| {
            move || async move {
                sleep(Duration::from_millis(delay)).await;
                Ok::<&str, AppError>(label)
            }
        })
        .collect();

        let results: Vec<&str> = run_limited(tasks, 3).await.unwrap();
        assert_eq!(results, vec!["a", "b", "c"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrency_never_exceeds_limit() {
        const LIMIT: usize = 3;
        let running: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));
        let peak: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..24)
            .map(|i: usize| {
                let running: Arc<AtomicUsize> = Arc::clone(&running);
                let peak: Arc<AtomicUsize> = Arc::clone(&peak);
                move || async move {
                    let now: usize = running.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    sleep(Duration::from_millis(10)).await;
                    running.fetch_sub(1, Ordering::SeqCst);
                    Ok::<usize, AppError>(i)
                }
            })
            .collect();

        let results: Vec<usize> = run_limited(tasks, LIMIT).await.unwrap();
        assert_eq!(results, (0..24).collect::<Vec<usize>>());
        assert!(peak.load(Ordering::SeqCst) <= LIMIT);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn first_completed_failure_fails_the_call() {
        let tasks: Vec<_> = (0..4)
            .map(|i: usize| {
                move || async move {
                    sleep(Duration::from_millis(5 * i as u64)).await;
                    if i == 1 {
                        Err(AppError::Task(format!("unit {i} exploded")))
                    } else {
                        Ok(i)
                    }
                }
            })
            .collect();

        let err: AppError = run_limited(tasks, 2).await.unwrap_err();
        assert!(matches!(err, AppError::Task(_)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn single_slot_gate_makes_progress() {
        let tasks: Vec<_> = (0..8)
            .map(|i: usize| move || async move { Ok::<usize, AppError>(i * 2) })
            .collect();
        let results: Vec<usize> = run_limited(tasks, 1).await.unwrap();
        assert_eq!(results.len(), 8);
        assert_eq!(results[7], 14);
    }

    #[tokio::test]
    async fn gate_hands_slots_to_waiters_in_fifo_order() {
        let gate: Arc<AdmissionGate> = Arc::new(AdmissionGate::new(1));
        gate.acquire().await; // hold the only slot

        let order: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));
        let mut handles: Vec<tokio::task::JoinHandle<()>> = Vec::new();
        for i in 0..3 {
            let gate: Arc<AdmissionGate> = Arc::clone(&gate);
            let order: Arc<Mutex<Vec<usize>>> = Arc::clone(&order);
            handles.push(tokio::spawn(async move {
                gate.acquire().await;
                order.lock().unwrap().push(i);
                gate.release();
            }));
            // Make enqueue order deterministic.
            sleep(Duration::from_millis(10)).await;
        }

        gate.release();
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }
}
