use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard};
#[cfg(test)]
use std::time::{Duration, Instant};

/// One utterance waiting to be spoken
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpeechJob {
    pub id: u64,
    pub text: String,
}

#[derive(Default)]
struct QueueState {
    pending: VecDeque<SpeechJob>,
    /// Job currently owned by the worker (0 = idle)
    in_flight: u64,
}

/// FIFO of pending utterances consumed by a single speech worker
pub struct SpeechQueue {
    state: Mutex<QueueState>,
    /// Signals the worker that a job arrived or shutdown was requested
    work_signal: Condvar,
    /// Signals waiters that a job finished
    idle_signal: Condvar,
    next_id: AtomicU64,
    pub(super) shutdown: AtomicBool,
}

impl Default for SpeechQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechQueue {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState::default()),
            work_signal: Condvar::new(),
            idle_signal: Condvar::new(),
            next_id: AtomicU64::new(1),
            shutdown: AtomicBool::new(false),
        }
    }

    fn lock(&self) -> MutexGuard<'_, QueueState> {
        // The queue holds plain data; a panic elsewhere cannot leave it half-updated.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Append `text` to the tail. Never blocks on playback; callable from any thread.
    pub fn enqueue(&self, text: impl Into<String>) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.lock().pending.push_back(SpeechJob {
            id,
            text: text.into(),
        });
        self.work_signal.notify_one();
        id
    }

    /// Number of jobs waiting, not counting the one being spoken.
    pub fn pending(&self) -> usize {
        self.lock().pending.len()
    }

    /// Snapshot of waiting jobs in playback order.
    #[cfg(test)]
    pub fn snapshot(&self) -> Vec<SpeechJob> {
        self.lock().pending.iter().cloned().collect()
    }

    pub fn is_speaking(&self) -> bool {
        self.lock().in_flight != 0
    }

    /// Block until a job is available. Returns `None` once shutdown is requested.
    pub(super) fn next_job(&self) -> Option<SpeechJob> {
        let mut state = self.lock();
        loop {
            if self.shutdown.load(Ordering::SeqCst) {
                return None;
            }
            if let Some(job) = state.pending.pop_front() {
                state.in_flight = job.id;
                return Some(job);
            }
            state = self
                .work_signal
                .wait(state)
                .unwrap_or_else(|e| e.into_inner());
        }
    }

    /// Called by the worker after a job finished (success or failure) and its
    /// audio artifact was removed.
    pub(super) fn finish_job(&self, id: u64) {
        let mut state = self.lock();
        if state.in_flight == id {
            state.in_flight = 0;
        }
        drop(state);
        self.idle_signal.notify_all();
    }

    /// Wait until nothing is queued or playing. Returns false on timeout.
    #[cfg(test)]
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut state = self.lock();
        while !state.pending.is_empty() || state.in_flight != 0 {
            let now = Instant::now();
            if now >= deadline || self.shutdown.load(Ordering::SeqCst) {
                return false;
            }
            let (guard, _) = self
                .idle_signal
                .wait_timeout(state, deadline - now)
                .unwrap_or_else(|e| e.into_inner());
            state = guard;
        }
        true
    }

    /// Stop the worker after the current job. Pending jobs are dropped.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
        self.lock().pending.clear();
        self.work_signal.notify_all();
        self.idle_signal.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_enqueue_preserves_order() {
        let queue = SpeechQueue::new();
        let a = queue.enqueue("first");
        let b = queue.enqueue("second");
        assert!(b > a);
        let texts: Vec<String> = queue.snapshot().into_iter().map(|j| j.text).collect();
        assert_eq!(texts, vec!["first", "second"]);
        assert_eq!(queue.pending(), 2);
    }

    #[test]
    fn test_next_job_pops_front_and_marks_in_flight() {
        let queue = SpeechQueue::new();
        queue.enqueue("one");
        queue.enqueue("two");
        let job = queue.next_job().unwrap();
        assert_eq!(job.text, "one");
        assert!(queue.is_speaking());
        assert_eq!(queue.pending(), 1);
        queue.finish_job(job.id);
        assert!(!queue.is_speaking());
    }

    #[test]
    fn test_next_job_wakes_on_enqueue_from_other_thread() {
        let queue = Arc::new(SpeechQueue::new());
        let producer = queue.clone();
        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(50));
            producer.enqueue("late");
        });
        let job = queue.next_job().unwrap();
        assert_eq!(job.text, "late");
        handle.join().unwrap();
    }

    #[test]
    fn test_shutdown_releases_waiting_worker() {
        let queue = Arc::new(SpeechQueue::new());
        let worker_queue = queue.clone();
        let handle = std::thread::spawn(move || worker_queue.next_job());
        std::thread::sleep(Duration::from_millis(50));
        queue.shutdown();
        assert_eq!(handle.join().unwrap(), None);
    }

    #[test]
    fn test_wait_idle_times_out_with_pending_work() {
        let queue = SpeechQueue::new();
        queue.enqueue("never consumed");
        assert!(!queue.wait_idle(Duration::from_millis(20)));
        assert!(SpeechQueue::new().wait_idle(Duration::from_millis(1)));
    }
}
