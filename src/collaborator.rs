//! The outside world as seen by the session controller
//!
//! The core only knows two callbacks: `on_exit` and `on_score_milestone`.
//! `SimulatedSwap` is a stand-in milestone action for the demo binary and
//! tests. It guards against overlapping invocations the same way a real
//! wallet-backed action would, so the controller's handling of a busy
//! refusal can be exercised.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Successful milestone action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapReceipt {
    /// Opaque reference (e.g. a transaction hash)
    pub reference: String,
}

/// Ways a milestone action can end without a receipt
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MilestoneError {
    /// The collaborator was already running an earlier action and refused to start
    #[error("milestone action already in progress")]
    Busy,
    /// The user declined the action
    #[error("rejected by user: {0}")]
    Rejected(String),
    /// The action started and failed
    #[error("milestone action failed: {0}")]
    Failed(String),
}

/// Future returned by the milestone callback
pub type MilestoneFuture =
    Pin<Box<dyn Future<Output = Result<SwapReceipt, MilestoneError>> + Send>>;

/// Callbacks the session controller invokes
pub trait Collaborator: Send + Sync + 'static {
    /// Explicit exit input. Synchronous.
    fn on_exit(&self);

    /// Score milestone reached. The returned future is driven on its own
    /// task; the controller never waits for it between ticks.
    fn on_score_milestone(&self, score: u32) -> MilestoneFuture;
}

/// How a `SimulatedSwap` settles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapMode {
    Succeed,
    Fail(String),
    Reject,
}

/// Demo milestone action with a latency and a busy guard
#[derive(Debug)]
pub struct SimulatedSwap {
    latency: Duration,
    mode: SwapMode,
    busy: Arc<AtomicBool>,
    nonce: AtomicU64,
    exits: AtomicU64,
}

impl SimulatedSwap {
    pub fn new(latency: Duration, mode: SwapMode) -> Self {
        Self {
            latency,
            mode,
            busy: Arc::new(AtomicBool::new(false)),
            nonce: AtomicU64::new(1),
            exits: AtomicU64::new(0),
        }
    }

    /// True while an action is outstanding
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Number of times `on_exit` has been called
    pub fn exit_count(&self) -> u64 {
        self.exits.load(Ordering::Acquire)
    }
}

impl Default for SimulatedSwap {
    fn default() -> Self {
        Self::new(Duration::from_millis(1_500), SwapMode::Succeed)
    }
}

/// Clears the busy flag when the action finishes or is dropped
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Collaborator for SimulatedSwap {
    fn on_exit(&self) {
        self.exits.fetch_add(1, Ordering::AcqRel);
        log::info!("Exit requested");
    }

    fn on_score_milestone(&self, score: u32) -> MilestoneFuture {
        if self.busy.swap(true, Ordering::AcqRel) {
            log::info!("Milestone action already running, refusing score {}", score);
            return Box::pin(async { Err::<SwapReceipt, _>(MilestoneError::Busy) });
        }

        let guard = BusyGuard(Arc::clone(&self.busy));
        let latency = self.latency;
        let mode = self.mode.clone();
        let nonce = self
            .nonce
            .fetch_add(1, Ordering::AcqRel)
            .wrapping_mul(0x9E37_79B9_7F4A_7C15);

        log::info!("Milestone reached at score {}, starting swap", score);

        Box::pin(async move {
            let _guard = guard;
            tokio::time::sleep(latency).await;
            match mode {
                SwapMode::Succeed => Ok(SwapReceipt {
                    reference: format!("0x{:016x}", nonce),
                }),
                SwapMode::Fail(reason) => Err(MilestoneError::Failed(reason)),
                SwapMode::Reject => Err(MilestoneError::Rejected(
                    "Transaction rejected by user.".to_string(),
                )),
            }
        })
    }
}
