// src/runtime/shared.rs
use super::{CircuitInfo, CycleReport, EmotionalCore, FeelRequest, FeelResult, Health, ResetAck};
use crate::core::AuraError;
use crate::metrics::MetricsSnapshot;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::error;

/// Cloneable handle serializing access to one [`EmotionalCore`].
///
/// Every call holds the lock for the whole cycle, so counters and the
/// emotion state never interleave between callers.
#[derive(Debug, Clone)]
pub struct SharedCore {
    inner: Arc<Mutex<EmotionalCore>>,
}

impl SharedCore {
    pub fn new(core: EmotionalCore) -> Self {
        Self { inner: Arc::new(Mutex::new(core)) }
    }

    fn lock(&self) -> Result<MutexGuard<'_, EmotionalCore>, AuraError> {
        self.inner.lock().map_err(|_| {
            error!("emotional core lock poisoned");
            AuraError::internal("emotional core lock poisoned")
        })
    }

    pub fn feel(&self, request: &FeelRequest) -> Result<FeelResult, AuraError> {
        self.lock()?.feel(request)
    }

    pub fn execute(&self, params: &[f64], shots: u32) -> Result<CycleReport, AuraError> {
        self.lock()?.execute(params, shots)
    }

    pub fn tick(&self) -> Result<CycleReport, AuraError> {
        self.lock()?.tick()
    }

    pub fn metrics(&self) -> Result<MetricsSnapshot, AuraError> {
        Ok(self.lock()?.metrics())
    }

    pub fn reset(&self) -> Result<ResetAck, AuraError> {
        self.lock()?.reset()
    }

    pub fn health(&self) -> Result<Health, AuraError> {
        Ok(self.lock()?.health())
    }

    pub fn circuit_info(&self) -> Result<CircuitInfo, AuraError> {
        Ok(self.lock()?.circuit_info())
    }

    /// Runs `f` with exclusive access to the core.
    pub fn with_core<T>(&self, f: impl FnOnce(&mut EmotionalCore) -> T) -> Result<T, AuraError> {
        let mut guard = self.lock()?;
        Ok(f(&mut guard))
    }
}
