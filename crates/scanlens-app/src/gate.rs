use anyhow::Context;
use camino::Utf8Path;
use scanlens_types::GateVerdict;
use std::sync::atomic::{AtomicBool, Ordering};

/// At-most-one-scan-in-flight gate.
///
/// Lives at the scan entry point, not inside the supervisor: a second scan
/// request while one is running is rejected before anything is spawned. The
/// permit releases on drop, so the trigger is re-enabled on success and on
/// every failure path alike. A gate that stays closed is a bug.
#[derive(Debug, Default)]
pub struct ScanGate {
    in_flight: AtomicBool,
}

impl ScanGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the gate, or `None` when a scan is already running.
    pub fn try_acquire(&self) -> Option<ScanPermit<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| ScanPermit { gate: self })
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }
}

/// Proof that the gate was claimed; releases it when dropped.
#[derive(Debug)]
pub struct ScanPermit<'a> {
    gate: &'a ScanGate,
}

impl Drop for ScanPermit<'_> {
    fn drop(&mut self) {
        self.gate.in_flight.store(false, Ordering::SeqCst);
    }
}

/// Evaluate the quality gate over the scanner's status file.
pub fn run_gate(status_path: &Utf8Path, threshold: u64) -> anyhow::Result<GateVerdict> {
    let status = scanlens_report::read_status(status_path).context("decode scan status")?;
    let verdict = GateVerdict::evaluate(&status, threshold);
    tracing::debug!(
        active = verdict.active,
        threshold,
        pass = verdict.pass,
        "gate evaluated"
    );
    Ok(verdict)
}

/// Process exit code for a gate verdict.
pub fn gate_exit_code(verdict: &GateVerdict) -> i32 {
    if verdict.pass {
        0
    } else {
        1
    }
}
