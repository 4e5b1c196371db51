//! Simulated sensor driver.
//!
//! Writes a deterministic slow waveform into a sensor from a background
//! thread, standing in for the hardware pollers in live deployments.

use crate::sensor::Sensor;
use rh_core::now_s;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::debug;

/// Waveform parameters for a simulated probe, in the probe's native °C.
#[derive(Debug, Clone, Copy)]
pub struct SimWave {
    /// Center temperature.
    pub center_c: f64,
    /// Peak deviation from center.
    pub amplitude_c: f64,
    /// Full cycle period, seconds.
    pub period_s: f64,
    /// Write interval, seconds.
    pub interval_s: f64,
}

impl Default for SimWave {
    fn default() -> Self {
        Self {
            center_c: 21.0,
            amplitude_c: 1.5,
            period_s: 600.0,
            interval_s: 1.0,
        }
    }
}

/// A background thread feeding one sensor.
pub struct SimulatedDriver {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SimulatedDriver {
    /// Spawn a driver thread for `sensor`.
    pub fn spawn(sensor: Arc<Sensor>, wave: SimWave) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);
        let handle = std::thread::spawn(move || {
            let start = now_s();
            debug!(sensor = sensor.name(), "simulated sensor driver started");
            while !stop_flag.load(Ordering::Relaxed) {
                let now = now_s();
                let phase = (now - start) / wave.period_s * std::f64::consts::TAU;
                let value = wave.center_c + wave.amplitude_c * phase.sin();
                sensor.record(value, now);
                std::thread::sleep(Duration::from_secs_f64(wave.interval_s));
            }
            debug!(sensor = sensor.name(), "simulated sensor driver stopped");
        });
        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// Request the driver stop and wait for the thread to exit.
    pub fn stop(mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for SimulatedDriver {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
