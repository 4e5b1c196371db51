//! A time-stamped scalar source behind its own lock.

use std::sync::Mutex;

/// One sensor reading: value in the sensor's native scale (°C for the
/// temperature probes this system uses) and the wall-clock second it was
/// taken at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub value: f64,
    pub at: f64,
}

#[derive(Debug, Default)]
struct Buffer {
    latest: Option<Reading>,
}

/// An externally-updated scalar source.
///
/// Writers (background drivers) call [`Sensor::record`]; the control loop
/// calls [`Sensor::compute`]. Both sides take the buffer lock for the
/// duration of the copy only. A sensor that has never been written reports
/// the no-value sentinel (`None`).
#[derive(Debug)]
pub struct Sensor {
    name: String,
    buffer: Mutex<Buffer>,
}

impl Sensor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            buffer: Mutex::new(Buffer::default()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Best estimate at or after `now`.
    ///
    /// Writers only move forward in time, so the latest recorded reading
    /// is the best estimate for any `now` at or before the write; a
    /// reading time-stamped after `now` (background update raced ahead of
    /// the loop) is still the one to use, matching the loop's
    /// `max(now, sensor time)` convention.
    pub fn compute(&self, _now: f64) -> Option<f64> {
        let buffer = self.buffer.lock().unwrap_or_else(|e| e.into_inner());
        buffer.latest.map(|r| r.value)
    }

    /// Latest reading with its timestamp, if any.
    pub fn latest(&self) -> Option<Reading> {
        let buffer = self.buffer.lock().unwrap_or_else(|e| e.into_inner());
        buffer.latest
    }

    /// Record a reading. Writer side; called from driver threads.
    pub fn record(&self, value: f64, at: f64) {
        let mut buffer = self.buffer.lock().unwrap_or_else(|e| e.into_inner());
        buffer.latest = Some(Reading { value, at });
    }

    /// Drop any recorded value, restoring the no-value sentinel.
    pub fn clear(&self) {
        let mut buffer = self.buffer.lock().unwrap_or_else(|e| e.into_inner());
        buffer.latest = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn unwritten_sensor_is_no_value() {
        let sensor = Sensor::new("slab 1");
        assert_eq!(sensor.compute(0.0), None);
    }

    #[test]
    fn latest_write_wins() {
        let sensor = Sensor::new("slab 1");
        sensor.record(20.0, 1.0);
        sensor.record(21.5, 2.0);
        assert_eq!(sensor.compute(1.5), Some(21.5));
        assert_eq!(sensor.latest().unwrap().at, 2.0);
    }

    #[test]
    fn clear_restores_sentinel() {
        let sensor = Sensor::new("slab 1");
        sensor.record(20.0, 1.0);
        sensor.clear();
        assert_eq!(sensor.compute(2.0), None);
    }

    #[test]
    fn concurrent_writers_do_not_tear() {
        let sensor = Arc::new(Sensor::new("slab 1"));
        let mut handles = Vec::new();
        for i in 0..4 {
            let sensor = Arc::clone(&sensor);
            handles.push(std::thread::spawn(move || {
                for j in 0..100 {
                    sensor.record(i as f64 + j as f64 / 100.0, j as f64);
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        assert!(sensor.compute(0.0).is_some());
    }
}
