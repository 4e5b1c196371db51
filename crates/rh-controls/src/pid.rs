//! PID controller on normalized signals.

use crate::error::{ControlError, ControlResult};
use crate::tuning::Tuning;

/// A PID loop controller.
///
/// Gains, clamp bounds, and state are public: the control loop mutates
/// state every tick through [`Controller::update`], and the interactive
/// tuning surface adjusts gains and `lout` directly between ticks.
///
/// All signals are normalized (0,1); `lout.1` may exceed 1.0 to let one
/// zone dominate a shared secondary heat source.
#[derive(Debug, Clone, PartialEq)]
pub struct Controller {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    /// Output clamp `(low, high)`.
    pub lout: (f64, f64),
    /// Last setpoint seen, for display.
    pub setpoint: f64,
    /// Last process value seen, for display.
    pub process: f64,
    /// Proportional state: the current error.
    pub p: f64,
    /// Integral state: accumulated error·seconds.
    pub i: f64,
    /// Derivative state: error slew, per second.
    pub d: f64,
    /// Current clamped output.
    pub value: f64,
    /// Wall-clock second of the last update, if any.
    pub last: Option<f64>,
}

impl Controller {
    /// Create a controller from resolved tuning.
    ///
    /// A persisted integral value in the tuning seeds `i`, resuming
    /// control continuity across restarts.
    pub fn new(
        tuning: &Tuning,
        setpoint: f64,
        process: f64,
        output: f64,
        now: f64,
    ) -> ControlResult<Self> {
        if tuning.lout.0 >= tuning.lout.1 {
            return Err(ControlError::InvalidArg {
                what: "lout low bound must be below high bound",
            });
        }
        if !(tuning.kp.is_finite() && tuning.ki.is_finite() && tuning.kd.is_finite()) {
            return Err(ControlError::InvalidArg {
                what: "gains must be finite",
            });
        }
        Ok(Self {
            kp: tuning.kp,
            ki: tuning.ki,
            kd: tuning.kd,
            lout: tuning.lout,
            setpoint,
            process,
            p: setpoint - process,
            i: tuning.integral.unwrap_or(0.0),
            d: 0.0,
            value: output.clamp(tuning.lout.0, tuning.lout.1),
            last: Some(now),
        })
    }

    /// Advance the controller by one step using elapsed time since the
    /// last invocation, and return the clamped output.
    ///
    /// A non-positive elapsed interval (clock retreat, duplicate tick)
    /// holds all state and returns the current output.
    pub fn update(&mut self, setpoint: f64, process: f64, now: f64) -> f64 {
        self.setpoint = setpoint;
        self.process = process;

        let dt = match self.last {
            Some(last) if now > last => now - last,
            Some(_) => return self.value,
            None => {
                self.last = Some(now);
                self.p = setpoint - process;
                return self.value;
            }
        };
        self.last = Some(now);

        let error = setpoint - process;
        let slew = (error - self.p) / dt;
        let integral = self.i + error * dt;

        let raw = self.kp * error + self.ki * integral + self.kd * slew;
        let clamped = raw.clamp(self.lout.0, self.lout.1);

        self.p = error;
        self.d = slew;
        // Anti-windup: the integral does not accumulate while the output
        // is saturated.
        if clamped == raw {
            self.i = integral;
        }
        self.value = clamped;
        clamped
    }

    /// Proportional/integral/derivative shares of the current output.
    ///
    /// Each term's signed fraction of the summed absolute term
    /// magnitudes; all-zero terms report (0, 0, 0).
    pub fn contribution(&self) -> (f64, f64, f64) {
        let p_term = self.kp * self.p;
        let i_term = self.ki * self.i;
        let d_term = self.kd * self.d;
        let total = p_term.abs() + i_term.abs() + d_term.abs();
        if total <= 0.0 {
            return (0.0, 0.0, 0.0);
        }
        (p_term / total, i_term / total, d_term / total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tuning() -> Tuning {
        Tuning {
            kp: 30.0,
            ki: 0.001,
            kd: 10_000.0,
            lout: (0.0, 1.0),
            integral: None,
        }
    }

    #[test]
    fn invalid_clamp_bounds_rejected() {
        let mut t = tuning();
        t.lout = (1.0, 0.0);
        assert!(Controller::new(&t, 0.5, 0.5, 0.0, 0.0).is_err());
    }

    #[test]
    fn positive_error_drives_output_up() {
        let mut c = Controller::new(&tuning(), 0.6, 0.5, 0.0, 0.0).unwrap();
        let out = c.update(0.6, 0.5, 1.0);
        assert!(out > 0.0);
        assert!(out <= 1.0);
    }

    #[test]
    fn integral_accumulates_under_sustained_error() {
        let mut t = tuning();
        // Proportional gain small enough not to saturate.
        t.kp = 0.1;
        t.kd = 0.0;
        let mut c = Controller::new(&t, 0.51, 0.5, 0.0, 0.0).unwrap();
        for step in 1..=100 {
            c.update(0.51, 0.5, step as f64);
        }
        assert!(c.i > 0.9, "integral was {}", c.i);
    }

    #[test]
    fn integral_holds_while_saturated() {
        let mut t = tuning();
        t.kp = 1000.0; // saturate immediately
        let mut c = Controller::new(&t, 1.0, 0.0, 0.0, 0.0).unwrap();
        c.update(1.0, 0.0, 1.0);
        let i_after_first = c.i;
        c.update(1.0, 0.0, 2.0);
        assert_eq!(c.i, i_after_first);
        assert_eq!(c.value, 1.0);
    }

    #[test]
    fn integral_seed_survives_construction() {
        let mut t = tuning();
        t.integral = Some(42.0);
        let c = Controller::new(&t, 0.5, 0.5, 0.0, 0.0).unwrap();
        assert_eq!(c.i, 42.0);
    }

    #[test]
    fn upper_bound_above_one_is_honored() {
        let mut t = tuning();
        t.lout = (0.0, 1.5);
        let mut c = Controller::new(&t, 1.0, 0.0, 0.0, 0.0).unwrap();
        let out = c.update(1.0, 0.0, 1.0);
        assert_eq!(out, 1.5);
    }

    #[test]
    fn clock_retreat_holds_state() {
        let mut c = Controller::new(&tuning(), 0.6, 0.5, 0.0, 10.0).unwrap();
        c.update(0.6, 0.5, 11.0);
        let held = c.clone();
        let out = c.update(0.9, 0.1, 10.5);
        assert_eq!(out, held.value);
        assert_eq!(c.i, held.i);
    }

    #[test]
    fn contribution_shares_sum_to_unit_magnitude() {
        let mut c = Controller::new(&tuning(), 0.6, 0.5, 0.0, 0.0).unwrap();
        c.update(0.6, 0.5, 1.0);
        c.update(0.62, 0.5, 2.0);
        let (p, i, d) = c.contribution();
        assert!((p.abs() + i.abs() + d.abs() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn contribution_zero_when_idle() {
        let t = tuning();
        let c = Controller::new(&t, 0.5, 0.5, 0.0, 0.0).unwrap();
        assert_eq!(c.contribution(), (0.0, 0.0, 0.0));
    }

    proptest! {
        /// For any sequence of setpoint/process inputs, the output never
        /// leaves [lout.0, lout.1].
        #[test]
        fn output_never_escapes_clamp(
            inputs in proptest::collection::vec((0.0f64..1.0, 0.0f64..1.0, 0.001f64..100.0), 1..100)
        ) {
            let mut c = Controller::new(&tuning(), 0.5, 0.5, 0.0, 0.0).unwrap();
            let mut now = 0.0;
            for (sp, pv, dt) in inputs {
                now += dt;
                let out = c.update(sp, pv, now);
                prop_assert!(out >= c.lout.0 && out <= c.lout.1);
                prop_assert!(c.value >= c.lout.0 && c.value <= c.lout.1);
            }
        }
    }
}
