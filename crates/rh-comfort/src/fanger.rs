//! Fanger's predicted mean vote.

use crate::scales::{clothing_amount, metabolism_rate, ResolvedFigure};
use crate::{ComfortError, ComfortResult};

/// Still-air assumption for a heated interior, m/s.
const AIR_VELOCITY_M_S: f64 = 0.1;

/// Comfort model inputs for one volume.
///
/// Temperatures are °C (the model's presentation-side convention);
/// humidity is a fraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fanger {
    /// Clothing insulation, clo.
    pub clo: f64,
    /// Metabolic rate, met.
    pub met: f64,
    /// Relative humidity fraction.
    pub humidity: f64,
    pub t_air_c: f64,
    pub t_radiant_c: f64,
}

impl Fanger {
    /// Predicted mean vote on the familiar −3 (cold) .. +3 (hot) scale.
    ///
    /// Solves the clothing-surface heat balance iteratively; implausible
    /// inputs and non-convergence are errors for the caller to degrade
    /// from.
    pub fn pmv(&self) -> ComfortResult<f64> {
        for (what, value, min) in [
            ("air temperature", self.t_air_c, -273.15),
            ("radiant temperature", self.t_radiant_c, -273.15),
        ] {
            if !value.is_finite() || value <= min {
                return Err(ComfortError::ImplausibleInput { what, value });
            }
        }
        if !(self.met.is_finite() && self.met > 0.0) {
            return Err(ComfortError::ImplausibleInput {
                what: "metabolic rate",
                value: self.met,
            });
        }
        if !(self.clo.is_finite() && self.clo >= 0.0) {
            return Err(ComfortError::ImplausibleInput {
                what: "clothing insulation",
                value: self.clo,
            });
        }
        if !(0.0..=1.0).contains(&self.humidity) {
            return Err(ComfortError::ImplausibleInput {
                what: "humidity",
                value: self.humidity,
            });
        }

        let ta = self.t_air_c;
        let tr = self.t_radiant_c;
        // Water vapour partial pressure, Pa.
        let pa = self.humidity * 1000.0 * (16.6536 - 4030.183 / (ta + 235.0)).exp();

        let icl = 0.155 * self.clo; // m²·K/W
        let m = self.met * 58.15; // W/m²
        let mw = m; // no external work

        let fcl = if icl <= 0.078 {
            1.0 + 1.29 * icl
        } else {
            1.05 + 0.645 * icl
        };
        let hcf = 12.1 * AIR_VELOCITY_M_S.sqrt();
        let taa = ta + 273.0;
        let tra = tr + 273.0;

        // Clothing surface temperature by iteration.
        let tcla = taa + (35.5 - ta) / (3.5 * icl + 0.1);
        let p1 = icl * fcl;
        let p2 = p1 * 3.96;
        let p3 = p1 * 100.0;
        let p4 = p1 * taa;
        let p5 = 308.7 - 0.028 * mw + p2 * (tra / 100.0).powi(4);
        let mut xn = tcla / 100.0;
        let mut xf = tcla / 50.0;
        let mut hc = hcf;
        let mut iterations = 0;
        while (xn - xf).abs() > 0.000_15 {
            xf = (xf + xn) / 2.0;
            let hcn = 2.38 * (100.0 * xf - taa).abs().powf(0.25);
            hc = hcn.max(hcf);
            xn = (p5 + p4 * hc - p2 * xf.powi(4)) / (100.0 + p3 * hc);
            iterations += 1;
            if iterations > 150 {
                return Err(ComfortError::NonConvergence);
            }
        }
        let tcl = 100.0 * xn - 273.0;

        // Heat loss components, W/m².
        let hl1 = 3.05 * 0.001 * (5733.0 - 6.99 * mw - pa); // skin diffusion
        let hl2 = if mw > 58.15 { 0.42 * (mw - 58.15) } else { 0.0 }; // sweating
        let hl3 = 1.7e-5 * m * (5867.0 - pa); // latent respiration
        let hl4 = 0.0014 * m * (34.0 - ta); // dry respiration
        let hl5 = 3.96 * fcl * (xn.powi(4) - (tra / 100.0).powi(4)); // radiation
        let hl6 = fcl * hc * (tcl - ta); // convection

        let ts = 0.303 * (-0.036 * m).exp() + 0.028;
        let pmv = ts * (mw - hl1 - hl2 - hl3 - hl4 - hl5 - hl6);
        if !pmv.is_finite() {
            return Err(ComfortError::NonConvergence);
        }
        Ok(pmv)
    }

    /// Resolved clothing figure for the current insulation.
    pub fn clothing(&self) -> ResolvedFigure {
        crate::scales::clothing(clothing_amount(self.clo))
    }

    /// Resolved metabolism figure for the current rate.
    pub fn metabolism(&self) -> ResolvedFigure {
        crate::scales::metabolism(metabolism_rate(self.met))
    }

    /// Adjust clothing by normalized amount and re-derive the figure.
    pub fn set_clothing_amount(&mut self, amount: f64) -> ResolvedFigure {
        let figure = crate::scales::clothing(amount);
        self.clo = figure.value;
        figure
    }

    /// Adjust metabolic rate by normalized amount and re-derive the
    /// figure.
    pub fn set_metabolism_rate(&mut self, rate: f64) -> ResolvedFigure {
        let figure = crate::scales::metabolism(rate);
        self.met = figure.value;
        figure
    }
}

/// Qualitative descriptor for a vote.
pub fn feels(pmv: f64) -> &'static str {
    match pmv {
        v if v <= -2.5 => "cold",
        v if v <= -1.5 => "cool",
        v if v <= -0.5 => "slightly cool",
        v if v < 0.5 => "comfortable",
        v if v < 1.5 => "slightly warm",
        v if v < 2.5 => "warm",
        _ => "hot",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neutral_room() -> Fanger {
        Fanger {
            clo: 1.0,
            met: 1.2,
            humidity: 0.5,
            t_air_c: 22.0,
            t_radiant_c: 22.0,
        }
    }

    #[test]
    fn neutral_room_votes_near_zero() {
        let pmv = neutral_room().pmv().unwrap();
        assert!(pmv.abs() < 0.5, "pmv was {pmv}");
        assert_eq!(feels(pmv), "comfortable");
    }

    #[test]
    fn cold_room_votes_negative() {
        let mut model = neutral_room();
        model.t_air_c = 10.0;
        model.t_radiant_c = 10.0;
        let pmv = model.pmv().unwrap();
        assert!(pmv < -1.0, "pmv was {pmv}");
    }

    #[test]
    fn warm_radiant_floor_raises_the_vote() {
        let cool_air = Fanger {
            t_air_c: 18.0,
            t_radiant_c: 18.0,
            ..neutral_room()
        };
        let warm_floor = Fanger {
            t_air_c: 18.0,
            t_radiant_c: 26.0,
            ..neutral_room()
        };
        assert!(warm_floor.pmv().unwrap() > cool_air.pmv().unwrap());
    }

    #[test]
    fn negative_absolute_temperature_is_implausible() {
        let mut model = neutral_room();
        model.t_air_c = -300.0;
        assert!(matches!(
            model.pmv(),
            Err(ComfortError::ImplausibleInput { .. })
        ));
    }

    #[test]
    fn non_positive_metabolism_is_implausible() {
        let mut model = neutral_room();
        model.met = 0.0;
        assert!(model.pmv().is_err());
    }

    #[test]
    fn feels_bands_cover_the_scale() {
        assert_eq!(feels(-3.0), "cold");
        assert_eq!(feels(-2.0), "cool");
        assert_eq!(feels(-1.0), "slightly cool");
        assert_eq!(feels(0.0), "comfortable");
        assert_eq!(feels(1.0), "slightly warm");
        assert_eq!(feels(2.0), "warm");
        assert_eq!(feels(3.0), "hot");
    }

    #[test]
    fn mutators_rederive_figures() {
        let mut model = neutral_room();
        let figure = model.set_clothing_amount(0.0);
        assert_eq!(model.clo, figure.value);
        assert_eq!(figure.value, 0.0);
        let figure = model.set_metabolism_rate(1.0);
        assert_eq!(model.met, figure.value);
    }
}
