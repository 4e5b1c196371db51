//! Portal facing temperatures for radiant aggregation.

use rh_graph::Portal;

/// Instantaneous temperature of the portal surface facing `t_inside`.
///
/// The surface sits between the film (toward the inside air) and the
/// static conduction path (toward the far side):
///
/// `t = t_inside − (t_inside − t_outside) · film / (r + film)`
///
/// For a mass-coupled floor portal (r = 0, film > 0) this is the floor's
/// own temperature; for a film-less insulated wall it is the inside air
/// temperature. A fully direct portal (both zero) reads as the far side.
pub fn facing_temperature(portal: &Portal, t_inside: f64, t_outside: f64) -> f64 {
    let total = portal.r + portal.film;
    if total <= 0.0 {
        return t_outside;
    }
    t_inside - (t_inside - t_outside) * portal.film / total
}
