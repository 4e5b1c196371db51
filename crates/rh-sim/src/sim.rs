//! The tick state machine and the event-driven loop runner.

use crate::aggregate::aggregate_volume;
use crate::config::{ComfortDefaults, LoopConfig, LoopEvent};
use crate::error::{SimError, SimResult};
use crate::fusion::fuse_zone_stacks;
use crate::snapshot::{TickReport, VolumeSnapshot, ZoneReadout};
use rh_comfort::{ComfortEstimate, Fanger};
use rh_controls::ZoneControllers;
use rh_core::{f_to_c, now_s, VolumeId, NORMAL, PERCENT};
use rh_graph::{order, World, ZoneStack};
use rh_thermal::ThermalNetwork;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;
use tracing::{debug, warn};

/// The complete control-loop state: world graph, zone stacks, controllers,
/// and the thermal engine behind its trait seam.
///
/// Owned exclusively by the loop thread; sensors (reached through volume
/// conditions) are the only shared state, each guarded by its own lock.
pub struct Simulation {
    pub world: World,
    pub stacks: Vec<ZoneStack>,
    pub controllers: ZoneControllers,
    pub comfort: ComfortDefaults,
    pub config: LoopConfig,
    engine: Box<dyn ThermalNetwork + Send>,
    /// Volumes that get comfort estimates (the rooms).
    occupied: Vec<VolumeId>,
    /// Volumes exposed to the display, in zone-aware order.
    display: Vec<VolumeId>,
    last_tick: Option<f64>,
}

impl Simulation {
    pub fn new(
        world: World,
        stacks: Vec<ZoneStack>,
        controllers: ZoneControllers,
        engine: Box<dyn ThermalNetwork + Send>,
        occupied: Vec<VolumeId>,
        comfort: ComfortDefaults,
        config: LoopConfig,
    ) -> SimResult<Self> {
        config.validate()?;
        let mut display: Vec<VolumeId> = occupied.clone();
        for boundary in ["world", "ground"] {
            if let Some(id) = world.id_of(boundary) {
                display.push(id);
            }
        }
        order::sort_for_display(&world, &stacks, &mut display);
        Ok(Self {
            world,
            stacks,
            controllers,
            comfort,
            config,
            engine,
            occupied,
            display,
            last_tick: None,
        })
    }

    /// Volumes in display/selection order.
    pub fn display_order(&self) -> &[VolumeId] {
        &self.display
    }

    /// Run one tick of the authoritative cycle.
    ///
    /// Returns `None` when an event-triggered tick lands inside the
    /// debounce window and is coalesced into the next one. The seven
    /// steps always execute in fixed order; fusion precedes the model
    /// update, control follows aggregation.
    pub fn tick(&mut self, now: f64, triggered_by_event: bool) -> SimResult<Option<TickReport>> {
        // 1. Time advance, with coalescing of event bursts.
        let elapsed_s = match self.last_tick {
            Some(last) => (now - last).max(0.0),
            None => 0.0,
        };
        if triggered_by_event && self.last_tick.is_some() && elapsed_s < self.config.debounce_s {
            debug!(elapsed_s, "tick coalesced inside debounce window");
            return Ok(None);
        }
        self.last_tick = Some(now);

        // 2. Thermal compute over the elapsed interval.
        let flux = self.engine.compute(&self.world, elapsed_s);

        // 3. Sensor fusion, before the model update so corrected
        //    temperatures are what is advanced.
        let fusion = fuse_zone_stacks(&mut self.world, &self.stacks, now);

        // 4. Model update.
        self.engine.absorb(&mut self.world, &flux);

        // 5. Aggregation for monitoring.
        let aggregates: Vec<_> = self
            .display
            .iter()
            .map(|&id| aggregate_volume(&self.world, id, &flux, elapsed_s))
            .collect();

        // 6. Comfort estimation per occupied volume.
        let mut snapshots = Vec::with_capacity(self.display.len());
        for aggregate in &aggregates {
            let volume = self.world.volume(aggregate.id);
            let comfort = if self.occupied.contains(&aggregate.id) {
                let (clo, met) = self.comfort.resolve(aggregate.id);
                let model = Fanger {
                    clo,
                    met,
                    humidity: self.comfort.humidity,
                    t_air_c: f_to_c(volume.conditions.temperature),
                    t_radiant_c: f_to_c(aggregate.radiant_f),
                };
                Some(match ComfortEstimate::evaluate(&model) {
                    Ok(estimate) => estimate,
                    Err(err) => {
                        warn!(volume = %volume.name, %err, "comfort model failure");
                        ComfortEstimate::unknown()
                    }
                })
            } else {
                None
            };
            snapshots.push(VolumeSnapshot {
                id: aggregate.id,
                name: volume.name.clone(),
                temperature_c: f_to_c(volume.conditions.temperature),
                radiant_c: f_to_c(aggregate.radiant_f),
                btu_h: aggregate.btu_h,
                comfort,
                zone: None,
            });
        }

        // 7. Control, from the same tick's fused state.
        let scale = self.controllers.scale;
        for (entry, stack) in self.controllers.entries_mut().iter_mut().zip(&self.stacks) {
            let setpoint = scale.scale(entry.setpoint_f, NORMAL);
            let process = scale.scale(
                self.world.volume(entry.primary).conditions.temperature,
                NORMAL,
            );
            let value = entry.controller.update(setpoint, process, now);
            let readout = ZoneReadout {
                zone: entry.zone.clone(),
                heatcall_pct: NORMAL.scale(value, PERCENT),
                p: entry.controller.p,
                i: entry.controller.i,
                d: entry.controller.d,
                contributions: entry.controller.contribution(),
                setpoint_c: f_to_c(entry.setpoint_f),
                slab_c: f_to_c(self.world.volume(stack.slab).conditions.temperature),
                fluid_c: f_to_c(self.world.volume(stack.fluid).conditions.temperature),
            };
            if let Some(snapshot) = snapshots.iter_mut().find(|s| s.id == entry.primary) {
                snapshot.zone = Some(readout);
            }
        }

        Ok(Some(TickReport {
            now,
            elapsed_s,
            volumes: snapshots,
            fusion,
        }))
    }

    /// Drive the loop until a quit request or the stop flag.
    ///
    /// The loop is timer/event-driven with bounded polling latency: when
    /// no event arrives within `poll_s`, a tick runs anyway on a
    /// time-elapsed basis. The stop flag is polled once per completed
    /// iteration, so a tick never ends half-done.
    pub fn run<F>(
        &mut self,
        events: &Receiver<LoopEvent>,
        stop: &AtomicBool,
        mut on_tick: F,
    ) -> SimResult<()>
    where
        F: FnMut(&TickReport),
    {
        self.config.validate()?;
        let poll = Duration::from_secs_f64(self.config.poll_s);
        loop {
            if stop.load(Ordering::Relaxed) {
                return Ok(());
            }
            let triggered = match events.recv_timeout(poll) {
                Ok(LoopEvent::Quit) => {
                    stop.store(true, Ordering::Relaxed);
                    continue;
                }
                Ok(LoopEvent::Wake) => true,
                Err(RecvTimeoutError::Timeout) => false,
                Err(RecvTimeoutError::Disconnected) => return Err(SimError::Disconnected),
            };
            if let Some(report) = self.tick(now_s(), triggered)? {
                on_tick(&report);
            }
        }
    }
}
