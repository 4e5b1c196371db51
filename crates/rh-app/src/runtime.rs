//! Compiling a description into a running control stack.

use crate::error::{AppError, AppResult};
use crate::persist;
use rh_building::BuildingDescription;
use rh_controls::ZoneControllers;
use rh_core::{c_to_f, now_s, VolumeId};
use rh_graph::TopologyBuilder;
use rh_sensors::{Sensor, SimWave, SimulatedDriver};
use rh_sim::{ComfortDefaults, ComfortOverride, LoopConfig, Simulation};
use rh_thermal::{CapacityTable, ConductionEngine};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Where slab sensor readings come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorMode {
    /// Background threads write a synthetic waveform.
    Simulated,
    /// Sensors are attached but written by an external acquisition layer;
    /// until it writes, fusion falls back to room temperatures.
    Live,
}

/// A compiled, runnable control stack.
pub struct Runtime {
    pub simulation: Simulation,
    /// One slab sensor per zone, in zone order, for the acquisition layer.
    sensors: Vec<Arc<Sensor>>,
    drivers: Vec<SimulatedDriver>,
}

impl Runtime {
    /// Compile a description: topology, sensors, controllers, loop state.
    ///
    /// Persisted controller state found under `state_root` is merged into
    /// the tuning overrides before controllers are created, seeding each
    /// zone's integral term.
    pub fn compile(
        description: &BuildingDescription,
        mode: SensorMode,
        state_root: Option<&Path>,
    ) -> AppResult<Self> {
        let mut description = description.clone();
        if let Some(root) = state_root {
            if let Some(state) = persist::load_state(root)? {
                for (zone, integral) in state.integrals {
                    description
                        .tuning
                        .zones
                        .entry(zone)
                        .or_default()
                        .integral = Some(integral);
                }
            }
        }

        let (mut world, stacks) = TopologyBuilder::build(&description)?;

        // Heat capacities: engine defaults plus description overrides.
        let mut capacities = CapacityTable::default();
        for material in &description.materials {
            if let Some(capacity) = material.heat_capacity_btu_ft3_f {
                capacities.insert(material.name.clone(), capacity);
            }
        }

        // One slab probe per zone. Simulated mode drives them; live mode
        // leaves them to the acquisition layer.
        let mut sensors = Vec::with_capacity(stacks.len());
        let mut drivers = Vec::new();
        for stack in &stacks {
            let sensor = Arc::new(Sensor::new(format!("{} slab probe", stack.name)));
            world.volume_mut(stack.slab).conditions.sensor = Some(Arc::clone(&sensor));
            if mode == SensorMode::Simulated {
                let primary_name = &world.volume(stack.primary()).name;
                let setpoint_c = rh_core::f_to_c(description.setpoint_f(primary_name));
                drivers.push(SimulatedDriver::spawn(
                    Arc::clone(&sensor),
                    SimWave {
                        center_c: setpoint_c,
                        ..SimWave::default()
                    },
                ));
            }
            sensors.push(sensor);
        }
        info!(?mode, sensors = sensors.len(), "sensors attached");

        let controllers = ZoneControllers::build(&description, &world, &stacks, now_s())?;

        let occupied: Vec<VolumeId> = description
            .rooms
            .iter()
            .filter_map(|room| world.id_of(&room.name))
            .collect();

        let mut comfort = ComfortDefaults {
            humidity: description.defaults.humidity,
            clo: description.defaults.clothing_clo,
            met: description.defaults.metabolism_met,
            ..ComfortDefaults::default()
        };
        for (room, patch) in &description.comfort {
            if let Some(id) = world.id_of(room) {
                comfort.overrides.insert(
                    id,
                    ComfortOverride {
                        clo: patch.clo,
                        met: patch.met,
                    },
                );
            }
        }

        let simulation = Simulation::new(
            world,
            stacks,
            controllers,
            Box::new(ConductionEngine::new(capacities)),
            occupied,
            comfort,
            LoopConfig::default(),
        )?;

        Ok(Self {
            simulation,
            sensors,
            drivers,
        })
    }

    /// The zone slab sensors, for an external acquisition layer.
    pub fn sensors(&self) -> &[Arc<Sensor>] {
        &self.sensors
    }

    /// Persist controller state and stop any simulated drivers.
    pub fn shutdown(mut self, state_root: Option<&Path>) -> AppResult<()> {
        if let Some(root) = state_root {
            persist::save_state(root, &self.simulation.controllers)?;
        }
        for driver in self.drivers.drain(..) {
            driver.stop();
        }
        Ok(())
    }

    // ---- interactive mutation surface ----

    /// Set a zone's manual setpoint, °C.
    pub fn set_setpoint_c(&mut self, zone: &str, setpoint_c: f64) -> AppResult<()> {
        let entry = self
            .simulation
            .controllers
            .by_zone_mut(zone)
            .map_err(|_| AppError::UnknownZone(zone.to_string()))?;
        entry.setpoint_f = c_to_f(setpoint_c);
        Ok(())
    }

    /// Adjust a zone's gains; `None` leaves a gain unchanged.
    pub fn set_gains(
        &mut self,
        zone: &str,
        kp: Option<f64>,
        ki: Option<f64>,
        kd: Option<f64>,
    ) -> AppResult<()> {
        let entry = self
            .simulation
            .controllers
            .by_zone_mut(zone)
            .map_err(|_| AppError::UnknownZone(zone.to_string()))?;
        if let Some(kp) = kp {
            entry.controller.kp = kp;
        }
        if let Some(ki) = ki {
            entry.controller.ki = ki;
        }
        if let Some(kd) = kd {
            entry.controller.kd = kd;
        }
        Ok(())
    }

    /// Raise or lower a zone's upper output limit. Values above 1.0 let
    /// the zone dominate a shared secondary heat source.
    pub fn set_output_limit(&mut self, zone: &str, high: f64) -> AppResult<()> {
        let entry = self
            .simulation
            .controllers
            .by_zone_mut(zone)
            .map_err(|_| AppError::UnknownZone(zone.to_string()))?;
        if high <= entry.controller.lout.0 {
            return Err(AppError::Control(rh_controls::ControlError::InvalidArg {
                what: "output limit must stay above the lower bound",
            }));
        }
        entry.controller.lout.1 = high;
        Ok(())
    }

    /// Override a room's clothing insulation by normalized amount.
    pub fn set_clothing(&mut self, room: &str, amount: f64) -> AppResult<f64> {
        let id = self.volume_id(room)?;
        let figure = rh_comfort::clothing(amount);
        self.simulation
            .comfort
            .overrides
            .entry(id)
            .or_default()
            .clo = Some(figure.value);
        Ok(figure.value)
    }

    /// Override a room's metabolic rate by normalized amount.
    pub fn set_metabolism(&mut self, room: &str, rate: f64) -> AppResult<f64> {
        let id = self.volume_id(room)?;
        let figure = rh_comfort::metabolism(rate);
        self.simulation
            .comfort
            .overrides
            .entry(id)
            .or_default()
            .met = Some(figure.value);
        Ok(figure.value)
    }

    fn volume_id(&self, name: &str) -> AppResult<VolumeId> {
        self.simulation
            .world
            .id_of(name)
            .ok_or_else(|| AppError::UnknownVolume(name.to_string()))
    }
}
