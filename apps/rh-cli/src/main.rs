use clap::Parser;
use rh_app::{AppResult, Runtime, SensorMode};
use rh_sim::LoopEvent;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::{mpsc, Arc};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "rh-cli")]
#[command(about = "Radiant - hydronic floor heating control loop", long_about = None)]
struct Cli {
    /// Simulate sensors instead of waiting on live probes
    #[arg(short = 'f', long)]
    simulate: bool,

    /// Building description YAML; the built-in three-zone sample when
    /// omitted
    description: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => info!("clean shutdown"),
        Err(err) => {
            // The loop has already shut down cleanly by the time an error
            // surfaces here; report the captured diagnostic and exit
            // non-zero.
            error!(%err, "control loop failed");
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> AppResult<()> {
    let description = match &cli.description {
        Some(path) => rh_building::load_yaml(path)?,
        None => rh_building::three_zone_classroom(),
    };
    info!(building = %description.name, simulate = cli.simulate, "starting");

    let mode = if cli.simulate {
        SensorMode::Simulated
    } else {
        SensorMode::Live
    };
    let state_root = Path::new(".");
    let mut runtime = Runtime::compile(&description, mode, Some(state_root))?;

    let (events_tx, events_rx) = mpsc::channel();
    let stop = Arc::new(AtomicBool::new(false));

    // Keyboard surface: 'q' quits, anything else wakes the loop.
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(_) => break,
            };
            let event = if line.trim() == "q" {
                LoopEvent::Quit
            } else {
                LoopEvent::Wake
            };
            if events_tx.send(event).is_err() {
                break;
            }
        }
    });

    let result = runtime
        .simulation
        .run(&events_rx, &stop, |report| {
            for snapshot in &report.volumes {
                if let Some(zone) = &snapshot.zone {
                    let comfort = snapshot
                        .comfort
                        .as_ref()
                        .map(|c| c.feels.as_str())
                        .unwrap_or("-");
                    info!(
                        volume = %snapshot.name,
                        zone = %zone.zone,
                        temp_c = snapshot.temperature_c,
                        radiant_c = snapshot.radiant_c,
                        slab_c = zone.slab_c,
                        heatcall_pct = zone.heatcall_pct,
                        comfort,
                        "tick"
                    );
                }
            }
        })
        .map_err(rh_app::AppError::from);

    // Persist controller state and stop drivers whether or not the loop
    // ended cleanly.
    runtime.shutdown(Some(state_root))?;
    result
}
