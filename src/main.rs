/* 3rd party libraries */
use clap::{Arg, Command};
use env_logger::Env;
use log::{error, info};
use std::path::Path;

/* Custom libraries */
use elevator_simulator::config;
use elevator_simulator::unwrap_or_exit;
use elevator_simulator::{Building, DecisionStrategy, PassengerGenerator};

/* Main */
fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let matches = Command::new("elevator_simulator")
        .about("Multi-elevator building simulation")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .takes_value(true)
                .default_value("config.toml")
                .help("Path to the simulation configuration file"),
        )
        .arg(
            Arg::new("strategy")
                .short('s')
                .long("strategy")
                .takes_value(true)
                .possible_values(["baseline", "improved"])
                .help("Decision strategy, overrides the configuration file"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .takes_value(true)
                .help("Seed for passenger generation, overrides the configuration file"),
        )
        .arg(
            Arg::new("report-json")
                .long("report-json")
                .takes_value(true)
                .help("Also write every passenger record to this JSON file"),
        )
        .arg(
            Arg::new("demo")
                .long("demo")
                .help("Run the scripted demo: direct requests to elevator 1, no passengers"),
        )
        .get_matches();

    // Load the configuration
    let config_path = matches.value_of("config").unwrap_or("config.toml");
    let mut config = unwrap_or_exit!(config::load_config(Path::new(config_path)));

    if let Some(strategy) = matches.value_of("strategy") {
        config.simulation.strategy = unwrap_or_exit!(strategy.parse::<DecisionStrategy>());
    }
    if let Some(seed) = matches.value_of("seed") {
        config.simulation.seed = Some(unwrap_or_exit!(seed.parse::<u64>()));
    }

    // Build and start the building
    let strategy = config.simulation.strategy;
    let seed = config.simulation.seed;
    let passenger_config = config.passengers.clone();
    let mut building = unwrap_or_exit!(Building::new(config, strategy));
    unwrap_or_exit!(building.start());

    info!("Starting simulation...");
    if matches.is_present("demo") {
        for floor in [7, 5, 10] {
            if let Err(e) = building.controller().send_request_to_elevator(1, floor) {
                error!("Demo request rejected: {}", e);
            }
        }
        building.run(None);
    } else {
        let mut generator = PassengerGenerator::new(&passenger_config, seed);
        building.run(Some(&mut generator));
    }

    building.shutdown();
    info!("Ending simulation. Generating report...");
    println!("{}", building.collector().render());

    if let Some(path) = matches.value_of("report-json") {
        unwrap_or_exit!(building.collector().write_json(Path::new(path)));
        info!("Wrote passenger records to {}", path);
    }
}
