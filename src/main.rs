/* 3rd party libraries */
use clap::{Arg, Command};
use crossbeam_channel as cbc;
use log::{info, warn};
use std::path::Path;
use std::thread::{sleep, Builder};
use std::time::{Duration, Instant};

/* Custom libraries */
use elevator_sim::config::RiderConfig;
use elevator_sim::{load_config, unwrap_or_exit, Config, ElevatorEvent, ElevatorScheduler};

/* Main */
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = Command::new("elevator-sim")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Simulates a single elevator car serving a fixed set of riders")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .takes_value(true)
                .default_value("config.toml")
                .help("Path to the TOML configuration file"),
        )
        .arg(
            Arg::new("floors")
                .short('f')
                .long("floors")
                .takes_value(true)
                .help("Override the number of floors"),
        )
        .arg(
            Arg::new("duration")
                .short('d')
                .long("duration")
                .takes_value(true)
                .default_value("60")
                .help("Maximum run time in seconds"),
        )
        .get_matches();

    // Load the configuration
    let config_path = matches.value_of("config").unwrap_or("config.toml");
    let mut config = if Path::new(config_path).exists() {
        unwrap_or_exit!(load_config(config_path))
    } else {
        warn!("No configuration at {}, using the built-in scenario", config_path);
        Config::default()
    };
    if let Some(floors) = matches.value_of("floors") {
        config.elevator.n_floors = unwrap_or_exit!(floors.parse::<u8>());
    }
    let run_time = Duration::from_secs(unwrap_or_exit!(matches
        .value_of("duration")
        .unwrap_or("60")
        .parse::<u64>()));

    // Event channel, drained on its own thread
    let (event_tx, event_rx) = cbc::unbounded::<ElevatorEvent>();
    let event_logger_thread = Builder::new().name("event_logger".into());
    let event_logger = unwrap_or_exit!(event_logger_thread.spawn(move || {
        for event in event_rx.iter() {
            info!("{}", event);
        }
    }));

    // Start the elevator
    let mut scheduler = unwrap_or_exit!(ElevatorScheduler::new(&config.elevator, event_tx));
    unwrap_or_exit!(scheduler.start());

    let mut riders: Vec<RiderConfig> = config.scenario.riders.clone();
    riders.sort_by_key(|rider| rider.delay);
    let mut pending = riders.into_iter().peekable();

    let started = Instant::now();
    loop {
        while let Some(rider) =
            pending.next_if(|rider| started.elapsed() >= Duration::from_millis(rider.delay))
        {
            // Rejections are logged by the scheduler
            let _ = scheduler.submit(rider.to_rider());
        }

        if pending.peek().is_none() && scheduler.snapshot().is_drained() {
            info!("All riders served");
            break;
        }
        if started.elapsed() >= run_time {
            warn!("Run time of {:?} elapsed, stopping the elevator", run_time);
            break;
        }
        sleep(Duration::from_millis(100));
    }

    info!("Stopping the elevator...");
    scheduler.request_shutdown();
    unwrap_or_exit!(scheduler.join());

    let snapshot = scheduler.snapshot();
    println!("{}", unwrap_or_exit!(serde_json::to_string_pretty(&snapshot)));

    drop(scheduler);
    if event_logger.join().is_err() {
        warn!("Event logger thread panicked");
    }
}
