//! Dispatch scheduler entry point — CLI wiring and config-driven runs.

use std::path::Path;
use std::process;

use bess_dispatch::config::DispatchConfig;
use bess_dispatch::dispatch::DispatchEngine;
use bess_dispatch::feed::ConsumptionProfile;
use bess_dispatch::io::export::export_csv;
use bess_dispatch::report::DispatchReport;

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    seed_override: Option<u64>,
    samples_override: Option<usize>,
    schedule_out: Option<String>,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("bess-dispatch — Rule-based household battery dispatch scheduler");
    eprintln!();
    eprintln!("Usage: bess-dispatch [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!("  --preset <name>          Use a built-in preset (baseline)");
    eprintln!("  --seed <u64>             Override profile random seed");
    eprintln!("  --samples <n>            Override number of generated readings");
    eprintln!("  --schedule-out <path>    Export the schedule to CSV");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start REST API server instead of a one-shot run");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        seed_override: None,
        samples_override: None,
        schedule_out: None,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --scenario requires a path argument");
                    process::exit(1);
                }
                cli.scenario_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--seed" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --seed requires a u64 argument");
                    process::exit(1);
                }
                if let Ok(s) = args[i].parse::<u64>() {
                    cli.seed_override = Some(s);
                } else {
                    eprintln!("error: --seed value \"{}\" is not a valid u64", args[i]);
                    process::exit(1);
                }
            }
            "--samples" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --samples requires a count argument");
                    process::exit(1);
                }
                if let Ok(n) = args[i].parse::<usize>() {
                    cli.samples_override = Some(n);
                } else {
                    eprintln!("error: --samples value \"{}\" is not a valid count", args[i]);
                    process::exit(1);
                }
            }
            "--schedule-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --schedule-out requires a path argument");
                    process::exit(1);
                }
                cli.schedule_out = Some(args[i].clone());
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --port requires a u16 argument");
                    process::exit(1);
                }
                if let Ok(p) = args[i].parse::<u16>() {
                    cli.port = p;
                } else {
                    eprintln!("error: --port value \"{}\" is not a valid u16", args[i]);
                    process::exit(1);
                }
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn main() {
    let cli = parse_args();

    // Load config: --scenario takes priority, then --preset, then baseline default
    let mut scenario = if let Some(ref path) = cli.scenario_path {
        match DispatchConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match DispatchConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        DispatchConfig::baseline()
    };

    // Apply overrides
    if let Some(seed) = cli.seed_override {
        scenario.profile.seed = seed;
    }
    if let Some(n) = cli.samples_override {
        scenario.profile.samples = n;
    }

    // Validate
    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let engine = match DispatchEngine::new(scenario.battery.clone()) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    // API mode serves requests instead of running the generated profile.
    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(bess_dispatch::api::AppState::new(engine));
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        rt.block_on(bess_dispatch::api::serve(state, addr));
        return;
    }

    // One-shot run over a synthetic profile
    let mut profile = ConsumptionProfile::from_config(&scenario.profile, engine.config());
    let readings = profile.generate(scenario.profile.samples);
    let schedule = engine.optimize(&readings);

    for (i, entry) in schedule.iter().enumerate() {
        println!("t={i:>4} | {entry}");
    }

    let report = DispatchReport::from_schedule(&schedule, engine.config());
    println!("\n{report}");

    // Export CSV if requested
    if let Some(ref path) = cli.schedule_out {
        if let Err(e) = export_csv(&readings, &schedule, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Schedule written to {path}");
    }
}
