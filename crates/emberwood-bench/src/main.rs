use std::path::PathBuf;
use std::process;

use emberwood_bench::report;
use emberwood_bench::runner::ScenarioRunner;
use emberwood_bench::scenes;
use emberwood_core::GameConfig;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut tick_count = 1800u32;
    let mut dt = 1.0f32 / 30.0;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                config_path = Some(PathBuf::from(value(&args, &mut i)));
            }
            "--output" => {
                output_path = Some(PathBuf::from(value(&args, &mut i)));
            }
            "--ticks" => {
                tick_count = parse(&args, &mut i);
            }
            "--dt" => {
                dt = parse(&args, &mut i);
                if !(dt > 0.0) {
                    eprintln!("--dt must be positive");
                    process::exit(1);
                }
            }
            "--help" | "-h" => {
                eprintln!("Usage: scenario-runner [OPTIONS]");
                eprintln!("  --config <path>   Campsite config RON (default: built-in)");
                eprintln!("  --output <path>   Save results as JSON");
                eprintln!("  --ticks <n>       Ticks per scenario (default: 1800)");
                eprintln!("  --dt <secs>       Seconds per tick (default: 1/30)");
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = load_config(config_path.as_deref());
    let runner = ScenarioRunner::new(config.clone(), tick_count, dt);

    let mut results = Vec::new();
    for scenario in &scenes::standard_scenarios() {
        match runner.run(scenario) {
            Ok(result) => results.push(result),
            Err(e) => {
                eprintln!("Scenario '{}' failed to set up: {}", scenario.name, e);
                process::exit(1);
            }
        }
    }

    println!("\n## Scenario Results\n");
    println!("{}", report::format_markdown(&results));

    if let Some(ref path) = output_path {
        let run = report::RunReport {
            seed: config.seed,
            dt,
            results,
        };
        if let Err(e) = report::save_report(path, &run) {
            eprintln!("Failed to save results to {}: {}", path.display(), e);
            process::exit(1);
        }
        log::info!("Saved results to {}", path.display());
    }

    log::info!("Scenarios complete.");
}

fn value<'a>(args: &'a [String], i: &mut usize) -> &'a str {
    *i += 1;
    match args.get(*i) {
        Some(v) => v,
        None => {
            eprintln!("{} needs a value", args[*i - 1]);
            process::exit(1);
        }
    }
}

fn parse<T: std::str::FromStr>(args: &[String], i: &mut usize) -> T {
    let flag = args[*i].clone();
    let raw = value(args, i);
    match raw.parse() {
        Ok(v) => v,
        Err(_) => {
            eprintln!("invalid {} value: {}", flag, raw);
            process::exit(1);
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> GameConfig {
    let loaded = match path {
        Some(path) => emberwood_rules::load_config_file(path),
        None => emberwood_rules::default_config(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };
    if let Err(errors) = emberwood_rules::validate_config(&config) {
        for e in &errors {
            eprintln!("config: {}", e);
        }
        process::exit(1);
    }
    config
}
