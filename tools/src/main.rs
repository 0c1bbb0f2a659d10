//! dashboard-runner: headless driver for the sponsorship dashboard engine.
//!
//! Usage:
//!   dashboard-runner --seed 12345 --ticks 120 --view sponsors
//!   dashboard-runner --view sponsors --query platinum
//!   dashboard-runner --seed 12345 --data-dir ./data --ipc-mode

use anyhow::Result;
use sponsorship_core::{
    config::DashboardConfig,
    engine::DashboardEngine,
    seed::SeedData,
    view::ViewKind,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetView {
        view: String,
        #[serde(default)]
        query: Option<String>,
    },
    Tick { count: u64 },
    Snapshot,
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let ticks = parse_arg(&args, "--ticks", 120u64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let data_dir = arg_value(&args, "--data-dir").unwrap_or("./data");
    let view = arg_value(&args, "--view");
    let query = arg_value(&args, "--query");

    let config = DashboardConfig::load_or_default(data_dir)?;
    let data = SeedData::load_or_builtin(data_dir)?;
    let run_id = format!("run-{seed}-{}", uuid::Uuid::new_v4().simple());

    if !ipc_mode {
        println!("Sponsorship Dashboard — runner");
        println!("  run_id:    {run_id}");
        println!("  seed:      {seed}");
        println!("  ticks:     {ticks}");
        println!("  period:    {}s", config.period_secs);
        println!("  data_dir:  {data_dir}");
        println!();
    }

    let mut engine = DashboardEngine::build(run_id, seed, config, data)?;

    if ipc_mode {
        run_ipc_loop(&mut engine)?;
    } else {
        engine.run_ticks(ticks)?;
        match view {
            Some(name) => {
                let rendered = engine.render_search(name, query)?;
                println!("{}", serde_json::to_string_pretty(&rendered)?);
            }
            None => print_summary(&engine),
        }
    }

    Ok(())
}

fn run_ipc_loop(engine: &mut DashboardEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::Tick { count } => {
                engine.run_ticks(count)?;
                let reply = serde_json::json!({
                    "tick": engine.clock.current_tick,
                    "now": engine.clock.now,
                    "events": engine.store.event_count(),
                });
                writeln!(stdout, "{}", reply)?;
            }
            IpcCommand::GetView { view, query } => {
                match engine.render_search(&view, query.as_deref()) {
                    Ok(rendered) => writeln!(stdout, "{}", serde_json::to_string(&rendered)?)?,
                    Err(e) => {
                        log::warn!("Unknown view requested: {view}");
                        writeln!(stdout, "{}", serde_json::json!({ "error": e.to_string() }))?;
                    }
                }
            }
            IpcCommand::Snapshot => {
                writeln!(stdout, "{}", serde_json::to_string(&engine.snapshot())?)?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

fn print_summary(engine: &DashboardEngine) {
    use sponsorship_core::metrics;

    let data = engine.data();
    let m = &data.metrics;
    println!("── Run summary ─────────────────────────");
    println!("  ticks run:        {}", engine.clock.current_tick);
    println!("  simulated now:    {}", engine.clock.now);
    println!("  events logged:    {}", engine.store.event_count());
    println!("  total revenue:    {}", metrics::format_millions(m.total_revenue));
    println!("  utilization:      {}", metrics::format_percent(m.facility_utilization, 1));
    println!(
        "  avg fulfillment:  {}",
        metrics::format_percent(metrics::average_fulfillment(&data.sponsors), 1)
    );
    println!();
    println!("── Sponsors ────────────────────────────");
    for s in metrics::sponsors_by_tier(&data.sponsors) {
        println!(
            "  {:<20} {:<9} {:>12}  ROI {:>5}  renews in {:>5} days",
            s.name,
            s.tier.label(),
            metrics::format_usd(s.value),
            metrics::format_percent(metrics::sponsor_roi(s), 0),
            metrics::days_until_renewal(s.renewal, engine.clock.now),
        );
    }
    println!();
    println!("── Alerts ──────────────────────────────");
    for alert in engine.alerts() {
        println!("  [{:?}] {}: {}", alert.priority, alert.title, alert.message);
    }
    println!();
    println!(
        "Views available: {}",
        ViewKind::ALL
            .iter()
            .map(|k| format!("{k:?}").to_lowercase())
            .collect::<Vec<_>>()
            .join(", ")
    );
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    arg_value(args, flag)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
