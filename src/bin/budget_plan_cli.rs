use std::{
    collections::BTreeMap,
    env, fs,
    io::{self, Read},
    process,
};

use budget_plan::{
    config::ConfigManager,
    init,
    ledger::input_from_json,
    plan::DailyPlan,
    simulation::Simulator,
    timeline::{parse_timestamp, BudgetTimeline, DATE_FORMAT},
    BudgetError,
};
use serde_json::json;

fn main() {
    init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let command = args.next().unwrap_or_else(|| {
        print_usage();
        process::exit(1);
    });
    let rest: Vec<String> = args.collect();

    match command.as_str() {
        "simulate" => {
            let mut config = ConfigManager::new()?.load()?;
            let mut path = None;
            let mut iter = rest.iter();
            while let Some(arg) = iter.next() {
                if arg == "--seed" {
                    let seed = iter.next().ok_or("--seed requires a value")?;
                    config.seed = Some(seed.parse()?);
                } else {
                    path = Some(arg.as_str());
                }
            }
            let timeline = read_timeline(path)?;
            let mut simulator = Simulator::from_timeline(&timeline, &config)?;
            simulator.generate_costs()?;
            let report = json!({
                "status": "success",
                "simulation": simulator.summary()?,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        "plan" => {
            let config = ConfigManager::new()?.load()?;
            let timeline = read_timeline(rest.first().map(String::as_str))?;
            let plan = DailyPlan::with_factor(&timeline, config.daily_budget_factor)?;
            let days: Vec<_> = plan
                .days()
                .map(|(date, day)| {
                    json!({
                        "date": date.format(DATE_FORMAT).to_string(),
                        "budget": day.budget.maximum().to_string(),
                        "entries": day.budget.len(),
                    })
                })
                .collect();
            let months: BTreeMap<String, String> = plan
                .months()
                .map(|(key, month)| (key.to_string(), month.budget.to_string()))
                .collect();
            let report = json!({ "days": days, "months": months });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        "limits" => {
            let (path, raw_timestamp) = match rest.as_slice() {
                [path, timestamp] => (path.as_str(), timestamp.as_str()),
                _ => {
                    print_usage();
                    process::exit(1);
                }
            };
            let config = ConfigManager::new()?.load()?;
            let timeline = read_timeline(Some(path))?;
            let plan = DailyPlan::with_factor(&timeline, config.daily_budget_factor)?;
            let at = parse_timestamp(raw_timestamp).map_err(BudgetError::from)?;
            let daily = plan.daily_limit(at).map_err(BudgetError::from)?;
            let monthly = plan.monthly_limit(at).map_err(BudgetError::from)?;
            let report = json!({
                "timestamp": raw_timestamp,
                "daily_limit": daily.to_string(),
                "monthly_limit": monthly.to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        "span" => {
            let timeline = read_timeline(rest.first().map(String::as_str))?;
            for date in timeline.date_span() {
                println!("{}", date.format(DATE_FORMAT));
            }
        }
        _ => {
            print_usage();
            process::exit(1);
        }
    }

    Ok(())
}

/// Reads timeline input from `path`, or from stdin when no path is given.
fn read_timeline(path: Option<&str>) -> Result<BudgetTimeline, BudgetError> {
    let data = match path {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let input = input_from_json(&data)?;
    Ok(BudgetTimeline::from_input(&input)?)
}

fn print_usage() {
    eprintln!(
        "Usage: budget_plan_cli <command>\n\
         Commands:\n  \
         simulate [input.json] [--seed N]\n  \
         plan [input.json]\n  \
         limits <input.json> \"MM.DD.YYYY HH:MM:SS\"\n  \
         span [input.json]"
    );
}
