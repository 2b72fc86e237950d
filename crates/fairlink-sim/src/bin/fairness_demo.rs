use anyhow::Result;
use fairlink_sim::driver::{run_backlogged, ExperimentConfig};
use fairlink_wfq::WfqConfig;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(true)
        .compact()
        .init();

    let mut cfg = ExperimentConfig::default();
    let mut scheduler = WfqConfig::default();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--first-weight" => {
                scheduler.first_weight = args.next().expect("missing --first-weight value").parse()?;
            }
            "--second-weight" => {
                scheduler.second_weight =
                    args.next().expect("missing --second-weight value").parse()?;
            }
            "--rounds" => {
                cfg.rounds = args.next().expect("missing --rounds value").parse()?;
            }
            "--frame-len" => {
                cfg.frame_len = args.next().expect("missing --frame-len value").parse()?;
            }
            other => anyhow::bail!("unknown argument: {other}"),
        }
    }
    cfg.scheduler = scheduler;

    tracing::info!(
        first_weight = cfg.scheduler.first_weight,
        second_weight = cfg.scheduler.second_weight,
        rounds = cfg.rounds,
        "running backlogged fairness experiment"
    );

    let report = run_backlogged(&cfg)?;
    tracing::info!(ratio = report.byte_ratio(), "experiment complete");
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
