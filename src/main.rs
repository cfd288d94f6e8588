use clap::Parser;
use seo_score::history::HistoryStore;
use seo_score::report::{Grade, action_plan, share_text, write_export};
use seo_score::{AnalysisReport, Analyzer};

mod args;
use args::{Args, build_config};

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    if let Err(e) = run(&args).await {
        ::log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(args: &Args) -> seo_score::Result<()> {
    let config = build_config(args)?;
    let history_capacity = config.history_capacity;
    let analyzer = Analyzer::new(config)?;

    ::log::info!("Starting analysis for: {}", args.url);
    let start_time = std::time::Instant::now();

    let report = analyzer.analyze(&args.url).await?;

    ::log::info!(
        "Analysis complete - score {} ({:?}) in {:.2} seconds",
        report.metrics.score,
        Grade::from_score(report.metrics.score),
        start_time.elapsed().as_secs_f64()
    );

    println!("{}", serde_json::to_string_pretty(&report)?);

    if args.plan {
        print_plan(&report);
    }

    if args.share {
        println!("\n{}", share_text(&report.metrics));
    }

    if let Some(dir) = &args.export {
        let path = write_export(dir, &report)?;
        println!("Report written to {}", path.display());
    }

    if let Some(path) = &args.history {
        let mut history = HistoryStore::open(path, history_capacity);
        history.append(&report)?;
        if let Some(stats) = history.stats() {
            ::log::info!(
                "History: {} analyses, average {:.1}, latest {}, trend {:+}",
                history.entries().len(),
                stats.average_score,
                stats.latest_score,
                stats.trend
            );
        }
    }

    Ok(())
}

fn print_plan(report: &AnalysisReport) {
    if report.metrics.is_synthetic() {
        println!("\nNote: the site could not be fetched, this plan is based on demo data.");
    }
    println!("\nAction plan:");
    for action in action_plan(&report.metrics) {
        let mark = if action.completed { "x" } else { " " };
        println!("  [{}] {:?}: {}", mark, action.priority, action.title);
    }
}
