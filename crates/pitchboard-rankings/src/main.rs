// Leaderboard printer.
//
// Usage: pitchboard [--json] [season] [metric] [team] [asc|desc]
// With no positional arguments the default view is shown: qualified ERA
// leaders across the league for `rankings.default_season`.

use anyhow::Context;
use pitchboard_core::config;
use pitchboard_core::db::Database;
use pitchboard_core::logging::init_tracing;
use pitchboard_core::Metric;
use pitchboard_rankings::{Leaderboard, LeaderboardRequest, RankingService};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = config::load_config().context("failed to load configuration")?;
    init_tracing("pitchboard", &config.logging.filter)?;

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let json = match args.iter().position(|a| a == "--json") {
        Some(index) => {
            args.remove(index);
            true
        }
        None => false,
    };

    let request = if args.is_empty() {
        LeaderboardRequest::default_view(config.rankings.default_season)
    } else {
        let arg = |i: usize| args.get(i).map(String::as_str);
        LeaderboardRequest::parse(arg(0), arg(1), arg(2), arg(3), config.rankings.default_season)?
    };
    info!("leaderboard request: {request:?}");

    let db = Database::open(&config.database.path).context("failed to open database")?;
    let service = RankingService::new(db, config.database.collection.clone());
    let board = service.top_pitchers(&request);

    if json {
        println!("{}", serde_json::to_string_pretty(&board)?);
    } else {
        print_table(&board);
    }
    Ok(())
}

fn print_table(board: &Leaderboard) {
    let floor = board
        .min_innings
        .map(|ip| format!(", IP >= {ip}"))
        .unwrap_or_default();
    println!(
        "{} {} leaders, team {} ({}{})",
        board.season,
        board.metric.label(),
        board.team,
        board.sort_dir,
        floor
    );

    if board.entries.is_empty() {
        println!("no pitchers found");
        return;
    }

    println!("{:>4}  {:<12} {:<6} {:>8} {:>8}", "RANK", "PLAYER", "TEAM", board.metric.label(), "IP");
    for entry in &board.entries {
        let value = entry
            .stat
            .get(board.metric)
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".into());
        let ip = entry
            .stat
            .get(Metric::Ip)
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".into());
        println!(
            "{:>4}  {:<12} {:<6} {:>8} {:>8}",
            entry.rank, entry.stat.player_name, entry.stat.team, value, ip
        );
    }
}
