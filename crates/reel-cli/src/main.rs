use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use reel_core::player::build_slots;
use reel_core::{StorefrontConfig, Surface};
use reel_entitlement::Viewer;
use reel_store::{CatalogProvider, CatalogSeed, MemoryBackend, SeriesId};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .value_parser(value_parser!(PathBuf))
        .help("TOML config file; REEL_* environment variables override it")
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output as JSON")
}

fn cli() -> Command {
    Command::new("reel")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Mini-drama storefront: entitlement gate and catalog tools")
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .default_value("warn")
                .help("Log filter used when RUST_LOG is unset"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("evaluate")
                .about("Decide whether a viewer may watch an episode")
                .arg(
                    Arg::new("episode")
                        .long("episode")
                        .required(true)
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(i32))
                        .help("Episode number"),
                )
                .arg(
                    Arg::new("vip")
                        .long("vip")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("unresolved")
                        .help("Viewer has an active VIP subscription"),
                )
                .arg(
                    Arg::new("unresolved")
                        .long("unresolved")
                        .action(ArgAction::SetTrue)
                        .help("Viewer's VIP status has not been loaded"),
                )
                .arg(
                    Arg::new("threshold")
                        .long("threshold")
                        .value_parser(value_parser!(i32).range(1..))
                        .help("First episode number that requires VIP"),
                )
                .arg(json_arg())
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("feed")
                .about("Show the player slots for a series in a catalog seed")
                .arg(
                    Arg::new("catalog")
                        .long("catalog")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON catalog seed"),
                )
                .arg(
                    Arg::new("series")
                        .long("series")
                        .required(true)
                        .value_parser(value_parser!(SeriesId))
                        .help("Series id"),
                )
                .arg(
                    Arg::new("vip")
                        .long("vip")
                        .action(ArgAction::SetTrue)
                        .help("Render for a VIP viewer"),
                )
                .arg(json_arg())
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("plans")
                .about("List VIP plans, cheapest first")
                .arg(
                    Arg::new("catalog")
                        .long("catalog")
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON catalog seed; the standard plans are used otherwise"),
                )
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("config")
                .about("Print the resolved configuration and backend endpoint")
                .arg(config_arg()),
        )
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn load_config(args: &ArgMatches) -> Result<StorefrontConfig> {
    let path = args.get_one::<PathBuf>("config").map(PathBuf::as_path);
    StorefrontConfig::load(path).context("failed to load configuration")
}

fn load_catalog(path: &Path) -> Result<MemoryBackend> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    let seed = CatalogSeed::from_json(&text)
        .with_context(|| format!("invalid catalog {}", path.display()))?;
    MemoryBackend::from_seed(seed).with_context(|| format!("rejected catalog {}", path.display()))
}

fn evaluate(args: &ArgMatches) -> Result<String> {
    let config = load_config(args)?;
    let mut policy = config.entitlement;
    if let Some(threshold) = args.get_one::<i32>("threshold") {
        policy = policy.with_lock_threshold(*threshold);
    }

    let viewer = if args.get_flag("vip") {
        Viewer::vip()
    } else if args.get_flag("unresolved") {
        Viewer::unresolved()
    } else {
        Viewer::free()
    };

    let episode = *args.get_one::<i32>("episode").context("missing --episode")?;
    let decision = policy.evaluate_number(&viewer, episode);
    tracing::debug!(episode, allowed = decision.allowed, reason = %decision.reason, "Evaluated");

    if args.get_flag("json") {
        return Ok(format!("{}\n", serde_json::to_string(&decision)?));
    }
    let verdict = if decision.allowed { "allowed" } else { "locked" };
    Ok(format!("episode {episode}: {verdict} ({})\n", decision.reason))
}

async fn feed(args: &ArgMatches) -> Result<String> {
    let config = load_config(args)?;
    let path = args.get_one::<PathBuf>("catalog").context("missing --catalog")?;
    let series_id = *args.get_one::<SeriesId>("series").context("missing --series")?;
    let backend = load_catalog(path)?;

    let Some(series) = backend.series(series_id).await? else {
        bail!("series {series_id} not found in {}", path.display());
    };
    let viewer = if args.get_flag("vip") {
        Viewer::vip()
    } else {
        Viewer::free()
    };
    let episodes = backend.episodes(series_id).await?;
    let slots = build_slots(&config.entitlement, &config.player, &viewer, episodes);

    if args.get_flag("json") {
        return Ok(format!("{}\n", serde_json::to_string_pretty(&slots)?));
    }

    let mut out = String::new();
    writeln!(out, "{} [{}]", series.title, series.category)?;
    if slots.is_empty() {
        writeln!(out, "  no episodes")?;
    }
    for slot in &slots {
        let surface = match &slot.surface {
            Surface::Playable { embed_url } => format!("play {embed_url}"),
            Surface::Locked { upgrade } => format!("LOCKED, upgrade at {upgrade}"),
        };
        writeln!(
            out,
            "  EP {:02}  {:<24} {}",
            slot.episode.episode_number, slot.episode.title, surface
        )?;
    }
    Ok(out)
}

async fn plans(args: &ArgMatches) -> Result<String> {
    let backend = match args.get_one::<PathBuf>("catalog") {
        Some(path) => load_catalog(path)?,
        None => MemoryBackend::with_default_plans(),
    };
    let page = reel_core::vip::load_vip_page(&backend, None).await?;

    if args.get_flag("json") {
        return Ok(format!("{}\n", serde_json::to_string_pretty(&page.plans)?));
    }

    let mut out = String::new();
    for plan in &page.plans {
        let popular = if plan.is_popular { "  [popular]" } else { "" };
        writeln!(
            out,
            "{:<16} ₹{:<6} {:>3} days{popular}",
            plan.name, plan.price, plan.duration_days
        )?;
    }
    Ok(out)
}

fn show_config(args: &ArgMatches) -> Result<String> {
    let config = load_config(args)?;
    let endpoint = config
        .backend_endpoint()
        .context("backend endpoint unresolved")?;
    let report = serde_json::json!({
        "config": config,
        "backend": endpoint,
    });
    Ok(format!("{}\n", serde_json::to_string_pretty(&report)?))
}

async fn run(matches: &ArgMatches) -> Result<String> {
    match matches.subcommand() {
        Some(("evaluate", args)) => evaluate(args),
        Some(("feed", args)) => feed(args).await,
        Some(("plans", args)) => plans(args).await,
        Some(("config", args)) => show_config(args),
        _ => bail!("unknown command"),
    }
}

#[tokio::main]
async fn main() {
    let matches = cli().get_matches();
    let level = matches
        .get_one::<String>("log-level")
        .map_or("warn", String::as_str);
    init_tracing(level);

    match run(&matches).await {
        Ok(output) => print!("{output}"),
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    }
}
