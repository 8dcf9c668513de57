mod locate;
mod output;
mod session;
mod terminal;

use clap::{Args, Parser, Subcommand};
use mukji_core::{
    load_app_config_from_env, AppConfig, LatLng, MapApp, PlaceSearch, RecommendError,
};
use mukji_kakao::KakaoClient;
use tracing_subscriber::EnvFilter;

use crate::locate::StaticGeolocator;
use crate::terminal::TerminalMap;

#[derive(Debug, Parser)]
#[command(name = "mukji")]
#[command(about = "Pick a random restaurant near you")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Recommend random restaurants inside the map around a position
    Recommend {
        #[command(flatten)]
        position: PositionArgs,
        /// Search keyword (defaults to MUKJI_SEARCH_KEYWORD)
        #[arg(long)]
        keyword: Option<String>,
        /// Number of consecutive draws
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        rounds: u32,
        /// Print each draw as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the current position and its address
    Locate {
        #[command(flatten)]
        position: PositionArgs,
    },
    /// Interactive session reading commands from stdin
    Session {
        #[command(flatten)]
        position: PositionArgs,
    },
}

/// Device position override. Falls back to `MUKJI_HOME_LAT`/`MUKJI_HOME_LNG`.
#[derive(Debug, Clone, Copy, Default, Args)]
struct PositionArgs {
    /// Latitude of the device position
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    lat: Option<f64>,
    /// Longitude of the device position
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lng: Option<f64>,
}

impl PositionArgs {
    fn resolve(self, config: &AppConfig) -> Option<LatLng> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(LatLng::new(lat, lng)),
            _ => config.home_position,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "configuration loaded");

    let client = KakaoClient::from_config(&config)?;

    match cli.command.unwrap_or(Commands::Recommend {
        position: PositionArgs::default(),
        keyword: None,
        rounds: 1,
        json: false,
    }) {
        Commands::Recommend {
            position,
            keyword,
            rounds,
            json,
        } => {
            let mut app = new_app(&config, keyword);
            app.initialize(&StaticGeolocator::new(position.resolve(&config)))
                .await;
            run_recommend(&mut app, &client, rounds, json).await?;
        }
        Commands::Locate { position } => {
            let geolocator = StaticGeolocator::new(position.resolve(&config));
            let mut app = new_app(&config, None);
            app.initialize(&geolocator).await;
            match app.move_to_current_location(&geolocator, &client).await {
                Ok(point) => println!(
                    "{}",
                    output::format_location(point, app.state().place.current_location.as_deref())
                ),
                Err(err) => report(&err),
            }
        }
        Commands::Session { position } => {
            let geolocator = StaticGeolocator::new(position.resolve(&config));
            let mut app = new_app(&config, None);
            app.initialize(&geolocator).await;
            session::run_session(&mut app, &client, &geolocator).await?;
        }
    }

    Ok(())
}

fn new_app(config: &AppConfig, keyword: Option<String>) -> MapApp<TerminalMap> {
    let mut settings = config.search_settings();
    if let Some(keyword) = keyword {
        settings.keyword = keyword;
    }
    let surface = TerminalMap::new(config.default_center, config.viewport_half_span_meters);
    MapApp::new(surface, settings, config.cache_capacity)
}

async fn run_recommend<S: PlaceSearch>(
    app: &mut MapApp<TerminalMap>,
    search: &S,
    rounds: u32,
    json: bool,
) -> anyhow::Result<()> {
    let mut rng = rand::rng();
    for round in 1..=rounds {
        match app.recommend(search, &mut rng).await {
            Ok(places) if json => println!("{}", output::places_json(places)?),
            Ok(places) => {
                if rounds > 1 {
                    println!("# draw {round}");
                }
                println!("{}", output::format_places(places));
            }
            Err(err) => report(&err),
        }
    }
    Ok(())
}

/// Prints the user-facing notice for `err`, if it has one.
fn report(err: &RecommendError) {
    tracing::debug!(error = %err, "action failed");
    if let Some(notice) = err.notice() {
        eprintln!("{notice}");
    }
}
