use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::error;

use pokedex::action::Action;
use pokedex::api::HttpPokeApi;
use pokedex::config::Config;
use pokedex::favorites::SqliteFavorites;
use pokedex::model::{PokemonDetail, PokemonSummary, RegionId};
use pokedex::resolver::DetailResolver;
use pokedex::runner::EffectRunner;
use pokedex::state::{AppState, ListSource};

#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Browse PokeAPI with an offline favorites fallback")]
struct Args {
    #[command(flatten)]
    config: Config,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List regions
    Regions,
    /// List the Pokemon in a region's pokedex
    Region { id: String },
    /// List every Pokemon (single page)
    All,
    /// List Pokemon types
    Types,
    /// List the Pokemon of one type
    Type { name: String },
    /// Show details, falling back to favorites when offline
    Detail { name: String },
    /// Toggle a Pokemon's favorite flag
    Favorite { name: String },
    /// List favorited Pokemon
    Favorites,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    pokedex::logging::init(args.verbose);

    let resolver = match build_resolver(&args.config) {
        Ok(resolver) => resolver,
        Err(message) => {
            error!("{message}");
            eprintln!("Error: {message}");
            return ExitCode::FAILURE;
        }
    };

    let mut runner = EffectRunner::new(resolver);
    match args.command {
        Command::Regions => {
            runner.run(Action::Init).await;
            for region in &runner.state().regions {
                println!("{}", region.name);
            }
        }
        Command::Region { id } => {
            let region = match id.parse::<RegionId>() {
                Ok(region) => region,
                Err(err) => {
                    eprintln!("Error: {err}");
                    eprintln!(
                        "Known regions: {}",
                        RegionId::ALL.map(|region| region.pokedex()).join(", ")
                    );
                    return ExitCode::FAILURE;
                }
            };
            runner.run(Action::ListOpen(ListSource::Region(region))).await;
            print_summaries(&runner.state().pokemon);
        }
        Command::All => {
            runner.run(Action::ListOpen(ListSource::All)).await;
            print_summaries(&runner.state().pokemon);
        }
        Command::Types => {
            runner.run(Action::Init).await;
            for pokemon_type in &runner.state().types {
                println!("{}", pokemon_type.name);
            }
        }
        Command::Type { name } => {
            runner.run(Action::ListOpen(ListSource::Type(name))).await;
            print_summaries(&runner.state().pokemon);
        }
        Command::Detail { name } => {
            runner.run(Action::DetailOpen(name)).await;
            print_detail_screen(runner.state());
        }
        Command::Favorite { name } => {
            runner.run(Action::DetailOpen(name)).await;
            if runner.state().current_detail().is_some() {
                runner.run(Action::FavoriteToggle).await;
            }
            print_detail_screen(runner.state());
        }
        Command::Favorites => {
            runner.run(Action::FavoritesRefresh).await;
            for favorite in &runner.state().favorites {
                println!("{}", favorite.name);
            }
        }
    }

    if let Some(message) = &runner.state().message {
        eprintln!("{message}");
    }
    ExitCode::SUCCESS
}

fn build_resolver(config: &Config) -> Result<DetailResolver, String> {
    let api = HttpPokeApi::new(config).map_err(|err| err.to_string())?;
    let path = config.database_path();
    let store = SqliteFavorites::open(&path)
        .map_err(|err| format!("cannot open {}: {err}", path.display()))?;
    Ok(DetailResolver::new(Arc::new(api), Arc::new(store)).with_list_limit(config.list_limit))
}

fn print_summaries(pokemon: &[PokemonSummary]) {
    for entry in pokemon {
        println!("{}", entry.name);
    }
}

fn print_detail_screen(state: &AppState) {
    let Some(screen) = &state.detail else {
        return;
    };
    match screen.detail.data() {
        Some(detail) => print_detail(detail, screen.is_favorite),
        None => println!("Details unavailable for {}", screen.name),
    }
}

fn print_detail(detail: &PokemonDetail, is_favorite: bool) {
    let star = if is_favorite { " ★" } else { "" };
    println!("{}{star}", detail.name);
    if let Some(category) = &detail.category {
        println!("  {category}");
    }
    println!(
        "  height: {:.1} m  weight: {:.1} kg",
        f64::from(detail.height_decimeters) / 10.0,
        f64::from(detail.weight_hectograms) / 10.0
    );
    println!("  types: {}", detail.types.join(", "));
    println!("  abilities: {}", detail.abilities.join(", "));
    println!("  moves: {}", detail.moves.join(", "));
    if let Some(sprite) = &detail.sprite_url {
        println!("  sprite: {sprite}");
    }
    if let Some(description) = &detail.description {
        println!("  {description}");
    }
}
