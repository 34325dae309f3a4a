/// Sound+ - podcast player for the terminal
use anyhow::Context;
use clap::{Parser, Subcommand};
use sound_cli::{
    pages::render_header, session::COMMAND_HELP, AppConfig, AppError, EpisodePage, HomePage,
    Session, SimulatedMedia,
};
use sound_client::EpisodeClient;
use sound_core::EpisodeId;
use sound_playback::PlayerStore;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const TICK: Duration = Duration::from_millis(250);

#[derive(Parser)]
#[command(name = "soundplus")]
#[command(about = "Sound+ podcast player", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "SOUNDPLUS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List recommended and all episodes
    Home,
    /// Show a single episode
    Episode {
        /// Episode ID
        id: String,
        /// Play the episode after showing it
        #[arg(long)]
        play: bool,
        /// Seconds of audio simulated per real second
        #[arg(long, default_value_t = 60.0)]
        speed: f64,
    },
    /// Play the home listing, reading player controls from stdin
    Play {
        /// Number shown next to the episode in `home`
        #[arg(short, long, default_value_t = 0)]
        index: usize,
        /// Start with shuffle enabled
        #[arg(long)]
        shuffle: bool,
        /// Start with loop enabled
        #[arg(long = "loop")]
        looping: bool,
        /// Seconds of audio simulated per real second
        #[arg(long, default_value_t = 60.0)]
        speed: f64,
    },
    /// Print the header line
    Header,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "sound_cli=info,soundplus=info,sound_client=info,sound_playback=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Home => {
            home(&config).await?;
        }
        Commands::Episode { id, play, speed } => {
            episode(&config, &id, play, speed).await?;
        }
        Commands::Play {
            index,
            shuffle,
            looping,
            speed,
        } => {
            play(&config, index, shuffle, looping, speed).await?;
        }
        Commands::Header => {
            println!("{}", render_header(chrono::Local::now().date_naive()));
        }
    }

    Ok(())
}

async fn fetch_home(config: &AppConfig) -> anyhow::Result<HomePage> {
    let client = EpisodeClient::new(config.client_config())?;
    HomePage::fetch(&client, &config.episode_query())
        .await
        .with_context(|| format!("Failed to list episodes from {}", client.base_url()))
}

async fn home(config: &AppConfig) -> anyhow::Result<()> {
    let page = fetch_home(config).await?;
    print!("{}", page.render());
    Ok(())
}

async fn episode(config: &AppConfig, id: &str, play: bool, speed: f64) -> anyhow::Result<()> {
    if play {
        check_speed(speed)?;
    }

    let client = EpisodeClient::new(config.client_config())?;
    let page = EpisodePage::fetch(&client, &EpisodeId::new(id))
        .await
        .with_context(|| format!("Failed to fetch episode {}", id))?;

    print!("{}", page.render());
    if !play {
        return Ok(());
    }

    let media = SimulatedMedia::for_episodes(std::iter::once(page.episode()));
    let mut session = Session::new(PlayerStore::new(config.player_config()), media);
    session.update(|store| page.play(store));

    listen(&mut session, speed).await;
    Ok(())
}

async fn play(
    config: &AppConfig,
    index: usize,
    shuffle: bool,
    looping: bool,
    speed: f64,
) -> anyhow::Result<()> {
    check_speed(speed)?;

    let page = fetch_home(config).await?;
    let queue = page.queue();
    if queue.is_empty() {
        return Err(AppError::NoEpisodes.into());
    }

    let mut player_config = config.player_config();
    player_config.shuffle |= shuffle;
    player_config.looping |= looping;

    let media = SimulatedMedia::for_episodes(&queue);
    let mut session = Session::new(PlayerStore::new(player_config), media);

    session
        .update(|store| page.play_listed(store, index))
        .map_err(AppError::from)
        .with_context(|| format!("Cannot start playback at episode {}", index))?;

    listen(&mut session, speed).await;
    Ok(())
}

fn check_speed(speed: f64) -> anyhow::Result<()> {
    if !(speed.is_finite() && speed > 0.0 && speed <= 10_000.0) {
        anyhow::bail!("Speed must be between 0 and 10000, got {}", speed);
    }
    Ok(())
}

async fn listen(session: &mut Session, speed: f64) {
    println!("{}", COMMAND_HELP);
    println!("{}", session.status_line());

    let input = BufReader::new(tokio::io::stdin());
    session.run(input, TICK, speed).await;

    tracing::info!(
        episodes = session.episodes_played(),
        "Playback session finished"
    );
}
