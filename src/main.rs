use blocknotes::application::{
    audio_item, clear_notes, init, list_notes, play_audio, record_audio, remove_note,
    ConfigService, NoteSession, RecordingTarget,
};
use blocknotes::cli::{format_note_detail, format_note_list, AddItem, Cli, Commands};
use blocknotes::error::{BlocknotesError, Result};
use blocknotes::infrastructure::{
    AudioPlayer, AudioRecorder, CommandBackend, FileSystemRepository, NoteStore,
    NotebookRepository,
};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::time::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const PLAYBACK_TICK: Duration = Duration::from_millis(200);

fn main() {
    init_logging();

    let cli = Cli::parse();

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("BLOCKNOTES_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn empty_text() -> BlocknotesError {
    BlocknotesError::InvalidInput("Text item cannot be empty".to_string())
}

fn open_notebook() -> Result<(FileSystemRepository, NoteStore)> {
    let repo = FileSystemRepository::discover()?;
    let store = repo.open_store()?;
    Ok((repo, store))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Init { path }) => init::init(&path),
        Some(Commands::New { title, texts }) => {
            let (_, mut store) = open_notebook()?;
            let mut session = NoteSession::create(&mut store, title);
            for body in texts {
                session.add_text(body).ok_or_else(empty_text)?;
            }
            session.save()?;
            println!("{}", session.note().id);
            Ok(())
        }
        Some(Commands::List { limit }) => {
            let (_, store) = open_notebook()?;
            let notes = list_notes(&store, limit)?;
            println!("{}", format_note_list(&notes).trim_end());
            Ok(())
        }
        Some(Commands::Show { note_id }) => {
            let (_, mut store) = open_notebook()?;
            let session = NoteSession::open(&mut store, &note_id)?;
            print!("{}", format_note_detail(session.note()));
            Ok(())
        }
        Some(Commands::Add { note_id, item }) => {
            let (_, mut store) = open_notebook()?;
            let mut session = NoteSession::open(&mut store, &note_id)?;
            let item_id = match item {
                AddItem::Text { body } => session.add_text(body).ok_or_else(empty_text)?,
                AddItem::Image { link } => session.add_image(link),
                AddItem::Audio { link, duration } => session.add_audio(link, duration),
            };
            session.save()?;
            println!("{}", item_id);
            Ok(())
        }
        Some(Commands::Rename { note_id, title }) => {
            let (_, mut store) = open_notebook()?;
            let mut session = NoteSession::open(&mut store, &note_id)?;
            session.set_title(title);
            session.save()?;
            Ok(())
        }
        Some(Commands::Record { note_id }) => {
            let (repo, mut store) = open_notebook()?;
            let config = repo.load_config()?;
            let target = RecordingTarget::new(&repo.media_dir(&config)?, &config.media_dir);

            let mut session = NoteSession::open(&mut store, &note_id)?;
            let mut recorder = AudioRecorder::new(CommandBackend::new(config.get_recorder()));
            let item_id = record_audio(&mut session, &mut recorder, &target, |_| {
                eprint!("Recording to {}. Press Enter to stop... ", target.link);
                io::stderr().flush()?;
                let mut line = String::new();
                io::stdin().lock().read_line(&mut line)?;
                Ok(())
            })?;
            println!("{}", item_id);
            Ok(())
        }
        Some(Commands::Play { note_id, item_id }) => {
            let (repo, store) = open_notebook()?;
            let config = repo.load_config()?;
            let (link, duration) = audio_item(&store, &note_id, &item_id)?;

            let path = repo.resolve_link(&link);
            if !path.exists() {
                return Err(BlocknotesError::Media(format!(
                    "Audio file not found: {}",
                    path.display()
                )));
            }

            let mut player = AudioPlayer::new(CommandBackend::new(config.get_player()));
            play_audio(&mut player, &path, duration, PLAYBACK_TICK)
        }
        Some(Commands::Delete { note_id }) => {
            let (_, mut store) = open_notebook()?;
            remove_note(&mut store, &note_id)?;
            println!("Deleted note {}", note_id);
            Ok(())
        }
        Some(Commands::DeleteItem { note_id, item_id }) => {
            let (_, mut store) = open_notebook()?;
            let mut session = NoteSession::open(&mut store, &note_id)?;
            session.delete_item(&item_id)?;
            println!("Deleted item {}", item_id);
            Ok(())
        }
        Some(Commands::Count) => {
            let (_, store) = open_notebook()?;
            println!("{}", store.count_notes()?);
            Ok(())
        }
        Some(Commands::Clear { yes }) => {
            let (_, mut store) = open_notebook()?;
            let removed = clear_notes(&mut store, yes)?;
            println!("Deleted {} notes", removed);
            Ok(())
        }
        Some(Commands::Config { key, value, list }) => {
            let repo = FileSystemRepository::discover()?;
            let service = ConfigService::new(repo);

            if list {
                let config = service.list()?;
                println!("database = {}", config.database);
                println!("media_dir = {}", config.media_dir);
                println!("recorder = {}", config.recorder);
                println!("player = {}", config.player);
                println!("created = {}", config.created.to_rfc3339());
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: blocknotes config [--list | <key> [<value>]]");
                println!("Valid keys: database, media_dir, recorder, player, created");
                Ok(())
            }
        }
        None => {
            println!("blocknotes - Notes made of text, image and audio blocks");
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
