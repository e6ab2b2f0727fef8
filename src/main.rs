use clap::Parser;
use postflow::clipboard::copy_post;
use postflow::{
    CredentialStore, Error, FileStore, GeneratedPost, GenerationConfig, Notice, OpenAIProvider,
    PipelineState, Platform, PostGenerator, Session,
};
use std::io::{IsTerminal, Read};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, warn};
use tracing_subscriber::{fmt, EnvFilter};

mod args;
use args::{Cli, Commands, KeyAction};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if let Err(e) = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("tracing init failed: {e}");
    }
}

async fn run(cli: Cli) -> Result<ExitCode, Error> {
    let credentials = CredentialStore::new(FileStore::default_location()?);
    debug!(path = %credentials.backend().path().display(), "using local store");

    match cli.command {
        Commands::Generate {
            idea,
            platform,
            copy,
            json,
        } => handle_generate(credentials, idea, platform, copy, json).await,
        Commands::Key { action } => {
            handle_key(&credentials, action)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn handle_generate(
    credentials: CredentialStore<FileStore>,
    words: Vec<String>,
    platform: Platform,
    copy: bool,
    json: bool,
) -> Result<ExitCode, Error> {
    let idea = if words.is_empty() {
        read_stdin_idea()?
    } else {
        words.join(" ")
    };

    let config = GenerationConfig::from_env()?;
    let provider = OpenAIProvider::from_config(&config)?;
    let generator = Arc::new(PostGenerator::new(credentials, provider, config));

    let mut session = Session::new();
    let task = session.submit(&generator, &idea, platform)?;
    eprintln!("Generating {} post...", platform.label());

    let token = task.token();
    let abort = task.abort_handle();
    let outcome = tokio::select! {
        (_, outcome) = task.join() => outcome,
        _ = tokio::signal::ctrl_c() => {
            abort.abort();
            Err(Error::Cancelled)
        }
    };
    session.resolve(token, outcome);

    match session.state() {
        PipelineState::Succeeded(post) => {
            print_post(post, platform, json)?;
            let notice = Notice::post_generated();
            eprintln!("{}: {}", notice.title, notice.description);
            if copy {
                match copy_post(post) {
                    Ok(()) => eprintln!("Copied to clipboard!"),
                    Err(e) => {
                        warn!(error = %e, "clipboard copy failed");
                        report(&e);
                    }
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        PipelineState::Failed(detail) => {
            eprintln!("{}: {}", detail.notice.title, detail.notice.description);
            Ok(ExitCode::FAILURE)
        }
        PipelineState::Idle | PipelineState::Running(_) => Err(Error::Cancelled),
    }
}

fn handle_key(credentials: &CredentialStore<FileStore>, action: KeyAction) -> Result<(), Error> {
    match action {
        KeyAction::Set { key } => {
            credentials.save(&key)?;
            println!(
                "Settings saved. Your API key is stored in {}",
                credentials.backend().path().display()
            );
        }
        KeyAction::Show { reveal } => match credentials.get()? {
            Some(credential) if reveal => println!("{}", credential.expose()),
            Some(credential) => println!("{}", credential.masked()),
            None => println!("No API key stored. Run `postflow key set <KEY>` to add one."),
        },
        KeyAction::Clear => {
            credentials.clear()?;
            println!("API key cleared.");
        }
    }
    Ok(())
}

fn read_stdin_idea() -> Result<String, Error> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        eprintln!("Enter your idea, then press Ctrl-D:");
    }
    let mut idea = String::new();
    stdin.read_to_string(&mut idea)?;
    Ok(idea)
}

fn print_post(post: &GeneratedPost, platform: Platform, json: bool) -> Result<(), Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(post)?);
        return Ok(());
    }
    println!("{}\n", post.title);
    println!("{}\n", post.content);
    println!("{}", platform.footer());
    Ok(())
}

fn report(error: &Error) {
    let notice = error.notice();
    eprintln!("{}: {}", notice.title, notice.description);
    if matches!(error, Error::MissingCredential) {
        eprintln!("Run `postflow key set <KEY>` to store your OpenAI API key.");
    }
}
