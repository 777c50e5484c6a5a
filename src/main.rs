//! Terminal front end: renders one screen per invocation against the rental API.

use clap::{Parser, Subcommand};
use motorbike_admin::case::to_camel_case;
use motorbike_admin::{load_from_path, render, ApiClient, AppState, FullConfig, ResourceScreen, Shell};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "motorbike-admin", version, about = "Admin screens for the motorbike rental API")]
struct Cli {
    /// Origin of the rental API (gateway).
    #[arg(long, env = "MOTORBIKE_API_URL", default_value = "http://localhost:8080")]
    api_url: String,
    /// Session cookie to send with every request, e.g. `JSESSIONID=...`.
    #[arg(long, env = "MOTORBIKE_SESSION_COOKIE")]
    session_cookie: Option<String>,
    /// JSON resource config replacing the built-in screens.
    #[arg(long, env = "MOTORBIKE_RESOURCES")]
    resources: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the login indicator.
    Whoami,
    /// Print the login navigation target.
    Login,
    /// Print the logout navigation target.
    Logout,
    Dashboard,
    /// Render a resource table.
    List {
        resource: String,
        #[arg(long)]
        search: Option<String>,
        /// Exact-match filter applied by the API, e.g. `--where email=a@x.com`.
        #[arg(long = "where", value_parser = parse_pair)]
        filters: Vec<(String, String)>,
    },
    /// Submit the add form with `field=value` pairs.
    Add {
        resource: String,
        #[arg(value_parser = parse_pair)]
        fields: Vec<(String, String)>,
    },
    /// Open the edit form for a record, override `field=value` pairs and save.
    Edit {
        resource: String,
        id: String,
        #[arg(value_parser = parse_pair)]
        fields: Vec<(String, String)>,
    },
    Delete {
        resource: String,
        id: String,
    },
    Details {
        resource: String,
        id: String,
    },
}

fn parse_pair(s: &str) -> Result<(String, String), String> {
    let (k, v) = s
        .split_once('=')
        .ok_or_else(|| format!("expected field=value, got '{}'", s))?;
    Ok((to_camel_case(k.trim()), v.to_string()))
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("motorbike_admin=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.resources {
        Some(path) => load_from_path(path).await?,
        None => FullConfig::builtin(),
    };
    let api = ApiClient::with_session_cookie(&cli.api_url, cli.session_cookie.as_deref())?;
    let shell = Shell::start(AppState::new(api, &config)?).await?;
    let session = shell.auth().session().cloned();

    let (path, screen) = match cli.command {
        Command::Whoami => {
            print!("{}", render::header(shell.auth(), &shell.nav_items("/")));
            return Ok(ExitCode::SUCCESS);
        }
        Command::Login => {
            println!("{}", shell.state().api.login_url()?);
            return Ok(ExitCode::SUCCESS);
        }
        Command::Logout => {
            println!("{}", shell.state().api.logout_url()?);
            return Ok(ExitCode::SUCCESS);
        }
        Command::Dashboard => {
            print!("{}", render::header(shell.auth(), &shell.nav_items("/")));
            println!("\n{}", render::dashboard());
            return Ok(ExitCode::SUCCESS);
        }
        Command::List {
            resource,
            search,
            filters,
        } => {
            let mut screen = screen_for(&shell, &resource)?;
            screen.set_query_params(filters);
            screen.open().await;
            if let Some(q) = search {
                screen.set_search(q);
            }
            (resource, screen)
        }
        Command::Add { resource, fields } => {
            let mut screen = screen_for(&shell, &resource)?;
            screen.open().await;
            for (k, v) in fields {
                screen.form_mut().set(k, v);
            }
            screen.create().await;
            (resource, screen)
        }
        Command::Edit { resource, id, fields } => {
            require_session(&shell, "edit")?;
            let mut screen = screen_for(&shell, &resource)?;
            screen.open().await;
            screen.open_edit(&id).await;
            if let Some(form) = screen.edit_form_mut() {
                for (k, v) in fields {
                    form.set(k, v);
                }
            }
            screen.update().await;
            (resource, screen)
        }
        Command::Delete { resource, id } => {
            require_session(&shell, "delete")?;
            let mut screen = screen_for(&shell, &resource)?;
            screen.open().await;
            screen.remove(&id).await;
            (resource, screen)
        }
        Command::Details { resource, id } => {
            require_session(&shell, "details")?;
            let mut screen = screen_for(&shell, &resource)?;
            screen.open().await;
            screen.show_details(&id).await;
            (resource, screen)
        }
    };

    print!("{}", render::header(shell.auth(), &shell.nav_items(&path)));
    println!("\n{}", render::screen_view(&screen, session.as_ref()));

    if let Some(message) = screen.failure_message() {
        eprintln!("error: {}", message);
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn screen_for(shell: &Shell, resource: &str) -> Result<ResourceScreen, Box<dyn std::error::Error>> {
    shell
        .screen(resource)
        .ok_or_else(|| format!("unknown resource: {}", resource).into())
}

/// Row actions are only offered with a session; mirror that for the commands that use them.
fn require_session(shell: &Shell, action: &str) -> Result<(), Box<dyn std::error::Error>> {
    if shell.auth().session().is_none() {
        return Err(format!(
            "{} is not available without a session; log in at {}",
            action,
            shell.auth().action().url()
        )
        .into());
    }
    Ok(())
}
