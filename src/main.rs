use std::sync::Arc;

use authgate::api::ApiError;
use authgate::config::{AuthConfig, ConfigError};
use authgate::routes::{self, DASHBOARD, GuardDecision, LOGIN, NavigationError, Navigator, RouteGuard};
use authgate::{AuthService, HttpAuthApi, SessionStore};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("http client setup failed: {0}")]
    Api(#[from] ApiError),
    #[error("navigation failed: {0}")]
    Navigation(#[from] NavigationError),
    #[error("{operation} failed: {message}")]
    Rejected { operation: &'static str, message: String },
}

#[derive(Parser, Debug)]
#[command(name = "authgate", about = "Drive the client auth session against an API server")]
struct Cli {
    /// Overrides `AUTH_API_BASE_URL`.
    #[arg(long)]
    base_url: Option<String>,

    /// Overrides `AUTH_REQUEST_TIMEOUT_SECS`.
    #[arg(long)]
    request_timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in, then continue to the dashboard.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "AUTH_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Register an account, then continue to the login page.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "AUTH_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        password_confirmation: String,
    },
    /// Print the identity of the current session.
    Whoami,
    /// Run the route guard for a route name or path.
    Visit { target: String },
    /// End the current session.
    Logout,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_config(cli: &Cli) -> Result<AuthConfig, CliError> {
    Ok(AuthConfig::from_env_with(cli.base_url.as_deref(), cli.request_timeout_secs)?)
}

fn rejected(operation: &'static str, auth: &AuthService) -> CliError {
    let message = auth.status().error.unwrap_or_else(|| "unknown error".to_owned());
    CliError::Rejected { operation, message }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    init_tracing();
    let cli = Cli::parse();
    let config = build_config(&cli)?;
    tracing::debug!(base_url = %config.base_url, "auth client configured");

    let api = Arc::new(HttpAuthApi::new(&config)?);
    let session = Arc::new(SessionStore::new());
    let auth = Arc::new(AuthService::new(api, session));
    let navigator = Navigator::new(RouteGuard::new(Arc::clone(&auth)));

    match cli.command {
        Command::Login { email, password } => {
            if !auth.login(&email, &password).await {
                return Err(rejected("login", &auth));
            }
            let route = navigator.navigate(DASHBOARD).await?;
            println!("logged in; now at {}", route.path);
        }
        Command::Register { name, email, password, password_confirmation } => {
            if !auth.register(&name, &email, &password, &password_confirmation).await {
                return Err(rejected("register", &auth));
            }
            let route = navigator.navigate(LOGIN).await?;
            println!("registered; now at {}", route.path);
        }
        Command::Whoami => {
            if !auth.check_auth().await {
                return Err(rejected("session check", &auth));
            }
            if let Some(user) = auth.session().identity() {
                println!("{} <{}> (id {})", user.name, user.email, user.id);
            }
        }
        Command::Visit { target } => {
            let name = routes::resolve(&target).map_or(target.as_str(), |route| route.name);
            match navigator.guard().before_each(name).await {
                GuardDecision::Allow => println!("allow {name}"),
                GuardDecision::Redirect { to } => println!("redirect {name} -> {to}"),
                GuardDecision::Defer => println!("defer {name}"),
            }
            let route = navigator.navigate(name).await?;
            println!("now at {}", route.path);
        }
        Command::Logout => {
            if !auth.logout().await {
                return Err(rejected("logout", &auth));
            }
            println!("logged out");
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
