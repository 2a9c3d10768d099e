use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;
use zheye::config::{ClientConfig, ConfigError, normalize_base_url};
use zheye::net::api::{ApiError, ColumnApi, HttpApi};
use zheye::net::types::LoginRequest;
use zheye::router::routes::RouteTable;
use zheye::router::{NavigationError, Router};
use zheye::state::{Store, StoreError};
use zheye::storage::FileStorage;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    #[error("not logged in; run `zheye login` first")]
    NotLoggedIn,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "zheye", about = "Column/post client: store actions and guarded navigation")]
struct Cli {
    #[arg(long, env = "ZHEYE_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "ZHEYE_STORAGE_PATH")]
    storage_path: Option<PathBuf>,

    #[arg(long, short, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all columns.
    Columns,
    /// Show one column.
    Column { id: String },
    /// List the posts of a column.
    Posts { column_id: String },
    /// Log in and fetch the current user.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "ZHEYE_PASSWORD")]
        password: String,
    },
    /// Show the user behind the persisted token.
    Whoami,
    /// Forget the persisted token.
    Logout,
    /// Run the navigation guard for a path and print where it lands.
    Navigate { path: String },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).init();

    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = cli.base_url.as_deref() {
        config.base_url = normalize_base_url(base_url).ok_or(ConfigError::Empty { var: "--base-url" })?;
    }
    if let Some(path) = cli.storage_path {
        config.storage_path = path;
    }
    tracing::debug!(base_url = %config.base_url, storage = %config.storage_path.display(), "client configured");

    let api = Arc::new(HttpApi::new(&config.base_url, config.timeouts)?);
    let storage = Arc::new(FileStorage::new(config.storage_path.clone()));
    let store = Store::new(api, storage);

    match cli.command {
        Command::Columns => print_json(&store.fetch_columns().await?),
        Command::Column { id } => print_json(&store.fetch_column(&id).await?),
        Command::Posts { column_id } => {
            store.fetch_posts(&column_id).await?;
            print_json(&store.posts_by_column(&column_id))
        }
        Command::Login { email, password } => {
            let user = store.login_and_fetch(&LoginRequest { email, password }).await?;
            print_json(&user)
        }
        Command::Whoami => run_whoami(&store).await,
        Command::Logout => {
            store.sign_out()?;
            print_json(&serde_json::json!({ "signedOut": true }))
        }
        Command::Navigate { path } => {
            let router = Router::new(store, RouteTable::standard().with_base(&config.router_base));
            run_navigate(&router, &path).await
        }
    }
}

async fn run_whoami(store: &Store) -> Result<(), CliError> {
    let token = store.token();
    if token.is_empty() {
        return Err(CliError::NotLoggedIn);
    }
    store.api().set_bearer_token(Some(&token));
    let user = store.fetch_current_user().await?;
    print_json(&user)
}

async fn run_navigate(router: &Router, path: &str) -> Result<(), CliError> {
    let navigation = router.push(path).await?;
    let route = navigation.route.as_ref();
    print_json(&serde_json::json!({
        "requested": navigation.requested,
        "path": navigation.path,
        "route": route.map(|r| r.name),
        "params": route.map(|r| r.params.clone()).unwrap_or_default(),
        "redirects": navigation.redirects,
        "loggedIn": router.store().is_logged_in(),
    }))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
