use anyhow::Result;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::{error, info};

use shopadmin::{
    admin_tui::{
        screens::{Orders, Products, Reviews, Users},
        App, ListFormScreen, Resource, SubmitOutcome,
    },
    api::ApiClient,
    cli::{render_table, Cli, Commands, CreateCommand},
    config::Config,
    models::ResourceKind,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "shopadmin=info");
    }

    let config = Config::from_env()?.with_base_url(cli.base_url.clone());
    let tui_mode = matches!(cli.command, None | Some(Commands::Tui { .. }));

    // The TUI owns the terminal, so it logs to a file instead of stderr
    use tracing_subscriber::{fmt, EnvFilter};
    if tui_mode {
        let dir = config
            .log_file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| std::path::Path::new("."));
        let name = config
            .log_file
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("shopadmin.log"));
        let file_appender = tracing_appender::rolling::never(dir, name);
        fmt()
            .with_writer(file_appender)
            .with_ansi(false)
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    } else {
        fmt()
            .with_writer(io::stderr)
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    }

    config.validate()?;
    let client = ApiClient::new(&config)?;

    match cli.command {
        None => run_tui(client, &config, ResourceKind::Orders).await,
        Some(Commands::Tui { screen }) => {
            let screen = Commands::parse_resource(&screen)?;
            run_tui(client, &config, screen).await
        }
        Some(Commands::List { resource }) => {
            let succeeded = match Commands::parse_resource(&resource)? {
                ResourceKind::Orders => run_list::<Orders>(&client).await,
                ResourceKind::Products => run_list::<Products>(&client).await,
                ResourceKind::Reviews => run_list::<Reviews>(&client).await,
                ResourceKind::Users => run_list::<Users>(&client).await,
            };
            if !succeeded {
                std::process::exit(1);
            }
            Ok(())
        }
        Some(Commands::Create { record }) => {
            let succeeded = match record.kind() {
                ResourceKind::Orders => run_create::<Orders>(&client, &record).await,
                ResourceKind::Products => run_create::<Products>(&client, &record).await,
                ResourceKind::Reviews => run_create::<Reviews>(&client, &record).await,
                ResourceKind::Users => run_create::<Users>(&client, &record).await,
            };
            if !succeeded {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

async fn run_tui(client: ApiClient, config: &Config, screen: ResourceKind) -> Result<()> {
    info!("Launching admin console against {}", config.base_url);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(client, &config.base_url).with_screen(screen);
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match result {
        Ok(_) => {
            info!("Admin console exited successfully");
            Ok(())
        }
        Err(e) => {
            error!("Admin console encountered an error: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_records<R: Resource>(screen: &ListFormScreen<R>) {
    if screen.records().is_empty() {
        println!("{}", R::KIND.empty_message());
        return;
    }

    let rows: Vec<Vec<String>> = screen.records().iter().map(R::table_row).collect();
    println!("{}", render_table(R::COLUMNS, &rows));
    println!();
    println!("Total: {} {}", rows.len(), R::KIND.as_str());
}

/// Load and print one collection. Returns false when the load failed.
async fn run_list<R: Resource>(client: &ApiClient) -> bool {
    let mut screen = ListFormScreen::<R>::new();
    if !screen.load(client).await {
        eprintln!("{}", screen.error().unwrap_or(R::LOAD_FAILED_MESSAGE));
        return false;
    }
    print_records(&screen);
    true
}

/// Fill the screen's form from the arguments and submit it
async fn run_create<R: Resource>(client: &ApiClient, record: &CreateCommand) -> bool {
    let mut screen = ListFormScreen::<R>::new();
    for (key, value) in record.form_values() {
        screen.form.set_value(key, value);
    }

    match screen.submit(client).await {
        SubmitOutcome::Created => {
            println!("Created {} record", R::KIND.as_str());
            match screen.error() {
                Some(message) => eprintln!("{}", message),
                None => print_records(&screen),
            }
            true
        }
        SubmitOutcome::Rejected | SubmitOutcome::Failed => {
            eprintln!("{}", screen.error().unwrap_or(R::CREATE_FAILED_MESSAGE));
            false
        }
    }
}
