use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use krystal::config::{load_config, ConfigError};
use krystal::module::site::builtin_factories;
use krystal::routing::QueryEncoding;
use krystal::{Application, Bootstrap};

#[derive(Parser)]
#[command(name = "krystal-cli")]
#[command(about = "Offline inspection of a Krystal configuration", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "krystal.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the route map in match order
    Routes,
    /// Match a path against the route map
    Match {
        path: String,
        #[arg(short, long, default_value = "GET")]
        method: String,
    },
    /// Build a URL for a controller reference
    Url {
        /// Controller in Module:Controller@action notation
        controller: String,
        /// Values for the template's placeholders, in order
        vars: Vec<String>,
        /// Which of the controller's templates to use
        #[arg(short, long, default_value_t = 0)]
        index: usize,
        /// Query parameters as key=value
        #[arg(short, long)]
        query: Vec<String>,
        /// Append query parameters without URL-encoding
        #[arg(long)]
        raw: bool,
    },
    /// Show loaded and core modules
    Modules,
    /// Validate the configuration and bootstrap the application
    Check,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(ConfigError::Validation(errors)) => {
            eprintln!("Error: {} is invalid", cli.config.display());
            for error in errors {
                eprintln!("  - {}", error);
            }
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let app = Bootstrap::new(config)
        .with_factories(builtin_factories())
        .build()?;

    let output = match cli.command {
        Commands::Routes => routes(&app),
        Commands::Match { path, method } => match_path(&app, &method, &path),
        Commands::Url {
            controller,
            vars,
            index,
            query,
            raw,
        } => url(&app, &controller, &vars, index, &query, raw),
        Commands::Modules => modules(&app),
        Commands::Check => json!({
            "status": "ok",
            "modules": app.modules().loaded_module_names(),
            "routes": app.map().table().len(),
        }),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn routes(app: &Application) -> Value {
    app.map()
        .table()
        .iter()
        .map(|(template, options)| json!({ "template": template, "options": options }))
        .collect()
}

fn match_path(app: &Application, method: &str, path: &str) -> Value {
    let route = app.dispatcher().router().match_path(path, Some(method));
    let outcome = app.dispatcher().dispatch(method, path);
    json!({
        "route": route,
        "status": outcome.status(),
        "body": outcome.body(),
    })
}

fn url(
    app: &Application,
    controller: &str,
    vars: &[String],
    index: usize,
    query: &[String],
    raw: bool,
) -> Value {
    let url = if query.is_empty() {
        app.urls().create_url(controller, vars, index)
    } else {
        let params: Vec<(&str, &str)> = query
            .iter()
            .map(|pair| pair.split_once('=').unwrap_or((pair.as_str(), "")))
            .collect();
        let encoding = if raw {
            QueryEncoding::Raw
        } else {
            QueryEncoding::Encoded
        };
        app.urls()
            .create_query_url(controller, &params, index, encoding)
    };
    json!({ "controller": controller, "url": url })
}

fn modules(app: &Application) -> Value {
    let core = app.modules().core_bag();
    json!({
        "loaded": app.modules().loaded_module_names(),
        "core": core.core_modules(),
        "missing_core": core.missing_core_modules(),
    })
}
