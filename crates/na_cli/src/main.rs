use std::net::SocketAddr;
use std::sync::Arc;

use chrono::Local;
use clap::{ArgAction, Parser, Subcommand};
use na_core::{CompletionModel, Error, Result};
use na_inference::{
    create_model, Analyzer, ARTICLE_MAX_CHARS, DEFAULT_BASE_URL, DEFAULT_MODEL, PAGE_MAX_CHARS,
};
use na_scrapers::WebScraper;
use na_storage::{create_store, StoreConfig, DEFAULT_COLLECTION, DEFAULT_DATABASE};
use na_web::{create_article_app, create_page_app, serve, ArticleState, PageState};
use tracing::info;

mod logging;

#[derive(Parser, Debug)]
#[command(author, version, about = "News article analysis service", long_about = None)]
pub struct Cli {
    /// Credential for the completion API
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// Document store connection string (mongodb://, sqlite:, memory://)
    #[arg(long, env = "MONGODB_URI", hide_env_values = true)]
    store_uri: Option<String>,
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_MODEL)]
    model_name: String,
    #[arg(long, default_value = "openai", help = "Completion provider. Available: openai (default), dummy")]
    model: String,
    #[arg(long, env = "NA_DATABASE", default_value = DEFAULT_DATABASE)]
    database: String,
    #[arg(long, env = "NA_COLLECTION", default_value = DEFAULT_COLLECTION)]
    collection: String,
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start one of the HTTP services
    Serve {
        #[command(subcommand)]
        service: Service,
    },
    /// Analyze today's articles once and exit
    Daily {
        #[arg(long, default_value_t = ARTICLE_MAX_CHARS)]
        max_chars: usize,
    },
}

#[derive(Subcommand, Debug)]
enum Service {
    /// Store-backed analysis: /generate_gpt_result, /generate_daily_gpt_results
    Articles {
        #[arg(long, default_value = "0.0.0.0:8000")]
        bind: SocketAddr,
        #[arg(long, default_value_t = ARTICLE_MAX_CHARS)]
        max_chars: usize,
    },
    /// URL-backed analysis: /analyze, /generate_news_content
    Pages {
        #[arg(long, default_value = "0.0.0.0:8000")]
        bind: SocketAddr,
        #[arg(long, default_value_t = PAGE_MAX_CHARS)]
        max_chars: usize,
    },
}

struct Settings {
    inference: na_inference::Config,
    store: StoreConfig,
}

fn required(value: Option<String>, name: &str) -> Result<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| Error::Config(format!("{} is not set", name)))
}

impl Cli {
    /// Both settings are required whichever service runs.
    fn settings(&self) -> Result<Settings> {
        let api_key = required(self.api_key.clone(), "OPENAI_API_KEY")?;
        let store_uri = required(self.store_uri.clone(), "MONGODB_URI")?;

        Ok(Settings {
            inference: na_inference::Config {
                api_key,
                model_name: self.model_name.clone(),
                base_url: self.base_url.clone(),
            },
            store: StoreConfig {
                uri: store_uri,
                database: self.database.clone(),
                collection: self.collection.clone(),
            },
        })
    }
}

async fn article_state(settings: &Settings, model: Arc<dyn CompletionModel>, max_chars: usize) -> Result<ArticleState> {
    let store = create_store(&settings.store).await?;
    Ok(ArticleState {
        store,
        analyzer: Analyzer::new(model, max_chars),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let settings = cli.settings()?;
    let model = create_model(&cli.model, settings.inference.clone())?;
    info!("🧠 Completion model initialized (using {} via {})", model.name(), cli.model);

    match cli.command {
        Commands::Serve { service } => match service {
            Service::Articles { bind, max_chars } => {
                let state = article_state(&settings, model, max_chars).await?;
                info!("📰 Article service, {} chars per prompt", max_chars);
                serve(create_article_app(state), bind).await?;
            }
            Service::Pages { bind, max_chars } => {
                let state = PageState {
                    scraper: Arc::new(WebScraper::new()?),
                    analyzer: Analyzer::new(model, max_chars),
                };
                info!("🔗 Page service, {} chars per prompt", max_chars);
                serve(create_page_app(state), bind).await?;
            }
        },
        Commands::Daily { max_chars } => {
            let state = article_state(&settings, model, max_chars).await?;
            let today = Local::now().date_naive();
            let processed = state.process_daily(today).await?;
            if processed.is_empty() {
                info!("No articles for today ({})", today);
            }
            for id in processed {
                println!("{}", id);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["na", "--api-key", "k", "--store-uri", "memory://", "serve", "pages"]);
        assert_eq!(cli.model, "openai");
        assert_eq!(cli.database, DEFAULT_DATABASE);
        match cli.command {
            Commands::Serve { service: Service::Pages { max_chars, bind } } => {
                assert_eq!(max_chars, PAGE_MAX_CHARS);
                assert_eq!(bind.port(), 8000);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_article_service_limit() {
        let cli = parse(&["na", "--api-key", "k", "--store-uri", "memory://", "serve", "articles"]);
        assert!(matches!(
            cli.command,
            Commands::Serve { service: Service::Articles { max_chars: ARTICLE_MAX_CHARS, .. } }
        ));
    }

    #[test]
    fn test_missing_settings_are_config_errors() {
        let cli = Cli {
            api_key: Some("k".to_string()),
            store_uri: None,
            ..parse(&["na", "daily"])
        };
        assert!(matches!(cli.settings(), Err(Error::Config(message)) if message.contains("MONGODB_URI")));

        let cli = Cli {
            api_key: Some("   ".to_string()),
            store_uri: Some("memory://".to_string()),
            ..parse(&["na", "daily"])
        };
        assert!(matches!(cli.settings(), Err(Error::Config(message)) if message.contains("OPENAI_API_KEY")));
    }
}
