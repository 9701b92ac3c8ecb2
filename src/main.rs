use clap::{Parser, Subcommand};
use rtryon::service::compress::DEFAULT_QUALITY;
use rtryon::service::data_url::{encode_data_url, parse_data_url};
use rtryon::{compress_image, ChangeClothesRequest, ChangeClothesService, Config};
use std::fs;
use std::path::PathBuf;

/// Seedream try-on proxy and change-clothes client
#[derive(Debug, Parser)]
#[command(name = "rtryon", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand, PartialEq)]
enum Command {
    /// Run the key-injecting Seedream proxy (default)
    Serve,
    /// Dress <person> in <clothes> via the configured proxy
    Change {
        person: PathBuf,
        clothes: PathBuf,
        /// Style selector, e.g. "original" or "sketch"
        #[arg(default_value = "original")]
        style: String,
        /// Recompress both inputs as JPEG before upload
        #[arg(long)]
        compress: bool,
    },
}

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let env_loaded = dotenv::dotenv().is_ok();

    rtryon::logger::init_with_config(rtryon::logger::config_from_env(
        rtryon::logger::LoggerConfig::development(),
    ))?;

    if env_loaded {
        log::info!("✅ .env file loaded successfully");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }

    let config = Config::from_env();
    rtryon::logger::log_config_info(&config);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            if let Err(e) = rtryon::server::run(config).await {
                log::error!("❌ Proxy stopped: {}", e);
                return Err(e.into());
            }
            Ok(())
        }
        Command::Change {
            person,
            clothes,
            style,
            compress,
        } => change_clothes(config, person, clothes, &style, compress).await,
    }
}

async fn change_clothes(
    config: Config,
    person: PathBuf,
    clothes: PathBuf,
    style: &str,
    compress: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut person_image = encode_data_url(&fs::read(&person)?)?;
    let mut clothes_image = encode_data_url(&fs::read(&clothes)?)?;

    if compress {
        log::info!("🗜️  Recompressing inputs at quality {}", DEFAULT_QUALITY);
        person_image = compress_image(&person_image, DEFAULT_QUALITY).await?;
        clothes_image = compress_image(&clothes_image, DEFAULT_QUALITY).await?;
    }

    let service = ChangeClothesService::from_config(config.generation)?;
    log::info!("🎨 Changing clothes (style: {}) via {}", style, service.generator().endpoint());

    let request = ChangeClothesRequest::new(person_image, clothes_image).with_style(style);
    let response = service.change_clothes(request).await;

    match (response.success, response.result_image) {
        (true, Some(result_image)) => {
            let image = parse_data_url(&result_image)?;
            let filename = format!("change_clothes_{}.png", chrono::Utc::now().timestamp());
            fs::write(&filename, image.bytes)?;
            log::info!("💾 Result saved to: {}", filename);
            Ok(())
        }
        _ => {
            let message = response
                .error
                .unwrap_or_else(|| "unknown error".to_string());
            log::error!("❌ Change clothes failed: {}", message);
            Err(message.into())
        }
    }
}
