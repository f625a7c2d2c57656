//! urlqr command-line entrypoint

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use urlqr::config::DEFAULT_URL;
use urlqr::output::{self, render_generated};
use urlqr::{AppConfig, Color, QrGenerator, logging};

#[derive(Parser, Debug)]
#[command(name = "urlqr", version, about = "Render a URL as a QR-code PNG")]
struct Cli {
    /// URL to encode
    #[arg(long, default_value = DEFAULT_URL)]
    url: String,

    /// Output file name, without extension (overrides QR_CODE_NAME)
    #[arg(long, value_name = "NAME")]
    name: Option<String>,

    /// Output directory relative to the working directory (overrides QR_CODE_DIR)
    #[arg(long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Color of dark modules, a name or #rrggbb (overrides FILL_COLOR)
    #[arg(long, value_name = "COLOR")]
    fill_color: Option<String>,

    /// Background color, a name or #rrggbb (overrides BACK_COLOR)
    #[arg(long, value_name = "COLOR")]
    back_color: Option<String>,

    /// Optional configuration file (toml/yaml). Defaults to urlqr.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Decode the written image and check it matches the URL
    #[arg(long)]
    verify: bool,

    /// Print the result as JSON instead of human-readable text
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("urlqr: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    // Held until exit so the file sink is flushed.
    let _log_guard = match logging::init(&config.logging) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("urlqr: {err}");
            return ExitCode::FAILURE;
        }
    };

    match config.source.as_deref() {
        Some(path) => tracing::info!("Using configuration file: {}", path.display()),
        None => tracing::debug!("No urlqr.toml / urlqr.yaml found, using defaults"),
    }

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn resolve_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;

    if let Some(ref dir) = cli.dir {
        config.output.directory = dir.clone();
    }
    if let Some(ref name) = cli.name {
        config.output.name = name.clone();
    }
    if let Some(ref fill) = cli.fill_color {
        config.render.fill_color = Color::parse(fill).context("--fill-color")?;
    }
    if let Some(ref back) = cli.back_color {
        config.render.back_color = Color::parse(back).context("--back-color")?;
    }

    Ok(config)
}

fn run(cli: &Cli, config: &AppConfig) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("reading working directory")?;
    let directory = cwd.join(&config.output.directory);

    // Already logged by create_directory.
    if output::create_directory(&directory).is_err() {
        return Err(anyhow::anyhow!(
            "cannot continue without output directory {}",
            directory.display()
        ));
    }

    let path = output::output_path(&cwd, &config.output.directory, &config.output.name);
    let generator = QrGenerator::new(&config.render).with_verify(cli.verify);

    // Invalid URLs and encoding failures are logged and leave the exit status at 0.
    if let Some(generated) = generator.try_generate(&cli.url, &path) {
        let rendered = render_generated(&generated);
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&rendered.json)?);
        } else {
            for line in &rendered.human {
                println!("{line}");
            }
        }
    }

    Ok(())
}
