// SPDX-License-Identifier: MPL-2.0
use magnify_glass::app::{self, Flags};
use magnify_glass::config::paths;
use magnify_glass::domain::lens::LensShape;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const USAGE: &str = "\
Usage: magnify-glass [OPTIONS] <IMAGE>

Options:
  --zoom <FACTOR>        Initial lens magnification
  --radius <PX>          Lens radius in pixels
  --shape <SHAPE>        Lens shape: circle or square
  --config-dir <DIR>     Directory holding settings.toml
  -h, --help             Print this help
";

fn parse_flags() -> Result<Flags, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{USAGE}");
        std::process::exit(0);
    }

    let config_dir: Option<String> = args.opt_value_from_str("--config-dir")?;
    paths::init_cli_override(config_dir);

    let zoom: Option<f32> = args.opt_value_from_str("--zoom")?;
    let radius: Option<f32> = args.opt_value_from_str("--radius")?;
    let shape: Option<LensShape> = args.opt_value_from_str("--shape")?;

    let file_path = args
        .finish()
        .into_iter()
        .next()
        .and_then(|s| s.into_string().ok());

    Ok(Flags {
        file_path,
        zoom,
        radius,
        shape,
    })
}

fn main() -> iced::Result {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let flags = match parse_flags() {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("error: {err}\n\n{USAGE}");
            std::process::exit(2);
        }
    };

    tracing::info!(file = ?flags.file_path, "starting magnify-glass");
    app::run(flags)
}
