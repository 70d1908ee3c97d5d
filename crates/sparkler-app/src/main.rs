use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use sparkler_core::EngineConfig;

mod driver;
mod renderer;
mod script;

use crate::driver::run_headless;
use crate::renderer::LogRenderer;
use crate::script::ScriptedInput;

fn main() {
    // Init logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    info!("Sparkler starting");
    let config = match std::env::args().nth(1) {
        Some(path) => match EngineConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Sparkler config error: {e}");
                std::process::exit(2);
            }
        },
        None => EngineConfig::default(),
    };

    let mut input = ScriptedInput::demo();
    let mut renderer = LogRenderer::new(60);
    if let Err(e) = run_headless(&config, &mut input, &mut renderer) {
        eprintln!("Sparkler error: {e}");
    }
}
