mod app;
pub mod i18n;
mod ui;
mod viewport;

use clap::Parser;

use blueprint_viewer_lib::state::ViewerSettings;
use blueprint_viewer_lib::viewport::lighting::Environment;

use app::{BlueprintApp, Route};

/// Blueprint3D model viewer
#[derive(Parser, Debug)]
#[command(name = "blueprint-viewer", version, about)]
struct Args {
    /// Model URL or path to a glTF/GLB file
    #[arg(long, env = "BLUEPRINT_MODEL")]
    model: Option<String>,

    /// Show an empty viewer instead of the test objects when no model is given
    #[arg(long)]
    no_test_objects: bool,

    /// Environment backdrop
    #[arg(long, value_enum)]
    environment: Option<Environment>,

    /// Page to open on startup
    #[arg(long, value_enum, default_value = "landing")]
    route: Route,
}

impl Args {
    fn apply(&self, settings: &mut ViewerSettings) {
        if let Some(model) = &self.model {
            settings.viewer.model = Some(model.clone());
        }
        if self.no_test_objects {
            settings.viewer.show_test_objects = false;
        }
        if let Some(environment) = self.environment {
            settings.viewer.environment = environment;
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blueprint_viewer=info,blueprint_viewer_lib=info".into()),
        )
        .init();

    let args = Args::parse();
    let mut settings = ViewerSettings::load();
    args.apply(&mut settings);

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("model-loader")
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to start loader runtime: {e}");
            return;
        }
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Blueprint3D — 2D to 3D CAD")
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    let route = args.route;
    if let Err(e) = eframe::run_native(
        "blueprint-viewer",
        native_options,
        Box::new(move |cc| Ok(Box::new(BlueprintApp::new(cc, settings, route, runtime)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}
