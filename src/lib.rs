// Module declarations in dependency order
pub mod utils;
pub mod config;
pub mod core;
pub mod generation;
pub mod commands;

// Public exports for external consumers
pub use config::Config;
pub use core::{AppState, DepthSettings, ImageAsset, LightSettings, Session, SessionSnapshot};
pub use generation::{GeminiClient, GenerationRequest, ImageGenerator};
pub use utils::{EditorError, EditorResult};

use anyhow::Context;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

// Import the window-vibrancy crate only on macOS
#[cfg(target_os = "macos")]
use window_vibrancy::{apply_vibrancy, NSVisualEffectMaterial};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,depth_light_fx=debug,depth_light_fx_lib=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)         // Remove file path
        .with_line_number(false)  // Remove line numbers
        .with_thread_ids(false)   // Remove thread IDs
        .with_thread_names(false) // Remove thread names
        .with_target(false)       // Remove module path
        .with_ansi(true)          // Keep colored output
        .with_writer(std::io::stdout)
        .compact()                // Use compact formatter instead of pretty
        .init();
}

/// Builds and runs the application. Returns an error before any window opens
/// when the configuration is unusable.
pub fn run() -> anyhow::Result<()> {
    init_tracing();
    info!("=== Application Starting ===");

    let config = Config::from_env().context("failed to load configuration")?;
    debug!("Loaded {:?}", config);

    let client = GeminiClient::new(&config).context("failed to build image service client")?;
    info!("Using image model {}", client.model());

    let app = tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .manage(AppState::new(client))
        .invoke_handler(tauri::generate_handler![
            commands::get_session,
            commands::upload_image,
            commands::open_image,
            commands::set_depth_settings,
            commands::set_light_settings,
            commands::request_depth,
            commands::request_light,
            commands::reset_session,
        ])
        .setup(|_app| {
            debug!("✓ AppState initialized");

            #[cfg(target_os = "macos")]
            {
                use tauri::Manager;
                if let Some(window) = _app.get_webview_window("main") {
                    info!("Applying vibrancy effect for macOS");
                    // Note: This requires macOSPrivateApi=true in tauri.conf.json
                    apply_vibrancy(&window, NSVisualEffectMaterial::HudWindow, None, None)?;
                }
            }

            Ok(())
        })
        .build(tauri::generate_context!())
        .context("error while building tauri application")?;

    info!("Starting application event loop...");
    app.run(|_app_handle, event| {
        if let tauri::RunEvent::Exit = event {
            info!("Application exiting");
        }
    });

    Ok(())
}
