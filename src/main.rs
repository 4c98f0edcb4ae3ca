use std::{sync::Arc, time::Duration};

use clap::{Parser, Subcommand};
use egui::Vec2;
use log::{error, warn};

use pitwall::{
    AppConfig, F1Api, HttpF1Api, PitwallError, Profile, SeasonBrowser, Season,
    ui::{season_list::SeasonListApp, text::render_season_list},
};

const LIST_TIMEOUT_S: u64 = 60;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    /// Deployment profile to read API settings from
    #[arg(short, long, value_enum, global = true)]
    profile: Option<Profile>,

    /// Overrides the API base URL of the selected profile
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the season browser window
    Gui,
    /// Print the season list to the terminal
    List {
        /// Season to show race winners for, can be repeated
        #[arg(short, long)]
        expand: Vec<Season>,
    },
}

fn build_api(app_config: &AppConfig, args: &Args) -> Result<Arc<dyn F1Api>, PitwallError> {
    let mut api_config = app_config.api_for(args.profile.unwrap_or(app_config.active_profile))?;
    if let Some(api_url) = &args.api_url {
        api_config.api_base_url = api_url.clone();
    }
    Ok(Arc::new(HttpF1Api::new(api_config)?))
}

fn gui(api: Arc<dyn F1Api>, app_config: AppConfig) -> Result<(), PitwallError> {
    let mut native_options = eframe::NativeOptions::default();
    native_options.viewport = native_options
        .viewport
        .with_title(pitwall::messages::APP_TITLE)
        .with_inner_size(Vec2::new(app_config.window_width, app_config.window_height))
        .with_position(app_config.window_position.clone());

    window_result(eframe::run_native(
        "Pitwall",
        native_options,
        Box::new(|cc| Ok(Box::new(SeasonListApp::new(api, app_config, cc)?))),
    ))
}

fn window_result(result: eframe::Result) -> Result<(), PitwallError> {
    result.map_err(|e| PitwallError::GuiError {
        message: e.to_string(),
    })
}

fn list(api: Arc<dyn F1Api>, expand: &[Season]) -> Result<(), PitwallError> {
    let timeout = Duration::from_secs(LIST_TIMEOUT_S);
    let mut browser = SeasonBrowser::new(api)?;
    browser.mount();
    if !browser.wait_idle(timeout) {
        warn!("Timed out waiting for champions");
    }

    for season in expand {
        if !browser.is_expanded(*season) {
            browser.toggle_race_list(*season);
        }
    }
    if !browser.wait_idle(timeout) {
        warn!("Timed out waiting for race results");
    }

    print!("{}", render_season_list(&browser));
    Ok(())
}

fn main() {
    colog::init();

    let cli = Args::parse();
    ctrlc::set_handler(move || {
        println!("Exiting...");
        std::process::exit(0);
    })
    .expect("Could not set Ctrl-C handler");

    let app_config = AppConfig::from_local_file().unwrap_or_default();
    let result = build_api(&app_config, &cli).and_then(|api| match &cli.command {
        Commands::Gui => gui(api, app_config),
        Commands::List { expand } => list(api, expand),
    });

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}
