mod backend;
mod config;
mod services;
mod simulate;

use clap::{Args, Parser, Subcommand};
use mapview::prefs::{LightPreset, MapStyle, Preferences};
use mapview::screen::{MapScreen, SliderConfig};
use serde::Serialize;

use backend::auth::{GoTrueClient, IdentityProvider, SignUpOutcome};
use backend::profile::PostgrestProfiles;
use backend::{BackendError, BackendHttp};
use config::{BackendConfig, ConfigError, MapConfig};
use services::account::{self, AccountError};
use services::validate::{self, ValidationError};
use simulate::ScriptError;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("script error: {0}")]
    Script(#[from] ScriptError),
    #[error("invalid map configuration: {0}")]
    Configuration(#[from] mapview::ConfigurationError),
    #[error("invalid value for --{flag}: {value}")]
    InvalidFlag { flag: &'static str, value: String },
    #[error("json encode failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<AccountError> for CliError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Validation(e) => Self::Validation(e),
            AccountError::Backend(e) => Self::Backend(e),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "trailguide", about = "Trailguide account and map-screen CLI")]
struct Cli {
    /// Session access token from a previous `auth sign-in`.
    #[arg(long, env = "TRAILGUIDE_ACCESS_TOKEN", global = true)]
    access_token: Option<String>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Auth(AuthCommand),
    Profile(ProfileCommand),
    Map(MapCommand),
}

#[derive(Args, Debug)]
struct AuthCommand {
    #[command(subcommand)]
    command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
enum AuthSubcommand {
    SignIn {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    SignUp {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
    },
    SignOut,
    Whoami,
    ChangePassword {
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm: String,
    },
}

#[derive(Args, Debug)]
struct ProfileCommand {
    #[command(subcommand)]
    command: ProfileSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProfileSubcommand {
    Show,
    Update {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: Option<String>,
    },
    ApplyGuide,
}

#[derive(Args, Debug)]
struct MapCommand {
    #[command(subcommand)]
    command: MapSubcommand,
}

#[derive(Subcommand, Debug)]
enum MapSubcommand {
    /// Drive a headless map screen and print one JSON frame per step.
    Simulate {
        #[arg(long)]
        initial_pitch: Option<f64>,
        #[arg(long, default_value = "standard")]
        style: String,
        #[arg(long, default_value = "day")]
        light: String,
        #[arg(long, default_value_t = false, action = clap::ArgAction::Set)]
        three_d: bool,
        /// Comma-separated steps, e.g. `grant,move:-110,release,tap`.
        #[arg(long)]
        script: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).init();

    let result = match cli.command {
        Command::Auth(auth) => run_auth(cli.access_token.as_deref(), auth).await,
        Command::Profile(profile) => run_profile(cli.access_token.as_deref(), profile).await,
        Command::Map(map) => run_map(map),
    };
    if let Err(CliError::Backend(err)) = &result {
        tracing::error!(retryable = err.retryable(), "backend call failed");
    }
    result
}

// =============================================================================
// AUTH
// =============================================================================

async fn run_auth(access_token: Option<&str>, auth: AuthCommand) -> Result<(), CliError> {
    let http = BackendHttp::new(&BackendConfig::from_env()?)?;
    let identity = GoTrueClient::new(http);

    match auth.command {
        AuthSubcommand::SignIn { email, password } => {
            let email = validate::sign_in_form(&email, &password)?;
            let session = identity.sign_in_with_password(&email, &password).await?;
            print_json(&session)
        }
        AuthSubcommand::SignUp { email, password, first_name, last_name } => {
            let form = validate::sign_up_form(&email, &password, &first_name, &last_name)?;
            match account::sign_up(&identity, &form).await? {
                SignUpOutcome::SignedIn(session) => print_json(&session),
                SignUpOutcome::ConfirmationRequired(user) => {
                    eprintln!("check {} to confirm your account", user.email.as_deref().unwrap_or(&form.email));
                    print_json(&user)
                }
            }
        }
        AuthSubcommand::SignOut => {
            restore(&identity, access_token).await?;
            identity.sign_out().await?;
            eprintln!("signed out");
            Ok(())
        }
        AuthSubcommand::Whoami => {
            restore(&identity, access_token).await?;
            print_json(&identity.get_user().await?)
        }
        AuthSubcommand::ChangePassword { password, confirm } => {
            restore(&identity, access_token).await?;
            account::change_password(&identity, &password, &confirm).await?;
            eprintln!("password updated");
            Ok(())
        }
    }
}

async fn restore(identity: &GoTrueClient, access_token: Option<&str>) -> Result<String, CliError> {
    let token = access_token.ok_or(BackendError::NotSignedIn)?;
    let session = identity.restore_session(token).await?;
    Ok(session.access_token)
}

// =============================================================================
// PROFILE
// =============================================================================

async fn run_profile(access_token: Option<&str>, profile: ProfileCommand) -> Result<(), CliError> {
    let http = BackendHttp::new(&BackendConfig::from_env()?)?;
    let identity = GoTrueClient::new(http.clone());
    let token = restore(&identity, access_token).await?;
    let profiles = PostgrestProfiles::new(http, token);

    match profile.command {
        ProfileSubcommand::Show => print_json(&account::load_profile(&identity, &profiles).await?),
        ProfileSubcommand::Update { first_name, last_name, email } => {
            let update = account::update_profile(&identity, &profiles, &first_name, &last_name, email.as_deref()).await?;
            if update.email_confirmation_required {
                eprintln!("profile updated; check your new email to confirm the change");
            } else {
                eprintln!("profile updated");
            }
            print_json(&update.user)
        }
        ProfileSubcommand::ApplyGuide => {
            account::apply_as_guide(&identity, &profiles).await?;
            eprintln!("guide application submitted");
            Ok(())
        }
    }
}

// =============================================================================
// MAP
// =============================================================================

fn run_map(map: MapCommand) -> Result<(), CliError> {
    match map.command {
        MapSubcommand::Simulate { initial_pitch, style, light, three_d, script } => {
            let map_config = MapConfig::from_env()?;
            if map_config.access_token.is_none() {
                tracing::warn!("TRAILGUIDE_MAPBOX_TOKEN not set; a real renderer would refuse to load tiles");
            }

            let mut prefs = Preferences::new();
            prefs.change_map_style(MapStyle::parse(&style).ok_or(CliError::InvalidFlag { flag: "style", value: style })?);
            prefs.change_light_preset(LightPreset::parse(&light).ok_or(CliError::InvalidFlag { flag: "light", value: light })?);
            prefs.set_3d_enabled(three_d);

            let mut screen = MapScreen::new(SliderConfig {
                track_length: map_config.track_length_px,
                initial_pitch: initial_pitch.unwrap_or(map_config.initial_pitch),
                ..SliderConfig::default()
            })?;

            let steps = simulate::parse_script(&script)?;
            for frame in simulate::run(&mut screen, &mut prefs, &steps) {
                print_json(&frame)?;
            }
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
