use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use dove::cli::{BuildOptions, Session};
use dove::config::ConfigStore;
use dove::process::{engine::DEFAULT_ENGINE, Engine, SystemRunner};
use dove::{ui, DoveError};

#[derive(Parser)]
#[command(
    name = "dove",
    version,
    about = "Manage incrementing version tags for container images through a JSON file"
)]
struct Args {
    #[arg(
        short = 'c',
        long,
        global = true,
        help = "Path to the json configuration file (default: ./dove.json)"
    )]
    cfgpath: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        default_value = DEFAULT_ENGINE,
        help = "Container tool to invoke"
    )]
    engine: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new dove config
    New {
        #[arg(short, long, help = "Image name template, e.g. myapp:{0}.{1}.{2}")]
        template: String,

        #[arg(short, long, help = "The initial version to start from")]
        initial: String,
    },

    /// Build the image with the saved tag
    Build {
        #[arg(short, long = "position", help = "Version position(s) to bump")]
        positions: Vec<usize>,

        #[arg(
            short,
            long = "args",
            allow_hyphen_values = true,
            help = "Build arguments (except --tag, -t)"
        )]
        args: Vec<String>,

        #[arg(long, default_value = "./", help = "Build context directory")]
        context: String,

        #[arg(long, help = "Alternate format to tag with")]
        alt: Option<String>,
    },

    /// Tag another image with the saved tag
    Tag {
        #[arg(short, long, help = "Tag or id of the source image")]
        srcimg: String,

        #[arg(short, long = "position", help = "Version position(s) to bump")]
        positions: Vec<usize>,

        #[arg(long, help = "Alternate format to tag with")]
        alt: Option<String>,
    },

    /// Push the image with the tag saved in the config
    Push {
        #[arg(
            short,
            long = "args",
            allow_hyphen_values = true,
            help = "Push arguments"
        )]
        args: Vec<String>,

        #[arg(long, help = "Alternate format to push")]
        alt: Option<String>,
    },

    /// Save the image with the tag from the config to a file
    Save {
        #[arg(short, long, help = "Path to file where to save the image")]
        filepath: String,

        #[arg(long, help = "Alternate format to save")]
        alt: Option<String>,
    },

    /// Get the current tag from the config
    Get {
        #[arg(
            short = 'v',
            long = "version",
            conflicts_with = "alt",
            help = "Just get the version"
        )]
        version_only: bool,

        #[arg(long, help = "Alternate format to render")]
        alt: Option<String>,
    },

    /// Just bump up the current version
    Bump {
        #[arg(short, long = "position", required = true, help = "Version position(s) to bump")]
        positions: Vec<usize>,

        #[arg(long, help = "Alternate format to print")]
        alt: Option<String>,
    },

    /// Reset the version at position(s) to 0
    Reset {
        #[arg(short, long = "position", required = true, help = "Version position(s) to reset")]
        positions: Vec<usize>,

        #[arg(long, help = "Alternate format to print")]
        alt: Option<String>,
    },

    /// List the alternate formats
    Alts,

    /// Add or replace an alternate format
    AddAlt {
        #[arg(short, long, help = "Name of the alternate format")]
        name: String,

        #[arg(short, long, help = "Image name template for the alternate")]
        format: String,
    },

    /// Remove an alternate format
    RemoveAlt {
        #[arg(short, long, help = "Name of the alternate format")]
        name: String,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::New { .. } => "new",
            Commands::Build { .. } => "build",
            Commands::Tag { .. } => "tag",
            Commands::Push { .. } => "push",
            Commands::Save { .. } => "save",
            Commands::Get { .. } => "get",
            Commands::Bump { .. } => "bump",
            Commands::Reset { .. } => "reset",
            Commands::Alts => "alts",
            Commands::AddAlt { .. } => "add-alt",
            Commands::RemoveAlt { .. } => "remove-alt",
        }
    }
}

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("DOVE_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            let code = e
                .downcast_ref::<DoveError>()
                .map(DoveError::exit_code)
                .unwrap_or(1);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run(args: Args) -> Result<()> {
    let working_dir = std::env::current_dir().context("Cannot determine working directory")?;
    let store = ConfigStore::locate(&working_dir, args.cfgpath.as_deref());
    let session = Session::new(store, Engine::new(args.engine), SystemRunner, &working_dir);

    let name = args.command.name();
    execute(&session, args.command).with_context(|| format!("dove {} failed", name))
}

fn execute(session: &Session<SystemRunner>, command: Commands) -> dove::Result<()> {
    match command {
        Commands::New { template, initial } => {
            let config = session.init(&template, &initial)?;
            ui::display_config(&config.to_json()?);
        }
        Commands::Build {
            positions,
            args,
            context,
            alt,
        } => {
            let tag = session.build(&BuildOptions {
                positions,
                args,
                alternate: alt,
                context,
            })?;
            ui::display_success(&format!("Built image: [{}]", tag));
        }
        Commands::Tag {
            srcimg,
            positions,
            alt,
        } => {
            let tag = session.tag(&srcimg, &positions, alt.as_deref())?;
            ui::display_success(&format!("Tagged {} as [{}]", srcimg, tag));
        }
        Commands::Push { args, alt } => {
            session.push(&args, alt.as_deref())?;
        }
        Commands::Save { filepath, alt } => {
            session.save(&filepath, alt.as_deref())?;
        }
        Commands::Get { version_only, alt } => {
            ui::display_value(&session.get(alt.as_deref(), version_only)?);
        }
        Commands::Bump { positions, alt } => {
            ui::display_value(&session.bump(&positions, alt.as_deref())?);
        }
        Commands::Reset { positions, alt } => {
            ui::display_value(&session.reset(&positions, alt.as_deref())?);
        }
        Commands::Alts => {
            ui::display_alternates(&session.alternates()?);
        }
        Commands::AddAlt { name, format } => {
            match session.add_alternate(&name, &format)? {
                Some(previous) => ui::display_success(&format!(
                    "Replaced alternate '{}' ({} -> {})",
                    name, previous, format
                )),
                None => ui::display_success(&format!("Added alternate '{}': {}", name, format)),
            }
        }
        Commands::RemoveAlt { name } => {
            let removed = session.remove_alternate(&name)?;
            ui::display_success(&format!("Removed alternate '{}' ({})", name, removed));
        }
    }
    Ok(())
}
