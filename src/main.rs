//! waveedit - terminal waveform viewer and sample editor.
//!
//! Loads a WAV file into the editing engine, renders the visible waveform as
//! block glyphs with the selection and playhead marked, and applies trim or
//! normalize edits, writing the result as 16-bit PCM.

use clap::{CommandFactory, Parser, Subcommand, builder::PossibleValuesParser};
use clap_complete::{Generator, Shell, generate};
use std::error::Error;
use std::io;
use std::path::PathBuf;
use waveedit::config::Config;

mod cli;

#[derive(Parser)]
#[command(name = "waveedit")]
#[command(about = "Terminal waveform viewer with trim and normalize")]
#[command(version)]
struct Cli {
    /// Log at debug level regardless of the configured level
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init,
    /// Show or change the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Render a WAV file's waveform in the terminal
    Show {
        file: PathBuf,
        /// Columns to render (defaults to display_width)
        #[arg(short, long)]
        width: Option<usize>,
        /// Rows to render (defaults to display_height)
        #[arg(long)]
        height: Option<usize>,
        /// Zoom steps to apply; negative values zoom out
        #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
        zoom: i32,
        /// Scroll offset in pixels after zooming
        #[arg(short, long)]
        scroll: Option<i64>,
        /// Selection start sample
        #[arg(long, requires = "end")]
        start: Option<usize>,
        /// Selection end sample (exclusive)
        #[arg(long, requires = "start")]
        end: Option<usize>,
        /// Print the render frame as JSON
        #[arg(long)]
        json: bool,
    },
    /// Cut a sample range out of a WAV file
    Trim {
        file: PathBuf,
        /// First sample to remove
        #[arg(long)]
        start: usize,
        /// Sample after the last one to remove
        #[arg(long)]
        end: usize,
        /// Output path
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Scale a range (or the whole file) so its peak reaches full scale
    Normalize {
        file: PathBuf,
        #[arg(long, requires = "end")]
        start: Option<usize>,
        #[arg(long, requires = "start")]
        end: Option<usize>,
        /// Output path
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// View current configuration
    View,
    /// Set a configuration value
    Set {
        /// Configuration key
        #[arg(value_parser = PossibleValuesParser::new([
            "zoom_step",
            "click_threshold_px",
            "edge_grab_px",
            "autoscroll_margin_px",
            "parallel_scan_threshold",
            "display_width",
            "display_height",
            "log_level",
        ]))]
        key: String,
        /// Configuration value
        value: String,
    },
    /// Edit configuration file in your editor
    Edit,
}

fn print_completions<G: Generator>(generator: G, cmd: &mut clap::Command) {
    generate(
        generator,
        cmd,
        cmd.get_name().to_string(),
        &mut io::stdout(),
    );
}

fn init_logging(config: &Config, verbose: bool) -> Result<(), Box<dyn Error>> {
    use simplelog::*;
    use std::fs::File;

    let term_level = if verbose {
        LevelFilter::Debug
    } else {
        config.level_filter()
    };
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        term_level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    let log_file = std::env::temp_dir().join("waveedit.log");
    if let Ok(file) = File::create(&log_file) {
        loggers.push(WriteLogger::new(
            LevelFilter::Debug,
            simplelog::Config::default(),
            file,
        ));
    }
    CombinedLogger::init(loggers)?;

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // A broken config file should not stop `config edit` from fixing it
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) if matches!(cli.command, Commands::Config { .. } | Commands::Init) => {
            eprintln!("Ignoring unreadable configuration: {e}");
            Config::default()
        }
        Err(e) => return Err(e),
    };
    init_logging(&config, cli.verbose)?;

    match cli.command {
        Commands::Init => {
            cli::init::handle_init()?;
        }
        Commands::Config { action } => match action {
            ConfigAction::View => {
                cli::config::handle_config_view()?;
            }
            ConfigAction::Set { key, value } => {
                cli::config::handle_config_set(&key, &value)?;
            }
            ConfigAction::Edit => {
                cli::config::handle_config_edit()?;
            }
        },
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            print_completions(shell, &mut cmd);
        }
        Commands::Show {
            file,
            width,
            height,
            zoom,
            scroll,
            start,
            end,
            json,
        } => {
            let options = cli::show::ShowOptions {
                width: width.unwrap_or(config.display_width),
                height: height.unwrap_or(config.display_height),
                zoom,
                scroll,
                selection: start.zip(end),
                json,
            };
            cli::show::handle_show(&file, &options, &config)?;
        }
        Commands::Trim {
            file,
            start,
            end,
            output,
        } => {
            cli::edit::handle_trim(&file, start, end, &output, &config)?;
        }
        Commands::Normalize {
            file,
            start,
            end,
            output,
        } => {
            cli::edit::handle_normalize(&file, start.zip(end), &output, &config)?;
        }
    }

    Ok(())
}
