// SPDX-License-Identifier: MIT OR Apache-2.0

mod config;
mod exit_code;
mod output;

use std::io;
use std::thread;
use std::time::Duration;

use clap::{Parser, Subcommand};
use is_terminal::IsTerminal as _;
use libpopi::{
    ColorMode, Error, Frame, MarkupTag, RULE, Registry, Verbosity, bar_from_config, expand,
    logger,
};
use serde::Serialize;

use crate::config::CliConfig;
use crate::exit_code::ExitCode;
use crate::output::{output_error, output_json, print_info};

/// argument that becomes a divider row in `popi frame`.
const DIVIDER_ARG: &str = "---";

/// upper bound for `--padding` and `--width`.
const MAX_COLUMNS: usize = 4096;

#[derive(Parser)]
#[command(name = "popi")]
#[command(about = "render terminal frames and progress bars with inline markup")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// when to use colors: auto, always or never
    #[arg(long, global = true)]
    color: Option<ColorMode>,

    /// enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// output results as json
    #[arg(long, global = true)]
    json: bool,

    /// open configuration file in editor
    #[arg(long)]
    edit_config: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// render a frame around the given lines (or stdin); `<hr>`, or `---` after `--`, adds a divider
    Frame {
        lines: Vec<String>,

        /// spaces between border and content
        #[arg(long)]
        padding: Option<usize>,

        /// content width; wider lines still widen the frame
        #[arg(long)]
        width: Option<usize>,

        /// markup applied to the border, e.g. "<yellow>"
        #[arg(long)]
        style: Option<String>,
    },
    /// run a progress bar from zero to the total
    Bar {
        /// preset name, see `popi presets`
        #[arg(long)]
        preset: Option<String>,

        #[arg(long, default_value_t = 25)]
        total: u64,

        /// number of cells
        #[arg(long)]
        length: Option<usize>,

        /// milliseconds between steps
        #[arg(long, default_value_t = 100)]
        delay_ms: u64,

        /// text before the bar; may contain markup
        #[arg(long, default_value = "")]
        prefix: String,
    },
    /// list the markup tags
    Tags,
    /// list the progress bar presets
    Presets,
    /// edit a frame and redraw it in place
    Demo {
        /// milliseconds between edits
        #[arg(long, default_value_t = 400)]
        delay_ms: u64,
    },
}

fn main() {
    let cli = Cli::parse();

    if cli.edit_config {
        if let Err(e) = CliConfig::edit_config() {
            output_error(cli.json, false, &e.to_string());
            std::process::exit(ExitCode::FatalError.as_i32());
        }
        return;
    }

    let mut config = match CliConfig::load() {
        Ok(c) => c,
        Err(e) => {
            output_error(cli.json, false, &format!("failed to load config: {e}"));
            std::process::exit(ExitCode::FatalError.as_i32());
        }
    };

    if let Some(color) = cli.color {
        config.inner.color = color;
    }
    if cli.verbose {
        config.inner.verbosity = Verbosity::Verbose;
    } else if cli.quiet {
        config.inner.verbosity = Verbosity::Quiet;
    }

    // a logger can only be installed once per process
    logger::init(config.verbosity.level_filter()).ok();
    log::debug!("**cli:** loaded config {:?}", config.inner);

    let registry = Registry::with_builtins();

    let result = match cli.command.as_ref().unwrap_or(&Commands::Tags) {
        Commands::Frame {
            lines,
            padding,
            width,
            style,
        } => cmd_frame(
            &cli,
            &config,
            lines,
            *padding,
            *width,
            style.as_deref(),
        ),
        Commands::Bar {
            preset,
            total,
            length,
            delay_ms,
            prefix,
        } => {
            let mut bar_config = config.inner.clone();
            if let Some(preset) = preset {
                bar_config.bar_preset = preset.clone();
            }
            if let Some(length) = length {
                bar_config.bar_length = *length;
            }
            cmd_bar(&cli, &registry, &bar_config, *total, *delay_ms, prefix)
        }
        Commands::Tags => cmd_tags(&cli, &config),
        Commands::Presets => cmd_presets(&cli, &config, &registry),
        Commands::Demo { delay_ms } => cmd_demo(&config, *delay_ms),
    };

    match result {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(e) => {
            output_error(cli.json, config.color.enabled_on_stderr(), &e.to_string());
            std::process::exit(ExitCode::FatalError.as_i32());
        }
    }
}

fn read_stdin_lines() -> Result<Vec<String>, Error> {
    if io::stdin().is_terminal() {
        return Ok(Vec::new());
    }

    let content = io::read_to_string(io::stdin())?;
    Ok(content.lines().map(str::to_string).collect())
}

fn check_columns(name: &str, value: usize) -> Result<usize, Error> {
    if value > MAX_COLUMNS {
        return Err(Error::invalid_value(format!(
            "{name} {value} is larger than {MAX_COLUMNS} columns"
        )));
    }
    Ok(value)
}

#[derive(Serialize)]
struct FrameJson {
    rows: Vec<String>,
    width: usize,
    lines: usize,
}

fn cmd_frame(
    cli: &Cli,
    config: &CliConfig,
    lines: &[String],
    padding: Option<usize>,
    width: Option<usize>,
    style: Option<&str>,
) -> Result<ExitCode, Error> {
    let lines = if lines.is_empty() {
        read_stdin_lines()?
    } else {
        lines.to_vec()
    };

    if lines.is_empty() {
        return Err(Error::invalid_value("no lines given and stdin is empty"));
    }

    let lines = lines.into_iter().map(|line| {
        if line == DIVIDER_ARG {
            RULE.to_string()
        } else {
            line
        }
    });

    let padding = check_columns("padding", padding.unwrap_or(config.padding))?;
    let width = width.map(|w| check_columns("width", w)).transpose()?;

    let mut frame = Frame::from_lines(lines)
        .with_padding(padding)
        .with_style(style.unwrap_or(&config.frame_style))
        .with_color(config.color);
    if let Some(width) = width {
        frame = frame.with_width(width);
    }

    if cli.json {
        return output_json(FrameJson {
            rows: frame.render_with(false),
            width: frame.width(),
            lines: frame.len(),
        });
    }

    println!("{frame}");
    Ok(ExitCode::Success)
}

#[derive(Serialize)]
struct BarJson {
    preset: String,
    total: u64,
    length: usize,
    rendered: String,
}

fn cmd_bar(
    cli: &Cli,
    registry: &Registry,
    config: &libpopi::Config,
    total: u64,
    delay_ms: u64,
    prefix: &str,
) -> Result<ExitCode, Error> {
    let mut bar = bar_from_config(registry, config, total)?.with_prefix(prefix);

    if cli.json {
        bar.set(i64::MAX);
        return output_json(BarJson {
            preset: config.bar_preset.clone(),
            total: bar.total(),
            length: bar.length(),
            rendered: bar.render_with(false),
        });
    }

    let delay = Duration::from_millis(delay_ms);
    while !bar.is_complete() {
        bar.render_in_place()?;
        bar.add(1);
        thread::sleep(delay);
    }
    bar.finish()?;

    Ok(ExitCode::Success)
}

#[derive(Serialize)]
struct TagJson {
    token: &'static str,
    escape: &'static str,
}

fn cmd_tags(cli: &Cli, config: &CliConfig) -> Result<ExitCode, Error> {
    let tags = MarkupTag::all().iter().filter(|t| !t.token.is_empty());

    if cli.json {
        let data: Vec<TagJson> = tags
            .map(|t| TagJson {
                token: t.token,
                escape: t.escape,
            })
            .collect();
        return output_json(data);
    }

    let color = config.color.enabled();
    for tag in tags {
        let sample = if tag.is_style() {
            expand(&format!("{}sample text<reset>", tag.token), color)
        } else {
            "(divider row in frames)".to_string()
        };
        println!("{:<20} {sample}", tag.token);
    }

    Ok(ExitCode::Success)
}

#[derive(Serialize)]
struct PresetJson {
    name: String,
    sample: String,
}

fn cmd_presets(cli: &Cli, config: &CliConfig, registry: &Registry) -> Result<ExitCode, Error> {
    let mut presets = Vec::with_capacity(registry.len());
    for name in registry.names() {
        let mut bar = registry
            .build(name, 10, config.bar_length)?
            .with_precision(config.precision)
            .with_color(config.color);
        bar.set(5);
        presets.push((name.to_string(), bar));
    }

    if cli.json {
        let data: Vec<PresetJson> = presets
            .into_iter()
            .map(|(name, bar)| PresetJson {
                name,
                sample: bar.render_with(false),
            })
            .collect();
        return output_json(data);
    }

    let name_width = presets.iter().map(|(n, _)| n.len()).max().unwrap_or(10);
    for (name, bar) in &presets {
        println!("{name:<name_width$}  {bar}");
    }

    Ok(ExitCode::Success)
}

fn cmd_demo(config: &CliConfig, delay_ms: u64) -> Result<ExitCode, Error> {
    const TASKS: [&str; 3] = ["fetch index", "resolve", "install"];

    let delay = Duration::from_millis(delay_ms);
    let mut frame = config.frame("<b>popi demo<reset>");
    frame.append_divider();
    for task in TASKS {
        frame.append_line(&format!("<yellow>…<reset> {task}"));
    }

    let drawn = {
        let mut session = frame.display()?;

        for (i, task) in TASKS.iter().enumerate() {
            thread::sleep(delay);
            session.replace_line(i + 2, &format!("<green>✓<reset> {task}"))?;
            session.refresh()?;
        }

        thread::sleep(delay);
        session.append_divider().append_line("<b>all tasks finished<reset>");
        session.refresh()?.is_drawn()
    };

    if drawn {
        return Ok(ExitCode::Success);
    }

    // not a terminal: show the final state once
    println!("{frame}");
    print_info(
        config.verbosity,
        false,
        "stdout is not an ansi terminal, in-place redraw was skipped",
    );
    Ok(ExitCode::PartialFailure)
}
