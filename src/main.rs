use std::path::{Path, PathBuf};

use anyhow::{Context as _, bail};
use path2d::{RecordingSurface, Replayer, document};

#[cfg(feature = "cairo")]
mod cairo_surface;
mod settings;

use settings::{Color, Settings};

const USAGE: &str = "usage: path-player [--config FILE] trace INPUT.svg
       path-player [--config FILE] render INPUT.svg OUTPUT.png";

#[derive(Debug, PartialEq)]
enum Command {
    Trace(PathBuf),
    Render(PathBuf, PathBuf),
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<(Option<PathBuf>, Command)> {
    let mut config = None;
    let mut rest = Vec::new();

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
	if arg == "--config" {
	    let file = args.next().context("--config needs a file")?;
	    config = Some(PathBuf::from(file));
	} else {
	    rest.push(arg);
	}
    }

    let command = match rest.as_slice() {
	[cmd, input] if cmd == "trace" => Command::Trace(input.into()),
	[cmd, input, output] if cmd == "render" => Command::Render(input.into(), output.into()),
	_ => bail!("{}", USAGE),
    };

    Ok((config, command))
}

fn trace(input: &Path, settings: &Settings) -> anyhow::Result<()> {
    let paths = document::open_paths(input)?;
    let replayer = Replayer::new(settings.replay);

    for (i, path) in paths.iter().enumerate() {
	let mut surface = RecordingSurface::new();
	replayer.fill(&mut surface, Some(path), settings.fill_rule)
	    .with_context(|| format!("path {}", i))?;
	if settings.stroke != Color::None {
	    replayer.stroke(&mut surface, None)?;
	}

	println!("path {}:", i);
	for call in surface.calls() {
	    println!("    {:?}", call);
	}
    }

    Ok(())
}

#[cfg(feature = "cairo")]
fn render(input: &Path, output: &Path, settings: &Settings) -> anyhow::Result<()> {
    use cairo_surface::CairoSurface;

    let paths = document::open_paths(input)?;
    let replayer = Replayer::new(settings.replay);

    let image = cairo::ImageSurface::create(cairo::Format::ARgb32, settings.width, settings.height)
	.map_err(|status| anyhow::anyhow!("cairo: {:?}", status))?;
    let cr = cairo::Context::new(&image);

    if settings.background.apply_to_context(&cr) {
	cr.paint();
    }

    let mut surface = CairoSurface::new(&cr, settings);
    for (i, path) in paths.iter().enumerate() {
	replayer.fill(&mut surface, Some(path), settings.fill_rule)
	    .with_context(|| format!("path {}", i))?;
	replayer.stroke(&mut surface, None)?;
    }

    let mut file = std::fs::File::create(output)
	.with_context(|| format!("failed to create {}", output.display()))?;
    image.write_to_png(&mut file)
	.map_err(|err| anyhow::anyhow!("failed to write {}: {:?}", output.display(), err))?;
    tracing::info!("rendered {} paths to {}", paths.len(), output.display());

    Ok(())
}

#[cfg(not(feature = "cairo"))]
fn render(_input: &Path, _output: &Path, _settings: &Settings) -> anyhow::Result<()> {
    bail!("rendering needs the `cairo` feature")
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
	.with_env_filter(
	    tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("path_player=info,path2d=info")),
	)
	.with_writer(std::io::stderr)
	.init();

    let (config, command) = parse_args(std::env::args().skip(1))?;
    let settings = Settings::load(config.as_deref())?;

    match command {
	Command::Trace(input) => trace(&input, &settings),
	Command::Render(input, output) => render(&input, &output, &settings),
    }
}
