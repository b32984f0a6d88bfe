use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "postergrid", version, about = "Compose image collections into labelled grid posters")]
struct Cli {
    /// Log per-cell progress.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a poster from region sub-directories of a root folder.
    Build(BuildArgs),
    /// List font faces the resolver can see.
    Fonts(FontsArgs),
}

#[derive(Args, Debug)]
struct BuildArgs {
    /// Folder holding one sub-directory per region.
    #[arg(long)]
    root: PathBuf,

    /// Region sub-directory to include (repeatable). All sub-directories when omitted.
    #[arg(long = "region")]
    regions: Vec<String>,

    /// Source image extension.
    #[arg(long, default_value = "png")]
    ext: String,

    /// Columns per row.
    #[arg(long)]
    per_row: Option<u32>,

    /// Output image path; `.jpg`/`.jpeg` is written as JPEG.
    #[arg(long)]
    out: PathBuf,

    /// JSON poster configuration; command-line flags override it.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    no_labels: bool,

    /// Label font family or font file path.
    #[arg(long)]
    font_family: Option<String>,

    #[arg(long)]
    font_size: Option<f32>,

    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    footer: Option<String>,

    #[arg(long)]
    spacing_x: Option<u32>,

    #[arg(long)]
    spacing_y: Option<u32>,

    /// Normalize scans to 705x1000 and trim the scanner border.
    #[arg(long)]
    passport: bool,

    /// Render cells on a thread pool.
    #[arg(long)]
    parallel: bool,

    #[arg(long)]
    threads: Option<usize>,

    /// Extra directory of font files (repeatable).
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,

    /// JPEG quality (1-100).
    #[arg(long, default_value_t = postergrid::DEFAULT_JPEG_QUALITY)]
    quality: u8,
}

#[derive(Args, Debug)]
struct FontsArgs {
    /// Case-insensitive substring of the family or PostScript name.
    #[arg(long)]
    filter: Option<String>,

    /// Extra directory of font files (repeatable).
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    match cli.cmd {
        Command::Build(args) => cmd_build(args),
        Command::Fonts(args) => cmd_fonts(args),
    }
}

fn init_tracing(verbose: bool, quiet: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else if quiet {
        tracing::Level::WARN
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &BuildArgs) -> anyhow::Result<postergrid::PosterConfig> {
    let mut config = match &args.config {
        Some(path) => postergrid::PosterConfig::from_json_file(path)?,
        None => postergrid::PosterConfig::default(),
    };

    if let Some(n) = args.per_row {
        config.grid.images_per_row = n;
    }
    if let Some(v) = args.spacing_x {
        config.grid.spacing_x = v;
    }
    if let Some(v) = args.spacing_y {
        config.grid.spacing_y = v;
    }
    if args.no_labels {
        config.labels.enabled = false;
    }
    if let Some(family) = &args.font_family {
        config.labels.font_family = family.clone();
    }
    if let Some(size) = args.font_size {
        config.labels.font_size = size;
    }
    if let Some(text) = &args.title {
        config.title.get_or_insert_with(Default::default).text = text.clone();
    }
    if let Some(text) = &args.footer {
        config.footer.get_or_insert_with(Default::default).text = text.clone();
    }
    if args.passport {
        config.preprocess = postergrid::Preprocess::passport_cover();
    }
    if args.parallel {
        config.parallel = true;
    }
    if args.threads.is_some() {
        config.threads = args.threads;
    }

    config.validate()?;
    Ok(config)
}

fn cmd_build(args: BuildArgs) -> anyhow::Result<()> {
    let config = load_config(&args)?;

    let catalog = postergrid::RegionCatalog::scan(&args.root, &args.regions, &args.ext)
        .with_context(|| format!("scan '{}'", args.root.display()))?;
    for (region, paths) in catalog.regions() {
        tracing::info!(region, images = paths.len(), "region scanned");
    }
    let paths = catalog.all_paths();
    if paths.is_empty() {
        anyhow::bail!(
            "no '.{}' images found under '{}'",
            args.ext,
            args.root.display()
        );
    }

    let fonts = postergrid::FontResolver::new(&args.font_dirs);
    let poster = postergrid::build_poster(&paths, &config, &fonts)?;
    postergrid::save_poster(&poster, &args.out, args.quality)?;

    eprintln!(
        "wrote {} ({}x{}, {} images)",
        args.out.display(),
        poster.width(),
        poster.height(),
        paths.len()
    );
    Ok(())
}

fn cmd_fonts(args: FontsArgs) -> anyhow::Result<()> {
    let resolver = postergrid::FontResolver::new(&args.font_dirs);
    let needle = args.filter.as_deref().map(str::to_lowercase);

    let mut shown = 0usize;
    for face in resolver.faces() {
        if let Some(needle) = &needle
            && !face.family.to_lowercase().contains(needle)
            && !face.post_script_name.to_lowercase().contains(needle)
        {
            continue;
        }
        let path = face
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<memory>".to_string());
        println!(
            "{}\t{}\t{}\t{}",
            face.family, face.post_script_name, face.weight, path
        );
        shown += 1;
    }

    eprintln!("{shown} of {} faces", resolver.face_count());
    Ok(())
}
