//! Headless driver: reads editor events from stdin, one per line.

use std::io;
use std::path::PathBuf;

use bbat::driver::run_script;
use bbat::format::{PointsReader, YoloCodec};
use bbat::navigator::{FileImageSource, SessionNavigator, scan_folder};
use bbat::{AppConfig, Editor, Flow};
use clap::Parser;

/// Draw bounding boxes over a folder of images and save YOLO labels.
#[derive(Parser, Debug)]
#[command(name = "bbat", version, about)]
struct Args {
    /// Folder of images to annotate
    image_dir: PathBuf,

    /// Config file (defaults to the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where label files are written
    #[arg(long)]
    labels_dir: Option<PathBuf>,

    /// Where reference-point files are read from
    #[arg(long)]
    points_dir: Option<PathBuf>,

    /// Class id written for every box
    #[arg(long)]
    class_id: Option<u32>,

    /// Save when moving back to the previous image
    #[arg(long)]
    save_on_retreat: bool,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load_or_default(args.config.as_deref())?;
    if args.labels_dir.is_some() {
        config.labels_dir = args.labels_dir;
    }
    if args.points_dir.is_some() {
        config.points_dir = args.points_dir;
    }
    if let Some(class_id) = args.class_id {
        config.class_id = class_id;
    }
    config.save_on_retreat |= args.save_on_retreat;

    env_logger::Builder::new()
        .filter_level(config.log_level.to_level_filter())
        .parse_default_env()
        .init();

    let images = scan_folder(&args.image_dir)?;
    let navigator = SessionNavigator::open(images, Box::new(FileImageSource))?;
    let codec = YoloCodec::new(config.resolve_labels_dir(&args.image_dir))
        .with_class_id(config.class_id);
    let points = PointsReader::new(config.resolve_points_dir(&args.image_dir))
        .with_prefix(config.points_prefix.clone());
    log::info!(
        "Labels go to {:?}, points come from {:?}",
        codec.labels_dir(),
        config.resolve_points_dir(&args.image_dir)
    );

    let mut editor = Editor::new(&config, navigator, codec, points);
    for line in editor.bindings().help_lines() {
        println!("{}", line);
    }
    print_frame(&editor);

    let stdin = io::stdin();
    let flow = run_script(&mut editor, stdin.lock(), print_frame)?;
    match flow {
        Flow::Finished => println!("All images done"),
        Flow::Quit => println!("Quit"),
        Flow::Continue => log::info!("Input closed"),
    }
    Ok(())
}

fn print_frame(editor: &Editor) {
    let frame = editor.render();
    match frame.status {
        Some(status) => println!(
            "{} | {} boxes | {}",
            frame.title,
            editor.session().labels().len(),
            status
        ),
        None => println!("{} | {} boxes", frame.title, editor.session().labels().len()),
    }
}
