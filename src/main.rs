mod app;
mod infra;
mod layout;
mod session;
mod util;
mod zoom;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON capacity snapshot; a deterministic demo inventory is used when
    /// omitted.
    #[arg(long)]
    snapshot: Option<String>,
}

fn main() -> eframe::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "capviz",
        options,
        Box::new(move |cc| Ok(Box::new(app::CapacityApp::new(cc, args.snapshot.clone())))),
    )
}
