use clap::Parser;
use walkshed::app::WalkshedApp;

fn main() {
    env_logger::init();
    let args = WalkshedApp::parse();
    if let Err(e) = args.run() {
        log::error!("walkshed failed: {e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}
