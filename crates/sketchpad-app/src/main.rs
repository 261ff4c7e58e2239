//! Main application entry point.

fn main() {
    env_logger::init();
    log::info!("Starting Sketchpad");

    match sketchpad_app::run(std::env::args().skip(1)) {
        Ok(path) => log::info!("Wrote {}", path.display()),
        Err(e) => {
            log::error!("{}", e);
            eprintln!("sketchpad: {e}");
            std::process::exit(1);
        }
    }
}
