pub fn run(config_path: Option<&str>, seed: Option<u64>, fps: Option<u32>) {
    let config = super::load_config(config_path, seed, fps);
    let mut app = crate::tui::app::App::new(&config);
    if let Err(e) = app.run() {
        eprintln!("TUI error: {e}");
        std::process::exit(1);
    }
}
