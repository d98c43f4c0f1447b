use astrovitals_core::DashboardConfig;

/// Print the default config, ready to be edited and passed back via `--config`.
pub fn run() {
    match DashboardConfig::default().to_json_pretty() {
        Ok(s) => println!("{s}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
