use astrovitals_core::forecast::{self, ForecastPoint};

pub fn run(json: bool) {
    let points = forecast::points();
    if json {
        match serde_json::to_string_pretty(&points) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Error serializing forecast: {e}");
                std::process::exit(1);
            }
        }
        return;
    }
    print!("{}", render_table(&points));
}

fn render_table(points: &[ForecastPoint]) -> String {
    let mut out = String::new();
    out.push_str("Heart-rate forecast (bpm)\n\n");
    out.push_str(&format!(
        "  {:<6} {:>9} {:>7} {:>7}\n",
        "When", "Predicted", "Lower", "Upper"
    ));
    out.push_str(&format!("  {}\n", "─".repeat(32)));
    for p in points {
        out.push_str(&format!(
            "  {:<6} {:>9.0} {:>7.0} {:>7.0}\n",
            p.label, p.predicted, p.lower, p.upper
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_one_row_per_horizon() {
        let table = render_table(&forecast::points());
        let rows: Vec<&str> = table.lines().skip(4).collect();
        assert_eq!(rows.len(), forecast::LABELS.len());
        assert!(rows[0].trim_start().starts_with("Now"));
        assert!(rows[8].contains("+24h"));
    }

    #[test]
    fn first_row_shows_current_band() {
        let table = render_table(&forecast::points());
        let first = table.lines().nth(4).unwrap();
        let cols: Vec<&str> = first.split_whitespace().collect();
        assert_eq!(cols, ["Now", "72", "68", "76"]);
    }
}
