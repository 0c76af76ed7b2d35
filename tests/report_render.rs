use co2_rs::report::{render, render_country_list, save_report};
use co2_rs::stats::aggregate;
use co2_rs::EmissionRecord;
use std::fs;

#[test]
fn fixed_layout_with_two_decimals() {
    let rows = vec![
        EmissionRecord::new("2000", 10.0),
        EmissionRecord::new("2001", 20.0),
    ];
    let stats = aggregate(&rows).unwrap();
    let expected = "\
CO2 Emissions Report for Chad
----------------------------------------
      Year Emissions (Mt)
      2000          10.00
      2001          20.00

Statistics for Chad:
- Average Emissions: 15.00 Mt
- Standard Deviation: 5.00 Mt
- Highest Emissions: 20.00 Mt in 2001
- Lowest Emissions: 10.00 Mt in 2000
";
    assert_eq!(render("Chad", &rows, &stats), expected);
}

#[test]
fn long_values_are_not_truncated() {
    let rows = vec![EmissionRecord::new("2019", 10_707_219.123)];
    let stats = aggregate(&rows).unwrap();
    let text = render("China", &rows, &stats);
    assert!(text.contains("      2019    10707219.12\n"));
}

#[test]
fn country_list_one_line_each() {
    let text = render_country_list(["Albania", "Chad"]);
    assert_eq!(text, "Available Countries:\n- Albania\n- Chad\n");
}

#[test]
fn saving_twice_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.txt");
    fs::write(&path, "x".repeat(4096)).unwrap();

    let rows = vec![EmissionRecord::new("1999", 42.0)];
    let stats = aggregate(&rows).unwrap();
    let text = render("Chad", &rows, &stats);
    save_report(&text, &path).unwrap();
    save_report(&text, &path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), text);
}
