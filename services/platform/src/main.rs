use std::path::PathBuf;

use anyhow::Result;
use platform::{run, PlatformConfig};
use simulation::{generate_all, GeneratorConfig};
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let data_dir = PathBuf::from("data");
    std::fs::create_dir_all(&data_dir)?;

    info!("generating input data");
    generate_all(&data_dir, &GeneratorConfig::default())?;
    info!("input data generated");

    let config = PlatformConfig::new(&data_dir, &data_dir);
    let report = run(&config)?;

    for entry in &report.sector_risk {
        println!("{}: pv01 {}", entry.product.name, entry.pv01);
    }

    info!("pipeline complete");
    Ok(())
}
