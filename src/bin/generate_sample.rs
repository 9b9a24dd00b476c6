use anyhow::{Context, Result};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use studio_acoustics::acoustics::frequency_response::shaped_spl;
use studio_acoustics::acoustics::positions::PositionCatalog;
use studio_acoustics::color::{to_hex, StiQuality};

const CSV_PATH: &str = "sample_measurements.csv";
const LOG_PATH: &str = "sample_smaart_log.txt";

/// Third-octave points written per position.
const CSV_FREQUENCIES: [f64; 10] = [
    63.0, 125.0, 250.0, 500.0, 1000.0, 2000.0, 4000.0, 8000.0, 12500.0, 16000.0,
];

const RT60_BANDS: [(u32, f64); 6] = [
    (125, 0.85),
    (250, 0.92),
    (500, 0.78),
    (1000, 0.71),
    (2000, 0.68),
    (4000, 0.55),
];

const STI_BANDS: [f64; 7] = [0.94, 0.99, 0.97, 0.98, 0.86, 0.91, 1.00];

fn write_measurement_csv(catalog: &PositionCatalog, rng: &mut StdRng) -> Result<usize> {
    let mut writer = csv::Writer::from_path(CSV_PATH).context("creating sample CSV")?;
    writer.write_record([
        "Frequency_Hz",
        "Magnitude_dB",
        "Phase_deg",
        "STI",
        "STI_Degradation_%",
        "position",
        "Color",
    ])?;

    let mut rows = 0;
    for (_, pos) in catalog.iter() {
        let color = to_hex(StiQuality::from_degradation(pos.degradation).color());
        for &freq in &CSV_FREQUENCIES {
            let magnitude = shaped_spl(freq, pos) + rng.random_range(-1.0..=1.0);
            let phase = rng.random_range(-180.0..180.0);
            writer.write_record([
                format!("{freq}"),
                format!("{magnitude:.2}"),
                format!("{phase:.1}"),
                format!("{:.2}", pos.sti),
                format!("{:.1}", pos.degradation * 100.0),
                pos.label.clone(),
                color.clone(),
            ])?;
            rows += 1;
        }
    }
    writer.flush().context("writing sample CSV")?;
    Ok(rows)
}

fn write_smaart_log(rng: &mut StdRng) -> Result<()> {
    let mut lines = vec![
        "Smaart Measurement Log".to_string(),
        "Session: Studio 8 Acoustics Analysis".to_string(),
        String::new(),
        "=== RT60 Measurements ===".to_string(),
        String::new(),
        "Filter\tBand\tRT60\tT20\tT30".to_string(),
    ];
    for (band, rt60) in RT60_BANDS {
        let t20 = rt60 - rng.random_range(0.0..0.05);
        let t30 = rt60 + rng.random_range(0.0..0.05);
        lines.push(format!("Oct\t{band}Hz\t{rt60:.2}\t{t20:.2}\t{t30:.2}"));
    }
    lines.push(String::new());
    lines.push("=== STI Measurements ===".to_string());
    lines.push(String::new());
    lines.push("Freq\t125\t250\t500\t1000\t2000\t4000\t8000".to_string());
    let sti: Vec<String> = STI_BANDS.iter().map(|v| format!("{v:.2}")).collect();
    lines.push(format!("STI\t{}", sti.join("\t")));
    lines.push(String::new());
    lines.push("=== End of Log ===".to_string());

    std::fs::write(LOG_PATH, lines.join("\n") + "\n").context("writing sample Smaart log")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut rng = StdRng::seed_from_u64(42);
    let catalog = PositionCatalog::studio_8();

    let rows = write_measurement_csv(&catalog, &mut rng)?;
    info!("Wrote {rows} rows ({} positions) to {CSV_PATH}", catalog.len());

    write_smaart_log(&mut rng)?;
    info!("Wrote {} RT60 bands and STI row to {LOG_PATH}", RT60_BANDS.len());
    Ok(())
}
