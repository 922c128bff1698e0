use chrono::{Duration, NaiveDate};

use covid_boroughs::data::model::{Borough, DATE_FORMAT};

const DAYS: i64 = 120;
const OUTPUT: &str = "covid_london.csv";

/// Minimal deterministic PRNG (splitmix64).
struct SampleRng {
    state: u64,
}

impl SampleRng {
    fn new(seed: u64) -> Self {
        SampleRng { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform integer in `lo..=hi`.
    fn range_i32(&mut self, lo: i32, hi: i32) -> i32 {
        lo + (self.next_f64() * (hi - lo + 1) as f64) as i32
    }
}

/// Lockdown-shaped mobility curve: near baseline early, a deep dip in the
/// middle of the span, partial recovery at the end.
fn mobility(day: i64, depth: f64, rng: &mut SampleRng) -> i32 {
    let t = day as f64 / DAYS as f64;
    let dip = depth * (-(t - 0.45).powi(2) / 0.05).exp();
    (dip + rng.range_i32(-6, 6) as f64) as i32
}

fn main() {
    let mut rng = SampleRng::new(42);
    let start = NaiveDate::parse_from_str("2020-02-15", DATE_FORMAT)
        .expect("start date literal");

    let mut writer = csv::Writer::from_path(OUTPUT).expect("Failed to create output file");
    writer
        .write_record([
            "date",
            "borough",
            "retail_recreation_gmr",
            "grocery_pharmacy_gmr",
            "parks_gmr",
            "transit_gmr",
            "workplaces_gmr",
            "residential_gmr",
            "new_cases",
            "total_cases",
            "new_deaths",
            "total_deaths",
        ])
        .expect("Failed to write header");

    let mut rows = 0usize;
    for borough in Borough::ALL {
        // Cumulative counters carry across the borough's whole span.
        let mut total_cases: u32 = 0;
        let mut total_deaths: u32 = 0;
        let severity = 0.5 + rng.next_f64(); // per-borough outbreak scale

        for day in 0..DAYS {
            let date = start + Duration::days(day);
            let t = day as f64 / DAYS as f64;

            // Case wave peaking around the same time mobility bottoms out.
            let wave = (-(t - 0.5).powi(2) / 0.03).exp();
            let new_cases = (severity * wave * 60.0) as u32 + rng.range_i32(0, 3) as u32;
            let new_deaths = new_cases / 25 + rng.range_i32(0, 1) as u32;
            total_cases += new_cases;
            total_deaths += new_deaths;

            let record = [
                date.format(DATE_FORMAT).to_string(),
                borough.name().to_string(),
                mobility(day, -55.0, &mut rng).to_string(),
                mobility(day, -25.0, &mut rng).to_string(),
                // Parks moved the other way once restrictions eased.
                mobility(day, 35.0, &mut rng).to_string(),
                mobility(day, -60.0, &mut rng).to_string(),
                mobility(day, -65.0, &mut rng).to_string(),
                mobility(day, 20.0, &mut rng).to_string(),
                new_cases.to_string(),
                total_cases.to_string(),
                new_deaths.to_string(),
                total_deaths.to_string(),
            ];
            writer.write_record(&record).expect("Failed to write row");
            rows += 1;
        }
    }

    writer.flush().expect("Failed to flush output");
    println!(
        "Wrote {rows} records ({} boroughs x {DAYS} days) to {OUTPUT}",
        Borough::ALL.len()
    );
}
