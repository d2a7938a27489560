use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

struct Row {
    region: &'static str,
    location: &'static str,
    construction: &'static str,
    business_type: &'static str,
    state: &'static str,
    investment: i64,
    rating: f64,
    earthquake: bool,
}

const N_ROWS: usize = 500;

fn generate(rng: &mut SimpleRng) -> Vec<Row> {
    // state → region
    let states: [(&str, &str); 10] = [
        ("Arusha", "North"),
        ("Kilimanjaro", "North"),
        ("Mwanza", "Lake"),
        ("Kagera", "Lake"),
        ("Dodoma", "Central"),
        ("Singida", "Central"),
        ("Dar es Salaam", "Eastern"),
        ("Morogoro", "Eastern"),
        ("Mbeya", "Southern Highlands"),
        ("Iringa", "Southern Highlands"),
    ];
    let locations = ["Urban", "Rural", "Peri-urban"];
    let constructions = ["Frame", "Masonry", "Concrete", "Steel"];
    let business_types = ["Retail", "Hotel", "Farming", "Manufacturing", "Office", "Warehouse"];

    (0..N_ROWS)
        .map(|_| {
            let (state, region) = states[(rng.next_u64() % states.len() as u64) as usize];
            // Round to the nearest 50,000 so some amounts repeat.
            let investment = (rng.next_f64() * 20_000_000.0 / 50_000.0).round() as i64 * 50_000
                + 500_000;
            let rating = ((1.0 + rng.next_f64() * 4.0) * 10.0).round() / 10.0;
            Row {
                region,
                location: rng.pick(&locations),
                construction: rng.pick(&constructions),
                business_type: rng.pick(&business_types),
                state,
                investment,
                rating,
                earthquake: rng.next_f64() < 0.2,
            }
        })
        .collect()
}

fn write_csv(rows: &[Row], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record([
        "Region",
        "Location",
        "Construction",
        "BusinessType",
        "State",
        "Investment",
        "Rating",
        "Earthquake",
    ])?;
    for r in rows {
        writer.write_record([
            r.region.to_string(),
            r.location.to_string(),
            r.construction.to_string(),
            r.business_type.to_string(),
            r.state.to_string(),
            r.investment.to_string(),
            r.rating.to_string(),
            r.earthquake.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(rows: &[Row], path: &str) -> Result<()> {
    let text = |f: fn(&Row) -> &'static str| -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("Region", DataType::Utf8, false),
        Field::new("Location", DataType::Utf8, false),
        Field::new("Construction", DataType::Utf8, false),
        Field::new("BusinessType", DataType::Utf8, false),
        Field::new("State", DataType::Utf8, false),
        Field::new("Investment", DataType::Int64, false),
        Field::new("Rating", DataType::Float64, false),
        Field::new("Earthquake", DataType::Boolean, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            text(|r| r.region),
            text(|r| r.location),
            text(|r| r.construction),
            text(|r| r.business_type),
            text(|r| r.state),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.investment))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.rating))),
            Arc::new(BooleanArray::from(
                rows.iter().map(|r| r.earthquake).collect::<Vec<_>>(),
            )),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng);

    write_csv(&rows, "sample_data.csv")?;
    write_parquet(&rows, "sample_data.parquet")?;

    println!(
        "Wrote {} investment records to sample_data.csv and sample_data.parquet",
        rows.len()
    );
    Ok(())
}
