use anyhow::{Context, Result};
use serde::Serialize;

/// One generated earthquake record. `None` labels serialize as empty cells,
/// which the viewer normalizes to "N/A".
#[derive(Serialize)]
struct QuakeRow {
    latitude: f64,
    longitude: f64,
    depth_km: f64,
    magnitude: f64,
    cluster: Option<i64>,
    dbscan_cluster: Option<i64>,
}

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn round4(v: f64) -> f64 {
    (v * 1e4).round() / 1e4
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(7);

    // (lat, lon, spread in degrees) of a few seismically active regions.
    let centers = [
        (-6.9, 107.2, 0.8), // West Java
        (-8.5, 116.2, 0.6), // Lombok
        (0.9, 122.4, 0.9),  // Gorontalo
        (3.4, 96.1, 0.7),   // Aceh
    ];
    let per_center = 150;

    let output_path = "sample_earthquakes.csv";
    let mut writer =
        csv::Writer::from_path(output_path).with_context(|| format!("creating {output_path}"))?;

    let mut rows = 0usize;
    for (id, &(lat, lon, spread)) in centers.iter().enumerate() {
        for _ in 0..per_center {
            let latitude = round4(rng.gauss(lat, spread));
            let longitude = round4(rng.gauss(lon, spread));
            let depth_km = round4(10.0 + rng.next_f64() * 140.0);
            let magnitude = round4(3.0 + rng.next_f64() * 4.0);

            // A sprinkle of unlabeled rows, and DBSCAN noise coded as -1.
            let cluster = (rng.next_f64() >= 0.03).then_some(id as i64);
            let dbscan_cluster = if rng.next_f64() < 0.07 {
                Some(-1)
            } else {
                Some(id as i64)
            };

            writer.serialize(QuakeRow {
                latitude,
                longitude,
                depth_km,
                magnitude,
                cluster,
                dbscan_cluster,
            })?;
            rows += 1;
        }
    }

    writer.flush().context("flushing CSV")?;
    println!("Wrote {rows} earthquakes to {output_path}");
    Ok(())
}
