use anyhow::{Context, Result};
use serde_json::{Value, json};

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

    /// Uniform in `[lo, hi)`.
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// Padding the source spreadsheet export leaves around text cells.
fn pad(s: &str, rng: &mut SimpleRng) -> String {
    match rng.next_u64() % 4 {
        0 => format!(" {s}"),
        1 => format!("{s} "),
        2 => format!("\t{s}\r\n"),
        _ => s.to_string(),
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "ipudata.json".to_string());

    // (institute, cutoff multiplier): stronger institutes close earlier.
    let institutes = [
        ("Guru Tegh Bahadur Institute of Technology", 1.6),
        ("Maharaja Agrasen Institute of Technology", 1.2),
        ("Bharati Vidyapeeth's College of Engineering", 1.3),
        ("University School of Information, Communication & Technology", 0.6),
        ("Maharaja Surajmal Institute of Technology", 1.4),
        ("Bhagwan Parshuram Institute of Technology", 1.8),
    ];
    // (program, base closing rank)
    let programs = [
        ("Computer Science and Engineering", 28_000.0),
        ("Information Technology", 36_000.0),
        ("Electronics and Communication Engineering", 52_000.0),
        ("Electrical and Electronics Engineering", 70_000.0),
        ("Mechanical and Automation Engineering", 95_000.0),
    ];
    let quotas = [("HS", 1.0), ("OS", 0.55)];
    let categories = [("GNGN", 1.0), ("EWGN", 1.5), ("OBGN", 2.2), ("SCGN", 6.0), ("STGN", 9.0)];

    let mut rows: Vec<Value> = Vec::new();
    for &(institute, inst_factor) in &institutes {
        for &(program, base) in &programs {
            for &(quota, quota_factor) in &quotas {
                for &(category, cat_factor) in &categories {
                    let rank = base * inst_factor * quota_factor * cat_factor * rng.range(0.85, 1.15);
                    // A few cells carry markers instead of a rank, as in the real export.
                    let closing = if rng.next_u64() % 40 == 0 {
                        json!("--")
                    } else if rng.next_u64() % 3 == 0 {
                        json!(format!("{}\r\n", rank.round() as i64))
                    } else {
                        json!(rank.round() as i64)
                    };
                    rows.push(json!({
                        "Institute": pad(institute, &mut rng),
                        "Program": pad(program, &mut rng),
                        "Quota": pad(quota, &mut rng),
                        "Category": pad(category, &mut rng),
                        "Closing\r\nRank": closing,
                    }));
                }
            }
        }
    }

    let text = serde_json::to_string_pretty(&rows).context("encoding sample rows")?;
    std::fs::write(&output_path, text).with_context(|| format!("writing {output_path}"))?;

    println!("Wrote {} admission records to {output_path}", rows.len());
    Ok(())
}
