//! Print a synthetic calcium-imaging field for pasting into the app.
//!
//! Usage: `generate_sample [baseline|data] [seed]`
//!
//! Both blocks are generated from the same seed, so running the command once
//! with `baseline` and once with `data` yields a consistent field.

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

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// One cell's transient: resting level, amplitude, onset and decay constant.
struct Cell {
    f0: f64,
    amplitude: f64,
    onset: f64,
    tau: f64,
}

impl Cell {
    /// Fast exponential rise after `onset`, then exponential decay.
    fn fluorescence(&self, t: f64) -> f64 {
        if t < self.onset {
            return self.f0;
        }
        let dt = t - self.onset;
        let rise = 1.0 - (-dt / 0.3).exp();
        self.f0 + self.amplitude * rise * (-dt / self.tau).exp()
    }
}

const CHANNELS: usize = 6;
const SAMPLES: usize = 120;
const DT: f64 = 0.5;

fn main() {
    let mut args = std::env::args().skip(1);
    let block = args.next().unwrap_or_else(|| "data".to_string());
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);

    let mut rng = SimpleRng::new(seed);
    let cells: Vec<Cell> = (0..CHANNELS)
        .map(|_| Cell {
            f0: rng.uniform(80.0, 140.0),
            amplitude: rng.uniform(40.0, 200.0),
            onset: rng.uniform(8.0, 14.0),
            tau: rng.uniform(4.0, 40.0),
        })
        .collect();

    match block.as_str() {
        "baseline" => {
            let values: Vec<String> = cells.iter().map(|c| format!("{:.3}", c.f0)).collect();
            println!("F0 {}", values.join(" "));
        }
        "data" => {
            for i in 0..SAMPLES {
                let t = i as f64 * DT;
                let values: Vec<String> = cells
                    .iter()
                    .map(|c| format!("{:.3}", c.fluorescence(t) + rng.gauss(0.0, 1.5)))
                    .collect();
                println!("{t:.1} {}", values.join(" "));
            }
        }
        other => {
            eprintln!("Unknown block '{other}', expected 'baseline' or 'data'");
            std::process::exit(2);
        }
    }
}
