//! Print the six-formation comparison for a few synthetic snapshots.
//!
//! Usage:
//!   cargo run -p pinplan --example compare_formations -- [count]

use pinplan::api::{assemble, draw_snapshot, ExtraSide, SynthCfg, SynthReplay};

fn main() {
    let count: u64 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2);
    let cfg = SynthCfg::default();
    for index in 0..count {
        let snap = draw_snapshot(&cfg, SynthReplay::new(2025, index));
        println!("== snapshot {index}");
        for bundle in assemble(&snap, 0, ExtraSide::Left) {
            println!("{}", bundle.summary());
            print!("{}", bundle.assessment.to_text());
        }
    }
}
