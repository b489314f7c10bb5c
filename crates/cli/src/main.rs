use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use pinplan::planner::{plan, ExtraSide, FormationConfig, PinCount, Side};
use pinplan::report::{assemble, ScenarioBundle};
use pinplan::synth::{draw_snapshot, ReplayToken, SynthCfg};
use pinplan::AnatomicalSnapshot;
use serde_json::json;
use tracing_subscriber::fmt::SubscriberBuilder;

mod input;
mod provenance;
mod table;

#[derive(Parser)]
#[command(name = "pinplan")]
#[command(about = "K-wire placement planning on elbow landmark snapshots")]
struct Cmd {
    /// Optional case tag; propagated to provenance sidecars and logs
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormationArg {
    Cross,
    Lateral,
    Medial,
}

#[derive(Clone, Copy, ValueEnum)]
enum SideArg {
    Left,
    Right,
}

impl From<SideArg> for ExtraSide {
    fn from(s: SideArg) -> Self {
        match s {
            SideArg::Left => ExtraSide::Left,
            SideArg::Right => ExtraSide::Right,
        }
    }
}

#[derive(Subcommand)]
enum Action {
    /// Plan one formation and write the result as JSON
    Plan {
        /// Snapshot or detections JSON
        #[arg(long)]
        input: PathBuf,
        #[arg(long, value_enum)]
        formation: FormationArg,
        #[arg(long, default_value_t = 2)]
        pins: u8,
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        entry_offset: i32,
        /// Side of the third cross wire
        #[arg(long, value_enum, default_value_t = SideArg::Left)]
        extra_side: SideArg,
        /// Output path; prints to stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Compare the six canonical formations and write a table (.csv or .parquet)
    Report {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        entry_offset: i32,
        #[arg(long, value_enum, default_value_t = SideArg::Left)]
        extra_side: SideArg,
        #[arg(long)]
        out: PathBuf,
    },
    /// Run the report on synthetic snapshots and print summaries
    Demo {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 3)]
        count: u64,
        /// Probability of dropping the humerus outline
        #[arg(long, default_value_t = 0.0)]
        p_missing_humerus: f64,
        /// Also write every drawn snapshot as JSON into this directory
        #[arg(long)]
        dump: Option<PathBuf>,
    },
    /// Print a small provenance JSON block
    Provenance,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Plan {
            input,
            formation,
            pins,
            entry_offset,
            extra_side,
            out,
        } => run_plan(
            &input,
            formation,
            pins,
            entry_offset,
            extra_side.into(),
            out.as_deref(),
            cmd.tag,
        ),
        Action::Report {
            input,
            entry_offset,
            extra_side,
            out,
        } => run_report(&input, entry_offset, extra_side.into(), &out, cmd.tag),
        Action::Demo {
            seed,
            count,
            p_missing_humerus,
            dump,
        } => run_demo(seed, count, p_missing_humerus, dump.as_deref(), cmd.tag),
        Action::Provenance => {
            let block = provenance::Sidecar::new(json!({}), cmd.tag);
            println!("{}", serde_json::to_string_pretty(&block)?);
            Ok(())
        }
    }
}

fn formation_config(
    formation: FormationArg,
    pins: u8,
    entry_offset: i32,
    extra_side: ExtraSide,
) -> Result<FormationConfig> {
    let pin_count = PinCount::try_from(pins)?;
    Ok(match formation {
        FormationArg::Cross => FormationConfig::cross(pin_count, entry_offset, extra_side),
        FormationArg::Lateral => FormationConfig::one_sided(Side::Lateral, pin_count, entry_offset),
        FormationArg::Medial => FormationConfig::one_sided(Side::Medial, pin_count, entry_offset),
    })
}

fn run_plan(
    input: &Path,
    formation: FormationArg,
    pins: u8,
    entry_offset: i32,
    extra_side: ExtraSide,
    out: Option<&Path>,
    tag: Option<String>,
) -> Result<()> {
    let config = formation_config(formation, pins, entry_offset, extra_side)?;
    let snapshot = input::load_snapshot(input)?;
    let result = plan(&snapshot, &config);
    tracing::info!(
        formation = config.formation.label(),
        pins = config.pin_count.get(),
        wires = result.wires.len(),
        stage = ?result.stage,
        tag = ?tag,
        "{}",
        result.info_message
    );
    for w in &result.metrics.warnings {
        tracing::warn!(code = w.code(), "{w}");
    }

    let body = serde_json::to_vec_pretty(&result)?;
    match out {
        Some(path) => {
            write_artifact(path, &body)?;
            provenance::Sidecar::new(json!({ "input": input, "config": config }), tag)
                .write_for(path)?;
        }
        None => println!("{}", String::from_utf8_lossy(&body)),
    }
    Ok(())
}

fn run_report(
    input: &Path,
    entry_offset: i32,
    extra_side: ExtraSide,
    out: &Path,
    tag: Option<String>,
) -> Result<()> {
    let snapshot = input::load_snapshot(input)?;
    let bundles = assemble(&snapshot, entry_offset, extra_side);
    print_bundles(&bundles);

    let mut df = table::comparison_frame(&bundles)?;
    table::write_table(&mut df, out)?;
    tracing::info!(rows = df.height(), cols = df.width(), out = %out.display(), "report table");
    provenance::Sidecar::new(
        json!({
            "input": input,
            "entry_offset": entry_offset,
            "extra_side": extra_side,
        }),
        tag,
    )
    .write_for(out)?;
    Ok(())
}

fn run_demo(
    seed: u64,
    count: u64,
    p_missing_humerus: f64,
    dump: Option<&Path>,
    tag: Option<String>,
) -> Result<()> {
    let cfg = SynthCfg {
        p_missing_humerus,
        ..SynthCfg::default()
    };
    for index in 0..count {
        let snapshot: AnatomicalSnapshot = draw_snapshot(&cfg, ReplayToken::new(seed, index));
        if let Some(dir) = dump {
            let path = dir.join(format!("snapshot_{seed}_{index}.json"));
            write_artifact(&path, &serde_json::to_vec_pretty(&snapshot)?)?;
            provenance::Sidecar::new(
                json!({
                    "seed": seed,
                    "index": index,
                    "p_missing_humerus": p_missing_humerus,
                }),
                tag.clone(),
            )
            .write_for(&path)?;
        }
        println!("== snapshot seed={seed} index={index}");
        print_bundles(&assemble(&snapshot, 0, ExtraSide::Left));
    }
    Ok(())
}

fn print_bundles<H>(bundles: &[ScenarioBundle<H>]) {
    for b in bundles {
        println!("{}", b.summary());
        print!("{}", b.assessment.to_text());
    }
}

fn write_artifact(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}
