use anyhow::{bail, ensure, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::{
    env, fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use nppe_qbank::{
    qbank_txt::{
        parser::{decode_qbank_txt, parse_block, ParsedQbankTxt, QbankTxtRun},
        renderer::render_qbank_md,
        report::RunReport,
        splitter::split_blocks,
    },
    question::QuestionRecord,
};

static DEFAULT_OUTPUT_PATH: &str = "questions/nppe_r1.qbank.md";

struct Args {
    input_path: String,
    output_path: String,
    report_path: Option<String>,
    dry_run: bool,
    strict: bool,
}

fn usage(program: &str, opts: &getopts::Options) -> String {
    let brief = format!("Usage: {} [options] <question_dump.txt>", program);
    opts.usage(&brief)
}

// Ok(None) when only help was asked for
fn get_args() -> Result<Option<Args>> {
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "nppe-qbank".to_owned());
    let args: Vec<String> = args.collect();

    let mut opts = getopts::Options::new();
    opts.optopt(
        "o",
        "output",
        &format!("where to write the questions (default: {})", DEFAULT_OUTPUT_PATH),
        "PATH",
    );
    opts.optopt("r", "report", "also write the run report as JSON", "PATH");
    opts.optflag("", "dry-run", "parse and report without writing questions");
    opts.optflag("", "strict", "exit with failure when any block is rejected");
    opts.optflag("h", "help", "print this help");

    let matches = match opts.parse(&args) {
        Ok(m) => m,
        Err(f) => bail!("{}\n{}", f, usage(&program, &opts)),
    };

    if matches.opt_present("h") {
        println!("{}", usage(&program, &opts));
        return Ok(None);
    }

    ensure!(
        matches.free.len() == 1,
        "exactly one input file is required\n{}",
        usage(&program, &opts)
    );
    let input_path = matches.free[0].clone();

    Ok(Some(Args {
        input_path,
        output_path: matches
            .opt_str("o")
            .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_owned()),
        report_path: matches.opt_str("r"),
        dry_run: matches.opt_present("dry-run"),
        strict: matches.opt_present("strict"),
    }))
}

enum BuildOut {
    Null,
    File { path: PathBuf },
}

impl BuildOut {
    fn init_file(path: &str) -> Result<Self> {
        let path = PathBuf::from(path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }

        Ok(Self::File { path })
    }

    fn save_qbank_md(&self, records: &[QuestionRecord]) -> Result<()> {
        match &self {
            BuildOut::File { path } => {
                fs::write(path, render_qbank_md(records))
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!(
                    "\nGenerated {} questions in {}",
                    records.len(),
                    path.display()
                );
            }
            BuildOut::Null => {
                println!("\n[dry-run] Would generate {} questions", records.len());
            }
        }

        Ok(())
    }
}

fn save_report(path: &Path, report: &RunReport) -> Result<()> {
    fs::write(path, serde_json::to_string_pretty(report)?)
        .with_context(|| format!("Failed to write report: {}", path.display()))
}

fn parse_with_progress(txt: &str) -> ParsedQbankTxt {
    let split = split_blocks(txt);

    let pb = create_progress_bar(split.blocks.len() as u64);
    let mut run = QbankTxtRun::new(&split);
    for block in &split.blocks {
        let outcome = parse_block(block);
        pb.suspend(|| run.push(outcome));
        pb.inc(1);
    }
    pb.finish_and_clear();

    run.finish()
}

fn run(args: &Args) -> Result<RunReport> {
    let input_path = PathBuf::from(&args.input_path);
    ensure!(
        input_path.is_file(),
        "File not found: {}",
        input_path.display()
    );

    let out = if args.dry_run {
        BuildOut::Null
    } else {
        BuildOut::init_file(&args.output_path)?
    };

    let bytes = fs::read(&input_path)
        .with_context(|| format!("Failed to read {}", input_path.display()))?;
    let txt = decode_qbank_txt(&bytes);

    let ParsedQbankTxt { records, report } = parse_with_progress(&txt);

    out.save_qbank_md(&records)?;

    println!("\n{}", report);

    if let Some(report_path) = &args.report_path {
        save_report(Path::new(report_path), &report)?;
    }

    Ok(report)
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .without_time()
        .init();

    let args = match get_args()? {
        Some(args) => args,
        None => return Ok(ExitCode::SUCCESS),
    };

    let report = run(&args)?;

    if args.strict && report.rejected() > 0 {
        eprintln!("{} block(s) were rejected (--strict)", report.rejected());
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

fn create_progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template("{percent:>3}% [{wide_bar:.cyan/blue}] {pos}/{len} blocks")
            .unwrap()
            .progress_chars("#-"),
    );
    pb
}
