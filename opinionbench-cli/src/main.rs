// Copyright 2025 Opinionbench (https://github.com/opinionbench)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Opinionbench CLI
//!
//! Runs the aspect-based opinion evaluation harness over a TSV dataset and
//! reports per-run and aggregate accuracies.

use anyhow::{Context, Result};
use clap::Parser;
use opinionbench_core::{AspectSet, ClassifierMethod, DatasetSplits, EvalSettings};
use opinionbench_evals::{
    Classifier, EvalHarness, EvalReport, FineTunedPlmClassifier, OllamaClient,
    ZeroShotLlmClassifier,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "opinionbench")]
#[command(about = "Aspect-based opinion classification benchmark", long_about = None)]
struct Cli {
    /// Directory holding the dataset splits
    #[arg(long, default_value = "./data")]
    data_dir: PathBuf,

    /// Dataset file stem (expects <stem>_train.tsv, <stem>_val.tsv,
    /// <stem>_test.tsv)
    #[arg(long, default_value = "reviews")]
    dataset_stem: String,

    /// Base URL of the Ollama endpoint
    #[arg(long, default_value = "http://localhost:11434")]
    ollama_url: String,

    /// Model identifier for generate requests
    #[arg(long, default_value = "gemma3:1b")]
    model: String,

    /// Classifier backend
    #[arg(long, value_enum, default_value = "zero-shot-llm")]
    method: Method,

    /// Number of evaluation runs (zero-shot always executes one)
    #[arg(long, default_value = "5")]
    n_runs: usize,

    /// Training samples to keep; -1 uses the whole split
    #[arg(long, default_value = "-1", allow_hyphen_values = true)]
    n_train: i64,

    /// Test samples to keep; -1 uses the whole split
    #[arg(long, default_value = "-1", allow_hyphen_values = true)]
    n_test: i64,

    /// Compute device for trainable backends: -1 = CPU, >= 0 = accelerator
    #[arg(long, default_value = "-1", allow_hyphen_values = true)]
    device: i32,

    /// Verbose mode
    #[arg(short, long)]
    verbose: bool,

    /// Output the report as JSON (machine-readable)
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Method {
    ZeroShotLlm,
    FineTunedPlm,
}

impl From<Method> for ClassifierMethod {
    fn from(method: Method) -> Self {
        match method {
            Method::ZeroShotLlm => ClassifierMethod::ZeroShotLlm,
            Method::FineTunedPlm => ClassifierMethod::FineTunedPlm,
        }
    }
}

impl Cli {
    fn settings(&self) -> EvalSettings {
        EvalSettings {
            ollama_url: self.ollama_url.clone(),
            model: self.model.clone(),
            method: self.method.into(),
            n_runs: self.n_runs,
            n_train: self.n_train,
            n_test: self.n_test,
            device: self.device,
        }
    }
}

fn print_report(report: &EvalReport) {
    for (run_id, run) in report.runs.iter().enumerate() {
        println!("RUN {}/{}:", run_id + 1, report.runs.len());
        for (aspect, accuracy) in &run.per_aspect {
            println!("  {aspect}: {accuracy:.2}");
        }
        println!("  macro: {:.2}", run.macro_accuracy);
    }
    println!("\nALL RUNS MACRO ACC: {:?}", report.aggregate.macro_accuracies);
    println!("AVG MACRO ACC: {:.2}", report.aggregate.mean);
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let settings = cli.settings();
    let aspects = AspectSet::default();

    info!(
        method = settings.method.as_str(),
        model = %settings.model,
        runs = settings.effective_runs(),
        "starting evaluation"
    );

    let mut splits = DatasetSplits::load(&cli.data_dir, &cli.dataset_stem, &aspects)
        .context("Failed to load dataset splits")?;
    splits.subsample(settings.n_train, settings.n_test);
    info!(
        train = splits.train.len(),
        test = splits.test.len(),
        "dataset loaded"
    );

    let start = Instant::now();
    let harness = EvalHarness::new(settings.clone(), aspects.clone());

    let make_classifier: Box<dyn Fn() -> Box<dyn Classifier>> = match settings.method {
        ClassifierMethod::ZeroShotLlm => {
            let settings = settings.clone();
            let aspects = aspects.clone();
            Box::new(move || {
                let client = Arc::new(OllamaClient::new(
                    settings.ollama_url.clone(),
                    settings.model.clone(),
                ));
                Box::new(ZeroShotLlmClassifier::new(client, aspects.clone()))
            })
        }
        ClassifierMethod::FineTunedPlm => Box::new(|| Box::new(FineTunedPlmClassifier::new())),
    };

    let report = harness
        .evaluate(&splits, make_classifier)
        .await
        .context("Evaluation failed")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
        println!(
            "TOTAL EXEC TIME: {:.1}s",
            start.elapsed().as_secs_f64()
        );
    }

    Ok(())
}
