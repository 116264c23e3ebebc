use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use synthgen::{
    load_templates, Engine, GenerateConfig, GenerationContext, JsonlWriterPool, MemorySink,
    RecordSink, TemplateStats, UnresolvedTemplate,
};

/// JSON output for a generation run
#[derive(Serialize)]
struct GenerateJsonOutput {
    input: String,
    output_dir: String,
    dry_run: bool,
    seed: u64,
    statistics: GenerateStatistics,
    templates: Vec<TemplateStats>,
    unresolved: Vec<UnresolvedTemplate>,
}

#[derive(Serialize)]
struct GenerateStatistics {
    templates_found: usize,
    records_generated: u64,
    elapsed_secs: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    records_per_sec: Option<f64>,
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    templates: String,
    output: Option<PathBuf>,
    seed: Option<u64>,
    iterations: Option<u64>,
    config_file: Option<PathBuf>,
    strict: bool,
    dry_run: bool,
    progress: bool,
    json: bool,
) -> anyhow::Result<()> {
    let config = GenerateConfig::builder()
        .templates(templates)
        .output(output)
        .seed(seed)
        .default_iterations(iterations)
        .config_file(config_file)
        .strict(strict)
        .dry_run(dry_run)
        .progress(progress)
        .build()?;

    let sources = load_templates(Path::new(&config.templates))?;

    let ctx = match config.seed {
        Some(seed) => GenerationContext::new(seed),
        None => GenerationContext::random(),
    };
    let mut engine = Engine::new(ctx).with_strict(config.strict);
    for source in &sources {
        let count = config.iterations_for(&source.name, source.iterations);
        engine.add_template(source, count)?;
    }

    let mut sink: Box<dyn RecordSink> = if config.dry_run {
        Box::new(MemorySink::new())
    } else {
        let pool = JsonlWriterPool::new(config.output.clone());
        pool.ensure_output_dir()?;
        Box::new(pool)
    };

    let start_time = Instant::now();

    let stats = if config.progress && !json {
        let pb = ProgressBar::new(engine.total_records());
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} records ({percent}%) {msg}",
            )?
            .progress_chars("█▓▒░  ")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(100));

        let pb_clone = pb.clone();
        engine = engine.with_progress(move |records| pb_clone.set_position(records));

        let stats = engine.run(sink.as_mut())?;
        pb.finish_with_message("done");
        stats
    } else {
        engine.run(sink.as_mut())?
    };

    let elapsed = start_time.elapsed();
    let records_per_sec = if elapsed.as_secs_f64() > 0.0 {
        Some(stats.records_generated as f64 / elapsed.as_secs_f64())
    } else {
        None
    };

    if json {
        let output_json = GenerateJsonOutput {
            input: config.templates.clone(),
            output_dir: config.output.display().to_string(),
            dry_run: config.dry_run,
            seed: stats.seed,
            statistics: GenerateStatistics {
                templates_found: sources.len(),
                records_generated: stats.records_generated,
                elapsed_secs: elapsed.as_secs_f64(),
                records_per_sec,
            },
            templates: stats.templates,
            unresolved: stats.unresolved,
        };
        println!("{}", serde_json::to_string_pretty(&output_json)?);
        return Ok(());
    }

    if config.dry_run {
        println!("\n✓ Dry run completed!");
        println!("\nWould create {} files:", stats.templates.len());
    } else {
        println!("\n✓ Generation completed successfully!");
        println!("\nFiles written to {}:", config.output.display());
    }
    for template in &stats.templates {
        println!("  - {}.jsonl ({} records)", template.name, template.records);
    }

    if !stats.unresolved.is_empty() {
        println!("\nUnresolved dependencies (ran last):");
        for unresolved in &stats.unresolved {
            println!("  - {}", unresolved.describe());
        }
    }

    println!("\nStatistics:");
    println!("  Templates: {}", sources.len());
    println!("  Records generated: {}", stats.records_generated);
    println!("  Seed: {}", stats.seed);
    println!("  Elapsed time: {:.3?}", elapsed);
    if let Some(rate) = records_per_sec {
        println!("  Throughput: {:.0} records/s", rate);
    }

    Ok(())
}
