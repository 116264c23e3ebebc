//! Order command - show templates in the order they would be generated.

use serde::Serialize;
use std::path::{Path, PathBuf};
use synthgen::{load_templates, Engine, GenerateConfig, GenerationContext, UnresolvedTemplate};

#[derive(Serialize)]
struct OrderJsonOutput {
    order: Vec<OrderedTemplate>,
    unresolved: Vec<UnresolvedTemplate>,
}

#[derive(Serialize)]
struct OrderedTemplate {
    name: String,
    iterations: u64,
    depends_on: Vec<String>,
}

/// Run the order command
pub fn run(templates: String, config_file: Option<PathBuf>, json: bool) -> anyhow::Result<()> {
    let config = GenerateConfig::builder()
        .templates(templates)
        .config_file(config_file)
        .build()?;

    let sources = load_templates(Path::new(&config.templates))?;

    let mut engine = Engine::new(GenerationContext::new(config.seed.unwrap_or_default()));
    for source in &sources {
        let count = config.iterations_for(&source.name, source.iterations);
        engine.add_template(source, count)?;
    }

    let plan = engine.plan();
    let generators = engine.generators();

    let order: Vec<OrderedTemplate> = plan
        .order
        .iter()
        .map(|&i| OrderedTemplate {
            name: generators[i].name().to_string(),
            iterations: generators[i].iterations(),
            depends_on: generators[i]
                .producers()
                .into_iter()
                .map(str::to_string)
                .collect(),
        })
        .collect();

    if json {
        let output = OrderJsonOutput {
            order,
            unresolved: plan.unresolved,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if !plan.unresolved.is_empty() {
        eprintln!("\nWarning: unresolved template dependencies!");
        eprintln!("The following templates run last, without all producers ahead of them:");
        for unresolved in &plan.unresolved {
            eprintln!("  - {}", unresolved.describe());
        }
        eprintln!();
    }

    println!("Execution order ({} templates):", order.len());
    for (i, template) in order.iter().enumerate() {
        if template.depends_on.is_empty() {
            println!("  {}. {} ({} records)", i + 1, template.name, template.iterations);
        } else {
            println!(
                "  {}. {} ({} records, after {})",
                i + 1,
                template.name,
                template.iterations,
                template.depends_on.join(", ")
            );
        }
    }

    Ok(())
}
