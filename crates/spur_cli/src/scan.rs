//! `spur scan` - compute and print property-access plans.
//!
//! 1. Load the project configuration
//! 2. Load the JSON type model
//! 3. Scan it with the default selector plus any `--strategy` identifiers
//! 4. Print the plans and a note per unregistered component

use std::path::Path;

use spur_access::{DefaultSelector, PropertyAccessPlan, Scanner};
use spur_config::PropertyOrder;
use spur_diagnostics::{Diagnostic, TerminalRenderer};
use spur_model::BootModel;

use crate::project::load_project;
use crate::{GlobalArgs, OrderArg, ReportFormat, ScanArgs};

/// Runs the `spur scan` command.
///
/// Returns exit code 0 on success, 1 if a property's access strategy could
/// not be resolved.
pub fn run(args: &ScanArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project = load_project(global)?;
    let order = match args.order {
        Some(OrderArg::Sorted) => PropertyOrder::Sorted,
        Some(OrderArg::Declared) => PropertyOrder::Declared,
        None => project.config.build.property_order,
    };

    let model_path = Path::new(&args.model);
    let mut model = BootModel::load(model_path)?;

    if !global.quiet && args.format == ReportFormat::Text {
        eprintln!("   Scanning {}", model_path.display());
    }

    let selector = args
        .strategies
        .iter()
        .fold(DefaultSelector::new(), |selector, id| selector.register(id));
    let renderer = TerminalRenderer::new(global.color);

    let output = match Scanner::new(&selector, order).scan(&mut model) {
        Ok(output) => output,
        Err(err) => {
            eprint!("{}", renderer.render(&err.to_diagnostic()));
            return Ok(1);
        }
    };
    let notes: Vec<Diagnostic> = output
        .components
        .iter()
        .map(|c| c.to_diagnostic())
        .collect();

    match args.format {
        ReportFormat::Text => {
            for plan in &output.plans {
                print!("{}", render_plan(plan));
            }
            if !global.quiet {
                for note in &notes {
                    eprint!("{}", renderer.render(note));
                }
                eprintln!(
                    "   Result: {} entity type(s), {} component(s)",
                    output.plans.len(),
                    output.components.len()
                );
            }
        }
        ReportFormat::Json => {
            let report = serde_json::json!({
                "plans": output.plans,
                "components": notes,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(0)
}

/// Formats one plan as an indented property table.
fn render_plan(plan: &PropertyAccessPlan) -> String {
    let mut out = format!("{} (entity {})\n", plan.type_name(), plan.entity_name());
    let width = plan.property_names().iter().map(|n| n.len()).max().unwrap_or(0);
    for (index, (name, strategy)) in plan.iter().enumerate() {
        out.push_str(&format!("  {index:>3}  {name:<width$}  {strategy}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use spur_common::TypeName;
    use spur_model::AccessStrategy;

    #[test]
    fn plan_table_lists_positions() {
        let plan = PropertyAccessPlan::new(
            TypeName::new("shop.Order"),
            "Order",
            PropertyOrder::Sorted,
            vec![
                AccessStrategy::Noop {
                    property: "total".to_string(),
                },
                AccessStrategy::Noop {
                    property: "id".to_string(),
                },
            ],
        );
        let text = render_plan(&plan);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "shop.Order (entity Order)");
        assert!(lines[1].trim_start().starts_with("0  id"));
        assert!(lines[2].trim_start().starts_with("1  total"));
    }

    #[test]
    fn unresolvable_model_exits_with_one() {
        let dir = tempfile::tempdir().unwrap();
        let model = dir.path().join("model.json");
        std::fs::write(
            &model,
            r#"{ "entities": [{
                "entity_name": "shop.Order",
                "mapped_type": { "name": "shop.Order" },
                "properties": [{ "name": "ghost" }]
            }] }"#,
        )
        .unwrap();

        let args = ScanArgs {
            model: model.display().to_string(),
            order: None,
            strategies: Vec::new(),
            format: ReportFormat::Json,
        };
        let global = GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config: Some(dir.path().display().to_string()),
        };
        assert_eq!(run(&args, &global).unwrap(), 1);
    }
}
