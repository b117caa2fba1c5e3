//! Producer generators: template in, new file out

use super::{Context, GenerationReport};
use crate::aggregation::{append_to_barrel, append_to_module_descriptor};
use crate::descriptor::{AggregationSpec, Overwrite, ProducerSpec, TemplateSpec};
use crate::error::{GeneratorError, Result};
use crate::find_up::{find_up, FindUp};
use crate::fs::write_string;
use crate::naming::parse_properties;
use crate::paths::relative_module_reference;
use std::path::{Path, PathBuf};
use unigen_ast::{parse, ImportSelector, SourceTree};

/// Resolved aggregation target, located before anything is written
enum Registration<'s> {
    Barrel(PathBuf),
    Module { path: PathBuf, property: &'s str },
}

pub(super) async fn run(spec: &ProducerSpec, cx: &Context<'_>) -> Result<GenerationReport> {
    let target = cx.target_path(&spec.target)?;
    tracing::debug!("Producer {} target: {}", cx.name, target.display());

    let template = match &spec.variant {
        Some(variant) if cx.options.contains(&variant.when_option) => &variant.template,
        _ => &spec.template,
    };
    let (source, declared) = render(template, &target, cx)?;

    let registration = match &spec.aggregation {
        Some(aggregation) => Some(locate(aggregation, &target, cx).await?),
        None => None,
    };

    let mut report = GenerationReport::default();
    if spec.overwrite == Overwrite::Keep && cx.fs.exists(&target).await {
        tracing::debug!("Keeping existing {}", target.display());
        report.unchanged.push(target.clone());
    } else {
        let dir = target.parent().unwrap_or(cx.paths.root());
        cx.fs
            .ensure_dir(dir)
            .await
            .map_err(|e| GeneratorError::io_error(dir, e))?;
        write_string(cx.fs, &target, &source).await?;
        tracing::info!("Wrote {}", target.display());
        report.written.push(target.clone());
    }

    let Some(registration) = registration else {
        return Ok(report);
    };
    let name = declared.ok_or_else(|| {
        GeneratorError::InvalidConfig(format!(
            "generator '{}' aggregates but its template declares no name",
            cx.name
        ))
    })?;

    let (aggregate, changed) = match registration {
        Registration::Barrel(index) => {
            let changed = append_to_barrel(cx.fs, &index, &name, &target).await?;
            (index, changed)
        }
        Registration::Module { path, property } => {
            let changed = append_to_module_descriptor(cx.fs, &path, property, &name, &target).await?;
            (path, changed)
        }
    };
    if changed {
        report.aggregated.push(aggregate);
    } else {
        report.unchanged.push(aggregate);
    }

    Ok(report)
}

/// Fill every slot of `template`; returns the text and the declared name
fn render(template: &TemplateSpec, target: &Path, cx: &Context<'_>) -> Result<(String, Option<String>)> {
    let ast = |e| GeneratorError::from_ast(target, e);
    let mut tree: SourceTree = parse(&template.source).map_err(ast)?;

    for slot in &template.imports {
        let reference = relative_module_reference(target, &cx.config_path(&slot.config_key)?);
        tree.replace_import_source(&ImportSelector::Source(slot.placeholder.clone()), &reference)
            .map_err(ast)?;
    }

    let declared = match &template.declaration {
        Some(slot) => {
            let name = slot.name.render(cx.options)?;
            tree.rename_declaration(&slot.placeholder, &name).map_err(ast)?;
            Some(name)
        }
        None => None,
    };

    let needs_class = template.superclass.is_some() || template.members.is_some();
    let class = match (&declared, needs_class) {
        (Some(name), _) => name.clone(),
        (None, false) => String::new(),
        (None, true) => {
            return Err(GeneratorError::InvalidConfig(format!(
                "generator '{}' edits a class but its template declares no name",
                cx.name
            )))
        }
    };

    if let Some(slot) = &template.superclass {
        let name = slot.name.render(cx.options)?;
        let expression = match &slot.namespace {
            Some(namespace) => format!("{namespace}.{name}"),
            None => name,
        };
        tree.replace_superclass(&class, &expression).map_err(ast)?;
    }

    if let Some(slot) = &template.members {
        if let Some(text) = cx.options.text(&slot.option) {
            for member in parse_properties(&slot.option, &text, &slot.default_type)? {
                tree.append_class_member(&class, &member).map_err(ast)?;
            }
        }
    }

    Ok((tree.into_source(), declared))
}

async fn locate<'s>(
    aggregation: &'s AggregationSpec,
    target: &Path,
    cx: &Context<'_>,
) -> Result<Registration<'s>> {
    let dir = target.parent().unwrap_or(cx.paths.root());
    match aggregation {
        AggregationSpec::Barrel { file_name } => Ok(Registration::Barrel(dir.join(file_name))),
        AggregationSpec::ModuleDescriptor { marker, property } => {
            let bounds = FindUp::new(dir, cx.paths.root());
            let path = find_up(cx.fs, marker, &bounds)
                .await
                .ok_or_else(|| GeneratorError::AggregationNotFound {
                    marker: marker.clone(),
                    start: bounds.start.clone(),
                    stop: bounds.stop.clone(),
                })?;
            Ok(Registration::Module { path, property })
        }
    }
}
