//! Transformer generators: append one method to an existing class

use super::{Context, GenerationReport};
use crate::config::OptionBag;
use crate::descriptor::{MethodSpec, QualifiedTemplate, TransformerSpec};
use crate::error::{GeneratorError, Result};
use crate::fs::{read_to_string, write_string};
use unigen_ast::{parse, ClassMember, Decorator, Parameter, QualifiedName};

pub(super) async fn run(spec: &TransformerSpec, cx: &Context<'_>) -> Result<GenerationReport> {
    let target = cx.target_path(&spec.target)?;
    tracing::debug!("Transformer {} target: {}", cx.name, target.display());

    if !cx.fs.exists(&target).await {
        return Err(GeneratorError::TargetNotFound {
            path: target,
            declaration: None,
        });
    }

    let class = spec.class_name.render(cx.options)?;
    let member = method(&spec.method, cx.options)?;

    let source = read_to_string(cx.fs, &target).await?;
    let mut tree = parse(&source).map_err(|e| GeneratorError::from_ast(&target, e))?;

    // Locate before editing so a missing class never reaches the write
    tree.find_exported_class(&class)
        .map_err(|e| GeneratorError::from_ast(&target, e))?;

    let changed = tree
        .append_class_member(&class, &member)
        .map_err(|e| GeneratorError::from_ast(&target, e))?;

    let mut report = GenerationReport::default();
    if changed {
        write_string(cx.fs, &target, tree.print()).await?;
        tracing::info!("Added {} to {} in {}", member.name(), class, target.display());
        report.written.push(target);
    } else {
        tracing::debug!("{} already declares {}", class, member.name());
        report.unchanged.push(target);
    }
    Ok(report)
}

fn method(spec: &MethodSpec, options: &OptionBag) -> Result<ClassMember> {
    let decorator = match &spec.decorator {
        Some(decorator) => Some(Decorator {
            callee: decorator.callee.clone(),
            argument: decorator
                .argument
                .as_ref()
                .map(|argument| qualified(argument, options))
                .transpose()?,
        }),
        None => None,
    };

    let parameters = spec
        .parameters
        .iter()
        .map(|p| {
            Ok(Parameter {
                name: p.name.clone(),
                type_annotation: qualified(&p.type_annotation, options)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ClassMember::Method {
        name: spec.name.render(options)?,
        accessibility: spec.accessibility,
        decorator,
        parameters,
    })
}

fn qualified(template: &QualifiedTemplate, options: &OptionBag) -> Result<QualifiedName> {
    let name = template.name.render(options)?;
    Ok(match &template.namespace {
        Some(namespace) => QualifiedName::qualified(namespace.clone(), name),
        None => QualifiedName::local(name),
    })
}
