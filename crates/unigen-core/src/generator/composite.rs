//! Composite generators: ordered sub-generator steps
//!
//! Steps run strictly in sequence. A failing step aborts the composite but
//! files written by earlier steps stay on disk.

use super::{GenerationReport, Generator};
use crate::config::OptionBag;
use crate::descriptor::CompositeSpec;
use crate::error::Result;

pub(super) async fn run(
    spec: &CompositeSpec,
    steps: &mut [Generator],
    options: &OptionBag,
) -> Result<GenerationReport> {
    let mut report = GenerationReport::default();

    for (step, generator) in spec.steps.iter().zip(steps.iter_mut()) {
        let mut derived = options.clone();
        for mapping in &step.options {
            if let Some(value) = options.get(&mapping.from) {
                derived.insert(mapping.to.clone(), value.clone());
            }
        }

        tracing::debug!("Composite step {}", generator.name());
        generator.set_option(derived)?;
        report.merge(Box::pin(generator.generate()).await?);
    }

    Ok(report)
}
