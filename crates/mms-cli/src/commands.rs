use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span};

use mms_output::{export_to_path, write_failure_report_to_path};
use mms_profiles::{ProfileRegistry, RegistryConfig};
use mms_transform::{BatchReport, MappingProfile};

use mms_cli::pipeline::{export_path, read_records, run_profiles};

use crate::cli::{TargetArgs, TransformArgs};
use crate::summary::{print_profile, print_profiles, print_vocabulary};

/// One profile applied to the input.
pub struct ProfileRun {
    pub marketplace: String,
    pub report: BatchReport,
    /// Export file written for this profile, if any.
    pub export: Option<PathBuf>,
}

/// Result of `mms transform`.
pub struct TransformRun {
    pub input: PathBuf,
    pub records: usize,
    pub batches: Vec<ProfileRun>,
    pub report_path: Option<PathBuf>,
}

impl TransformRun {
    pub fn failed_records(&self) -> usize {
        self.batches.iter().map(|batch| batch.report.failed).sum()
    }
}

pub fn load_registry(profiles_dir: Option<PathBuf>) -> Result<ProfileRegistry> {
    let config = RegistryConfig::from_env().with_profiles_dir(profiles_dir);
    ProfileRegistry::load(&config).context("load profile registry")
}

pub fn run_profiles_list(registry: &ProfileRegistry, marketplace: Option<&str>) -> Result<()> {
    let profiles: Vec<&MappingProfile> = match marketplace {
        Some(name) => registry.get_by_marketplace(name)?,
        None => registry.profiles().iter().collect(),
    };
    print_profiles(&profiles);
    Ok(())
}

pub fn run_show(registry: &ProfileRegistry, id: &str) -> Result<()> {
    print_profile(registry.get_by_id(id)?);
    Ok(())
}

pub fn run_vocab(registry: &ProfileRegistry, name: &str) -> Result<()> {
    let table = registry.vocabularies().get(name).ok_or_else(|| {
        let known: Vec<&str> = registry.vocabularies().names().collect();
        anyhow!(
            "unknown vocabulary table '{name}' (available: {})",
            known.join(", ")
        )
    })?;
    print_vocabulary(table);
    Ok(())
}

pub fn run_transform(registry: &ProfileRegistry, args: &TransformArgs) -> Result<TransformRun> {
    let span = info_span!("transform", input = %args.input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let profiles = select_profiles(registry, &args.target)?;
    let records = read_records(&args.input)?;
    info!(
        records = records.len(),
        profiles = profiles.len(),
        "Input loaded"
    );

    let reports = run_profiles(registry, &profiles, &records);

    let mut batches = Vec::with_capacity(reports.len());
    for (profile, report) in profiles.iter().zip(reports) {
        let export = match &args.output {
            Some(output) => {
                let path = export_path(output, profile.id(), profiles.len());
                export_to_path(&path, profile, &report)
                    .with_context(|| format!("write export {}", path.display()))?;
                Some(path)
            }
            None => None,
        };
        batches.push(ProfileRun {
            marketplace: profile.marketplace().to_string(),
            report,
            export,
        });
    }

    let report_path = match &args.report {
        Some(path) => {
            write_failure_report_to_path(path, batches.iter().map(|batch| &batch.report))
                .with_context(|| format!("write failure report {}", path.display()))?;
            Some(path.clone())
        }
        None => None,
    };

    info!(
        elapsed_ms = start.elapsed().as_millis(),
        "Transform finished"
    );
    Ok(TransformRun {
        input: args.input.clone(),
        records: records.len(),
        batches,
        report_path,
    })
}

fn select_profiles<'r>(
    registry: &'r ProfileRegistry,
    target: &TargetArgs,
) -> Result<Vec<&'r MappingProfile>> {
    match (&target.profile, &target.marketplace) {
        (Some(id), _) => Ok(vec![registry.get_by_id(id)?]),
        (None, Some(marketplace)) => Ok(registry.get_by_marketplace(marketplace)?),
        (None, None) => Err(anyhow!("either --profile or --marketplace is required")),
    }
}
