use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use serde::Serialize;
use tracing::{info, info_span, warn};

use lens_cli::bundle::{Bundle, load_schema_set, parse_mapping_arg};
use lens_cli::summary::{print_mapping_report, schema_table};
use lens_ingest::{FileFormat, parse_str, read_dataset};
use lens_model::{ColumnMapping, DataKind, Dataset, SchemaSet};
use lens_transform::{
    Derived, MappingReport, ProfileOptions, transform, transform_kind, validate_mappings,
};

use crate::cli::{
    InputArgs, InputFormatArg, MappingArgs, ProfileArgs, ProfileLimitArgs, RunArgs, SchemasArgs,
    ValidateArgs,
};

pub fn run_schemas(args: &SchemasArgs) -> Result<()> {
    let schemas = load_schema_set(args.schemas.as_deref())?;
    println!("{}", schema_table(&schemas));
    Ok(())
}

pub fn run_transform(args: &RunArgs) -> Result<Derived> {
    let schemas = load_schema_set(args.mapping.schemas.as_deref())?;
    let bundle = load_bundle(&args.mapping)?;
    let dataset = load_input(&args.input)?;
    let span = info_span!("run", schema = %bundle.schema, rows = dataset.row_count());
    let _guard = span.enter();

    if !args.no_validate {
        let report = check_mappings(&schemas, &bundle, &dataset)?;
        if report.has_errors() {
            print_mapping_report(&report);
            bail!(
                "mappings for schema '{}' have {} errors",
                bundle.schema,
                report.error_count()
            );
        }
        if report.warning_count() > 0 {
            warn!(warnings = report.warning_count(), "mapping warnings");
        }
    }

    let derived = transform(
        &dataset,
        &schemas,
        &bundle.schema,
        &bundle.mappings,
        &profile_options(&args.limits),
    )
    .with_context(|| format!("run schema '{}'", bundle.schema))?;
    if let Some(path) = &args.output {
        write_json(path, &derived)?;
    }
    Ok(derived)
}

pub fn run_profile(args: &ProfileArgs) -> Result<Derived> {
    let mappings = parse_mapping_args(&args.map)?;
    let dataset = load_input(&args.input)?;
    let derived = transform_kind(
        DataKind::Tabular,
        &dataset,
        &mappings,
        &profile_options(&args.limits),
    )?;
    if let Some(path) = &args.output {
        write_json(path, &derived)?;
    }
    Ok(derived)
}

pub fn run_validate(args: &ValidateArgs) -> Result<MappingReport> {
    let schemas = load_schema_set(args.mapping.schemas.as_deref())?;
    let bundle = load_bundle(&args.mapping)?;
    let dataset = load_input(&args.input)?;
    check_mappings(&schemas, &bundle, &dataset)
}

fn check_mappings(
    schemas: &SchemaSet,
    bundle: &Bundle,
    dataset: &Dataset,
) -> Result<MappingReport> {
    let schema = schemas.get(&bundle.schema).ok_or_else(|| {
        let known: Vec<&str> = schemas.iter().map(|schema| schema.id.as_str()).collect();
        anyhow!(
            "unknown schema '{}' (available: {})",
            bundle.schema,
            known.join(", ")
        )
    })?;
    Ok(validate_mappings(schema, &bundle.mappings, &dataset.columns))
}

fn load_input(input: &InputArgs) -> Result<Dataset> {
    let dataset = match input.format {
        None => read_dataset(&input.path)
            .with_context(|| format!("read {}", input.path.display()))?,
        Some(format) => {
            let text = std::fs::read_to_string(&input.path)
                .with_context(|| format!("read {}", input.path.display()))?;
            parse_str(&text, file_format(format))
                .with_context(|| format!("parse {}", input.path.display()))?
        }
    };
    info!(
        rows = dataset.row_count(),
        columns = dataset.columns.len(),
        "loaded dataset"
    );
    Ok(dataset)
}

fn load_bundle(args: &MappingArgs) -> Result<Bundle> {
    if let Some(path) = &args.bundle {
        return Bundle::load(path);
    }
    let Some(schema) = &args.schema else {
        bail!("either --bundle or --schema is required");
    };
    Ok(Bundle::new(schema.clone(), parse_mapping_args(&args.map)?))
}

fn parse_mapping_args(args: &[String]) -> Result<Vec<ColumnMapping>> {
    args.iter()
        .map(String::as_str)
        .map(parse_mapping_arg)
        .collect()
}

fn profile_options(limits: &ProfileLimitArgs) -> ProfileOptions {
    ProfileOptions::default()
        .with_sample_size(limits.sample_size)
        .with_top_values_limit(limits.top_values_limit)
}

fn file_format(format: InputFormatArg) -> FileFormat {
    match format {
        InputFormatArg::Csv => FileFormat::Csv,
        InputFormatArg::Tsv => FileFormat::Tsv,
        InputFormatArg::Json => FileFormat::Json,
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if path == Path::new("-") {
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        serde_json::to_writer_pretty(&mut writer, value).context("write JSON to stdout")?;
        writeln!(writer)?;
        return Ok(());
    }
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("write {}", path.display()))?;
    writer.flush()?;
    info!(path = %path.display(), "wrote output");
    Ok(())
}
