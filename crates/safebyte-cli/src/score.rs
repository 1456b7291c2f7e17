//! Batch scoring: read feature records from Parquet, predict, optionally write back.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use safebyte_ai::RiskModel;
use safebyte_ai::batch::scored_batch;
use tracing::info;

#[derive(Debug)]
pub struct ScoreSummary {
    pub rows: usize,
    /// `(risk level, count)` in the label encoder's order.
    pub by_label: Vec<(String, usize)>,
    pub output: Option<PathBuf>,
}

/// Score every row of `input`; when `output` is set, write the rows plus `risk_level` there.
pub fn run_score(
    model: &RiskModel,
    input: &Path,
    output: Option<&Path>,
) -> anyhow::Result<ScoreSummary> {
    let start = Instant::now();

    let (schema, batches) =
        read_parquet(input).with_context(|| format!("reading {}", input.display()))?;
    let labels = model.infer_batch(&batches).context("scoring feature records")?;

    if let Some(path) = output {
        let mut offset = 0;
        let mut scored = Vec::with_capacity(batches.len());
        for batch in &batches {
            let n = batch.num_rows();
            scored.push(scored_batch(batch, &labels[offset..offset + n])?);
            offset += n;
        }
        if scored.is_empty() {
            // No rows: still write a file carrying the scored schema.
            scored.push(scored_batch(&RecordBatch::new_empty(schema), &[])?);
        }
        write_parquet(path, &scored).with_context(|| format!("writing {}", path.display()))?;
    }

    let by_label = model
        .risk_levels()
        .iter()
        .map(|level| {
            let count = labels.iter().filter(|l| l.as_str() == level).count();
            (level.clone(), count)
        })
        .collect();

    info!(
        rows = labels.len(),
        elapsed_secs = start.elapsed().as_secs_f64(),
        "batch scoring complete"
    );

    Ok(ScoreSummary {
        rows: labels.len(),
        by_label,
        output: output.map(Path::to_path_buf),
    })
}

fn read_parquet(path: &Path) -> anyhow::Result<(SchemaRef, Vec<RecordBatch>)> {
    anyhow::ensure!(path.exists(), "parquet file not found: {}", path.display());
    let file = File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    let batches = builder.build()?.collect::<Result<Vec<_>, _>>()?;
    Ok((schema, batches))
}

fn write_parquet(path: &Path, batches: &[RecordBatch]) -> anyhow::Result<()> {
    let Some(first) = batches.first() else {
        return Ok(());
    };
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, first.schema(), None)?;
    for batch in batches {
        writer.write(batch)?;
    }
    writer.close()?;
    Ok(())
}
