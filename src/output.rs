//! Output Writer: writes one annotated row per input row.
//!
//! The destination is never silently overwritten; callers must pass an
//! explicit `overwrite` flag to replace an existing file.

use std::path::Path;

use crate::error::ClinVarError;
use crate::record::{LookupStatus, VariantResult};
use crate::Result;

/// Output column headers, in order.
pub const OUTPUT_HEADERS: [&str; 8] = [
    "Variation ID",
    "Accession",
    "Canonical SPDI",
    "Gene Symbol",
    "Chromosome",
    "ACMG Classification",
    "Molecular Consequence",
    "Status",
];

/// Write `results` to a new delimited file at `path`, one row per result in
/// input order. NotFound/Error rows carry their explanatory note in place of
/// the missing detail fields.
///
/// # Errors
///
/// [`ClinVarError::Io`] if `path` already exists and `overwrite` is false, or
/// if the destination cannot be created.
pub fn write_results(path: &Path, results: &[VariantResult], overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        return Err(ClinVarError::Io {
            msg: format!(
                "{} already exists (pass --overwrite to replace it)",
                path.display()
            ),
        });
    }

    let mut writer = csv::Writer::from_path(path).map_err(|e| ClinVarError::Io {
        msg: format!("Failed to create {}: {}", path.display(), e),
    })?;

    writer.write_record(OUTPUT_HEADERS)?;
    for result in results {
        writer.write_record(result_row(result))?;
    }
    writer.flush().map_err(|e| ClinVarError::Io {
        msg: format!("Failed to flush {}: {}", path.display(), e),
    })?;

    Ok(())
}

fn result_row(result: &VariantResult) -> [String; 8] {
    // Unresolved rows have all detail fields empty; surface the note where
    // the identifier would have been.
    let variation_id = if result.status == LookupStatus::Found {
        result.variation_id.clone()
    } else {
        result.note.clone()
    };

    [
        variation_id,
        result.accession.clone(),
        result.canonical_spdi.clone(),
        result.gene_symbol.clone(),
        result.chromosome.clone(),
        result.acmg_classification.clone(),
        result.molecular_consequence.clone(),
        result.status.to_string(),
    ]
}
