//! Input Reader: loads gene/variant pairs from a tabular file.
//!
//! The input is a delimited text file with a header row. The delimiter is
//! inferred from the extension (`.tsv`/`.txt` are tab-separated, anything
//! else comma-separated). Rows with an empty gene or variant cell are skipped
//! with a warning rather than failing the run.

use std::path::Path;

use crate::error::ClinVarError;
use crate::record::VariantQuery;
use crate::Result;

/// Default name of the gene column.
pub const DEFAULT_GENE_COLUMN: &str = "Gene";

/// Default name of the variant column.
pub const DEFAULT_VARIANT_COLUMN: &str = "Variant";

/// UTF-8 BOM, present on the first header cell of files exported from Excel.
const UTF8_BOM: &str = "\u{feff}";

/// Strip a UTF-8 BOM from the beginning of a string if present.
pub fn strip_bom(s: &str) -> &str {
    s.strip_prefix(UTF8_BOM).unwrap_or(s)
}

/// Pick the field delimiter from the file extension.
fn delimiter_for(path: &Path) -> u8 {
    match path.extension().and_then(|e| e.to_str()) {
        Some("tsv") | Some("txt") => b'\t',
        _ => b',',
    }
}

/// Read the ordered sequence of queries from `path`.
///
/// # Errors
///
/// - [`ClinVarError::Io`] if the file cannot be opened.
/// - [`ClinVarError::FileFormat`] if a required column is missing from the
///   header row.
pub fn read_queries(
    path: &Path,
    gene_column: &str,
    variant_column: &str,
) -> Result<Vec<VariantQuery>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter_for(path))
        .flexible(true)
        .from_path(path)
        .map_err(|e| ClinVarError::Io {
            msg: format!("Failed to open {}: {}", path.display(), e),
        })?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ClinVarError::Io {
            msg: format!("Failed to read header row: {}", e),
        })?
        .iter()
        .map(|h| strip_bom(h).trim().to_string())
        .collect();

    let gene_idx = column_index(&headers, gene_column)
        .ok_or_else(|| missing_column(gene_column, &headers))?;
    let variant_idx = column_index(&headers, variant_column)
        .ok_or_else(|| missing_column(variant_column, &headers))?;

    let mut queries = Vec::new();
    for (row_num, record) in reader.records().enumerate() {
        let record = record.map_err(|e| ClinVarError::Io {
            msg: format!("Failed to read row {}: {}", row_num + 2, e),
        })?;

        let gene = record.get(gene_idx).unwrap_or("").trim();
        let variant = record.get(variant_idx).unwrap_or("").trim();

        if gene.is_empty() || variant.is_empty() {
            tracing::warn!(
                row = row_num + 2,
                "skipping row with empty gene or variant field"
            );
            continue;
        }

        queries.push(VariantQuery::new(gene, variant));
    }

    Ok(queries)
}

/// Find a column by name, case-insensitively.
fn column_index(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h.eq_ignore_ascii_case(name))
}

fn missing_column(column: &str, headers: &[String]) -> ClinVarError {
    ClinVarError::FileFormat {
        column: column.to_string(),
        found: headers.join(", "),
    }
}
