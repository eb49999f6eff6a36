//! Export the per-iteration cost trace to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts
//! (e.g. plotting the learning curve).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::AppError;
use crate::fit::Step;

/// Write one row per descent step: `iteration,w,b,cost`.
pub fn write_trace_csv(path: &Path, steps: &[Step]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create trace CSV '{}': {e}", path.display())))?;
    write_trace(BufWriter::new(file), steps)
        .map_err(|e| AppError::new(2, format!("Failed to write trace CSV '{}': {e}", path.display())))
}

fn write_trace<W: Write>(mut out: W, steps: &[Step]) -> std::io::Result<()> {
    writeln!(out, "iteration,w,b,cost")?;
    for s in steps {
        writeln!(out, "{},{:.10},{:.10},{:.10}", s.iteration, s.model.w, s.model.b, s.cost)?;
    }
    out.flush()
}
