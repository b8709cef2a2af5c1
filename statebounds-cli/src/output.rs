use comfy_table::{ContentArrangement, Table};
use statebounds_core::{GeometrySummary, PipelineReport, PolygonRecord};

/// One row of the `inspect` table.
pub struct RecordRow<'a> {
    pub record: &'a PolygonRecord,
    pub polygons: usize,
    pub rings: usize,
    pub accepted: bool,
}

/// Format records as a table.
pub fn format_records(rows: &[RecordRow<'_>]) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Name", "Geometry", "Polygons", "Rings", "Accepted"]);

    for (i, row) in rows.iter().enumerate() {
        table.add_row(vec![
            i.to_string(),
            row.record.name().to_string(),
            row.record.geometry_type().wkt_keyword().to_string(),
            row.polygons.to_string(),
            row.rings.to_string(),
            if row.accepted { "yes" } else { "no" }.to_string(),
        ]);
    }

    table.to_string()
}

/// Format a geometry summary as aligned key/value lines.
pub fn format_summary(summary: &GeometrySummary) -> String {
    let mut lines = vec![
        format!("Polygons:       {}", summary.polygons),
        format!("Rings:          {}", summary.rings),
        format!("Holes:          {}", summary.holes),
        format!("Coordinates:    {}", summary.coordinates),
    ];
    match &summary.bbox {
        Some(b) => lines.push(format!(
            "Bounds:         lng [{}, {}] lat [{}, {}]",
            b.min_lng, b.max_lng, b.min_lat, b.max_lat
        )),
        None => lines.push("Bounds:         (empty)".to_string()),
    }
    lines.push(format!("Planar area:    {:.6}", summary.area));
    if let Some((lat, lng)) = summary.centroid {
        lines.push(format!("Centroid:       {lat:.6}, {lng:.6}"));
    }
    lines.join("\n")
}

/// Format a pipeline report for the terminal.
pub fn format_report(report: &PipelineReport) -> String {
    let mut lines = vec![
        format!("Source:         {}", report.source),
        format!(
            "CRS:            {}",
            report.crs.as_deref().unwrap_or("(unknown)")
        ),
        format!("Records read:   {}", report.records_read),
        format!("Accepted:       {}", report.records_accepted),
    ];
    if !report.rejected_names.is_empty() {
        lines.push(format!(
            "Rejected names: {}",
            report.rejected_names.join(", ")
        ));
    }
    lines.push(format!(
        "Flattened:      {} multi-part record(s)",
        report.aggregate.flattened_records
    ));
    lines.push(format_summary(&report.summary));
    lines.push(format!(
        "Output:         {} ({} bytes, verified)",
        report.output.display(),
        report.bytes_written
    ));
    if let Some(preview) = &report.preview {
        lines.push(format!("Preview:        {}", preview.display()));
    }
    lines.join("\n")
}
