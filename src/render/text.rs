//! Plain-text rendering for terminals.

use std::io::Write;

use super::{plain_number, RenderResult, Renderer, EMPTY_PLACEHOLDER};
use crate::page::PageId;
use crate::query::{
    Cell, CorrelationMatrix, Distribution, Histogram, ScatterSeries, Series, Table,
};

const BAR_WIDTH: f64 = 40.0;

/// Writes each widget as a short block of text.
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn placeholder(&mut self) -> RenderResult<()> {
        writeln!(self.out, "  ({EMPTY_PLACEHOLDER})")?;
        Ok(())
    }
}

fn label_width<'a>(labels: impl Iterator<Item = &'a str>) -> usize {
    labels.map(|l| l.chars().count()).max().unwrap_or(0)
}

fn cell_text(cell: &Cell) -> String {
    match cell {
        Cell::Text(s) => s.clone(),
        Cell::Integer(n) => n.to_string(),
        Cell::Number(n) => plain_number(*n),
        Cell::Null => "-".to_string(),
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn begin_page(&mut self, page: PageId) -> RenderResult<()> {
        writeln!(self.out, "== {} ==", page.title())?;
        Ok(())
    }

    fn end_page(&mut self, data_points: usize) -> RenderResult<()> {
        writeln!(self.out, "Data Points: {data_points}")?;
        Ok(())
    }

    fn metric(&mut self, label: &str, value: &str) -> RenderResult<()> {
        writeln!(self.out, "{label}: {value}")?;
        Ok(())
    }

    fn bar(&mut self, title: &str, series: &Series) -> RenderResult<()> {
        writeln!(self.out, "\n{title}")?;
        if series.is_empty() {
            return self.placeholder();
        }
        let width = label_width(series.labels.iter().map(String::as_str));
        let peak = series.values.iter().copied().fold(0.0_f64, f64::max);
        for (label, value) in series.iter() {
            let len = if peak > 0.0 {
                ((value / peak) * BAR_WIDTH).round().max(0.0) as usize
            } else {
                0
            };
            writeln!(
                self.out,
                "  {label:<width$}  {:<bar$}  {}",
                "#".repeat(len),
                plain_number(value),
                bar = BAR_WIDTH as usize
            )?;
        }
        Ok(())
    }

    fn pie(&mut self, title: &str, series: &Series) -> RenderResult<()> {
        writeln!(self.out, "\n{title}")?;
        let total: f64 = series.values.iter().sum();
        if series.is_empty() || total == 0.0 {
            return self.placeholder();
        }
        let width = label_width(series.labels.iter().map(String::as_str));
        for (label, value) in series.iter() {
            writeln!(
                self.out,
                "  {label:<width$}  {}  ({:.1}%)",
                plain_number(value),
                value / total * 100.0
            )?;
        }
        Ok(())
    }

    fn histogram(&mut self, title: &str, histogram: &Histogram) -> RenderResult<()> {
        writeln!(self.out, "\n{title}")?;
        if histogram.sample.is_empty() {
            return self.placeholder();
        }
        writeln!(
            self.out,
            "  n = {}, {} bins",
            histogram.sample.len(),
            histogram.bin_count
        )?;
        for bin in histogram.bins.iter().filter(|b| b.count > 0) {
            writeln!(
                self.out,
                "  [{}, {}]  {}",
                plain_number(bin.start),
                plain_number(bin.end),
                bin.count
            )?;
        }
        Ok(())
    }

    fn boxplot(&mut self, title: &str, groups: &[Distribution]) -> RenderResult<()> {
        writeln!(self.out, "\n{title}")?;
        if groups.iter().all(|g| g.sample.is_empty()) {
            return self.placeholder();
        }
        let width = label_width(groups.iter().map(|g| g.label.as_str()));
        for group in groups {
            let label = &group.label;
            match &group.summary {
                Some(s) => writeln!(
                    self.out,
                    "  {label:<width$}  whiskers {}..{}  box {}|{}|{}  outliers {}",
                    plain_number(s.lower_whisker),
                    plain_number(s.upper_whisker),
                    plain_number(s.q1),
                    plain_number(s.median),
                    plain_number(s.q3),
                    s.outliers.len()
                )?,
                None => writeln!(self.out, "  {label:<width$}  (no values)")?,
            }
        }
        Ok(())
    }

    fn heatmap(&mut self, title: &str, matrix: &CorrelationMatrix) -> RenderResult<()> {
        writeln!(self.out, "\n{title}")?;
        let width = label_width(matrix.labels.iter().map(String::as_str));
        for (label, row) in matrix.labels.iter().zip(&matrix.values) {
            let cells: Vec<String> = row
                .iter()
                .map(|v| match v {
                    Some(r) => format!("{r:>6.2}"),
                    None => format!("{:>6}", "-"),
                })
                .collect();
            writeln!(self.out, "  {label:<width$}  {}", cells.join(" "))?;
        }
        Ok(())
    }

    fn scatter(&mut self, title: &str, points: &ScatterSeries) -> RenderResult<()> {
        writeln!(self.out, "\n{title}")?;
        if points.is_empty() {
            return self.placeholder();
        }
        for i in 0..points.len() {
            writeln!(
                self.out,
                "  {} ({}): x={} y={} size={}",
                points.hover[i],
                points.group[i],
                plain_number(points.x[i]),
                plain_number(points.y[i]),
                plain_number(points.size[i])
            )?;
        }
        Ok(())
    }

    fn table(&mut self, title: &str, table: &Table) -> RenderResult<()> {
        writeln!(self.out, "\n{title}")?;
        if table.is_empty() {
            return self.placeholder();
        }

        let rows: Vec<Vec<String>> = table
            .rows
            .iter()
            .map(|r| r.iter().map(cell_text).collect())
            .collect();
        let widths: Vec<usize> = table
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| {
                rows.iter()
                    .map(|r| r[i].chars().count())
                    .chain(std::iter::once(c.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let line = |cells: Vec<&str>| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(c, &w)| format!("{c:<w$}"))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        writeln!(self.out, "  {}", line(table.columns.iter().map(String::as_str).collect()))?;
        for row in &rows {
            writeln!(self.out, "  {}", line(row.iter().map(String::as_str).collect()))?;
        }
        Ok(())
    }
}
