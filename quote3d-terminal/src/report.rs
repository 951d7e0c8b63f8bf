/// Coloured plain-text rendering of a quote
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use quote3d_core::QuoteSummary;
use std::io::Write;

/// Writes a [`QuoteSummary`] as a human-readable report
pub struct ReportPrinter {
    /// Emit ANSI colour codes
    color: bool,
}

impl ReportPrinter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn styled<W: Write>(&self, writer: &mut W, color: Color, text: &str) -> std::io::Result<()> {
        if self.color {
            writer.queue(SetForegroundColor(color))?;
            writer.queue(Print(text))?;
            writer.queue(ResetColor)?;
        } else {
            writer.queue(Print(text))?;
        }
        Ok(())
    }

    fn row<W: Write>(&self, writer: &mut W, label: &str, value: &str) -> std::io::Result<()> {
        self.styled(writer, Color::DarkGrey, &format!("{label:<16}"))?;
        self.styled(writer, Color::White, value)?;
        writer.queue(Print('\n'))?;
        Ok(())
    }

    pub fn print<W: Write>(&self, writer: &mut W, name: &str, summary: &QuoteSummary) -> std::io::Result<()> {
        self.styled(writer, Color::Yellow, &format!("Quote for {name}\n"))?;

        let e = &summary.bounding_box_extents;
        let unit = summary.extents_unit;
        self.row(writer, "Size", &format!("{:.2} x {:.2} x {:.2} {unit}", e.x, e.y, e.z))?;
        self.row(writer, "Volume", &format!("{:.3} cm³", summary.volume_cm3))?;
        if (summary.scale_percent - 100.0).abs() > f64::EPSILON {
            self.row(
                writer,
                "Scaled volume",
                &format!("{:.3} cm³ at {}%", summary.scaled_volume_cm3, summary.scale_percent),
            )?;
        }
        self.row(
            writer,
            "Material",
            &format!(
                "{} ({:.2} {}/cm³)",
                summary.material, summary.price_per_cm3, summary.currency
            ),
        )?;
        self.row(
            writer,
            "Unit price",
            &format!("{:.2} {}", summary.unit_price, summary.currency),
        )?;
        self.row(writer, "Quantity", &summary.quantity.to_string())?;
        self.styled(
            writer,
            Color::Cyan,
            &format!(
                "{:<16}{:.2} {}\n",
                "Estimated total", summary.total_price, summary.currency
            ),
        )?;
        self.styled(writer, Color::Red, &format!("\n{}\n", summary.disclaimer))?;

        writer.flush()
    }
}
