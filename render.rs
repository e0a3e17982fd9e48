//! Text, SVG and PNG views of result rows.

use image::RgbImage;
use svg::node::element::{Rectangle, Text};
use svg::Document;

use crate::query::DisplayRow;

const HEADERS: [&str; 4] = ["Name", "HEX", "RGB", "HSL"];

/// Rows laid out as aligned columns under a header line.
pub fn format_table(rows: &[DisplayRow]) -> String {
    let cells: Vec<[String; 4]> = rows.iter()
        .map(|row| [row.name.clone(), row.hex.clone(), row.rgb_text(), row.hsl.to_string()])
        .collect();

    let mut widths = HEADERS.map(|header| header.chars().count());
    for line in &cells {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut table = format_line(&HEADERS.map(String::from), &widths);
    for line in &cells {
        table.push_str(&format_line(line, &widths));
    }
    table
}

fn format_line(cells: &[String; 4], widths: &[usize; 4]) -> String {
    let padded: Vec<String> = cells.iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    format!("{}\n", padded.join("  ").trim_end())
}

/// One swatch per row with the row's name and hex beside it, top to bottom.
pub fn swatch_svg(rows: &[DisplayRow]) -> Document {
    let row_height = 24;
    let height = row_height * rows.len().max(1);

    let mut document = Document::new()
        .set("viewBox", (0, 0, 400, height))
        .set("width", 400)
        .set("height", height)
        .add(Rectangle::new().set("width", 400).set("height", height).set("fill", "white"));

    for (i, row) in rows.iter().enumerate() {
        let y = i * row_height;
        document = document
            .add(Rectangle::new()
                .set("x", 2)
                .set("y", y + 2)
                .set("width", 40)
                .set("height", row_height - 4)
                .set("fill", row.hex.as_str()))
            .add(Text::new()
                .set("x", 50)
                .set("y", y + 17)
                .set("font-family", "sans-serif")
                .set("font-size", 14)
                .add(svg::node::Text::new(format!("{}  {}", row.name, row.hex))));
    }

    document
}

/// A horizontal strip of `cell` x `cell` squares, one per row. `None` when
/// there is nothing to draw.
pub fn swatch_strip(rows: &[DisplayRow], cell: u32) -> Option<RgbImage> {
    if rows.is_empty() || cell == 0 {
        return None;
    }

    let width = cell * rows.len() as u32;
    Some(RgbImage::from_fn(width, cell, |x, _| rows[(x / cell) as usize].color.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::Color;
    use crate::palette_index::PaletteEntry;
    use image::Rgb;

    fn rows() -> Vec<DisplayRow> {
        vec![
            DisplayRow::from_entry(&PaletteEntry::new("red", Color::new(255, 0, 0)), Some(0.0)),
            DisplayRow::from_entry(&PaletteEntry::new("crimson", Color::new(220, 20, 60)), Some(72.4)),
        ]
    }

    #[test]
    fn test_format_table() {
        let table = format_table(&rows());
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines, vec![
            "Name     HEX      RGB          HSL",
            "red      #ff0000  255, 0, 0    0, 100.0, 50.0",
            "crimson  #dc143c  220, 20, 60  348, 83.3, 47.1",
        ]);
    }

    #[test]
    fn test_format_table_without_rows() {
        assert_eq!(format_table(&[]), "Name  HEX  RGB  HSL\n");
    }

    #[test]
    fn test_swatch_svg() {
        let svg = swatch_svg(&rows()).to_string();
        assert!(svg.contains("fill=\"#ff0000\""));
        assert!(svg.contains("fill=\"#dc143c\""));
        assert!(svg.contains("crimson  #dc143c"));
    }

    #[test]
    fn test_swatch_strip() {
        let strip = swatch_strip(&rows(), 4).unwrap();
        assert_eq!(strip.dimensions(), (8, 4));
        assert_eq!(*strip.get_pixel(0, 0), Rgb([255, 0, 0]));
        assert_eq!(*strip.get_pixel(7, 3), Rgb([220, 20, 60]));
        assert!(swatch_strip(&[], 4).is_none());
    }
}
