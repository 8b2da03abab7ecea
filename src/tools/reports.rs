//! Report generation tools
//!
//! Render calculator results as a Markdown summary or a PDF report with an
//! activity-level calorie chart.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::*;
use printpdf::image_crate::{DynamicImage, ImageFormat, RgbImage};
use serde::Serialize;
use thiserror::Error;

use crate::models::{
    ActivityLevel, BmiClass, CalorieGoal, CanonicalMeasurement, MacroPlans, ResultsRecord,
    UnitSystem,
};
use crate::normalizer::kg_to_display_lbs;
use crate::tools::calculator::goal_targets;

// ============================================================================
// Color Constants (RGB 0-255)
// ============================================================================

const COLOR_TITLE: (u8, u8, u8) = (22, 101, 52);        // Dark green
const COLOR_ACCENT: (u8, u8, u8) = (22, 163, 74);       // Green
const COLOR_UNDERWEIGHT: (u8, u8, u8) = (0, 112, 192);  // Blue
const COLOR_OVERWEIGHT: (u8, u8, u8) = (255, 165, 0);   // Orange
const COLOR_OBESE: (u8, u8, u8) = (255, 0, 0);          // Red
const COLOR_BLACK: (u8, u8, u8) = (0, 0, 0);
const COLOR_GRAY: (u8, u8, u8) = (128, 128, 128);

/// Shown when no body fat percentage was entered
pub const BODY_FAT_HINT: &str =
    "You left the body fat percentage field blank. We can estimate TDEE more accurately with this data.";

// ============================================================================
// Errors and Response Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Chart generation failed: {0}")]
    Chart(String),

    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
pub struct ExportMarkdownResponse {
    pub markdown: String,
    pub generated_at: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateReportResponse {
    pub success: bool,
    pub file_path: String,
    pub bmr: i64,
    pub tdee: i64,
    pub message: String,
}

// ============================================================================
// Display Formatting
// ============================================================================

/// Weight in the user's unit system: "80 kg" or "176 lbs"
pub fn format_weight(kg: f64, unit_system: UnitSystem) -> String {
    match unit_system {
        UnitSystem::Imperial => format!("{} lbs", kg_to_display_lbs(kg)),
        UnitSystem::Metric => format!("{} kg", kg),
    }
}

/// Height as the user entered it
///
/// Imperial records show the retained feet and inches, not a conversion back
/// from centimeters.
pub fn format_height(m: &CanonicalMeasurement) -> String {
    match (m.unit_system, m.height_feet) {
        (UnitSystem::Imperial, Some(feet)) => {
            format!("{}' {}\"", feet, m.height_inches.unwrap_or(0.0))
        }
        _ => format!("{} cm", m.height_cm),
    }
}

/// Body weight as the user entered it
pub fn format_body_weight(m: &CanonicalMeasurement) -> String {
    match (m.unit_system, m.weight_lbs) {
        (UnitSystem::Imperial, Some(lbs)) => format!("{} lbs", lbs),
        _ => format!("{} kg", m.weight_kg),
    }
}

fn bmi_color(class: BmiClass) -> (u8, u8, u8) {
    match class {
        BmiClass::Underweight => COLOR_UNDERWEIGHT,
        BmiClass::NormalWeight => COLOR_ACCENT,
        BmiClass::Overweight => COLOR_OVERWEIGHT,
        BmiClass::Obese => COLOR_OBESE,
    }
}

// ============================================================================
// Markdown
// ============================================================================

/// Markdown summary of a results record
pub fn results_markdown(m: &CanonicalMeasurement, r: &ResultsRecord) -> String {
    let mut markdown = String::new();

    markdown.push_str("# TDEE Calculator Results\n\n");

    // Stats
    markdown.push_str("## Your Stats\n\n");
    markdown.push_str(&format!("- **Age:** {}\n", m.age_years));
    markdown.push_str(&format!("- **Gender:** {}\n", m.gender.display_name()));
    markdown.push_str(&format!("- **Height:** {}\n", format_height(m)));
    markdown.push_str(&format!("- **Weight:** {}\n", format_body_weight(m)));
    if let Some(body_fat) = m.body_fat_percentage {
        markdown.push_str(&format!("- **Body Fat:** {}%\n", body_fat));
    }
    markdown.push_str(&format!(
        "- **Activity:** {} ({})\n\n",
        m.activity_level.display_name(),
        m.activity_level.description()
    ));

    if m.body_fat_percentage.is_none() {
        markdown.push_str(&format!("> {}\n\n", BODY_FAT_HINT));
    }

    // Headline numbers
    markdown.push_str("## Summary\n\n");
    markdown.push_str(&format!(
        "- **Basal Metabolic Rate:** {} calories/day ({})\n",
        r.bmr,
        r.bmr_formula.display_name()
    ));
    markdown.push_str(&format!(
        "- **Maintenance Calories (TDEE):** {} calories/day\n",
        r.tdee
    ));
    markdown.push_str(&format!(
        "- **BMI:** {} ({})\n\n",
        r.bmi,
        r.bmi_classification.label()
    ));

    // Activity table
    markdown.push_str("## Calories by Activity Level\n\n");
    markdown.push_str("| Activity Level | Description | Calories/day |\n");
    markdown.push_str("|----------------|-------------|--------------|\n");
    for row in &r.activity_level_calories {
        let marker = if row.level == m.activity_level { " **(you)**" } else { "" };
        markdown.push_str(&format!(
            "| {}{} | {} | {} |\n",
            row.label, marker, row.description, row.calories
        ));
    }
    markdown.push('\n');

    // Ideal weight
    markdown.push_str("## Ideal Weight\n\n");
    markdown.push_str(&format!(
        "**Range:** {} - {}\n\n",
        format_weight(r.ideal_weight_range.min as f64, m.unit_system),
        format_weight(r.ideal_weight_range.max as f64, m.unit_system)
    ));
    markdown.push_str("| Formula | Ideal Weight |\n");
    markdown.push_str("|---------|--------------|\n");
    for estimate in &r.ideal_weight_formulas {
        markdown.push_str(&format!(
            "| {} | {} |\n",
            estimate.name,
            format_weight(estimate.value as f64, m.unit_system)
        ));
    }
    markdown.push('\n');

    // BMI classes
    markdown.push_str("## BMI Classification\n\n");
    markdown.push_str("| Classification | BMI Range |\n");
    markdown.push_str("|----------------|-----------|\n");
    for class in [
        BmiClass::Underweight,
        BmiClass::NormalWeight,
        BmiClass::Overweight,
        BmiClass::Obese,
    ] {
        let label = if class == r.bmi_classification {
            format!("**{}**", class.label())
        } else {
            class.label().to_string()
        };
        markdown.push_str(&format!("| {} | {} |\n", label, class.description()));
    }
    markdown.push('\n');

    markdown.push_str("## Maximum Muscular Potential\n\n");
    markdown.push_str(&format!(
        "**{}** at 10-12% body fat for men, 18-20% for women (FFMI based).\n\n",
        format_weight(r.muscular_potential_kg as f64, m.unit_system)
    ));

    // Macros per goal
    markdown.push_str("## Macronutrients\n\n");
    for target in goal_targets(r) {
        markdown.push_str(&format!(
            "### {} ({} calories/day)\n\n",
            target.label, target.calories
        ));
        push_macro_table(&mut markdown, &target.macros);
    }

    markdown
}

fn push_macro_table(markdown: &mut String, plans: &MacroPlans) {
    markdown.push_str("| Diet | Protein | Carbs | Fat |\n");
    markdown.push_str("|------|---------|-------|-----|\n");
    for (name, split) in [
        ("Moderate Carb (30/40/30)", plans.moderate),
        ("Lower Carb (35/25/40)", plans.lower),
        ("Higher Carb (25/55/20)", plans.higher),
    ] {
        markdown.push_str(&format!(
            "| {} | {}g | {}g | {}g |\n",
            name, split.protein_g, split.carbs_g, split.fat_g
        ));
    }
    markdown.push('\n');
}

/// Export results as Markdown
pub fn export_results_markdown(
    m: &CanonicalMeasurement,
    r: &ResultsRecord,
) -> Result<ExportMarkdownResponse, String> {
    let generated_at = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    let mut markdown = results_markdown(m, r);
    markdown.push_str("---\n\n");
    markdown.push_str(&format!("*Generated {}*\n", generated_at));

    tracing::info!(bytes = markdown.len(), "Exported results markdown");
    Ok(ExportMarkdownResponse {
        markdown,
        generated_at,
    })
}

// ============================================================================
// Chart Generation (plotters)
// ============================================================================

/// Activity-level calorie bar chart as PNG bytes
///
/// The bar for `selected` is drawn in the accent color.
pub fn generate_activity_chart(
    r: &ResultsRecord,
    selected: ActivityLevel,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, ReportError> {
    use plotters::prelude::*;
    use plotters_bitmap::BitMapBackend;

    let chart_err = |e: &dyn std::fmt::Display| ReportError::Chart(e.to_string());

    let rows = &r.activity_level_calories;
    if rows.is_empty() {
        return Err(ReportError::Chart("No data to chart".to_string()));
    }

    let mut buffer = vec![0u8; (width * height * 3) as usize];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| chart_err(&e))?;

        let y_max = rows.iter().map(|row| row.calories).max().unwrap_or(0);
        // Headroom above the tallest bar
        let y_max = ((y_max as f64 * 1.1) / 100.0).ceil() as i64 * 100;

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d((0..rows.len() as i32).into_segmented(), 0i64..y_max)
            .map_err(|e| chart_err(&e))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(rows.len())
            .x_label_formatter(&|x| match x {
                SegmentValue::CenterOf(i) if *i >= 0 && (*i as usize) < rows.len() => {
                    rows[*i as usize].label.clone()
                }
                _ => String::new(),
            })
            .y_desc("calories/day")
            .draw()
            .map_err(|e| chart_err(&e))?;

        let base = RGBColor(134, 239, 172);
        let accent = RGBColor(COLOR_ACCENT.0, COLOR_ACCENT.1, COLOR_ACCENT.2);

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(base.filled())
                    .margin(15)
                    .data(
                        rows.iter()
                            .enumerate()
                            .filter(|(_, row)| row.level != selected)
                            .map(|(i, row)| (i as i32, row.calories)),
                    ),
            )
            .map_err(|e| chart_err(&e))?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(accent.filled())
                    .margin(15)
                    .data(
                        rows.iter()
                            .enumerate()
                            .filter(|(_, row)| row.level == selected)
                            .map(|(i, row)| (i as i32, row.calories)),
                    ),
            )
            .map_err(|e| chart_err(&e))?;

        root.present().map_err(|e| chart_err(&e))?;
    }

    // Convert RGB buffer to PNG
    let img = RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| ReportError::Chart("Failed to create image from buffer".to_string()))?;

    let mut png_bytes = Vec::new();
    let dyn_img = DynamicImage::ImageRgb8(img);
    dyn_img
        .write_to(&mut std::io::Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(|e| chart_err(&e))?;

    Ok(png_bytes)
}

// ============================================================================
// PDF Generation Helper Functions
// ============================================================================

fn rgb_to_printpdf(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb(Rgb::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        None,
    ))
}

fn add_text(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    x: Mm,
    y: Mm,
    size: f32,
    color: (u8, u8, u8),
) {
    layer.set_fill_color(rgb_to_printpdf(color.0, color.1, color.2));
    layer.use_text(text, size, x, y, font);
}

fn add_line(
    layer: &PdfLayerReference,
    x1: Mm,
    y1: Mm,
    x2: Mm,
    y2: Mm,
    color: (u8, u8, u8),
    width: f32,
) {
    layer.set_outline_color(rgb_to_printpdf(color.0, color.1, color.2));
    layer.set_outline_thickness(width);

    let line = Line {
        points: vec![
            (Point::new(x1, y1), false),
            (Point::new(x2, y2), false),
        ],
        is_closed: false,
    };
    layer.add_line(line);
}

/// Timestamped report file name under `dir`
pub fn default_report_path(dir: &Path) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    dir.join(format!("tdee_report_{}.pdf", stamp))
}

// ============================================================================
// PDF Report Generation
// ============================================================================

/// Write a PDF results report to `output_path`
pub fn generate_results_report(
    m: &CanonicalMeasurement,
    r: &ResultsRecord,
    output_path: &Path,
) -> Result<GenerateReportResponse, ReportError> {
    let pdf_err = |e: &dyn std::fmt::Display| ReportError::Pdf(e.to_string());

    // Page 1 - stats and body composition
    let (doc, page1, layer1) = PdfDocument::new(
        "TDEE Calculator Results",
        Mm(215.9), // Letter width
        Mm(279.4), // Letter height
        "Layer 1",
    );

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| pdf_err(&e))?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| pdf_err(&e))?;

    let layer = doc.get_page(page1).get_layer(layer1);

    let page_height = 279.4;
    let margin_left = 15.0;
    let col2 = 110.0;
    let mut y = page_height - 20.0;

    add_text(&layer, &font_bold, "TDEE Calculator Results", Mm(margin_left), Mm(y), 18.0, COLOR_TITLE);
    y -= 8.0;
    let now = chrono::Local::now().format("%Y-%m-%d").to_string();
    add_text(&layer, &font, &format!("Generated: {}", now), Mm(margin_left), Mm(y), 10.0, COLOR_GRAY);
    y -= 6.0;
    add_line(&layer, Mm(margin_left), Mm(y), Mm(200.0), Mm(y), COLOR_GRAY, 0.5);
    y -= 8.0;

    // Stats
    add_text(&layer, &font_bold, "Your Stats", Mm(margin_left), Mm(y), 12.0, COLOR_BLACK);
    y -= 7.0;
    add_text(&layer, &font, &format!("Age: {}", m.age_years), Mm(margin_left), Mm(y), 10.0, COLOR_BLACK);
    add_text(&layer, &font, &format!("Gender: {}", m.gender.display_name()), Mm(col2), Mm(y), 10.0, COLOR_BLACK);
    y -= 6.0;
    add_text(&layer, &font, &format!("Height: {}", format_height(m)), Mm(margin_left), Mm(y), 10.0, COLOR_BLACK);
    add_text(&layer, &font, &format!("Weight: {}", format_body_weight(m)), Mm(col2), Mm(y), 10.0, COLOR_BLACK);
    y -= 6.0;
    add_text(
        &layer,
        &font,
        &format!("Activity: {} ({})", m.activity_level.display_name(), m.activity_level.description()),
        Mm(margin_left),
        Mm(y),
        10.0,
        COLOR_BLACK,
    );
    if let Some(body_fat) = m.body_fat_percentage {
        add_text(&layer, &font, &format!("Body Fat: {}%", body_fat), Mm(col2), Mm(y), 10.0, COLOR_BLACK);
    }
    y -= 6.0;
    if m.body_fat_percentage.is_none() {
        add_text(&layer, &font, BODY_FAT_HINT, Mm(margin_left), Mm(y), 8.0, COLOR_UNDERWEIGHT);
        y -= 6.0;
    }
    y -= 4.0;

    // Summary
    add_text(&layer, &font_bold, "Summary", Mm(margin_left), Mm(y), 12.0, COLOR_BLACK);
    y -= 7.0;
    add_text(
        &layer,
        &font,
        &format!("Basal Metabolic Rate: {} calories/day ({})", r.bmr, r.bmr_formula.display_name()),
        Mm(margin_left),
        Mm(y),
        10.0,
        COLOR_BLACK,
    );
    y -= 6.0;
    add_text(
        &layer,
        &font_bold,
        &format!("Maintenance Calories (TDEE): {} calories/day", r.tdee),
        Mm(margin_left),
        Mm(y),
        11.0,
        COLOR_ACCENT,
    );
    y -= 6.0;
    add_text(
        &layer,
        &font,
        &format!("BMI: {} ({})", r.bmi, r.bmi_classification.label()),
        Mm(margin_left),
        Mm(y),
        10.0,
        bmi_color(r.bmi_classification),
    );
    y -= 12.0;

    // Activity table
    add_text(&layer, &font_bold, "Calories by Activity Level", Mm(margin_left), Mm(y), 12.0, COLOR_BLACK);
    y -= 7.0;
    let col_widths = [50.0, 60.0, 30.0];
    let headers = ["Activity Level", "Description", "Calories/day"];
    let mut col_x = margin_left;
    for (i, header) in headers.iter().enumerate() {
        add_text(&layer, &font_bold, header, Mm(col_x), Mm(y), 9.0, COLOR_BLACK);
        col_x += col_widths[i];
    }
    y -= 5.5;
    for row in &r.activity_level_calories {
        let (row_font, row_color) = if row.level == m.activity_level {
            (&font_bold, COLOR_ACCENT)
        } else {
            (&font, COLOR_BLACK)
        };
        let values = [row.label.clone(), row.description.clone(), row.calories.to_string()];
        col_x = margin_left;
        for (i, value) in values.iter().enumerate() {
            add_text(&layer, row_font, value, Mm(col_x), Mm(y), 9.0, row_color);
            col_x += col_widths[i];
        }
        y -= 5.5;
    }
    y -= 6.0;

    // Ideal weight
    add_text(&layer, &font_bold, "Ideal Weight", Mm(margin_left), Mm(y), 12.0, COLOR_BLACK);
    add_text(
        &layer,
        &font,
        &format!(
            "Range: {} - {}",
            format_weight(r.ideal_weight_range.min as f64, m.unit_system),
            format_weight(r.ideal_weight_range.max as f64, m.unit_system)
        ),
        Mm(col2),
        Mm(y),
        10.0,
        COLOR_ACCENT,
    );
    y -= 7.0;
    for estimate in &r.ideal_weight_formulas {
        add_text(&layer, &font, &estimate.name, Mm(margin_left), Mm(y), 9.0, COLOR_BLACK);
        add_text(
            &layer,
            &font,
            &format_weight(estimate.value as f64, m.unit_system),
            Mm(col2),
            Mm(y),
            9.0,
            COLOR_BLACK,
        );
        y -= 5.5;
    }
    y -= 6.0;

    // BMI classes
    add_text(&layer, &font_bold, "BMI Classification", Mm(margin_left), Mm(y), 12.0, COLOR_BLACK);
    y -= 7.0;
    for class in [
        BmiClass::Underweight,
        BmiClass::NormalWeight,
        BmiClass::Overweight,
        BmiClass::Obese,
    ] {
        let row_font = if class == r.bmi_classification { &font_bold } else { &font };
        add_text(&layer, row_font, class.label(), Mm(margin_left), Mm(y), 9.0, bmi_color(class));
        add_text(&layer, row_font, class.description(), Mm(col2), Mm(y), 9.0, COLOR_BLACK);
        y -= 5.5;
    }
    y -= 6.0;

    add_text(&layer, &font_bold, "Maximum Muscular Potential", Mm(margin_left), Mm(y), 12.0, COLOR_BLACK);
    add_text(
        &layer,
        &font,
        &format!(
            "{} at 10-12% body fat for men, 18-20% for women",
            format_weight(r.muscular_potential_kg as f64, m.unit_system)
        ),
        Mm(col2),
        Mm(y),
        10.0,
        COLOR_BLACK,
    );

    // ========================================================================
    // Page 2 - chart and macros
    // ========================================================================
    let (page2, layer2) = doc.add_page(Mm(215.9), Mm(279.4), "Macros Page");
    let layer2 = doc.get_page(page2).get_layer(layer2);
    let mut y2 = page_height - 20.0;

    add_text(&layer2, &font_bold, "Calories by Activity Level", Mm(margin_left), Mm(y2), 16.0, COLOR_TITLE);
    y2 -= 8.0;

    // 900x360 pixels at 120 DPI = ~190mm x 76mm
    match generate_activity_chart(r, m.activity_level, 900, 360) {
        Ok(png_bytes) => {
            let dynamic_image = printpdf::image_crate::load_from_memory(&png_bytes)
                .map_err(|e| pdf_err(&e))?;
            let pdf_image = Image::from_dynamic_image(&dynamic_image);

            let transform = ImageTransform {
                translate_x: Some(Mm(margin_left)),
                translate_y: Some(Mm(y2 - 78.0)),
                dpi: Some(120.0),
                ..Default::default()
            };

            pdf_image.add_to_layer(layer2.clone(), transform);
            y2 -= 84.0;
        }
        Err(e) => {
            tracing::warn!(error = %e, "Chart omitted from report");
            add_text(&layer2, &font, &e.to_string(), Mm(margin_left), Mm(y2 - 10.0), 9.0, COLOR_OBESE);
            y2 -= 15.0;
        }
    }

    add_text(&layer2, &font_bold, "Macronutrients", Mm(margin_left), Mm(y2), 16.0, COLOR_TITLE);
    y2 -= 9.0;

    let macro_cols = [70.0, 35.0, 35.0, 35.0];
    for target in goal_targets(r) {
        let heading_color = if target.goal == CalorieGoal::Maintenance { COLOR_ACCENT } else { COLOR_BLACK };
        add_text(
            &layer2,
            &font_bold,
            &format!("{} ({} calories/day)", target.label, target.calories),
            Mm(margin_left),
            Mm(y2),
            12.0,
            heading_color,
        );
        y2 -= 6.5;

        col_x = margin_left;
        for (i, header) in ["Diet", "Protein", "Carbs", "Fat"].iter().enumerate() {
            add_text(&layer2, &font_bold, header, Mm(col_x), Mm(y2), 9.0, COLOR_GRAY);
            col_x += macro_cols[i];
        }
        y2 -= 5.5;

        for (name, split) in [
            ("Moderate Carb (30/40/30)", target.macros.moderate),
            ("Lower Carb (35/25/40)", target.macros.lower),
            ("Higher Carb (25/55/20)", target.macros.higher),
        ] {
            let values = [
                name.to_string(),
                format!("{}g", split.protein_g),
                format!("{}g", split.carbs_g),
                format!("{}g", split.fat_g),
            ];
            col_x = margin_left;
            for (i, value) in values.iter().enumerate() {
                add_text(&layer2, &font, value, Mm(col_x), Mm(y2), 9.0, COLOR_BLACK);
                col_x += macro_cols[i];
            }
            y2 -= 5.5;
        }
        y2 -= 5.0;
    }

    add_line(&layer2, Mm(margin_left), Mm(y2), Mm(200.0), Mm(y2), COLOR_GRAY, 0.5);
    y2 -= 6.0;
    add_text(
        &layer2,
        &font,
        "All figures are estimates for adults and are not medical advice.",
        Mm(margin_left),
        Mm(y2),
        8.0,
        COLOR_GRAY,
    );

    // Save PDF
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    doc.save(&mut writer).map_err(|e| pdf_err(&e))?;

    let file_path = output_path.display().to_string();
    tracing::info!(path = %file_path, "Generated results report");

    Ok(GenerateReportResponse {
        success: true,
        file_path,
        bmr: r.bmr,
        tdee: r.tdee,
        message: format!(
            "Results report generated: {} calories/day maintenance, BMI {}",
            r.tdee, r.bmi
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics;
    use crate::models::Gender;

    fn metric_subject() -> CanonicalMeasurement {
        CanonicalMeasurement {
            unit_system: UnitSystem::Metric,
            age_years: 30,
            gender: Gender::Male,
            height_cm: 180.0,
            weight_kg: 80.0,
            activity_level: ActivityLevel::Moderate,
            body_fat_percentage: None,
            height_feet: None,
            height_inches: None,
            weight_lbs: None,
        }
    }

    fn imperial_subject() -> CanonicalMeasurement {
        CanonicalMeasurement {
            unit_system: UnitSystem::Imperial,
            height_feet: Some(5.0),
            height_inches: Some(11.0),
            weight_lbs: Some(176.0),
            body_fat_percentage: Some(18.0),
            ..metric_subject()
        }
    }

    #[test]
    fn test_format_weight() {
        assert_eq!(format_weight(80.0, UnitSystem::Metric), "80 kg");
        assert_eq!(format_weight(80.0, UnitSystem::Imperial), "176 lbs");
        assert_eq!(format_weight(72.5, UnitSystem::Metric), "72.5 kg");
    }

    #[test]
    fn test_format_height_uses_entered_units() {
        assert_eq!(format_height(&metric_subject()), "180 cm");
        assert_eq!(format_height(&imperial_subject()), "5' 11\"");

        let mut no_inches = imperial_subject();
        no_inches.height_inches = None;
        assert_eq!(format_height(&no_inches), "5' 0\"");
    }

    #[test]
    fn test_format_body_weight_uses_entered_units() {
        assert_eq!(format_body_weight(&metric_subject()), "80 kg");
        assert_eq!(format_body_weight(&imperial_subject()), "176 lbs");
    }

    #[test]
    fn test_markdown_body_fat_hint() {
        let m = metric_subject();
        let md = results_markdown(&m, &metrics::compute(&m));
        assert!(md.contains(BODY_FAT_HINT));
        assert!(md.contains("Mifflin-St Jeor"));

        let m = imperial_subject();
        let md = results_markdown(&m, &metrics::compute(&m));
        assert!(!md.contains(BODY_FAT_HINT));
        assert!(md.contains("**Body Fat:** 18%"));
        assert!(md.contains("Katch-McArdle"));
    }

    #[test]
    fn test_markdown_sections() {
        let m = metric_subject();
        let md = results_markdown(&m, &metrics::compute(&m));
        assert!(md.contains("**Maintenance Calories (TDEE):** 2759 calories/day"));
        assert!(md.contains("**BMI:** 24.7 (Normal Weight)"));
        assert!(md.contains("| Moderate Exercise **(you)** | 3-5 days/week | 2759 |"));
        assert!(md.contains("**Range:** 72 kg - 77 kg"));
        assert!(md.contains("| **Normal Weight** | BMI between 18.5 and 24.9 |"));
        assert!(md.contains("### Cutting (2259 calories/day)"));
        assert!(md.contains("### Bulking (3259 calories/day)"));
        assert!(md.contains("| Moderate Carb (30/40/30) | 207g | 276g | 92g |"));
    }

    #[test]
    fn test_markdown_imperial_weights() {
        let m = imperial_subject();
        let md = results_markdown(&m, &metrics::compute(&m));
        // 89kg x 2.20462 = 196.2
        assert!(md.contains("**196 lbs**"));
        assert!(md.contains("**Height:** 5' 11\""));
    }

    #[test]
    fn test_default_report_path() {
        let path = default_report_path(Path::new("reports"));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("tdee_report_"));
        assert!(name.ends_with(".pdf"));
        assert_eq!(path.parent(), Some(Path::new("reports")));
    }

    #[test]
    fn test_activity_chart_is_png() {
        let m = metric_subject();
        let png = generate_activity_chart(&metrics::compute(&m), m.activity_level, 600, 300).unwrap();
        assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[test]
    fn test_generate_results_report_writes_pdf() {
        let dir = std::env::temp_dir().join(format!("tdee_report_test_{}", std::process::id()));
        let path = dir.join("nested").join("report.pdf");

        let m = metric_subject();
        let response = generate_results_report(&m, &metrics::compute(&m), &path).unwrap();
        assert!(response.success);
        assert_eq!(response.bmr, 1780);
        assert_eq!(response.tdee, 2759);
        assert_eq!(response.file_path, path.display().to_string());

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
