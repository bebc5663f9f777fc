use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};
use platewise_mealplan::MealPlan;
use platewise_shopping::BudgetEstimate;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::Duration;

use crate::{RenderError, ESTIMATE_DISCLAIMER};

const ISO_DATE: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 56.0;

const BODY_SIZE: f32 = 10.5;
const HEADING_SIZE: f32 = 13.0;
const TITLE_SIZE: f32 = 18.0;

struct Line {
    text: String,
    size: f32,
    bold: bool,
}

impl Line {
    fn body(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size: BODY_SIZE,
            bold: false,
        }
    }

    fn heading(text: impl Into<String>, size: f32) -> Self {
        Self {
            text: text.into(),
            size,
            bold: true,
        }
    }

    fn leading(&self) -> f32 {
        self.size + 5.0
    }
}

/// Render a normalized meal plan to PDF bytes.
///
/// One section per day in plan order, meals within a day ordered
/// breakfast, lunch, dinner. The footer carries the released estimate (or an
/// unavailable notice when locked) and the disclaimer. Output depends only
/// on the plan and estimate passed in.
pub fn render_plan_pdf(plan: &MealPlan, estimate: &BudgetEstimate) -> Result<Vec<u8>, RenderError> {
    if plan.days == 0 {
        return Err(RenderError::EmptyPlan);
    }

    let lines = layout_lines(plan, estimate)?;
    Ok(write_document(&lines))
}

fn layout_lines(plan: &MealPlan, estimate: &BudgetEstimate) -> Result<Vec<Line>, RenderError> {
    let mut lines = Vec::new();

    // No parentheses in rendered text: they would be backslash-escaped
    // inside PDF literal strings.
    lines.push(Line::heading(
        format!(
            "Meal plan starting {}, {} days",
            plan.start_date.format(&ISO_DATE)?,
            plan.days
        ),
        TITLE_SIZE,
    ));
    lines.push(Line::body(""));

    for day in 0..plan.days {
        let date = plan.start_date + Duration::days(i64::from(day));
        lines.push(Line::heading(
            format!(
                "Day {}: {} {}",
                day + 1,
                date.weekday(),
                date.format(&ISO_DATE)?
            ),
            HEADING_SIZE,
        ));

        let mut meals: Vec<_> = plan.items.iter().filter(|item| item.day == day).collect();
        meals.sort_by_key(|item| item.slot);

        if meals.is_empty() {
            lines.push(Line::body("    no meals planned"));
        }
        for item in meals {
            let time = match item.recipe.total_time_minutes {
                Some(minutes) => format!("{minutes} min"),
                None => "time unknown".to_string(),
            };
            lines.push(Line::body(format!(
                "    {}: {}, {}",
                capitalize(&item.slot.to_string()),
                item.recipe.name,
                time
            )));
        }
        lines.push(Line::body(""));
    }

    match estimate.visible_total(estimate.mode) {
        Some(total) => lines.push(Line::body(format!(
            "Estimated budget, {}: {total:.2}, confidence {}",
            estimate.mode,
            estimate
                .visible_confidence()
                .map(|c| c.to_string())
                .unwrap_or_default()
        ))),
        None => lines.push(Line::body(
            "Budget estimate unavailable: not enough price data yet.",
        )),
    }
    lines.push(Line::body(ESTIMATE_DISCLAIMER));

    Ok(lines)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn write_document(lines: &[Line]) -> Vec<u8> {
    // Paginate: each page holds as many lines as fit between the margins.
    let mut pages: Vec<&[Line]> = Vec::new();
    let mut start = 0;
    let mut y = PAGE_HEIGHT - MARGIN;
    for (i, line) in lines.iter().enumerate() {
        if y - line.leading() < MARGIN {
            pages.push(&lines[start..i]);
            start = i;
            y = PAGE_HEIGHT - MARGIN;
        }
        y -= line.leading();
    }
    pages.push(&lines[start..]);

    let mut pdf = Pdf::new();
    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let font_id = Ref::new(3);
    let bold_font_id = Ref::new(4);

    let mut next_ref = 5;
    let page_ids: Vec<Ref> = pages
        .iter()
        .map(|_| {
            let id = Ref::new(next_ref);
            next_ref += 2;
            id
        })
        .collect();

    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(page_ids.iter().copied())
        .count(pages.len() as i32);
    pdf.type1_font(font_id).base_font(Name(b"Helvetica"));
    pdf.type1_font(bold_font_id)
        .base_font(Name(b"Helvetica-Bold"));

    for (page_lines, page_id) in pages.iter().zip(&page_ids) {
        let content_id = Ref::new(page_id.get() + 1);

        let mut page = pdf.page(*page_id);
        page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT));
        page.parent(page_tree_id);
        page.contents(content_id);
        {
            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            fonts.pair(Name(b"F1"), font_id);
            fonts.pair(Name(b"F2"), bold_font_id);
        }
        page.finish();

        let mut content = Content::new();
        content.begin_text();
        let mut first = true;
        for line in *page_lines {
            let font = if line.bold { b"F2" } else { b"F1" };
            content.set_font(Name(font), line.size);
            if first {
                content.next_line(MARGIN, PAGE_HEIGHT - MARGIN - line.leading());
                first = false;
            } else {
                content.next_line(0.0, -line.leading());
            }
            if !line.text.is_empty() {
                content.show(Str(line.text.as_bytes()));
            }
        }
        content.end_text();
        pdf.stream(content_id, &content.finish());
    }

    pdf.finish()
}
