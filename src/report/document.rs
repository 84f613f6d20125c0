use std::path::Path;

use tracing::warn;

use super::pdf::{Font, PdfDocument, INCH, LETTER};
use super::png::read_png;
use super::table::results_table;
use super::text::wrap;
use crate::error::Result;
use crate::harness::BenchResults;

const LEFT: f32 = 72.0;
const WRAP_COLUMNS: usize = 95;
const CODE_COLUMNS: usize = 110;
// the code listing breaks onto a new page below this line
const CODE_FLOOR: f32 = 120.0;
// table output stops here to leave room for the chart
const TABLE_FLOOR: f32 = 200.0;
const TEXT_FLOOR: f32 = 72.0;
const IMAGE_BOX: (f32, f32, f32, f32) = (72.0, 180.0, 6.5 * INCH, 3.5 * INCH);

const OBJECTIVE: &str = "Objective: Implement and compare Insertion Sort, Merge Sort, Heap Sort, \
and Quick Sort. Run experimental analysis on randomly generated datasets and discuss which \
algorithm is most suitable for a logistics company's package sorting requirements.";

const CODE_LISTING: &str = r#"
pub fn insertion_sort<T: Ord + Clone>(values: &mut [T]) {  // in place
    for i in 1..values.len() {
        let key = values[i].clone();
        let mut j = i;
        while j > 0 && values[j - 1] > key { values[j] = values[j - 1].clone(); j -= 1; }
        values[j] = key;
    }
}

pub fn merge_sort<T: Ord + Clone>(input: &[T]) -> Vec<T> {
    if input.len() <= 1 { return input.to_vec(); }
    let mid = input.len() / 2;
    merge(&merge_sort(&input[..mid]), &merge_sort(&input[mid..]))
}

pub fn heap_sort<T: Ord + Clone>(values: &mut [T]) {  // in place
    let n = values.len();
    for i in (0..n / 2).rev() { heapify(values, n, i); }
    for end in (1..n).rev() { values.swap(0, end); heapify(values, end, 0); }
}

pub fn quick_sort<T: Ord + Clone>(input: &[T]) -> Vec<T> {
    if input.len() <= 1 { return input.to_vec(); }
    let pivot = &input[input.len() / 2];
    // less / equal / greater buckets, outer two sorted recursively
    ...
}
"#;

const DISCUSSION: &str = "Observations:
- Insertion Sort shows quadratic growth and becomes impractical for larger datasets. It is suitable for small or nearly-sorted collections.
- Merge Sort and Heap Sort demonstrate n log n growth and are stable in performance. Merge Sort uses extra memory but is stable; Heap Sort is in-place.
- Quick Sort (the bucket-based version used here) performed best on random datasets for these experiments, but note this implementation uses extra space and has worst-case O(n^2). In production, an in-place randomized-pivot quicksort or introsort (switching to heapsort on deep recursion) is recommended.

Recommendation for the logistics company:
For large daily batches of packages where speed matters and stability is not strictly required, use a well-implemented Quick Sort (randomized pivot or introsort). If stability is required (e.g., preserving arrival order for equal keys), use Merge Sort. For memory-constrained environments where extra space is problematic, Heap Sort is a safe alternative.

Additional notes:
- For real-world systems, consider hybrid algorithms (e.g., Timsort or pdqsort) that exploit existing order and use insertion sort for small runs.
- Parallel sorting, external sorting (for data that doesn't fit in memory), and stable multi-key sorts (radix or bucket sort for integers) are also practical choices depending on constraints.";

const FOOTER: &str = "Code and full experimental data saved alongside this report.";

#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub title: String,
    pub course: String,
    pub term: Option<String>,
    pub author: Option<String>,
    pub date: String,
    pub objective: String,
    pub code_listing: String,
    pub discussion: String,
    pub footer: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            title: "Assignment 1: Analyzing Sorting Algorithms in Real-World Scenarios".to_string(),
            course: "Course: CSE 373 \u{2014} Design & Analysis of Algorithms".to_string(),
            term: Some("Summer 2025".to_string()),
            author: None,
            date: chrono::Local::now().format("%B %-d, %Y").to_string(),
            objective: OBJECTIVE.to_string(),
            code_listing: CODE_LISTING.to_string(),
            discussion: DISCUSSION.to_string(),
            footer: FOOTER.to_string(),
        }
    }
}

struct Layout<'a> {
    doc: PdfDocument,
    config: &'a ReportConfig,
    top: f32,
}

impl<'a> Layout<'a> {
    fn new(config: &'a ReportConfig) -> Self {
        Layout {
            doc: PdfDocument::new(LETTER),
            config,
            top: LETTER.1 - 150.0,
        }
    }

    // repeated at the head of every page
    fn draw_title(&mut self) {
        let height = self.doc.page_size().1;
        self.doc.set_font(Font::HelveticaBold, 16.0);
        self.doc.draw_string(LEFT, height - 72.0, &self.config.title);
        self.doc.set_font(Font::Helvetica, 11.0);
        let mut y = height - 92.0;
        let course = match &self.config.term {
            Some(term) => format!("{}        Term: {term}", self.config.course),
            None => self.config.course.clone(),
        };
        self.doc.draw_string(LEFT, y, &course);
        if let Some(author) = &self.config.author {
            y -= 16.0;
            self.doc.draw_string(LEFT, y, &format!("Author: {author}"));
        }
        y -= 16.0;
        self.doc.draw_string(LEFT, y, &format!("Date: {}", self.config.date));
    }

    fn new_page(&mut self, font: Font, size: f32) -> f32 {
        self.doc.show_page();
        self.draw_title();
        self.doc.set_font(font, size);
        self.top
    }

    fn heading(&mut self, y: f32, text: &str) {
        self.doc.set_font(Font::HelveticaBold, 12.0);
        self.doc.draw_string(LEFT, y, text);
    }

    fn wrapped(&mut self, text: &str, mut y: f32, font: Font, size: f32, leading: f32) -> f32 {
        self.doc.set_font(font, size);
        for line in wrap(text, WRAP_COLUMNS) {
            if y < TEXT_FLOOR {
                y = self.new_page(font, size);
            }
            self.doc.draw_string(LEFT, y, &line);
            y -= leading;
        }
        y
    }

    fn overview_page(&mut self) {
        let config = self.config;
        self.draw_title();
        let mut y = self.top;
        y = self.wrapped(&config.objective, y, Font::Helvetica, 11.0, 12.0);
        y -= 10.0;

        self.heading(y, "Implemented Algorithms (concise listing)");
        y -= 16.0;
        self.doc.set_font(Font::Courier, 9.0);
        for line in config.code_listing.trim().lines() {
            let line: String = line.chars().take(CODE_COLUMNS).collect();
            self.doc.draw_string(LEFT, y, &line);
            y -= 10.0;
            if y < CODE_FLOOR {
                y = self.new_page(Font::Courier, 9.0);
            }
        }
    }

    fn results_page(&mut self, results: &BenchResults, chart: &Path) {
        self.doc.show_page();
        self.draw_title();
        let mut y = self.top;
        self.heading(
            y,
            &format!("Experimental Results (average over {} trials)", results.trials),
        );
        y -= 18.0;
        self.doc.set_font(Font::Courier, 9.0);
        for line in results_table(results).lines() {
            self.doc.draw_string(LEFT, y, line);
            y -= 12.0;
            if y < TABLE_FLOOR {
                break;
            }
        }
        self.chart(chart);
    }

    // Scaled into IMAGE_BOX keeping its aspect ratio, or a note saying why
    // it is missing.
    fn chart(&mut self, chart: &Path) {
        let (x, y, box_w, box_h) = IMAGE_BOX;
        let embedded = read_png(chart).and_then(|png| self.doc.embed_png(&png));
        match embedded {
            Ok(id) => {
                let (w, h) = self.doc.image_size(id);
                let scale = (box_w / w as f32).min(box_h / h as f32);
                let (draw_w, draw_h) = (w as f32 * scale, h as f32 * scale);
                let draw_x = x + (box_w - draw_w) / 2.0;
                let draw_y = y + (box_h - draw_h) / 2.0;
                self.doc.draw_image(id, draw_x, draw_y, draw_w, draw_h);
            }
            Err(err) => {
                warn!(chart = %chart.display(), error = %err, "chart not embedded");
                self.doc.set_font(Font::Helvetica, 10.0);
                self.doc
                    .draw_string(x, y, &format!("Plot image could not be inserted: {err}"));
            }
        }
    }

    fn discussion_page(&mut self) {
        self.doc.show_page();
        self.draw_title();
        let mut y = self.top;
        self.heading(y, "Discussion and Analysis");
        y -= 18.0;
        let config = self.config;
        self.wrapped(&config.discussion, y, Font::Helvetica, 10.0, 12.0);

        self.doc.set_font(Font::HelveticaOblique, 9.0);
        self.doc.draw_string(LEFT, 40.0, &config.footer);
    }
}

pub fn build_report(results: &BenchResults, chart: &Path, config: &ReportConfig) -> PdfDocument {
    let mut layout = Layout::new(config);
    layout.overview_page();
    layout.results_page(results, chart);
    layout.discussion_page();
    layout.doc
}

#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn write_report(
    results: &BenchResults,
    chart: &Path,
    config: &ReportConfig,
    path: &Path,
) -> Result<()> {
    let doc = build_report(results, chart, config);
    doc.save(path)
}
