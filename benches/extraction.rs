use criterion::{black_box, criterion_group, criterion_main, Criterion};

use product_scraper::core::table::format_table;
use product_scraper::export::{csv_exporter, json_exporter};
use product_scraper::scraper::extract::extract_records;
use product_scraper::scraper::{ScrapeRequest, SelectorSet};

/// A listing page with `count` product cards, every fifth one missing its price
fn sample_page(count: usize) -> String {
    let mut page = String::from("<html><body><main>");
    for i in 0..count {
        page.push_str(r#"<div class="product-card"><h2 class="product-title">"#);
        page.push_str(&format!("  Widget {}  ", i));
        page.push_str("</h2>");
        if i % 5 != 0 {
            page.push_str(&format!(r#"<span class="product-price">${}.99</span>"#, i));
        }
        page.push_str(&format!(r#"<img class="product-image" src="/img/{}.jpg"></div>"#, i));
    }
    page.push_str("</main></body></html>");
    page
}

fn bench_extraction(c: &mut Criterion) {
    let selectors = SelectorSet::compile(&ScrapeRequest::default()).unwrap();
    let small = sample_page(20);
    let large = sample_page(1_000);

    c.bench_function("extract_20_cards", |b| {
        b.iter(|| black_box(extract_records(black_box(&small), &selectors).len()))
    });

    c.bench_function("extract_1000_cards", |b| {
        b.iter(|| black_box(extract_records(black_box(&large), &selectors).len()))
    });

    let records = extract_records(&large, &selectors);

    c.bench_function("csv_1000_records", |b| {
        b.iter(|| black_box(csv_exporter::to_csv_bytes(black_box(&records)).unwrap().len()))
    });

    c.bench_function("json_1000_records", |b| {
        b.iter(|| black_box(json_exporter::to_json_bytes(black_box(&records), false).unwrap().len()))
    });

    c.bench_function("table_1000_records", |b| {
        b.iter(|| black_box(format_table(black_box(&records)).len()))
    });
}

criterion_group!(benches, bench_extraction);
criterion_main!(benches);
