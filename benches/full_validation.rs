use std::hint::black_box;

use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, Criterion};
use gri_assessment::report::{build_export, HtmlFormatter};
use gri_assessment::{build_schema, compute_completion, FieldValue, Registry};

fn bench_full_validation(c: &mut Criterion) {
    let registry = Registry::gri();
    let (schema, mut state) = build_schema(registry);
    state.material_topics = vec!["305".into(), "403".into()];
    state.gri2.insert("disclosure_2_1".into(), FieldValue::text("Acme Corp"));
    if let Some(emissions) = state.topics.get_mut("305") {
        emissions.insert("disclosure_305_1".into(), FieldValue::text("1200"));
        emissions.insert("disclosure_305_2".into(), FieldValue::text("-3"));
    }

    c.bench_function("schema.validate.full_tree", |b| {
        b.iter(|| schema.validate(black_box(&state), None));
    });

    c.bench_function("completion.all_sections", |b| {
        b.iter(|| compute_completion(registry, black_box(&state)));
    });

    let errors = schema.validate(&state, None);
    let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap_or_default();
    c.bench_function("export.build_and_render_html", |b| {
        b.iter(|| {
            let doc = build_export(registry, black_box(&state), &errors, date);
            HtmlFormatter::format(&doc)
        });
    });
}

criterion_group!(benches, bench_full_validation);
criterion_main!(benches);
