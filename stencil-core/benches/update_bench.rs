use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use stencil_core::Component;

fn build_rows(count: usize) -> String {
    let mut template = String::from("<table>");
    for i in 0..count {
        template.push_str(&format!(
            "<tr><td>{{{{name}}}}</td><td>row {i}: {{{{status}}}}</td><td>static</td></tr>"
        ));
    }
    template.push_str("</table>");
    template
}

fn bench_update_variable(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_variable");
    for &rows in &[10usize, 100usize, 500usize] {
        let template = build_rows(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &template, |b, t| {
            let mut component = Component::new(t).expect("template parses");
            let mut n = 0u64;
            b.iter(|| {
                n += 1;
                component
                    .update_variable("status", n.to_string())
                    .expect("known variable");
            });
        });
    }
    group.finish();
}

fn bench_construct(c: &mut Criterion) {
    let template = build_rows(100);
    c.bench_function("construct_100_rows", |b| {
        b.iter(|| Component::new(&template).expect("template parses"))
    });
}

criterion_group!(benches, bench_update_variable, bench_construct);
criterion_main!(benches);
