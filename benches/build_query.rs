//! Specification construction and rendering benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use queryspec::query_builder::QueryBuilder;
use queryspec::repository::apply_specification;
use queryspec::specification::dsl::{
    any_of, eq, gt_eq, inner_join, is_null, limit, order_by_desc,
};
use queryspec::specification::Specification;

fn composite_spec() -> Specification {
    eq("status", "active")
        .and(is_null("deleted_at"))
        .and(any_of(vec![gt_eq("score", 90), eq("tier", "gold")]))
        .and(inner_join("orders", "o", "id", "user_id"))
        .and(order_by_desc("created_at"))
        .and(limit(50))
}

fn benchmark_specification_build(c: &mut Criterion) {
    c.bench_function("build_composite_specification", |b| b.iter(composite_spec));
}

fn benchmark_specification_render(c: &mut Criterion) {
    let spec = composite_spec();
    c.bench_function("render_composite_specification", |b| {
        b.iter(|| {
            let mut builder = QueryBuilder::new("users", "e");
            apply_specification(&mut builder, Some(black_box(&spec)), "e");
            builder.build_sql()
        })
    });
}

criterion_group!(
    benches,
    benchmark_specification_build,
    benchmark_specification_render
);
criterion_main!(benches);
