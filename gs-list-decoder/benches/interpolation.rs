use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;

use gs_list_decoder::prelude::*;

criterion_main!(benches);
criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = interpolation,
);

/// `(n, k, min_agreement)` for a code over GF(16)
const PARAMETERS: [(usize, usize, usize); 3] = [(15, 3, 8), (15, 5, 9), (15, 3, 6)];

fn interpolation(c: &mut Criterion) {
    let field = GaloisField::prime_power(16, &[1, 1, 0, 0, 1]).unwrap();
    let mut rng = rand::rng();
    let mut group = c.benchmark_group("Interpolation over GF(16)");

    for (n, k, min_agreement) in PARAMETERS {
        let parameters = GsParameters::select(n, k, min_agreement).unwrap();
        let roots = (0..n)
            .map(|i| (field.generating_element_power(i), field.random_element(&mut rng)))
            .collect::<Vec<_>>();
        let build = |builder: &dyn InterpolationPolynomialBuilder| {
            builder.build(
                parameters.degree_weight,
                parameters.max_weighted_degree,
                &roots,
                parameters.roots_multiplicity,
            )
        };

        let label = format!("k={k}, t={min_agreement}, m={}", parameters.roots_multiplicity);
        let id = BenchmarkId::new("Kötter", &label);
        group.bench_function(id, |b| b.iter(|| build(&KotterBuilder::new())));

        let id = BenchmarkId::new("Linear system", &label);
        group.bench_function(id, |b| b.iter(|| build(&LinearSystemBuilder::new())));
    }

    group.finish();
}
