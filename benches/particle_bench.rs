use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rooms::RoomReading;
use sensory_portrait::particles::{ParticleField, SPECIAL_CHANCE};
use sensory_portrait::scene::compose;

fn bench_particle_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("particles");

    for target in [50, 125, 200, 1000] {
        group.bench_function(format!("{target}_particles"), |b| {
            let mut rng = StdRng::seed_from_u64(42);
            let mut field = ParticleField::new(720.0, SPECIAL_CHANCE, 1000);
            field.replenish(target, &mut rng);
            let mut time = 0.0;
            b.iter(|| {
                time += 0.016;
                black_box(field.advance(1.5, time).len());
                field.recycle(target, &mut rng);
            });
        });
    }

    group.finish();
}

fn bench_compose(c: &mut Criterion) {
    let reading = RoomReading::new(28.0, 650.0, 55.0, 90.0);
    c.bench_function("compose_busy_room", |b| {
        let mut rng = StdRng::seed_from_u64(7);
        let mut field = ParticleField::new(720.0, SPECIAL_CHANCE, 1000);
        let mut time = 0.0;
        b.iter(|| {
            time += 0.016;
            black_box(compose(&reading, time, &mut field, 720.0, &mut rng));
        });
    });
}

criterion_group!(benches, bench_particle_step, bench_compose);
criterion_main!(benches);
