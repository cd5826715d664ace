use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sensory_portrait::particles::{FULL_LIFE, ParticleField, SPECIAL_CHANCE};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn population_tracks_target(
        seed in any::<u64>(),
        targets in proptest::collection::vec(0usize..300, 1..40),
        speed in 0.0f64..5.0,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut field = ParticleField::new(720.0, SPECIAL_CHANCE, 250);
        let mut time = 0.0;

        for target in targets {
            let before = field.len();
            let drawn = field.advance(speed, time);
            prop_assert_eq!(drawn.len(), before);
            for particle in drawn {
                prop_assert!(particle.visible_life() >= 0.0);
            }
            field.recycle(target, &mut rng);
            time += 0.016;

            prop_assert!(field.len() >= target.min(250));
            prop_assert!(field.len() <= before.max(target.min(250)));
            for particle in field.particles() {
                prop_assert!(!particle.is_dead());
                prop_assert!(particle.life <= FULL_LIFE);
            }
        }
    }
}
