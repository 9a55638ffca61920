use weft::{
    Cloth, ClothConfig, ConstraintSolver, DistanceConstraint, GridConfig, GridPattern,
    NoOpStepObserver, Particle, SolverConfig, Vec3, WorldBounds,
};

#[test]
fn free_fall_first_tick_is_exact() {
    let start = Vec3::new(100.0f32, 500.0, 300.0);
    let force = Vec3::new(3.0, -10.0, 0.5);
    let dt = 0.1f32;

    let mut p = Particle::new(start);
    p.apply_force(force);
    p.integrate(dt);

    assert_eq!(p.position, start + force.scale(dt * dt));
    assert_eq!(p.prev_position, start);
}

#[test]
fn free_fall_through_solver_tick() {
    let start = Vec3::new(500.0f32, 500.0, 500.0);
    let mut solver = ConstraintSolver::new();
    solver.add_particle(Particle::new(start));

    let config = SolverConfig::new().with_gravity(10.0).with_time_step(0.1);
    solver.step(&config, &WorldBounds::default(), &mut NoOpStepObserver);

    let expected = start + Vec3::new(0.0, -10.0, 0.0).scale(0.1 * 0.1);
    assert_eq!(solver.particle(0).position, expected);
}

fn relax_pair(d: f32, rest: f32) -> (f32, f32) {
    let mut ps = [
        Particle::new(Vec3::new(100.0, 100.0, 100.0)),
        Particle::new(Vec3::new(100.0 + d, 100.0, 100.0)),
    ];
    let c = DistanceConstraint::with_rest_length(0, 1, rest, &ps);
    let before = ps[0].position.distance(ps[1].position);
    c.relax(&mut ps);
    (before, ps[0].position.distance(ps[1].position))
}

#[test]
fn relaxation_shortens_stretched_edge() {
    let (before, after) = relax_pair(15.0, 10.0);
    assert!(after < before);
}

#[test]
fn relaxation_lengthens_compressed_edge() {
    let (before, after) = relax_pair(6.0, 10.0);
    assert!(after > before);
}

#[test]
fn relaxation_at_rest_length_is_stationary() {
    let mut ps = [
        Particle::new(Vec3::new(0.0f32, 0.0, 0.0)),
        Particle::new(Vec3::new(0.0, 10.0, 0.0)),
    ];
    let c = DistanceConstraint::with_rest_length(0, 1, 10.0, &ps);
    c.relax(&mut ps);
    assert_eq!(ps[0].position, Vec3::new(0.0, 0.0, 0.0));
    assert_eq!(ps[1].position, Vec3::new(0.0, 10.0, 0.0));
}

#[test]
fn pinned_endpoint_gets_half_correction_only() {
    let a = Vec3::new(0.0f32, 0.0, 0.0);
    let b = Vec3::new(20.0f32, 0.0, 0.0);
    let mut ps = [Particle::pinned(a), Particle::new(b)];
    let c = DistanceConstraint::with_rest_length(0, 1, 10.0, &ps);
    c.relax(&mut ps);

    // delta = 20, ratio = (20 - 10) / 20, correction = 0.5 * ratio * delta = 5
    assert_eq!(ps[0].position, a);
    assert_eq!(ps[1].position, Vec3::new(15.0, 0.0, 0.0));
    // Still 5 short of rest: the free end does not make up for the pinned one.
    assert_eq!(ps[0].position.distance(ps[1].position), 15.0);
}

#[test]
fn pinned_particles_are_bit_identical_after_ticks() {
    for pattern in [GridPattern::Square, GridPattern::Triangle, GridPattern::Hexagon] {
        let mut cloth: Cloth = Cloth::new(ClothConfig {
            pattern,
            grid: GridConfig::new(8, 8, 8.0).with_offset(300.0, 200.0),
            ..ClothConfig::default()
        });
        let before: Vec<_> = cloth
            .particles()
            .iter()
            .map(|p| (p.pinned, p.position, p.prev_position))
            .collect();

        for _ in 0..50 {
            cloth.tick(10.0, 60.0, true, 0.1, 5);
        }

        for (p, (pinned, pos, prev)) in cloth.particles().iter().zip(before) {
            if pinned {
                assert_eq!(p.position, pos);
                assert_eq!(p.prev_position, prev);
            }
        }
    }
}
