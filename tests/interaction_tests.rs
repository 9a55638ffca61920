use weft::{Cloth, ClothConfig, ClothError, GridConfig, GridPattern, Vec3};

fn cloth(pattern: GridPattern) -> Cloth {
    Cloth::new(ClothConfig {
        pattern,
        grid: GridConfig::new(6, 7, 8.0).with_offset(300.0, 200.0),
        ..ClothConfig::default()
    })
}

#[test]
fn tear_touches_only_incident_constraints() {
    for pattern in [GridPattern::Square, GridPattern::Triangle, GridPattern::Hexagon] {
        let mut cloth = cloth(pattern);
        let target = cloth.grid().index(3, 3);
        let h = cloth.handle(target).unwrap();

        let incident = cloth.constraints().iter().filter(|c| c.touches(target)).count();
        let others_before = cloth
            .constraints()
            .iter()
            .filter(|c| c.is_active() && !c.touches(target))
            .count();

        assert_eq!(cloth.tear(h), Ok(incident));

        let others_after = cloth
            .constraints()
            .iter()
            .filter(|c| c.is_active() && !c.touches(target))
            .count();
        assert_eq!(others_before, others_after);
        assert!(cloth.constraints().iter().filter(|c| c.touches(target)).all(|c| !c.is_active()));
        assert_eq!(cloth.particle_count(), 42);
        assert_eq!(cloth.particle(h).unwrap().position, cloth.particles()[target].position);
    }
}

#[test]
fn torn_particle_falls_free() {
    let mut cloth = cloth(GridPattern::Square);
    let target = cloth.grid().index(5, 3);
    let h = cloth.handle(target).unwrap();
    cloth.tear(h).unwrap();

    let start = cloth.particles()[target].position;
    cloth.tick(10.0, 0.0, false, 0.1, 5);
    let p = &cloth.particles()[target];
    assert_eq!(p.position, start + Vec3::new(0.0, -10.0, 0.0).scale(0.1 * 0.1));
}

#[test]
fn toggle_pin_keeps_topology() {
    let mut cloth = cloth(GridPattern::Triangle);
    let h = cloth.handle(cloth.grid().index(2, 2)).unwrap();
    let edges: Vec<_> = cloth.constraints().to_vec();

    assert_eq!(cloth.toggle_pin(h), Ok(true));
    assert!(cloth.particle(h).unwrap().pinned);
    assert_eq!(cloth.toggle_pin(h), Ok(false));
    assert_eq!(cloth.constraints(), edges.as_slice());
}

#[test]
fn pinning_mid_sheet_freezes_it() {
    let mut cloth = cloth(GridPattern::Square);
    let h = cloth.handle(cloth.grid().index(4, 4)).unwrap();
    cloth.toggle_pin(h).unwrap();
    let frozen = cloth.particle(h).unwrap().position;
    for _ in 0..20 {
        cloth.tick(10.0, 30.0, true, 0.1, 5);
    }
    assert_eq!(cloth.particle(h).unwrap().position, frozen);
}

#[test]
fn drag_holds_target_every_tick() {
    let mut cloth = cloth(GridPattern::Square);
    let h = cloth.handle(cloth.grid().index(5, 6)).unwrap();
    // Isolate the particle so only gravity acts on it between drag resets.
    cloth.tear(h).unwrap();
    let target = Vec3::new(420.0, 320.0, 250.0);
    assert_eq!(cloth.drag(h, target), Ok(true));

    let one_tick = Vec3::new(0.0, -10.0, 0.0).scale(0.1 * 0.1);
    for _ in 0..10 {
        cloth.tick(10.0, 0.0, false, 0.1, 5);
        let p = cloth.particle(h).unwrap();
        assert_eq!(p.position, target + one_tick);
        assert_eq!(p.prev_position, target);
    }

    cloth.release_drag();
    cloth.tick(10.0, 0.0, false, 0.1, 5);
    // Velocity is two ticks of gravity, not the jump to the drag target.
    let p = cloth.particle(h).unwrap();
    assert_eq!(p.prev_position, target + one_tick);
    assert!((p.velocity_raw().y + 0.2).abs() < 1e-3);
    assert_eq!(p.velocity_raw().x, 0.0);
}

#[test]
fn drag_pulls_connected_neighbours() {
    let mut cloth = cloth(GridPattern::Square);
    let corner = cloth.grid().index(5, 6);
    let neighbour = cloth.grid().index(4, 6);
    let h = cloth.handle(corner).unwrap();
    let x_before = cloth.particles()[neighbour].position.x;

    cloth.drag(h, Vec3::new(500.0, 240.0, 250.0)).unwrap();
    for _ in 0..10 {
        cloth.tick(10.0, 0.0, false, 0.1, 5);
    }
    assert!(cloth.particles()[neighbour].position.x > x_before);
}

#[test]
fn drag_retargets_without_velocity() {
    let mut cloth = cloth(GridPattern::Hexagon);
    let h = cloth.handle(cloth.grid().index(4, 1)).unwrap();
    cloth.drag(h, Vec3::new(300.0, 300.0, 200.0)).unwrap();
    cloth.drag(h, Vec3::new(600.0, 300.0, 200.0)).unwrap();
    let p = cloth.particle(h).unwrap();
    assert_eq!(p.position, Vec3::new(600.0, 300.0, 200.0));
    assert_eq!(p.velocity_raw(), Vec3::zero());
}

#[test]
fn rebuild_invalidates_handles_and_drag() {
    let mut cloth = cloth(GridPattern::Square);
    let h = cloth.handle(cloth.grid().index(3, 3)).unwrap();
    cloth.drag(h, Vec3::new(320.0, 240.0, 200.0)).unwrap();

    cloth.set_pattern(GridPattern::Triangle);
    assert_eq!(cloth.dragged(), None);

    let stale = Err(ClothError::StaleHandle {
        index: h.index(),
        generation: h.generation(),
        current: cloth.generation(),
    });
    assert_eq!(cloth.toggle_pin(h).map(|_| ()), stale);
    assert_eq!(cloth.tear(h).map(|_| ()), stale);
    assert_eq!(cloth.drag(h, Vec3::zero()).map(|_| ()), stale);
    assert!(cloth.particle(h).is_err());
    assert_eq!(cloth.active_constraint_count(), cloth.constraint_count());

    let fresh = cloth.find_nearest(cloth.particles()[h.index()].position, 30.0).unwrap();
    assert_eq!(fresh.generation(), cloth.generation());
    assert!(cloth.toggle_pin(fresh).is_ok());
}

#[test]
fn nearest_outside_radius_is_none() {
    let cloth = cloth(GridPattern::Square);
    assert_eq!(cloth.find_nearest(Vec3::new(1900.0, 1000.0, 900.0), 30.0), None);
}
