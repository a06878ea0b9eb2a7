use field_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn rng() -> StdRng {
    StdRng::seed_from_u64(0x5eed)
}

#[test]
fn sphere_particles_lie_on_the_surface() {
    let cfg = FieldConfig::neural();
    let groups = generate_field(&cfg, Viewport::default(), &mut rng());
    assert_eq!(groups.len(), 2);
    for g in &groups {
        assert_eq!(g.count(), 2000);
        for p in g.positions() {
            assert!((p.length() - 25.0).abs() < 1e-3, "{p} is off the sphere");
        }
    }
}

#[test]
fn cube_particles_stay_inside_half_width() {
    let cfg = FieldConfig::ambient();
    let groups = generate_field(&cfg, Viewport::default(), &mut rng());
    let counts: Vec<usize> = groups.iter().map(ParticleGroup::count).collect();
    assert_eq!(counts, vec![1500, 300, 300, 800]);
    for g in &groups {
        for p in g.positions() {
            assert!(p.abs().max_element() <= 50.0, "{p} outside the cube");
        }
    }
}

#[test]
fn velocities_stay_within_half_drift_scale() {
    let cfg = FieldConfig::ambient();
    let groups = generate_field(&cfg, Viewport::default(), &mut rng());
    for (g, spec) in groups.iter().zip(&cfg.groups) {
        let half = spec.drift_scale * 0.5;
        for v in g.velocities() {
            assert!(v.abs().max_element() <= half, "{v} faster than {half}");
        }
    }
}

#[test]
fn solid_palette_uses_group_color() {
    let cfg = FieldConfig::ambient();
    let groups = generate_field(&cfg, Viewport::default(), &mut rng());
    let cyan = groups[1].colors();
    assert!(cyan.iter().all(|c| c.to_array() == [0.0, 1.0, 1.0]));
}

#[test]
fn neural_palette_keeps_green_in_upper_half() {
    let cfg = FieldConfig::neural();
    let groups = generate_field(&cfg, Viewport::default(), &mut rng());
    for c in groups[0].colors() {
        assert!((0.0..1.0).contains(&c.x));
        assert!((0.5..1.0).contains(&c.y));
        assert!((0.0..1.0).contains(&c.z));
    }
}

#[test]
fn size_scale_only_when_pulsing() {
    let ambient = generate_field(&FieldConfig::ambient(), Viewport::default(), &mut rng());
    let sizes = ambient[0].size_scale().expect("ambient pulses");
    assert!(sizes.iter().all(|s| (0.5..2.5).contains(s)));

    let neural = generate_field(&FieldConfig::neural(), Viewport::default(), &mut rng());
    assert!(neural[0].size_scale().is_none());
}

#[test]
fn narrow_viewport_reduces_counts() {
    let phone = Viewport::new(390, 844, 3.0);
    let ambient = generate_field(&FieldConfig::ambient(), phone, &mut rng());
    let counts: Vec<usize> = ambient.iter().map(ParticleGroup::count).collect();
    assert_eq!(counts, vec![900, 180, 180, 480]);

    let neural = generate_field(&FieldConfig::neural(), phone, &mut rng());
    assert!(neural.iter().all(|g| g.count() == 1500));
}

#[test]
fn breakpoint_width_is_not_mobile() {
    let vp = Viewport::new(768, 1024, 1.0);
    let groups = generate_field(&FieldConfig::neural(), vp, &mut rng());
    assert_eq!(groups[0].count(), 2000);
}

#[test]
fn same_seed_same_field() {
    let cfg = FieldConfig::neural();
    let a = generate_field(&cfg, Viewport::default(), &mut rng());
    let b = generate_field(&cfg, Viewport::default(), &mut rng());
    assert_eq!(a[1].positions(), b[1].positions());
    assert_eq!(a[1].colors(), b[1].colors());
}

#[test]
fn generated_groups_start_unrotated() {
    let groups = generate_field(&FieldConfig::ambient(), Viewport::default(), &mut rng());
    assert!(groups.iter().all(|g| g.rotation() == glam::Vec2::ZERO));
    assert_eq!(groups[0].style().point_size, 0.3);
}
