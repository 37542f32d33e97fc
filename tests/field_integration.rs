//! End-to-end tests of placement and animation through the public API.

use neurofield::prelude::*;
use neurofield::scene::{template, NodeKind};
use neurofield::{color, ConfigError, ResourceError};

fn ready_field(config: FieldConfig) -> (Field, Scene, SmallRandom) {
    let mut rng = SmallRandom::from_seed_option(config.seed);
    let mut scene = Scene::new();
    let mut field = Field::new(config);
    field
        .on_ready(&Resources::with_defaults(), &mut scene, &mut rng)
        .unwrap();
    (field, scene, rng)
}

// ============================================================================
// Placement
// ============================================================================

#[test]
fn test_every_count_places_exactly_count() {
    for count in [0, 1, 2, 3, 5, 10, 99, 100, 101, 120, 257] {
        let (field, scene, _) = ready_field(FieldConfig::new().with_neuron_count(count).with_seed(5));
        assert_eq!(field.emitters().len(), count, "count {}", count);
        // Plus the bounds helper
        assert_eq!(scene.len(), count + 1, "count {}", count);
    }
}

#[test]
fn test_default_field_grid() {
    let (field, _, _) = ready_field(FieldConfig::default().with_seed(1));
    let layout = field.layout();
    assert_eq!((layout.rows, layout.columns), (11, 11));
    assert_eq!(layout.unused_cells(), 1);
}

#[test]
fn test_same_seed_same_field() {
    let config = FieldConfig::new().with_neuron_count(64).with_seed(2024);
    let (a, _, _) = ready_field(config.clone());
    let (b, _, _) = ready_field(config);
    for (ea, eb) in a.emitters().iter().zip(b.emitters()) {
        assert_eq!(ea.pose(), eb.pose());
    }
}

#[test]
fn test_poses_stay_inside_bounds_helper() {
    let config = FieldConfig::new()
        .with_neuron_count(300)
        .with_bounds(8.0, 4.0, 1.0)
        .with_seed(11);
    let half = config.bounds_size() / 2.0;
    let (field, _, _) = ready_field(config);
    for e in field.emitters() {
        let p = e.pose().position;
        assert!(p.x.abs() <= half.x, "x {} outside {}", p.x, half.x);
        assert!(p.y.abs() <= half.y, "y {} outside {}", p.y, half.y);
        assert!(p.z.abs() <= half.z, "z {} outside {}", p.z, half.z);
    }
}

#[test]
fn test_bounds_helper_geometry() {
    let config = FieldConfig::default().with_seed(3);
    let expected = config.bounds_size();
    let (field, scene, _) = ready_field(config);

    let helper = scene.node(field.bounds_helper().unwrap()).unwrap();
    let NodeKind::Lines(lines) = &helper.kind else {
        panic!("bounds helper is not a line node");
    };
    assert_eq!(lines.len(), 12);
    assert_eq!(lines.color, color::from_hex(color::DEFAULT_FLASH));

    let max = lines
        .lines
        .iter()
        .flat_map(|(a, b)| [*a, *b])
        .fold(Vec3::splat(f32::MIN), Vec3::max);
    assert!((max * 2.0 - expected).length() < 1e-5);
}

#[test]
fn test_custom_template() {
    let mut resources = Resources::new();
    resources.insert(
        "dot",
        Node::mesh(
            "dot",
            std::sync::Arc::new(neurofield::scene::Geometry::octahedron(0.1)),
            Material::default(),
        ),
    );
    resources.mark_ready();

    let mut scene = Scene::new();
    let mut field = Field::new(FieldConfig::new().with_neuron_count(7).with_template("dot"));
    field
        .on_ready(&resources, &mut scene, &mut SmallRandom::seeded(8))
        .unwrap();
    for e in field.emitters() {
        assert_eq!(scene.node(e.node().unwrap()).unwrap().paintable_count(), 1);
    }
}

#[test]
fn test_unready_resources_then_ready() {
    let mut resources = Resources::new();
    resources.insert(template::NEURON, template::neuron());

    let mut scene = Scene::new();
    let mut rng = SmallRandom::seeded(1);
    let mut field = Field::new(FieldConfig::new().with_neuron_count(4));

    assert_eq!(
        field.on_ready(&resources, &mut scene, &mut rng),
        Err(ResourceError::NotReady)
    );
    assert!(scene.is_empty());

    resources.mark_ready();
    field.on_ready(&resources, &mut scene, &mut rng).unwrap();
    assert_eq!(field.emitters().len(), 4);
}

// ============================================================================
// Animation
// ============================================================================

#[test]
fn test_flash_rate_matches_probability() {
    let (mut field, mut scene, mut rng) = ready_field(
        FieldConfig::new()
            .with_neuron_count(200)
            .with_flash_probability(0.1)
            .with_seed(77),
    );
    let frames = 200;
    let mut triggered = 0;
    for _ in 0..frames {
        triggered += field.update(16.0, &mut rng, &mut scene).triggered;
    }
    let rate = triggered as f32 / (frames * 200) as f32;
    assert!((rate - 0.1).abs() < 0.01, "rate {}", rate);
}

#[test]
fn test_colors_stay_between_base_and_flash() {
    let config = FieldConfig::new().with_neuron_count(50).with_seed(4);
    let base = config.neuron.base_rgb();
    let flash = config.neuron.flash_rgb();
    let (mut field, mut scene, mut rng) = ready_field(config);

    let mut clock = ManualClock::new(16.0);
    for _ in 0..300 {
        clock.tick();
        field.update(clock.delta_ms(), &mut rng, &mut scene);
        for e in field.emitters() {
            let c = e.color();
            assert!(c.cmpge(base - 1e-6).all() && c.cmple(flash + 1e-6).all());
            scene
                .node(e.node().unwrap())
                .unwrap()
                .visit_paintable(|m| assert_eq!(m.color, c));
        }
    }
}

#[test]
fn test_zero_delta_scale_freezes_flashes() {
    let (mut field, mut scene, _) = ready_field(
        FieldConfig::new()
            .with_neuron_count(6)
            .with_flash_probability(0.5)
            .with_delta_scale(0.0),
    );
    field.update(16.0, &mut SequenceRandom::constant(0.0), &mut scene);
    for _ in 0..100 {
        field.update(1000.0, &mut SequenceRandom::constant(0.99), &mut scene);
    }
    assert_eq!(field.flashing_count(), 6);
}

#[test]
fn test_paused_clock_holds_animation() {
    let (mut field, mut scene, mut rng) =
        ready_field(FieldConfig::new().with_neuron_count(120).with_seed(5));
    let mut clock = ManualClock::new(16.0);
    for _ in 0..30 {
        clock.tick();
        field.advance_frame(&clock, &mut rng, &mut scene);
    }

    let painted = |field: &Field, scene: &Scene| -> Vec<Vec3> {
        let mut out = Vec::new();
        for e in field.emitters() {
            scene
                .node(e.node().unwrap())
                .unwrap()
                .visit_paintable(|m| out.push(m.color));
        }
        out
    };
    let colors: Vec<Vec3> = field.emitters().iter().map(|e| e.color()).collect();
    let scene_colors = painted(&field, &scene);
    let flashing = field.flashing_count();

    clock.pause();
    let mut triggered = 0;
    for _ in 0..120 {
        clock.tick();
        triggered += field.advance_frame(&clock, &mut rng, &mut scene).triggered;
    }

    assert_eq!(triggered, 0);
    assert_eq!(field.flashing_count(), flashing);
    let after: Vec<Vec3> = field.emitters().iter().map(|e| e.color()).collect();
    assert_eq!(colors, after);
    assert_eq!(scene_colors, painted(&field, &scene));

    // Resuming picks up where the field left off
    clock.resume();
    let mut resumed = 0;
    for _ in 0..30 {
        clock.tick();
        resumed += field.advance_frame(&clock, &mut rng, &mut scene).triggered;
    }
    assert!(resumed > 0);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_file_round_trip() {
    let dir = std::env::temp_dir().join(format!("neurofield-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("field.json");

    let config = FieldConfig::new()
        .with_neuron_count(42)
        .with_flash_probability(0.25)
        .with_seed(9);
    config.save(&path).unwrap();
    assert_eq!(FieldConfig::load(&path).unwrap(), config);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_missing_config_file() {
    let err = FieldConfig::load("/nonexistent/neurofield.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
